use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use view::EditFailure;

use crate::ui::theme::Theme;

/// One-line notice for a label update the service refused.
pub fn render(frame: &mut Frame<'_>, area: Rect, failure: Option<&EditFailure>) {
    let Some(failure) = failure else {
        return;
    };
    let theme = Theme::default();
    let line = Line::from(vec![
        Span::styled(
            format!("Label for #{} not saved: ", failure.transaction_id),
            Style::default().fg(theme.error),
        ),
        Span::raw(failure.message.as_str()),
        Span::styled("  (Esc to dismiss)", Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
