use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{app::AppState, ui::theme::Theme};

/// Calculates a centered rect for the prompt box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(34, 5, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" user id ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let input = Line::from(vec![
        Span::styled("› ", Style::default().fg(theme.accent)),
        Span::styled(state.input.as_str(), Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.accent)),
    ]);
    frame.render_widget(Paragraph::new(input), rows[0]);

    let footer = match &state.prompt_error {
        Some(message) => Span::styled(message.as_str(), Style::default().fg(theme.error)),
        None => Span::styled("Enter to show, Esc to cancel", Style::default().fg(theme.dim)),
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[2]);
}
