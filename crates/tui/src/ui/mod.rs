pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Transactions
            Constraint::Length(1), // Edit failure notice
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::transactions::render(frame, layout[1], state);
    components::notice::render(frame, layout[2], state.view.edit_failure());
    render_bottom_bar(frame, layout[3], state, &theme);

    if state.mode == Mode::SwitchUser {
        screens::user_prompt::render(frame, area, state);
    }
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state
        .view
        .user()
        .map(|user| user.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.view.user().is_none() {
        Span::styled("IDLE", Style::default().fg(theme.dim))
    } else if state.view.is_loading() {
        Span::styled("LOADING", Style::default().fg(theme.accent))
    } else {
        Span::styled("OK", Style::default().fg(theme.positive))
    };

    let line = Line::from(vec![
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("User", Style::default().fg(theme.dim)),
        Span::raw(format!(": {user}  ")),
        status,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_mode(state.mode);
    let mut parts = components::hints::hints_to_spans(&hints, theme);

    if state.mode == Mode::Browse {
        parts.push(components::hints::hint_separator(theme));
        parts.push(Span::styled("q", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" quit"));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

#[cfg(test)]
mod tests {
    use api_types::transaction::iso_date;
    use ratatui::{Terminal, backend::TestBackend};
    use view::{Message, Pager};

    use super::*;
    use crate::testing::{FixedSource, source_with, transactions};

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_for(source: &FixedSource, user: u64) -> AppState {
        let mut state = AppState::new(Pager::new(10), "http://localhost:8000".to_string());
        state.view.update(Message::UserChanged(user), source);
        state
    }

    #[test]
    fn shows_loading_until_data_arrives() {
        let state = state_for(&FixedSource::default(), 5);
        let text = screen(&state);
        assert!(text.contains("User Transactions for ID: 5"));
        assert!(text.contains("Loading transactions"));
    }

    #[test]
    fn shows_empty_message() {
        let state = state_for(&source_with(2, Vec::new()), 2);
        assert!(screen(&state).contains("No transactions found."));
    }

    #[test]
    fn shows_table_and_pagination() {
        let state = state_for(&source_with(1, transactions(25)), 1);
        let text = screen(&state);
        assert!(text.contains("Description"));
        assert!(text.contains("Merchant 25"));
        assert!(!text.contains("Merchant 15 "));
        assert!(text.contains("Page 1 of 3 · 25 transactions"));
    }

    #[test]
    fn shows_edit_failure_notice() {
        let source = source_with(1, transactions(3));
        let mut state = state_for(&source, 1);
        let generation = state.view.generation();
        state.view.update(
            Message::LabelSaved {
                generation,
                transaction_id: 2,
                label: "rent".to_string(),
                outcome: Err("server error: boom".to_string()),
            },
            &source,
        );
        assert!(screen(&state).contains("Label for #2 not saved: server error: boom"));
    }

    #[test]
    fn editor_stays_on_its_transaction() {
        let mut state = state_for(&source_with(1, transactions(5)), 1);
        state.selected = 1;
        state.mode = Mode::EditLabel;
        state.editing = Some(4);
        state.input = "groceries".to_string();

        state
            .view
            .update(Message::DataChanged(1), &source_with(1, transactions(6)));
        let text = screen(&state);
        let line = text
            .lines()
            .find(|line| line.contains("groceries"))
            .unwrap();
        assert!(line.contains("Merchant 4"), "{line}");
    }

    #[test]
    fn date_column_keeps_service_offset() {
        let mut rows = transactions(1);
        rows[0].occurred_at = iso_date::parse("2024-03-01T01:30:00+02:00").unwrap();
        let text = screen(&state_for(&source_with(1, rows), 1));
        assert!(text.contains("2024-03-01"));
        assert!(!text.contains("2024-02-29"));
    }

    #[test]
    fn amounts_show_two_decimals() {
        let mut rows = transactions(1);
        rows[0].amount = -3.14159;
        let text = screen(&state_for(&source_with(1, rows), 1));
        assert!(text.contains("-3.14"));
        assert!(!text.contains("-3.141"));
    }

    #[test]
    fn prompt_overlays_the_table() {
        let mut state = state_for(&source_with(1, transactions(3)), 1);
        state.open_user_prompt();
        state.input = "77".to_string();
        let text = screen(&state);
        assert!(text.contains("user id"));
        assert!(text.contains("› 77"));
    }
}
