use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use api_types::transaction::Transaction;
use view::RenderModel;

use crate::{
    app::{AppState, Mode},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let model = state.view.render_model();

    let title = match model.user {
        Some(user) => format!(" User Transactions for ID: {user} "),
        None => " User Transactions ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if model.user.is_none() {
        render_centered(
            frame,
            inner,
            vec![Line::from("No user selected. Press u to pick one.")],
            Style::default().fg(theme.dim),
        );
        return;
    }

    if model.is_loading {
        render_centered(
            frame,
            inner,
            vec![
                Line::from("Loading transactions…"),
                Line::from(Span::styled(
                    "This can take a while for users with many accounts.",
                    Style::default().fg(theme.dim),
                )),
            ],
            Style::default().fg(theme.text),
        );
        return;
    }

    if let Some(message) = model.error_message {
        render_centered(
            frame,
            inner,
            vec![Line::from(message)],
            Style::default().fg(theme.error),
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    render_table(frame, layout[0], state, &model, &theme);
    render_pagination(frame, layout[1], state, &model, &theme);
}

fn render_centered(frame: &mut Frame<'_>, area: Rect, lines: Vec<Line<'_>>, style: Style) {
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let rect = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    let content = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(content, rect);
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    model: &RenderModel<'_>,
    theme: &Theme,
) {
    let header = Row::new(["Date", "Description", "Account", "Amount", "Label"]).style(
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::BOLD),
    );

    let rows = model
        .rows
        .iter()
        .map(|tx| {
            let editing = state.mode == Mode::EditLabel && state.editing == Some(tx.id);
            row(tx, editing.then_some(state.input.as_str()), theme)
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !model.rows.is_empty() {
        table_state.select(Some(state.selected));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn row<'a>(tx: &'a Transaction, editing: Option<&'a str>, theme: &Theme) -> Row<'a> {
    let label = match editing {
        Some(input) => Cell::from(Line::from(vec![
            Span::styled(input, Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])),
        None => Cell::from(tx.label.as_deref().unwrap_or("")),
    };

    Row::new(vec![
        Cell::from(tx.date_label()),
        Cell::from(tx.description.as_str()),
        Cell::from(tx.account_id.as_str()),
        Cell::from(format!("{:>10.2}", tx.amount)),
        label,
    ])
}

fn render_pagination(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    model: &RenderModel<'_>,
    theme: &Theme,
) {
    let page_size = state.view.pager().page_size();
    let pages = model.total.div_ceil(page_size).max(1);
    let nav = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        }
    };

    let line = Line::from(vec![
        Span::styled("‹ Previous", nav(model.can_go_previous)),
        Span::raw("   "),
        Span::styled(
            format!(
                "Page {} of {pages} · {} transactions",
                model.page + 1,
                model.total
            ),
            Style::default().fg(theme.dim),
        ),
        Span::raw("   "),
        Span::styled("Next ›", nav(model.can_go_next)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
