use ratatui::{style::Style, text::Span};

use crate::{app::Mode, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub fn for_mode(mode: Mode) -> Vec<KeyHint> {
    match mode {
        Mode::Browse => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("←→", "page"),
            KeyHint::new("e", "label"),
            KeyHint::new("r", "refresh"),
            KeyHint::new("u", "user"),
        ],
        Mode::EditLabel | Mode::SwitchUser => vec![
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}
