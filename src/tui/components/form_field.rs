//! Single-line task form field

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use unicode_width::UnicodeWidthStr;

use crate::tui::styles::Theme;

/// What a field holds. Date and priority fields drop characters that can
/// never be part of a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Priority,
}

impl FieldKind {
    fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Text => true,
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Priority => c.is_ascii_digit(),
        }
    }
}

pub struct FormField {
    label: &'static str,
    placeholder: &'static str,
    kind: FieldKind,
    input: Input,
}

impl FormField {
    pub fn new(label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            label,
            placeholder: "",
            kind,
            input: Input::new(value.into()),
        }
    }

    /// Dimmed text shown while the field is empty and unfocused
    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Feed an editing key to the field; returns false when the key was dropped
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let KeyCode::Char(c) = key.code {
            let is_shortcut = key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if !is_shortcut && !self.kind.accepts(c) {
                return false;
            }
        }
        self.input.handle_event(&Event::Key(key));
        true
    }

    /// Terminal columns taken by the label
    pub fn label_width(&self) -> usize {
        self.label.width()
    }

    /// Render as `label value`, with the label padded to `label_width` so
    /// the values of a form line up. The focused field shows an inverse cursor.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label_width: usize,
        focused: bool,
        theme: &Theme,
    ) {
        let label_style = if focused {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.text)
        };
        let value_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };

        let padding = " ".repeat(label_width.saturating_sub(self.label_width()) + 1);
        let mut spans = vec![Span::styled(self.label, label_style), Span::raw(padding)];

        let value = self.input.value();
        if focused {
            let cursor = self.input.visual_cursor();
            let before: String = value.chars().take(cursor).collect();
            let at: String = value
                .chars()
                .nth(cursor)
                .map(String::from)
                .unwrap_or_else(|| " ".to_string());
            let after: String = value.chars().skip(cursor + 1).collect();

            spans.push(Span::styled(before, value_style));
            spans.push(Span::styled(
                at,
                Style::default().fg(theme.background).bg(theme.accent),
            ));
            spans.push(Span::styled(after, value_style));
        } else if value.is_empty() {
            spans.push(Span::styled(self.placeholder, Style::default().fg(theme.dimmed)));
        } else {
            spans.push(Span::styled(value, value_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Widest label among `fields`
pub fn label_column(fields: &[FormField]) -> usize {
    fields.iter().map(FormField::label_width).max().unwrap_or(0)
}
