//! Filter dialog

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::planner::{FilterInput, TaskFilter};
use crate::task::{format_date, PRIORITY_MAX, PRIORITY_MIN};
use crate::tui::components::{label_column, FieldKind, FormField};
use crate::tui::styles::Theme;

const FIELD_COUNT: usize = 5;
const FIELD_MIN_DATE: usize = 0;
const FIELD_MAX_DATE: usize = 1;
const FIELD_MIN_PRIORITY: usize = 2;
const FIELD_MAX_PRIORITY: usize = 3;
const FIELD_NAME: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Apply(FilterInput),
    Clear,
}

pub struct FilterDialog {
    fields: [FormField; FIELD_COUNT],
    focused_field: usize,
    error_message: Option<String>,
}

impl FilterDialog {
    /// Fields show the active filter; unset bounds fall back to the
    /// collection's date range and the full priority range.
    pub fn new(current: &TaskFilter, date_bounds: (NaiveDate, NaiveDate)) -> Self {
        let input = current.to_input();
        let or_default = |value: String, default: String| {
            if value.is_empty() {
                default
            } else {
                value
            }
        };

        let no_bound = "(no bound)";
        Self {
            fields: [
                FormField::new(
                    "Min date:",
                    FieldKind::Date,
                    or_default(input.min_date, format_date(date_bounds.0)),
                )
                .with_placeholder(no_bound),
                FormField::new(
                    "Max date:",
                    FieldKind::Date,
                    or_default(input.max_date, format_date(date_bounds.1)),
                )
                .with_placeholder(no_bound),
                FormField::new(
                    "Min priority:",
                    FieldKind::Priority,
                    or_default(input.min_priority, PRIORITY_MIN.to_string()),
                )
                .with_placeholder(no_bound),
                FormField::new(
                    "Max priority:",
                    FieldKind::Priority,
                    or_default(input.max_priority, PRIORITY_MAX.to_string()),
                )
                .with_placeholder(no_bound),
                FormField::new("Name:", FieldKind::Text, input.name).with_placeholder("(any title)"),
            ],
            focused_field: FIELD_MIN_DATE,
            error_message: None,
        }
    }

    pub fn set_error(&mut self, error: String) {
        self.error_message = Some(error);
    }

    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn current_input(&self) -> FilterInput {
        FilterInput {
            min_date: self.fields[FIELD_MIN_DATE].value().to_string(),
            max_date: self.fields[FIELD_MAX_DATE].value().to_string(),
            min_priority: self.fields[FIELD_MIN_PRIORITY].value().to_string(),
            max_priority: self.fields[FIELD_MAX_PRIORITY].value().to_string(),
            name: self.fields[FIELD_NAME].value().to_string(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<FilterAction> {
        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                DialogResult::Submit(FilterAction::Clear)
            }
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => {
                self.error_message = None;
                DialogResult::Submit(FilterAction::Apply(self.current_input()))
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = if self.focused_field == 0 {
                    FIELD_COUNT - 1
                } else {
                    self.focused_field - 1
                };
                DialogResult::Continue
            }
            _ => {
                if self.fields[self.focused_field].handle_key(key) {
                    self.error_message = None;
                }
                DialogResult::Continue
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 16);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.filter))
            .title(" Filter Tasks ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let label_width = label_column(&self.fields);
        for (idx, field) in self.fields.iter().enumerate() {
            field.render(
                frame,
                chunks[idx],
                label_width,
                idx == self.focused_field,
                theme,
            );
        }

        if let Some(error) = &self.error_message {
            let error_line = Line::from(vec![
                Span::styled("✗ Error: ", Style::default().fg(theme.error).bold()),
                Span::styled(error, Style::default().fg(theme.error)),
            ]);
            frame.render_widget(
                Paragraph::new(error_line).wrap(Wrap { trim: true }),
                chunks[5],
            );
        } else {
            let hint = Line::from(vec![
                Span::styled("Tab", Style::default().fg(theme.hint)),
                Span::raw(" next  "),
                Span::styled("Enter", Style::default().fg(theme.hint)),
                Span::raw(" apply  "),
                Span::styled("Ctrl+R", Style::default().fg(theme.hint)),
                Span::raw(" clear  "),
                Span::styled("Esc", Style::default().fg(theme.hint)),
                Span::raw(" cancel"),
            ]);
            frame.render_widget(Paragraph::new(hint), chunks[5]);
        }
    }
}
