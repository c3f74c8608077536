//! Add/edit task dialog

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::task::{format_date, Priority, Task, TaskId, TaskPatch};
use crate::tui::components::{label_column, FieldKind, FormField};
use crate::tui::styles::Theme;

const FIELD_COUNT: usize = 4;
const FIELD_TITLE: usize = 0;
const FIELD_DESCRIPTION: usize = 1;
const FIELD_DATE: usize = 2;
const FIELD_PRIORITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(TaskId),
}

/// Raw field values as typed; validation belongs to the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFormData {
    pub title: String,
    pub description: String,
    pub date: String,
    pub priority: String,
}

impl TaskFormData {
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            date: Some(self.date.clone()),
            priority: Some(self.priority.clone()),
        }
    }
}

pub struct TaskFormDialog {
    mode: FormMode,
    fields: [FormField; FIELD_COUNT],
    focused_field: usize,
    error_message: Option<String>,
}

fn task_fields(
    title: String,
    description: String,
    date: String,
    priority: String,
) -> [FormField; FIELD_COUNT] {
    [
        FormField::new("Title:", FieldKind::Text, title).with_placeholder("(required)"),
        FormField::new("Description:", FieldKind::Text, description)
            .with_placeholder("(optional)"),
        FormField::new("Date:", FieldKind::Date, date).with_placeholder("YYYY-MM-DD"),
        FormField::new("Priority:", FieldKind::Priority, priority)
            .with_placeholder("1 (highest) to 5"),
    ]
}

impl TaskFormDialog {
    /// Empty form with today's date and the default priority filled in
    pub fn add(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            fields: task_fields(
                String::new(),
                String::new(),
                format_date(today),
                Priority::DEFAULT.to_string(),
            ),
            focused_field: FIELD_TITLE,
            error_message: None,
        }
    }

    /// Form prefilled with the current values of `task`
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            fields: task_fields(
                task.title.clone(),
                task.description.clone(),
                format_date(task.date),
                task.priority.to_string(),
            ),
            focused_field: FIELD_TITLE,
            error_message: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn set_error(&mut self, error: String) {
        self.error_message = Some(error);
    }

    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<TaskFormData> {
        match key.code {
            KeyCode::Esc => {
                self.error_message = None;
                DialogResult::Cancel
            }
            KeyCode::Enter => {
                self.error_message = None;
                DialogResult::Submit(TaskFormData {
                    title: self.fields[FIELD_TITLE].value().to_string(),
                    description: self.fields[FIELD_DESCRIPTION].value().to_string(),
                    date: self.fields[FIELD_DATE].value().to_string(),
                    priority: self.fields[FIELD_PRIORITY].value().to_string(),
                })
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
        let dialog_area = super::centered_rect(area, 70, 14);

        frame.render_widget(Clear, dialog_area);

        let title = match self.mode {
            FormMode::Add => " New Task ".to_string(),
            FormMode::Edit(id) => format!(" Edit Task #{} ", id),
        };

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(title)
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
                chunks[4],
            );
        } else {
            let action = match self.mode {
                FormMode::Add => " create  ",
                FormMode::Edit(_) => " save  ",
            };
            let hint = Line::from(vec![
                Span::styled("Tab", Style::default().fg(theme.hint)),
                Span::raw(" next  "),
                Span::styled("Enter", Style::default().fg(theme.hint)),
                Span::raw(action),
                Span::styled("Esc", Style::default().fg(theme.hint)),
                Span::raw(" cancel"),
            ]);
            frame.render_widget(Paragraph::new(hint), chunks[4]);
        }
    }
}
