//! Home view - task table, navigation and dialogs

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::components::HelpOverlay;
use super::dialogs::{
    ConfirmDialog, DialogResult, FilterAction, FilterDialog, FormMode, TaskFormDialog,
};
use super::styles::Theme;
use crate::planner::Planner;
use crate::task::{format_date, Task, TaskId};

const PAGE_SIZE: i32 = 10;

struct StatusMessage {
    text: String,
    is_error: bool,
}

pub struct HomeView {
    planner: Planner,
    /// IDs of the filtered, sorted tasks in display order
    visible: Vec<TaskId>,

    // UI state
    cursor: usize,
    table_state: TableState,
    status: Option<StatusMessage>,

    // Dialogs
    show_help: bool,
    form_dialog: Option<TaskFormDialog>,
    filter_dialog: Option<FilterDialog>,
    confirm_dialog: Option<ConfirmDialog>,
}

impl HomeView {
    pub fn new(planner: Planner) -> Self {
        let mut status = match planner.load_warnings() {
            [] => None,
            [only] => Some(StatusMessage {
                text: only.clone(),
                is_error: true,
            }),
            [first, rest @ ..] => Some(StatusMessage {
                text: format!("{} (and {} more problems)", first, rest.len()),
                is_error: true,
            }),
        };
        if planner.is_read_only() {
            if let Some(status) = status.as_mut() {
                status.text = format!("Read-only, changes will not be saved. {}", status.text);
            }
        }

        let mut view = Self {
            planner,
            visible: Vec::new(),
            cursor: 0,
            table_state: TableState::default(),
            status,
            show_help: false,
            form_dialog: None,
            filter_dialog: None,
            confirm_dialog: None,
        };

        view.refresh();
        view
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help
            || self.form_dialog.is_some()
            || self.filter_dialog.is_some()
            || self.confirm_dialog.is_some()
    }

    /// Re-sort the collection and re-fetch the filtered view
    fn refresh(&mut self) {
        self.planner.sort_tasks_by_key();
        self.visible = self
            .planner
            .filtered_tasks()
            .iter()
            .map(|t| t.id)
            .collect();

        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(pos) = self.visible.iter().position(|v| *v == id) {
            self.cursor = pos;
        }
    }

    fn selected_task(&self) -> Option<&Task> {
        self.visible
            .get(self.cursor)
            .and_then(|id| self.planner.task_by_id(*id))
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            is_error: false,
        });
    }

    fn set_error(&mut self, text: String) {
        tracing::error!("{}", text);
        self.status = Some(StatusMessage {
            text,
            is_error: true,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle dialog input first
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.form_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.form_dialog = None;
                }
                DialogResult::Submit(data) => {
                    let mode = dialog.mode();
                    let result = match mode {
                        FormMode::Add => self.planner.add_task(
                            &data.title,
                            &data.description,
                            &data.date,
                            &data.priority,
                        ),
                        FormMode::Edit(id) => {
                            self.planner.edit_task(id, &data.to_patch()).map(|()| id)
                        }
                    };
                    match result {
                        Ok(id) => {
                            self.form_dialog = None;
                            self.refresh();
                            self.select_task(id);
                            let verb = match mode {
                                FormMode::Add => "Added",
                                FormMode::Edit(_) => "Updated",
                            };
                            self.set_status(format!("{} task #{}", verb, id));
                        }
                        Err(e) => dialog.set_error(e.to_string()),
                    }
                }
            }
            return None;
        }

        if let Some(dialog) = &mut self.filter_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.filter_dialog = None;
                }
                DialogResult::Submit(FilterAction::Apply(input)) => {
                    match self.planner.set_filter(&input) {
                        Ok(()) => {
                            self.filter_dialog = None;
                            self.refresh();
                            let summary = self.planner.filter().summary();
                            self.set_status(format!("Filter: {}", summary));
                        }
                        Err(e) => dialog.set_error(e.to_string()),
                    }
                }
                DialogResult::Submit(FilterAction::Clear) => {
                    self.filter_dialog = None;
                    self.clear_filters();
                }
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.confirm_dialog = None;
                }
                DialogResult::Submit(id) => {
                    self.confirm_dialog = None;
                    match self.planner.delete_task(id) {
                        Ok(task) => {
                            self.refresh();
                            self.set_status(format!("Deleted task #{} '{}'", task.id, task.title));
                        }
                        Err(e) => self.set_error(e.to_string()),
                    }
                }
            }
            return None;
        }

        // Normal mode keybindings
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('a') => {
                self.form_dialog = Some(TaskFormDialog::add(Local::now().date_naive()));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(dialog) = self.selected_task().map(TaskFormDialog::edit) {
                    self.form_dialog = Some(dialog);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let dialog = self.selected_task().map(|task| {
                    let message = format!("Delete task #{} '{}'?", task.id, task.title);
                    ConfirmDialog::new("Delete Task", &message, task.id)
                });
                if dialog.is_some() {
                    self.confirm_dialog = dialog;
                }
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.filter_dialog = Some(FilterDialog::new(
                    self.planner.filter(),
                    self.planner.date_bounds(),
                ));
            }
            KeyCode::Char('c') => {
                self.clear_filters();
            }
            KeyCode::Char('s') => {
                let selected = self.selected_task().map(|t| t.id);
                let order = self.planner.sort_order().next();
                self.planner.set_sort_order(order);
                self.refresh();
                if let Some(id) = selected {
                    self.select_task(id);
                }
                self.set_status(format!("Sorted by {}", order));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
            }
            KeyCode::PageUp => {
                self.move_cursor(-PAGE_SIZE);
            }
            KeyCode::PageDown => {
                self.move_cursor(PAGE_SIZE);
            }
            KeyCode::Home | KeyCode::Char('g') if key.modifiers == KeyModifiers::NONE => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.visible.len().saturating_sub(1);
            }
            _ => {}
        }

        None
    }

    fn clear_filters(&mut self) {
        self.planner.clear_filters();
        self.refresh();
        self.set_status("Filters cleared".to_string());
    }

    fn move_cursor(&mut self, delta: i32) {
        let items = self.visible.len();
        if items == 0 {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(items - 1)
        };
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Layout: task table, info line, key hints
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_table(frame, chunks[0], theme);
        self.render_info_line(frame, chunks[1], theme);
        self.render_status_bar(frame, chunks[2], theme);

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.form_dialog {
            dialog.render(frame, area, theme);
        }

        if let Some(dialog) = &self.filter_dialog {
            dialog.render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let file_name = self
            .planner
            .storage()
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Task Planner [{}] ", file_name))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.visible.is_empty() {
            let (headline, hint) = if self.planner.tasks().is_empty() {
                ("No tasks yet", "Press 'a' to add one")
            } else {
                ("No tasks match the filter", "Press 'f' to change it or 'c' to clear it")
            };
            let empty_text = vec![
                Line::from(""),
                Line::from(headline).style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from(hint).style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let header = Row::new(["Title", "Description", "Date", "Priority"])
            .style(Style::default().fg(theme.accent).bold())
            .bottom_margin(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|id| self.planner.task_by_id(*id))
            .map(|task| {
                let description = task.description.lines().next().unwrap_or_default();
                Row::new(vec![
                    Cell::from(task.title.clone()).style(Style::default().fg(theme.text)),
                    Cell::from(description.to_string()).style(Style::default().fg(theme.dimmed)),
                    Cell::from(format_date(task.date)).style(Style::default().fg(theme.text)),
                    Cell::from(format!("  {}", task.priority))
                        .style(Style::default().fg(theme.priority(task.priority.value()))),
                ])
            })
            .collect();

        let widths = [
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(Style::default().bg(theme.row_selection).bold());

        self.table_state.select(Some(self.cursor));
        frame.render_stateful_widget(table, inner, &mut self.table_state);
    }

    fn render_info_line(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label_style = Style::default().fg(theme.dimmed);
        let value_style = Style::default().fg(theme.text);
        let sep_style = Style::default().fg(theme.border);

        let filter = self.planner.filter();
        let filter_text = if filter.is_active() {
            filter.summary()
        } else {
            "none".to_string()
        };

        let mut spans = vec![
            Span::styled(" Sort: ", label_style),
            Span::styled(self.planner.sort_order().to_string(), value_style),
            Span::styled(" │ ", sep_style),
            Span::styled("Filter: ", label_style),
            Span::styled(filter_text, Style::default().fg(theme.filter)),
            Span::styled(" │ ", sep_style),
            Span::styled(
                format!("{} of {} tasks", self.visible.len(), self.planner.tasks().len()),
                value_style,
            ),
        ];

        if let Some(status) = &self.status {
            let color = if status.is_error {
                theme.error
            } else {
                theme.success
            };
            spans.push(Span::styled(" │ ", sep_style));
            spans.push(Span::styled(status.text.as_str(), Style::default().fg(color)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let spans = vec![
            Span::styled(" j/k", key_style),
            Span::styled(" Navigate ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" a", key_style),
            Span::styled(" Add ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" e", key_style),
            Span::styled(" Edit ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" d", key_style),
            Span::styled(" Delete ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" f", key_style),
            Span::styled(" Filter ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" s", key_style),
            Span::styled(" Sort ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ?", key_style),
            Span::styled(" Help ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" q", key_style),
            Span::styled(" Quit", desc_style),
        ];

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{SortDirection, SortKey, SortOrder};
    use crate::task::Storage;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut HomeView, text: &str) {
        for c in text.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
    }

    struct TestEnv {
        _temp: TempDir,
        path: PathBuf,
        view: HomeView,
    }

    fn create_test_env_with_tasks(count: usize) -> TestEnv {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.csv");
        let mut planner = Planner::open(Storage::new(&path));
        for i in 0..count {
            planner
                .add_task(
                    &format!("task{}", i),
                    "",
                    &format!("2024-01-{:02}", i + 1),
                    &format!("{}", (i % 5) + 1),
                )
                .unwrap();
        }
        let view = HomeView::new(planner);
        TestEnv {
            _temp: temp,
            path,
            view,
        }
    }

    fn selected_title(view: &HomeView) -> Option<String> {
        view.selected_task().map(|t| t.title.clone())
    }

    #[test]
    fn test_empty_view() {
        let env = create_test_env_with_tasks(0);
        assert!(env.view.visible.is_empty());
        assert!(env.view.selected_task().is_none());
        assert!(!env.view.has_dialog());
    }

    #[test]
    fn test_q_returns_quit() {
        let mut env = create_test_env_with_tasks(1);
        let action = env.view.handle_key(key(KeyCode::Char('q')));
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn test_cursor_movement_is_clamped() {
        let mut env = create_test_env_with_tasks(3);
        assert_eq!(selected_title(&env.view).as_deref(), Some("task0"));

        env.view.handle_key(key(KeyCode::Char('j')));
        env.view.handle_key(key(KeyCode::Down));
        env.view.handle_key(key(KeyCode::Char('j')));
        assert_eq!(env.view.cursor, 2);

        env.view.handle_key(key(KeyCode::PageUp));
        assert_eq!(env.view.cursor, 0);

        env.view.handle_key(key(KeyCode::Char('G')));
        assert_eq!(env.view.cursor, 2);
        env.view.handle_key(key(KeyCode::Char('g')));
        assert_eq!(env.view.cursor, 0);
    }

    #[test]
    fn test_add_task_through_dialog() {
        let mut env = create_test_env_with_tasks(2);
        env.view.handle_key(key(KeyCode::Char('a')));
        assert!(env.view.form_dialog.is_some());

        type_text(&mut env.view, "Buy milk");
        env.view.handle_key(key(KeyCode::Enter));

        assert!(env.view.form_dialog.is_none());
        assert_eq!(env.view.planner.tasks().len(), 3);
        assert_eq!(selected_title(&env.view).as_deref(), Some("Buy milk"));

        let reloaded = Planner::open(Storage::new(&env.path));
        assert!(reloaded.tasks().iter().any(|t| t.title == "Buy milk"));
    }

    #[test]
    fn test_add_with_blank_title_keeps_dialog_open() {
        let mut env = create_test_env_with_tasks(0);
        env.view.handle_key(key(KeyCode::Char('a')));
        env.view.handle_key(key(KeyCode::Enter));

        let dialog = env.view.form_dialog.as_ref().unwrap();
        assert_eq!(
            dialog.error(),
            Some("Invalid title: a task needs a non-empty title")
        );
        assert!(env.view.planner.tasks().is_empty());
    }

    #[test]
    fn test_add_with_bad_priority_shows_error() {
        let mut env = create_test_env_with_tasks(0);
        env.view.handle_key(key(KeyCode::Char('a')));
        type_text(&mut env.view, "Gym");
        for _ in 0..3 {
            env.view.handle_key(key(KeyCode::Tab));
        }
        env.view.handle_key(key(KeyCode::Backspace));
        type_text(&mut env.view, "9");
        env.view.handle_key(key(KeyCode::Enter));

        let error = env.view.form_dialog.as_ref().unwrap().error().unwrap();
        assert!(error.contains("Invalid priority"));
        assert!(error.contains("'9'"));
    }

    #[test]
    fn test_edit_selected_task() {
        let mut env = create_test_env_with_tasks(2);
        env.view.handle_key(key(KeyCode::Char('j')));
        env.view.handle_key(key(KeyCode::Char('e')));

        env.view.handle_key(key(KeyCode::End));
        type_text(&mut env.view, " renamed");
        env.view.handle_key(key(KeyCode::Enter));

        assert!(env.view.form_dialog.is_none());
        assert_eq!(selected_title(&env.view).as_deref(), Some("task1 renamed"));
    }

    #[test]
    fn test_edit_on_empty_view_does_nothing() {
        let mut env = create_test_env_with_tasks(0);
        env.view.handle_key(key(KeyCode::Char('e')));
        assert!(env.view.form_dialog.is_none());
    }

    #[test]
    fn test_delete_confirmed() {
        let mut env = create_test_env_with_tasks(3);
        env.view.handle_key(key(KeyCode::Char('d')));
        assert!(env.view.confirm_dialog.is_some());

        env.view.handle_key(key(KeyCode::Char('y')));
        assert!(env.view.confirm_dialog.is_none());
        assert_eq!(env.view.planner.tasks().len(), 2);
        assert!(env.view.planner.task_by_id(TaskId(1)).is_none());
    }

    #[test]
    fn test_delete_cancelled() {
        let mut env = create_test_env_with_tasks(3);
        env.view.handle_key(key(KeyCode::Char('d')));
        env.view.handle_key(key(KeyCode::Char('n')));
        assert!(env.view.confirm_dialog.is_none());
        assert_eq!(env.view.planner.tasks().len(), 3);
    }

    #[test]
    fn test_delete_last_row_moves_cursor_up() {
        let mut env = create_test_env_with_tasks(3);
        env.view.handle_key(key(KeyCode::Char('G')));
        env.view.handle_key(key(KeyCode::Char('d')));
        env.view.handle_key(key(KeyCode::Char('y')));
        assert_eq!(env.view.cursor, 1);
    }

    #[test]
    fn test_filter_by_name() {
        let mut env = create_test_env_with_tasks(5);
        env.view.handle_key(key(KeyCode::Char('f')));
        assert!(env.view.filter_dialog.is_some());

        env.view.handle_key(key(KeyCode::BackTab));
        type_text(&mut env.view, "TASK3");
        env.view.handle_key(key(KeyCode::Enter));

        assert!(env.view.filter_dialog.is_none());
        assert_eq!(env.view.visible, vec![TaskId(4)]);
    }

    #[test]
    fn test_filter_range_error_keeps_dialog_and_filter() {
        let mut env = create_test_env_with_tasks(5);
        env.view.handle_key(key(KeyCode::Char('f')));

        // min priority: 5
        env.view.handle_key(key(KeyCode::Tab));
        env.view.handle_key(key(KeyCode::Tab));
        env.view.handle_key(key(KeyCode::Backspace));
        type_text(&mut env.view, "5");
        // max priority: 1
        env.view.handle_key(key(KeyCode::Tab));
        env.view.handle_key(key(KeyCode::Backspace));
        type_text(&mut env.view, "1");
        env.view.handle_key(key(KeyCode::Enter));

        let dialog = env.view.filter_dialog.as_ref().unwrap();
        assert_eq!(
            dialog.error(),
            Some("Invalid priority range: minimum is greater than maximum")
        );
        assert!(!env.view.planner.filter().is_active());
        assert_eq!(env.view.visible.len(), 5);
    }

    #[test]
    fn test_ctrl_r_in_filter_dialog_clears() {
        let mut env = create_test_env_with_tasks(5);
        env.view.handle_key(key(KeyCode::Char('f')));
        env.view.handle_key(key(KeyCode::BackTab));
        type_text(&mut env.view, "task1");
        env.view.handle_key(key(KeyCode::Enter));
        assert_eq!(env.view.visible.len(), 1);

        env.view.handle_key(key(KeyCode::Char('f')));
        env.view
            .handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(env.view.filter_dialog.is_none());
        assert!(!env.view.planner.filter().is_active());
        assert_eq!(env.view.visible.len(), 5);
    }

    #[test]
    fn test_sort_cycles_and_keeps_selection() {
        let mut env = create_test_env_with_tasks(3);
        assert_eq!(env.view.planner.sort_order(), SortOrder::default());
        env.view.handle_key(key(KeyCode::Char('j')));

        env.view.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            env.view.planner.sort_order(),
            SortOrder::new(SortKey::Date, SortDirection::Descending)
        );
        assert_eq!(
            env.view.visible,
            vec![TaskId(3), TaskId(2), TaskId(1)]
        );
        assert_eq!(selected_title(&env.view).as_deref(), Some("task1"));

        env.view.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            env.view.planner.sort_order(),
            SortOrder::new(SortKey::Priority, SortDirection::Ascending)
        );
    }

    #[test]
    fn test_help_toggle() {
        let mut env = create_test_env_with_tasks(0);
        env.view.handle_key(key(KeyCode::Char('?')));
        assert!(env.view.has_dialog());
        // q closes the overlay instead of quitting
        assert!(env.view.handle_key(key(KeyCode::Char('q'))).is_none());
        assert!(!env.view.has_dialog());
    }

    #[test]
    fn test_q_is_typed_into_open_form() {
        let mut env = create_test_env_with_tasks(0);
        env.view.handle_key(key(KeyCode::Char('a')));
        assert!(env.view.handle_key(key(KeyCode::Char('q'))).is_none());
        env.view.handle_key(key(KeyCode::Enter));
        assert_eq!(selected_title(&env.view).as_deref(), Some("q"));
    }

    #[test]
    fn test_render_shows_tasks() {
        let mut env = create_test_env_with_tasks(2);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| env.view.render(f, f.area(), &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("task0"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("2 of 2 tasks"));
    }

    #[test]
    fn test_load_warnings_become_status() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.csv");
        std::fs::write(
            &path,
            "Title, Description, Date, Priority, ID\nok,,2024-01-01,3,1\nbad,,nope,3,2\n",
        )
        .unwrap();

        let view = HomeView::new(Planner::open(Storage::new(&path)));
        let status = view.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("Skipped line"));
        assert_eq!(view.visible, vec![TaskId(1)]);
    }

    #[test]
    fn test_unreadable_file_shows_read_only_and_refuses_add() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.csv");
        std::fs::create_dir(&path).unwrap();

        let mut view = HomeView::new(Planner::open(Storage::new(&path)));
        let status = view.status.as_ref().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Read-only"));

        view.handle_key(key(KeyCode::Char('a')));
        for c in "Meeting".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        view.handle_key(key(KeyCode::Enter));
        assert!(view.planner.tasks().is_empty());
        assert!(path.is_dir());
    }
}
