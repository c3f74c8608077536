//! Planner - owns the task collection and is its only mutator
//!
//! Every successful mutation rewrites the whole task file. When that write
//! fails the in-memory change is undone and `PlannerError::Persist` is
//! returned, so the collection never runs ahead of the file.

pub mod error;
pub mod filter;
pub mod sort;

pub use error::{PlannerError, Result};
pub use filter::{FilterInput, TaskFilter};
pub use sort::{SortDirection, SortKey, SortOrder};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::task::{parse_date, Priority, Storage, Task, TaskId, TaskPatch};

pub struct Planner {
    storage: Storage,
    tasks: Vec<Task>,
    next_id: u64,
    filter: TaskFilter,
    sort: SortOrder,
    load_warnings: Vec<String>,
    /// The file exists but could not be read; saving would destroy it
    read_failed: bool,
}

impl Planner {
    /// Load the collection from `storage`. Never fails: unreadable files and
    /// bad rows are reported through `load_warnings`.
    pub fn open(storage: Storage) -> Self {
        let outcome = storage.load();
        let load_warnings = outcome.warnings();
        let read_failed = outcome.read_error.is_some();
        // Skipped rows still own their IDs
        let next_id = outcome.highest_id().map(|id| id.value()).unwrap_or(0) + 1;
        let tasks = outcome.tasks;

        if read_failed {
            warn!(
                "{} could not be read; changes will not be saved over it",
                storage.path().display()
            );
        }

        info!(
            "Loaded {} tasks from {} ({} warnings)",
            tasks.len(),
            storage.path().display(),
            load_warnings.len()
        );

        Self {
            storage,
            tasks,
            next_id,
            filter: TaskFilter::default(),
            sort: SortOrder::default(),
            load_warnings,
            read_failed,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Problems found while loading the task file
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// ID the next added task will receive
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        date: &str,
        priority: &str,
    ) -> Result<TaskId> {
        let title = validate_title(title)?;
        let date = validate_date(date, "date")?;
        let priority = validate_priority(priority, "priority")?;

        let id = TaskId(self.next_id);
        self.tasks
            .push(Task::new(id, title, description.trim(), date, priority));
        self.next_id += 1;

        if let Err(e) = self.persist() {
            self.tasks.pop();
            self.next_id -= 1;
            return Err(e);
        }

        debug!("Added task {}", id);
        Ok(id)
    }

    pub fn task_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Full collection in its current stored order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing the current filter, in collection order
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Replace the whole filter, or leave it untouched if any field is invalid
    pub fn set_filter(&mut self, input: &FilterInput) -> Result<()> {
        self.filter = TaskFilter::parse(input)?;
        debug!("Filter set: {}", self.filter.summary());
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter = TaskFilter::default();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort = order;
    }

    /// Reorder the collection by the current sort order (stable)
    pub fn sort_tasks_by_key(&mut self) {
        self.sort.apply(&mut self.tasks);
    }

    /// Apply `patch` to a task. Validation happens before any field changes.
    pub fn edit_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<()> {
        let index = self.index_of(id)?;

        let title = patch.title_value().map(validate_title).transpose()?;
        let date = patch
            .date_value()
            .map(|d| validate_date(d, "date"))
            .transpose()?;
        let priority = patch
            .priority_value()
            .map(|p| validate_priority(p, "priority"))
            .transpose()?;

        let previous = self.tasks[index].clone();
        let task = &mut self.tasks[index];
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = &patch.description {
            task.description = description.trim().to_string();
        }
        if let Some(date) = date {
            task.date = date;
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }

        if let Err(e) = self.persist() {
            self.tasks[index] = previous;
            return Err(e);
        }

        debug!("Edited task {}", id);
        Ok(())
    }

    /// Remove a task and return it
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);

        if let Err(e) = self.persist() {
            self.tasks.insert(index, removed);
            return Err(e);
        }

        debug!("Deleted task {}", id);
        Ok(removed)
    }

    /// True when the task file could not be read and mutations are refused
    pub fn is_read_only(&self) -> bool {
        self.read_failed
    }

    fn persist(&self) -> Result<()> {
        if self.read_failed {
            return Err(PlannerError::Unreadable(self.storage.path().to_path_buf()));
        }
        self.storage.save(&self.tasks)?;
        Ok(())
    }

    /// Earliest and latest task dates, or today twice when there are no tasks
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let min = self.tasks.iter().map(|t| t.date).min();
        let max = self.tasks.iter().map(|t| t.date).max();
        match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                let today = Local::now().date_naive();
                (today, today)
            }
        }
    }

    fn index_of(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(PlannerError::NotFound(id))
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PlannerError::InvalidTitle);
    }
    Ok(title.to_string())
}

fn validate_date(value: &str, field: &'static str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| PlannerError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn validate_priority(value: &str, field: &'static str) -> Result<Priority> {
    Priority::parse(value).ok_or_else(|| PlannerError::InvalidPriority {
        field,
        value: value.to_string(),
    })
}
