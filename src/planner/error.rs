use std::path::PathBuf;
use thiserror::Error;

use crate::task::{StorageError, TaskId, PRIORITY_MAX, PRIORITY_MIN};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid title: a task needs a non-empty title")]
    InvalidTitle,

    #[error("Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error(
        "Invalid priority for '{field}': '{value}' (expected an integer from {min} to {max})",
        min = PRIORITY_MIN,
        max = PRIORITY_MAX
    )]
    InvalidPriority { field: &'static str, value: String },

    #[error("Invalid {field} range: minimum is greater than maximum")]
    InvalidRange { field: &'static str },

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Failed to save tasks: {0}")]
    Persist(#[from] StorageError),

    #[error("Refusing to overwrite {}: it could not be read when the planner started", .0.display())]
    Unreadable(PathBuf),
}

impl PlannerError {
    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTitle
                | Self::InvalidDate { .. }
                | Self::InvalidPriority { .. }
                | Self::InvalidRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
