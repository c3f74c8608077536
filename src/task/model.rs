//! Task data model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted priority value.
pub const PRIORITY_MIN: u8 = 1;
/// Highest accepted priority value.
pub const PRIORITY_MAX: u8 = 5;

/// Date format used on disk, in the shells and in error messages.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Numeric task ID, assigned once by the planner and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Parse a task ID from user input, accepting an optional leading `#`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        digits.parse().ok().map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority, always within `PRIORITY_MIN..=PRIORITY_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Priority suggested by the shells when the user leaves the field empty
    pub const DEFAULT: Priority = Priority(3);

    pub fn new(value: u8) -> Option<Self> {
        (PRIORITY_MIN..=PRIORITY_MAX)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Parse a priority from text; only plain digits in range are accepted
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "priority {} outside {}..={}",
                value, PRIORITY_MIN, PRIORITY_MAX
            )
        })
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a zero-padded `YYYY-MM-DD` date, ignoring surrounding whitespace
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 || !s.is_ascii() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == s)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: TaskId,

    /// Task title, never blank
    pub title: String,

    /// Free-form notes
    #[serde(default)]
    pub description: String,

    /// Day the task is planned for
    pub date: NaiveDate,

    /// Priority level
    pub priority: Priority,
}

impl Task {
    /// Create a new task
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            date,
            priority,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [P{}] {}",
            self.id,
            format_date(self.date),
            self.priority,
            self.title
        )
    }
}

/// Edit request for an existing task.
///
/// `None` leaves a field untouched. A blank title, date or priority is also
/// treated as "no change" because the shells submit every form field; a blank
/// description clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub priority: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.priority.is_none()
    }

    pub(crate) fn title_value(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub(crate) fn date_value(&self) -> Option<&str> {
        non_blank(self.date.as_deref())
    }

    pub(crate) fn priority_value(&self) -> Option<&str> {
        non_blank(self.priority.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
