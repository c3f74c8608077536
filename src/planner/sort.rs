//! Sort state for ordering the task collection

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Priority,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Priority => "Priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next entry in the cycle Date ASC, Date DESC, Priority ASC, Priority DESC
    pub fn next(self) -> Self {
        match (self.key, self.direction) {
            (SortKey::Date, SortDirection::Ascending) => {
                Self::new(SortKey::Date, SortDirection::Descending)
            }
            (SortKey::Date, SortDirection::Descending) => {
                Self::new(SortKey::Priority, SortDirection::Ascending)
            }
            (SortKey::Priority, SortDirection::Ascending) => {
                Self::new(SortKey::Priority, SortDirection::Descending)
            }
            (SortKey::Priority, SortDirection::Descending) => {
                Self::new(SortKey::Date, SortDirection::Ascending)
            }
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Priority => a.priority.cmp(&b.priority),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable in-place sort; tasks with equal keys keep their relative order
    pub fn apply(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key.label(), self.direction.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{parse_date, Priority, TaskId};

    fn task(id: u64, date: &str, priority: u8) -> Task {
        Task::new(
            TaskId(id),
            format!("task{}", id),
            "",
            parse_date(date).unwrap(),
            Priority::new(priority).unwrap(),
        )
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_cycle_visits_all_orders() {
        let start = SortOrder::default();
        assert_eq!(start.to_string(), "Date ASC");
        assert_eq!(start.next().to_string(), "Date DESC");
        assert_eq!(start.next().next().to_string(), "Priority ASC");
        assert_eq!(start.next().next().next().to_string(), "Priority DESC");
        assert_eq!(start.next().next().next().next(), start);
    }

    #[test]
    fn test_sort_by_date() {
        let mut tasks = vec![
            task(1, "2024-03-01", 1),
            task(2, "2024-01-01", 1),
            task(3, "2024-02-01", 1),
        ];
        SortOrder::new(SortKey::Date, SortDirection::Ascending).apply(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 3, 1]);
        SortOrder::new(SortKey::Date, SortDirection::Descending).apply(&mut tasks);
        assert_eq!(ids(&tasks), vec![1, 3, 2]);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let mut tasks = vec![
            task(1, "2024-01-01", 3),
            task(2, "2024-01-02", 1),
            task(3, "2024-01-03", 3),
            task(4, "2024-01-04", 1),
            task(5, "2024-01-05", 2),
        ];
        SortOrder::new(SortKey::Priority, SortDirection::Ascending).apply(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn test_descending_sort_is_stable() {
        let mut tasks = vec![
            task(1, "2024-01-01", 2),
            task(2, "2024-01-02", 5),
            task(3, "2024-01-03", 2),
            task(4, "2024-01-04", 5),
        ];
        SortOrder::new(SortKey::Priority, SortDirection::Descending).apply(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("Date"), Some(SortKey::Date));
        assert_eq!(SortKey::parse(" priority "), Some(SortKey::Priority));
        assert_eq!(SortKey::parse("title"), None);
    }
}
