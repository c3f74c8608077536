//! Filter state for narrowing the visible task list

use chrono::NaiveDate;

use super::error::{PlannerError, Result};
use crate::task::{format_date, parse_date, Priority, Task};

/// Raw filter fields as typed by the user. Blank fields mean "no bound".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub min_date: String,
    pub max_date: String,
    pub min_priority: String,
    pub max_priority: String,
    pub name: String,
}

/// Parsed filter bounds; every bound is optional and all active bounds must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub min_priority: Option<Priority>,
    pub max_priority: Option<Priority>,
    /// Case-insensitive title substring
    pub name: Option<String>,
}

impl TaskFilter {
    pub fn parse(input: &FilterInput) -> Result<Self> {
        let min_date = parse_date_bound(&input.min_date, "min date")?;
        let max_date = parse_date_bound(&input.max_date, "max date")?;
        let min_priority = parse_priority_bound(&input.min_priority, "min priority")?;
        let max_priority = parse_priority_bound(&input.max_priority, "max priority")?;

        if let (Some(min), Some(max)) = (min_date, max_date) {
            if min > max {
                return Err(PlannerError::InvalidRange { field: "date" });
            }
        }
        if let (Some(min), Some(max)) = (min_priority, max_priority) {
            if min > max {
                return Err(PlannerError::InvalidRange { field: "priority" });
            }
        }

        let name = input.name.trim();
        let name = (!name.is_empty()).then(|| name.to_string());

        Ok(Self {
            min_date,
            max_date,
            min_priority,
            max_priority,
            name,
        })
    }

    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.min_date.is_none_or(|min| task.date >= min)
            && self.max_date.is_none_or(|max| task.date <= max)
            && self.min_priority.is_none_or(|min| task.priority >= min)
            && self.max_priority.is_none_or(|max| task.priority <= max)
            && self.name.as_ref().is_none_or(|name| {
                task.title.to_lowercase().contains(&name.to_lowercase())
            })
    }

    /// Render the filter back into editable text fields
    pub fn to_input(&self) -> FilterInput {
        FilterInput {
            min_date: self.min_date.map(format_date).unwrap_or_default(),
            max_date: self.max_date.map(format_date).unwrap_or_default(),
            min_priority: self
                .min_priority
                .map(|p| p.to_string())
                .unwrap_or_default(),
            max_priority: self
                .max_priority
                .map(|p| p.to_string())
                .unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        }
    }

    /// Short description for status lines, e.g. `date 2024-01-01..2024-01-31, name "gym"`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.min_date.is_some() || self.max_date.is_some() {
            parts.push(format!(
                "date {}..{}",
                self.min_date.map(format_date).unwrap_or_default(),
                self.max_date.map(format_date).unwrap_or_default()
            ));
        }
        if self.min_priority.is_some() || self.max_priority.is_some() {
            parts.push(format!(
                "priority {}..{}",
                self.min_priority
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                self.max_priority
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            ));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name \"{}\"", name));
        }
        parts.join(", ")
    }
}

fn parse_date_bound(value: &str, field: &'static str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value)
        .map(Some)
        .ok_or_else(|| PlannerError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn parse_priority_bound(value: &str, field: &'static str) -> Result<Option<Priority>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Priority::parse(value)
        .map(Some)
        .ok_or_else(|| PlannerError::InvalidPriority {
            field,
            value: value.to_string(),
        })
}
