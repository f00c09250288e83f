//! The task data model and submission-field validation.
//!
//! A [`Task`] is owned by the remote store; the client holds cached copies.
//! The `id` is assigned by the store and never reused. `display_order` is a
//! 1-based presentation position that the client keeps dense (`{1,…,N}` for
//! N tasks).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, FieldError, Result};

/// Store-assigned task identity.
pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub cost: f64,
    pub due_date: NaiveDate,
    pub display_order: u32,
}

/// Validated field values for a create or update submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub name: String,
    pub cost: f64,
    pub due_date: NaiveDate,
}

/// Raw, unvalidated form input for a create or edit.
///
/// `cost` and `due_date` stay optional so "missing" and "malformed" can be
/// reported as different field errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub name: String,
    pub cost: Option<f64>,
    pub due_date: Option<String>,
}

impl TaskForm {
    /// Pre-populate a form from an existing task, for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            cost: Some(task.cost),
            due_date: Some(task.due_date.to_string()),
        }
    }

    /// Validate every field, collecting all failures rather than stopping at
    /// the first.
    pub fn validate(&self) -> Result<TaskFields> {
        let mut failures = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            failures.push(FieldError::NameRequired);
        }

        match self.cost {
            None => failures.push(FieldError::CostRequired),
            Some(cost) if cost < 0.0 || !cost.is_finite() => {
                failures.push(FieldError::CostNegative);
            }
            Some(_) => {}
        }

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => {
                failures.push(FieldError::DueDateRequired);
                None
            }
            Some(raw) => match raw.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(_) => {
                    failures.push(FieldError::DueDateInvalid);
                    None
                }
            },
        };

        if !failures.is_empty() {
            return Err(Error::InvalidFields(failures));
        }

        Ok(TaskFields {
            name: name.to_string(),
            cost: self.cost.unwrap_or_default(),
            due_date: due_date.unwrap_or_default(),
        })
    }
}

/// Sort tasks ascending by display order, ties broken by id for stability
/// across refetches.
pub fn sort_by_display_order(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.id.cmp(&b.id))
    });
}
