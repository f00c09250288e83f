//! Remote task store access.
//!
//! [`RemoteTaskStore`] is the seam between the reconciliation engine and the
//! durable store: implementations are constructed by the caller and passed
//! in, never reached through globals. The store owns task identity and is
//! the authority on name uniqueness: `create` and `update` fail with
//! [`Error::DuplicateName`] when the remote rejects a conflicting name, so
//! the client-side pre-check never has to be trusted on its own.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::task::{Task, TaskFields, TaskId};

/// The operations the engine needs from the durable store.
///
/// Every call is a blocking round trip and can fail; callers treat any `Err`
/// other than [`Error::DuplicateName`] as a transport failure.
pub trait RemoteTaskStore {
    /// Fetch every task. Order of the returned list is irrelevant.
    fn fetch_all(&self) -> Result<Vec<Task>>;

    /// Create a task; the store assigns `id` and `display_order`.
    fn create(&self, fields: &TaskFields) -> Result<Task>;

    /// Update name/cost/due date of an existing task.
    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<Task>;

    /// Delete a task by id.
    fn delete(&self, id: TaskId) -> Result<()>;

    /// Persist new display orders for the full task list in one call.
    fn reorder(&self, tasks: &[Task]) -> Result<()>;
}

/// JSON-over-HTTP implementation of [`RemoteTaskStore`].
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
}

impl HttpTaskStore {
    /// Build a store client from configuration. Each call carries the
    /// configured timeout; a timed-out call surfaces as a transport error.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn ensure_success(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(status_error(status))
    }
}

fn status_error(status: StatusCode) -> Error {
    if status == StatusCode::FORBIDDEN {
        Error::Forbidden
    } else {
        Error::RemoteStatus {
            status: status.as_u16(),
        }
    }
}

impl RemoteTaskStore for HttpTaskStore {
    fn fetch_all(&self) -> Result<Vec<Task>> {
        tracing::debug!(url = %self.url("/tasks"), "fetch all tasks");
        let response = self.client.get(self.url("/tasks")).send()?;
        let response = self.ensure_success(response)?;
        Ok(response.json()?)
    }

    fn create(&self, fields: &TaskFields) -> Result<Task> {
        tracing::debug!(name = %fields.name, "create task");
        let response = self.client.post(self.url("/tasks")).json(fields).send()?;
        if response.status() == StatusCode::CONFLICT {
            return Err(Error::DuplicateName(fields.name.clone()));
        }
        let response = self.ensure_success(response)?;
        Ok(response.json()?)
    }

    fn update(&self, id: TaskId, fields: &TaskFields) -> Result<Task> {
        tracing::debug!(id, name = %fields.name, "update task");
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(fields)
            .send()?;
        if response.status() == StatusCode::CONFLICT {
            return Err(Error::DuplicateName(fields.name.clone()));
        }
        let response = self.ensure_success(response)?;
        Ok(response.json()?)
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        tracing::debug!(id, "delete task");
        let response = self.client.delete(self.url(&format!("/tasks/{id}"))).send()?;
        self.ensure_success(response)?;
        Ok(())
    }

    fn reorder(&self, tasks: &[Task]) -> Result<()> {
        tracing::debug!(count = tasks.len(), "persist task order");
        let response = self
            .client
            .put(self.url("/tasks/order"))
            .json(tasks)
            .send()?;
        self.ensure_success(response)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{task, StubStore};
    use super::*;

    #[test]
    fn status_mapping_distinguishes_forbidden() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            Error::Forbidden
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY),
            Error::RemoteStatus { status: 502 }
        ));
    }

    #[test]
    fn http_store_rejects_invalid_config() {
        let config = RemoteConfig {
            base_url: String::new(),
            timeout_secs: 10,
        };
        assert!(HttpTaskStore::new(&config).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = RemoteConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_secs: 10,
        };
        let store = HttpTaskStore::new(&config).expect("store");
        assert_eq!(store.base_url(), "http://localhost:8080/api");
        assert_eq!(store.url("/tasks"), "http://localhost:8080/api/tasks");
    }

    #[test]
    fn stub_assigns_appended_display_order() {
        let store = StubStore::new(vec![task(1, "Pay rent", 1)]);
        let fields = TaskFields {
            name: "Buy milk".to_string(),
            cost: 4.5,
            due_date: "2025-01-06".parse().expect("date"),
        };
        let created = store.create(&fields).expect("create");
        assert_eq!(created.id, 2);
        assert_eq!(created.display_order, 2);
    }

    #[test]
    fn stub_enforces_unique_names() {
        let store = StubStore::new(vec![task(1, "Pay rent", 1), task(2, "Buy milk", 2)]);
        let fields = TaskFields {
            name: "Buy milk".to_string(),
            cost: 4.5,
            due_date: "2025-01-06".parse().expect("date"),
        };
        assert!(matches!(
            store.create(&fields),
            Err(Error::DuplicateName(_))
        ));
        // Renaming a task onto its own name is not a conflict.
        let keep = TaskFields {
            name: "Buy milk".to_string(),
            cost: 5.0,
            due_date: "2025-01-06".parse().expect("date"),
        };
        assert!(store.update(2, &keep).is_ok());
        assert!(matches!(
            store.update(1, &keep),
            Err(Error::DuplicateName(_))
        ));
    }
}
