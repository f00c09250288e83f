//! Duplicate-name guard.
//!
//! Uniqueness is checked against a fresh fetch from the remote store, not
//! the local cache: another client may have written since the last load, so
//! correctness depends on asking the source of truth at the moment of
//! submission.
//!
//! The check is still check-then-act and therefore racy between two
//! concurrent clients. It is a fast-path hint; the store's conflict
//! response on create/update is the authority (see
//! [`RemoteTaskStore::create`](crate::remote::RemoteTaskStore::create)).

use crate::error::Result;
use crate::remote::RemoteTaskStore;
use crate::task::TaskId;

/// Outcome of a uniqueness check, distinct from transport failures (those
/// surface as `Err`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Unique,
    Duplicate,
}

/// Check `candidate` against the store's current task names.
///
/// `exclude` is the id of the task being edited, so a task is never
/// reported as a duplicate of itself. Matching is exact and case-sensitive.
pub fn check_unique(
    store: &dyn RemoteTaskStore,
    candidate: &str,
    exclude: Option<TaskId>,
) -> Result<NameCheck> {
    let tasks = store.fetch_all()?;
    let taken = tasks
        .iter()
        .any(|task| task.name == candidate && Some(task.id) != exclude);
    if taken {
        Ok(NameCheck::Duplicate)
    } else {
        Ok(NameCheck::Unique)
    }
}
