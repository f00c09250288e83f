//! The in-memory ordered task list.
//!
//! [`TaskCollection`] is the single source of truth for display and for
//! computing the next mutation. It caches what the remote store holds,
//! possibly momentarily ahead of it while an optimistic reorder awaits
//! confirmation.

use crate::error::Result;
use crate::remote::RemoteTaskStore;
use crate::task::{sort_by_display_order, Task, TaskId};

#[derive(Debug, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    loading: bool,
    pending_proposal: bool,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current ordered list. Index `i` holds the task with the i-th
    /// smallest display order after a successful [`load`](Self::load).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// True while a [`load`](Self::load) call is running. Observability
    /// only; not part of any correctness argument.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while the list holds an optimistic state that the remote store
    /// has not yet confirmed.
    pub fn has_pending_proposal(&self) -> bool {
        self.pending_proposal
    }

    /// Replace the list with the store's authoritative contents, sorted
    /// ascending by display order.
    ///
    /// On fetch failure the previous list is retained unchanged and the
    /// error is returned to the caller. Display-order gaps left by other
    /// clients are preserved as-is; only a move renumbers.
    pub fn load(&mut self, store: &dyn RemoteTaskStore) -> Result<()> {
        self.loading = true;
        let fetched = store.fetch_all();
        self.loading = false;

        let mut tasks = fetched?;
        sort_by_display_order(&mut tasks);
        self.tasks = tasks;
        self.pending_proposal = false;
        Ok(())
    }

    /// Atomically swap in a new list. Observers see either the old or the
    /// new list, never a mix.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Swap in an optimistic list that still awaits remote confirmation.
    pub fn propose(&mut self, tasks: Vec<Task>) {
        self.replace(tasks);
        self.pending_proposal = true;
    }

    /// Mark the current proposal as confirmed by the remote store.
    pub fn confirm_proposal(&mut self) {
        self.pending_proposal = false;
    }
}
