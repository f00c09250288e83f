//! The task board: store, collection, and session wired together.
//!
//! [`TaskBoard`] is the entry point callers drive. It owns the injected
//! store, the cached collection, and the edit session, and it serializes
//! mutations: at most one is in flight against the remote store at a time,
//! and an overlapping request is rejected rather than queued.

use std::cell::Cell;

use crate::collection::TaskCollection;
use crate::error::{Error, Result};
use crate::remote::RemoteTaskStore;
use crate::reorder::{self, MoveDirection, MoveOutcome};
use crate::session::EditSession;
use crate::task::{Task, TaskForm, TaskId};

/// Admits one mutation at a time; a second `begin` while a permit is alive
/// is a conflict.
#[derive(Debug, Default)]
pub struct MutationGate {
    in_flight: Cell<bool>,
}

impl MutationGate {
    pub fn begin(&self) -> Result<MutationPermit<'_>> {
        if self.in_flight.get() {
            return Err(Error::MutationInFlight);
        }
        self.in_flight.set(true);
        Ok(MutationPermit { gate: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

pub struct MutationPermit<'a> {
    gate: &'a MutationGate,
}

impl Drop for MutationPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.set(false);
    }
}

pub struct TaskBoard<S: RemoteTaskStore> {
    store: S,
    collection: TaskCollection,
    session: EditSession,
    gate: MutationGate,
}

impl<S: RemoteTaskStore> TaskBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            collection: TaskCollection::new(),
            session: EditSession::new(),
            gate: MutationGate::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Reload the collection from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.collection.load(&self.store)
    }

    /// Look up a task in the (already loaded) collection.
    pub fn find(&self, id: TaskId) -> Result<&Task> {
        self.collection.get(id).ok_or(Error::TaskNotFound(id))
    }

    /// Create a task from `form` via a full edit-session cycle.
    pub fn create(&mut self, form: TaskForm) -> Result<Task> {
        let _permit = self.gate.begin()?;
        self.session.open_create()?;
        *self.session.form_mut() = form;
        let outcome = self.session.submit(&self.store, &mut self.collection);
        // The board is one-shot per call; a failed session is closed again
        // rather than left open across calls.
        if outcome.is_err() {
            self.session.cancel();
        }
        Ok(outcome?.task().clone())
    }

    /// Edit the task with `id`, submitting `form` as the new field values.
    /// The collection must hold the task (call [`refresh`](Self::refresh)
    /// first).
    pub fn edit(&mut self, id: TaskId, form: TaskForm) -> Result<Task> {
        let _permit = self.gate.begin()?;
        let existing = self
            .collection
            .get(id)
            .ok_or(Error::TaskNotFound(id))?
            .clone();
        self.session.open_edit(&existing)?;
        *self.session.form_mut() = form;
        let outcome = self.session.submit(&self.store, &mut self.collection);
        if outcome.is_err() {
            self.session.cancel();
        }
        Ok(outcome?.task().clone())
    }

    /// Delete a task and reload the authoritative list.
    pub fn delete(&mut self, id: TaskId) -> Result<()> {
        let _permit = self.gate.begin()?;
        self.store.delete(id)?;
        self.collection.load(&self.store)
    }

    /// Move a task one position up or down.
    pub fn move_task(&mut self, id: TaskId, direction: MoveDirection) -> Result<MoveOutcome> {
        let _permit = self.gate.begin()?;
        reorder::move_task(&mut self.collection, &self.store, id, direction)
    }
}
