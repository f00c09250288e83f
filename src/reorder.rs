//! Order reconciliation for manual moves.
//!
//! A move is applied to the local list first so the caller sees the new
//! order without waiting on the network, then persisted with a single bulk
//! call. If persistence fails, the optimistic list is discarded by
//! reloading from the store, and the failure is reported as
//! [`Error::ReorderNotPersisted`] so the caller can tell the user the move
//! did not stick.

use crate::collection::TaskCollection;
use crate::error::{Error, Result};
use crate::remote::RemoteTaskStore;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

/// Outcome of a move request. A task already at the edge cannot move
/// further; that is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    AtBoundary,
}

/// Assign each task its 1-based position as the display order.
///
/// Renumbering the whole list (rather than swapping the two displaced
/// values) keeps the dense `{1,…,N}` invariant true by construction, and
/// heals any gaps the pre-move state carried.
pub fn renumber(tasks: &mut [Task]) {
    for (index, task) in tasks.iter_mut().enumerate() {
        task.display_order = index as u32 + 1;
    }
}

/// Move a task one position up or down, optimistically locally, then
/// persisted via the store's bulk reorder call.
pub fn move_task(
    collection: &mut TaskCollection,
    store: &dyn RemoteTaskStore,
    id: TaskId,
    direction: MoveDirection,
) -> Result<MoveOutcome> {
    let index = collection.position(id).ok_or(Error::TaskNotFound(id))?;
    let target = match direction {
        MoveDirection::Up => {
            if index == 0 {
                return Ok(MoveOutcome::AtBoundary);
            }
            index - 1
        }
        MoveDirection::Down => {
            if index + 1 >= collection.len() {
                return Ok(MoveOutcome::AtBoundary);
            }
            index + 1
        }
    };

    let mut tasks = collection.tasks().to_vec();
    let moved = tasks.remove(index);
    tasks.insert(target, moved);
    renumber(&mut tasks);

    // Visible to readers before the persistence call is issued.
    collection.propose(tasks.clone());

    match store.reorder(&tasks) {
        Ok(()) => {
            collection.confirm_proposal();
            Ok(MoveOutcome::Moved)
        }
        Err(source) => {
            let reloaded = collection.load(store).is_ok();
            Err(Error::ReorderNotPersisted {
                reloaded,
                source: Box::new(source),
            })
        }
    }
}
