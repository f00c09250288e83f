//! The create/edit session state machine.
//!
//! One session governs one create-or-edit interaction: `Closed` →
//! `OpenForCreate` or `OpenForEdit(id)` → `Submitting` → `Closed` on
//! success or cancel. A failed submission restores the prior open state
//! with the failure attached for display and the entered fields retained,
//! so the user can fix the name or retry without re-entering anything.
//!
//! Only one session is open at a time; opening while open is a rejected
//! transition, not a reset.

use crate::collection::TaskCollection;
use crate::error::{Error, FieldError, Result};
use crate::guard::{self, NameCheck};
use crate::remote::RemoteTaskStore;
use crate::task::{Task, TaskForm, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    OpenForCreate,
    OpenForEdit(TaskId),
    /// Transient while a submission's network round trips run.
    Submitting,
}

/// A submission failure, attached to the restored open state. Duplicate
/// names are distinguishable from transport failures so the caller can flag
/// the name field specifically.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    InvalidFields(Vec<FieldError>),
    DuplicateName(String),
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Task),
    Updated(Task),
}

impl SubmitOutcome {
    pub fn task(&self) -> &Task {
        match self {
            SubmitOutcome::Created(task) | SubmitOutcome::Updated(task) => task,
        }
    }
}

#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
    form: TaskForm,
    error: Option<SubmitError>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            state: SessionState::Closed,
            form: TaskForm::default(),
            error: None,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            SessionState::OpenForCreate | SessionState::OpenForEdit(_)
        )
    }

    /// The failure from the last submission, if any. Cleared on open,
    /// cancel, and success.
    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// Open for creating a task, with cleared fields.
    pub fn open_create(&mut self) -> Result<()> {
        if self.state != SessionState::Closed {
            return Err(Error::SessionAlreadyOpen);
        }
        self.form = TaskForm::default();
        self.error = None;
        self.state = SessionState::OpenForCreate;
        Ok(())
    }

    /// Open for editing `task`, with fields pre-populated from it.
    pub fn open_edit(&mut self, task: &Task) -> Result<()> {
        if self.state != SessionState::Closed {
            return Err(Error::SessionAlreadyOpen);
        }
        self.form = TaskForm::from_task(task);
        self.error = None;
        self.state = SessionState::OpenForEdit(task.id);
        Ok(())
    }

    /// Discard fields and close. No side effects; a no-op when closed.
    pub fn cancel(&mut self) {
        self.form = TaskForm::default();
        self.error = None;
        self.state = SessionState::Closed;
    }

    /// Submit the current fields.
    ///
    /// Validation runs first and reports every failing field; the session
    /// stays open. Then the duplicate-name guard round-trips through the
    /// store (strictly before the write is issued); then the write; then a
    /// reload of `collection` so the caller sees the authoritative
    /// post-write state, including the server-assigned id and display
    /// order on create. On success the session closes.
    pub fn submit(
        &mut self,
        store: &dyn RemoteTaskStore,
        collection: &mut TaskCollection,
    ) -> Result<SubmitOutcome> {
        let prior = self.state;
        let editing = match prior {
            SessionState::OpenForCreate => None,
            SessionState::OpenForEdit(id) => Some(id),
            _ => return Err(Error::SessionNotOpen),
        };

        let fields = match self.form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                if let Error::InvalidFields(failures) = &err {
                    self.error = Some(SubmitError::InvalidFields(failures.clone()));
                }
                return Err(err);
            }
        };

        self.state = SessionState::Submitting;

        match guard::check_unique(store, &fields.name, editing) {
            Ok(NameCheck::Unique) => {}
            Ok(NameCheck::Duplicate) => {
                return Err(self.fail(prior, Error::DuplicateName(fields.name)));
            }
            Err(err) => return Err(self.fail(prior, err)),
        }

        let written = match editing {
            None => store.create(&fields),
            Some(id) => store.update(id, &fields),
        };

        let task = match written {
            Ok(task) => task,
            Err(err) => return Err(self.fail(prior, err)),
        };

        self.cancel();
        collection.load(store)?;

        Ok(match editing {
            None => SubmitOutcome::Created(task),
            Some(_) => SubmitOutcome::Updated(task),
        })
    }

    /// Restore the prior open state with the failure attached; fields stay
    /// as entered.
    fn fail(&mut self, prior: SessionState, err: Error) -> Error {
        self.state = prior;
        self.error = Some(match &err {
            Error::DuplicateName(name) => SubmitError::DuplicateName(name.clone()),
            other => SubmitError::WriteFailed(other.to_string()),
        });
        err
    }
}
