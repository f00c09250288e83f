//! Error types for rota
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad fields, unknown task, bad config)
//! - 3: Blocked by conflict (duplicate name, mutation already in flight)
//! - 4: Operation failed (transport error, remote rejected the call)

use std::fmt;

use thiserror::Error;

/// Exit codes for the rota CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const CONFLICT: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// A single failed field from submission validation.
///
/// Validation reports every failing field, not just the first, so the
/// caller can flag each input individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    NameRequired,
    CostRequired,
    CostNegative,
    DueDateRequired,
    DueDateInvalid,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FieldError::NameRequired => "name cannot be empty",
            FieldError::CostRequired => "cost is required",
            FieldError::CostNegative => "cost cannot be negative",
            FieldError::DueDateRequired => "due date is required",
            FieldError::DueDateInvalid => "due date must be a calendar date (YYYY-MM-DD)",
        };
        f.write_str(message)
    }
}

/// Main error type for rota operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("invalid fields: {}", format_fields(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("An edit session is already open")]
    SessionAlreadyOpen,

    #[error("No open edit session to submit")]
    SessionNotOpen,

    // Conflicts (exit code 3)
    #[error("A task named '{0}' already exists")]
    DuplicateName(String),

    #[error("Another mutation is still in flight")]
    MutationInFlight,

    // Operation failures (exit code 4)
    #[error("Remote refused the request (forbidden or session expired)")]
    Forbidden,

    #[error("Remote returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Reorder was not persisted: {source}")]
    ReorderNotPersisted {
        /// Whether the local list was successfully reloaded from the remote
        /// after the failed write.
        reloaded: bool,
        source: Box<Error>,
    },
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidFields(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::TaskNotFound(_)
            | Error::SessionAlreadyOpen
            | Error::SessionNotOpen => exit_codes::USER_ERROR,

            // Conflicts
            Error::DuplicateName(_) | Error::MutationInFlight => exit_codes::CONFLICT,

            // Operation failures
            Error::Forbidden
            | Error::RemoteStatus { .. }
            | Error::Http(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::ReorderNotPersisted { .. } => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON output, where an error carries more than
    /// its message.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidFields(fields) => serde_json::to_value(fields).ok(),
            Error::RemoteStatus { status } => Some(serde_json::json!({ "status": status })),
            Error::ReorderNotPersisted { reloaded, source } => Some(serde_json::json!({
                "reloaded": reloaded,
                "cause": source.to_string(),
            })),
            _ => None,
        }
    }
}

/// Result type alias for rota operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(
            Error::InvalidFields(vec![FieldError::NameRequired]).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(Error::TaskNotFound(9).exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::DuplicateName("Pay rent".to_string()).exit_code(),
            exit_codes::CONFLICT
        );
        assert_eq!(Error::MutationInFlight.exit_code(), exit_codes::CONFLICT);
        assert_eq!(
            Error::RemoteStatus { status: 500 }.exit_code(),
            exit_codes::OPERATION_FAILED
        );
        assert_eq!(
            Error::ReorderNotPersisted {
                reloaded: true,
                source: Box::new(Error::RemoteStatus { status: 502 }),
            }
            .exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn invalid_fields_lists_every_failure() {
        let err = Error::InvalidFields(vec![FieldError::NameRequired, FieldError::CostNegative]);
        let text = err.to_string();
        assert!(text.contains("name cannot be empty"));
        assert!(text.contains("cost cannot be negative"));

        let details = err.details().expect("details");
        assert_eq!(details, serde_json::json!(["name_required", "cost_negative"]));
    }
}
