//! rota - remote-backed ordered task list
//!
//! This library provides the core functionality for the rota CLI tool: a
//! client-side reconciliation engine that keeps an in-memory ordered view
//! of tasks consistent with a remote store.
//!
//! # Core Concepts
//!
//! - **TaskCollection**: the ordered in-memory list used for display and as
//!   the base for the next mutation
//! - **Duplicate-name guard**: uniqueness checked against a fresh fetch
//!   from the store, never the local cache
//! - **Order reconciliation**: moves applied optimistically, renumbered
//!   densely, and reloaded from the store if persistence fails
//! - **EditSession**: the create/edit state machine with field-level
//!   validation and fields retained across failures
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.rota.toml`
//! - `error`: Error types and result aliases
//! - `remote`: The store trait and its HTTP implementation
//! - `task`: Data model and field validation
//! - `collection`: The in-memory ordered list
//! - `guard`: Duplicate-name checking
//! - `reorder`: Optimistic move reconciliation
//! - `session`: The create/edit state machine
//! - `board`: Store, collection, and session wired together

pub mod board;
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod guard;
pub mod output;
pub mod remote;
pub mod reorder;
pub mod session;
pub mod task;

pub use error::{Error, Result};
