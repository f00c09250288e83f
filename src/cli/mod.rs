//! Command-line interface for rota
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in the `task` submodule.

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::reorder::MoveDirection;

mod task;

/// rota - remote-backed ordered task list
///
/// A CLI client for a task API: list, create, edit, delete, and manually
/// reorder tasks while keeping the local view consistent with the store.
#[derive(Parser, Debug)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the task API (overrides .rota.toml)
    #[arg(long, global = true, env = "ROTA_REMOTE")]
    pub remote: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks in display order
    List,

    /// Show one task
    Show {
        /// Task id
        id: i64,
    },

    /// Create a task
    Add {
        /// Task name (must be unique)
        #[arg(long)]
        name: Option<String>,

        /// Cost, non-negative
        #[arg(long, allow_negative_numbers = true)]
        cost: Option<f64>,

        /// Due date (YYYY-MM-DD)
        #[arg(long = "due")]
        due_date: Option<String>,
    },

    /// Edit a task's name, cost, or due date
    Edit {
        /// Task id
        id: i64,

        /// New name (must be unique)
        #[arg(long)]
        name: Option<String>,

        /// New cost, non-negative
        #[arg(long, allow_negative_numbers = true)]
        cost: Option<f64>,

        /// New due date (YYYY-MM-DD)
        #[arg(long = "due")]
        due_date: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },

    /// Move a task one position up or down
    Move {
        /// Task id
        id: i64,

        /// Direction to move
        direction: MoveArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MoveArg {
    Up,
    Down,
}

impl From<MoveArg> for MoveDirection {
    fn from(arg: MoveArg) -> Self {
        match arg {
            MoveArg::Up => MoveDirection::Up,
            MoveArg::Down => MoveDirection::Down,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::List => task::run_list(task::ListOptions {
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Show { id } => task::run_show(task::ShowOptions {
                id,
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                name,
                cost,
                due_date,
            } => task::run_add(task::AddOptions {
                name,
                cost,
                due_date,
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                name,
                cost,
                due_date,
            } => task::run_edit(task::EditOptions {
                id,
                name,
                cost,
                due_date,
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { id } => task::run_delete(task::DeleteOptions {
                id,
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Move { id, direction } => task::run_move(task::MoveOptions {
                id,
                direction: direction.into(),
                remote: self.remote,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
