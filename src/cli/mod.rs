// Copyright 2024-2026 tasklog Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for the `tasklog` binary.
//!
//! ## Usage
//!
//! ```bash
//! tasklog run "Nightly backup" -- rsync -a src/ dst/
//! tasklog run "Import" --field batch=42 -- ./import.sh
//! tasklog config show
//! ```

pub mod config_cmd;
pub mod run_cmd;

use thiserror::Error;

pub use run_cmd::{parse_run_args, run_task, RunArgs};

/// Argument errors surfaced to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Missing task description")]
    MissingDescription,
    #[error("Missing command after `--`")]
    MissingCommand,
    #[error("Invalid field `{0}`, expected key=value")]
    InvalidField(String),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::InvalidField("oops".into()).to_string(),
            "Invalid field `oops`, expected key=value"
        );
        assert_eq!(CliError::MissingCommand.exit_code(), 2);
    }
}
