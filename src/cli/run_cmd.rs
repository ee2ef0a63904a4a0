// Copyright 2024-2026 tasklog Contributors
// SPDX-License-Identifier: Apache-2.0

//! `run` subcommand: execute a child command as a timed task.
//!
//! The start record is emitted before spawning. A zero exit status closes the
//! task with `complete`, anything else with `fail`. The child's exit code is
//! returned so the wrapper is transparent to scripts.

use std::process::Command;

use serde_json::Value;

use super::CliError;
use crate::error_serializer::{ErrorRecord, ERROR_FIELD};
use crate::logger::Logger;
use crate::record::Fields;
use crate::task::TaskLogger;

/// Exit code when the child could not be spawned.
pub const SPAWN_FAILURE_CODE: i32 = 127;
/// Exit code when the child was killed by a signal.
pub const SIGNALED_CODE: i32 = 128;

/// Parsed `run` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub description: String,
    pub fields: Fields,
    pub command: Vec<String>,
}

/// Parse `<description> [--field k=v]... -- <command> [args...]`.
pub fn parse_run_args(args: &[String]) -> Result<RunArgs, CliError> {
    let mut iter = args.iter();
    let mut description = None;
    let mut fields = Fields::new();
    let mut command = Vec::new();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--" => {
                command.extend(iter.by_ref().cloned());
                break;
            }
            "--field" | "-f" => {
                let pair = iter.next().ok_or_else(|| CliError::InvalidField(String::new()))?;
                let (key, value) = parse_field(pair)?;
                fields.insert(key, value);
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if description.is_some() {
                    return Err(CliError::UnknownOption(other.to_string()));
                }
                description = Some(other.to_string());
            }
        }
    }

    let description = description.ok_or(CliError::MissingDescription)?;
    if command.is_empty() {
        return Err(CliError::MissingCommand);
    }

    Ok(RunArgs {
        description,
        fields,
        command,
    })
}

/// Split `key=value`; values that parse as JSON keep their type.
fn parse_field(pair: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = pair
        .split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| CliError::InvalidField(pair.to_string()))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Run the command inside a task and return the exit code to propagate.
pub fn run_task<L: Logger>(logger: &TaskLogger<L>, args: &RunArgs) -> i32 {
    let mut start_fields = args.fields.clone();
    start_fields.insert("command".to_string(), Value::from(args.command.clone()));
    let task = logger.start_task((start_fields, args.description.as_str()));

    let (program, rest) = match args.command.split_first() {
        Some(split) => split,
        None => {
            task.fail("No command given");
            return SPAWN_FAILURE_CODE;
        }
    };

    match Command::new(program).args(rest).status() {
        Ok(status) if status.success() => {
            let mut fields = args.fields.clone();
            fields.insert("exitCode".to_string(), Value::from(0));
            task.complete(fields);
            0
        }
        Ok(status) => {
            let code = status.code().unwrap_or(SIGNALED_CODE);
            let mut fields = args.fields.clone();
            fields.insert("exitCode".to_string(), Value::from(code));
            task.fail(fields);
            code
        }
        Err(e) => {
            tracing::debug!(program = %program, error = %e, "spawn failed");
            let mut fields = args.fields.clone();
            fields.insert(
                ERROR_FIELD.to_string(),
                ErrorRecord::named("SpawnError", &e).to_value(),
            );
            task.fail(fields);
            SPAWN_FAILURE_CODE
        }
    }
}
