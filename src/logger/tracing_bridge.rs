//! Bridge from records into `tracing` events.
//!
//! Record fields are rendered to one JSON string under the `fields` key,
//! since `tracing` needs field names known at compile time.

use serde_json::Value;

use super::{serialize_error_field, Logger};
use crate::record::{Fields, Level};

/// Emits each record as a `tracing` event with target `tasklog`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, mut fields: Fields, message: &str) {
        serialize_error_field(&mut fields);
        let fields = Value::Object(fields).to_string();

        match level {
            Level::Trace => tracing::trace!(target: "tasklog", fields = %fields, "{}", message),
            Level::Debug => tracing::debug!(target: "tasklog", fields = %fields, "{}", message),
            Level::Info => tracing::info!(target: "tasklog", fields = %fields, "{}", message),
            Level::Warn => tracing::warn!(target: "tasklog", fields = %fields, "{}", message),
            Level::Error => tracing::error!(target: "tasklog", fields = %fields, "{}", message),
            Level::Fatal => {
                tracing::error!(target: "tasklog", fatal = true, fields = %fields, "{}", message)
            }
        }
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Trace => tracing::enabled!(target: "tasklog", tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(target: "tasklog", tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: "tasklog", tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: "tasklog", tracing::Level::WARN),
            Level::Error | Level::Fatal => {
                tracing::enabled!(target: "tasklog", tracing::Level::ERROR)
            }
        }
    }
}
