//! Logger collaborators.
//!
//! The [`Logger`] trait is the only thing the task helper depends on. Three
//! implementations ship with the crate:
//!
//! - [`JsonLogger`]: Bunyan-compatible JSON lines with host and process metadata
//! - [`TracingLogger`]: forwards records into the `tracing` ecosystem
//! - [`MemoryLogger`]: keeps records in memory for assertions

mod json;
mod memory;
mod tracing_bridge;

use std::sync::Arc;

use crate::error_serializer::{serialize_error, ERROR_FIELD};
use crate::record::{Fields, Level};

pub use json::{JsonLogger, BUNYAN_VERSION};
pub use memory::MemoryLogger;
pub use tracing_bridge::TracingLogger;

/// Sink for structured records.
///
/// Implementations own formatting, output and metadata. Emission is
/// infallible from the caller's point of view.
pub trait Logger: Send + Sync {
    /// Emit one record.
    fn log(&self, level: Level, fields: Fields, message: &str);

    /// Whether a record at `level` would be emitted.
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn trace(&self, fields: Fields, message: &str) {
        self.log(Level::Trace, fields, message);
    }

    fn debug(&self, fields: Fields, message: &str) {
        self.log(Level::Debug, fields, message);
    }

    fn info(&self, fields: Fields, message: &str) {
        self.log(Level::Info, fields, message);
    }

    fn warn(&self, fields: Fields, message: &str) {
        self.log(Level::Warn, fields, message);
    }

    fn error(&self, fields: Fields, message: &str) {
        self.log(Level::Error, fields, message);
    }

    fn fatal(&self, fields: Fields, message: &str) {
        self.log(Level::Fatal, fields, message);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        (**self).log(level, fields, message);
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        (**self).log(level, fields, message);
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        (**self).log(level, fields, message);
    }

    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

/// Rewrite the `error` field, if present, through [`serialize_error`].
pub(crate) fn serialize_error_field(fields: &mut Fields) {
    if let Some(value) = fields.get_mut(ERROR_FIELD) {
        *value = serialize_error(value);
    }
}
