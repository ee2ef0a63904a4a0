//! Bunyan-compatible JSON-lines logger.
//!
//! Every record is one JSON object on its own line carrying `name`,
//! `hostname`, `pid`, `level`, `msg`, `time` and `v`, plus the caller's fields.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use super::{serialize_error_field, Logger};
use crate::config::{LogOutput, LoggerConfig};
use crate::record::{Fields, Level};
use crate::telemetry::LogError;

/// Record format version written to the `v` field.
pub const BUNYAN_VERSION: u8 = 0;

/// Structured logger writing Bunyan records to `W`.
///
/// Clones and children share the underlying writer.
pub struct JsonLogger<W: Write + Send> {
    writer: Arc<Mutex<W>>,
    base: Fields,
    min_level: Level,
}

impl<W: Write + Send> JsonLogger<W> {
    /// Create a logger named `name` that writes to `writer` at `info` and above.
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        let mut base = Fields::new();
        base.insert("name".to_string(), Value::String(name.into()));
        base.insert("hostname".to_string(), Value::String(local_hostname()));
        base.insert("pid".to_string(), Value::from(std::process::id()));

        Self {
            writer: Arc::new(Mutex::new(writer)),
            base,
            min_level: Level::Info,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn level(&self) -> Level {
        self.min_level
    }

    pub fn set_level(&mut self, level: Level) {
        self.min_level = level;
    }

    pub fn name(&self) -> &str {
        self.base.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    /// Logger sharing this sink whose records always carry `fields`.
    pub fn child(&self, fields: Fields) -> Self {
        let mut base = self.base.clone();
        base.extend(fields);
        Self {
            writer: Arc::clone(&self.writer),
            base,
            min_level: self.min_level,
        }
    }

    /// Build the JSON object for one record.
    ///
    /// Logger fields go first, caller fields on top, then the core fields
    /// `level`, `msg`, `time` and `v`, which callers cannot override.
    pub fn render(&self, level: Level, mut fields: Fields, message: &str, time: DateTime<Utc>) -> Value {
        serialize_error_field(&mut fields);

        let mut record = self.base.clone();
        record.extend(fields);
        record.insert("level".to_string(), Value::from(level.as_u8()));
        record.insert("msg".to_string(), Value::String(message.to_string()));
        record.insert(
            "time".to_string(),
            Value::String(time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("v".to_string(), Value::from(BUNYAN_VERSION));
        Value::Object(record)
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Run `f` against the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut *self.writer.lock())
    }
}

impl<W: Write + Send> Clone for JsonLogger<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            base: self.base.clone(),
            min_level: self.min_level,
        }
    }
}

impl JsonLogger<io::Stdout> {
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, io::stdout())
    }
}

impl JsonLogger<io::Stderr> {
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::new(name, io::stderr())
    }
}

impl JsonLogger<Box<dyn Write + Send>> {
    /// Build a logger from configuration, opening the output file if needed.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, LogError> {
        let writer: Box<dyn Write + Send> = match &config.output {
            LogOutput::Stdout => Box::new(io::stdout()),
            LogOutput::Stderr => Box::new(io::stderr()),
            LogOutput::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| LogError::FileOpen(format!("{}: {}", path.display(), e)))?;
                Box::new(file)
            }
        };
        Ok(Self::new(config.name.clone(), writer).with_level(config.level))
    }
}

impl<W: Write + Send> Logger for JsonLogger<W> {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let record = self.render(level, fields, message, Utc::now());
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode log record");
                return;
            }
        };

        if let Err(e) = self.write_line(&line) {
            tracing::warn!(error = %e, logger = %self.name(), "Failed to write log record");
        }
    }

    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
