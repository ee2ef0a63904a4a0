//! Timed task logging.
//!
//! [`TaskLogger`] wraps any [`Logger`] and adds [`TaskLogger::start_task`].
//! The returned [`TaskHandle`] emits one closing record per `complete` or
//! `fail` call, annotated with `duration` (milliseconds) and `durationString`.
//!
//! ```
//! use tasklog::{MemoryLogger, TaskLogger};
//!
//! let logger = TaskLogger::new(MemoryLogger::new());
//! let task = logger.start_task("Loading catalog");
//! task.complete(());
//!
//! let records = logger.inner().records();
//! assert_eq!(records[0].message, "Loading catalog");
//! assert_eq!(records[1].message, "Done loading catalog");
//! ```
//!
//! Handles do not guard against repeated completion. Each extra `complete` or
//! `fail` emits another record timed from the original start.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::duration::{duration_to_string, elapsed_ms};
use crate::logger::Logger;
use crate::record::{Fields, Level};

/// Field holding the elapsed milliseconds.
pub const DURATION_FIELD: &str = "duration";
/// Field holding the human-readable elapsed time.
pub const DURATION_STRING_FIELD: &str = "durationString";

const DONE_PREFIX: &str = "Done";
const ERROR_PREFIX: &str = "Error";

/// Arguments for starting or closing a task: optional fields and description.
///
/// Usually built through `From`: `()` for nothing, a string for a
/// description, a [`Fields`] map, or a `(Fields, description)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskArgs {
    pub fields: Option<Fields>,
    pub description: Option<String>,
}

impl TaskArgs {
    pub fn none() -> Self {
        Self::default()
    }

    /// Description with an empty field set.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            fields: Some(Fields::new()),
            description: Some(description.into()),
        }
    }

    pub fn fields(fields: Fields) -> Self {
        Self {
            fields: Some(fields),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Insert one field, creating the field set if needed.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .get_or_insert_with(Fields::new)
            .insert(key.into(), value.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.fields.is_none() && self.description.is_none()
    }
}

impl From<()> for TaskArgs {
    fn from(_: ()) -> Self {
        Self::none()
    }
}

impl From<&str> for TaskArgs {
    fn from(description: &str) -> Self {
        Self::description(description)
    }
}

impl From<String> for TaskArgs {
    fn from(description: String) -> Self {
        Self::description(description)
    }
}

impl From<Fields> for TaskArgs {
    fn from(fields: Fields) -> Self {
        Self::fields(fields)
    }
}

impl From<(Fields, &str)> for TaskArgs {
    fn from((fields, description): (Fields, &str)) -> Self {
        Self::fields(fields).with_description(description)
    }
}

impl From<(Fields, String)> for TaskArgs {
    fn from((fields, description): (Fields, String)) -> Self {
        Self::fields(fields).with_description(description)
    }
}

impl From<(Fields, Option<String>)> for TaskArgs {
    fn from((fields, description): (Fields, Option<String>)) -> Self {
        Self {
            fields: Some(fields),
            description,
        }
    }
}

/// Logger decorator adding task timing.
#[derive(Debug, Clone, Default)]
pub struct TaskLogger<L> {
    inner: L,
}

impl<L: Logger> TaskLogger<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    /// The wrapped logger.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Begin timing a task.
    ///
    /// Emits an `info` record right away when fields or a description are
    /// given; with neither, nothing is logged until the task closes.
    pub fn start_task(&self, args: impl Into<TaskArgs>) -> TaskHandle<'_, L> {
        let args = args.into();
        let begin_time = Utc::now();

        if !args.is_empty() {
            let message = args.description.as_deref().unwrap_or_default();
            self.inner.info(args.fields.unwrap_or_default(), message);
        }

        TaskHandle {
            logger: &self.inner,
            state: TaskState {
                begin_time,
                description: args.description,
            },
        }
    }
}

impl<L: Logger> Logger for TaskLogger<L> {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        self.inner.log(level, fields, message);
    }

    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }
}

/// What a handle remembers from `start_task`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskState {
    pub begin_time: DateTime<Utc>,
    pub description: Option<String>,
}

/// One running task.
#[derive(Debug)]
pub struct TaskHandle<'a, L> {
    logger: &'a L,
    state: TaskState,
}

impl<'a, L: Logger> TaskHandle<'a, L> {
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Log successful completion at `info`.
    ///
    /// Message defaults to `Done <start description>` or `Done`.
    pub fn complete(&self, args: impl Into<TaskArgs>) {
        self.close(Level::Info, DONE_PREFIX, args.into());
    }

    /// Log failure at `error`.
    ///
    /// Message defaults to `Error <start description>` or `Error`.
    pub fn fail(&self, args: impl Into<TaskArgs>) {
        self.close(Level::Error, ERROR_PREFIX, args.into());
    }

    fn close(&self, level: Level, prefix: &str, args: TaskArgs) {
        let end_time = Utc::now();
        let begin_time = self.state.begin_time;

        let mut fields = Fields::new();
        fields.insert(
            DURATION_FIELD.to_string(),
            Value::from(elapsed_ms(begin_time, end_time)),
        );
        fields.insert(
            DURATION_STRING_FIELD.to_string(),
            Value::String(duration_to_string(begin_time, end_time)),
        );
        // caller fields win on collision
        if let Some(extra) = args.fields {
            fields.extend(extra);
        }

        let message = match args.description.filter(|d| !d.is_empty()) {
            Some(description) => description,
            None => closing_message(prefix, self.state.description.as_deref()),
        };

        self.logger.log(level, fields, &message);
    }
}

/// `"<prefix> <description>"` with the description's first letter lowercased,
/// or just the prefix when there is no description.
pub fn closing_message(prefix: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => format!("{} {}", prefix, lower_first(d)),
        _ => prefix.to_string(),
    }
}

/// Lowercase the first character, leaving the rest untouched.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
