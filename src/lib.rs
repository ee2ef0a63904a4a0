//! tasklog
//!
//! Structured logging helpers layered over a record logger:
//!
//! - **Error serialization**: values under the `error` field are rewritten
//!   into a stable shape with the stack split into lines.
//! - **Task timing**: [`TaskLogger::start_task`] returns a handle whose
//!   `complete`/`fail` emit a closing record with `duration` and
//!   `durationString`.
//!
//! The task helper only needs something implementing [`Logger`]. The bundled
//! [`JsonLogger`] writes Bunyan-compatible JSON lines.
//!
//! ```
//! use tasklog::{JsonLogger, TaskLogger};
//!
//! let logger = TaskLogger::new(JsonLogger::new("inventory", Vec::new()));
//! let task = logger.start_task("Rebuilding index");
//! task.complete(());
//! ```

pub mod cli;
pub mod config;
pub mod duration;
pub mod error_serializer;
pub mod logger;
pub mod record;
pub mod task;
pub mod telemetry;

pub use error_serializer::{serialize_error, ErrorRecord};
pub use logger::{JsonLogger, Logger, MemoryLogger, TracingLogger};
pub use record::{Fields, Level, Record};
pub use serde_json::Value;
pub use task::{TaskArgs, TaskHandle, TaskLogger, TaskState};

/// Build a [`Fields`] map from `key => value` pairs.
///
/// ```
/// let fields = tasklog::fields! { "user" => "ada", "attempt" => 2 };
/// assert_eq!(fields["attempt"], 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Fields::new();
        $(map.insert(::std::string::String::from($key), $crate::Value::from($value));)+
        map
    }};
}
