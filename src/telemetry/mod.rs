//! Telemetry for the crate itself.
//!
//! Records go through [`crate::Logger`]; this module only configures the
//! `tracing` subscriber used for diagnostics and [`crate::TracingLogger`].

mod logging;

pub use logging::{build_filter, init_logging, LogConfig, LogError, LogFormat};
