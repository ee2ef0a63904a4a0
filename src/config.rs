//! Configuration loading from environment variables.
//!
//! All values come from `TASKLOG_*` variables with sensible defaults. Invalid
//! values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `TASKLOG_NAME` | tasklog | Logger name written to every record |
//! | `TASKLOG_LEVEL` | info | Minimum record level (name or number) |
//! | `TASKLOG_OUTPUT` | stdout | `stdout`, `stderr` or a file path |
//! | `TASKLOG_DIAGNOSTICS` | warn | `EnvFilter` directive for diagnostics |
//! | `TASKLOG_DIAGNOSTICS_FORMAT` | json | `json` or `pretty` |

use std::fmt;
use std::path::PathBuf;

use crate::record::Level;
use crate::telemetry::{build_filter, LogConfig, LogFormat};

pub const DEFAULT_NAME: &str = "tasklog";
pub const DEFAULT_LEVEL: Level = Level::Info;
pub const DEFAULT_DIAGNOSTICS: &str = "warn";

/// Where JSON records are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

impl LogOutput {
    /// `stdout` and `stderr` (any case) name the streams; anything else is a path.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "stdout" | "-" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            _ => Some(Self::File(PathBuf::from(trimmed))),
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings for the JSON record logger.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Level,
    pub output: LogOutput,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            level: DEFAULT_LEVEL,
            output: LogOutput::Stdout,
        }
    }
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvConfig {
    pub logger: LoggerConfig,
    pub diagnostics: LogConfig,
}

/// Flat view of the effective values, keyed by variable name.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub entries: Vec<(&'static str, String)>,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn load_logger_config() -> LoggerConfig {
    let name = env_var("TASKLOG_NAME")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let level = env_var("TASKLOG_LEVEL")
        .and_then(|l| l.parse::<Level>().ok())
        .unwrap_or(DEFAULT_LEVEL);
    let output = env_var("TASKLOG_OUTPUT")
        .and_then(|o| LogOutput::parse(&o))
        .unwrap_or_default();
    LoggerConfig { name, level, output }
}

fn load_diagnostics_config() -> LogConfig {
    let filter = env_var("TASKLOG_DIAGNOSTICS")
        .filter(|f| build_filter(f).is_ok())
        .unwrap_or_else(|| DEFAULT_DIAGNOSTICS.to_string());
    let format = env_var("TASKLOG_DIAGNOSTICS_FORMAT")
        .and_then(|f| LogFormat::parse(&f))
        .unwrap_or_default();
    LogConfig {
        format,
        filter,
        output_path: None,
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    EnvConfig {
        logger: load_logger_config(),
        diagnostics: load_diagnostics_config(),
    }
}

impl EnvConfig {
    /// Return a printable summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        let format = match self.diagnostics.format {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        EffectiveConfig {
            entries: vec![
                ("TASKLOG_NAME", self.logger.name.clone()),
                ("TASKLOG_LEVEL", self.logger.level.to_string()),
                ("TASKLOG_OUTPUT", self.logger.output.to_string()),
                ("TASKLOG_DIAGNOSTICS", self.diagnostics.filter.clone()),
                ("TASKLOG_DIAGNOSTICS_FORMAT", format.to_string()),
            ],
        }
    }
}
