//! Serialization of values logged under the `error` field.
//!
//! Error-like values (anything carrying a truthy `stack`) are rewritten into a
//! fixed shape with the stack split into lines. Everything else passes through
//! untouched. Nothing here can fail.

use std::error::Error as StdError;

use serde_json::{Map, Value};

/// Field name whose value is routed through [`serialize_error`].
pub const ERROR_FIELD: &str = "error";

/// Attributes copied from an error-like value, in output order.
const COPIED_KEYS: [&str; 5] = ["code", "details", "message", "name", "signal"];

/// JavaScript-style truthiness for JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Produce the representation written for a value under the `error` field.
///
/// Falsy values and values without a truthy `stack` are returned unchanged.
pub fn serialize_error(value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return value.clone();
    };
    let stack = match object.get("stack") {
        Some(stack) if is_truthy(stack) => stack,
        _ => return value.clone(),
    };

    let mut out = Map::new();
    for key in COPIED_KEYS {
        if let Some(v) = object.get(key) {
            out.insert(key.to_string(), v.clone());
        }
    }

    let stack = match stack {
        Value::String(s) => Value::Array(s.split('\n').map(|l| Value::String(l.to_string())).collect()),
        other => other.clone(),
    };
    out.insert("stack".to_string(), stack);

    Value::Object(out)
}

/// [`serialize_error`] lifted over an absent value.
pub fn serialize_error_opt(value: Option<&Value>) -> Option<Value> {
    value.map(serialize_error)
}

/// Error-like record built from a Rust error and its source chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub name: String,
    pub message: String,
    pub stack: String,
    pub code: Option<Value>,
    pub details: Option<Value>,
}

impl ErrorRecord {
    /// Capture `err` with the generic name `Error`.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        Self::named("Error", err)
    }

    /// Capture `err` under a caller-chosen name.
    ///
    /// The stack holds the message followed by one line per error source.
    pub fn named(name: impl Into<String>, err: &(dyn StdError + 'static)) -> Self {
        let name = name.into();
        let message = err.to_string();
        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            name,
            message,
            stack,
            code: None,
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Unserialized form, suitable for placing under the `error` field.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(code) = &self.code {
            map.insert("code".to_string(), code.clone());
        }
        if let Some(details) = &self.details {
            map.insert("details".to_string(), details.clone());
        }
        map.insert("message".to_string(), Value::String(self.message.clone()));
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("stack".to_string(), Value::String(self.stack.clone()));
        Value::Object(map)
    }
}
