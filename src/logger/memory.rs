//! In-memory logger used as a capture collaborator in tests.

use parking_lot::Mutex;

use super::Logger;
use crate::record::{Fields, Level, Record};

/// Collects every record it receives, in order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<Record>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records captured so far.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Drain captured records.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, fields: Fields, message: &str) {
        self.records.lock().push(Record::new(level, fields, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_in_order() {
        let logger = MemoryLogger::new();
        assert!(logger.is_empty());

        let mut fields = Fields::new();
        fields.insert("a".into(), json!(1));
        logger.info(fields, "first");
        logger.error(Fields::new(), "second");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[0].get("a"), Some(&json!(1)));
        assert_eq!(records[1].level, Level::Error);
    }

    #[test]
    fn test_take_drains() {
        let logger = MemoryLogger::new();
        logger.info(Fields::new(), "x");
        assert_eq!(logger.take().len(), 1);
        assert!(logger.is_empty());
    }
}
