//! Task timing tests.

use std::thread::sleep;
use std::time::{Duration, Instant};

use serde_json::json;
use tasklog::{fields, Fields, Level, MemoryLogger, TaskLogger};

const PAUSE_MS: u64 = 144;
const TOLERANCE_MS: u64 = 500;

fn task_logger() -> TaskLogger<MemoryLogger> {
    TaskLogger::new(MemoryLogger::new())
}

fn duration_of(fields: &Fields) -> u64 {
    fields["duration"].as_u64().expect("duration should be a non-negative integer")
}

// ============================================================================
// Start Record Tests
// ============================================================================

#[test]
fn test_start_without_arguments_is_silent() {
    let logger = task_logger();
    let _task = logger.start_task(());
    assert!(logger.inner().is_empty());
}

#[test]
fn test_start_with_description() {
    let logger = task_logger();
    let _task = logger.start_task("X");

    let records = logger.inner().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].message, "X");
    assert!(records[0].fields.is_empty());
}

#[test]
fn test_start_with_fields_and_description() {
    let logger = task_logger();
    let _task = logger.start_task((fields! { "a" => 1 }, "X"));

    let records = logger.inner().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "X");
    assert_eq!(records[0].fields, fields! { "a" => 1 });
    assert!(records[0].get("duration").is_none());
}

#[test]
fn test_start_with_fields_only() {
    let logger = task_logger();
    let _task = logger.start_task(fields! { "job" => "sync" });

    let records = logger.inner().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "");
    assert_eq!(records[0].fields["job"], json!("sync"));
}

// ============================================================================
// Complete Tests
// ============================================================================

#[test]
fn test_complete_without_description() {
    let logger = task_logger();
    let begin = Instant::now();
    let task = logger.start_task(());
    sleep(Duration::from_millis(PAUSE_MS));
    task.complete(());
    let elapsed = begin.elapsed().as_millis() as u64;

    let records = logger.inner().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].message, "Done");
    assert!(duration_of(&records[0].fields).abs_diff(elapsed) <= TOLERANCE_MS);
    assert!(records[0].fields["durationString"].is_string());
    assert_eq!(records[0].fields.len(), 2);
}

#[test]
fn test_start_and_complete_with_description() {
    let logger = task_logger();
    let begin = Instant::now();
    let task = logger.start_task("Testing task");
    sleep(Duration::from_millis(PAUSE_MS));
    task.complete(());
    let elapsed = begin.elapsed().as_millis() as u64;

    let records = logger.inner().records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].message, "Testing task");
    assert!(records[0].get("duration").is_none());

    assert_eq!(records[1].message, "Done testing task");
    let duration = duration_of(&records[1].fields);
    assert!(duration >= PAUSE_MS - 5, "duration {} too short", duration);
    assert!(duration.abs_diff(elapsed) <= TOLERANCE_MS);
    let duration_string = records[1].fields["durationString"].as_str().unwrap();
    assert!(!duration_string.is_empty());
}

#[test]
fn test_complete_merges_data() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.complete(fields! { "data" => "x" });

    let closing = &logger.inner().records()[1];
    assert_eq!(closing.message, "Done testing task");
    assert_eq!(closing.fields["data"], json!("x"));
    assert!(closing.fields.contains_key("duration"));
    assert!(closing.fields.contains_key("durationString"));
}

#[test]
fn test_start_data_is_not_repeated_on_completion() {
    let logger = task_logger();
    let task = logger.start_task((fields! { "data" => "start" }, "Testing task"));
    task.complete(());

    let records = logger.inner().records();
    assert_eq!(records[0].fields["data"], json!("start"));
    assert!(records[1].get("data").is_none());
}

#[test]
fn test_complete_with_different_description() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.complete("Different description");

    let records = logger.inner().records();
    assert_eq!(records[1].message, "Different description");
    assert!(records[1].fields.contains_key("duration"));
}

#[test]
fn test_complete_with_fields_and_description() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.complete((fields! { "rows" => 10 }, "Imported rows"));

    let closing = &logger.inner().records()[1];
    assert_eq!(closing.message, "Imported rows");
    assert_eq!(closing.fields["rows"], json!(10));
}

#[test]
fn test_caller_fields_win_over_computed() {
    let logger = task_logger();
    let task = logger.start_task(());
    task.complete(fields! { "durationString" => "custom" });

    let closing = &logger.inner().records()[0];
    assert_eq!(closing.fields["durationString"], json!("custom"));
    assert!(closing.fields["duration"].is_u64());
}

// ============================================================================
// Fail Tests
// ============================================================================

#[test]
fn test_fail_without_description() {
    let logger = task_logger();
    let task = logger.start_task(());
    sleep(Duration::from_millis(PAUSE_MS));
    task.fail(());

    let records = logger.inner().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Error);
    assert_eq!(records[0].message, "Error");
    assert!(duration_of(&records[0].fields) >= PAUSE_MS - 5);
    assert!(records[0].fields["durationString"].is_string());
}

#[test]
fn test_fail_with_description() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.fail(());

    let records = logger.inner().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].message, "Error testing task");
}

#[test]
fn test_fail_merges_data() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.fail(fields! { "data" => "x" });

    let closing = &logger.inner().records()[1];
    assert_eq!(closing.message, "Error testing task");
    assert_eq!(closing.fields["data"], json!("x"));
}

#[test]
fn test_fail_with_different_description() {
    let logger = task_logger();
    let task = logger.start_task("Testing task");
    task.fail("Different description");

    let closing = &logger.inner().records()[1];
    assert_eq!(closing.level, Level::Error);
    assert_eq!(closing.message, "Different description");
}

// ============================================================================
// Handle Lifecycle Tests
// ============================================================================

#[test]
fn test_repeated_completion_is_allowed() {
    let logger = task_logger();
    let task = logger.start_task(());
    task.complete(());
    sleep(Duration::from_millis(20));
    task.complete(());
    task.fail(());

    let records = logger.inner().records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].message, "Done");
    assert_eq!(records[1].message, "Done");
    assert_eq!(records[2].message, "Error");
    // all measured from the same start
    assert!(duration_of(&records[1].fields) >= duration_of(&records[0].fields));
    assert!(duration_of(&records[1].fields) >= 20);
}

#[test]
fn test_interleaved_tasks_are_independent() {
    let logger = task_logger();
    let outer = logger.start_task("Outer job");
    sleep(Duration::from_millis(30));
    let inner = logger.start_task("Inner step");
    inner.complete(());
    outer.fail(());

    let records = logger.inner().records();
    let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Outer job", "Inner step", "Done inner step", "Error outer job"]
    );
    assert!(duration_of(&records[3].fields) >= duration_of(&records[2].fields));
    assert!(duration_of(&records[3].fields) >= 30);
}

#[test]
fn test_abandoned_task_emits_nothing_more() {
    let logger = task_logger();
    {
        let _task = logger.start_task("Forgotten");
    }
    assert_eq!(logger.inner().len(), 1);
}
