use promptstructure::shared::fs_atomic::{atomic_write_file, export_prompt};
use promptstructure::shared::logging::{append_event, EventLog};
use serde_json::Value;
use std::fs;

#[test]
fn atomic_write_replaces_content_and_export_adds_newline() {
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().join("nested/output.txt");

    atomic_write_file(&target, b"first").expect("write first");
    assert_eq!(fs::read_to_string(&target).expect("read first"), "first");

    export_prompt(&target, "a fox.").expect("export");
    assert_eq!(fs::read_to_string(&target).expect("read export"), "a fox.\n");
}

#[test]
fn event_log_appends_json_lines_with_fields() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("logs/events.log");

    append_event(
        &path,
        "info",
        "prompt.assembled",
        &[("chars", Value::from(6))],
    )
    .expect("append event");
    EventLog::new(Some(path.clone())).warn("presets.unavailable", &[]);
    EventLog::disabled().info("ignored", &[]);

    let raw = fs::read_to_string(&path).expect("read log");
    let lines: Vec<Value> = raw
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "prompt.assembled");
    assert_eq!(lines[0]["chars"], 6);
    assert_eq!(lines[1]["level"], "warn");
}
