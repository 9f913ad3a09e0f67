use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn run_interactive(store_path: &PathBuf, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_tasklist");

    let mut child = Command::new(exe)
        .env("TASKLIST_STORE_PATH", store_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn interactive_help_shows_usage() {
    let store_path = temp_path("cli-interactive-help.json");
    let output = run_interactive(&store_path, "help\nexit\n");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
}

#[test]
fn interactive_question_mark_shows_usage() {
    let store_path = temp_path("cli-interactive-question.json");
    let output = run_interactive(&store_path, "?\nexit\n");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
}

#[test]
fn interactive_invalid_command_prints_error() {
    let store_path = temp_path("cli-interactive-invalid.json");
    let output = run_interactive(&store_path, "nope\nexit\n");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn interactive_add_then_list_uses_the_session_state() {
    let store_path = temp_path("cli-interactive-add-list.json");
    let output = run_interactive(&store_path, "add \"demo task\"\nlist\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: demo task"));
    assert!(stdout.contains("demo task"));

    // The session flushes its saves on exit.
    let content = std::fs::read_to_string(&store_path).expect("store file written");
    std::fs::remove_file(&store_path).ok();
    let stored: serde_json::Value = serde_json::from_str(&content).expect("store is json");
    assert_eq!(stored[0]["text"], "demo task");
}

#[test]
fn interactive_list_done_filter_hides_open_tasks() {
    let store_path = temp_path("cli-interactive-filter.json");
    let input = "add \"demo task\"\nlist --filter done\nexit\n";
    let output = run_interactive(&store_path, input);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks to show."));
}

#[test]
fn interactive_done_moves_the_task_between_filters() {
    let store_path = temp_path("cli-interactive-done.json");
    let content = serde_json::json!([
        {
            "id": "task-1",
            "text": "demo",
            "is_done": false,
            "is_removed": false
        }
    ]);
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let input = "done task-1\nlist --filter unchecked\nlist --filter done\nexit\n";
    let output = run_interactive(&store_path, input);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Marked done: demo (task-1)"));
    assert!(stdout.contains("No tasks to show."));
}
