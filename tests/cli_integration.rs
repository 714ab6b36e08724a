use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn task_cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("task-cli"));
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TASK_CLI_FILE");
    cmd.env_remove("TASK_CLI_LOG");
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = task_cli(dir)
        .arg("--format")
        .arg("json")
        .args(args)
        .output()
        .expect("task-cli executes");
    assert!(
        output.status.success(),
        "task-cli {:?} failed:\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json stdout")
}

fn listed_ids(dir: &Path, args: &[&str]) -> Vec<u64> {
    let mut full = vec!["list"];
    full.extend_from_slice(args);
    run_json(dir, &full)
        .as_array()
        .expect("list returns an array")
        .iter()
        .map(|t| t["id"].as_u64().expect("numeric id"))
        .collect()
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let dir = tempdir().unwrap();
    task_cli(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mark-in-progress"))
        .stdout(predicate::str::contains("Add a new task"));
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn unknown_command_fails_with_usage() {
    let dir = tempdir().unwrap();
    task_cli(dir.path())
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_without_description_fails() {
    let dir = tempdir().unwrap();
    task_cli(dir.path()).arg("add").assert().code(1);
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn add_prints_confirmation_and_writes_default_file() {
    let dir = tempdir().unwrap();
    task_cli(dir.path())
        .args(["add", "Buy", "groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"))
        .stdout(predicate::str::contains("[ ] ID: 1 | Buy groceries"));

    let text = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["nextId"], 2);
    assert_eq!(doc["tasks"][0]["description"], "Buy groceries");
    assert_eq!(doc["tasks"][0]["status"], "todo");
    assert!(doc["tasks"][0]["createdAt"].is_string());
    assert!(doc["tasks"][0]["updatedAt"].is_string());
}

#[test]
fn end_to_end_walkthrough() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let first = run_json(root, &["add", "write spec"]);
    assert_eq!(first["id"], 1);
    assert_eq!(first["status"], "todo");

    let started = run_json(root, &["mark-in-progress", "1"]);
    assert_eq!(started["status"], "in-progress");

    let second = run_json(root, &["add", "review spec"]);
    assert_eq!(second["id"], 2);
    assert_eq!(second["status"], "todo");

    assert_eq!(listed_ids(root, &["todo"]), vec![2]);

    run_json(root, &["delete", "1"]);
    assert_eq!(listed_ids(root, &[]), vec![2]);

    let third = run_json(root, &["add", "ship"]);
    assert_eq!(third["id"], 3);
}

#[test]
fn mark_done_moves_task_into_done_filter() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    run_json(root, &["add", "one"]);
    run_json(root, &["add", "two"]);

    run_json(root, &["mark-done", "2"]);
    assert_eq!(listed_ids(root, &["done"]), vec![2]);
    assert_eq!(listed_ids(root, &["todo"]), vec![1]);

    run_json(root, &["mark-todo", "2"]);
    assert_eq!(listed_ids(root, &["todo"]), vec![1, 2]);
}

#[test]
fn update_unknown_id_fails_and_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    run_json(root, &["add", "stable"]);
    let before = fs::read(root.join("tasks.json")).unwrap();

    task_cli(root)
        .args(["update", "99", "changed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("task 99 not found"));

    task_cli(root)
        .args(["update", "abc", "changed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("task abc not found"));

    assert_eq!(fs::read(root.join("tasks.json")).unwrap(), before);
}

#[test]
fn delete_twice_reports_not_found() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    run_json(root, &["add", "doomed"]);

    task_cli(root)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 deleted successfully"));
    task_cli(root).args(["delete", "1"]).assert().code(1);
}

#[test]
fn list_rejects_unknown_status_before_reading_tasks() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("tasks.json"), "not json at all").unwrap();

    task_cli(root)
        .args(["list", "blocked"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid status 'blocked'"));
    assert_eq!(
        fs::read_to_string(root.join("tasks.json")).unwrap(),
        "not json at all"
    );
}

fn json_error(dir: &Path, args: &[&str]) -> Value {
    let output = task_cli(dir).args(args).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    serde_json::from_slice(&output.stderr).expect("json error on stderr")
}

#[test]
fn usage_errors_are_json_when_json_is_selected() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let err = json_error(root, &["--json", "list", "blocked"]);
    assert_eq!(err["error"], "invalid_arguments");
    assert!(err["message"].as_str().unwrap().contains("blocked"));

    let err = json_error(root, &["--json", "frobnicate"]);
    assert_eq!(err["error"], "invalid_arguments");
    assert!(err["message"].as_str().unwrap().contains("frobnicate"));

    let err = json_error(root, &["--format", "json", "delete"]);
    assert_eq!(err["error"], "invalid_arguments");

    assert!(!root.join("tasks.json").exists());
}

#[test]
fn extra_trailing_words_are_ignored() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    run_json(root, &["add", "one"]);
    run_json(root, &["add", "two"]);
    run_json(root, &["add", "three"]);

    let done = run_json(root, &["mark-done", "1", "extra"]);
    assert_eq!(done["status"], "done");

    // Only a single word after `list` is treated as a filter.
    assert_eq!(listed_ids(root, &["todo", "extra"]), vec![1, 2, 3]);
    assert_eq!(listed_ids(root, &["todo"]), vec![2, 3]);

    task_cli(root)
        .args(["delete", "2", "extra", "--words"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 2 deleted successfully"));
    assert_eq!(listed_ids(root, &[]), vec![1, 3]);

    let shown = run_json(root, &["show", "3", "ignored"]);
    assert_eq!(shown["description"], "three");
}

#[test]
fn ids_are_read_from_leading_digits() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    run_json(root, &["add", "draft"]);

    let updated = run_json(root, &["update", "1abc", "final"]);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["description"], "final");

    task_cli(root)
        .args(["show", "x1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("task x1 not found"));
}

#[test]
fn descriptions_keep_surrounding_whitespace() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let added = run_json(root, &["add", "  padded  "]);
    assert_eq!(added["description"], "  padded  ");

    task_cli(root).args(["add", "   "]).assert().code(1);
    assert_eq!(listed_ids(root, &[]), vec![1]);
}

#[test]
fn pretty_list_shows_rows_and_total() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    task_cli(root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    run_json(root, &["add", "first"]);
    run_json(root, &["add", "second"]);
    run_json(root, &["mark-done", "2"]);

    task_cli(root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] ID: 1 | first"))
        .stdout(predicate::str::contains("[✓] ID: 2 | second"))
        .stdout(predicate::str::contains("Status : done | updatedAt: "))
        .stdout(predicate::str::contains("Total tasks: 2"));
}

#[test]
fn corrupt_file_is_reported_and_preserved() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("tasks.json"), "{\"tasks\": [").unwrap();

    let output = task_cli(root)
        .args(["--format", "json", "add", "new task"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: Value = serde_json::from_slice(&output.stderr).expect("json error on stderr");
    assert_eq!(err["error"], "corrupt_store");

    assert_eq!(
        fs::read_to_string(root.join("tasks.json")).unwrap(),
        "{\"tasks\": ["
    );
}

#[test]
fn file_flag_and_env_select_the_backing_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    task_cli(root)
        .args(["--file", "nested/custom.json", "add", "via flag"])
        .assert()
        .success();
    assert!(root.join("nested").join("custom.json").exists());

    task_cli(root)
        .env("TASK_CLI_FILE", root.join("env.json"))
        .args(["add", "via env"])
        .assert()
        .success();
    assert!(root.join("env.json").exists());
    assert!(!root.join("tasks.json").exists());
}
