use std::path::{Path, PathBuf};
use std::process::Output;

/// Runs the binary against `db` with the given subcommand arguments.
fn run(db: &Path, args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_userinfo"))
        .args(args)
        .arg("--db")
        .arg(db)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run userinfo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn temp_db() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db = dir.path().join("foo.db");
    (dir, db)
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

#[test]
fn demo_runs_full_walkthrough() {
    let (_dir, db) = temp_db();
    let output = run(&db, &["demo"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "Inserted user with id 1",
            "Updated 1 row(s)",
            "ID: 1, Username: Yurii Potapovich, Department: HR, Created: 2010-10-10",
            "Deleted 1 row(s)",
        ]
    );

    let output = run(&db, &["status"]);
    assert!(stdout(&output).contains("Row count: 0"));
}

#[test]
fn demo_keep_leaves_row_and_accepts_dotted_date() {
    let (_dir, db) = temp_db();
    let output = run(&db, &["demo", "--keep", "--created", "10.10.2010"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains("Deleted"));

    let output = run(&db, &["list", "--format", "json"]);
    let users: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(users[0]["username"], "Yurii Potapovich");
    assert_eq!(users[0]["created"], "2010-10-10");
}

#[test]
fn demo_rejects_bad_date() {
    let (_dir, db) = temp_db();
    let output = run(&db, &["demo", "--created", "someday"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: invalid date 'someday'"));
    assert!(!db.exists(), "nothing should be opened for invalid input");
}

// ---------------------------------------------------------------------------
// single operations
// ---------------------------------------------------------------------------

#[test]
fn add_rename_remove_cycle() {
    let (_dir, db) = temp_db();

    let output = run(
        &db,
        &["add", "--username", "Maria Izotopovna", "--department", "HR", "--created", "2010-10-10"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "1");

    let output = run(&db, &["rename", "--id", "1", "--username", "Yurii Potapovich"]);
    assert_eq!(stdout(&output).trim(), "1");

    let output = run(&db, &["rename", "--id", "42", "--username", "Nobody"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "0");

    let output = run(&db, &["get", "--id", "1", "--format", "json"]);
    let users: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[0]["username"], "Yurii Potapovich");
    assert_eq!(users[0]["department"], "HR");

    let output = run(&db, &["remove", "--id", "1"]);
    assert_eq!(stdout(&output).trim(), "1");

    let output = run(&db, &["get", "--id", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No user with id 1"));
}

#[test]
fn add_without_fields_stores_nulls() {
    let (_dir, db) = temp_db();
    let output = run(&db, &["add", "--created", "2000-01-01"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run(&db, &["list"]);
    let text = stdout(&output);
    assert!(text.starts_with("ID"));
    assert!(text.contains("<null>"));
    assert!(text.contains("2000-01-01"));
}

#[test]
fn add_rejects_long_username() {
    let (_dir, db) = temp_db();
    let long = "x".repeat(65);
    let output = run(&db, &["add", "--username", &long]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Insert failed: invalid user record"));
}

#[test]
fn list_json_is_ordered() {
    let (_dir, db) = temp_db();
    for name in ["c", "a", "b"] {
        run(&db, &["add", "--username", name, "--created", "2010-10-10"]);
    }
    let output = run(&db, &["list", "--format", "json"]);
    let users: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<i64> = users.iter().map(|u| u["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// schema commands
// ---------------------------------------------------------------------------

#[test]
fn status_before_init_reports_missing_table() {
    let (_dir, db) = temp_db();
    let output = run(&db, &["status"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Table exists: no"));

    run(&db, &["init"]);
    let output = run(&db, &["status"]);
    assert!(stdout(&output).contains("Table exists: yes"));
}

#[test]
fn drop_removes_table() {
    let (_dir, db) = temp_db();
    run(&db, &["add", "--username", "a"]);
    let output = run(&db, &["drop"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run(&db, &["status"]);
    assert!(stdout(&output).contains("Table exists: no"));
}

#[test]
fn config_file_sets_table() {
    let (dir, db) = temp_db();
    let config = dir.path().join("session.yaml");
    std::fs::write(&config, "path: ignored.db\ntable: staff\n").unwrap();

    let output = run(&db, &["init", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Table 'staff' ready"));
    assert!(db.exists(), "--db should override the config path");
}

#[test]
fn missing_config_file_fails() {
    let (dir, db) = temp_db();
    let output = run(
        &db,
        &["status", "--config", dir.path().join("absent.yaml").to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("config error"));
}
