use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cmd_in(root: &std::path::Path, log: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("darkrenamer").unwrap();
    cmd.arg(root)
        .args(["--log-file", log.to_str().unwrap()])
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("darkrenamer")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("batch-rename their extensions"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("darkrenamer")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_exit_command_ends_session() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");

    cmd_in(dir.path(), &log)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dark Renamer"))
        .stdout(predicate::str::contains("(nothing staged yet)"));
}

#[test]
fn test_eof_ends_session() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");

    cmd_in(dir.path(), &log).write_stdin("").assert().success();
}

#[test]
fn test_missing_root_fails_with_exit_code() {
    Command::cargo_bin("darkrenamer")
        .unwrap()
        .arg("/nonexistent/root")
        .env("NO_COLOR", "1")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_stage_and_rename_end_to_end() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");
    std::fs::write(dir.path().join("a.png"), "x").unwrap();

    cmd_in(dir.path(), &log)
        .write_stdin("add\na.png\nrename\njpg\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged 'a.png'"))
        .stdout(predicate::str::contains("a.png -> a.jpg"))
        .stdout(predicate::str::contains("Renamed 1 file(s)"));

    // Filesystem updated
    assert!(dir.path().join("a.jpg").exists());
    assert!(!dir.path().join("a.png").exists());

    // One batch line in the log with one record
    let content = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let batch: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(batch.as_array().unwrap().len(), 1);
    assert_eq!(batch[0]["old_name"], "a.png");
    assert_eq!(batch[0]["new_name"], "a.jpg");
}

#[test]
fn test_invalid_extension_reported_and_session_continues() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");
    std::fs::write(dir.path().join("a.png"), "x").unwrap();

    cmd_in(dir.path(), &log)
        .write_stdin("add\na.png\nrename\nmp4x2\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid extension 'mp4x2'"));

    // Nothing renamed, nothing logged
    assert!(dir.path().join("a.png").exists());
    assert!(!log.exists());
}

#[test]
fn test_move_into_subdirectory_and_back() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub").join("b.txt"), "x").unwrap();

    cmd_in(dir.path(), &log)
        .write_stdin("move\nsub\nadd\nb.txt\nmove\n..\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged 'b.txt'"));
}

#[test]
fn test_add_with_path_is_rejected() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub").join("a.txt"), "x").unwrap();

    cmd_in(dir.path(), &log)
        .write_stdin("add\nsub/a.txt\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("not a plain file name"));

    assert!(dir.path().join("sub").join("a.txt").exists());
}

#[test]
fn test_move_up_at_root_is_reported() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");

    cmd_in(dir.path(), &log)
        .write_stdin("move\n..\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already at the root directory"));
}

#[test]
fn test_unknown_command_is_reported() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");

    cmd_in(dir.path(), &log)
        .write_stdin("frobnicate\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command 'frobnicate'"));
}

#[test]
fn test_log_appends_across_sessions() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.json");
    std::fs::write(dir.path().join("a.png"), "x").unwrap();

    cmd_in(dir.path(), &log)
        .write_stdin("add\na.png\nrename\njpg\nexit\n")
        .assert()
        .success();

    cmd_in(dir.path(), &log)
        .write_stdin("add\na.jpg\nrename\ngif\nexit\n")
        .assert()
        .success();

    assert!(dir.path().join("a.gif").exists());

    let content = std::fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 2);
}
