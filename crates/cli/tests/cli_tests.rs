use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn envvars() -> Command {
    let mut cmd = Command::cargo_bin("envvars").unwrap();
    cmd.env_remove("DATABASE_URL");
    cmd
}

#[test]
fn test_cli_help() {
    envvars()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Owner-scoped environment variable store"));
}

#[test]
fn test_cli_serve_help() {
    envvars().arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_missing_database_url_fails() {
    envvars()
        .args(["apps", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set"));
}

#[test]
fn test_migrate_requires_database_url() {
    envvars()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set for migrations"));
}

#[test]
fn test_memory_store_starts_empty() {
    envvars().args(["--memory", "apps", "list"]).assert().success().stdout("[]\n");
}

#[test]
fn test_unknown_app_reports_not_found() {
    envvars()
        .args(["--memory", "get", "ghost", "DEBUG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_import_rejects_missing_file() {
    envvars()
        .args(["--memory", "import", "app-1", "/nonexistent/.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_import_rejects_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "GOOD=1").unwrap();
    writeln!(file, "this line is not an assignment").unwrap();

    envvars()
        .args(["--memory", "import", "app-1"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
