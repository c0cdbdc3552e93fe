//! CLI integration tests for Wharf.
//!
//! These tests drive `wharf import` end to end against a catalog file.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[project]]
root = "github.com/x/y"

[[project.version]]
tag = "v1.2.0"
revision = "1111111"

[[project.version]]
tag = "v2.0.0"
revision = "2222222"

[[project]]
root = "github.com/a/b"

[[project.version]]
branch = "master"
revision = "deadbeef"
"#;

const IMPORTS: &str = r#"
[[package]]
name = "github.com/x/y/sub"
lock = "v2.0.0"

[[package]]
name = "github.com/x/y"
constraint = "^1.0.0"

[[package]]
name = "github.com/a/b"
lock = "deadbeef"
"#;

/// Get the wharf binary command, isolated from the user's global config.
fn wharf(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wharf").unwrap();
    cmd.env("HOME", home).env_remove("WHARF_CATALOG");
    cmd
}

/// Create a temporary directory holding the catalog and imports files.
fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("catalog.toml"), CATALOG).unwrap();
    fs::write(tmp.path().join("imports.toml"), IMPORTS).unwrap();
    tmp
}

// ============================================================================
// wharf import
// ============================================================================

#[test]
fn test_import_writes_manifest_and_lock() {
    let tmp = fixture();

    wharf(tmp.path())
        .args(["import", "imports.toml", "--catalog", "catalog.toml"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Imported 2 projects"));

    let manifest = fs::read_to_string(tmp.path().join("Wharf.toml")).unwrap();
    assert!(manifest.contains("[[constraint]]"));
    assert!(manifest.contains("name = \"github.com/a/b\""));
    assert!(manifest.contains("branch = \"master\""));
    // ^1.0.0 would have moved the lock off v2.0.0
    assert!(!manifest.contains("^1.0.0"));

    let lock = fs::read_to_string(tmp.path().join("Wharf.lock")).unwrap();
    assert!(lock.contains("manifest_hash = "));
    assert!(lock.contains("[[projects]]"));
    assert!(lock.contains("version = \"v2.0.0\""));
    assert!(lock.contains("revision = \"2222222\""));
    assert!(lock.contains("revision = \"deadbeef\""));
}

#[test]
fn test_import_into_out_dir() {
    let tmp = fixture();
    let out = tmp.path().join("out");

    wharf(tmp.path())
        .args(["import", "imports.toml", "--catalog", "catalog.toml", "--out"])
        .arg(&out)
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(out.join("Wharf.toml").exists());
    assert!(out.join("Wharf.lock").exists());
    assert!(!tmp.path().join("Wharf.toml").exists());
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = fixture();

    wharf(tmp.path())
        .args([
            "import",
            "imports.toml",
            "--catalog",
            "catalog.toml",
            "--dry-run",
        ])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Would import 2 projects"));

    assert!(!tmp.path().join("Wharf.toml").exists());
    assert!(!tmp.path().join("Wharf.lock").exists());
}

#[test]
fn test_import_json_reports_decisions() {
    let tmp = fixture();

    wharf(tmp.path())
        .args([
            "import",
            "imports.toml",
            "--catalog",
            "catalog.toml",
            "--dry-run",
            "--json",
        ])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"discarded_conflict\""))
        .stdout(predicate::str::contains("\"outcome\": \"accepted\""));
}

#[test]
fn test_import_without_default_constraints() {
    let tmp = fixture();

    wharf(tmp.path())
        .args([
            "import",
            "imports.toml",
            "--catalog",
            "catalog.toml",
            "--no-default-constraints",
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("Wharf.toml")).unwrap();
    assert!(!manifest.contains("branch = "));
}

#[test]
fn test_project_config_renames_outputs() {
    let tmp = fixture();
    fs::create_dir_all(tmp.path().join(".wharf")).unwrap();
    fs::write(
        tmp.path().join(".wharf/config.toml"),
        "[import]\nmanifest = \"deps.toml\"\nlock = \"deps.lock\"\n",
    )
    .unwrap();

    wharf(tmp.path())
        .args(["import", "imports.toml", "--catalog", "catalog.toml"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("deps.toml").exists());
    assert!(tmp.path().join("deps.lock").exists());
}

#[test]
fn test_import_unknown_project_fails() {
    let tmp = fixture();
    fs::write(
        tmp.path().join("imports.toml"),
        "[[package]]\nname = \"github.com/nobody/nothing\"\nlock = \"v1.0.0\"\n",
    )
    .unwrap();

    wharf(tmp.path())
        .args(["import", "imports.toml", "--catalog", "catalog.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to list versions"));

    assert!(!tmp.path().join("Wharf.lock").exists());
}

#[test]
fn test_import_missing_catalog_fails() {
    let tmp = fixture();

    wharf(tmp.path())
        .args(["import", "imports.toml", "--catalog", "missing.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ============================================================================
// wharf completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    wharf(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wharf"));
}
