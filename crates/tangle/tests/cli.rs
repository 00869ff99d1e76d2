//! End-to-end tests of the `tangle` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn scratch_catalog(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.db"));
    fs::copy(source, dir.path().join(format!("{name}.db"))).unwrap();
    let base = dir.path().join(name);
    (dir, base)
}

fn tangle(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tangle"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tangle")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn analyzes_catalog_and_writes_html() {
    let (_dir, base) = scratch_catalog("non_maven_cat");

    let output = tangle(&[base.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains("Catalog{packages=3, sources=8, cycles=1, cycleSegments=3}")
    );
    let out = stdout(&output);
    assert!(out.contains("Found 1 circular dependencies"));
    assert!(out.contains("com.foobar.model -> com.foobar.util"));
    assert!(out.contains("com.foobar.view -> com.foobar.model"));
    assert!(base.with_extension("html").exists());
    assert!(!base.with_extension("data").exists());
}

#[test]
fn details_flag_writes_data_file() {
    let (_dir, base) = scratch_catalog("abc_cat_static");

    let output = tangle(&[base.to_str().unwrap(), "-d"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let data = fs::read_to_string(base.with_extension("data")).unwrap();
    assert!(data.contains(";Package Cycles\nC1}2}3}\n"));
}

#[test]
fn acyclic_catalog_reports_no_cycles() {
    let (_dir, base) = scratch_catalog("no_imports");

    let output = tangle(&[base.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("No circular dependencies detected."));
}

#[test]
fn missing_catalog_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("absent");

    let output = tangle(&[base.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error: unable to read catalog"));
    assert!(err.contains("absent.db"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = tangle(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn config_file_limits_search_depth() {
    let (dir, base) = scratch_catalog("abc_cat_normal");
    let config = dir.path().join("tangle.yaml");
    fs::write(&config, "max-search-depth: 2\n").unwrap();

    let output = tangle(&[base.to_str().unwrap(), "--config", config.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("cycles=0"));
    assert!(err.contains("max-search-depth"));
}

#[test]
fn invalid_config_is_rejected() {
    let (dir, base) = scratch_catalog("abc_cat_normal");
    let config = dir.path().join("tangle.yaml");
    fs::write(&config, "max-search-depth: 0\n").unwrap();

    let output = tangle(&[base.to_str().unwrap(), "-c", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("max-search-depth must be at least 1"));
}
