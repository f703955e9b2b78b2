//! CLI integration tests
//!
//! Drive the built `relmap` binary and check what it prints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn relmap(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_relmap"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_types_lists_standard_keys() {
    let output = relmap(&["types"]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let listing = stdout(&output);
    for key in ["binary", "characters", "string", "timestamp", "uuid-char", "Vec<u8>"] {
        assert!(
            listing.lines().any(|line| line.starts_with(key)),
            "missing key {key}"
        );
    }
    assert!(listing.contains("VARBINARY(-3)"));
}

#[test]
fn test_resolve_binary_lob() {
    let output = relmap(&["resolve", "Vec<u8>", "--lob"]);
    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.contains("domain: Vec<u8>"));
    assert!(printed.contains("sql: BLOB(2004)"));
}

#[test]
fn test_resolve_character_array_nclob() {
    let output = relmap(&[
        "resolve",
        "CharacterArray",
        "--key",
        "wrapper-characters",
        "--lob",
        "--nationalized",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("sql: NCLOB(2011)"));
}

#[test]
fn test_resolve_temporal_precision() {
    let output = relmap(&["resolve", "chrono::NaiveDateTime", "--precision", "date"]);
    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.contains("type: date"));
    assert!(printed.contains("sql: DATE(91)"));
}

#[test]
fn test_resolve_rejects_bad_precision() {
    let output = relmap(&["resolve", "chrono::DateTime<Utc>", "--precision", "minute"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("minute"));
}

#[test]
fn test_resolve_unknown_domain_fails() {
    let output = relmap(&["resolve", "rust_decimal::Decimal"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown domain type"));
}

#[test]
fn test_settings_file_alias_is_listed_and_resolvable() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("relmap.toml");
    fs::write(
        &settings,
        r#"
[logging]
profile = "test"

[[aliases]]
key = "national_text"
domain = "String"
sql_type = "NVARCHAR"
"#,
    )
    .unwrap();
    let settings = settings.to_str().unwrap();

    let listing = relmap(&["types", "--settings", settings]);
    assert!(listing.status.success());
    assert!(stdout(&listing)
        .lines()
        .any(|line| line.starts_with("national_text") && line.contains("NVARCHAR")));

    let resolved = relmap(&[
        "resolve",
        "String",
        "--key",
        "national_text",
        "--settings",
        settings,
    ]);
    assert!(resolved.status.success());
    assert!(stdout(&resolved).contains("sql: NVARCHAR(-9)"));
}

#[test]
fn test_missing_settings_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");
    let output = relmap(&["types", "--settings", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}
