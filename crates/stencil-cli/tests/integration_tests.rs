//! Integration tests for stencil-cli.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stencil() -> Command {
    Command::cargo_bin("stencil").unwrap()
}

/// Build a small Android-flavoured template on disk.
fn android_template() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("template.toml"),
        r#"
[template]
id = "android-app"
version = "1.0.0"

[metadata]
name = "Android App"
description = "Minimal Android application."

[[parameters]]
name = "project_name"
default = "myapp"

[[parameters]]
name = "bundle_id"

[[derived]]
name = "bundle_path"
from = "bundle_id"
transforms = [{ replace = { find = ".", with = "/" } }]
"#,
    )
    .unwrap();

    let java_dir = dir
        .path()
        .join("{{project_name}}/src/main/java/{{bundle_path}}");
    fs::create_dir_all(&java_dir).unwrap();
    fs::write(
        java_dir.join("MainActivity.java"),
        "package {{bundle_id}};\n\npublic class MainActivity {}\n",
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "# {{project_name}}\n").unwrap();

    dir
}

#[test]
fn help_flag() {
    stencil()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffolding"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    stencil()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_command_help() {
    stencil()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--param"))
        .stdout(predicate::str::contains("--overwrite"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn new_renders_template_with_derived_parameters() {
    let template = android_template();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("proj");

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            dest.to_str().unwrap(),
            "--param",
            "bundle_id=com.example.app",
            "--yes",
        ])
        .assert()
        .success();

    let rendered = dest.join("myapp/src/main/java/com/example/app/MainActivity.java");
    assert!(rendered.exists());
    let content = fs::read_to_string(&rendered).unwrap();
    assert!(content.starts_with("package com.example.app;"));

    assert_eq!(
        fs::read_to_string(dest.join("README.md")).unwrap(),
        "# myapp\n"
    );
}

#[test]
fn new_dry_run_writes_nothing() {
    let template = android_template();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("proj");

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            dest.to_str().unwrap(),
            "--param",
            "bundle_id=com.example.app",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dest.exists());
}

#[test]
fn missing_parameter_fails_with_its_name() {
    let template = android_template();
    let out = TempDir::new().unwrap();

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            out.path().join("proj").to_str().unwrap(),
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("bundle_id"));
}

#[test]
fn destination_conflict_preserves_existing_file() {
    let template = android_template();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("proj");

    // Pre-existing file at a path the render would write.
    let existing = dest.join("README.md");
    fs::create_dir_all(&dest).unwrap();
    fs::write(&existing, "original contents\n").unwrap();

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            dest.to_str().unwrap(),
            "--param",
            "bundle_id=com.example.app",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("README.md"));

    assert_eq!(
        fs::read_to_string(&existing).unwrap(),
        "original contents\n"
    );
}

#[test]
fn overwrite_flag_replaces_existing_file() {
    let template = android_template();
    let out = TempDir::new().unwrap();
    let dest = out.path().join("proj");

    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("README.md"), "original contents\n").unwrap();

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            dest.to_str().unwrap(),
            "--param",
            "bundle_id=com.example.app",
            "--overwrite",
            "--yes",
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dest.join("README.md")).unwrap(),
        "# myapp\n"
    );
}

#[test]
fn traversal_parameter_is_rejected() {
    let template = android_template();
    let out = TempDir::new().unwrap();

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            out.path().join("proj").to_str().unwrap(),
            "--param",
            "bundle_id=../../etc",
            "--param",
            "project_name=../../etc",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2);

    // nothing escaped the destination root
    assert!(!out.path().join("../../etc").join("README.md").exists());
}

#[test]
fn unresolved_token_is_named_in_error() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("file.txt"), "hello {{ghost}}").unwrap();
    let out = TempDir::new().unwrap();

    stencil()
        .args([
            "new",
            template.path().to_str().unwrap(),
            out.path().join("proj").to_str().unwrap(),
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn unknown_template_exits_not_found() {
    let out = TempDir::new().unwrap();

    stencil()
        .args([
            "new",
            "no-such-template",
            out.path().join("proj").to_str().unwrap(),
            "--yes",
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("no-such-template"));
}

#[test]
fn quiet_new_produces_no_stdout() {
    let template = android_template();
    let out = TempDir::new().unwrap();

    stencil()
        .args([
            "-q",
            "new",
            template.path().to_str().unwrap(),
            out.path().join("proj").to_str().unwrap(),
            "--param",
            "bundle_id=com.example.app",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn inspect_table_lists_parameters_and_entries() {
    let template = android_template();

    stencil()
        .args(["inspect", template.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Android App"))
        .stdout(predicate::str::contains("bundle_id"))
        .stdout(predicate::str::contains("bundle_path"))
        .stdout(predicate::str::contains("README.md"));
}

#[test]
fn inspect_json_is_parseable() {
    let template = android_template();

    let output = stencil()
        .args(["inspect", template.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["template"]["id"], "android-app");
    assert_eq!(doc["derived"][0]["name"], "bundle_path");
    assert!(doc["entries"].as_array().unwrap().iter().any(|e| {
        e["path"] == "README.md" && e["kind"] == "file"
    }));
}

#[test]
fn shell_completions() {
    stencil()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}

#[test]
fn rerendering_into_fresh_destinations_is_deterministic() {
    let template = android_template();
    let out = TempDir::new().unwrap();
    let dest_a = out.path().join("a");
    let dest_b = out.path().join("b");

    for dest in [&dest_a, &dest_b] {
        stencil()
            .args([
                "new",
                template.path().to_str().unwrap(),
                dest.to_str().unwrap(),
                "--param",
                "bundle_id=com.example.app",
                "--yes",
            ])
            .assert()
            .success();
    }

    let rel = Path::new("myapp/src/main/java/com/example/app/MainActivity.java");
    assert_eq!(
        fs::read(dest_a.join(rel)).unwrap(),
        fs::read(dest_b.join(rel)).unwrap()
    );
}
