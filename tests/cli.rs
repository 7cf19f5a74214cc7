use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn write_module(dir: &Path, name: &str, version: &str, platforms: &[&str]) {
    write_file(
        &dir.join("unimodule.json"),
        &serde_json::json!({ "platforms": platforms }).to_string(),
    );
    write_file(
        &dir.join("package.json"),
        &serde_json::json!({ "name": name, "version": version }).to_string(),
    );
}

/// Workspace with a hoisted pkg-a and a nested duplicate of it
fn duplicated_workspace() -> (tempfile::TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();

    write_file(&root.join("package.json"), r#"{"name": "app", "version": "0.0.0"}"#);
    write_module(&root.join("node_modules/pkg-a"), "pkg-a", "1.0.0", &["ios"]);
    write_module(
        &root.join("node_modules/nested/node_modules/pkg-a"),
        "pkg-a",
        "1.0.1",
        &["ios"],
    );

    (temp, root)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("module-autolinking"));
    cmd.env_remove("AUTOLINKING_PLATFORM");
    cmd
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let s = String::from_utf8_lossy(&assert.get_output().stdout);
    serde_json::from_str(s.trim()).expect("valid json output")
}

#[test]
fn list_reports_canonical_and_duplicates() {
    let (_temp, root) = duplicated_workspace();
    let modules = root.join("node_modules");

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .assert()
        .success();
    let results = stdout_json(&assert);

    let pkg = &results["pkg-a"];
    assert_eq!(pkg["path"], path_str(&modules.join("pkg-a")));
    assert_eq!(pkg["version"], "1.0.0");
    assert_eq!(pkg["duplicates"].as_array().unwrap().len(), 1);
    assert_eq!(
        pkg["duplicates"][0]["path"],
        path_str(&modules.join("nested/node_modules/pkg-a"))
    );
    assert_eq!(pkg["duplicates"][0]["version"], "1.0.1");
}

#[test]
fn list_with_exclusion_is_empty() {
    let (_temp, root) = duplicated_workspace();

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .arg("--exclude")
        .arg("pkg-a")
        .assert()
        .success();

    assert_eq!(stdout_json(&assert), serde_json::json!({}));
}

#[test]
fn list_skips_modules_for_other_platforms() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();
    write_module(
        &root.join("node_modules/droid"),
        "droid",
        "1.0.0",
        &["android"],
    );

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .arg("--platform")
        .arg("ios")
        .assert()
        .success();
    assert_eq!(stdout_json(&assert), serde_json::json!({}));

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .arg("--platform")
        .arg("android")
        .assert()
        .success();
    assert!(stdout_json(&assert).get("droid").is_some());
}

#[test]
fn list_uses_workspace_node_modules_by_default() {
    let (_temp, root) = duplicated_workspace();
    let app = root.join("packages/app");
    write_file(&app.join("package.json"), r#"{"name": "inner"}"#);
    write_module(&app.join("node_modules/pkg-b"), "pkg-b", "2.0.0", &["ios"]);

    let assert = cli().arg("--root").arg(&app).arg("list").assert().success();
    let results = stdout_json(&assert);

    assert!(results.get("pkg-a").is_some());
    assert!(results.get("pkg-b").is_some());
}

#[test]
fn list_reads_exclusions_from_package_json() {
    let (_temp, root) = duplicated_workspace();
    write_file(
        &root.join("package.json"),
        r#"{"name": "app", "expoModules": {"ios": {"exclude": ["pkg-a"]}}}"#,
    );
    write_module(&root.join("node_modules/pkg-c"), "pkg-c", "1.0.0", &["ios"]);

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .assert()
        .success();
    let results = stdout_json(&assert);

    assert!(results.get("pkg-a").is_none());
    assert!(results.get("pkg-c").is_some());
}

#[test]
fn list_is_idempotent() {
    let (_temp, root) = duplicated_workspace();

    let run = || {
        cli()
            .arg("--root")
            .arg(&root)
            .arg("list")
            .arg("node_modules")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn list_markdown_format() {
    let (_temp, root) = duplicated_workspace();

    cli()
        .arg("--root")
        .arg(&root)
        .arg("--format")
        .arg("md")
        .arg("list")
        .arg("node_modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Modules"))
        .stdout(predicate::str::contains("duplicate 1.0.1"));
}

#[test]
fn verify_reports_duplicates() {
    let (_temp, root) = duplicated_workspace();

    cli()
        .arg("--root")
        .arg(&root)
        .arg("--no-color")
        .arg("verify")
        .arg("node_modules")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pkg-a found at multiple directories",
        ))
        .stdout(predicate::str::contains("node_modules/nested/node_modules/pkg-a"))
        .stdout(predicate::str::contains("Found 1 duplicated modules"));
}

#[test]
fn verify_without_duplicates() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();
    write_module(&root.join("node_modules/solo"), "solo", "1.0.0", &["ios"]);

    cli()
        .arg("--root")
        .arg(&root)
        .arg("--no-color")
        .arg("verify")
        .arg("node_modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicated modules not found."));
}

#[test]
fn find_resolves_ios_podspecs() {
    let (_temp, root) = duplicated_workspace();
    write_file(
        &root.join("node_modules/pkg-a/ios/PkgA.podspec"),
        "Pod::Spec.new do |s| end",
    );
    write_module(&root.join("node_modules/js-only"), "js-only", "1.0.0", &["ios"]);

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("find")
        .arg("node_modules")
        .arg("--json")
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(output.trim().lines().count(), 1);

    let descriptors = stdout_json(&assert);
    let descriptors = descriptors.as_array().unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0]["name"], "pkg-a");
    assert_eq!(descriptors[0]["podName"], "PkgA");
    assert_eq!(
        descriptors[0]["path"],
        path_str(&root.join("node_modules/pkg-a/ios"))
    );
}

#[test]
fn find_resolves_android_projects() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let module = root.join("node_modules/@scope/native");
    write_module(&module, "@scope/native", "1.0.0", &["android"]);
    write_file(&module.join("android/build.gradle"), "");

    let assert = cli()
        .arg("--root")
        .arg(&root)
        .arg("find")
        .arg("node_modules")
        .arg("-p")
        .arg("android")
        .assert()
        .success();

    let descriptors = stdout_json(&assert);
    assert_eq!(descriptors[0]["projectName"], "scope-native");
    assert_eq!(
        descriptors[0]["sourceDir"],
        path_str(&module.join("android"))
    );
}

#[test]
fn broken_manifest_fails() {
    let temp = tempdir().unwrap();
    let root = temp.path().canonicalize().unwrap();
    write_file(&root.join("node_modules/broken/unimodule.json"), "{ nope");
    write_file(
        &root.join("node_modules/broken/package.json"),
        r#"{"name": "broken", "version": "1.0.0"}"#,
    );

    cli()
        .arg("--root")
        .arg(&root)
        .arg("list")
        .arg("node_modules")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse module manifest"));
}

#[test]
fn unknown_platform_fails() {
    let temp = tempdir().unwrap();

    cli()
        .arg("--root")
        .arg(temp.path())
        .arg("list")
        .arg("--platform")
        .arg("web")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Platform not supported: web"));
}
