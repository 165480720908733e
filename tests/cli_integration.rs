//! CLI integration tests
//!
//! These tests run the compiled binary against temporary repositories and
//! check the key=value output, the diagnostics on stderr, and exit codes.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the pipeline-context binary
fn pipeline_context_bin() -> PathBuf {
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join(format!("pipeline-context{}", env::consts::EXE_SUFFIX))
}

/// Command running in `dir` with the CI variables cleared
fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(pipeline_context_bin());
    cmd.current_dir(dir)
        .env_remove("GITHUB_OUTPUT")
        .env_remove("SKAFFOLD_FILE")
        .env_remove("RUST_LOG")
        .env_remove("PIPELINE_CONTEXT_LOG_LEVEL")
        .env_remove("PIPELINE_CONTEXT_LOG_JSON");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute pipeline-context")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("No parent")).expect("Failed to create directory");
    fs::write(path, content).expect("Failed to write fixture");
}

/// Go service, a Gradle service built with buildpacks, and a chart
fn create_mixed_repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = temp.path();

    write(
        root,
        "skaffold.yaml",
        r#"apiVersion: skaffold/v4beta11
kind: Config
build:
  artifacts:
    - image: app-go
      context: go-svc
    - image: ghcr.io/acme/app-pack
      context: pack-svc
"#,
    );
    write(root, "go-svc/go.mod", "module example.com/svc\n\ngo 1.21\n");
    write(root, "go-svc/Dockerfile", "FROM golang:1.21\n");
    write(
        root,
        "pack-svc/build.gradle.kts",
        "java {\n    toolchain {\n        languageVersion.set(JavaLanguageVersion.of(17))\n    }\n}\n",
    );
    write(root, "chart/Chart.yaml", "apiVersion: v2\nname: app\nversion: 0.1.0\n");

    temp
}

fn lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}

fn value<'a>(lines: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("{}=", key);
    lines.iter().find_map(|line| line.strip_prefix(prefix.as_str()))
}

#[test]
fn test_cli_help() {
    let output = run(Command::new(pipeline_context_bin()).arg("--help"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pipeline-context"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("validate-context"));
}

#[test]
fn test_detect_mixed_repository() {
    let repo = create_mixed_repo();
    let output = run(&mut command(repo.path()));

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines = lines(&output);
    assert_eq!(value(&lines, "languages"), Some("go,helm,java"));
    assert_eq!(value(&lines, "go-version"), Some("1.21"));
    assert_eq!(value(&lines, "java-version"), Some("17"));
    assert_eq!(value(&lines, "helm-version"), Some(""));

    let matrix: serde_json::Value =
        serde_json::from_str(value(&lines, "matrix").expect("matrix line")).unwrap();
    let names: Vec<&str> = matrix
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["app-go", "ghcr.io/acme/app-pack", "helm-chart"]);

    let ctx: serde_json::Value =
        serde_json::from_str(value(&lines, "pipeline-context").expect("context line")).unwrap();
    assert_eq!(ctx["chart_paths"], serde_json::json!(["chart"]));

    let plan = ctx["integration_matrix"].as_array().unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan[0]["build_method"], "docker");
    assert_eq!(plan[0]["dockerfile"], "Dockerfile");
    assert_eq!(plan[1]["build_method"], "pack");
    assert_eq!(plan[1]["output_key"], "image_pack");
    assert_eq!(plan[1]["builder"], "paketobuildpacks/builder-jammy-base");
    let env = plan[1]["build_env"].as_str().unwrap();
    assert!(env.contains("BP_JVM_VERSION=17"));
    assert!(env.contains("BP_GRADLE_BUILD_FILE=build.gradle.kts"));
    assert_eq!(plan[2]["type"], "chart");
}

#[test]
fn test_diagnostics_go_to_stderr() {
    let repo = create_mixed_repo();
    write(
        repo.path(),
        "skaffold.yaml",
        "build:\n  artifacts:\n    - image: app-go\n      context: go-svc\n    - image: app-docs\n      context: docs\n",
    );

    let output = run(&mut command(repo.path()));
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Detected go (1.21) for app-go in go-svc"));
    assert!(stderr.contains("Could not detect language for app-docs in docs"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Detected"));
}

#[test]
fn test_malformed_manifest_warns_once() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "skaffold.yaml",
        "build:\n  artifacts:\n    - image: web\n      context: web\n",
    );
    write(temp.path(), "web/package.json", "{ not json");

    let output = run(&mut command(temp.path()));
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Failed to parse package.json").count(), 1, "stderr: {}", stderr);
    assert_eq!(stderr.matches("Detected node () for web in web").count(), 1);

    let lines = lines(&output);
    assert_eq!(value(&lines, "languages"), Some("node"));
    let ctx: serde_json::Value =
        serde_json::from_str(value(&lines, "pipeline-context").expect("context line")).unwrap();
    assert_eq!(ctx["integration_matrix"][0]["build_method"], "pack");
    assert_eq!(ctx["integration_matrix"][0]["build_env"], "");
}

#[test]
fn test_missing_config_emits_empty_context() {
    let temp = TempDir::new().unwrap();
    let output = run(&mut command(temp.path()));

    assert!(output.status.success());
    assert_eq!(
        lines(&output),
        vec![
            "matrix=[]".to_string(),
            "languages=".to_string(),
            r#"pipeline-context={"matrix":[],"languages":[],"versions":{},"chart_paths":[],"integration_matrix":[]}"#.to_string(),
        ]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("skaffold.yaml not found"));
}

#[test]
fn test_malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "skaffold.yaml", "build:\n  artifacts: [\n");

    let output = run(&mut command(temp.path()));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error parsing"));
}

#[test]
#[serial]
fn test_github_output_and_skaffold_file_env() {
    let repo = create_mixed_repo();
    let nested = repo.path().join("deploy");
    fs::create_dir(&nested).unwrap();
    fs::rename(repo.path().join("skaffold.yaml"), nested.join("skaffold.yaml")).unwrap();
    fs::rename(repo.path().join("go-svc"), nested.join("go-svc")).unwrap();
    let out = repo.path().join("github_output");
    fs::write(&out, "earlier=1\n").unwrap();

    let output = run(command(repo.path())
        .env("SKAFFOLD_FILE", "deploy/skaffold.yaml")
        .env("GITHUB_OUTPUT", &out));

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&out).unwrap();
    let written: Vec<String> = content.lines().map(String::from).collect();
    assert_eq!(written[0], "earlier=1");
    // contexts resolve against the configuration's directory
    assert_eq!(value(&written, "languages"), Some("go"));
    assert_eq!(value(&written, "go-version"), Some("1.21"));
}

#[test]
fn test_output_flag_wins_over_env() {
    let repo = create_mixed_repo();
    let from_env = repo.path().join("env_output");
    let from_flag = repo.path().join("flag_output");

    let output = run(command(repo.path())
        .env("GITHUB_OUTPUT", &from_env)
        .args(["detect", "--output"])
        .arg(&from_flag));

    assert!(output.status.success());
    assert!(!from_env.exists());
    assert!(fs::read_to_string(from_flag).unwrap().contains("languages=go,helm,java"));
}

#[test]
fn test_validate_context_from_detect_output() {
    let repo = create_mixed_repo();
    let detect = lines(&run(&mut command(repo.path())));
    let ctx = value(&detect, "pipeline-context").expect("context line").to_string();

    let output = run(command(repo.path())
        .args(["validate-context", "--index", "1", "--pipeline-context"])
        .arg(&ctx));

    assert!(output.status.success());
    let lines = lines(&output);
    assert_eq!(value(&lines, "language"), Some("java"));
    assert_eq!(value(&lines, "version"), Some("17"));
    assert_eq!(value(&lines, "ctx-context"), Some("pack-svc"));

    let entry: serde_json::Value =
        serde_json::from_str(value(&lines, "context").expect("context line")).unwrap();
    assert_eq!(entry["name"], "ghcr.io/acme/app-pack");
}

#[test]
fn test_validate_context_without_build_context_fails() {
    let temp = TempDir::new().unwrap();
    let output = run(command(temp.path()).args([
        "validate-context",
        "--pipeline-context",
        r#"{"matrix":[{"name":"helm-chart","context":"chart","language":"helm","version":""}]}"#,
    ]));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_artifact_contract() {
    let temp = TempDir::new().unwrap();
    let output = run(command(temp.path()).args([
        "artifact",
        "--json",
        r#"{"type":"chart","path":"chart","output_key":"chart"}"#,
    ]));

    assert!(output.status.success());
    let lines = lines(&output);
    assert_eq!(value(&lines, "path"), Some("chart"));
    assert_eq!(value(&lines, "context"), Some("."));
    assert_eq!(value(&lines, "dockerfile"), Some("Dockerfile"));
    assert_eq!(lines.last().map(String::as_str), Some("step=helm"));
}

#[test]
fn test_resolve_directory() {
    let repo = create_mixed_repo();

    let output = run(command(repo.path()).args(["resolve", "go-svc"]));
    assert!(output.status.success());
    let info: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(info, serde_json::json!({"language": "go", "version": "1.21"}));

    let output = run(command(repo.path()).args(["resolve", "chart"]));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_log_level() {
    let temp = TempDir::new().unwrap();
    let output = run(command(temp.path()).args(["--log-level", "loud"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}
