use dyncmd::core::{CommandDescriptor, CommandType, TaskDependType};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PARENT: &str = r#"{
  "id": 12,
  "command_type": "START_PROCESS",
  "global_params": "[{\"prop\":\"b\",\"direct\":\"IN\",\"type\":\"VARCHAR\",\"value\":\"3\"}]",
  "failure_strategy": "END",
  "warning_type": "ALL",
  "executor_id": 5,
  "worker_group": "etl",
  "tenant_code": "acme"
}"#;

fn dyncmd(workspace: &Path) -> Command {
    let mut command = Command::new(assert_cmd::cargo::cargo_bin!("dyncmd"));
    command
        .current_dir(workspace)
        .env_remove("RUST_LOG")
        .env_remove("DYNCMD_OUTPUT_PRETTY")
        .env_remove("DYNCMD_OUTPUT_DIR")
        .env_remove("DYNCMD_LOG_DIR")
        .env_remove("DYNCMD_CONSOLE_OUTPUT")
        .env("DYNCMD_PIPELINE", "1");
    command
}

fn write_parent(workspace: &Path) {
    fs::write(workspace.join("parent.json"), PARENT).unwrap();
}

fn run(command: &mut Command) -> Output {
    command.output().expect("should run dyncmd")
}

#[test]
fn test_derive_prints_command_to_stdout() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "1001",
        "--definition-version",
        "3",
        "--param",
        "a=1",
        "--param",
        "b=2",
    ]));

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let command: CommandDescriptor = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(command.command_type, CommandType::DynamicGeneration);
    assert_eq!(command.task_depend_type, TaskDependType::TaskPost);
    assert_eq!(command.workflow_definition_code, 1001);
    assert_eq!(command.workflow_definition_version, 3);
    assert_eq!(command.worker_group, "etl");
    assert_eq!(command.tenant_code, "acme");
    assert_eq!(command.executor_id, 5);
    assert_eq!(
        command.command_param_value("StartParams"),
        Some(r#"{"a":"1","b":"3"}"#)
    );
    assert!(command.is_dynamically_generated());
}

#[test]
fn test_derive_writes_out_file() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "7",
        "--definition-version",
        "1",
        "--out",
        "out/command.json",
    ]));

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(workspace.path().join("out/command.json")).unwrap();
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["command_param"].as_str().map(|s| s.contains("StartParams")), Some(true));
}

#[test]
fn test_derive_uses_configured_output_dir() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());
    fs::write(
        workspace.path().join("dyncmd.toml"),
        "[output]\npretty = false\ndir = \"commands\"\n",
    )
    .unwrap();

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "7",
        "--definition-version",
        "2",
    ]));

    assert!(output.status.success());
    let written = fs::read_to_string(workspace.path().join("commands/7-2.json")).unwrap();
    assert_eq!(written.trim_end().lines().count(), 1);
}

#[test]
fn test_derive_merges_params_file_before_flags() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());
    fs::write(
        workspace.path().join("params.json"),
        r#"{"x":"file","y":"file"}"#,
    )
    .unwrap();

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "1",
        "--definition-version",
        "1",
        "--params-file",
        "params.json",
        "--param",
        "y=flag",
    ]));

    assert!(output.status.success());
    let command: CommandDescriptor = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        command.command_param_value("StartParams"),
        Some(r#"{"x":"file","y":"flag","b":"3"}"#)
    );
}

#[test]
fn test_derive_without_definition_code_fails() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-version",
        "1",
    ]));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("definition code is required"), "stderr: {}", stderr);
}

#[test]
fn test_derive_with_malformed_global_params_fails() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("parent.json"),
        r#"{"command_type":"SCHEDULER","global_params":"{oops"}"#,
    )
    .unwrap();

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "1",
        "--definition-version",
        "1",
    ]));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Global params"), "stderr: {}", stderr);
}

#[test]
fn test_derive_rejects_bad_param_flag() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--param",
        "novalue",
    ]));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("KEY=VALUE"));
}

#[test]
fn test_version_flag_prints_crate_version() {
    use predicates::str::starts_with;

    assert_cmd::Command::cargo_bin("dyncmd")
        .expect("binary should build")
        .arg("--version")
        .assert()
        .success()
        .stdout(starts_with(format!("dyncmd {}", dyncmd::VERSION)));
}

#[test]
fn test_derive_help_lists_flags() {
    use predicates::str::contains;

    assert_cmd::Command::cargo_bin("dyncmd")
        .expect("binary should build")
        .args(["derive", "--help"])
        .assert()
        .success()
        .stdout(contains("--definition-code"))
        .stdout(contains("--params-file"));
}

#[test]
fn test_derive_with_params_names_configured_file_after_target() {
    let workspace = TempDir::new().unwrap();
    write_parent(workspace.path());
    fs::write(
        workspace.path().join("dyncmd.toml"),
        "[output]\ndir = \"commands\"\n",
    )
    .unwrap();

    let output = run(dyncmd(workspace.path()).args([
        "derive",
        "--instance",
        "parent.json",
        "--definition-code",
        "44",
        "--definition-version",
        "5",
        "--param",
        "a=1",
    ]));

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
    let written = fs::read_to_string(workspace.path().join("commands/44-5.json")).unwrap();
    let command: CommandDescriptor = serde_json::from_str(&written).unwrap();
    assert_eq!(
        command.command_param_value("StartParams"),
        Some(r#"{"a":"1","b":"3"}"#)
    );
}
