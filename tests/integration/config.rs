use predicates::prelude::*;

use crate::common::TestProject;

const FLAT_CONFIG: &str = r#"
[stack_inputs]
strategy = "flat"
"#;

/// Defaults are printed when no configuration file exists
#[test]
fn test_config_defaults() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration file found"));

    project
        .command()
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""selector": "Type""#))
        .stdout(predicate::str::contains(r#""strategy": "host-vars""#));
}

/// stack-filters.toml in the working directory is picked up
#[test]
fn test_project_config_switches_strategy() {
    let project = TestProject::new().unwrap();
    project.write_config(FLAT_CONFIG).unwrap();
    project
        .write_file("inputs.json", r#"{"Port": {"Default": 80}, "Name": {"Default": "web"}}"#)
        .unwrap();
    project.write_file("settings.json", r#"{"Name": "api"}"#).unwrap();

    project
        .command()
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stack-filters.toml"));

    project
        .command()
        .args(["apply", "stack_inputs", "-i", "inputs.json", "--arg-file", "config=settings.json"])
        .assert()
        .success()
        .stdout("{\"Port\":\"80\",\"Name\":\"api\"}\n");
}

/// --config wins over the project file
#[test]
fn test_explicit_config_flag() {
    let project = TestProject::new().unwrap();
    project.write_config(FLAT_CONFIG).unwrap();
    project
        .write_file("custom.toml", "[dict_override]\nselector = \"Kind\"\n")
        .unwrap();

    project
        .command()
        .args(["--config", "custom.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("selector = \"Kind\""))
        .stdout(predicate::str::contains("strategy = \"host-vars\""));
}

/// STACK_FILTERS_CONFIG points at a configuration file
#[test]
fn test_config_from_environment() {
    let project = TestProject::new().unwrap();
    let path = project.write_file("conf/filters.toml", "[compact]\nitem_separator = \", \"\n").unwrap();

    project
        .command()
        .env("STACK_FILTERS_CONFIG", &path)
        .args(["apply", "compact"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .success()
        .stdout("[1, 2, 3]\n");
}

/// The user-wide file applies when nothing closer exists
#[cfg(target_os = "linux")]
#[test]
fn test_global_config() {
    let project = TestProject::new().unwrap();
    project.write_global_config("[dotted_dict]\non_conflict = \"overwrite\"\n").unwrap();

    project
        .command()
        .args(["apply", "dotted_dict", "--arg", "paths=a"])
        .write_stdin(r#"{"a": 1, "a.b": 2}"#)
        .assert()
        .success()
        .stdout("{\"a\":{\"b\":2}}\n");
}

/// A missing explicit file is an error
#[test]
fn test_missing_explicit_config() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["--config", "nope.toml", "filters"])
        .assert()
        .success();

    project
        .command()
        .args(["--config", "nope.toml", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

/// Invalid values are rejected with a hint
#[test]
fn test_invalid_config_rejected() {
    let project = TestProject::new().unwrap();
    project.write_config("[stack_inputs]\nstrategy = \"registry\"\n").unwrap();

    project
        .command()
        .args(["config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"))
        .stderr(predicate::str::contains("Check the TOML syntax"));
}
