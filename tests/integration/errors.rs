use predicates::prelude::*;

use crate::common::TestProject;

/// A scalar parent under a dotted key is a conflict by default
#[test]
fn test_dotted_dict_conflict() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "dotted_dict", "--arg", r#"paths=["a"]"#])
        .write_stdin(r#"{"a": 1, "a.b": 2}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dotted key 'a.b' cannot descend into 'a'"))
        .stderr(predicate::str::contains("on_conflict"));
}

/// A source entry without the selector field names the entry
#[test]
fn test_dict_override_missing_selector() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "dict_override", "--arg", "overrides={}"])
        .write_stdin(r#"{"Bucket": {"Name": "logs"}}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing field 'Type' in entry 'Bucket'"));
}

/// Filters that need a mapping reject other values
#[test]
fn test_wrong_input_kind() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "dotted_dict"])
        .write_stdin("[1, 2]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected mapping, got sequence"));
}

/// A missing required argument is reported by name
#[test]
fn test_missing_required_argument() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "stack_inputs"])
        .write_stdin(r#"{"Port": {"Default": 80}}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid argument 'environment'"));
}

/// Template syntax errors and unknown template filters fail the render
#[test]
fn test_template_errors() {
    let project = TestProject::new().unwrap();
    project.write_file("broken.tera", "{{ value | ").unwrap();
    project.write_file("unknown.tera", "{{ 1 | flatten }}").unwrap();

    project
        .command()
        .args(["render", "broken.tera"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse template"));

    project
        .command()
        .args(["render", "unknown.tera"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("flatten"));
}

/// Missing files are reported with the path
#[test]
fn test_missing_files() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["render", "missing.tera"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.tera"))
        .stderr(predicate::str::contains("Check that the file exists"));

    project
        .command()
        .args(["apply", "compact", "--input", "nowhere.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nowhere.json"));
}

/// A misspelled environment fails instead of resolving every input to its Default
#[test]
fn test_stack_inputs_unknown_environment() {
    let project = TestProject::new().unwrap();
    project
        .write_file("store.yml", "hostvars:\n  prod:\n    config_vpc_id: vpc-9\n")
        .unwrap();

    project
        .command()
        .args(["apply", "stack_inputs", "--arg", "environment=prdo", "--arg-file", "vars=store.yml"])
        .write_stdin(r#"{"VpcId": {"Default": "vpc-0"}}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing config_vpc_id variable for VpcId input"));
}
