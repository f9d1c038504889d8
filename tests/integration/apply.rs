use predicates::prelude::*;

use crate::common::TestProject;

/// compact reads from stdin and honours separators
#[test]
fn test_apply_compact_from_stdin() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "compact"])
        .write_stdin(r#"{"b": [1, 2], "a": null}"#)
        .assert()
        .success()
        .stdout("{\"b\":[1,2],\"a\":null}\n");

    project
        .command()
        .args(["apply", "compact", "--arg", r#"separators=[", ", ": "]"#])
        .write_stdin("b: [1, 2]\n")
        .assert()
        .success()
        .stdout("{\"b\": [1, 2]}\n");
}

/// dotted_dict with a prefix list
#[test]
fn test_apply_dotted_dict() {
    let project = TestProject::new().unwrap();
    project
        .write_file("flat.yaml", "Db.Port: 5432\nDb.Engine: postgres\nApp.Name: web\n")
        .unwrap();

    project
        .command()
        .args(["apply", "dotted-dict", "--input", "flat.yaml", "--arg", r#"paths=["Db"]"#])
        .assert()
        .success()
        .stdout("{\"Db\":{\"Port\":5432,\"Engine\":\"postgres\"}}\n");
}

/// dict_override with overrides read from a file and a custom selector
#[test]
fn test_apply_dict_override_with_arg_file() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "services.json",
            r#"{"api": {"Kind": "web", "Replicas": 1}, "worker": {"Kind": "batch"}}"#,
        )
        .unwrap();
    project.write_file("overrides.yml", "web:\n  Replicas: 3\n").unwrap();

    project
        .command()
        .args([
            "apply",
            "dict_override",
            "-i",
            "services.json",
            "--arg-file",
            "overrides=overrides.yml",
            "--arg",
            "selector=Kind",
        ])
        .assert()
        .success()
        .stdout("{\"api\":{\"Replicas\":3}}\n");
}

/// stack_inputs with the host-vars strategy
#[test]
fn test_apply_stack_inputs() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "inputs.json",
            r#"{"DBInstanceClass": {"Default": "db.t3.small"}, "MultiAZ": {"Default": false}}"#,
        )
        .unwrap();
    project
        .write_file("store.yml", "hostvars:\n  staging:\n    config_db_instance_class: db.r5.large\n")
        .unwrap();

    project
        .command()
        .args([
            "apply",
            "stack_inputs",
            "--input",
            "inputs.json",
            "--arg",
            "environment=staging",
            "--arg-file",
            "vars=store.yml",
            "--pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"DBInstanceClass\": \"db.r5.large\""))
        .stdout(predicate::str::contains("\"MultiAZ\": false"));
}

/// Unknown filter names get a suggestion
#[test]
fn test_apply_unknown_filter() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "dotted_dic"])
        .write_stdin("{}")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown filter 'dotted_dic'"))
        .stderr(predicate::str::contains("Did you mean: dotted_dict"));
}

/// A malformed --arg is rejected by argument parsing
#[test]
fn test_apply_rejects_malformed_arg() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "compact", "--arg", "separators"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

/// ensure_ascii escapes non-ASCII text
#[test]
fn test_apply_compact_ensure_ascii() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .args(["apply", "compact", "--arg", "ensure_ascii=true"])
        .write_stdin("{\"city\": \"Z\u{fc}rich\"}")
        .assert()
        .success()
        .stdout("{\"city\":\"Z\\u00fcrich\"}\n");

    project
        .command()
        .args(["apply", "compact"])
        .write_stdin("{\"city\": \"Z\u{fc}rich\"}")
        .assert()
        .success()
        .stdout("{\"city\":\"Z\u{fc}rich\"}\n");
}
