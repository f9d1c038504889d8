use predicates::prelude::*;

use crate::common::TestProject;

const INVENTORY: &str = r#"
env: prod
inventory:
  hostvars:
    prod:
      config_vpc_id: vpc-0abc
      config_port: 443
stack:
  inputs:
    VpcId:
      Type: String
    InstanceType:
      Type: String
      Default: t3.micro
    Port:
      Type: Number
      Default: 80
"#;

/// Render a parameters file resolving inputs from host variables
#[test]
fn test_render_stack_parameters() {
    let project = TestProject::new().unwrap();
    project.write_file("vars.yml", INVENTORY).unwrap();
    project
        .write_file(
            "params.json.tera",
            "{\"Parameters\": {{ stack.inputs | stack_inputs(environment=env, vars=inventory) | compact }} }\n",
        )
        .unwrap();

    project
        .command()
        .args(["render", "params.json.tera", "--vars", "vars.yml"])
        .assert()
        .success()
        .stdout(
            "{\"Parameters\": {\"VpcId\":\"vpc-0abc\",\"InstanceType\":\"t3.micro\",\"Port\":443} }\n",
        );
}

/// Later variables files override earlier ones
#[test]
fn test_render_merges_vars_in_order() {
    let project = TestProject::new().unwrap();
    project.write_file("base.yml", "tags:\n  Env: dev\n  Team: platform\n").unwrap();
    project.write_file("prod.json", r#"{"tags": {"Env": "prod"}}"#).unwrap();
    project.write_file("tags.tera", "{{ tags | compact(separators=[\", \", \": \"]) }}").unwrap();

    project
        .command()
        .args(["render", "tags.tera", "--vars", "base.yml", "--vars", "prod.json"])
        .assert()
        .success()
        .stdout(r#"{"Env": "prod", "Team": "platform"}"#);
}

/// Dotted keys and overrides composed in one template
#[test]
fn test_render_dotted_dict_and_dict_override() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "vars.toml",
            r#"
[params]
"Network.Vpc.Cidr" = "10.0.0.0/16"
"Network.Vpc.Name" = "main"
"App.Name" = "web"

[resources.Logs]
Type = "AWS::S3::Bucket"

[resources.Queue]
Type = "AWS::SQS::Queue"

[overrides."AWS::S3::Bucket"]
Versioning = "Enabled"
"#,
        )
        .unwrap();
    project
        .write_file(
            "stack.tera",
            "{{ params | dotted_dict(paths=\"Network\") | compact }}\n{{ resources | dict_override(overrides=overrides) | compact }}\n",
        )
        .unwrap();

    project
        .command()
        .args(["render", "stack.tera", "--vars", "vars.toml"])
        .assert()
        .success()
        .stdout(
            "{\"Network\":{\"Vpc\":{\"Cidr\":\"10.0.0.0/16\",\"Name\":\"main\"}}}\n{\"Logs\":{\"Versioning\":\"Enabled\"}}\n",
        );
}

/// Output goes to a file when --output is given, creating parent directories
#[test]
fn test_render_to_output_file() {
    let project = TestProject::new().unwrap();
    project.write_file("vars.yml", "values: [1, 2]\n").unwrap();
    project.write_file("t.tera", "{{ values | compact }}").unwrap();

    project
        .command()
        .args(["render", "t.tera", "--vars", "vars.yml", "--output", "out/values.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(project.read_file("out/values.json").unwrap(), "[1,2]");
}

/// An unresolved input fails the render with the input named
#[test]
fn test_render_missing_input_fails() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "vars.yml",
            "inventory:\n  hostvars:\n    prod: {}\nstack:\n  inputs:\n    VpcId:\n      Type: String\n",
        )
        .unwrap();
    project
        .write_file("t.tera", r#"{{ stack.inputs | stack_inputs(environment="prod", vars=inventory) }}"#)
        .unwrap();

    project
        .command()
        .args(["render", "t.tera", "--vars", "vars.yml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing config_vpc_id variable for VpcId input",
        ))
        .stderr(predicate::str::contains("suggestion"));
}
