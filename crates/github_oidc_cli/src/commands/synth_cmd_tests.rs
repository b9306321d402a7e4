use super::*;
use serde_json::Value;
use stack_template::TemplateError;
use tempfile::TempDir;

fn config_with_whitelist(content: &str) -> (TempDir, AppConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("AccessConfigOIDC.yaml");
    fs::write(&path, content).expect("Failed to write whitelist");

    let mut config = AppConfig::default();
    config.whitelist.path = path;
    (temp_dir, config)
}

#[test]
fn test_build_template_includes_whitelist() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets: [main]\n");

    let template = build_template(&config, None).expect("template builds");
    let json = serde_json::to_value(&template).unwrap();

    assert_eq!(
        json["Resources"]["GitHubActionsRole"]["Properties"]["AssumeRolePolicyDocument"]
            ["Statement"][0]["Condition"]["ForAnyValue:StringLike"]
            ["token.actions.githubusercontent.com:sub"],
        serde_json::json!(["repo:acme/widgets:ref:main"])
    );
}

#[test]
fn test_build_template_uses_stack_settings() {
    let (_dir, mut config) = config_with_whitelist("acme:\n  widgets: [main]\n");
    config.stack.role_name = "ci_deployer".to_string();
    config.stack.account = Some("123456789012".to_string());

    let json = serde_json::to_value(build_template(&config, None).unwrap()).unwrap();
    assert_eq!(
        json["Resources"]["GitHubActionsRole"]["Properties"]["RoleName"],
        "ci_deployer"
    );
    assert_eq!(
        json["Resources"]["GitHubActionsRoleDefaultPolicy"]["Properties"]["PolicyDocument"]
            ["Statement"][0]["Resource"],
        "arn:aws:iam::123456789012:role/cdk-*"
    );
}

#[test]
fn test_build_template_rejects_empty_whitelist() {
    let (_dir, config) = config_with_whitelist("{}");

    let result = build_template(&config, None);
    assert!(matches!(
        result,
        Err(Error::Template(TemplateError::EmptyWhitelist))
    ));
}

#[test]
fn test_execute_writes_output_file() {
    let (dir, config) = config_with_whitelist("acme:\n  widgets: [main]\n");
    let output = dir.path().join("cdk.out").join("GithubOidcStack.template.json");

    let args = SynthArgs {
        whitelist: None,
        output: Some(output.clone()),
    };
    execute(&config, &args).expect("synth succeeds");

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["AWSTemplateFormatVersion"], "2010-09-09");
    assert!(written["Outputs"]["GithubActionsRoleName"].is_object());
}
