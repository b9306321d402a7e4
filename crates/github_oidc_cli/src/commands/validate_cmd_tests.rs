use super::*;
use std::fs;
use tempfile::TempDir;
use trust_whitelist::WhitelistError;

fn config_with_whitelist(content: &str) -> (TempDir, AppConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("AccessConfigOIDC.yaml");
    fs::write(&path, content).expect("Failed to write whitelist");

    let mut config = AppConfig::default();
    config.whitelist.path = path;
    (temp_dir, config)
}

fn no_override() -> ValidateArgs {
    ValidateArgs { whitelist: None }
}

#[test]
fn test_validate_reports_counts() {
    let (_dir, config) = config_with_whitelist(
        r#"
acme:
  widgets: [main, release]
  gadgets: [main]
labs:
  prototype: [dev]
"#,
    );

    let summary = validate(&config, &no_override()).expect("valid");
    assert_eq!(
        summary,
        ValidationSummary {
            organizations: 2,
            repositories: 3,
            patterns: 4,
        }
    );
}

#[test]
fn test_validate_rejects_invalid_settings_first() {
    let (_dir, mut config) = config_with_whitelist("{}");
    config.stack.max_session_duration_hours = 0;

    let result = validate(&config, &no_override());
    assert!(matches!(
        result,
        Err(Error::Template(TemplateError::InvalidSetting { .. }))
    ));
}

#[test]
fn test_validate_rejects_empty_whitelist() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets: []\n");

    let result = validate(&config, &no_override());
    assert!(matches!(
        result,
        Err(Error::Template(TemplateError::EmptyWhitelist))
    ));
}

#[test]
fn test_validate_rejects_malformed_whitelist() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets: main\n");

    let result = validate(&config, &no_override());
    assert!(matches!(
        result,
        Err(Error::Whitelist(WhitelistError::Structure { .. }))
    ));
}

#[test]
fn test_execute_returns_error_on_failure() {
    let mut config = AppConfig::default();
    config.whitelist.path = "missing/AccessConfigOIDC.yaml".into();

    assert!(execute(&config, &no_override()).is_err());
}
