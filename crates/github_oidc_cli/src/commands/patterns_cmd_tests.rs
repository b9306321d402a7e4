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

fn args(format: OutputFormat) -> PatternsArgs {
    PatternsArgs {
        whitelist: None,
        claim: None,
        format,
    }
}

#[test]
fn test_render_text() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets: [main, release]\n");

    let rendered = render_patterns(&config, &args(OutputFormat::Text)).unwrap();
    assert_eq!(
        rendered,
        "repo:acme/widgets:ref:main\nrepo:acme/widgets:ref:release"
    );
}

#[test]
fn test_render_json() {
    let (_dir, config) =
        config_with_whitelist("org1:\n  repoA: [main]\norg2:\n  repoB: [dev, dev]\n");

    let rendered = render_patterns(&config, &args(OutputFormat::Json)).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        parsed,
        vec![
            "repo:org1/repoA:ref:main",
            "repo:org2/repoB:ref:dev",
            "repo:org2/repoB:ref:dev",
        ]
    );
}

#[test]
fn test_render_empty_whitelist() {
    let (_dir, config) = config_with_whitelist("{}");
    assert_eq!(render_patterns(&config, &args(OutputFormat::Text)).unwrap(), "");
}

#[test]
fn test_claim_override() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets: [production]\n");
    let args = PatternsArgs {
        claim: Some(ClaimDimension::Environment),
        ..args(OutputFormat::Text)
    };

    assert_eq!(
        render_patterns(&config, &args).unwrap(),
        "repo:acme/widgets:environment:production"
    );
}

#[test]
fn test_whitelist_path_override() {
    let (dir, config) = config_with_whitelist("acme:\n  widgets: [main]\n");
    let other = dir.path().join("other.yaml");
    fs::write(&other, "beta:\n  tools: [dev]\n").unwrap();

    let args = PatternsArgs {
        whitelist: Some(other.to_string_lossy().into_owned()),
        ..args(OutputFormat::Text)
    };
    assert_eq!(render_patterns(&config, &args).unwrap(), "repo:beta/tools:ref:dev");
}

#[test]
fn test_structure_error_propagates() {
    let (_dir, config) = config_with_whitelist("acme:\n  widgets:\n    - {name: main}\n");

    let result = render_patterns(&config, &args(OutputFormat::Text));
    assert!(matches!(
        result,
        Err(Error::Whitelist(WhitelistError::Structure { .. }))
    ));
}

#[test]
fn test_missing_whitelist_propagates() {
    let mut config = AppConfig::default();
    config.whitelist.path = "missing/AccessConfigOIDC.yaml".into();

    let result = render_patterns(&config, &args(OutputFormat::Text));
    assert!(matches!(
        result,
        Err(Error::Whitelist(WhitelistError::DocumentLoad { .. }))
    ));
}
