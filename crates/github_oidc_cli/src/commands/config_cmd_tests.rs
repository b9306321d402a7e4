use super::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_init_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("github-oidc.toml");

    init_config(path.to_str()).expect("init succeeds");

    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("github-oidc.toml");
    fs::write(&path, "[stack]\nrole_name = \"keep_me\"\n").unwrap();

    let result = init_config(path.to_str());
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("already exists")));
    assert!(fs::read_to_string(&path).unwrap().contains("keep_me"));
}

#[test]
fn test_execute_init_prefers_subcommand_path() {
    let temp_dir = TempDir::new().unwrap();
    let global = temp_dir.path().join("global.toml");
    let local = temp_dir.path().join("local.toml");

    let cmd = ConfigCommands::Init {
        path: Some(local.to_string_lossy().into_owned()),
    };
    execute(&cmd, global.to_str()).unwrap();

    assert!(local.exists());
    assert!(!global.exists());
}

#[test]
#[serial]
fn test_show_renders_loaded_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("github-oidc.toml");
    fs::write(&path, "[stack]\nrole_name = \"ci_deployer\"\n").unwrap();

    let rendered = show_config(path.to_str()).unwrap();
    assert!(rendered.contains("role_name = \"ci_deployer\""));
    assert!(rendered.contains("[whitelist]"));
}

#[test]
#[serial]
fn test_show_fails_for_missing_explicit_file() {
    let result = show_config(Some("missing/github-oidc.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}
