//! Tests for whitelist expansion.

use super::*;
use crate::names::{BranchName, OrganizationName, RepositoryName};

fn expand_yaml(content: &str) -> Vec<String> {
    let config = WhitelistConfig::from_yaml_str(content).expect("valid whitelist");
    expand(&config).into_iter().map(String::from).collect()
}

#[test]
fn test_expand_single_repository() {
    assert_eq!(
        expand_yaml(r#"{"acme": {"widgets": ["main", "release"]}}"#),
        vec!["repo:acme/widgets:ref:main", "repo:acme/widgets:ref:release"]
    );
}

#[test]
fn test_expand_empty_mapping() {
    assert!(expand_yaml("{}").is_empty());
}

#[test]
fn test_expand_preserves_duplicates() {
    assert_eq!(
        expand_yaml(r#"{"org1": {"repoA": ["main"]}, "org2": {"repoB": ["dev", "dev"]}}"#),
        vec![
            "repo:org1/repoA:ref:main",
            "repo:org2/repoB:ref:dev",
            "repo:org2/repoB:ref:dev",
        ]
    );
}

#[test]
fn test_expand_follows_document_order_not_sorted() {
    let patterns = expand_yaml(
        r#"
zeta:
  widgets: [release, main]
acme:
  tools: [dev]
  gadgets: [main]
"#,
    );
    assert_eq!(
        patterns,
        vec![
            "repo:zeta/widgets:ref:release",
            "repo:zeta/widgets:ref:main",
            "repo:acme/tools:ref:dev",
            "repo:acme/gadgets:ref:main",
        ]
    );
}

#[test]
fn test_expand_count_matches_branch_count() {
    let config = WhitelistConfig::from_yaml_str(
        r#"
a:
  one: [x, y, z]
  two: []
b:
  three: [x]
c: {}
"#,
    )
    .unwrap();
    assert_eq!(expand(&config).len(), config.branch_count());
    assert_eq!(config.branch_count(), 4);
}

#[test]
fn test_expand_counts_each_triple_occurrence() {
    let patterns = expand_yaml(
        r#"
acme:
  widgets: [main, dev, main, main]
"#,
    );
    let count = |needle: &str| patterns.iter().filter(|p| p.as_str() == needle).count();
    assert_eq!(count("repo:acme/widgets:ref:main"), 3);
    assert_eq!(count("repo:acme/widgets:ref:dev"), 1);
}

#[test]
fn test_expand_programmatic_config() {
    let mut config = WhitelistConfig::new();
    config.push_branch(
        OrganizationName::try_new("acme").unwrap(),
        RepositoryName::try_new("widgets").unwrap(),
        BranchName::try_new("refs/heads/main").unwrap(),
    );

    let patterns = expand(&config);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].as_str(), "repo:acme/widgets:ref:refs/heads/main");
}

#[test]
fn test_expand_with_environment_dimension() {
    let config =
        WhitelistConfig::from_yaml_str("acme:\n  widgets: [staging, production]\n").unwrap();
    let patterns: Vec<String> = expand_with(&config, ClaimDimension::Environment)
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(
        patterns,
        vec![
            "repo:acme/widgets:environment:staging",
            "repo:acme/widgets:environment:production",
        ]
    );
}

#[test]
fn test_expand_is_deterministic() {
    let config = WhitelistConfig::from_yaml_str("a:\n  b: [c, d]\ne:\n  f: [g]\n").unwrap();
    assert_eq!(expand(&config), expand(&config));
}
