//! Tests for trust patterns and subject matching.

use super::*;

fn pattern(org: &str, repo: &str, dimension: ClaimDimension, value: &str) -> TrustPattern {
    TrustPattern::new(
        &OrganizationName::try_new(org).unwrap(),
        &RepositoryName::try_new(repo).unwrap(),
        dimension,
        &BranchName::try_new(value).unwrap(),
    )
}

#[test]
fn test_ref_pattern_shape() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "main");
    assert_eq!(p.as_str(), "repo:acme/widgets:ref:main");
    assert_eq!(p.to_string(), "repo:acme/widgets:ref:main");
}

#[test]
fn test_environment_pattern_shape() {
    let p = pattern("acme", "widgets", ClaimDimension::Environment, "production");
    assert_eq!(p.as_str(), "repo:acme/widgets:environment:production");
}

#[test]
fn test_claim_dimension_parsing() {
    assert_eq!("ref".parse::<ClaimDimension>(), Ok(ClaimDimension::Ref));
    assert_eq!(
        "environment".parse::<ClaimDimension>(),
        Ok(ClaimDimension::Environment)
    );

    let err = "pull_request".parse::<ClaimDimension>().unwrap_err();
    assert!(err.contains("unknown claim dimension"));
}

#[test]
fn test_claim_dimension_default_is_ref() {
    assert_eq!(ClaimDimension::default(), ClaimDimension::Ref);
}

#[test]
fn test_pattern_serializes_as_plain_string() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "main");
    let yaml = serde_yaml::to_string(&vec![p]).unwrap();
    let plain: Vec<String> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(plain, vec!["repo:acme/widgets:ref:main".to_string()]);
}

#[test]
fn test_exact_subject_match() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "refs/heads/main");
    assert!(p.matches_subject("repo:acme/widgets:ref:refs/heads/main"));
    assert!(!p.matches_subject("repo:acme/widgets:ref:refs/heads/mainline"));
    assert!(!p.matches_subject("repo:Acme/widgets:ref:refs/heads/main"));
}

#[test]
fn test_star_wildcard_match() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "refs/heads/release/*");
    assert!(p.matches_subject("repo:acme/widgets:ref:refs/heads/release/1.0"));
    assert!(p.matches_subject("repo:acme/widgets:ref:refs/heads/release/"));
    assert!(!p.matches_subject("repo:acme/widgets:ref:refs/heads/main"));
}

#[test]
fn test_question_mark_matches_single_character() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "v?");
    assert!(p.matches_subject("repo:acme/widgets:ref:v1"));
    assert!(!p.matches_subject("repo:acme/widgets:ref:v"));
    assert!(!p.matches_subject("repo:acme/widgets:ref:v10"));
}

#[test]
fn test_star_backtracks_over_repeated_text() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "*-hotfix");
    assert!(p.matches_subject("repo:acme/widgets:ref:a-hotfix-b-hotfix"));
    assert!(!p.matches_subject("repo:acme/widgets:ref:a-hotfix-b"));
}

#[test]
fn test_star_in_subject_is_not_a_wildcard() {
    let p = pattern("acme", "widgets", ClaimDimension::Ref, "main");
    assert!(!p.matches_subject("repo:acme/widgets:ref:*"));
}
