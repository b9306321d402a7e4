//! IAM policy documents for the GitHub Actions role.
//!
//! Two documents are built here: the trust policy that lets tokens from the
//! OIDC provider assume the role, and the statement that lets the role assume
//! the CDK bootstrap roles.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use trust_whitelist::TrustPattern;

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

pub const POLICY_VERSION: &str = "2012-10-17";

pub const ASSUME_ROLE_WITH_WEB_IDENTITY: &str = "sts:AssumeRoleWithWebIdentity";
pub const ASSUME_ROLE: &str = "sts:AssumeRole";

pub const STRING_LIKE_ANY_VALUE: &str = "ForAnyValue:StringLike";
pub const STRING_EQUALS: &str = "StringEquals";

pub const BOOTSTRAP_ROLE_TAG_KEY: &str = "aws:ResourceTag/aws-cdk:bootstrap-role";

/// Condition operator -> condition key -> value(s).
pub type Conditions = BTreeMap<String, BTreeMap<String, ConditionValue>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Single(String),
    Many(Vec<String>),
}

/// Only `Allow` statements are emitted; the role's permissions are additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
}

/// A principal trusted through an external identity provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    /// Provider ARN, usually a `Ref` to the provider resource.
    #[serde(rename = "Federated")]
    pub federated: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,

    pub action: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub condition: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement,
        }
    }
}

/// Trust policy for the role.
///
/// `patterns` go, in order, under `ForAnyValue:StringLike` on
/// `<provider_host>:sub`; `audience` is pinned with `StringEquals` on
/// `<provider_host>:aud`.
pub fn web_identity_trust_policy(
    provider: Value,
    provider_host: &str,
    audience: &str,
    patterns: &[TrustPattern],
) -> PolicyDocument {
    let mut condition = Conditions::new();
    condition.insert(
        STRING_LIKE_ANY_VALUE.to_string(),
        BTreeMap::from([(
            format!("{}:sub", provider_host),
            ConditionValue::Many(patterns.iter().map(|p| p.to_string()).collect()),
        )]),
    );
    condition.insert(
        STRING_EQUALS.to_string(),
        BTreeMap::from([(
            format!("{}:aud", provider_host),
            ConditionValue::Single(audience.to_string()),
        )]),
    );

    PolicyDocument::new(vec![Statement {
        effect: Effect::Allow,
        principal: Some(Principal { federated: provider }),
        action: vec![ASSUME_ROLE_WITH_WEB_IDENTITY.to_string()],
        resource: None,
        condition,
    }])
}

/// Statement allowing `sts:AssumeRole` on `resource`, restricted to roles
/// tagged with one of `bootstrap_role_tags`.
pub fn assume_deployment_roles_statement(
    resource: Value,
    bootstrap_role_tags: &[String],
) -> Statement {
    let mut condition = Conditions::new();
    condition.insert(
        STRING_EQUALS.to_string(),
        BTreeMap::from([(
            BOOTSTRAP_ROLE_TAG_KEY.to_string(),
            ConditionValue::Many(bootstrap_role_tags.to_vec()),
        )]),
    );

    Statement {
        effect: Effect::Allow,
        principal: None,
        action: vec![ASSUME_ROLE.to_string()],
        resource: Some(resource),
        condition,
    }
}
