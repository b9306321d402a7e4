//! CloudFormation template for the GitHub OIDC stack.
//!
//! The template declares the OIDC provider, the role GitHub Actions assumes,
//! the inline policy letting that role assume the CDK bootstrap roles, and an
//! output carrying the role name. Deploying it is left to CloudFormation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use trust_whitelist::TrustPattern;

use crate::policy::{assume_deployment_roles_statement, web_identity_trust_policy, PolicyDocument};
use crate::settings::StackSettings;
use crate::{TemplateError, TemplateResult};

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

pub const PROVIDER_RESOURCE_ID: &str = "GitHubOIDC";
pub const ROLE_RESOURCE_ID: &str = "GitHubActionsRole";
pub const ROLE_POLICY_RESOURCE_ID: &str = "GitHubActionsRoleDefaultPolicy";
pub const ROLE_NAME_OUTPUT_ID: &str = "GithubActionsRoleName";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub description: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    pub resources: BTreeMap<String, Resource>,
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn to_json_pretty(&self) -> TemplateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the stack template trusting `patterns`.
///
/// # Errors
///
/// - `TemplateError::InvalidSetting` if `settings` fail validation
/// - `TemplateError::EmptyWhitelist` if `patterns` is empty
pub fn synthesize(settings: &StackSettings, patterns: &[TrustPattern]) -> TemplateResult<Template> {
    settings.validate()?;
    if patterns.is_empty() {
        return Err(TemplateError::EmptyWhitelist);
    }

    let provider_host = settings.provider_host()?;
    debug!(
        message = "Synthesizing stack template",
        stack = %settings.stack_name,
        provider = %provider_host,
        patterns = patterns.len()
    );

    let trust_policy = web_identity_trust_policy(
        json!({ "Ref": PROVIDER_RESOURCE_ID }),
        &provider_host,
        &settings.client_id,
        patterns,
    );

    let deployment_roles = PolicyDocument::new(vec![assume_deployment_roles_statement(
        deployment_role_arn(settings),
        &settings.bootstrap_role_tags,
    )]);

    let mut resources = BTreeMap::new();
    resources.insert(
        PROVIDER_RESOURCE_ID.to_string(),
        Resource {
            resource_type: "AWS::IAM::OIDCProvider".to_string(),
            properties: json!({
                "Url": settings.provider_url,
                "ClientIdList": [settings.client_id],
                "ThumbprintList": settings.thumbprints,
            }),
        },
    );
    resources.insert(
        ROLE_RESOURCE_ID.to_string(),
        Resource {
            resource_type: "AWS::IAM::Role".to_string(),
            properties: json!({
                "RoleName": settings.role_name,
                "MaxSessionDuration": settings.max_session_duration_seconds(),
                "AssumeRolePolicyDocument": serde_json::to_value(&trust_policy)?,
            }),
        },
    );
    resources.insert(
        ROLE_POLICY_RESOURCE_ID.to_string(),
        Resource {
            resource_type: "AWS::IAM::Policy".to_string(),
            properties: json!({
                "PolicyName": ROLE_POLICY_RESOURCE_ID,
                "PolicyDocument": serde_json::to_value(&deployment_roles)?,
                "Roles": [{ "Ref": ROLE_RESOURCE_ID }],
            }),
        },
    );

    let mut outputs = BTreeMap::new();
    outputs.insert(
        ROLE_NAME_OUTPUT_ID.to_string(),
        Output {
            description: "The role name for GH Actions to assume".to_string(),
            value: json!({ "Ref": ROLE_RESOURCE_ID }),
        },
    );

    let mut metadata = BTreeMap::new();
    if settings.account.is_some() || settings.region.is_some() {
        metadata.insert(
            "Environment".to_string(),
            json!({ "Account": settings.account, "Region": settings.region }),
        );
    }

    info!(
        message = "Synthesized stack template",
        stack = %settings.stack_name,
        resources = resources.len()
    );

    Ok(Template {
        format_version: TEMPLATE_FORMAT_VERSION.to_string(),
        description: format!(
            "{}: GitHub Actions OIDC provider and deployment role",
            settings.stack_name
        ),
        metadata,
        resources,
        outputs,
    })
}

/// ARN of the roles the GitHub Actions role may assume. Without a known
/// account the ARN is resolved by CloudFormation at deploy time.
pub fn deployment_role_arn(settings: &StackSettings) -> Value {
    match &settings.account {
        Some(account) => json!(format!(
            "arn:aws:iam::{}:role/{}",
            account, settings.deployment_role_pattern
        )),
        None => json!({
            "Fn::Sub": format!(
                "arn:aws:iam::${{AWS::AccountId}}:role/{}",
                settings.deployment_role_pattern
            )
        }),
    }
}
