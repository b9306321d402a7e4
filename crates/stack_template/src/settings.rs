//! Stack settings: the fixed values the provider and role are declared with.
//!
//! Every field has a default matching the standard GitHub Actions setup, so
//! a settings file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{TemplateError, TemplateResult};

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// GitHub's OIDC token issuer. One provider per URL is allowed per account.
pub const DEFAULT_PROVIDER_URL: &str = "https://token.actions.githubusercontent.com";

/// Audience GitHub puts in tokens requested for AWS.
pub const DEFAULT_CLIENT_ID: &str = "sts.amazonaws.com";

/// Thumbprint of the certificate chain served by the GitHub token endpoint.
pub const DEFAULT_THUMBPRINT: &str = "6938fd4d98bab03faadb97b34396831e3780aea1";

pub const DEFAULT_ROLE_NAME: &str = "github_actions_role";

pub const DEFAULT_STACK_NAME: &str = "GithubOidcStack";

pub const DEFAULT_MAX_SESSION_DURATION_HOURS: u8 = 1;

/// Bounds IAM places on a role's maximum session duration.
pub const MIN_SESSION_DURATION_HOURS: u8 = 1;
pub const MAX_SESSION_DURATION_HOURS: u8 = 12;

/// Name pattern of the roles created by `cdk bootstrap`.
pub const DEFAULT_DEPLOYMENT_ROLE_PATTERN: &str = "cdk-*";

/// Values of the `aws-cdk:bootstrap-role` tag the role may assume.
pub const DEFAULT_BOOTSTRAP_ROLE_TAGS: [&str; 3] = ["file-publishing", "lookup", "deploy"];

pub const ACCOUNT_ENV_VAR: &str = "CDK_DEFAULT_ACCOUNT";
pub const REGION_ENV_VAR: &str = "CDK_DEFAULT_REGION";

const MAX_THUMBPRINTS: usize = 5;
const MAX_ROLE_NAME_LENGTH: usize = 64;
const MAX_STACK_NAME_LENGTH: usize = 128;

/// Settings for the provider, the role and the deployment-role policy.
///
/// # Example TOML
///
/// ```toml
/// [stack]
/// role_name = "github_actions_role"
/// max_session_duration_hours = 2
/// account = "123456789012"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSettings {
    pub stack_name: String,
    pub provider_url: String,
    pub client_id: String,
    pub thumbprints: Vec<String>,
    pub role_name: String,
    pub max_session_duration_hours: u8,
    pub deployment_role_pattern: String,
    pub bootstrap_role_tags: Vec<String>,

    /// Target account. When unset the template refers to `AWS::AccountId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            thumbprints: vec![DEFAULT_THUMBPRINT.to_string()],
            role_name: DEFAULT_ROLE_NAME.to_string(),
            max_session_duration_hours: DEFAULT_MAX_SESSION_DURATION_HOURS,
            deployment_role_pattern: DEFAULT_DEPLOYMENT_ROLE_PATTERN.to_string(),
            bootstrap_role_tags: DEFAULT_BOOTSTRAP_ROLE_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            account: None,
            region: None,
        }
    }
}

impl StackSettings {
    /// Override account and region from `CDK_DEFAULT_ACCOUNT` and
    /// `CDK_DEFAULT_REGION` when those are set and non-empty.
    pub fn apply_environment_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Same as [`Self::apply_environment_overrides`] with an explicit lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(account) = present(ACCOUNT_ENV_VAR) {
            debug!(message = "Account taken from environment", account = %account);
            self.account = Some(account.trim().to_string());
        }
        if let Some(region) = present(REGION_ENV_VAR) {
            debug!(message = "Region taken from environment", region = %region);
            self.region = Some(region.trim().to_string());
        }
    }

    /// Provider URL without its scheme, e.g.
    /// `token.actions.githubusercontent.com/octo-enterprise`; prefixes the
    /// `sub` and `aud` condition keys. A trailing `/` is dropped.
    pub fn provider_host(&self) -> TemplateResult<String> {
        let url = Url::parse(&self.provider_url).map_err(|e| {
            TemplateError::invalid_setting(
                "provider_url",
                format!("'{}' is not a URL: {}", self.provider_url, e),
            )
        })?;

        if url.scheme() != "https" {
            return Err(TemplateError::invalid_setting(
                "provider_url",
                format!("'{}' must use https", self.provider_url),
            ));
        }

        let host = url.host_str().ok_or_else(|| {
            TemplateError::invalid_setting(
                "provider_url",
                format!("'{}' has no host", self.provider_url),
            )
        })?;

        Ok(format!("{}{}", host, url.path().trim_end_matches('/')))
    }

    /// Maximum session duration in seconds, as CloudFormation expects it.
    pub fn max_session_duration_seconds(&self) -> u32 {
        u32::from(self.max_session_duration_hours) * 3600
    }

    /// Check every setting against the limits IAM and CloudFormation enforce.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::InvalidSetting` naming the first offending field.
    pub fn validate(&self) -> TemplateResult<()> {
        validate_stack_name(&self.stack_name)?;
        self.provider_host()?;

        if self.client_id.trim().is_empty() {
            return Err(TemplateError::invalid_setting("client_id", "cannot be empty"));
        }

        if self.thumbprints.is_empty() || self.thumbprints.len() > MAX_THUMBPRINTS {
            return Err(TemplateError::invalid_setting(
                "thumbprints",
                format!(
                    "expected between 1 and {} thumbprints, found {}",
                    MAX_THUMBPRINTS,
                    self.thumbprints.len()
                ),
            ));
        }
        for thumbprint in &self.thumbprints {
            if thumbprint.len() != 40 || !thumbprint.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(TemplateError::invalid_setting(
                    "thumbprints",
                    format!("'{}' is not a 40 character hex SHA-1 fingerprint", thumbprint),
                ));
            }
        }

        validate_role_name(&self.role_name)?;

        if !(MIN_SESSION_DURATION_HOURS..=MAX_SESSION_DURATION_HOURS)
            .contains(&self.max_session_duration_hours)
        {
            return Err(TemplateError::invalid_setting(
                "max_session_duration_hours",
                format!(
                    "{} is outside the allowed range {}-{}",
                    self.max_session_duration_hours,
                    MIN_SESSION_DURATION_HOURS,
                    MAX_SESSION_DURATION_HOURS
                ),
            ));
        }

        if self.deployment_role_pattern.trim().is_empty() {
            return Err(TemplateError::invalid_setting(
                "deployment_role_pattern",
                "cannot be empty",
            ));
        }

        if self.bootstrap_role_tags.is_empty() {
            return Err(TemplateError::invalid_setting(
                "bootstrap_role_tags",
                "at least one bootstrap role tag is required",
            ));
        }

        if let Some(account) = &self.account {
            if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
                return Err(TemplateError::invalid_setting(
                    "account",
                    format!("'{}' is not a 12 digit account id", account),
                ));
            }
        }

        Ok(())
    }
}

fn validate_stack_name(name: &str) -> TemplateResult<()> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter
        || name.len() > MAX_STACK_NAME_LENGTH
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(TemplateError::invalid_setting(
            "stack_name",
            format!(
                "'{}' must start with a letter and contain only letters, digits and hyphens \
                 (max {})",
                name, MAX_STACK_NAME_LENGTH
            ),
        ));
    }
    Ok(())
}

fn validate_role_name(name: &str) -> TemplateResult<()> {
    if name.is_empty() || name.len() > MAX_ROLE_NAME_LENGTH {
        return Err(TemplateError::invalid_setting(
            "role_name",
            format!("must be 1-{} characters long", MAX_ROLE_NAME_LENGTH),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "+=,.@_-".contains(c))
    {
        return Err(TemplateError::invalid_setting(
            "role_name",
            format!("'{}' contains characters IAM does not allow", name),
        ));
    }

    Ok(())
}
