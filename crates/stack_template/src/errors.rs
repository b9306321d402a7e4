//! Template synthesis error types.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that prevent a stack template from being synthesized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// A stack setting is outside the range the cloud provider accepts.
    #[error("Invalid stack setting: {field} - {reason}")]
    InvalidSetting { field: String, reason: String },

    /// No trust patterns were supplied. A role whose trust policy matches no
    /// subject can never be assumed.
    #[error("The whitelist produced no trust patterns; refusing to declare an unassumable role")]
    EmptyWhitelist,

    /// The template could not be rendered as JSON.
    #[error("Failed to serialize template: {reason}")]
    Serialization { reason: String },
}

impl TemplateError {
    pub(crate) fn invalid_setting(field: &str, reason: impl Into<String>) -> Self {
        TemplateError::InvalidSetting {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(error: serde_json::Error) -> Self {
        TemplateError::Serialization {
            reason: error.to_string(),
        }
    }
}

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
