//! CloudFormation template synthesis for the GitHub Actions OIDC trust.
//!
//! Given [`StackSettings`] and the trust patterns expanded from a whitelist,
//! [`synthesize`] declares:
//!
//! - the GitHub OIDC identity provider
//! - a role assumable with `sts:AssumeRoleWithWebIdentity` by tokens whose
//!   subject matches one of the patterns and whose audience is the client id
//! - a policy letting that role assume the CDK bootstrap roles
//! - an output with the role name

pub mod errors;
pub mod policy;
pub mod settings;
pub mod template;

pub use errors::{TemplateError, TemplateResult};
pub use policy::{ConditionValue, Effect, PolicyDocument, Principal, Statement};
pub use settings::StackSettings;
pub use template::{synthesize, Output, Resource, Template};
