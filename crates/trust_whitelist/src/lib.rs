//! Whitelist of GitHub repositories and branches trusted to assume the
//! GitHub Actions deployment role.
//!
//! The whitelist is a YAML document of the shape
//! `{organization: {repository: [branch, ...]}}`. [`expand`] turns it into
//! the subject patterns that go under the `ForAnyValue:StringLike` condition
//! of the role's trust policy:
//!
//! ```
//! use trust_whitelist::{expand, WhitelistConfig};
//!
//! let config = WhitelistConfig::from_yaml_str("acme:\n  widgets: [main]\n")?;
//! assert_eq!(expand(&config)[0].as_str(), "repo:acme/widgets:ref:main");
//! # Ok::<(), trust_whitelist::WhitelistError>(())
//! ```

pub mod errors;
pub mod expander;
pub mod names;
pub mod trust_pattern;
pub mod whitelist;

pub use errors::{WhitelistError, WhitelistResult};
pub use expander::{expand, expand_with};
pub use names::{BranchName, OrganizationName, RepositoryName};
pub use trust_pattern::{ClaimDimension, TrustPattern};
pub use whitelist::{RepoMap, WhitelistConfig, DEFAULT_WHITELIST_PATH};
