//! Validated names used in a whitelist.
//!
//! A trust pattern has the shape `repo:<org>/<repo>:<claim>:<value>`, so the
//! pieces that go into it must not contain the delimiters of that grammar.
//! Each level gets its own branded type so an organization name can never be
//! passed where a branch is expected.

use crate::{WhitelistError, WhitelistResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;

fn validate(name: &str, kind: &str, allow_slash: bool) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{} name cannot be empty", kind));
    }

    if name.contains(':') {
        return Err(format!(
            "{} name '{}' cannot contain ':' (it delimits the subject claim)",
            kind, name
        ));
    }

    if !allow_slash && name.contains('/') {
        return Err(format!(
            "{} name '{}' cannot contain '/' (it separates owner and repository)",
            kind, name
        ));
    }

    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(format!(
            "{} name '{}' cannot contain whitespace or control characters",
            kind, name
        ));
    }

    Ok(())
}

macro_rules! whitelist_name {
    ($(#[$meta:meta])* $name:ident, $kind:literal, allow_slash = $allow_slash:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name.
            ///
            /// # Errors
            ///
            /// Returns `WhitelistError::Structure` when the name is empty or
            /// contains a character that would break the pattern grammar.
            pub fn try_new(name: impl Into<String>) -> WhitelistResult<Self> {
                let name = name.into();
                let location = name.clone();
                Self::try_new_at(name, &location)
            }

            pub(crate) fn try_new_at(name: String, location: &str) -> WhitelistResult<Self> {
                validate(&name, $kind, $allow_slash)
                    .map_err(|reason| WhitelistError::structure(location, reason))?;
                Ok(Self(name))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = WhitelistError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

whitelist_name!(
    /// A GitHub organization (or user) name.
    ///
    /// # Examples
    ///
    /// ```
    /// use trust_whitelist::OrganizationName;
    ///
    /// assert!(OrganizationName::try_new("acme").is_ok());
    /// assert!(OrganizationName::try_new("acme/widgets").is_err());
    /// assert!(OrganizationName::try_new("").is_err());
    /// ```
    OrganizationName,
    "Organization",
    allow_slash = false
);

whitelist_name!(
    /// A repository name within an organization.
    RepositoryName,
    "Repository",
    allow_slash = false
);

whitelist_name!(
    /// A branch (or, for the `environment` claim, an environment) name.
    ///
    /// Branch names may contain `/` (e.g. `feature/login`) and the
    /// `StringLike` wildcards `*` and `?`, which IAM evaluates when the
    /// pattern is matched against a token.
    BranchName,
    "Branch",
    allow_slash = true
);
