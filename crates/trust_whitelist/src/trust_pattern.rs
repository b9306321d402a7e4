//! Trust patterns matched against the `sub` claim of a GitHub Actions token.
//!
//! GitHub builds the subject claim as `repo:<owner>/<repo>:<dimension>:<value>`
//! where the dimension depends on what triggered the workflow. A push to a
//! branch yields `ref:refs/heads/main`, a job bound to a deployment
//! environment yields `environment:production`.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::names::{BranchName, OrganizationName, RepositoryName};

#[cfg(test)]
#[path = "trust_pattern_tests.rs"]
mod tests;

/// The claim dimension a whitelist leaf is interpreted as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimDimension {
    /// Leaf entries are git refs (branches).
    #[default]
    Ref,
    /// Leaf entries are deployment environment names.
    Environment,
}

impl ClaimDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimDimension::Ref => "ref",
            ClaimDimension::Environment => "environment",
        }
    }
}

impl fmt::Display for ClaimDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ref" => Ok(ClaimDimension::Ref),
            "environment" => Ok(ClaimDimension::Environment),
            other => Err(format!(
                "unknown claim dimension '{}' (expected 'ref' or 'environment')",
                other
            )),
        }
    }
}

/// One entry of the `ForAnyValue:StringLike` subject condition.
///
/// # Examples
///
/// ```
/// use trust_whitelist::{
///     BranchName, ClaimDimension, OrganizationName, RepositoryName, TrustPattern,
/// };
///
/// let pattern = TrustPattern::new(
///     &OrganizationName::try_new("acme")?,
///     &RepositoryName::try_new("widgets")?,
///     ClaimDimension::Ref,
///     &BranchName::try_new("main")?,
/// );
/// assert_eq!(pattern.as_str(), "repo:acme/widgets:ref:main");
/// # Ok::<(), trust_whitelist::WhitelistError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrustPattern(String);

impl TrustPattern {
    pub fn new(
        organization: &OrganizationName,
        repository: &RepositoryName,
        dimension: ClaimDimension,
        value: &BranchName,
    ) -> Self {
        Self(format!(
            "repo:{}/{}:{}:{}",
            organization, repository, dimension, value
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether `subject` satisfies this pattern under IAM `StringLike`
    /// semantics: `*` matches any run of characters (including none), `?`
    /// matches exactly one character, everything else matches literally and
    /// case-sensitively.
    pub fn matches_subject(&self, subject: &str) -> bool {
        let pattern: Vec<char> = self.0.chars().collect();
        let subject: Vec<char> = subject.chars().collect();
        string_like(&pattern, &subject)
    }
}

/// Iterative wildcard match with single-star backtracking.
fn string_like(pattern: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

impl fmt::Display for TrustPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrustPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TrustPattern {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TrustPattern> for String {
    fn from(pattern: TrustPattern) -> String {
        pattern.0
    }
}
