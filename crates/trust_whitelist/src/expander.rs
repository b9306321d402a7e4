//! Expansion of a whitelist into trust patterns.

use tracing::debug;

use crate::trust_pattern::{ClaimDimension, TrustPattern};
use crate::whitelist::WhitelistConfig;

#[cfg(test)]
#[path = "expander_tests.rs"]
mod tests;

/// Expand every (organization, repository, branch) triple into
/// `repo:{org}/{repo}:ref:{branch}`.
///
/// Output order follows the document; duplicate triples produce duplicate
/// patterns. The result has exactly `config.branch_count()` entries.
///
/// # Examples
///
/// ```
/// use trust_whitelist::{expand, WhitelistConfig};
///
/// let config = WhitelistConfig::from_yaml_str("acme:\n  widgets: [main, release]\n")?;
/// let patterns: Vec<String> = expand(&config).into_iter().map(String::from).collect();
/// assert_eq!(
///     patterns,
///     vec!["repo:acme/widgets:ref:main", "repo:acme/widgets:ref:release"]
/// );
/// # Ok::<(), trust_whitelist::WhitelistError>(())
/// ```
pub fn expand(config: &WhitelistConfig) -> Vec<TrustPattern> {
    expand_with(config, ClaimDimension::Ref)
}

/// Expand with the leaf entries interpreted under `dimension`.
pub fn expand_with(config: &WhitelistConfig, dimension: ClaimDimension) -> Vec<TrustPattern> {
    let mut patterns = Vec::with_capacity(config.branch_count());

    for (org, repositories) in config.organizations() {
        for (repo, branches) in repositories.iter() {
            for branch in branches {
                patterns.push(TrustPattern::new(org, repo, dimension, branch));
            }
        }
    }

    debug!(
        message = "Expanded whitelist",
        dimension = %dimension,
        patterns = patterns.len()
    );
    patterns
}
