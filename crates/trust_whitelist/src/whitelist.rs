//! The whitelist document model and its YAML loader.
//!
//! The document is a three-level nesting of organization name to repository
//! name to a list of branch names:
//!
//! ```yaml
//! acme:
//!   widgets:
//!     - main
//!     - release
//! ```
//!
//! Document order is kept at every level so that the expanded trust
//! patterns come out in the order the operator wrote them.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::names::{BranchName, OrganizationName, RepositoryName};
use crate::{WhitelistError, WhitelistResult};

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;

/// Default location of the whitelist document, relative to the working directory.
pub const DEFAULT_WHITELIST_PATH: &str = "./AccessConfigOIDC.yaml";

const DOCUMENT_ROOT: &str = "<document>";

/// Repositories of one organization, each with its ordered list of branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMap {
    repositories: Vec<(RepositoryName, Vec<BranchName>)>,
}

impl RepoMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate repositories in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepositoryName, &[BranchName])> {
        self.repositories
            .iter()
            .map(|(repo, branches)| (repo, branches.as_slice()))
    }

    /// Branches declared for `repository`, if it is present.
    pub fn branches(&self, repository: &str) -> Option<&[BranchName]> {
        self.repositories
            .iter()
            .find(|(repo, _)| repo.as_str() == repository)
            .map(|(_, branches)| branches.as_slice())
    }

    /// Number of repositories, whether or not they list any branches.
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// True when no repository is listed. A repository with an empty branch
    /// list still counts.
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Total number of branch entries across all repositories.
    pub fn branch_count(&self) -> usize {
        self.repositories.iter().map(|(_, b)| b.len()).sum()
    }

    /// Append a branch to `repository`, adding the repository at the end if
    /// it is not present yet. Duplicate branches are kept.
    pub fn push_branch(&mut self, repository: RepositoryName, branch: BranchName) {
        match self
            .repositories
            .iter_mut()
            .find(|(repo, _)| *repo == repository)
        {
            Some((_, branches)) => branches.push(branch),
            None => self.repositories.push((repository, vec![branch])),
        }
    }
}

/// The full whitelist: organizations in document order, each with its
/// repositories.
///
/// # Examples
///
/// ```
/// use trust_whitelist::WhitelistConfig;
///
/// let config = WhitelistConfig::from_yaml_str("acme:\n  widgets: [main, release]\n")?;
/// assert_eq!(config.branch_count(), 2);
/// # Ok::<(), trust_whitelist::WhitelistError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistConfig {
    organizations: Vec<(OrganizationName, RepoMap)>,
}

impl WhitelistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse the whitelist document at `path`.
    ///
    /// # Errors
    ///
    /// - `WhitelistError::DocumentLoad` if the file is missing or unreadable
    /// - `WhitelistError::Structure` if the content is not a valid whitelist
    pub fn load(path: &Path) -> WhitelistResult<Self> {
        debug!(message = "Loading whitelist document", path = ?path);

        let content = fs::read_to_string(path).map_err(|e| WhitelistError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_yaml_str(&content)?;

        info!(
            message = "Loaded whitelist document",
            path = ?path,
            organizations = config.organizations.len(),
            branches = config.branch_count()
        );
        Ok(config)
    }

    /// Parse a whitelist from YAML text.
    ///
    /// Keys and branch entries must be strings. Anything else (numbers,
    /// booleans, nulls, nested sequences or mappings, tagged values) is a
    /// structure error; nothing is coerced. A branch such as `1.10` must be
    /// quoted, since YAML would otherwise read it as the number `1.1`. An
    /// empty document is rejected, an explicit `{}` is an empty whitelist.
    pub fn from_yaml_str(content: &str) -> WhitelistResult<Self> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| {
            WhitelistError::structure(DOCUMENT_ROOT, format!("Failed to parse YAML: {}", e))
        })?;
        Self::from_yaml_value(&document)
    }

    fn from_yaml_value(document: &Value) -> WhitelistResult<Self> {
        let organizations = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => {
                return Err(WhitelistError::structure(
                    DOCUMENT_ROOT,
                    "document is empty, expected a mapping of organizations",
                ))
            }
            other => {
                return Err(WhitelistError::structure(
                    DOCUMENT_ROOT,
                    format!(
                        "expected a mapping of organizations, found {}",
                        describe(other)
                    ),
                ))
            }
        };

        let mut config = WhitelistConfig::new();
        for (org_key, repositories) in organizations {
            let org_raw = scalar_text(org_key).ok_or_else(|| {
                WhitelistError::structure(
                    DOCUMENT_ROOT,
                    format!(
                        "organization names must be strings, found {}",
                        describe_name_node(org_key)
                    ),
                )
            })?;
            let org = OrganizationName::try_new_at(org_raw.clone(), &org_raw)?;
            let repo_map = parse_repositories(&org, repositories)?;
            config.organizations.push((org, repo_map));
        }

        Ok(config)
    }

    /// Iterate organizations in document order.
    pub fn organizations(&self) -> impl Iterator<Item = (&OrganizationName, &RepoMap)> {
        self.organizations.iter().map(|(org, repos)| (org, repos))
    }

    /// Repositories declared for `organization`, if it is present.
    pub fn repositories(&self, organization: &str) -> Option<&RepoMap> {
        self.organizations
            .iter()
            .find(|(org, _)| org.as_str() == organization)
            .map(|(_, repos)| repos)
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.len()
    }

    pub fn repository_count(&self) -> usize {
        self.organizations.iter().map(|(_, r)| r.len()).sum()
    }

    /// Total number of branch entries; equals the number of trust patterns
    /// the expander produces.
    pub fn branch_count(&self) -> usize {
        self.organizations.iter().map(|(_, r)| r.branch_count()).sum()
    }

    /// True when expansion would produce no trust patterns, including a
    /// whitelist whose repositories all have empty branch lists.
    pub fn has_no_patterns(&self) -> bool {
        self.branch_count() == 0
    }

    /// Append a branch, creating the organization and repository entries at
    /// the end when they are new.
    pub fn push_branch(
        &mut self,
        organization: OrganizationName,
        repository: RepositoryName,
        branch: BranchName,
    ) {
        match self
            .organizations
            .iter_mut()
            .find(|(org, _)| *org == organization)
        {
            Some((_, repos)) => repos.push_branch(repository, branch),
            None => {
                let mut repos = RepoMap::new();
                repos.push_branch(repository, branch);
                self.organizations.push((organization, repos));
            }
        }
    }
}

fn parse_repositories(org: &OrganizationName, value: &Value) -> WhitelistResult<RepoMap> {
    let repositories = match value {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(WhitelistError::structure(
                org.as_str(),
                format!("expected a mapping of repositories, found {}", describe(other)),
            ))
        }
    };

    let mut repo_map = RepoMap::new();
    for (repo_key, branches) in repositories {
        let repo_raw = scalar_text(repo_key).ok_or_else(|| {
            WhitelistError::structure(
                org.as_str(),
                format!(
                    "repository names must be strings, found {}",
                    describe_name_node(repo_key)
                ),
            )
        })?;
        let location = format!("{}/{}", org, repo_raw);
        let repo = RepositoryName::try_new_at(repo_raw, &location)?;

        let entries = match branches {
            Value::Sequence(entries) => entries,
            other => {
                return Err(WhitelistError::structure(
                    &location,
                    format!("expected a list of branches, found {}", describe(other)),
                ))
            }
        };

        if entries.is_empty() {
            warn!(
                message = "Repository has no whitelisted branches",
                repository = %location
            );
        }

        let mut names = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let entry_location = format!("{}[{}]", location, index);
            let raw = scalar_text(entry).ok_or_else(|| {
                WhitelistError::structure(
                    &entry_location,
                    format!("expected a branch name, found {}", describe_name_node(entry)),
                )
            })?;
            names.push(BranchName::try_new_at(raw, &entry_location)?);
        }

        repo_map.repositories.push((repo, names));
    }

    Ok(repo_map)
}

/// Text of a string scalar; `None` for every other node.
///
/// Numbers are refused rather than printed back: the parsed value loses the
/// source spelling (`1.10` reads as `1.1`, `0x1F` as `31`).
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn describe_name_node(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("the number {}; quote the name to use it as written", n),
        other => describe(other).to_string(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
