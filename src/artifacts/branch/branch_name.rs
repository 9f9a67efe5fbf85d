use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::RepositoryError;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self, RepositoryError> {
        let name = name.into();

        if is_valid_ref_name(&name)? {
            Ok(Self(name))
        } else {
            Err(RepositoryError::InvalidBranchName(name))
        }
    }
}

/// Whether `name` can be stored as a single file below a ref directory
///
/// Branches and remotes share this rule.
pub fn is_valid_ref_name(name: &str) -> anyhow::Result<bool> {
    if name.is_empty() {
        return Ok(false);
    }

    let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
        .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

    Ok(!re.is_match(name))
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
