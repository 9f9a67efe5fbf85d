use crate::artifacts::branch::branch_name::is_valid_ref_name;
use crate::errors::RepositoryError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Remote name to repository location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTable {
    remotes: BTreeMap<String, PathBuf>,
}

impl RemoteTable {
    pub fn new(remotes: BTreeMap<String, PathBuf>) -> Self {
        RemoteTable { remotes }
    }

    /// Register `location`, written with `/` separators, under `name`
    ///
    /// `name` follows the branch naming rule since it becomes a file under
    /// `remotes/`.
    pub fn add(&mut self, name: &str, location: &str) -> Result<(), RepositoryError> {
        if !is_valid_ref_name(name)? {
            return Err(RepositoryError::InvalidRemoteName(name.to_string()));
        }
        if self.remotes.contains_key(name) {
            return Err(RepositoryError::RemoteAlreadyExists);
        }

        let location = location.replace('/', std::path::MAIN_SEPARATOR_STR);
        self.remotes.insert(name.to_string(), PathBuf::from(location));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<PathBuf, RepositoryError> {
        self.remotes
            .remove(name)
            .ok_or(RepositoryError::NoSuchRemote)
    }

    pub fn get(&self, name: &str) -> Result<&Path, RepositoryError> {
        self.remotes
            .get(name)
            .map(PathBuf::as_path)
            .ok_or(RepositoryError::NoSuchRemote)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.remotes
            .iter()
            .map(|(name, location)| (name.as_str(), location.as_path()))
    }
}
