use crate::areas::repository::{METADATA_DIR, Repository};
use crate::errors::RepositoryError;

impl Repository {
    /// Remember `location` (with `/` separators) under `name`
    pub fn add_remote(&mut self, name: &str, location: &str) -> crate::errors::Result<()> {
        self.remotes_mut()?.add(name, location)?;
        self.save()
    }

    pub fn delete_remote(&mut self, name: &str) -> crate::errors::Result<()> {
        self.remotes_mut()?.remove(name)?;
        self.save()
    }

    /// Check that `remote` names a reachable repository
    ///
    /// Copying commits between repositories is not supported, so a reachable
    /// remote still ends in `TransferUnsupported`.
    pub fn fetch(&mut self, remote: &str, branch: &str) -> crate::errors::Result<()> {
        self.check_remote(remote)?;
        tracing::debug!(remote, branch, "fetch requested");

        Err(RepositoryError::TransferUnsupported)
    }

    /// See [`Repository::fetch`]
    pub fn push(&mut self, remote: &str, branch: &str) -> crate::errors::Result<()> {
        self.check_remote(remote)?;
        tracing::debug!(remote, branch, "push requested");

        Err(RepositoryError::TransferUnsupported)
    }

    fn check_remote(&self, remote: &str) -> crate::errors::Result<()> {
        let location = self.path().join(self.remotes()?.get(remote)?);

        if location.join(METADATA_DIR).is_dir() {
            Ok(())
        } else {
            Err(RepositoryError::RemoteUnreachable)
        }
    }
}
