use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create `.gitlet` with the root commit and a `master` branch pointing at it
    pub fn init(&mut self) -> crate::errors::Result<()> {
        if self.is_initialized() || self.metadata_path().exists() {
            return Err(RepositoryError::AlreadyInitialized);
        }

        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create .gitlet/blobs directory")?;
        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create .gitlet/commits directory")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .gitlet/branches directory")?;
        fs::create_dir_all(self.refs().remotes_path())
            .context("Failed to create .gitlet/remotes directory")?;

        let root = self.graph_mut().create_initial().oid().clone();
        let master = BranchName::try_parse(DEFAULT_BRANCH)?;
        tracing::info!(branch = %master, commit = %root, "initialized repository");

        self.set_branches(BranchTable::new(master, root));
        self.index_mut().replace(Tree::new());

        self.save()
    }
}
