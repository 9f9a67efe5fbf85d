use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Switch to `branch`, replacing the working files and the index with its snapshot
    pub fn checkout_branch(&mut self, branch: &str) -> crate::errors::Result<()> {
        let branches = self.branches()?;
        let name = BranchName::try_parse(branch).map_err(|_| RepositoryError::NoSuchBranch)?;
        let target = branches
            .get(&name)
            .cloned()
            .ok_or(RepositoryError::NoSuchBranch)?;
        if branches.is_active(&name) {
            return Err(RepositoryError::AlreadyOnBranch);
        }

        self.materialize(&target)?;
        self.branches_mut()?.switch(&name)?;
        tracing::info!(branch = %name, head = %target, "switched branch");

        self.save()
    }

    /// Overwrite the working copy of `path` with its version in a commit
    ///
    /// The index is left alone.
    pub fn checkout_file(
        &mut self,
        commit_id: &str,
        path: impl AsRef<Path>,
    ) -> crate::errors::Result<()> {
        self.branches()?;
        let commit = self.graph().resolve(commit_id)?.oid().clone();

        self.write_from_commit(&commit, path.as_ref())
    }

    /// Overwrite the working copy of `path` with its version in HEAD
    pub fn restore(&mut self, path: impl AsRef<Path>) -> crate::errors::Result<()> {
        let head = self.branches()?.head().clone();

        self.write_from_commit(&head, path.as_ref())
    }

    fn write_from_commit(&self, commit: &ObjectId, path: &Path) -> crate::errors::Result<()> {
        let relative = self
            .workspace()
            .relative(path)
            .map_err(|_| RepositoryError::FileNotInCommit)?;
        let oid = self
            .graph()
            .get(commit)?
            .snapshot()
            .get(&relative)
            .ok_or(RepositoryError::FileNotInCommit)?;

        let blob = self.database().load_blob(oid)?;
        self.workspace().write_file(&relative, blob.content())?;

        Ok(())
    }

    /// Replace the working files and the index with the snapshot of `target`
    ///
    /// Fails without touching anything if an untracked file would be
    /// overwritten or a blob is missing.
    pub(crate) fn materialize(&mut self, target: &ObjectId) -> crate::errors::Result<()> {
        let snapshot = self.graph().get(target)?.snapshot().clone();

        {
            let migration = Migration::new(self.index().tree(), &snapshot);
            let untracked = Inspector::new(self.workspace()).untracked_files(self.index().tree())?;
            let conflicts = migration.untracked_conflicts(&untracked);
            if !conflicts.is_empty() {
                tracing::debug!(?conflicts, "untracked files in the way");
                return Err(RepositoryError::UntrackedFileConflict);
            }

            self.workspace().apply_migration(&migration, self.database())?;
        }

        self.index_mut().replace(snapshot);
        Ok(())
    }
}
