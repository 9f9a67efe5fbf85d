use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch pointing at HEAD
    pub fn new_branch(&mut self, branch_name: &str) -> crate::errors::Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;
        let head = self.branches()?.head().clone();

        self.branches_mut()?.create(branch_name, head)?;
        self.save()
    }

    /// Delete a branch pointer; its commits stay in the repository
    pub fn delete_branch(&mut self, branch_name: &str) -> crate::errors::Result<()> {
        self.branches()?;
        let branch_name =
            BranchName::try_parse(branch_name).map_err(|_| RepositoryError::NoSuchBranch)?;

        self.branches_mut()?.delete(&branch_name)?;
        self.save()
    }
}
