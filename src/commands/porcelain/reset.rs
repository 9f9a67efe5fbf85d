use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Move the active branch to any commit and check out its snapshot
    pub fn reset(&mut self, commit_id: &str) -> crate::errors::Result<ObjectId> {
        self.branches()?;
        let target = self.graph().resolve(commit_id)?.oid().clone();

        self.materialize(&target)?;
        self.branches_mut()?.set_head(target.clone());
        tracing::info!(head = %target, "reset active branch");

        self.save()?;
        Ok(target)
    }
}
