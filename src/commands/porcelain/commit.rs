use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::timestamp_from_env;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record the working index as a new commit on the active branch
    pub fn commit(&mut self, message: &str) -> crate::errors::Result<ObjectId> {
        let parent = self.branches()?.head().clone();
        let snapshot = self.index().tree().clone();

        let commit_id = self
            .graph_mut()
            .create_commit(vec![parent], message, snapshot, timestamp_from_env())?
            .oid()
            .clone();
        self.branches_mut()?.set_head(commit_id.clone());

        self.save()?;
        Ok(commit_id)
    }
}
