use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// HEAD and its first-parent ancestors, newest first
    pub fn log(&self) -> crate::errors::Result<Vec<&Commit>> {
        let head = self.branches()?.head();

        Ok(self.graph().first_parents(head).collect())
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> crate::errors::Result<Vec<&Commit>> {
        self.branches()?;

        let mut commits = self.graph().iter().collect::<Vec<_>>();
        commits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.oid().cmp(b.oid()))
        });

        Ok(commits)
    }

    /// Ids of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> crate::errors::Result<Vec<&ObjectId>> {
        self.branches()?;

        Ok(self.graph().find(message))
    }
}
