use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Unstage `path`; if HEAD tracks it, also delete the working file and
    /// record its removal in the next commit
    pub fn rm(&mut self, path: impl AsRef<Path>) -> crate::errors::Result<()> {
        let relative = self
            .workspace()
            .relative(path.as_ref())
            .map_err(|_| RepositoryError::NothingToRemove)?;

        let head = self.head_commit()?;
        let tracked = head.tracks(&relative);
        let staged = self.index().tree().get(&relative) != head.snapshot().get(&relative);

        if !tracked && !staged {
            return Err(RepositoryError::NothingToRemove);
        }

        self.index_mut().tree_mut().remove(&relative);
        if tracked {
            self.workspace().remove_file(&relative)?;
        }

        self.save()
    }
}
