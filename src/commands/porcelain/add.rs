use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::check_path;
use crate::errors::RepositoryError;
use std::collections::BTreeSet;
use std::path::Path;

impl Repository {
    /// Stage the current content of each path; directories stage every file below them
    ///
    /// All paths are checked before any content is stored.
    pub fn add<P: AsRef<Path>>(&mut self, paths: &[P]) -> crate::errors::Result<()> {
        self.branches()?;

        let mut files = BTreeSet::new();
        for path in paths {
            let relative = self
                .workspace()
                .relative(path.as_ref())
                .map_err(|_| RepositoryError::FileNotFound)?;
            if !self.path().join(&relative).exists() {
                return Err(RepositoryError::FileNotFound);
            }

            let expanded = self.workspace().expand(&relative)?;
            for file in &expanded {
                check_path(file)?;
            }
            files.extend(expanded);
        }

        let mut index = self.index().tree().clone();
        for file in files {
            let content = self.workspace().read_file(&file)?;
            let oid = index.add(self.database(), &file, content)?;
            tracing::debug!(path = %file.display(), blob = %oid, "staged file");
        }
        self.index_mut().replace(index);

        self.save()
    }
}
