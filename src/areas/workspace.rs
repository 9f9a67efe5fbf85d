use crate::areas::database::Database;
use crate::areas::repository::METADATA_DIR;
use crate::artifacts::checkout::migration::Migration;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file below the root, relative to it and sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path().strip_prefix(&self.path).ok()))
        {
            let entry = entry.context("Unable to walk the working directory")?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(&self.path) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Files below `path` (or `path` itself), relative to the root
    pub fn expand(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let relative = self.relative(path)?;
        let absolute = self.path.join(&relative);

        if absolute.is_dir() {
            Ok(self
                .list_files()?
                .into_iter()
                .filter(|file| file.starts_with(&relative))
                .collect())
        } else {
            Ok(vec![relative])
        }
    }

    /// Normalise a user supplied path to one relative to the root
    ///
    /// Absolute paths must lie inside the working directory. `.` and `..`
    /// components are resolved lexically. Paths into the metadata directory
    /// are refused.
    pub fn relative(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path)
                .with_context(|| {
                    format!("{} is outside of the repository", path.display())
                })?
                .to_path_buf()
        } else {
            path.to_path_buf()
        };

        let mut normalised = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalised.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalised.pop() {
                        anyhow::bail!("{} is outside of the repository", path.display());
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    anyhow::bail!("{} is outside of the repository", path.display());
                }
            }
        }

        if normalised
            .components()
            .any(|component| component.as_os_str() == METADATA_DIR)
        {
            anyhow::bail!("{} is inside the metadata directory", path.display());
        }

        Ok(normalised)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Write `content` to `file_path`, creating missing parent directories
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
        // only an empty directory gives way to a file
        if file_path.is_dir() {
            std::fs::remove_dir(&file_path)
                .with_context(|| format!("Unable to replace directory {}", file_path.display()))?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a file if present, then any parent directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let absolute = self.path.join(file_path);

        if absolute.is_file() {
            std::fs::remove_file(&absolute)
                .with_context(|| format!("Unable to remove file {}", absolute.display()))?;
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
            let dir_path = self.path.join(dir);
            let is_empty = std::fs::read_dir(&dir_path)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Unable to remove directory {}", dir_path.display()))?;
            parent = dir.parent();
        }

        Ok(())
    }

    /// Bring the working directory in line with the migration target
    ///
    /// Every target blob is loaded before the first file is touched, so a
    /// missing blob leaves the working directory unchanged.
    pub fn apply_migration(
        &self,
        migration: &Migration<'_>,
        database: &Database,
    ) -> crate::errors::Result<()> {
        let writes = migration
            .writes()
            .map(|(path, oid)| -> crate::errors::Result<_> {
                Ok((path, database.load_blob(oid)?.into_content()))
            })
            .collect::<crate::errors::Result<Vec<_>>>()?;

        for path in migration.deletes() {
            self.remove_file(path)?;
        }
        for (path, content) in writes {
            self.write_file(path, &content)?;
        }

        Ok(())
    }

    fn is_ignored(relative: Option<&Path>) -> bool {
        let Some(relative) = relative else {
            return false;
        };

        // Check if any component of the path is in IGNORED_PATHS
        relative.components().any(|component| {
            if let Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workdir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("b.txt").write_str("b").expect("write");
        dir.child("a.txt").write_str("a").expect("write");
        dir.child("nested/c.txt").write_str("c").expect("write");
        dir.child(".gitlet/HEAD").write_str("ignored").expect("write");
        dir
    }

    #[rstest]
    fn lists_files_outside_the_metadata_dir(workdir: TempDir) -> anyhow::Result<()> {
        let workspace = Workspace::new(workdir.path().into());

        assert_eq!(
            workspace.list_files()?,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("nested/c.txt"),
            ]
        );
        Ok(())
    }

    #[rstest]
    fn expands_directories_to_their_files(workdir: TempDir) -> anyhow::Result<()> {
        let workspace = Workspace::new(workdir.path().into());

        assert_eq!(
            workspace.expand(Path::new("./nested"))?,
            vec![PathBuf::from("nested/c.txt")]
        );
        assert_eq!(
            workspace.expand(&workdir.path().join("a.txt"))?,
            vec![PathBuf::from("a.txt")]
        );
        Ok(())
    }

    #[rstest]
    fn rejects_paths_escaping_the_root(workdir: TempDir) {
        let workspace = Workspace::new(workdir.path().into());

        assert!(workspace.relative(Path::new("../outside.txt")).is_err());
    }

    #[rstest]
    #[case(".gitlet/HEAD")]
    #[case(".gitlet")]
    #[case("nested/../.gitlet/index")]
    fn rejects_paths_into_the_metadata_dir(workdir: TempDir, #[case] path: &str) {
        let workspace = Workspace::new(workdir.path().into());

        assert!(workspace.relative(Path::new(path)).is_err());
        assert!(workspace.expand(&workdir.path().join(path)).is_err());
    }

    #[rstest]
    fn removing_the_last_file_prunes_empty_directories(workdir: TempDir) -> anyhow::Result<()> {
        let workspace = Workspace::new(workdir.path().into());

        workspace.remove_file(Path::new("nested/c.txt"))?;

        assert!(!workdir.path().join("nested").exists());
        assert!(workdir.path().join("a.txt").is_file());
        Ok(())
    }

    #[rstest]
    fn writing_creates_parent_directories(workdir: TempDir) -> anyhow::Result<()> {
        let workspace = Workspace::new(workdir.path().into());

        workspace.write_file(Path::new("deep/er/d.txt"), b"d")?;

        assert_eq!(workspace.read_file(Path::new("deep/er/d.txt"))?.as_ref(), b"d");
        Ok(())
    }

    #[rstest]
    fn writing_never_clears_a_populated_directory(workdir: TempDir) {
        let workspace = Workspace::new(workdir.path().into());

        assert!(workspace.write_file(Path::new("nested"), b"file").is_err());
        assert!(workdir.path().join("nested/c.txt").is_file());
    }

    #[rstest]
    fn writing_replaces_an_empty_directory(workdir: TempDir) -> anyhow::Result<()> {
        let workspace = Workspace::new(workdir.path().into());
        workdir.child("hollow").create_dir_all()?;

        workspace.write_file(Path::new("hollow"), b"file")?;

        assert_eq!(workspace.read_file(Path::new("hollow"))?.as_ref(), b"file");
        Ok(())
    }
}
