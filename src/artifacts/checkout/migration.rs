use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Plan for moving the working directory from the index to a target snapshot
#[derive(Debug)]
pub struct Migration<'t> {
    target: &'t Tree,
    deletes: BTreeSet<PathBuf>,
}

impl<'t> Migration<'t> {
    pub fn new(current: &Tree, target: &'t Tree) -> Self {
        let deletes = current.diff(target, false);
        tracing::debug!(
            deletes = deletes.len(),
            writes = target.len(),
            "planned migration"
        );

        Migration { target, deletes }
    }

    /// Tracked paths absent from the target
    pub fn deletes(&self) -> impl Iterator<Item = &Path> {
        self.deletes.iter().map(PathBuf::as_path)
    }

    /// Every path of the target together with the blob to write there
    pub fn writes(&self) -> impl Iterator<Item = (&Path, &ObjectId)> {
        self.target.iter()
    }

    /// Untracked files the migration would overwrite
    pub fn untracked_conflicts(&self, untracked: &BTreeSet<PathBuf>) -> Vec<PathBuf> {
        self.writes()
            .filter(|(path, _)| is_blocked(untracked, path))
            .map(|(path, _)| path.to_path_buf())
            .collect()
    }
}

/// Whether writing `path` would clobber an untracked file
///
/// That is the case for an untracked file at `path` itself, below it (the
/// file would replace a directory) or above it (a directory would replace
/// the file).
pub fn is_blocked(untracked: &BTreeSet<PathBuf>, path: &Path) -> bool {
    untracked
        .iter()
        .any(|file| file.starts_with(path) || path.starts_with(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn tree(files: &[(&str, &str)]) -> Tree {
        files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), ObjectId::digest(content.as_bytes())))
            .collect()
    }

    #[fixture]
    fn current() -> Tree {
        tree(&[("kept.txt", "k"), ("changed.txt", "old"), ("gone.txt", "g")])
    }

    #[fixture]
    fn target() -> Tree {
        tree(&[("kept.txt", "k"), ("changed.txt", "new"), ("added.txt", "a")])
    }

    #[rstest]
    fn deletes_only_tracked_files_missing_from_the_target(current: Tree, target: Tree) {
        let migration = Migration::new(&current, &target);

        assert_eq!(
            migration.deletes().collect::<Vec<_>>(),
            vec![Path::new("gone.txt")]
        );
        assert_eq!(migration.writes().count(), 3);
    }

    #[rstest]
    fn untracked_files_in_the_way_are_reported(current: Tree, target: Tree) {
        let migration = Migration::new(&current, &target);
        let untracked = BTreeSet::from([PathBuf::from("added.txt"), PathBuf::from("notes.txt")]);

        assert_eq!(
            migration.untracked_conflicts(&untracked),
            vec![PathBuf::from("added.txt")]
        );
    }

    #[rstest]
    fn untracked_directory_at_a_target_file_is_in_the_way(current: Tree, target: Tree) {
        let migration = Migration::new(&current, &target);
        let untracked = BTreeSet::from([PathBuf::from("added.txt/precious.txt")]);

        assert_eq!(
            migration.untracked_conflicts(&untracked),
            vec![PathBuf::from("added.txt")]
        );
    }

    #[rstest]
    #[case("f", "f", true)]
    #[case("f/precious.txt", "f", true)]
    #[case("f", "f/nested.txt", true)]
    #[case("f.txt", "f", false)]
    #[case("other/f", "f", false)]
    fn blocked_paths(#[case] untracked: &str, #[case] path: &str, #[case] expected: bool) {
        let untracked = BTreeSet::from([PathBuf::from(untracked)]);

        assert_eq!(is_blocked(&untracked, Path::new(path)), expected);
    }
}
