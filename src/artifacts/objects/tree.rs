//! Staging snapshot
//!
//! A `Tree` maps every tracked path to the digest of the blob holding its
//! content. The same type plays two roles:
//!
//! - the snapshot recorded by a commit, which is never mutated again
//! - the working index, which starts as a copy of the HEAD snapshot and
//!   evolves through `add`/`rm` until the next commit
//!
//! Cloning a tree copies the whole mapping, so edits to the working index can
//! never reach a snapshot that a commit already holds.
//!
//! ## Hash
//!
//! `hash()` digests the `<path>\0<blob-id>\n` pairs in path order. Paths are
//! normalised to `/`-separated strings first, which makes the hash independent
//! of insertion order and of the host platform.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<PathBuf, ObjectId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` in the blob store and track it under `path`
    ///
    /// Any previous mapping for `path` is replaced.
    pub fn add(
        &mut self,
        database: &Database,
        path: &Path,
        content: Bytes,
    ) -> crate::errors::Result<ObjectId> {
        let oid = database.store_blob(&Blob::new(content))?;
        self.insert(path.to_path_buf(), oid.clone());

        Ok(oid)
    }

    pub fn insert(&mut self, path: PathBuf, oid: ObjectId) -> Option<ObjectId> {
        self.entries.insert(path, oid)
    }

    /// Stop tracking `path`; absent paths are ignored
    pub fn remove(&mut self, path: &Path) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &ObjectId)> {
        self.entries.iter().map(|(path, oid)| (path.as_path(), oid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hash(&self) -> ObjectId {
        let mut pairs = Vec::new();
        for (path, oid) in self.iter() {
            pairs.extend_from_slice(path_key(path).as_bytes());
            pairs.push(b'\0');
            pairs.extend_from_slice(oid.as_ref().as_bytes());
            pairs.push(b'\n');
        }

        ObjectId::digest(&pairs)
    }

    /// Content equality, decided by comparing hashes
    pub fn same(&self, other: &Tree) -> bool {
        self.hash() == other.hash()
    }

    /// Paths of this tree that are missing from `other`
    ///
    /// With `compare_content`, paths whose blob differs in `other` are
    /// reported as well.
    pub fn diff(&self, other: &Tree, compare_content: bool) -> BTreeSet<PathBuf> {
        self.entries
            .iter()
            .filter(|(path, oid)| match other.get(path) {
                None => true,
                Some(other_oid) => compare_content && other_oid != *oid,
            })
            .map(|(path, _)| path.clone())
            .collect()
    }
}

impl FromIterator<(PathBuf, ObjectId)> for Tree {
    fn from_iter<I: IntoIterator<Item = (PathBuf, ObjectId)>>(iter: I) -> Self {
        Tree {
            entries: iter.into_iter().collect(),
        }
    }
}

/// `/`-separated form of a repository-relative path
pub fn path_key(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Refuse paths the commit encoding cannot carry
///
/// Every component must be UTF-8 and free of line breaks.
pub fn check_path(path: &Path) -> crate::errors::Result<()> {
    let supported = path.components().all(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| !name.contains(['\n', '\r']))
    });
    if !supported {
        return Err(RepositoryError::UnsupportedFileName(
            path.to_string_lossy().into_owned(),
        ));
    }

    Ok(())
}
