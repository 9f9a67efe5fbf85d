//! Commit graph
//!
//! The in-memory map of every commit ever created in the repository. Commits
//! are only ever added: creating a commit inserts a new immutable node and
//! marks it for persistence, and nothing removes or rewrites a node.
//!
//! Abbreviated ids resolve through a unique-prefix scan, so `resolve` accepts
//! anything from a full id down to a prefix no other commit shares.

use crate::areas::database::Database;
use crate::artifacts::log::rev_list::{Ancestors, FirstParents};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct CommitGraph {
    commits: BTreeMap<ObjectId, Commit>,
    /// Commits created since the graph was loaded
    unsaved: BTreeSet<ObjectId>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every commit of the store
    pub fn load(database: &Database) -> crate::errors::Result<Self> {
        let mut commits = BTreeMap::new();

        for oid in database.commit_ids()? {
            let commit = database.load_commit(&oid)?;
            commits.insert(oid, commit);
        }

        Ok(CommitGraph {
            commits,
            unsaved: BTreeSet::new(),
        })
    }

    /// Write the commits created since loading
    pub fn save(&mut self, database: &Database) -> crate::errors::Result<()> {
        for oid in &self.unsaved {
            if let Some(commit) = self.commits.get(oid) {
                database.store_commit(commit)?;
            }
        }

        self.unsaved.clear();
        Ok(())
    }

    /// Record a new commit on top of `parents`
    ///
    /// A commit with a single parent (or none) must change the snapshot; merge
    /// commits may record the first parent's snapshot unchanged. A commit that
    /// already exists under the computed id is returned as is.
    pub fn create_commit(
        &mut self,
        parents: Vec<ObjectId>,
        message: &str,
        snapshot: Tree,
        timestamp: DateTime<FixedOffset>,
    ) -> crate::errors::Result<&Commit> {
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage);
        }

        if parents.len() < 2
            && let Some(parent) = parents.first()
            && self.get(parent)?.snapshot().same(&snapshot)
        {
            return Err(RepositoryError::NoChanges);
        }

        let commit = Commit::new(parents, message.to_string(), snapshot, timestamp);
        let oid = commit.oid().clone();
        tracing::info!(commit = %oid, message, "created commit");

        Ok(self.insert(commit, oid))
    }

    /// Add the root commit of a fresh repository
    pub fn create_initial(&mut self) -> &Commit {
        let commit = Commit::initial();
        let oid = commit.oid().clone();

        self.insert(commit, oid)
    }

    fn insert(&mut self, commit: Commit, oid: ObjectId) -> &Commit {
        if !self.commits.contains_key(&oid) {
            self.unsaved.insert(oid.clone());
        }

        self.commits.entry(oid).or_insert(commit)
    }

    pub fn get(&self, oid: &ObjectId) -> crate::errors::Result<&Commit> {
        self.commits.get(oid).ok_or(RepositoryError::NoSuchCommit)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    /// Resolve a full or abbreviated commit id
    pub fn resolve(&self, id_or_prefix: &str) -> crate::errors::Result<&Commit> {
        let prefix = id_or_prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(RepositoryError::NoSuchCommit);
        }

        if let Ok(oid) = ObjectId::try_parse(prefix.clone())
            && let Some(commit) = self.commits.get(&oid)
        {
            return Ok(commit);
        }
        if prefix.len() >= OBJECT_ID_LENGTH {
            return Err(RepositoryError::NoSuchCommit);
        }

        let mut candidates = self
            .commits
            .iter()
            .filter(|(oid, _)| oid.starts_with(&prefix))
            .map(|(_, commit)| commit);

        match (candidates.next(), candidates.next()) {
            (Some(commit), None) => Ok(commit),
            (Some(_), Some(_)) => {
                tracing::debug!(prefix, "ambiguous commit id prefix");
                Err(RepositoryError::NoSuchCommit)
            }
            _ => Err(RepositoryError::NoSuchCommit),
        }
    }

    /// Every commit, in id order
    pub fn iter(&self) -> impl Iterator<Item = &Commit> {
        self.commits.values()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Breadth-first walk over `start` and everything it descends from
    pub fn ancestors(&self, start: &ObjectId) -> Ancestors<'_> {
        Ancestors::new(self, start.clone())
    }

    /// `start`, its first parent, that commit's first parent and so on
    pub fn first_parents(&self, start: &ObjectId) -> FirstParents<'_> {
        FirstParents::new(self, Some(start.clone()))
    }

    /// Ids of `start` and all of its ancestors
    pub fn ancestor_ids(&self, start: &ObjectId) -> BTreeSet<ObjectId> {
        self.ancestors(start)
            .map(|commit| commit.oid().clone())
            .collect()
    }

    /// Ids of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> Vec<&ObjectId> {
        self.commits
            .iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect()
    }
}
