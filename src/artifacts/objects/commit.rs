//! Commit object
//!
//! A commit records one snapshot of the tracked files together with its
//! parent commits (none for the root, two for a merge), a timestamp and a
//! message.
//!
//! ## Identity
//!
//! `id = SHA1(snapshot.hash() ++ SHA1(parent ids))`. The message and the
//! timestamp do not take part, so two commits over the same parents and the
//! same snapshot are the same commit.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <unix-seconds> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, path_key};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Environment variable overriding the timestamp of new commits
pub const DATE_ENV: &str = "GITLET_DATE";

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    oid: ObjectId,
    timestamp: DateTime<FixedOffset>,
    parents: Vec<ObjectId>,
    message: String,
    snapshot: Tree,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        message: String,
        snapshot: Tree,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            oid: Self::compute_id(&parents, &snapshot),
            timestamp,
            parents,
            message,
            snapshot,
        }
    }

    /// The root commit: no parents, empty snapshot, dated at the Unix epoch
    pub fn initial() -> Self {
        Self::new(
            Vec::new(),
            INITIAL_COMMIT_MESSAGE.to_string(),
            Tree::new(),
            DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
        )
    }

    pub fn compute_id(parents: &[ObjectId], snapshot: &Tree) -> ObjectId {
        let parents_hash = ObjectId::digest_all(parents.iter().map(|p| p.as_ref().as_bytes()));
        let snapshot_hash = snapshot.hash();

        ObjectId::digest_all([
            snapshot_hash.as_ref().as_bytes(),
            parents_hash.as_ref().as_bytes(),
        ])
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, followed by `log`
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot(&self) -> &Tree {
        &self.snapshot
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.snapshot.contains(path)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }
}

/// Timestamp for a new commit
///
/// Reads `GITLET_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls back to
/// the local clock when it is unset or unparsable.
pub fn timestamp_from_env() -> DateTime<FixedOffset> {
    std::env::var(DATE_ENV)
        .ok()
        .and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        })
        .unwrap_or_else(|| chrono::Local::now().fixed_offset())
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (path, oid) in self.snapshot.iter() {
            object_content.push(format!("file {} {}", oid.as_ref(), path_key(path)));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        frame(self.object_type(), object_content.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.split('\n');

        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        let date = next_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let timestamp = DateTime::parse_from_str(date, "%s %z")
            .with_context(|| format!("Invalid commit object: invalid date '{date}'"))?;

        let mut snapshot = Tree::new();
        for line in lines {
            let entry = line
                .strip_prefix("file ")
                .context("Invalid commit object: invalid file line")?;
            let (oid, path) = entry
                .split_once(' ')
                .context("Invalid commit object: file line without a path")?;
            snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
        }

        let message = message.to_string();
        Ok(Self::new(parents, message, snapshot, timestamp))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> ObjectId {
        self.oid.clone()
    }
}
