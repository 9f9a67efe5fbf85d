//! Working index (staging area)
//!
//! The index holds the snapshot that the next commit will record. After a
//! commit or checkout it is a copy of the HEAD snapshot; `add` and `rm`
//! then edit it path by path.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Sorted list of tracked paths with their blob digests
//! - Checksum: SHA-1 hash of the entire index for integrity verification

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::tree::Tree;
use anyhow::{Context, anyhow};
use fake::rand;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const INDEX_FILE: &str = "index";

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    tree: Tree,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            tree: Tree::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.changed = true;
        &mut self.tree
    }

    /// Replace the staged snapshot, e.g. with a copy of a commit's snapshot
    pub fn replace(&mut self, tree: Tree) {
        self.tree = tree;
        self.changed = true;
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Load the index from disk
    ///
    /// A missing file yields an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.tree = Tree::new();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let index_file = std::fs::File::open(&self.path)
            .with_context(|| format!("Unable to open index file {}", self.path.display()))?;
        let mut reader = Checksum::new(BufReader::new(index_file));

        let entries_count = Self::parse_header(&mut reader)?;
        for _ in 0..entries_count {
            let entry = IndexEntry::deserialize(&mut reader)?;
            self.tree.insert(entry.name, entry.oid);
        }

        reader.verify()
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let index_dir = self
            .path
            .parent()
            .context(format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("{INDEX_FILE}.{}.tmp", rand::random::<u32>()));

        let temp_file = std::fs::File::create(&temp_path)
            .with_context(|| format!("Unable to create index file {}", temp_path.display()))?;
        let mut writer = Checksum::new(BufWriter::new(temp_file));

        let entries_count = u32::try_from(self.tree.len())
            .map_err(|_| anyhow!("Too many entries for the index"))?;
        writer.write(&IndexHeader::for_entries(entries_count).serialize()?)?;
        for (name, oid) in self.tree.iter() {
            writer.write(&IndexEntry::new(name, oid).serialize()?)?;
        }
        writer.write_checksum()?;
        writer
            .into_inner()
            .flush()
            .context("Unable to flush index file")?;

        // rename the temp file to the index file to make it atomic
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to rename index file to {}", self.path.display()))?;

        self.changed = false;
        Ok(())
    }

    fn parse_header<R: std::io::Read>(reader: &mut Checksum<R>) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(&header_bytes)?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }
}
