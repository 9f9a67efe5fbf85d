//! Object store
//!
//! Blobs live in `.gitlet/blobs/<digest>` and commits in
//! `.gitlet/commits/<id>`. Both directories are append-only: an object is
//! written at most once and never modified or deleted afterwards.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

pub const BLOBS_DIR: &str = "blobs";
pub const COMMITS_DIR: &str = "commits";

#[derive(Debug)]
pub struct Database {
    blobs_path: Box<Path>,
    commits_path: Box<Path>,
}

impl Database {
    /// Create a store rooted at the metadata directory (`.gitlet`)
    pub fn new(path: &Path) -> Self {
        Database {
            blobs_path: path.join(BLOBS_DIR).into_boxed_path(),
            commits_path: path.join(COMMITS_DIR).into_boxed_path(),
        }
    }

    pub fn blobs_path(&self) -> &Path {
        &self.blobs_path
    }

    pub fn commits_path(&self) -> &Path {
        &self.commits_path
    }

    /// Store a blob unless one with the same digest already exists
    pub fn store_blob(&self, blob: &Blob) -> crate::errors::Result<ObjectId> {
        let oid = blob.object_id();
        self.store(blob, self.blobs_path.join(oid.as_ref()))?;

        Ok(oid)
    }

    pub fn load_blob(&self, oid: &ObjectId) -> crate::errors::Result<Blob> {
        let blob_path = self.blobs_path.join(oid.as_ref());
        if !blob_path.exists() {
            return Err(RepositoryError::MissingBlob(oid.clone()));
        }

        let mut reader = Cursor::new(self.read_object(&blob_path)?);
        Self::expect_type(&mut reader, ObjectType::Blob, &blob_path)?;

        Ok(Blob::deserialize(reader)?)
    }

    pub fn store_commit(&self, commit: &Commit) -> crate::errors::Result<()> {
        self.store(commit, self.commits_path.join(commit.oid().as_ref()))
    }

    /// Load a commit and check that its content still hashes to its file name
    pub fn load_commit(&self, oid: &ObjectId) -> crate::errors::Result<Commit> {
        let commit_path = self.commits_path.join(oid.as_ref());
        if !commit_path.exists() {
            return Err(RepositoryError::NoSuchCommit);
        }

        let mut reader = Cursor::new(self.read_object(&commit_path)?);
        Self::expect_type(&mut reader, ObjectType::Commit, &commit_path)?;
        let commit = Commit::deserialize(reader)
            .with_context(|| format!("Unable to parse commit {}", commit_path.display()))?;

        if commit.oid() != oid {
            return Err(RepositoryError::Corrupt(format!(
                "commit file {} holds commit {}",
                oid,
                commit.oid()
            )));
        }

        Ok(commit)
    }

    /// Ids of every commit file in the store
    pub fn commit_ids(&self) -> crate::errors::Result<Vec<ObjectId>> {
        let mut oids = Vec::new();

        for entry in std::fs::read_dir(&self.commits_path).with_context(|| {
            format!(
                "Unable to list commit directory {}",
                self.commits_path.display()
            )
        })? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            // leftovers of an interrupted write
            if file_name.starts_with(TEMP_PREFIX) {
                continue;
            }

            let oid = ObjectId::try_parse(file_name.to_string()).map_err(|_| {
                RepositoryError::Corrupt(format!("unexpected file {file_name} in commit store"))
            })?;
            oids.push(oid);
        }

        Ok(oids)
    }

    fn store(&self, object: &impl Object, object_path: PathBuf) -> crate::errors::Result<()> {
        // write the object to disk unless it already exists
        if object_path.exists() {
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;

        Ok(())
    }

    fn expect_type(
        reader: &mut Cursor<Bytes>,
        expected: ObjectType,
        object_path: &Path,
    ) -> crate::errors::Result<()> {
        let (object_type, size) = ObjectType::parse_header(reader)
            .with_context(|| format!("Unable to parse object {}", object_path.display()))?;
        if object_type != expected {
            return Err(RepositoryError::Corrupt(format!(
                "{} holds a {} instead of a {}",
                object_path.display(),
                object_type,
                expected
            )));
        }

        let remaining = reader.get_ref().len() as u64 - reader.position();
        if remaining != size as u64 {
            return Err(RepositoryError::Corrupt(format!(
                "{} announces {} bytes but holds {}",
                object_path.display(),
                size,
                remaining
            )));
        }

        Ok(())
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("{TEMP_PREFIX}{}", rand::random::<u32>())
    }
}

const TEMP_PREFIX: &str = "tmp-obj-";
