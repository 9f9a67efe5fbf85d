//! Named pointers kept under the metadata directory
//!
//! ## Layout
//!
//! - `HEAD`: id of the commit at the tip of the active branch
//! - `branch`: name of the active branch
//! - `branches/<name>`: one file per branch holding its head commit id
//! - `remotes/<name>`: one file per remote holding its location
//!
//! Every file is plain text with a single trailing newline.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEAD_FILE: &str = "HEAD";
pub const ACTIVE_BRANCH_FILE: &str = "branch";
pub const BRANCHES_DIR: &str = "branches";
pub const REMOTES_DIR: &str = "remotes";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCHES_DIR)
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.path.join(REMOTES_DIR)
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        Self::read_ref_file(&self.head_path())?
            .map(ObjectId::try_parse)
            .transpose()
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        Self::update_ref_file(&self.head_path(), oid.as_ref())
    }

    pub fn read_active_branch(&self) -> anyhow::Result<Option<BranchName>> {
        Ok(Self::read_ref_file(&self.path.join(ACTIVE_BRANCH_FILE))?
            .map(BranchName::try_parse)
            .transpose()?)
    }

    pub fn update_active_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        Self::update_ref_file(&self.path.join(ACTIVE_BRANCH_FILE), name.as_ref())
    }

    pub fn load_branches(&self) -> anyhow::Result<BTreeMap<BranchName, ObjectId>> {
        Self::read_ref_dir(&self.branches_path())?
            .into_iter()
            .map(|(name, oid)| -> anyhow::Result<_> {
                Ok((BranchName::try_parse(name)?, ObjectId::try_parse(oid)?))
            })
            .collect()
    }

    /// Make `branches/` mirror `branches`, dropping files of deleted branches
    pub fn save_branches(&self, branches: &BTreeMap<BranchName, ObjectId>) -> anyhow::Result<()> {
        Self::write_ref_dir(
            &self.branches_path(),
            branches
                .iter()
                .map(|(name, oid)| (name.as_ref(), oid.as_ref())),
        )
    }

    pub fn load_remotes(&self) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        Ok(Self::read_ref_dir(&self.remotes_path())?
            .into_iter()
            .map(|(name, location)| (name, PathBuf::from(location)))
            .collect())
    }

    pub fn save_remotes<'r>(
        &self,
        remotes: impl Iterator<Item = (&'r str, &'r Path)>,
    ) -> anyhow::Result<()> {
        let remotes = remotes
            .map(|(name, location)| (name, location.to_string_lossy().into_owned()))
            .collect::<Vec<_>>();

        Self::write_ref_dir(
            &self.remotes_path(),
            remotes
                .iter()
                .map(|(name, location)| (*name, location.as_str())),
        )
    }

    fn read_ref_file(path: &Path) -> anyhow::Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read ref file {}", path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(content.to_string()))
        }
    }

    fn read_ref_dir(dir: &Path) -> anyhow::Result<BTreeMap<String, String>> {
        let mut refs = BTreeMap::new();
        if !dir.exists() {
            return Ok(refs);
        }

        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Unable to list ref directory {}", dir.display()))?
        {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }

            if let Some(content) = Self::read_ref_file(&path)? {
                refs.insert(name.to_string(), content);
            }
        }

        Ok(refs)
    }

    fn write_ref_dir<'r>(
        dir: &Path,
        refs: impl Iterator<Item = (&'r str, &'r str)>,
    ) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Unable to create ref directory {}", dir.display()))?;

        let refs = refs.collect::<BTreeMap<_, _>>();
        for stale in Self::read_ref_dir(dir)?
            .keys()
            .filter(|name| !refs.contains_key(name.as_str()))
        {
            let stale_path = dir.join(stale);
            std::fs::remove_file(&stale_path)
                .with_context(|| format!("Unable to remove ref file {}", stale_path.display()))?;
        }

        for (name, content) in refs {
            let path = dir.join(name);
            if Self::read_ref_file(&path)?.as_deref() != Some(content) {
                Self::update_ref_file(&path, content)?;
            }
        }

        Ok(())
    }

    fn update_ref_file(path: &Path, content: &str) -> anyhow::Result<()> {
        let ref_dir = path
            .parent()
            .context(format!("Invalid ref path {}", path.display()))?;
        let temp_path = ref_dir.join(format!("{}{TEMP_SUFFIX}", rand::random::<u32>()));

        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("Unable to create ref file {}", temp_path.display()))?;
        writeln!(file, "{content}")
            .with_context(|| format!("Unable to write ref file {}", temp_path.display()))?;

        // rename the temp file to the ref file to make it atomic
        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Unable to rename ref file to {}", path.display()))?;

        Ok(())
    }
}

const TEMP_SUFFIX: &str = ".lock";
