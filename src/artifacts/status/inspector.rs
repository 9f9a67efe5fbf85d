use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl<'w> Inspector<'w> {
    /// Digest of every working file, as `add` would compute it
    pub fn scan_workspace(&self) -> anyhow::Result<BTreeMap<PathBuf, ObjectId>> {
        self.workspace
            .list_files()?
            .into_iter()
            .map(|path| -> anyhow::Result<_> {
                let content = self.workspace.read_file(&path)?;
                Ok((path, ObjectId::digest(&content)))
            })
            .collect()
    }

    /// Working files the index does not track
    pub fn untracked_files(&self, index: &Tree) -> anyhow::Result<BTreeSet<PathBuf>> {
        Ok(self
            .workspace
            .list_files()?
            .into_iter()
            .filter(|path| !index.contains(path))
            .collect())
    }

    pub fn check_index_against_workspace(
        index_oid: Option<&ObjectId>,
        workspace_oid: Option<&ObjectId>,
    ) -> WorkspaceChangeType {
        match (index_oid, workspace_oid) {
            (None, Some(_)) => WorkspaceChangeType::Untracked,
            (Some(_), None) => WorkspaceChangeType::Deleted,
            (Some(index_oid), Some(workspace_oid)) if index_oid != workspace_oid => {
                WorkspaceChangeType::Modified
            }
            _ => WorkspaceChangeType::None,
        }
    }
}
