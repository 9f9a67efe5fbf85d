//! Repository aggregate
//!
//! Owns every store of one working directory and the in-memory state loaded
//! from them: the commit graph, the branch table, the working index and the
//! remotes. The lifecycle is `open → operate* → save`; each mutating
//! operation validates all of its preconditions before it changes anything
//! and saves once at the end.
//!
//! A directory without `.gitlet` opens as an uninitialized repository, in
//! which only `init` succeeds.

use crate::areas::database::Database;
use crate::areas::index::{INDEX_FILE, Index};
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::remote::remote_table::RemoteTable;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::path::Path;

pub const METADATA_DIR: &str = ".gitlet";

#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    index: Index,
    graph: CommitGraph,
    /// `None` until the repository is initialized
    branches: Option<BranchTable>,
    remotes: RemoteTable,
}

impl Repository {
    /// Open the repository rooted at `path`, loading any persisted state
    pub fn open(path: impl AsRef<Path>) -> crate::errors::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let metadata_path = path.join(METADATA_DIR);

        let mut repository = Repository {
            database: Database::new(&metadata_path),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(metadata_path.clone().into_boxed_path()),
            index: Index::new(metadata_path.join(INDEX_FILE).into_boxed_path()),
            graph: CommitGraph::new(),
            branches: None,
            remotes: RemoteTable::default(),
            path: path.into_boxed_path(),
        };

        if metadata_path.is_dir() {
            repository.load()?;
        }

        Ok(repository)
    }

    fn load(&mut self) -> crate::errors::Result<()> {
        self.graph = CommitGraph::load(&self.database)?;

        let active = self
            .refs
            .read_active_branch()?
            .ok_or_else(|| RepositoryError::Corrupt("no active branch recorded".to_string()))?;
        let branches = BranchTable::from_parts(self.refs.load_branches()?, active)?;

        for branch in branches.iter() {
            if !self.graph.contains(branch.head) {
                return Err(RepositoryError::Corrupt(format!(
                    "branch {} points to unknown commit {}",
                    branch.name, branch.head
                )));
            }
        }

        let head = self.refs.read_head()?;
        if head.as_ref() != Some(branches.head()) {
            tracing::warn!(
                active = %branches.active(),
                head = ?head,
                "HEAD does not match the active branch; using the branch tip"
            );
        }

        self.index.rehydrate()?;
        self.remotes = RemoteTable::new(self.refs.load_remotes()?);
        self.branches = Some(branches);

        Ok(())
    }

    /// Persist every part of the in-memory state that changed
    pub fn save(&mut self) -> crate::errors::Result<()> {
        let Some(branches) = &self.branches else {
            return Err(RepositoryError::NotInitialized);
        };

        self.graph.save(&self.database)?;
        self.refs.save_branches(branches.heads())?;
        self.refs.update_active_branch(branches.active())?;
        self.refs.update_head(branches.head())?;
        self.refs.save_remotes(self.remotes.iter())?;
        self.index.write_updates()?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> std::path::PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.branches.is_some()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut CommitGraph {
        &mut self.graph
    }

    pub fn branches(&self) -> crate::errors::Result<&BranchTable> {
        self.branches.as_ref().ok_or(RepositoryError::NotInitialized)
    }

    pub(crate) fn branches_mut(&mut self) -> crate::errors::Result<&mut BranchTable> {
        self.branches.as_mut().ok_or(RepositoryError::NotInitialized)
    }

    pub(crate) fn set_branches(&mut self, branches: BranchTable) {
        self.branches = Some(branches);
    }

    pub fn remotes(&self) -> crate::errors::Result<&RemoteTable> {
        self.branches()?;
        Ok(&self.remotes)
    }

    pub(crate) fn remotes_mut(&mut self) -> crate::errors::Result<&mut RemoteTable> {
        self.branches()?;
        Ok(&mut self.remotes)
    }

    /// The commit at the tip of the active branch
    pub fn head_commit(&self) -> crate::errors::Result<&Commit> {
        self.graph.get(self.branches()?.head())
    }
}
