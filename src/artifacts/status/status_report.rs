use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, path_key};
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStatus {
    pub name: String,
    pub active: bool,
}

/// Named partitions over the tracked and working files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Every branch, in name order
    pub branches: Vec<BranchStatus>,
    /// Indexed paths new or changed relative to HEAD
    pub staged: BTreeSet<PathBuf>,
    /// HEAD paths the index no longer tracks
    pub removed: BTreeSet<PathBuf>,
    /// Indexed paths whose working copy is modified or gone
    pub modified: BTreeMap<PathBuf, WorkspaceChangeType>,
    /// Working files the index does not track
    pub untracked: BTreeSet<PathBuf>,
}

impl StatusReport {
    pub fn new(
        branches: &BranchTable,
        head: &Tree,
        index: &Tree,
        workspace: &BTreeMap<PathBuf, ObjectId>,
    ) -> Self {
        let modified = index
            .iter()
            .filter_map(|(path, oid)| {
                match Inspector::check_index_against_workspace(Some(oid), workspace.get(path)) {
                    change @ (WorkspaceChangeType::Modified | WorkspaceChangeType::Deleted) => {
                        Some((path.to_path_buf(), change))
                    }
                    _ => None,
                }
            })
            .collect();

        let untracked = workspace
            .keys()
            .filter(|path| !index.contains(path))
            .cloned()
            .collect();

        StatusReport {
            branches: branches
                .iter()
                .map(|branch| BranchStatus {
                    name: branch.name.to_string(),
                    active: branch.active,
                })
                .collect(),
            staged: index.diff(head, true),
            removed: head.diff(index, false),
            modified,
            untracked,
        }
    }

    fn write_section(
        f: &mut fmt::Formatter<'_>,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> fmt::Result {
        writeln!(f, "{}", format!("=== {title} ===").bold())?;
        for line in lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch.active {
                    format!("*{}", branch.name.green())
                } else {
                    branch.name.clone()
                }
            }),
        )?;
        Self::write_section(
            f,
            "Staged Files",
            self.staged.iter().map(|path| path_key(path).green().to_string()),
        )?;
        Self::write_section(
            f,
            "Removed Files",
            self.removed.iter().map(|path| path_key(path).green().to_string()),
        )?;
        Self::write_section(
            f,
            "Modifications Not Staged For Commit",
            self.modified
                .iter()
                .map(|(path, change)| format!("{}{change}", path_key(path))),
        )?;
        Self::write_section(
            f,
            "Untracked Files",
            self.untracked.iter().map(|path| path_key(path).red().to_string()),
        )
    }
}
