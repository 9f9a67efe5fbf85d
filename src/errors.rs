//! Repository error taxonomy
//!
//! Every precondition failure of a repository operation maps to one variant
//! with a fixed, user-readable message. Operations validate before they write,
//! so any of these errors (except `FastForwarded`) implies that nothing was
//! persisted.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Unsupported file name: '{0}'.")]
    UnsupportedFileName(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NoChanges,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("Invalid branch name: '{0}'.")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveActiveBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Given branch is an ancestor of the current branch.")]
    AncestorMerge,

    /// Reported after the branch pointer has already been advanced.
    #[error("Current branch fast-forwarded.")]
    FastForwarded,

    #[error("A remote with that name does not exist.")]
    NoSuchRemote,

    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,

    #[error("Invalid remote name: '{0}'.")]
    InvalidRemoteName(String),

    #[error("Remote directory not found.")]
    RemoteUnreachable,

    #[error("Transferring commits to or from a remote is not supported.")]
    TransferUnsupported,

    #[error("Blob {0} is missing from the object store.")]
    MissingBlob(ObjectId),

    #[error("Corrupt repository: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<std::io::Error> for RepositoryError {
    fn from(error: std::io::Error) -> Self {
        RepositoryError::Storage(error.into())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
