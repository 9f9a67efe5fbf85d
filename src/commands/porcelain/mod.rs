//! Porcelain commands (user-facing gitlet operations)
//!
//! Each file adds one group of operations to [`Repository`]. Every operation
//! checks that the repository is initialized and validates its preconditions
//! before it writes anything; mutating operations end by saving the state.
//!
//! ## Commands
//!
//! - `init`: Create the repository with its root commit
//! - `add`: Stage files for commit
//! - `commit`: Record the working index as a new commit
//! - `rm`: Unstage a file or stage its removal
//! - `log`: History of the active branch, every commit, or search by message
//! - `status`: Branches, staged, removed, modified and untracked files
//! - `checkout`: Switch branches or restore files
//! - `branch`: Create or delete branches
//! - `reset`: Move the active branch to any commit
//! - `merge`: Three-way merge of another branch
//! - `remote`: Manage remotes
//!
//! [`Repository`]: crate::areas::repository::Repository

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
