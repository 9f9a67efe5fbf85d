//! On-disk areas of a repository
//!
//! - `database`: Append-only store for blobs and commits
//! - `index`: The persisted working index (staging area)
//! - `refs`: HEAD, the active branch, branch and remote files
//! - `repository`: The aggregate that loads, operates on and saves them all
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
