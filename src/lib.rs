//! A small, single-user version-control engine.
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: stores backed by the `.gitlet` directory and the working tree
//! - `artifacts`: in-memory data structures and the algorithms over them
//! - `commands`: user-facing operations, each implemented on `Repository`
//! - `errors`: the error taxonomy shared by every operation

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use errors::{RepositoryError, Result};
