//! Gitlet data structures and algorithms
//!
//! - `branch`: Branch names and the branch table
//! - `checkout`: Planning the move of the working directory to a snapshot
//! - `core`: Shared utilities (pager output)
//! - `index`: Binary format of the working index
//! - `log`: The commit graph, history traversal and log rendering
//! - `merge`: Merge base search and three-way resolution
//! - `objects`: Stored object types (blob, commit) and the snapshot tree
//! - `remote`: Remote name table
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod status;
