//! Commit history
//!
//! - `commit_graph`: every commit of the repository, keyed by id
//! - `log_entry`: how a single commit is printed
//! - `rev_list`: breadth-first and first-parent traversals over the graph

pub mod commit_graph;
pub mod log_entry;
pub mod rev_list;
