//! Three-way merge
//!
//! - `merge_base`: the common ancestor that serves as the merge reference
//! - `resolution`: per-file classification of base, current and target
//! - `conflict`: the marker written for files changed differently on both sides

pub mod conflict;
pub mod merge_base;
pub mod resolution;
