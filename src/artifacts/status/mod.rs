//! Working tree status inspection
//!
//! Compares the working directory against the index, and the index against
//! the HEAD snapshot.
//!
//! ## Components
//!
//! - `file_change`: Enum types for categorizing changes
//! - `inspector`: Digests of working files and the comparisons built on them
//! - `status_report`: The partitions reported by `status` and their rendering

pub mod file_change;
pub mod inspector;
pub mod status_report;
