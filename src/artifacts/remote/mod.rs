//! Remotes: named aliases for other repositories on the local filesystem

pub mod remote_table;
