//! Repository operations
//!
//! All user-facing operations live in `porcelain`, one file per command.

pub mod porcelain;
