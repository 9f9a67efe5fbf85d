//! Materialising a snapshot into the working directory
//!
//! Used by checkout, reset and fast-forward merges. The whole change is
//! planned first; conflicts with untracked files and missing blobs are
//! detected before the working directory is touched.

pub mod migration;
