//! Stored object types
//!
//! Two kinds of objects are persisted under `.gitlet`:
//!
//! - **Blob**: File content (raw bytes), named by the digest of that content
//! - **Commit**: Parents, timestamp, message and the full snapshot it records
//!
//! Snapshots (`Tree`) are not stored on their own; they are embedded in
//! commits and in the working index.
//!
//! Both object kinds share the framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form printed in merge logs
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
