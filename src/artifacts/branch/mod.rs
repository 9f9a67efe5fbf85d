//! Branches: validated names and the table of named commit pointers

pub mod branch_name;
pub mod branch_table;

/// Names that would not survive as a single file under `.gitlet/branches`
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\.\.|/|\\|\.lock$|@\{|[\x00-\x20\*:\?\[~\^\x7f]";

pub const DEFAULT_BRANCH: &str = "master";
