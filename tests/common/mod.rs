#![allow(dead_code)]

pub mod command;
pub mod file;

/// Contents of a working file, or `None` if it does not exist
pub fn read_working_file(dir: &std::path::Path, name: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(name)).ok()
}
