use crate::common::file::write;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed commit date so that runs are reproducible
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository whose `master` holds one commit tracking `f.txt` = "hello\n"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write(init_repository_dir.path(), "f.txt", "hello\n");
    run_gitlet_command(init_repository_dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    gitlet_commit(init_repository_dir.path(), "c1")
        .assert()
        .success();

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GITLET_DATE", COMMIT_DATE)]);
    cmd.env_remove("GITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", "-m", message])
}

/// Stage `name` with `content` and commit it
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write(dir, name, content);
    run_gitlet_command(dir, &["add", name]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

/// Commit id HEAD points at
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))?;

    Ok(head_content.trim().to_string())
}

/// Commit id a branch points at
pub fn get_branch_commit_sha(
    dir: &Path,
    branch: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let branch_content =
        std::fs::read_to_string(dir.join(".gitlet").join("branches").join(branch))?;

    Ok(branch_content.trim().to_string())
}

/// Ids printed by `log`, newest first
pub fn log_commit_ids(dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = run_gitlet_command(dir, &["log"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect())
}
