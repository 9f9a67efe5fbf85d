mod common;

use assert_fs::TempDir;
use common::command::{committed_repository_dir, repository_dir, run_gitlet_command};
use rstest::rstest;

#[rstest]
fn add_remote_is_persisted(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_gitlet_command(dir, &["add-remote", "origin", "../other"])
        .assert()
        .success();

    let location =
        std::fs::read_to_string(dir.join(".gitlet").join("remotes").join("origin"))?;
    assert_eq!(location.trim(), "../other");

    run_gitlet_command(dir, &["add-remote", "origin", "../elsewhere"])
        .assert()
        .failure()
        .stderr("A remote with that name already exists.\n");

    Ok(())
}

#[rstest]
fn add_remote_rejects_names_outside_the_remote_directory(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_gitlet_command(dir, &["add-remote", "../branch", "elsewhere"])
        .assert()
        .failure()
        .stderr("Invalid remote name: '../branch'.\n");

    assert_eq!(
        std::fs::read_to_string(dir.join(".gitlet").join("branch"))?.trim(),
        "master"
    );
    assert_eq!(std::fs::read_dir(dir.join(".gitlet").join("remotes"))?.count(), 0);
    run_gitlet_command(dir, &["status"]).assert().success();

    Ok(())
}

#[rstest]
fn rm_remote_forgets_the_remote(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["add-remote", "origin", "../other"])
        .assert()
        .success();

    run_gitlet_command(dir, &["rm-remote", "origin"])
        .assert()
        .success();

    assert!(!dir.join(".gitlet").join("remotes").join("origin").exists());
    run_gitlet_command(dir, &["rm-remote", "origin"])
        .assert()
        .failure()
        .stderr("A remote with that name does not exist.\n");
}

#[rstest]
#[case("fetch")]
#[case("push")]
fn transfer_with_an_unknown_remote_fails(committed_repository_dir: TempDir, #[case] command: &str) {
    run_gitlet_command(committed_repository_dir.path(), &[command, "origin", "master"])
        .assert()
        .failure()
        .stderr("A remote with that name does not exist.\n");
}

#[rstest]
#[case("fetch")]
#[case("push")]
fn transfer_to_a_missing_directory_fails(
    committed_repository_dir: TempDir,
    #[case] command: &str,
) {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["add-remote", "origin", "no/such/repository"])
        .assert()
        .success();

    run_gitlet_command(dir, &[command, "origin", "master"])
        .assert()
        .failure()
        .stderr("Remote directory not found.\n");
}

#[rstest]
#[case("fetch")]
#[case("push")]
fn transfer_to_a_reachable_remote_is_unsupported(
    committed_repository_dir: TempDir,
    #[case] command: &str,
    #[from(repository_dir)] remote_dir: TempDir,
) {
    let remote = remote_dir.path();
    run_gitlet_command(remote, &["init"]).assert().success();

    let dir = committed_repository_dir.path();
    let location = remote.to_str().expect("temp dir path is valid UTF-8");
    run_gitlet_command(dir, &["add-remote", "origin", location])
        .assert()
        .success();

    run_gitlet_command(dir, &[command, "origin", "master"])
        .assert()
        .failure()
        .stderr("Transferring commits to or from a remote is not supported.\n");
}
