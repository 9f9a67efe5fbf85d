mod common;

use assert_fs::TempDir;
use common::command::{
    commit_file, committed_repository_dir, get_branch_commit_sha, get_head_commit_sha,
    log_commit_ids, run_gitlet_command,
};
use common::file::write;
use common::read_working_file;
use rstest::{fixture, rstest};

/// `dev` adds `g.txt` on top of `master`; `master` is checked out
#[fixture]
fn diverged_repository_dir(committed_repository_dir: TempDir) -> TempDir {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "dev"]).assert().success();
    run_gitlet_command(dir, &["checkout", "dev"]).assert().success();
    commit_file(dir, "g.txt", "from dev\n", "add g");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    committed_repository_dir
}

#[rstest]
fn checkout_file_restores_the_head_version(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    write(dir, "f.txt", "scribbles\n");

    run_gitlet_command(dir, &["checkout", "--", "f.txt"])
        .assert()
        .success();

    assert_eq!(read_working_file(dir, "f.txt").as_deref(), Some("hello\n"));
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let first = get_head_commit_sha(dir)?;
    commit_file(dir, "f.txt", "second\n", "c2");

    run_gitlet_command(dir, &["checkout", &first[..8], "--", "f.txt"])
        .assert()
        .success();

    assert_eq!(read_working_file(dir, "f.txt").as_deref(), Some("hello\n"));
    // the index still holds the HEAD version
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("f.txt (modified)\n"));

    Ok(())
}

#[rstest]
fn checkout_file_from_an_unknown_commit_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(
        committed_repository_dir.path(),
        &["checkout", "0123456789abcdef", "--", "f.txt"],
    )
    .assert()
    .failure()
    .stderr("No commit with that id exists.\n");
}

#[rstest]
fn checkout_file_missing_from_the_commit_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .failure()
        .stderr("File does not exist in that commit.\n");
}

#[rstest]
fn checkout_branch_swaps_the_working_files(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir.path();
    assert_eq!(read_working_file(dir, "g.txt"), None);
    assert_eq!(read_working_file(dir, "f.txt").as_deref(), Some("hello\n"));

    run_gitlet_command(dir, &["checkout", "dev"]).assert().success();

    assert_eq!(read_working_file(dir, "g.txt").as_deref(), Some("from dev\n"));
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::starts_with("=== Branches ===\n*dev\nmaster\n\n"));
}

#[rstest]
fn checkout_of_the_active_branch_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr("No need to checkout the current branch.\n");
}

#[rstest]
fn checkout_of_a_missing_branch_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "nope"])
        .assert()
        .failure()
        .stderr("A branch with that name does not exist.\n");
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_untracked_files(diverged_repository_dir: TempDir) {
    let dir = diverged_repository_dir.path();
    write(dir, "g.txt", "mine\n");

    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .failure()
        .stderr("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_working_file(dir, "g.txt").as_deref(), Some("mine\n"));
    assert_eq!(
        std::fs::read_to_string(dir.join(".gitlet").join("branch"))
            .expect("Failed to read active branch")
            .trim(),
        "master"
    );
}

#[rstest]
fn checkout_branch_keeps_untracked_files_where_a_file_would_go(
    diverged_repository_dir: TempDir,
) {
    let dir = diverged_repository_dir.path();
    write(dir, "g.txt/precious.txt", "mine\n");

    run_gitlet_command(dir, &["checkout", "dev"])
        .assert()
        .failure()
        .stderr("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(
        read_working_file(dir, "g.txt/precious.txt").as_deref(),
        Some("mine\n")
    );
}

#[rstest]
fn checkout_without_operands_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr("Incorrect operands.\n");
}

#[rstest]
fn reset_moves_the_branch_and_the_working_files(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let first = get_head_commit_sha(dir)?;
    commit_file(dir, "f.txt", "second\n", "c2");
    commit_file(dir, "g.txt", "g\n", "c3");

    run_gitlet_command(dir, &["reset", &first]).assert().success();

    assert_eq!(read_working_file(dir, "f.txt").as_deref(), Some("hello\n"));
    assert_eq!(read_working_file(dir, "g.txt"), None);
    assert_eq!(get_branch_commit_sha(dir, "master")?, first);
    assert_eq!(log_commit_ids(dir)?.len(), 2);

    Ok(())
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let master = get_head_commit_sha(dir)?;
    let dev = get_branch_commit_sha(dir, "dev")?;
    write(dir, "g.txt", "mine\n");

    run_gitlet_command(dir, &["reset", &dev])
        .assert()
        .failure()
        .stderr("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(get_head_commit_sha(dir)?, master);
    Ok(())
}

#[rstest]
fn reset_to_an_unknown_commit_fails(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["reset", "deadbeef"])
        .assert()
        .failure()
        .stderr("No commit with that id exists.\n");
}

#[rstest]
fn reset_keeps_untracked_files_where_a_file_would_go(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let master = get_head_commit_sha(dir)?;
    let dev = get_branch_commit_sha(dir, "dev")?;
    write(dir, "g.txt/precious.txt", "mine\n");

    run_gitlet_command(dir, &["reset", &dev])
        .assert()
        .failure()
        .stderr("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(get_head_commit_sha(dir)?, master);
    assert_eq!(
        read_working_file(dir, "g.txt/precious.txt").as_deref(),
        Some("mine\n")
    );
    Ok(())
}
