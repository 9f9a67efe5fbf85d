use assert_fs::TempDir;
use assert_fs::prelude::*;
use gitlet::artifacts::objects::object_id::ObjectId;
use gitlet::{Repository, RepositoryError};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

#[fixture]
fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn init(dir: &TempDir) -> gitlet::Result<Repository> {
    let mut repository = Repository::open(dir.path())?;
    repository.init()?;

    Ok(repository)
}

fn commit_file(
    repository: &mut Repository,
    dir: &TempDir,
    name: &str,
    content: &str,
    message: &str,
) -> gitlet::Result<ObjectId> {
    std::fs::write(dir.path().join(name), content)?;
    repository.add(&[name])?;

    repository.commit(message)
}

#[rstest]
fn first_commit_tracks_the_added_file(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    commit_file(&mut repository, &repository_dir, "f", "hello", "c1")?;

    let head = repository.head_commit()?;
    assert_eq!(head.snapshot().len(), 1);
    assert_eq!(
        head.snapshot().get(Path::new("f")),
        Some(&ObjectId::digest(b"hello"))
    );
    assert_eq!(repository.log()?.len(), 2);

    Ok(())
}

#[rstest]
fn state_survives_reopening(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    let c1 = commit_file(&mut repository, &repository_dir, "f", "hello", "c1")?;
    repository.new_branch("dev")?;
    drop(repository);

    let reopened = Repository::open(repository_dir.path())?;
    let branches = reopened.branches()?;

    assert_eq!(branches.active().to_string(), "master");
    assert_eq!(branches.head(), &c1);
    assert_eq!(reopened.index().tree(), reopened.head_commit()?.snapshot());
    assert_eq!(reopened.find("c1")?, vec![&c1]);

    Ok(())
}

#[rstest]
#[case("ends with a newline\n")]
#[case("ends with crlf\r\n")]
fn messages_survive_reopening_verbatim(
    repository_dir: TempDir,
    #[case] message: &str,
) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    let oid = commit_file(&mut repository, &repository_dir, "f", "hello", message)?;
    drop(repository);

    let reopened = Repository::open(repository_dir.path())?;

    assert_eq!(reopened.head_commit()?.message(), message);
    assert_eq!(reopened.find(message)?, vec![&oid]);
    Ok(())
}

#[rstest]
fn remote_names_cannot_leave_the_remote_directory(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;

    assert!(matches!(
        repository.add_remote("../branch", "elsewhere"),
        Err(RepositoryError::InvalidRemoteName(_))
    ));
    assert_eq!(repository.branches()?.active().to_string(), "master");
    Ok(())
}

#[rstest]
fn initial_commit_is_shared_by_every_repository(
    repository_dir: TempDir,
    #[from(repository_dir)] other_dir: TempDir,
) -> gitlet::Result<()> {
    let first = init(&repository_dir)?;
    let second = init(&other_dir)?;

    assert_eq!(first.head_commit()?.oid(), second.head_commit()?.oid());
    Ok(())
}

#[rstest]
fn merge_keeps_the_only_changed_side(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    commit_file(&mut repository, &repository_dir, "f", "hello", "c1")?;
    repository.new_branch("b")?;
    commit_file(&mut repository, &repository_dir, "f", "world", "c2")?;
    repository.checkout_branch("b")?;
    commit_file(&mut repository, &repository_dir, "g", "other", "c3")?;
    repository.checkout_branch("master")?;

    let conflicted = repository.merge("b")?;

    assert!(!conflicted);
    let head = repository.head_commit()?;
    assert!(head.is_merge());
    assert_eq!(head.message(), "Merged b into master.");
    assert_eq!(
        head.snapshot().get(Path::new("f")),
        Some(&ObjectId::digest(b"world"))
    );
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("g"))?,
        "other"
    );

    Ok(())
}

#[rstest]
fn fast_forward_is_reported_after_saving(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    commit_file(&mut repository, &repository_dir, "f", "hello", "c1")?;
    repository.new_branch("b")?;
    repository.checkout_branch("b")?;
    let tip = commit_file(&mut repository, &repository_dir, "f", "world", "c2")?;
    repository.checkout_branch("master")?;

    assert!(matches!(
        repository.merge("b"),
        Err(RepositoryError::FastForwarded)
    ));

    let reopened = Repository::open(repository_dir.path())?;
    assert_eq!(reopened.branches()?.head(), &tip);
    assert!(!reopened.head_commit()?.is_merge());

    Ok(())
}

#[rstest]
fn failed_checkout_changes_nothing(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = init(&repository_dir)?;
    commit_file(&mut repository, &repository_dir, "f", "hello", "c1")?;
    repository.new_branch("b")?;
    repository.checkout_branch("b")?;
    commit_file(&mut repository, &repository_dir, "g", "tracked on b", "c2")?;
    repository.checkout_branch("master")?;
    std::fs::write(repository_dir.path().join("g"), "untracked")?;

    assert!(matches!(
        repository.checkout_branch("b"),
        Err(RepositoryError::UntrackedFileConflict)
    ));

    assert_eq!(repository.branches()?.active().to_string(), "master");
    assert!(!repository.index().tree().contains(Path::new("g")));
    repository_dir.child("g").assert("untracked");

    Ok(())
}

#[rstest]
fn operations_need_an_initialized_repository(repository_dir: TempDir) -> gitlet::Result<()> {
    let mut repository = Repository::open(repository_dir.path())?;

    assert!(!repository.is_initialized());
    assert!(matches!(
        repository.commit("nothing"),
        Err(RepositoryError::NotInitialized)
    ));
    assert!(matches!(
        repository.status(),
        Err(RepositoryError::NotInitialized)
    ));

    Ok(())
}
