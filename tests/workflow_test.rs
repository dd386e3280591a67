//! Workflow tests: destination handling, reruns and failure modes.

mod common;

use anyhow::Result;
use common::{config, create_test_repo, git, git_add, git_commit, site_root, snapshot, write_file};
use gitpage::Error;
use std::fs;

fn simple_repo() -> Result<tempfile::TempDir> {
    let repo = create_test_repo()?;
    write_file(repo.path(), "README.md", "# Demo\n")?;
    write_file(repo.path(), "src/main.rs", "fn main() {}\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "Initial")?;
    Ok(repo)
}

/// Tests two runs over the same repository produce identical trees.
#[test]
fn test_generation_is_idempotent() -> Result<()> {
    // Arrange
    let repo = simple_repo()?;
    let dest = tempfile::TempDir::new()?;
    let mut config = config(repo.path(), dest.path());
    config.force = true;
    let root = site_root(repo.path(), dest.path());

    // Act
    gitpage::generate(&config)?;
    let first = snapshot(&root)?;
    gitpage::generate(&config)?;
    let second = snapshot(&root)?;

    // Assert
    assert!(!first.is_empty());
    assert_eq!(first, second);

    Ok(())
}

/// Tests a non-empty destination is refused without force.
#[test]
fn test_non_empty_destination_rejected() -> Result<()> {
    // Arrange
    let repo = simple_repo()?;
    let dest = tempfile::TempDir::new()?;
    let config = config(repo.path(), dest.path());
    gitpage::generate(&config)?;

    // Act
    let result = gitpage::generate(&config);

    // Assert
    assert!(matches!(result, Err(Error::DestinationNotEmpty(_))));

    Ok(())
}

/// Tests force removes stale output from an earlier run.
#[test]
fn test_force_removes_stale_pages() -> Result<()> {
    // Arrange
    let repo = simple_repo()?;
    let dest = tempfile::TempDir::new()?;
    let mut config = config(repo.path(), dest.path());
    let root = site_root(repo.path(), dest.path());
    fs::create_dir_all(&root)?;
    fs::write(root.join("stale.html"), "stale")?;
    config.force = true;

    // Act
    gitpage::generate(&config)?;

    // Assert
    assert!(!root.join("stale.html").exists());
    assert!(root.join("index.html").is_file());

    Ok(())
}

/// Tests commits with identical trees share one commit page.
#[test]
fn test_reverted_commit_shares_page() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "f.txt", "one\n")?;
    git_add(repo.path(), &["f.txt"])?;
    git_commit(repo.path(), "One")?;
    write_file(repo.path(), "f.txt", "two\n")?;
    git_add(repo.path(), &["f.txt"])?;
    git_commit(repo.path(), "Two")?;
    git(repo.path(), &["revert", "--no-edit", "HEAD"])?;
    let tree = git(repo.path(), &["rev-parse", "HEAD^{tree}"])?;
    let dest = tempfile::TempDir::new()?;

    // Act
    let summary = gitpage::generate(&config(repo.path(), dest.path()))?;

    // Assert
    assert_eq!(summary.commits, 3);
    assert_eq!(summary.commit_pages, 2);
    let page = fs::read_to_string(
        site_root(repo.path(), dest.path()).join(format!("commit/{}.html", tree)),
    )?;
    assert!(page.contains("One"), "oldest commit owns the shared page");
    assert!(!page.contains("Revert"));

    Ok(())
}

/// Tests a submodule entry aborts the run.
#[test]
fn test_submodule_is_fatal() -> Result<()> {
    // Arrange
    let repo = simple_repo()?;
    let head = git(repo.path(), &["rev-parse", "HEAD"])?;
    git(
        repo.path(),
        &["update-index", "--add", "--cacheinfo", &format!("160000,{},vendor", head)],
    )?;
    git_commit(repo.path(), "Add submodule")?;
    let dest = tempfile::TempDir::new()?;

    // Act
    let result = gitpage::generate(&config(repo.path(), dest.path()));

    // Assert
    assert!(matches!(result, Err(Error::UnsupportedContent(_))));

    Ok(())
}

/// Tests a path that is not a repository fails with a repository error.
#[test]
fn test_missing_repository() -> Result<()> {
    // Arrange
    let not_repo = tempfile::TempDir::new()?;
    let dest = tempfile::TempDir::new()?;

    // Act
    let result = gitpage::generate(&config(not_repo.path(), dest.path()));

    // Assert
    assert!(matches!(result, Err(Error::RepositoryAccess { .. })));

    Ok(())
}
