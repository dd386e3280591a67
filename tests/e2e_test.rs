//! End-to-end tests for the gitpage binary.

mod common;

use anyhow::Result;
use common::{create_test_repo, git_add, git_commit, site_root, write_file};
use std::process::Command;

/// Tests full binary execution generates the site.
#[test]
fn test_full_workflow_e2e() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README.md", "# Test\n")?;
    git_add(repo.path(), &["README.md"])?;
    git_commit(repo.path(), "Initial")?;
    let dest = tempfile::TempDir::new()?;

    // Act
    let output = Command::new(env!("CARGO_BIN_EXE_gitpage"))
        .arg(repo.path())
        .arg("--destdir")
        .arg(dest.path())
        .env("RUST_LOG", "warn")
        .output()?;

    // Assert
    assert!(
        output.status.success(),
        "gitpage failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let root = site_root(repo.path(), dest.path());
    assert!(root.join("index.html").is_file());
    assert!(root.join("log/main/index.html").is_file());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 commits"));

    Ok(())
}

/// Tests second run without force exits with an error.
#[test]
fn test_rerun_without_force_fails() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "a\n")?;
    git_add(repo.path(), &["a.txt"])?;
    git_commit(repo.path(), "Initial")?;
    let dest = tempfile::TempDir::new()?;
    let run = |force: bool| {
        let mut command = Command::new(env!("CARGO_BIN_EXE_gitpage"));
        command.arg(repo.path()).arg("-d").arg(dest.path());
        if force {
            command.arg("--force");
        }
        command.output()
    };

    // Act
    let first = run(false)?;
    let second = run(false)?;
    let forced = run(true)?;

    // Assert
    assert!(first.status.success());
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("not empty"));
    assert!(forced.status.success());

    Ok(())
}

/// Tests invalid options are rejected before generation.
#[test]
fn test_invalid_summary_len() -> Result<()> {
    // Act
    let output = Command::new(env!("CARGO_BIN_EXE_gitpage"))
        .args([".", "--summary-len", "2"])
        .output()?;

    // Assert
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Summary length"));

    Ok(())
}
