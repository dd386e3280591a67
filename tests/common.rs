//! Shared test utilities for integration tests.
//!
//! Builds throwaway git repositories through the `git` command line and
//! points a generation run at them.

#![allow(dead_code)]

use anyhow::Result;
use gitpage::Config;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Creates temporary git repository on branch `main` with test identity.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    git(path, &["init", "-q"])?;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;

    Ok(dir)
}

/// Runs git in `repo_path` and returns trimmed stdout.
///
/// # Errors
///
/// Returns error if git cannot be started or exits unsuccessfully
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .env("GIT_AUTHOR_DATE", "1600000000 +0000")
        .env("GIT_COMMITTER_DATE", "1600000000 +0000")
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Stages files in repository.
///
/// # Errors
///
/// Returns error if git add fails
pub fn git_add(repo_path: &Path, files: &[&str]) -> Result<()> {
    let mut args = vec!["add"];
    args.extend_from_slice(files);
    git(repo_path, &args)?;
    Ok(())
}

/// Commits staged changes and returns commit hash.
///
/// # Errors
///
/// Returns error if commit fails or hash cannot be retrieved
pub fn git_commit(repo_path: &Path, message: &str) -> Result<String> {
    git(repo_path, &["commit", "-q", "--allow-empty", "-m", message])?;
    git(repo_path, &["rev-parse", "HEAD"])
}

/// Writes file to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(repo_path: &Path, path: &str, content: &str) -> Result<()> {
    write_bytes(repo_path, path, content.as_bytes())
}

/// Writes raw bytes to repository, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_bytes(repo_path: &Path, path: &str, content: &[u8]) -> Result<()> {
    let file_path = repo_path.join(path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Generation config writing into `dest` with default settings.
pub fn config(repo_path: &Path, dest: &Path) -> Config {
    Config {
        repo: repo_path.to_path_buf(),
        destdir: dest.to_path_buf(),
        installdir: dest.join("no-install-dir"),
        force: false,
        summary_len: 20,
        log_page_size: 100,
        theme: "InspiredGitHub".to_string(),
    }
}

/// Directory the site for `repo_path` is written to under `dest`.
pub fn site_root(repo_path: &Path, dest: &Path) -> PathBuf {
    dest.join(gitpage::repo_name_from_path(repo_path))
}

/// Reads every file below `root`, keyed by relative path.
///
/// # Errors
///
/// Returns error if any directory or file cannot be read
pub fn snapshot(root: &Path) -> Result<BTreeMap<PathBuf, Vec<u8>>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(root)?.to_path_buf();
                files.insert(relative, fs::read(&path)?);
            }
        }
    }

    Ok(files)
}
