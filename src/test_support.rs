//! Throwaway git repositories for unit tests.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Temporary repository driven through the `git` command line.
pub(crate) struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Initializes an empty repository on branch `main` with a test identity.
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("Should create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Runs git in the repository and returns trimmed stdout.
    pub(crate) fn git(&self, args: &[&str]) -> String {
        self.git_with_env(args, &[])
    }

    fn git_with_env(&self, args: &[&str], env: &[(&str, String)]) -> String {
        let mut command = Command::new("git");
        command.args(args).current_dir(self.path());
        for (key, value) in env {
            command.env(key, value);
        }
        let output = command.output().expect("Should run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Writes a file, creating parent directories.
    pub(crate) fn write(&self, path: &str, content: &str) {
        self.write_bytes(path, content.as_bytes());
    }

    pub(crate) fn write_bytes(&self, path: &str, content: &[u8]) {
        let file_path = self.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Should create parent directories");
        }
        std::fs::write(file_path, content).expect("Should write file");
    }

    /// Stages everything and commits; returns the commit id.
    pub(crate) fn commit(&self, message: &str) -> String {
        self.commit_at(message, 1_600_000_000)
    }

    /// Stages everything and commits with a fixed author and committer date.
    pub(crate) fn commit_at(&self, message: &str, seconds: i64) -> String {
        self.git(&["add", "-A"]);
        let date = format!("{} +0000", seconds);
        self.git_with_env(
            &["commit", "-q", "--allow-empty", "-m", message],
            &[
                ("GIT_AUTHOR_DATE", date.clone()),
                ("GIT_COMMITTER_DATE", date),
            ],
        );
        self.git(&["rev-parse", "HEAD"])
    }
}
