//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::context::{DEFAULT_LOG_PAGE_SIZE, DEFAULT_SUMMARY_LEN};
use crate::util::repo_name_from_path;

/// Command line configuration for gitpage.
#[derive(Debug, Clone, Parser)]
#[command(name = "gitpage", version, about, long_about = None)]
pub struct Config {
    /// Repository path
    #[arg(default_value = ".")]
    pub repo: PathBuf,

    /// Destination directory; the site is written to <destdir>/<repo name>
    #[arg(short, long, default_value = "build")]
    pub destdir: PathBuf,

    /// Directory whose static/ folder overrides the bundled assets
    #[arg(long, default_value = ".")]
    pub installdir: PathBuf,

    /// Clear a non-empty destination instead of failing
    #[arg(long)]
    pub force: bool,

    /// Maximum commit summary length in listings
    #[arg(long, default_value_t = DEFAULT_SUMMARY_LEN)]
    pub summary_len: usize,

    /// Commits per log page
    #[arg(long, default_value_t = DEFAULT_LOG_PAGE_SIZE)]
    pub log_page_size: usize,

    /// Syntax highlighting theme (InspiredGitHub, base16-ocean.light, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the repository path does not exist, the summary
    /// length leaves no room for the `...` suffix, or the page size is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.repo.exists() {
            bail!("Repository path does not exist: {}", self.repo.display());
        }
        if self.summary_len < 4 {
            bail!("Summary length must be at least 4, got {}", self.summary_len);
        }
        if self.log_page_size == 0 {
            bail!("Log page size must be at least 1");
        }

        Ok(())
    }

    /// Returns the site name derived from the repository path.
    pub fn project_name(&self) -> String {
        repo_name_from_path(&self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::try_parse_from(["gitpage"]).expect("defaults should parse")
    }

    #[test]
    fn test_config_defaults() {
        // Arrange & Act
        let config = config();

        // Assert
        assert_eq!(config.repo, PathBuf::from("."));
        assert_eq!(config.destdir, PathBuf::from("build"));
        assert_eq!(config.installdir, PathBuf::from("."));
        assert!(!config.force);
        assert_eq!(config.summary_len, 20);
        assert_eq!(config.log_page_size, 100);
        assert_eq!(config.theme, "InspiredGitHub");
    }

    #[test]
    fn test_config_parses_flags() {
        // Act
        let config = Config::try_parse_from([
            "gitpage",
            "/srv/git/project.git",
            "-d",
            "out",
            "--force",
            "--summary-len",
            "40",
            "--log-page-size",
            "25",
        ])
        .expect("Should parse flags");

        // Assert
        assert_eq!(config.repo, PathBuf::from("/srv/git/project.git"));
        assert_eq!(config.destdir, PathBuf::from("out"));
        assert!(config.force);
        assert_eq!(config.summary_len, 40);
        assert_eq!(config.log_page_size, 25);
    }

    #[test]
    fn test_validate_existing_path() {
        // Act
        let result = config().validate();

        // Assert
        assert!(result.is_ok(), "Current directory should be valid");
    }

    #[test]
    fn test_validate_rejects_missing_repo() {
        // Arrange
        let mut config = config();
        config.repo = PathBuf::from("/definitely/not/here");

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_short_summary_and_empty_pages() {
        // Arrange
        let mut short = config();
        short.summary_len = 3;
        let mut empty = config();
        empty.log_page_size = 0;

        // Act & Assert
        assert!(short.validate().is_err());
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_project_name_strips_git_suffix() {
        // Arrange
        let mut config = config();
        config.repo = PathBuf::from("/srv/git/project.git");

        // Act & Assert
        assert_eq!(config.project_name(), "project");
    }
}
