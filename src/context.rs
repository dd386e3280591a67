//! Per-run site context.
//!
//! Built once from the configuration and the repository, then passed by
//! reference to everything that needs to produce a link or a path.

use std::path::{Path, PathBuf};

/// Default summary length limit for log entries.
pub const DEFAULT_SUMMARY_LEN: usize = 20;

/// Default number of commits per log page.
pub const DEFAULT_LOG_PAGE_SIZE: usize = 100;

/// Named site-wide link shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkListElem {
    pub name: String,
    pub link: String,
}

/// Explicit context for one generation run.
#[derive(Debug, Clone)]
pub struct SiteContext {
    repo_name: String,
    branch_name: String,
    site_root: PathBuf,
    install_dir: PathBuf,
    max_summary_len: usize,
    log_page_size: usize,
    theme: String,
}

impl SiteContext {
    /// Creates a context writing into `<dest_dir>/<repo_name>`.
    pub fn new(repo_name: impl Into<String>, branch_name: impl Into<String>, dest_dir: &Path) -> Self {
        let repo_name = repo_name.into();
        let site_root = dest_dir.join(&repo_name);
        Self {
            repo_name,
            branch_name: branch_name.into(),
            site_root,
            install_dir: PathBuf::from("."),
            max_summary_len: DEFAULT_SUMMARY_LEN,
            log_page_size: DEFAULT_LOG_PAGE_SIZE,
            theme: "InspiredGitHub".to_string(),
        }
    }

    pub fn with_install_dir(mut self, install_dir: impl Into<PathBuf>) -> Self {
        self.install_dir = install_dir.into();
        self
    }

    pub fn with_max_summary_len(mut self, len: usize) -> Self {
        self.max_summary_len = len;
        self
    }

    pub fn with_log_page_size(mut self, size: usize) -> Self {
        self.log_page_size = size.max(1);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// Output directory for this repository: `<dest>/<repoName>`.
    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Directory holding optional static asset overrides.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn max_summary_len(&self) -> usize {
        self.max_summary_len
    }

    pub fn log_page_size(&self) -> usize {
        self.log_page_size
    }

    /// Syntect theme used for the highlighting stylesheet.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Absolute site link for a path relative to the repository root.
    pub fn link(&self, relative: &str) -> String {
        format!("/{}/{}", self.repo_name, relative)
    }

    /// Link to a tree node: `tree/<path>.html` for files and
    /// `tree/<path>/index.html` for directories. The empty path is the root.
    pub fn tree_link(&self, path: &str, is_file: bool) -> String {
        if path.is_empty() {
            self.link("tree/index.html")
        } else if is_file {
            self.link(&format!("tree/{}.html", path))
        } else {
            self.link(&format!("tree/{}/index.html", path))
        }
    }

    /// Commit detail link, keyed by the commit's tree id.
    pub fn commit_link(&self, tree_id: &str) -> String {
        self.link(&format!("commit/{}.html", tree_id))
    }

    /// Log page link; page 1 is the branch log's `index.html`.
    pub fn log_link(&self, page: usize) -> String {
        self.link(&format!("log/{}/{}", self.branch_name, log_page_file(page)))
    }

    pub fn asset_link(&self, name: &str) -> String {
        self.link(&format!("assets/{}", name))
    }

    /// Site-wide header links.
    pub fn links(&self) -> Vec<LinkListElem> {
        [
            ("summary", self.link("index.html")),
            ("tree", self.tree_link("", false)),
            ("log", self.log_link(1)),
            ("branches", self.link("branches.html")),
            ("tags", self.link("tags.html")),
        ]
        .into_iter()
        .map(|(name, link)| LinkListElem {
            name: name.to_string(),
            link,
        })
        .collect()
    }

    /// Truncates a summary to the configured limit with a trailing `...`.
    pub fn truncate_summary(&self, summary: &str) -> String {
        truncate_summary(summary, self.max_summary_len)
    }
}

/// File name of a log page.
pub fn log_page_file(page: usize) -> String {
    if page <= 1 {
        "index.html".to_string()
    } else {
        format!("page-{}.html", page)
    }
}

/// Keeps `summary` when it fits in `max` characters; otherwise returns its
/// first `max - 3` characters followed by `...`.
pub fn truncate_summary(summary: &str, max: usize) -> String {
    if summary.chars().count() <= max {
        return summary.to_string();
    }
    let kept: String = summary.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
