//! Static site generator for Git repositories.
//!
//! Reads `HEAD` of a repository and writes a hyperlinked HTML site: a
//! summary page, a paginated first-parent log, one diff page per commit and
//! a browsable tree with highlighted sources.

mod assets;
pub mod components;
mod config;
mod context;
mod diff;
mod error;
mod filetype;
mod git;
mod highlight;
mod history;
mod markdown;
mod output;
pub mod pages;
mod render;
mod site;
mod tree;
mod util;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use context::{LinkListElem, SiteContext};
pub use diff::{Change, ChangeKind, Side, commit_patch, has_changes, highlight_diff_lines, tree_changes};
pub use error::{Error, Result};
pub use filetype::{is_binary, is_image_file, is_markdown};
pub use git::{CommitNode, EntryType, FileMode, RefEntry, Repo, TreeEntry};
pub use highlight::Highlighter;
pub use history::{Contributor, PathHistoryResolver, commit_log, contributors};
pub use markdown::{AssetLinkResolver, MarkdownRenderer};
pub use output::validate_destination;
pub use pages::MaudRenderer;
pub use render::{
    CommitListElem, CommitRenderData, FileListElem, FileRenderData, FileView, GlobalData,
    IndexRenderData, LogRenderData, PageRenderer, RefKind, RefListElem, RefsRenderData,
    TreeRenderData,
};
pub use site::{SiteEmitter, SiteSummary, generate, generate_with};
pub use tree::{FlatTreeItem, flatten_tree};
pub use util::{Timestamp, repo_name_from_path};
