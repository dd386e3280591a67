//! Render-data records and the page rendering contract.
//!
//! The emitter builds one record per page and hands it to a [`PageRenderer`].
//! Every record carries the [`GlobalData`] shared by all pages; HTML fields
//! (`lines`, `rendered`, `diff_lines`) are already escaped or highlighted.

use crate::context::LinkListElem;
use crate::error::Result;
use crate::history::Contributor;
use crate::tree::FlatTreeItem;
use crate::util::Timestamp;

/// Site-wide values available to every page.
#[derive(Debug, Clone)]
pub struct GlobalData {
    pub repo_name: String,
    pub branch_name: String,
    pub links: Vec<LinkListElem>,
    pub commit_count: usize,
    pub branch_count: usize,
    pub tag_count: usize,
    /// Absolute links of the stylesheets every page includes.
    pub stylesheets: Vec<String>,
    pub script: String,
}

/// Commit as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitListElem {
    /// Detail page link, keyed by tree id.
    pub link: String,
    pub summary: String,
    pub author: String,
    pub date: Timestamp,
    /// First 8 characters of the tree id.
    pub abbrev_hash: String,
}

/// Row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListElem {
    /// Entry name; directories end with `/`.
    pub name: String,
    pub link: String,
    pub is_file: bool,
    pub mode: String,
    pub size: u64,
    pub last_modified: Option<Timestamp>,
    pub last_commit_summary: String,
    pub last_commit_link: Option<String>,
}

/// Kind of a listed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Branch,
    Tag,
}

impl RefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
        }
    }
}

/// Row of the branches or tags page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefListElem {
    pub name: String,
    pub kind: RefKind,
    pub commit_hash: String,
    /// Set only for the branch whose log is generated.
    pub log_link: Option<String>,
}

/// Contents of one file prepared for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileView {
    pub name: String,
    pub path: String,
    pub size: u64,
    /// Highlighted HTML, one entry per source line; empty for binary files.
    pub lines: Vec<String>,
    /// Rendered markdown HTML for markdown files.
    pub rendered: Option<String>,
    pub is_binary: bool,
    /// Asset link when the file is an image.
    pub image_link: Option<String>,
}

pub struct IndexRenderData<'a> {
    pub global: &'a GlobalData,
    pub latest_commit: Option<CommitListElem>,
    pub readme: Option<FileView>,
    pub license: Option<FileView>,
    pub files: Vec<FileListElem>,
    pub contributors: Vec<Contributor>,
}

impl IndexRenderData<'_> {
    pub fn readme_found(&self) -> bool {
        self.readme.is_some()
    }

    pub fn license_found(&self) -> bool {
        self.license.is_some()
    }
}

pub struct LogRenderData<'a> {
    pub global: &'a GlobalData,
    pub commits: &'a [CommitListElem],
    /// 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

pub struct CommitRenderData<'a> {
    pub global: &'a GlobalData,
    /// Tree id the page is keyed by.
    pub id: String,
    pub commit_id: String,
    pub author: String,
    pub email: String,
    pub date: Timestamp,
    /// Parent detail pages; `name` is the abbreviated parent tree id.
    pub parents: Vec<LinkListElem>,
    pub message_lines: Vec<String>,
    pub diff_lines: Vec<String>,
}

impl CommitRenderData<'_> {
    pub fn has_any_parents(&self) -> bool {
        !self.parents.is_empty()
    }
}

pub struct TreeRenderData<'a> {
    pub global: &'a GlobalData,
    pub nav: &'a [FlatTreeItem],
    /// Directory path relative to the repository root; empty at the root.
    pub path: String,
    pub parent_link: Option<String>,
    pub files: Vec<FileListElem>,
    pub latest_commit: Option<CommitListElem>,
}

pub struct FileRenderData<'a> {
    pub global: &'a GlobalData,
    pub nav: &'a [FlatTreeItem],
    pub file: FileView,
    pub last_commit: Option<CommitListElem>,
    /// Link of the containing directory's index page.
    pub parent_link: String,
}

pub struct RefsRenderData<'a> {
    pub global: &'a GlobalData,
    pub kind: RefKind,
    pub refs: Vec<RefListElem>,
}

/// Turns render-data records into page bytes.
///
/// One method per named template. Implementations must be deterministic:
/// identical records produce identical output.
pub trait PageRenderer {
    fn index(&self, data: &IndexRenderData<'_>) -> Result<String>;
    fn log(&self, data: &LogRenderData<'_>) -> Result<String>;
    fn commit(&self, data: &CommitRenderData<'_>) -> Result<String>;
    fn tree(&self, data: &TreeRenderData<'_>) -> Result<String>;
    fn file(&self, data: &FileRenderData<'_>) -> Result<String>;
    fn refs(&self, data: &RefsRenderData<'_>) -> Result<String>;
}
