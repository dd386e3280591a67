//! Site emission.
//!
//! A run moves through fixed stages against `<dest>/<repoName>`:
//! initialize, validate the destination, build navigation, then emit the
//! summary, the log and the tree. The first failure aborts the run and leaves
//! whatever was already written on disk.

use gix::ObjectId;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::assets::{self, SCRIPT_NAME};
use crate::config::Config;
use crate::context::{LinkListElem, SiteContext, log_page_file};
use crate::diff::{commit_patch, highlight_diff_lines};
use crate::error::{Error, Result};
use crate::filetype::{is_binary, is_image_file, is_markdown};
use crate::git::{CommitNode, RefEntry, Repo, TreeEntry};
use crate::highlight::Highlighter;
use crate::history::{PathHistoryResolver, commit_log, contributors};
use crate::markdown::MarkdownRenderer;
use crate::output::{make_dir, validate_destination, write_bytes, write_page};
use crate::pages::MaudRenderer;
use crate::render::{
    CommitListElem, CommitRenderData, FileListElem, FileRenderData, FileView, GlobalData,
    IndexRenderData, LogRenderData, PageRenderer, RefKind, RefListElem, RefsRenderData,
    TreeRenderData,
};
use crate::tree::{FlatTreeItem, flatten_tree, join_path, sorted_entries};
use crate::util::repo_name_from_path;

const README_NAMES: [&str; 2] = ["README", "README.md"];
const LICENSE_NAMES: [&str; 3] = ["LICENSE", "COPYING", "LICENSE.md"];

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    /// Commits on the first-parent log.
    pub commits: usize,
    /// Distinct commit pages written; fewer than `commits` when trees repeat.
    pub commit_pages: usize,
    pub files: usize,
    pub directories: usize,
    pub site_root: PathBuf,
}

/// Generates the site described by `config` with the default templates.
///
/// # Errors
///
/// Returns the first repository, filesystem or rendering error met.
pub fn generate(config: &Config) -> Result<SiteSummary> {
    generate_with(config, &MaudRenderer)
}

/// Generates the site described by `config` with a custom renderer.
///
/// # Errors
///
/// Returns the first repository, filesystem or rendering error met.
pub fn generate_with<R: PageRenderer>(config: &Config, renderer: &R) -> Result<SiteSummary> {
    let repo = Repo::open(&config.repo)?;
    let head = repo.head_id()?;
    let ctx = SiteContext::new(
        repo_name_from_path(&config.repo),
        repo.branch_name(),
        &config.destdir,
    )
    .with_install_dir(&config.installdir)
    .with_max_summary_len(config.summary_len)
    .with_log_page_size(config.log_page_size)
    .with_theme(&config.theme);

    info!(
        repo = ctx.repo_name(),
        branch = ctx.branch_name(),
        site_root = %ctx.site_root().display(),
        "generating site"
    );

    validate_destination(ctx.site_root(), config.force)?;
    make_dir(ctx.site_root())?;

    let mut emitter = SiteEmitter::new(&repo, &ctx, renderer, head)?;
    emitter.emit_assets()?;
    emitter.emit_summary()?;
    emitter.emit_refs()?;
    emitter.emit_log()?;
    emitter.emit_tree()?;

    let summary = emitter.finish();
    info!(
        commits = summary.commits,
        files = summary.files,
        directories = summary.directories,
        "site generated"
    );
    Ok(summary)
}

/// Writes every page of one site.
///
/// Holds the navigation list, the first-parent log and the path resolver
/// built once per run; each `emit_*` stage reads them immutably.
pub struct SiteEmitter<'a, R: PageRenderer> {
    repo: &'a Repo,
    ctx: &'a SiteContext,
    renderer: &'a R,
    head: CommitNode,
    global: GlobalData,
    nav: Vec<FlatTreeItem>,
    log: Vec<CommitNode>,
    branches: Vec<RefEntry>,
    tags: Vec<RefEntry>,
    resolver: PathHistoryResolver<'a>,
    highlighter: Highlighter,
    markdown: MarkdownRenderer,
    commit_pages: usize,
    files: usize,
    directories: usize,
}

impl<'a, R: PageRenderer> SiteEmitter<'a, R> {
    /// Builds navigation, log and reference lists for `head`.
    ///
    /// # Errors
    ///
    /// Fails if the head commit, any tree, the log or the references cannot
    /// be read, or if the tree holds a submodule.
    pub fn new(repo: &'a Repo, ctx: &'a SiteContext, renderer: &'a R, head: ObjectId) -> Result<Self> {
        let head = repo.commit(head)?;
        let nav = flatten_tree(repo, head.tree_id(), ctx)?;
        let log = commit_log(repo, head.id())?;
        let branches = repo.branches()?;
        let tags = repo.tags()?;
        debug!(
            nav_items = nav.len(),
            commits = log.len(),
            branches = branches.len(),
            tags = tags.len(),
            "navigation built"
        );

        let global = GlobalData {
            repo_name: ctx.repo_name().to_string(),
            branch_name: ctx.branch_name().to_string(),
            links: ctx.links(),
            commit_count: log.len(),
            branch_count: branches.len(),
            tag_count: tags.len(),
            stylesheets: assets::stylesheet_links(ctx),
            script: ctx.asset_link(SCRIPT_NAME),
        };

        Ok(Self {
            repo,
            ctx,
            renderer,
            resolver: PathHistoryResolver::from_chain(repo, log.clone()),
            head,
            global,
            nav,
            log,
            branches,
            tags,
            highlighter: Highlighter::new(),
            markdown: MarkdownRenderer::new(ctx.repo_name()),
            commit_pages: 0,
            files: 0,
            directories: 0,
        })
    }

    /// Writes bundled and generated stylesheets and the client script.
    pub fn emit_assets(&self) -> Result<()> {
        assets::write_assets(self.ctx, &self.highlighter)
    }

    /// Writes `index.html`: latest commit, root listing, README, license
    /// and contributors.
    pub fn emit_summary(&self) -> Result<()> {
        let (dirs, files) = sorted_entries(self.repo, self.head.tree_id())?;
        let sizes = files
            .iter()
            .map(|f| self.repo.blob(f.id()).map(|data| data.len() as u64))
            .collect::<Result<Vec<_>>>()?;

        let data = IndexRenderData {
            global: &self.global,
            latest_commit: self.log.first().map(|c| self.commit_elem(c)),
            readme: self.find_document(&files, &README_NAMES)?,
            license: self.find_document(&files, &LICENSE_NAMES)?,
            files: self.listing("", &dirs, &files, &sizes),
            contributors: contributors(self.repo, self.head.id())?,
        };

        let html = self.renderer.index(&data)?;
        write_page(&self.ctx.site_root().join("index.html"), &html)?;
        info!("summary page written");
        Ok(())
    }

    /// Writes `branches.html` and `tags.html`.
    pub fn emit_refs(&self) -> Result<()> {
        for (kind, refs, file) in [
            (RefKind::Branch, &self.branches, "branches.html"),
            (RefKind::Tag, &self.tags, "tags.html"),
        ] {
            let data = RefsRenderData {
                global: &self.global,
                kind,
                refs: refs.iter().map(|r| self.ref_elem(kind, r)).collect(),
            };
            let html = self.renderer.refs(&data)?;
            write_page(&self.ctx.site_root().join(file), &html)?;
        }
        debug!("reference pages written");
        Ok(())
    }

    /// Writes the paginated log and one detail page per distinct tree id.
    ///
    /// Commits sharing a tree share a page; the oldest of them is shown.
    pub fn emit_log(&mut self) -> Result<()> {
        let log_dir = self.ctx.site_root().join("log").join(self.ctx.branch_name());
        make_dir(&log_dir)?;

        let elems: Vec<CommitListElem> = self.log.iter().map(|c| self.commit_elem(c)).collect();
        let page_size = self.ctx.log_page_size();
        let total_pages = elems.len().div_ceil(page_size).max(1);

        for page in 1..=total_pages {
            let start = (page - 1) * page_size;
            let end = (start + page_size).min(elems.len());
            let data = LogRenderData {
                global: &self.global,
                commits: &elems[start..end],
                page,
                total_pages,
                prev_link: (page > 1).then(|| self.ctx.log_link(page - 1)),
                next_link: (page < total_pages).then(|| self.ctx.log_link(page + 1)),
            };
            let html = self.renderer.log(&data)?;
            write_page(&log_dir.join(log_page_file(page)), &html)?;
        }
        info!(pages = total_pages, "log written");

        let commit_dir = self.ctx.site_root().join("commit");
        make_dir(&commit_dir)?;

        let mut written = HashSet::new();
        for commit in self.log.iter().rev() {
            let tree_id = commit.tree_id();
            if !written.insert(tree_id) {
                debug!(commit = %commit.id(), tree = %tree_id, "tree already has a commit page");
                continue;
            }
            let html = self.render_commit(commit)?;
            write_page(&commit_dir.join(format!("{}.html", tree_id)), &html)?;
        }
        self.commit_pages = written.len();
        info!(pages = self.commit_pages, "commit pages written");
        Ok(())
    }

    /// Writes `tree/**` depth first, each directory index after its children.
    pub fn emit_tree(&mut self) -> Result<()> {
        let root = self.head.tree_id();
        self.emit_directory(root, "")?;
        info!(
            files = self.files,
            directories = self.directories,
            "tree written"
        );
        Ok(())
    }

    pub fn finish(self) -> SiteSummary {
        SiteSummary {
            commits: self.log.len(),
            commit_pages: self.commit_pages,
            files: self.files,
            directories: self.directories,
            site_root: self.ctx.site_root().to_path_buf(),
        }
    }

    fn emit_directory(&mut self, tree_id: ObjectId, path: &str) -> Result<()> {
        let dir = self.tree_dir(path);
        make_dir(&dir)?;

        let (dirs, files) = sorted_entries(self.repo, tree_id)?;
        for entry in &dirs {
            self.emit_directory(entry.id(), &join_path(path, entry.name()))?;
        }
        let sizes = files
            .iter()
            .map(|entry| self.emit_file(entry, &join_path(path, entry.name()), &dir))
            .collect::<Result<Vec<_>>>()?;

        let data = TreeRenderData {
            global: &self.global,
            nav: &self.nav,
            path: path.to_string(),
            parent_link: (!path.is_empty()).then(|| self.ctx.tree_link(parent_path(path), false)),
            files: self.listing(path, &dirs, &files, &sizes),
            latest_commit: self.resolver.resolve(path).map(|c| self.commit_elem(c)),
        };
        let html = self.renderer.tree(&data)?;
        write_page(&dir.join("index.html"), &html)?;

        self.directories += 1;
        debug!(path, "directory written");
        Ok(())
    }

    /// Writes one file page and returns the blob size.
    fn emit_file(&mut self, entry: &TreeEntry, path: &str, dir: &Path) -> Result<u64> {
        let data = self.repo.blob(entry.id())?;
        let mut file = self.file_view(entry.name(), path, &data)?;

        if is_image_file(entry.name()) {
            self.copy_image(entry.name(), path, &data)?;
            file.image_link = Some(self.ctx.asset_link(entry.name()));
        }

        let page = FileRenderData {
            global: &self.global,
            nav: &self.nav,
            file,
            last_commit: self.resolver.resolve(path).map(|c| self.commit_elem(c)),
            parent_link: self.ctx.tree_link(parent_path(path), false),
        };
        let html = self.renderer.file(&page)?;
        write_page(&dir.join(format!("{}.html", entry.name())), &html)?;

        self.files += 1;
        debug!(path, "file written");
        Ok(data.len() as u64)
    }

    /// Copies an image into `assets/`, preferring the working tree copy.
    fn copy_image(&self, name: &str, path: &str, blob: &[u8]) -> Result<()> {
        let target = self.ctx.site_root().join("assets").join(name);
        if let Some(parent) = target.parent() {
            make_dir(parent)?;
        }

        match self.repo.work_dir().map(|w| w.join(path)) {
            Some(source) if source.is_file() => {
                let bytes = fs::read(&source).map_err(|e| Error::filesystem(&source, e))?;
                write_bytes(&target, &bytes)
            }
            _ => {
                warn!(path, "image missing from working tree, copying committed blob");
                write_bytes(&target, blob)
            }
        }
    }

    fn file_view(&self, name: &str, path: &str, data: &[u8]) -> Result<FileView> {
        let mut view = FileView {
            name: name.to_string(),
            path: path.to_string(),
            size: data.len() as u64,
            is_binary: is_binary(data),
            ..FileView::default()
        };

        if !view.is_binary {
            let text = String::from_utf8_lossy(data);
            view.lines = self.highlighter.highlight_lines(name, &text)?;
            if is_markdown(name) {
                view.rendered = Some(self.markdown.render(&text));
            }
        }
        Ok(view)
    }

    /// First file in `files` matching `names`, in the order of `names`.
    fn find_document(&self, files: &[TreeEntry], names: &[&str]) -> Result<Option<FileView>> {
        let Some(entry) = names
            .iter()
            .find_map(|name| files.iter().find(|f| f.name() == *name))
        else {
            return Ok(None);
        };
        let data = self.repo.blob(entry.id())?;
        self.file_view(entry.name(), entry.name(), &data).map(Some)
    }

    fn listing(
        &self,
        path: &str,
        dirs: &[TreeEntry],
        files: &[TreeEntry],
        sizes: &[u64],
    ) -> Vec<FileListElem> {
        let dir_rows = dirs.iter().map(|entry| (entry, false, 0));
        let file_rows = files
            .iter()
            .zip(sizes.iter().copied())
            .map(|(entry, size)| (entry, true, size));

        dir_rows
            .chain(file_rows)
            .map(|(entry, is_file, size)| {
                let child = join_path(path, entry.name());
                let last = self.resolver.resolve(&child);
                FileListElem {
                    name: if is_file {
                        entry.name().to_string()
                    } else {
                        format!("{}/", entry.name())
                    },
                    link: self.ctx.tree_link(&child, is_file),
                    is_file,
                    mode: entry.mode().mode_string().to_string(),
                    size,
                    last_modified: last.map(|c| c.time()),
                    last_commit_summary: last
                        .map(|c| self.ctx.truncate_summary(c.summary()))
                        .unwrap_or_default(),
                    last_commit_link: last.map(|c| self.ctx.commit_link(&c.tree_id().to_string())),
                }
            })
            .collect()
    }

    fn render_commit(&self, commit: &CommitNode) -> Result<String> {
        let parents = commit
            .parents()
            .iter()
            .map(|id| {
                let tree = self.repo.commit(*id)?.tree_id();
                Ok(LinkListElem {
                    name: abbrev(tree),
                    link: self.ctx.commit_link(&tree.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let patch = commit_patch(self.repo, commit)?;
        let data = CommitRenderData {
            global: &self.global,
            id: commit.tree_id().to_string(),
            commit_id: commit.id().to_string(),
            author: commit.author_name().to_string(),
            email: commit.author_email().to_string(),
            date: commit.time(),
            parents,
            message_lines: commit
                .message()
                .trim_end_matches('\n')
                .split('\n')
                .map(str::to_string)
                .collect(),
            diff_lines: highlight_diff_lines(&patch),
        };
        self.renderer.commit(&data)
    }

    fn commit_elem(&self, commit: &CommitNode) -> CommitListElem {
        CommitListElem {
            link: self.ctx.commit_link(&commit.tree_id().to_string()),
            summary: self.ctx.truncate_summary(commit.summary()),
            author: commit.author_name().to_string(),
            date: commit.time(),
            abbrev_hash: abbrev(commit.tree_id()),
        }
    }

    fn ref_elem(&self, kind: RefKind, entry: &RefEntry) -> RefListElem {
        RefListElem {
            name: entry.name().to_string(),
            kind,
            commit_hash: abbrev(entry.target()),
            log_link: (kind == RefKind::Branch && entry.name() == self.ctx.branch_name())
                .then(|| self.ctx.log_link(1)),
        }
    }

    fn tree_dir(&self, path: &str) -> PathBuf {
        let root = self.ctx.site_root().join("tree");
        if path.is_empty() { root } else { root.join(path) }
    }
}

fn abbrev(id: ObjectId) -> String {
    id.to_hex_with_len(8).to_string()
}

/// Parent of a slash separated path; the root's children have parent `""`.
fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}
