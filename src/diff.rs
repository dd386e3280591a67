//! Tree-to-tree diffs and patch rendering.
//!
//! Tree comparison runs on gix's tree diff with rewrite tracking limited to
//! exact blob id matches, so renames and copies are only reported at 100%
//! similarity.

use gix::ObjectId;
use gix::bstr::BStr;
use gix::diff::Rewrites;
use gix::diff::blob::intern::InternedInput;
use gix::diff::blob::{Algorithm, UnifiedDiffBuilder};
use gix::diff::rewrites::{Copies, CopySource};
use gix::object::tree::diff::Action;
use gix::object::tree::diff::change::Event;
use gix::objs::tree::EntryMode;
use std::convert::Infallible;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filetype::is_binary;
use crate::git::{CommitNode, FileMode, Repo};
use crate::util::escape_html;

/// Kind of a single delta between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
}

/// One side of a delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub path: String,
    pub mode: FileMode,
    pub id: ObjectId,
}

/// A file-level delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub old: Option<Side>,
    pub new: Option<Side>,
}

impl Change {
    /// Path used for ordering and display: the new path if there is one.
    pub fn path(&self) -> &str {
        self.new
            .as_ref()
            .or(self.old.as_ref())
            .map(|side| side.path.as_str())
            .unwrap_or("")
    }
}

fn in_scope(path: &str, pathspec: Option<&str>) -> bool {
    let Some(spec) = pathspec.map(|s| s.trim_end_matches('/')) else {
        return true;
    };
    spec.is_empty() || path == spec || is_below(path, spec)
}

fn is_below(path: &str, dir: &str) -> bool {
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}

/// Blobs, executables and symlinks; trees and submodules are not reported.
fn is_file(mode: EntryMode) -> bool {
    !mode.is_tree() && !mode.is_commit()
}

fn side(path: &BStr, mode: EntryMode, id: ObjectId) -> Side {
    Side {
        path: path.to_string(),
        mode: FileMode::from(mode),
        id,
    }
}

/// Exact-content renames, and copies whose source was modified in the same diff.
fn exact_rewrites() -> Rewrites {
    Rewrites {
        copies: Some(Copies {
            source: CopySource::FromSetOfModifiedFiles,
            percentage: None,
        }),
        percentage: None,
        ..Default::default()
    }
}

/// Computes file-level changes from `old_tree` to `new_tree`.
///
/// `None` for `old_tree` compares against an empty tree. When `pathspec` is
/// given, only the path itself and anything below it are reported; a rename
/// or copy is kept if either side is in scope. Submodule entries are ignored.
/// The result is ordered by path.
///
/// # Errors
///
/// Returns [`Error::DiffComputation`] if a tree on either side cannot be read
/// or the comparison fails.
pub fn tree_changes(
    repo: &Repo,
    old_tree: Option<ObjectId>,
    new_tree: ObjectId,
    pathspec: Option<&str>,
) -> Result<Vec<Change>> {
    let what = || {
        format!(
            "{}..{}",
            old_tree.map(|id| id.to_string()).unwrap_or_default(),
            new_tree
        )
    };
    let old = repo.tree_or_empty(old_tree)?;
    let new = repo.tree_or_empty(Some(new_tree))?;

    let mut changes = Vec::new();
    old.changes()
        .map_err(|e| Error::diff(what(), e))?
        .track_path()
        .track_rewrites(Some(exact_rewrites()))
        .for_each_to_obtain_tree(&new, |change| {
            let path = change.location;
            let delta = match change.event {
                Event::Addition { entry_mode, id } if is_file(entry_mode) => Some(Change {
                    kind: ChangeKind::Added,
                    old: None,
                    new: Some(side(path, entry_mode, id.detach())),
                }),
                Event::Deletion { entry_mode, id } if is_file(entry_mode) => Some(Change {
                    kind: ChangeKind::Deleted,
                    old: Some(side(path, entry_mode, id.detach())),
                    new: None,
                }),
                Event::Modification {
                    previous_entry_mode,
                    previous_id,
                    entry_mode,
                    id,
                } if is_file(previous_entry_mode) && is_file(entry_mode) => Some(Change {
                    kind: ChangeKind::Modified,
                    old: Some(side(path, previous_entry_mode, previous_id.detach())),
                    new: Some(side(path, entry_mode, id.detach())),
                }),
                Event::Rewrite {
                    source_location,
                    source_entry_mode,
                    source_id,
                    entry_mode,
                    id,
                    copy,
                    ..
                } => Some(Change {
                    kind: if copy {
                        ChangeKind::Copied
                    } else {
                        ChangeKind::Renamed
                    },
                    old: Some(side(source_location, source_entry_mode, source_id.detach())),
                    new: Some(side(path, entry_mode, id.detach())),
                }),
                _ => None,
            };

            if let Some(delta) = delta {
                let in_spec = [delta.old.as_ref(), delta.new.as_ref()]
                    .into_iter()
                    .flatten()
                    .any(|s| in_scope(&s.path, pathspec));
                if in_spec {
                    changes.push(delta);
                }
            }
            Ok::<_, Infallible>(Action::Continue)
        })
        .map_err(|e| Error::diff(what(), e))?;

    changes.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(changes)
}

/// Whether anything at or below `pathspec` differs between the two trees.
///
/// # Errors
///
/// Returns [`Error::DiffComputation`] if a tree cannot be read.
pub fn has_changes(
    repo: &Repo,
    old_tree: Option<ObjectId>,
    new_tree: ObjectId,
    pathspec: Option<&str>,
) -> Result<bool> {
    if old_tree == Some(new_tree) {
        return Ok(false);
    }
    Ok(!tree_changes(repo, old_tree, new_tree, pathspec)?.is_empty())
}

/// Renders the first-parent patch of `commit`.
///
/// A root commit renders as the empty string. Binary deltas are skipped.
///
/// # Errors
///
/// Returns [`Error::DiffComputation`] or [`Error::ObjectLookup`] if the parent
/// or any blob cannot be read.
pub fn commit_patch(repo: &Repo, commit: &CommitNode) -> Result<String> {
    let Some(parent) = commit.parents().first() else {
        return Ok(String::new());
    };
    let parent_tree = repo.commit(*parent)?.tree_id();
    let changes = tree_changes(repo, Some(parent_tree), commit.tree_id(), None)?;
    render_patch(repo, &changes)
}

/// Renders changes as git-style patch text, each delta followed by a newline.
///
/// # Errors
///
/// Returns [`Error::ObjectLookup`] if a blob cannot be read.
pub fn render_patch(repo: &Repo, changes: &[Change]) -> Result<String> {
    let mut patch = String::new();

    for change in changes {
        let old_data = change.old.as_ref().map(|s| repo.blob(s.id)).transpose()?;
        let new_data = change.new.as_ref().map(|s| repo.blob(s.id)).transpose()?;

        if old_data.as_deref().is_some_and(is_binary) || new_data.as_deref().is_some_and(is_binary)
        {
            debug!(path = change.path(), "skipping binary delta");
            continue;
        }

        let old_text = old_data
            .as_deref()
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        let new_text = new_data
            .as_deref()
            .map(String::from_utf8_lossy)
            .unwrap_or_default();

        patch.push_str(&render_delta(change, &old_text, &new_text));
        patch.push('\n');
    }

    Ok(patch)
}

fn render_delta(change: &Change, old_text: &str, new_text: &str) -> String {
    let old = change.old.as_ref();
    let new = change.new.as_ref();
    let old_path = old.or(new).map(|s| s.path.as_str()).unwrap_or("");
    let new_path = new.or(old).map(|s| s.path.as_str()).unwrap_or("");

    let mut out = format!("diff --git a/{} b/{}\n", old_path, new_path);

    match (change.kind, old, new) {
        (ChangeKind::Added, _, Some(n)) => {
            out.push_str(&format!("new file mode {}\n", n.mode.octal()));
        }
        (ChangeKind::Deleted, Some(o), _) => {
            out.push_str(&format!("deleted file mode {}\n", o.mode.octal()));
        }
        (kind, Some(o), Some(n)) => {
            if o.mode != n.mode {
                out.push_str(&format!(
                    "old mode {}\nnew mode {}\n",
                    o.mode.octal(),
                    n.mode.octal()
                ));
            }
            let verb = match kind {
                ChangeKind::Renamed => Some("rename"),
                ChangeKind::Copied => Some("copy"),
                _ => None,
            };
            if let Some(verb) = verb {
                out.push_str(&format!(
                    "similarity index 100%\n{verb} from {}\n{verb} to {}\n",
                    o.path, n.path
                ));
            }
        }
        _ => {}
    }

    let old_id = old.map(|s| s.id);
    let new_id = new.map(|s| s.id);
    if old_id == new_id {
        return out;
    }

    let abbrev = |id: Option<ObjectId>| {
        id.map(|id| id.to_hex_with_len(7).to_string())
            .unwrap_or_else(|| "0000000".to_string())
    };
    out.push_str(&format!("index {}..{}", abbrev(old_id), abbrev(new_id)));
    if let (Some(o), Some(n)) = (old, new)
        && o.mode == n.mode
    {
        out.push_str(&format!(" {}", o.mode.octal()));
    }
    out.push('\n');

    match old {
        Some(o) => out.push_str(&format!("--- a/{}\n", o.path)),
        None => out.push_str("--- /dev/null\n"),
    }
    match new {
        Some(n) => out.push_str(&format!("+++ b/{}\n", n.path)),
        None => out.push_str("+++ /dev/null\n"),
    }

    out.push_str(&unified_hunks(old_text, new_text));
    out
}

/// Unified hunks with three lines of context using the histogram algorithm.
pub fn unified_hunks(old_text: &str, new_text: &str) -> String {
    let input = InternedInput::new(old_text, new_text);
    gix::diff::blob::diff(Algorithm::Histogram, &input, UnifiedDiffBuilder::new(&input))
}

/// Splits patch text into escaped HTML lines with added and removed lines
/// wrapped in `diff-add` / `diff-del` spans.
pub fn highlight_diff_lines(patch: &str) -> Vec<String> {
    patch
        .lines()
        .map(|line| {
            let escaped = escape_html(line);
            if line.starts_with('+') {
                format!("<span class=\"diff-add\">{}</span>", escaped)
            } else if line.starts_with('-') {
                format!("<span class=\"diff-del\">{}</span>", escaped)
            } else {
                escaped
            }
        })
        .collect()
}
