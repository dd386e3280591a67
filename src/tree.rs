//! Flattened repository tree for site-wide navigation.
//!
//! The flattening is a pre-order walk of the start commit's root tree in which
//! every directory lists its subdirectories before its files, each group sorted
//! case-insensitively. The result is built once per run and shared read-only by
//! every page.
//!
//! # Examples
//!
//! ```no_run
//! use gitpage::{Repo, SiteContext, flatten_tree};
//! use std::path::Path;
//!
//! let repo = Repo::open(".")?;
//! let ctx = SiteContext::new("demo", repo.branch_name(), Path::new("build"));
//! let root = repo.commit(repo.head_id()?)?.tree_id();
//! for item in flatten_tree(&repo, root, &ctx)? {
//!     println!("{}{}", "  ".repeat(item.depth), item.name);
//! }
//! # Ok::<(), gitpage::Error>(())
//! ```

use gix::ObjectId;
use std::cmp::Ordering;

use crate::context::SiteContext;
use crate::error::{Error, Result};
use crate::git::{EntryType, Repo, TreeEntry};

/// Navigation entry for one tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTreeItem {
    pub name: String,
    pub link: String,
    pub is_file: bool,
    /// Nesting level; entries of the root tree have depth 0.
    pub depth: usize,
}

fn case_insensitive(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}

/// Splits tree entries into directories and files, each sorted
/// case-insensitively.
///
/// # Errors
///
/// Returns [`Error::UnsupportedContent`] if the tree contains a submodule.
pub fn split_entries(entries: Vec<TreeEntry>) -> Result<(Vec<TreeEntry>, Vec<TreeEntry>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in entries {
        match entry.entry_type() {
            EntryType::Directory => dirs.push(entry),
            EntryType::File => files.push(entry),
            EntryType::Submodule => {
                return Err(Error::UnsupportedContent(format!(
                    "submodule entry '{}'",
                    entry.name()
                )));
            }
        }
    }

    dirs.sort_by(case_insensitive);
    files.sort_by(case_insensitive);
    Ok((dirs, files))
}

/// Reads a tree and splits it with [`split_entries`].
///
/// # Errors
///
/// Returns [`Error::ObjectLookup`] if the tree cannot be read, or
/// [`Error::UnsupportedContent`] for submodules.
pub fn sorted_entries(repo: &Repo, tree_id: ObjectId) -> Result<(Vec<TreeEntry>, Vec<TreeEntry>)> {
    split_entries(repo.tree_entries(tree_id)?)
}

/// Joins a parent path and an entry name with `/`.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Flattens the tree rooted at `root` into navigation order.
///
/// Uses an explicit work stack, so arbitrarily deep trees do not grow the
/// call stack.
///
/// # Errors
///
/// Returns [`Error::ObjectLookup`] if any subtree cannot be read, or
/// [`Error::UnsupportedContent`] for submodules.
pub fn flatten_tree(repo: &Repo, root: ObjectId, ctx: &SiteContext) -> Result<Vec<FlatTreeItem>> {
    let mut items = Vec::new();
    let mut stack: Vec<(TreeEntry, String, usize)> = Vec::new();

    push_children(&mut stack, sorted_entries(repo, root)?, "", 0);

    while let Some((entry, path, depth)) = stack.pop() {
        let is_file = entry.entry_type() == EntryType::File;
        items.push(FlatTreeItem {
            name: entry.name().to_string(),
            link: ctx.tree_link(&path, is_file),
            is_file,
            depth,
        });

        if !is_file {
            push_children(&mut stack, sorted_entries(repo, entry.id())?, &path, depth + 1);
        }
    }

    Ok(items)
}

/// Pushes directories then files in reverse so they pop in display order.
fn push_children(
    stack: &mut Vec<(TreeEntry, String, usize)>,
    (dirs, files): (Vec<TreeEntry>, Vec<TreeEntry>),
    parent: &str,
    depth: usize,
) {
    for entry in dirs.into_iter().chain(files).rev() {
        let path = join_path(parent, entry.name());
        stack.push((entry, path, depth));
    }
}
