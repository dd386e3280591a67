//! Commit history: the first-parent log and per-path last-commit resolution.

use gix::ObjectId;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::diff;
use crate::error::Result;
use crate::git::{CommitNode, Repo};

/// Reads the first-parent chain from `start`, newest first.
///
/// Merged side branches are skipped but every commit keeps its full parent
/// list. The walk stops after the initial commit.
///
/// # Errors
///
/// Any lookup failure aborts the walk; there is no partial log.
pub fn commit_log(repo: &Repo, start: ObjectId) -> Result<Vec<CommitNode>> {
    repo.first_parent_ids(start)?
        .into_iter()
        .map(|id| repo.commit(id))
        .collect()
}

/// Distinct commit author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub email: String,
}

/// Authors of every commit reachable from `start`, unique by email, in the
/// order they are first seen.
///
/// # Errors
///
/// Returns an error if any reachable commit cannot be read.
pub fn contributors(repo: &Repo, start: ObjectId) -> Result<Vec<Contributor>> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for id in repo.ancestor_ids(start)? {
        let commit = repo.commit(id)?;
        if seen.insert(commit.author_email().to_string()) {
            found.push(Contributor {
                name: commit.author_name().to_string(),
                email: commit.author_email().to_string(),
            });
        }
    }

    Ok(found)
}

/// Finds the most recent commit that touched a path.
///
/// The first-parent chain is read once when the resolver is built and every
/// query walks it from the start commit. Answers are memoized per path.
/// Lookup and diff failures never propagate: a path whose history cannot be
/// determined resolves to `None`.
pub struct PathHistoryResolver<'r> {
    repo: &'r Repo,
    chain: Vec<CommitNode>,
    memo: RefCell<HashMap<String, Option<usize>>>,
}

impl<'r> PathHistoryResolver<'r> {
    /// Builds a resolver walking from `start`.
    ///
    /// If the history cannot be read every query resolves to `None`.
    pub fn new(repo: &'r Repo, start: ObjectId) -> Self {
        let chain = commit_log(repo, start).unwrap_or_else(|err| {
            warn!(%err, "history unavailable, last-modified metadata disabled");
            Vec::new()
        });
        Self::from_chain(repo, chain)
    }

    /// Builds a resolver over an already read first-parent chain.
    pub fn from_chain(repo: &'r Repo, chain: Vec<CommitNode>) -> Self {
        Self {
            repo,
            chain,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Last commit that modified `path`; the empty path is the root and
    /// resolves to the start commit.
    pub fn resolve(&self, path: &str) -> Option<&CommitNode> {
        let cached = self.memo.borrow().get(path).copied();
        let index = match cached {
            Some(hit) => hit,
            None => {
                let found = self.search(path);
                self.memo.borrow_mut().insert(path.to_string(), found);
                found
            }
        };
        index.and_then(|i| self.chain.get(i))
    }

    fn search(&self, path: &str) -> Option<usize> {
        for (index, commit) in self.chain.iter().enumerate() {
            if path.is_empty() {
                return Some(index);
            }

            match self.repo.entry_by_path(commit.tree_id(), path) {
                Ok(Some(_)) => {}
                Ok(None) => continue,
                Err(err) => {
                    debug!(%err, path, "lookup failed, treating as absent");
                    continue;
                }
            }

            let Some(parent_id) = commit.parents().first() else {
                return Some(index);
            };

            let parent_tree = match self.chain.get(index + 1) {
                Some(parent) if parent.id() == *parent_id => parent.tree_id(),
                _ => match self.repo.commit(*parent_id) {
                    Ok(parent) => parent.tree_id(),
                    Err(err) => {
                        debug!(%err, path, "parent unreadable, treating commit as introducing path");
                        return Some(index);
                    }
                },
            };

            match self.repo.entry_by_path(parent_tree, path) {
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => return Some(index),
            }

            match diff::has_changes(self.repo, Some(parent_tree), commit.tree_id(), Some(path)) {
                Ok(true) => return Some(index),
                Ok(false) => {}
                Err(err) => debug!(%err, path, "diff failed, assuming unchanged"),
            }
        }

        None
    }
}
