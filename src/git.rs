//! Git object store access.
//!
//! [`Repo`] wraps a single `gix::Repository` handle and exposes the commit,
//! tree and blob lookups the rest of the crate needs, in owned form so callers
//! never hold borrows into the object cache.

use gix::ObjectId;
use gix::bstr::ByteSlice;
use gix::objs::tree::EntryKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::util::Timestamp;

/// File mode of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    Regular,
    Executable,
    Symlink,
    Submodule,
    Directory,
}

/// Coarse classification of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
    Submodule,
}

impl FileMode {
    /// Entry classification derived from the mode.
    pub fn entry_type(self) -> EntryType {
        match self {
            Self::Regular | Self::Executable | Self::Symlink => EntryType::File,
            Self::Directory => EntryType::Directory,
            Self::Submodule => EntryType::Submodule,
        }
    }

    /// Permission string in `ls -l` form, e.g. `-rw-r--r--`.
    pub fn mode_string(self) -> &'static str {
        match self {
            Self::Regular => "-rw-r--r--",
            Self::Executable => "-rwxr-xr-x",
            Self::Symlink => "l---------",
            Self::Submodule => "m---------",
            Self::Directory => "d---------",
        }
    }

    /// Octal mode as written in git patch headers.
    pub fn octal(self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
            Self::Symlink => "120000",
            Self::Submodule => "160000",
            Self::Directory => "040000",
        }
    }
}

impl From<gix::objs::tree::EntryMode> for FileMode {
    fn from(mode: gix::objs::tree::EntryMode) -> Self {
        match mode.kind() {
            EntryKind::Tree => Self::Directory,
            EntryKind::Blob => Self::Regular,
            EntryKind::BlobExecutable => Self::Executable,
            EntryKind::Link => Self::Symlink,
            EntryKind::Commit => Self::Submodule,
        }
    }
}

/// Entry of a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    mode: FileMode,
    id: ObjectId,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, mode: FileMode, id: ObjectId) -> Self {
        Self {
            name: name.into(),
            mode,
            id,
        }
    }

    /// Entry file name, without any leading directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Object id of the blob, tree or submodule commit.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn entry_type(&self) -> EntryType {
        self.mode.entry_type()
    }
}

/// Commit snapshot read from the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    id: ObjectId,
    tree_id: ObjectId,
    parents: Vec<ObjectId>,
    author_name: String,
    author_email: String,
    time: Timestamp,
    message: String,
    summary: String,
}

impl CommitNode {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Id of the tree this commit records.
    pub fn tree_id(&self) -> ObjectId {
        self.tree_id
    }

    /// Parent ids in recorded order; the first one is the mainline parent.
    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Author timestamp.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// Full raw commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// First paragraph of the message with whitespace squashed.
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// Branch or tag reference peeled to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    name: String,
    target: ObjectId,
}

impl RefEntry {
    /// Short reference name, e.g. `main` or `v1.0`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Peeled commit id.
    pub fn target(&self) -> ObjectId {
        self.target
    }
}

/// Repository handle used for every object lookup during a run.
///
/// Not `Sync`: the handle is shared by reference and used sequentially.
pub struct Repo {
    inner: gix::Repository,
    path: PathBuf,
}

impl Repo {
    /// Opens the repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryAccess`] if no repository can be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = gix::open(path).map_err(|e| Error::repository(path, e))?;

        Ok(Self {
            inner,
            path: path.to_path_buf(),
        })
    }

    /// Path the repository was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Working tree root, `None` for bare repositories.
    pub fn work_dir(&self) -> Option<&Path> {
        self.inner.work_dir()
    }

    /// Resolves `HEAD` to a commit id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryAccess`] for unborn or broken `HEAD`.
    pub fn head_id(&self) -> Result<ObjectId> {
        let commit = self
            .inner
            .head_commit()
            .map_err(|e| Error::repository(&self.path, e))?;
        Ok(commit.id)
    }

    /// Short name of the checked out branch, or `HEAD` when detached.
    pub fn branch_name(&self) -> String {
        match self.inner.head_name() {
            Ok(Some(name)) => name.shorten().to_str_lossy().into_owned(),
            _ => "HEAD".to_string(),
        }
    }

    /// Reads a commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if the object is missing, is not a
    /// commit, or cannot be decoded.
    pub fn commit(&self, id: ObjectId) -> Result<CommitNode> {
        let what = || format!("commit {}", id);
        let commit = self
            .inner
            .find_object(id)
            .map_err(|e| Error::lookup(what(), e))?
            .try_into_commit()
            .map_err(|e| Error::lookup(what(), e))?;

        let author = commit.author().map_err(|e| Error::lookup(what(), e))?;
        let author_name = author.name.to_str_lossy().into_owned();
        let author_email = author.email.to_str_lossy().into_owned();
        let time = Timestamp::new(author.time.seconds, author.time.offset);

        let message = commit
            .message_raw()
            .map_err(|e| Error::lookup(what(), e))?
            .to_str_lossy()
            .into_owned();
        let summary = commit
            .message()
            .map_err(|e| Error::lookup(what(), e))?
            .summary()
            .to_str_lossy()
            .into_owned();
        let tree_id = commit
            .tree_id()
            .map_err(|e| Error::lookup(what(), e))?
            .detach();
        let parents = commit.parent_ids().map(|p| p.detach()).collect();

        Ok(CommitNode {
            id,
            tree_id,
            parents,
            author_name,
            author_email,
            time,
            message,
            summary,
        })
    }

    /// Commit ids along first-parent edges starting at `start`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if any commit on the chain cannot be read.
    pub fn first_parent_ids(&self, start: ObjectId) -> Result<Vec<ObjectId>> {
        self.walk(start, true)
    }

    /// Every commit id reachable from `start` through any parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if any reachable commit cannot be read.
    pub fn ancestor_ids(&self, start: ObjectId) -> Result<Vec<ObjectId>> {
        self.walk(start, false)
    }

    fn walk(&self, start: ObjectId, first_parent: bool) -> Result<Vec<ObjectId>> {
        let what = || format!("history of {}", start);
        let commit = self
            .inner
            .find_object(start)
            .map_err(|e| Error::lookup(what(), e))?
            .try_into_commit()
            .map_err(|e| Error::lookup(what(), e))?;

        let platform = if first_parent {
            commit.ancestors().first_parent_only()
        } else {
            commit.ancestors()
        };

        platform
            .all()
            .map_err(|e| Error::lookup(what(), e))?
            .map(|info| info.map(|info| info.id).map_err(|e| Error::lookup(what(), e)))
            .collect()
    }

    /// Immediate entries of a tree, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if the tree is missing or malformed.
    pub fn tree_entries(&self, tree_id: ObjectId) -> Result<Vec<TreeEntry>> {
        let tree = self.find_tree(tree_id)?;
        let decoded = tree
            .decode()
            .map_err(|e| Error::lookup(format!("tree {}", tree_id), e))?;

        Ok(decoded
            .entries
            .iter()
            .map(|entry| TreeEntry {
                name: entry.filename.to_str_lossy().into_owned(),
                mode: FileMode::from(entry.mode),
                id: entry.oid.to_owned(),
            })
            .collect())
    }

    /// Looks up `path` (slash separated, relative to the root) inside a tree.
    ///
    /// Returns `Ok(None)` when any component is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if a tree on the way cannot be read.
    pub fn entry_by_path(&self, tree_id: ObjectId, path: &str) -> Result<Option<TreeEntry>> {
        let mut tree = self.find_tree(tree_id)?;
        let entry = tree
            .peel_to_entry_by_path(path)
            .map_err(|e| Error::lookup(format!("{} in tree {}", path, tree_id), e))?;

        Ok(entry.map(|entry| TreeEntry {
            name: entry.filename().to_str_lossy().into_owned(),
            mode: FileMode::from(entry.mode()),
            id: entry.oid().to_owned(),
        }))
    }

    /// Reads blob content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if the object is missing or not a blob.
    pub fn blob(&self, id: ObjectId) -> Result<Vec<u8>> {
        let what = || format!("blob {}", id);
        let blob = self
            .inner
            .find_object(id)
            .map_err(|e| Error::lookup(what(), e))?
            .try_into_blob()
            .map_err(|e| Error::lookup(what(), e))?;
        Ok(blob.detach().data)
    }

    /// Local branches, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if references cannot be listed or peeled.
    pub fn branches(&self) -> Result<Vec<RefEntry>> {
        let platform = self
            .inner
            .references()
            .map_err(|e| Error::lookup("references", e))?;
        let refs = platform
            .local_branches()
            .map_err(|e| Error::lookup("local branches", e))?;
        Self::peel_all(refs)
    }

    /// Tags peeled through annotated tag objects to their target, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectLookup`] if references cannot be listed or peeled.
    pub fn tags(&self) -> Result<Vec<RefEntry>> {
        let platform = self
            .inner
            .references()
            .map_err(|e| Error::lookup("references", e))?;
        let refs = platform.tags().map_err(|e| Error::lookup("tags", e))?;
        Self::peel_all(refs)
    }

    fn peel_all<'r>(
        refs: impl Iterator<
            Item = std::result::Result<
                gix::Reference<'r>,
                Box<dyn std::error::Error + Send + Sync + 'static>,
            >,
        >,
    ) -> Result<Vec<RefEntry>> {
        let mut entries = Vec::new();
        for reference in refs {
            let mut reference = reference.map_err(|e| Error::lookup("reference", e))?;
            let name = reference.name().shorten().to_str_lossy().into_owned();
            let target = reference
                .peel_to_id_in_place()
                .map_err(|e| Error::lookup(format!("reference {}", name), e))?
                .detach();
            entries.push(RefEntry { name, target });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// The tree `id`, or the empty tree for `None`.
    pub(crate) fn tree_or_empty(&self, id: Option<ObjectId>) -> Result<gix::Tree<'_>> {
        match id {
            Some(id) => self.find_tree(id),
            None => Ok(self.inner.empty_tree()),
        }
    }

    fn find_tree(&self, id: ObjectId) -> Result<gix::Tree<'_>> {
        let what = || format!("tree {}", id);
        self.inner
            .find_object(id)
            .map_err(|e| Error::lookup(what(), e))?
            .try_into_tree()
            .map_err(|e| Error::lookup(what(), e))
    }
}
