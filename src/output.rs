//! Destination directory handling and page writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};

/// Checks that `path` may receive a generated site.
///
/// A missing or empty directory is accepted as is. A non-empty directory is
/// rejected unless `force` is set, in which case its contents are removed.
///
/// # Errors
///
/// - [`Error::DestinationNotEmpty`] for a non-empty directory without `force`
/// - [`Error::Filesystem`] when `path` is not a directory or cannot be
///   cleared
pub fn validate_destination(path: &Path, force: bool) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(Error::filesystem(
            path,
            std::io::Error::other("destination exists and is not a directory"),
        ));
    }

    let mut entries = fs::read_dir(path).map_err(|e| Error::filesystem(path, e))?;
    if entries.next().is_none() {
        return Ok(());
    }
    if !force {
        return Err(Error::DestinationNotEmpty(path.to_path_buf()));
    }

    info!(path = %path.display(), "clearing destination directory");
    for entry in fs::read_dir(path).map_err(|e| Error::filesystem(path, e))? {
        let entry = entry.map_err(|e| Error::filesystem(path, e))?;
        let child = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::filesystem(&child, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&child).map_err(|e| Error::filesystem(&child, e))?;
        } else {
            fs::remove_file(&child).map_err(|e| Error::filesystem(&child, e))?;
        }
    }
    Ok(())
}

/// Creates `path` and any missing parents.
pub fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::filesystem(path, e))
}

/// Writes a rendered page, replacing any existing file.
pub fn write_page(path: &Path, contents: &str) -> Result<()> {
    write_bytes(path, contents.as_bytes())
}

/// Writes raw bytes and syncs them before the handle is closed.
pub fn write_bytes(path: &Path, contents: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::filesystem(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::filesystem(path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| Error::filesystem(path, e))
}
