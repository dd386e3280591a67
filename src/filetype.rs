//! File type detection for page rendering.

use std::path::Path;

/// Bytes inspected by the NUL byte heuristic, matching git.
const BINARY_CHECK_LEN: usize = 8000;

/// Image extensions copied into the site's asset directory.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico"];

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

fn extension_lowercase(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether `name` has an image extension (case-insensitive).
pub fn is_image_file(name: &str) -> bool {
    extension_lowercase(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether `name` has a markdown extension (case-insensitive).
pub fn is_markdown(name: &str) -> bool {
    extension_lowercase(name).is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

/// Detects binary content by looking for a NUL byte near the start.
pub fn is_binary(data: &[u8]) -> bool {
    let check_len = data.len().min(BINARY_CHECK_LEN);
    data[..check_len].contains(&0)
}
