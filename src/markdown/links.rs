//! Image source resolution for rendered markdown.

/// Maps relative image sources to the site's flat asset directory.
///
/// Every image file in the repository is copied to `/<repo>/assets/<name>`,
/// so a relative `src` resolves to that location by file name alone.
#[derive(Debug, Clone)]
pub struct AssetLinkResolver {
    repo_name: String,
}

impl AssetLinkResolver {
    pub fn new(repo_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
        }
    }

    /// Resolves an image `src`.
    ///
    /// Returns `None` when the source must be left untouched:
    /// - absolute URLs (`http://`, `https://`, protocol-relative `//`)
    /// - root-relative paths (`/...`)
    /// - inline `data:` URIs and fragment references
    /// - sources without a file name component
    pub fn resolve(&self, src: &str) -> Option<String> {
        let src = src.trim();
        if src.is_empty()
            || src.starts_with('/')
            || src.starts_with('#')
            || src.contains("://")
            || src.starts_with("data:")
            || src.starts_with("mailto:")
        {
            return None;
        }

        let path = src.split(['?', '#']).next().unwrap_or(src);
        let file_name = path
            .rsplit('/')
            .find(|part| !part.is_empty() && *part != "." && *part != "..")?;

        Some(format!("/{}/assets/{}", self.repo_name, file_name))
    }
}
