//! Static asset bundling

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::context::SiteContext;
use crate::error::{Error, Result};
use crate::highlight::Highlighter;
use crate::output::{make_dir, write_page};

const STYLE: &str = include_str!("../assets/style.css");
const SCRIPT: &str = include_str!("../assets/main.js");

/// Stylesheet with the page layout.
pub const STYLE_NAME: &str = "style.css";
/// Client script loaded by every page.
pub const SCRIPT_NAME: &str = "main.js";
/// Highlighting stylesheet generated from the configured theme.
pub const SYNTAX_NAME: &str = "syntax.css";

/// Writes the static assets into `<site_root>/assets`
///
/// A file named like a bundled asset under `<install_dir>/static` replaces
/// the bundled contents.
///
/// # Errors
///
/// Returns [`Error::Filesystem`] when an override cannot be read or an asset
/// cannot be written, and [`Error::Render`] for an unknown theme.
pub fn write_assets(ctx: &SiteContext, highlighter: &Highlighter) -> Result<()> {
    let assets_dir = ctx.site_root().join("assets");
    make_dir(&assets_dir)?;

    let syntax = highlighter.stylesheet(ctx.theme())?;
    for (name, bundled) in [(STYLE_NAME, STYLE), (SCRIPT_NAME, SCRIPT), (SYNTAX_NAME, syntax.as_str())] {
        let contents = load_override(ctx.install_dir(), name)?;
        write_page(&assets_dir.join(name), contents.as_deref().unwrap_or(bundled))?;
    }
    Ok(())
}

/// Stylesheet links every page includes, in load order.
pub fn stylesheet_links(ctx: &SiteContext) -> Vec<String> {
    vec![ctx.asset_link(STYLE_NAME), ctx.asset_link(SYNTAX_NAME)]
}

fn load_override(install_dir: &Path, name: &str) -> Result<Option<String>> {
    let path = install_dir.join("static").join(name);
    if !path.is_file() {
        return Ok(None);
    }
    debug!(path = %path.display(), "using asset override");
    fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| Error::filesystem(&path, e))
}
