//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! Uses comrak with GFM extensions and rewrites relative image sources into
//! the site's asset directory.

mod links;
mod renderer;

pub use links::AssetLinkResolver;
pub use renderer::MarkdownRenderer;
