//! File type icon classes

use maud::{Markup, html};
use std::path::Path;

/// Renders a file icon for a listing row
///
/// The glyph itself comes from the stylesheet; this only picks the class.
pub fn file_icon(name: &str) -> Markup {
    html! {
        span class=(format!("icon {}", icon_class(name))) {}
    }
}

/// Returns the icon CSS class for a listing name
///
/// Directory names end with `/`. README files are recognized case
/// insensitively before extension matching.
pub fn icon_class(name: &str) -> &'static str {
    if name.ends_with('/') {
        return "icon-folder";
    }

    let lower = name.to_lowercase();
    let path = Path::new(&lower);
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if file_name.starts_with("readme") {
        return "icon-readme";
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => "icon-rust",
        Some("toml" | "yaml" | "yml" | "json") => "icon-config",
        Some("md" | "markdown") => "icon-doc",
        Some("png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp" | "ico") => "icon-image",
        _ => "icon-file",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_class_readme() {
        assert_eq!(icon_class("README.md"), "icon-readme");
        assert_eq!(icon_class("readme.txt"), "icon-readme");
        assert_eq!(icon_class("README"), "icon-readme");
    }

    #[test]
    fn test_icon_class_by_extension() {
        assert_eq!(icon_class("main.rs"), "icon-rust");
        assert_eq!(icon_class("Cargo.toml"), "icon-config");
        assert_eq!(icon_class("CONTRIBUTING.md"), "icon-doc");
        assert_eq!(icon_class("logo.PNG"), "icon-image");
        assert_eq!(icon_class("unknown.xyz"), "icon-file");
    }

    #[test]
    fn test_icon_class_directory() {
        assert_eq!(icon_class("src/"), "icon-folder");
    }
}
