//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::nav::site_header;
use super::sidebar::tree_sidebar;
use crate::render::GlobalData;
use crate::tree::FlatTreeItem;

/// Wraps page content with standard HTML structure
///
/// Every page gets the same head, stylesheet set, site header and script.
/// Pages that pass a navigation list get the tree sidebar next to their body.
///
/// # Arguments
///
/// * `global`: Site-wide data (repository name, links, stylesheets)
/// * `title`: Page title text (without suffix)
/// * `nav`: Flattened tree and the link of the current page, if any
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(
    global: &GlobalData,
    title: &str,
    nav: Option<(&[FlatTreeItem], &str)>,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (global.repo_name) }
                @for stylesheet in &global.stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                (site_header(global))
                @if let Some((items, current)) = nav {
                    div class="with-sidebar" {
                        (tree_sidebar(items, current))
                        main class="content" { (body) }
                    }
                } @else {
                    main class="content" { (body) }
                }
                script src=(global.script) {}
            }
        }
    }
}
