//! Site header and breadcrumb components

use maud::{Markup, html};

use crate::render::GlobalData;

/// Renders the site header with repository name, branch and site links
pub fn site_header(global: &GlobalData) -> Markup {
    let home = global
        .links
        .first()
        .map(|l| l.link.as_str())
        .unwrap_or("/");

    html! {
        header class="site-header" {
            a href=(home) class="repo-name" { (global.repo_name) }
            span class="ref-name" { (global.branch_name) }
            nav class="site-links" {
                @for link in &global.links {
                    a href=(link.link) { (link.name) }
                }
            }
        }
    }
}

/// Renders breadcrumb navigation
///
/// Displays the repository root followed by each path component. Every
/// component except the last links to its directory index page.
///
/// # Arguments
///
/// * `global`: Site-wide data used for the root link
/// * `root_link`: Link of the tree root index page
/// * `path`: Slash separated path of the current node (empty at the root)
///
/// # Returns
///
/// Breadcrumb navigation markup with links and separators
pub fn breadcrumb(global: &GlobalData, root_link: &str, path: &str) -> Markup {
    let components = path_components(path);
    let tree_root = root_link.trim_end_matches("index.html");

    html! {
        div class="breadcrumb" {
            a href=(root_link) class="breadcrumb-link" { (global.repo_name) }
            @for (i, component) in components.iter().enumerate() {
                span class="breadcrumb-separator" { "/" }
                @if i + 1 < components.len() {
                    a href=(format!("{}{}/index.html", tree_root, components[..=i].join("/")))
                        class="breadcrumb-link" { (component) }
                } @else {
                    span class="breadcrumb-current" { (component) }
                }
            }
        }
    }
}

/// Splits a path on `/`, dropping empty components.
pub fn path_components(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
