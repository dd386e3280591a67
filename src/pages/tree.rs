//! Tree page generation for directory browsing

use maud::{Markup, html};

use crate::components::commit::latest_commit;
use crate::components::file_list::file_table;
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::render::TreeRenderData;

/// Generates a directory index page
///
/// Lists the directory's immediate children with the sidebar, breadcrumb
/// and a `..` row linking the parent index when not at the root.
pub fn generate(data: &TreeRenderData<'_>) -> Markup {
    let global = data.global;
    let root_link = format!("/{}/tree/index.html", global.repo_name);
    let current = if data.path.is_empty() {
        root_link.clone()
    } else {
        format!("/{}/tree/{}/index.html", global.repo_name, data.path)
    };
    let title = if data.path.is_empty() {
        "tree".to_string()
    } else {
        data.path.clone()
    };

    page_wrapper(
        global,
        &title,
        Some((data.nav, current.as_str())),
        html! {
            (breadcrumb(global, &root_link, &data.path))
            @if let Some(commit) = &data.latest_commit {
                (latest_commit(commit))
            }
            @if let Some(parent) = &data.parent_link {
                div class="parent-link" { a href=(parent) { ".." } }
            }
            @if data.files.is_empty() {
                p class="empty-state" { "Empty directory" }
            } @else {
                (file_table(&data.files))
            }
        },
    )
}
