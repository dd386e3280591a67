//! Commit log page generation

use maud::{Markup, html};

use crate::components::commit::commit_table;
use crate::components::layout::page_wrapper;
use crate::render::LogRenderData;

/// Generates one page of the branch log
///
/// Pagination links are only rendered when there is more than one page.
pub fn generate(data: &LogRenderData<'_>) -> Markup {
    let global = data.global;
    let title = format!("Log of {}", global.branch_name);

    page_wrapper(
        global,
        &title,
        None,
        html! {
            h1 class="page-title" { (title) }
            @if data.commits.is_empty() {
                p class="empty-state" { "No commits" }
            } @else {
                (commit_table(data.commits))
            }
            @if data.total_pages > 1 {
                nav class="pagination" {
                    @if let Some(prev) = &data.prev_link {
                        a href=(prev) class="pagination-prev" { "Newer" }
                    }
                    span class="pagination-status" {
                        "Page " (data.page) " of " (data.total_pages)
                    }
                    @if let Some(next) = &data.next_link {
                        a href=(next) class="pagination-next" { "Older" }
                    }
                }
            }
        },
    )
}
