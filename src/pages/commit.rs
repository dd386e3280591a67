//! Commit detail page generation

use maud::{Markup, PreEscaped, html};

use crate::components::layout::page_wrapper;
use crate::render::CommitRenderData;

/// Generates the detail page of one commit
///
/// The page is keyed by tree id. Parent links point at the parents' tree
/// keyed pages; a root commit shows no parent row and an empty diff.
pub fn generate(data: &CommitRenderData<'_>) -> Markup {
    let title = data
        .message_lines
        .first()
        .cloned()
        .unwrap_or_else(|| data.commit_id.clone());

    page_wrapper(
        data.global,
        &title,
        None,
        html! {
            div class="commit-header" {
                table class="commit-meta" {
                    tr { th { "commit" } td { code { (data.commit_id) } } }
                    tr { th { "tree" } td { code { (data.id) } } }
                    tr {
                        th { "author" }
                        td { (data.author) " <" (data.email) ">" }
                    }
                    tr {
                        th { "date" }
                        td { time datetime=(data.date.iso8601()) { (data.date.format_date()) } }
                    }
                    @if data.has_any_parents() {
                        tr {
                            th { "parents" }
                            td {
                                @for parent in &data.parents {
                                    a href=(parent.link) class="commit-hash" { code { (parent.name) } }
                                    " "
                                }
                            }
                        }
                    }
                }
            }
            pre class="commit-message" {
                @for line in &data.message_lines {
                    (line) "\n"
                }
            }
            @if !data.diff_lines.is_empty() {
                pre class="diff" {
                    @for line in &data.diff_lines {
                        (PreEscaped(line)) "\n"
                    }
                }
            }
        },
    )
}
