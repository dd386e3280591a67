//! Branches and tags page generation

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::render::{RefKind, RefsRenderData};

/// Generates the branch or tag listing
pub fn generate(data: &RefsRenderData<'_>) -> Markup {
    let title = match data.kind {
        RefKind::Branch => "Branches",
        RefKind::Tag => "Tags",
    };

    page_wrapper(
        data.global,
        title,
        None,
        html! {
            h1 class="page-title" { (title) }
            @if data.refs.is_empty() {
                p class="empty-state" { "No " (title.to_lowercase()) }
            } @else {
                table class="ref-table" {
                    thead {
                        tr {
                            th { "Name" }
                            th { "Commit" }
                        }
                    }
                    tbody {
                        @for r in &data.refs {
                            tr class=(format!("ref-row {}", r.kind.as_str())) {
                                td class="ref-name" {
                                    @if let Some(log) = &r.log_link {
                                        a href=(log) { (r.name) }
                                    } @else {
                                        (r.name)
                                    }
                                }
                                td { code { (r.commit_hash) } }
                            }
                        }
                    }
                }
            }
        },
    )
}
