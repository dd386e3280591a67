//! Tree navigation sidebar

use maud::{Markup, html};

use super::icons::file_icon;
use crate::tree::FlatTreeItem;

/// Renders the flattened tree as an indented link list
///
/// Indentation comes from each item's depth; the item whose link equals
/// `current` is marked active.
pub fn tree_sidebar(items: &[FlatTreeItem], current: &str) -> Markup {
    html! {
        nav class="tree-sidebar" {
            ul {
                @for item in items {
                    @let label = if item.is_file { item.name.clone() } else { format!("{}/", item.name) };
                    li class=(if item.link == current { "tree-item active" } else { "tree-item" })
                        style=(format!("padding-left: {}em", item.depth)) {
                        a href=(item.link) {
                            (file_icon(&label))
                            (label)
                        }
                    }
                }
            }
        }
    }
}
