//! Repository summary page generation

use maud::{Markup, PreEscaped, html};

use crate::components::commit::latest_commit;
use crate::components::file_list::file_table;
use crate::components::layout::page_wrapper;
use crate::render::{FileView, IndexRenderData};

/// Generates the repository summary page
///
/// Shows the latest commit, the root listing, README and LICENSE content
/// and the contributor list, in that order.
pub fn generate(data: &IndexRenderData<'_>) -> Markup {
    let global = data.global;

    page_wrapper(
        global,
        &global.repo_name,
        None,
        html! {
            div class="repo-stats" {
                span { (global.commit_count) " commits" }
                span { (global.branch_count) " branches" }
                span { (global.tag_count) " tags" }
            }
            @if let Some(commit) = &data.latest_commit {
                (latest_commit(commit))
            }
            @if data.files.is_empty() {
                p class="empty-state" { "Empty repository" }
            } @else {
                (file_table(&data.files))
            }
            @if let Some(readme) = &data.readme {
                (document_section("readme", readme))
            }
            @if let Some(license) = &data.license {
                (document_section("license", license))
            }
            @if !data.contributors.is_empty() {
                section class="contributors" {
                    h2 { "Contributors" }
                    ul {
                        @for contributor in &data.contributors {
                            li {
                                span class="contributor-name" { (contributor.name) }
                                " "
                                span class="contributor-email" { "<" (contributor.email) ">" }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Renders README or LICENSE content, as markdown when rendered.
fn document_section(class: &str, view: &FileView) -> Markup {
    html! {
        section class=(format!("document {}", class)) {
            h2 class="document-title" { (view.name) }
            @if let Some(rendered) = &view.rendered {
                div class="markdown-body" { (PreEscaped(rendered)) }
            } @else {
                pre class="plain-document" {
                    @for line in &view.lines {
                        (PreEscaped(line)) "\n"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Contributor;
    use crate::pages::fixtures;

    #[test]
    fn test_index_renders_readme_and_contributors() {
        // Arrange
        let global = fixtures::global();
        let data = IndexRenderData {
            global: &global,
            latest_commit: Some(fixtures::commit("Initial")),
            readme: Some(FileView {
                name: "README.md".to_string(),
                path: "README.md".to_string(),
                rendered: Some("<h1>Test</h1>\n".to_string()),
                ..FileView::default()
            }),
            license: None,
            files: Vec::new(),
            contributors: vec![Contributor {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            }],
        };

        // Act
        let html = generate(&data).into_string();

        // Assert
        assert!(data.readme_found());
        assert!(!data.license_found());
        assert!(html.contains("<h1>Test</h1>"));
        assert!(html.contains("&lt;alice@example.com&gt;"));
        assert!(html.contains("Initial"));
        assert!(!html.contains("class=\"document license\""));
    }

    #[test]
    fn test_index_plain_license() {
        // Arrange
        let global = fixtures::global();
        let data = IndexRenderData {
            global: &global,
            latest_commit: None,
            readme: None,
            license: Some(FileView {
                name: "LICENSE".to_string(),
                lines: vec!["MIT License".to_string()],
                ..FileView::default()
            }),
            files: Vec::new(),
            contributors: Vec::new(),
        };

        // Act
        let html = generate(&data).into_string();

        // Assert
        assert!(html.contains("<pre class=\"plain-document\">MIT License\n</pre>"));
        assert!(html.contains("Empty repository"));
    }
}
