//! File page generation for content viewing

use maud::{Markup, PreEscaped, html};

use crate::components::commit::latest_commit;
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::render::FileRenderData;
use crate::util::format_file_size;

/// Generates the page of one file
///
/// Text files get numbered, highlighted lines with `#L<n>` anchors;
/// markdown files additionally get their rendered form above the source.
/// Images are shown from the asset directory and other binary files only
/// report their size.
pub fn generate(data: &FileRenderData<'_>) -> Markup {
    let global = data.global;
    let file = &data.file;
    let root_link = format!("/{}/tree/index.html", global.repo_name);
    let current = format!("/{}/tree/{}.html", global.repo_name, file.path);

    page_wrapper(
        global,
        &file.path,
        Some((data.nav, current.as_str())),
        html! {
            (breadcrumb(global, &root_link, &file.path))
            @if let Some(commit) = &data.last_commit {
                (latest_commit(commit))
            }
            div class="file-header" {
                a href=(data.parent_link) class="parent-link" { ".." }
                span class="file-name" { (file.name) }
                span class="file-size" { (format_file_size(file.size)) }
            }
            @if let Some(rendered) = &file.rendered {
                div class="markdown-body" { (PreEscaped(rendered)) }
            }
            @if let Some(image) = &file.image_link {
                div class="image-view" { img src=(image) alt=(file.name); }
            } @else if file.is_binary {
                p class="binary-notice" { "Binary file not shown" }
            } @else {
                table class="code-table" {
                    tbody {
                        @for (i, line) in file.lines.iter().enumerate() {
                            @let number = i + 1;
                            tr id=(format!("L{}", number)) {
                                td class="line-number" {
                                    a href=(format!("#L{}", number)) { (number) }
                                }
                                td class="line-code" { pre { (PreEscaped(line)) } }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures;
    use crate::render::FileView;

    #[test]
    fn test_text_file_numbers_lines() {
        // Arrange
        let global = fixtures::global();
        let data = FileRenderData {
            global: &global,
            nav: &[],
            file: FileView {
                name: "main.rs".to_string(),
                path: "src/main.rs".to_string(),
                size: 20,
                lines: vec!["fn main() {".to_string(), "}".to_string()],
                ..FileView::default()
            },
            last_commit: None,
            parent_link: "/demo/tree/src/index.html".to_string(),
        };

        // Act
        let html = generate(&data).into_string();

        // Assert
        assert!(html.contains("id=\"L1\""));
        assert!(html.contains("href=\"#L2\""));
        assert!(html.contains("fn main() {"));
        assert!(html.contains("href=\"/demo/tree/src/index.html\""));
    }

    #[test]
    fn test_image_and_binary_files() {
        // Arrange
        let global = fixtures::global();
        let image = FileRenderData {
            global: &global,
            nav: &[],
            file: FileView {
                name: "logo.png".to_string(),
                path: "logo.png".to_string(),
                is_binary: true,
                image_link: Some("/demo/assets/logo.png".to_string()),
                ..FileView::default()
            },
            last_commit: None,
            parent_link: "/demo/tree/index.html".to_string(),
        };

        // Act
        let image_html = generate(&image).into_string();
        let blob = FileRenderData {
            file: FileView {
                name: "data.bin".to_string(),
                path: "data.bin".to_string(),
                is_binary: true,
                ..FileView::default()
            },
            ..image
        };

        let blob_html = generate(&blob).into_string();

        // Assert
        assert!(image_html.contains("<img src=\"/demo/assets/logo.png\""));
        assert!(!image_html.contains("Binary file not shown"));
        assert!(blob_html.contains("Binary file not shown"));
        assert!(!blob_html.contains("code-table"));
    }
}
