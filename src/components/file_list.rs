//! File listing table components

use maud::{Markup, html};

use super::icons::file_icon;
use crate::render::FileListElem;
use crate::util::format_file_size;

/// Renders a directory listing
///
/// One row per immediate child with mode, name, size and the commit that
/// last touched it. Directories show no size.
///
/// # Arguments
///
/// * `files`: Listing rows, directories first
///
/// # Returns
///
/// File table markup
pub fn file_table(files: &[FileListElem]) -> Markup {
    html! {
        table class="file-table" {
            thead {
                tr {
                    th { "Mode" }
                    th { "Name" }
                    th { "Size" }
                    th { "Last commit" }
                    th { "Date" }
                }
            }
            tbody {
                @for file in files {
                    (file_row(file))
                }
            }
        }
    }
}

/// Renders single file row in table
pub fn file_row(file: &FileListElem) -> Markup {
    html! {
        tr class="file-row" {
            td class="file-mode" { code { (file.mode) } }
            td class="file-name-cell" {
                (file_icon(&file.name))
                a href=(file.link) { (file.name) }
            }
            td class="file-size" {
                @if file.is_file { (format_file_size(file.size)) }
            }
            td class="commit-message" {
                @if let Some(link) = &file.last_commit_link {
                    a href=(link) { (file.last_commit_summary) }
                }
            }
            td class="commit-date" {
                @if let Some(date) = file.last_modified {
                    time datetime=(date.iso8601()) { (date.format_date()) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Timestamp;

    #[test]
    fn test_file_row_with_commit() {
        // Arrange
        let file = FileListElem {
            name: "main.rs".to_string(),
            link: "/r/tree/main.rs.html".to_string(),
            is_file: true,
            mode: "-rw-r--r--".to_string(),
            size: 2048,
            last_modified: Some(Timestamp::new(1_136_214_245, 0)),
            last_commit_summary: "Add main".to_string(),
            last_commit_link: Some("/r/commit/abc.html".to_string()),
        };

        // Act
        let html = file_row(&file).into_string();

        // Assert
        assert!(html.contains("-rw-r--r--"));
        assert!(html.contains("2.00 KB"));
        assert!(html.contains("href=\"/r/commit/abc.html\""));
        assert!(html.contains("2006-01-02 15:04"));
    }

    #[test]
    fn test_directory_row_has_no_size() {
        // Arrange
        let dir = FileListElem {
            name: "src/".to_string(),
            link: "/r/tree/src/index.html".to_string(),
            is_file: false,
            mode: "d---------".to_string(),
            size: 0,
            last_modified: None,
            last_commit_summary: String::new(),
            last_commit_link: None,
        };

        // Act
        let html = file_table(&[dir]).into_string();

        // Assert
        assert!(html.contains("src/"));
        assert!(!html.contains("bytes"));
    }
}
