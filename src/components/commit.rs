//! Commit listing components

use maud::{Markup, html};

use crate::render::CommitListElem;

/// Renders an abbreviated hash linking to the commit page.
pub fn commit_hash(commit: &CommitListElem) -> Markup {
    html! {
        a href=(commit.link) class="commit-hash" { code { (commit.abbrev_hash) } }
    }
}

/// Renders a table of commits, newest first.
pub fn commit_table(commits: &[CommitListElem]) -> Markup {
    html! {
        table class="commit-list" {
            thead {
                tr {
                    th { "Date" }
                    th { "Message" }
                    th { "Author" }
                    th { "Tree" }
                }
            }
            tbody {
                @for commit in commits {
                    tr class="commit-entry" {
                        td class="commit-date" {
                            time datetime=(commit.date.iso8601()) { (commit.date.format_date()) }
                        }
                        td class="commit-message" { a href=(commit.link) { (commit.summary) } }
                        td class="commit-author" { (commit.author) }
                        td { (commit_hash(commit)) }
                    }
                }
            }
        }
    }
}

/// Renders a one-line latest commit banner.
pub fn latest_commit(commit: &CommitListElem) -> Markup {
    html! {
        div class="latest-commit" {
            span class="commit-author" { (commit.author) }
            a href=(commit.link) class="commit-message" { (commit.summary) }
            (commit_hash(commit))
            time datetime=(commit.date.iso8601()) { (commit.date.format_date()) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Timestamp;

    fn elem(summary: &str) -> CommitListElem {
        CommitListElem {
            link: "/r/commit/0123456789abcdef.html".to_string(),
            summary: summary.to_string(),
            author: "Alice".to_string(),
            date: Timestamp::new(1_136_214_245, 0),
            abbrev_hash: "01234567".to_string(),
        }
    }

    #[test]
    fn test_commit_table_rows() {
        // Arrange
        let commits = vec![elem("Third"), elem("Second")];

        // Act
        let html = commit_table(&commits).into_string();

        // Assert
        assert_eq!(html.matches("class=\"commit-entry\"").count(), 2);
        assert!(html.find("Third") < html.find("Second"));
        assert!(html.contains("<code>01234567</code>"));
    }

    #[test]
    fn test_latest_commit_escapes_summary() {
        // Act
        let html = latest_commit(&elem("<b>bold</b>")).into_string();

        // Assert
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
