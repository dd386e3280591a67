//! Formatting helpers shared by pages and the emitter.

use chrono::{DateTime, FixedOffset};
use std::path::Path;

/// Author timestamp: seconds since the epoch plus the author's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    seconds: i64,
    offset: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, offset: i32) -> Self {
        Self { seconds, offset }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Offset east of UTC in seconds.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    fn to_datetime(self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset).or_else(|| FixedOffset::east_opt(0))?;
        DateTime::from_timestamp(self.seconds, 0).map(|utc| utc.with_timezone(&offset))
    }

    /// Absolute date as `YYYY-MM-DD HH:MM` in the author's offset.
    ///
    /// A zero timestamp formats as the empty string.
    pub fn format_date(&self) -> String {
        if self.seconds == 0 {
            return String::new();
        }
        self.to_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// RFC 3339 form for `datetime` attributes.
    pub fn iso8601(&self) -> String {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default()
    }
}

/// Formats byte count as human readable file size
///
/// Uses binary prefixes with two decimal places for KB and MB.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Splits content into lines, dropping the final line terminator.
///
/// Empty content yields a single empty line.
pub fn contents_to_lines(content: &str) -> Vec<&str> {
    let trimmed = content.strip_suffix('\n').unwrap_or(content);
    trimmed.split('\n').collect()
}

/// Escapes text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Repository name derived from its path.
///
/// Uses the final component of the absolute path with any `.git` suffix
/// removed; falls back to `repo` when nothing usable remains.
pub fn repo_name_from_path(path: &Path) -> String {
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()));

    let name = absolute
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.strip_suffix(".git").unwrap_or(n))
        .unwrap_or("");

    if name.is_empty() || name == "." || name == "/" {
        "repo".to_string()
    } else {
        name.to_string()
    }
}
