//! Syntax highlighting with syntect.
//!
//! Source is highlighted into CSS-classed spans (`hl-` prefix) and split into
//! one self-contained HTML fragment per source line, so pages can number and
//! anchor lines individually.

use std::path::Path;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result};
use crate::util::contents_to_lines;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Line-oriented highlighter backed by syntect's default syntaxes.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Picks a syntax by extension, then by file name, then by first line;
    /// plain text otherwise.
    fn syntax_for(&self, file_name: &str, content: &str) -> &SyntaxReference {
        let path = Path::new(file_name);
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.syntax_set.find_syntax_by_extension(ext))
            .or_else(|| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|name| self.syntax_set.find_syntax_by_extension(name))
            })
            .or_else(|| {
                content
                    .lines()
                    .next()
                    .and_then(|line| self.syntax_set.find_syntax_by_first_line(line))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlights `content` and returns one HTML fragment per line.
    ///
    /// The number of fragments equals `contents_to_lines(content).len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if syntect fails to parse a line.
    pub fn highlight_lines(&self, file_name: &str, content: &str) -> Result<Vec<String>> {
        let syntax = self.syntax_for(file_name, content);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(content) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| Error::render(format!("highlighting of {}", file_name), e))?;
        }

        let mut lines = split_balanced_lines(&generator.finalize());
        lines.resize(contents_to_lines(content).len(), String::new());
        Ok(lines)
    }

    /// Stylesheet for the highlighting classes in the named theme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the theme is unknown or cannot be
    /// converted to CSS.
    pub fn stylesheet(&self, theme: &str) -> Result<String> {
        let theme = self
            .theme_set
            .themes
            .get(theme)
            .ok_or_else(|| Error::render("stylesheet", format!("unknown theme '{}'", theme)))?;
        css_for_theme_with_class_style(theme, CLASS_STYLE)
            .map_err(|e| Error::render("stylesheet", e))
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits highlighted HTML at newlines, closing spans still open at the end
/// of a line and reopening them at the start of the next.
fn split_balanced_lines(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut open: Vec<&str> = Vec::new();

    for raw in html.split('\n') {
        let mut line = open.concat();
        line.push_str(raw);

        let mut rest = raw;
        while let Some(start) = rest.find('<') {
            let tail = &rest[start..];
            let Some(end) = tail.find('>') else {
                break;
            };
            let tag = &tail[..=end];
            if tag.starts_with("</") {
                open.pop();
            } else if !tag.ends_with("/>") {
                open.push(tag);
            }
            rest = &tail[end + 1..];
        }

        for _ in 0..open.len() {
            line.push_str("</span>");
        }
        lines.push(line);
    }

    lines
}
