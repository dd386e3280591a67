//! Markdown rendering with GitHub Flavored Markdown support.

use comrak::Options;

use super::AssetLinkResolver;

/// Renders markdown to HTML with GFM extensions and raw HTML passthrough.
///
/// Image sources in the output, whether written as markdown images or as raw
/// `<img>` tags, are rewritten through [`AssetLinkResolver`].
pub struct MarkdownRenderer {
    options: Options<'static>,
    images: AssetLinkResolver,
}

impl MarkdownRenderer {
    /// Creates a renderer for the repository named `repo_name`.
    ///
    /// Enables tables, strikethrough, autolinks, task lists and footnotes.
    /// Raw HTML in the source is emitted unchanged.
    pub fn new(repo_name: impl Into<String>) -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        options.render.unsafe_ = true;

        Self {
            options,
            images: AssetLinkResolver::new(repo_name),
        }
    }

    /// Renders markdown content to an HTML fragment.
    pub fn render(&self, content: &str) -> String {
        let html = comrak::markdown_to_html(content, &self.options);
        self.rewrite_images(&html)
    }

    /// Rewrites the `src` attribute of every `<img` tag in `html`.
    fn rewrite_images(&self, html: &str) -> String {
        let mut result = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(found) = html[pos..].find("<img") {
            let tag_start = pos + found;
            let Some(tag_len) = html[tag_start..].find('>') else {
                break;
            };
            let tag_end = tag_start + tag_len;
            let tag = &html[tag_start..tag_end];

            result.push_str(&html[pos..tag_start]);
            result.push_str(&self.rewrite_tag(tag));
            pos = tag_end;
        }

        result.push_str(&html[pos..]);
        result
    }

    fn rewrite_tag(&self, tag: &str) -> String {
        let Some(attr) = tag.find("src=") else {
            return tag.to_string();
        };
        let value_start = attr + "src=".len();
        let Some(quote) = tag[value_start..].chars().next().filter(|c| *c == '"' || *c == '\'')
        else {
            return tag.to_string();
        };
        let Some(value_len) = tag[value_start + 1..].find(quote) else {
            return tag.to_string();
        };
        let value_end = value_start + 1 + value_len;

        match self.images.resolve(&tag[value_start + 1..value_end]) {
            Some(resolved) => format!(
                "{}{}{}",
                &tag[..value_start + 1],
                resolved,
                &tag[value_end..]
            ),
            None => tag.to_string(),
        }
    }
}
