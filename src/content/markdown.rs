//! Markdown rendering with pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

use crate::content::MarkdownRenderer;

/// CommonMark with tables and strikethrough.
#[derive(Clone, Copy, Debug)]
pub struct CommonMark {
    options: Options,
}

impl CommonMark {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
        }
    }
}

impl Default for CommonMark {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for CommonMark {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_lists() {
        let html = CommonMark::new().render("# Work\n\n- one\n- two\n");
        assert!(html.contains("<h1>Work</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_inline_links_render_as_anchors() {
        let html = CommonMark::new().render("[site](https://example.com)");
        assert!(html.contains("<a href=\"https://example.com\">site</a>"));
    }

    #[test]
    fn test_strikethrough_enabled() {
        let html = CommonMark::new().render("~~old~~");
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_default_keeps_extensions() {
        let md = CommonMark::default();
        assert!(md.render("~~old~~").contains("<del>old</del>"));
        assert!(md.render("| a |\n|---|\n| 1 |\n").contains("<table>"));
    }
}
