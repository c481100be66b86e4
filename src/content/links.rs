//! Bare-URL autolinking for rendered HTML.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::content::LinkRewriter;

/// Existing anchors and any other tag; URLs inside these are left alone.
static PROTECTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b.*?</a>|<[^>]*>").expect("protected regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[\w\-]+(?:\.[\w\-]+)+(?:[\w.,@?^=%&;:/~+#\-]*[\w@?^=%&;/~+#\-])?")
        .expect("url regex")
});

const ANCHOR: &str = "<a href=\"$0\" target=\"_blank\">$0</a>";

/// Wraps bare `http(s)` URLs in text nodes in `<a target="_blank">`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlAutolinker;

impl UrlAutolinker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LinkRewriter for UrlAutolinker {
    fn rewrite_links(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut last = 0;
        for tag in PROTECTED.find_iter(html) {
            out.push_str(&URL.replace_all(&html[last..tag.start()], ANCHOR));
            out.push_str(tag.as_str());
            last = tag.end();
        }
        out.push_str(&URL.replace_all(&html[last..], ANCHOR));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_is_linked() {
        let out = UrlAutolinker.rewrite_links("<p>see https://example.com/x for more</p>");
        assert_eq!(
            out,
            "<p>see <a href=\"https://example.com/x\" target=\"_blank\">https://example.com/x</a> for more</p>"
        );
    }

    #[test]
    fn test_existing_anchor_untouched() {
        let html = "<p><a href=\"https://example.com\">https://example.com</a></p>";
        assert_eq!(UrlAutolinker.rewrite_links(html), html);
    }

    #[test]
    fn test_trailing_punctuation_not_linked() {
        let out = UrlAutolinker.rewrite_links("Visit http://a.io.");
        assert!(out.ends_with("</a>."));
    }

    #[test]
    fn test_text_without_urls_is_unchanged() {
        let html = "<h1>Work</h1>\n<p>Nothing here, http without a scheme.</p>";
        assert_eq!(UrlAutolinker.rewrite_links(html), html);
    }
}
