//! Static page content and the collaborators that transform it.
//!
//! The desk treats markdown rendering, link rewriting and vendor-prefix
//! detection as black boxes behind small traits. The defaults here render
//! with `pulldown-cmark`, autolink bare URLs with a regex, and report the
//! `-webkit-` prefix the built-in styles are written with.

mod links;
mod markdown;
mod prefix;

pub use links::UrlAutolinker;
pub use markdown::CommonMark;
pub use prefix::{FixedPrefix, SOURCE_PREFIX};

/// Markdown to HTML.
pub trait MarkdownRenderer {
    fn render(&self, text: &str) -> String;
}

/// Rewrites URLs in rendered HTML into links.
pub trait LinkRewriter {
    fn rewrite_links(&self, html: &str) -> String;
}

/// Reports the vendor prefix to substitute into the style fragments.
pub trait PrefixDetector {
    fn detect_prefix(&self) -> String;
}

/// The three collaborators a page runs with.
pub struct Collaborators {
    pub markdown: Box<dyn MarkdownRenderer>,
    pub links: Box<dyn LinkRewriter>,
    pub prefix: Box<dyn PrefixDetector>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            markdown: Box::new(CommonMark::new()),
            links: Box::new(UrlAutolinker::new()),
            prefix: Box::new(FixedPrefix::default()),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Everything the page types, renders or injects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    /// Markup for the header element.
    pub header_html: String,
    /// Portfolio markdown, typed as plain text then rendered.
    pub work_text: String,
    /// Ordered style fragments: intro, dock, markdown, polish.
    pub style_fragments: [String; 4],
    /// Styles injected before the animation starts.
    pub pre_styles: String,
}

impl Payload {
    /// The portfolio shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            header_html: include_str!("../../assets/header.html").to_string(),
            work_text: include_str!("../../assets/work.md").to_string(),
            style_fragments: [
                include_str!("../../assets/styles0.css").to_string(),
                include_str!("../../assets/styles1.css").to_string(),
                include_str!("../../assets/styles2.css").to_string(),
                include_str!("../../assets/styles3.css").to_string(),
            ],
            pre_styles: include_str!("../../assets/prestyles.css").to_string(),
        }
    }

    /// Replace every `-webkit-` in the style fragments with `prefix`.
    pub fn apply_prefix(&mut self, prefix: &str) {
        if prefix == SOURCE_PREFIX {
            return;
        }
        for fragment in &mut self.style_fragments {
            *fragment = fragment.replace(SOURCE_PREFIX, prefix);
        }
    }

    /// All style fragments joined, as typed by a complete run.
    #[must_use]
    pub fn style_text(&self) -> String {
        self.style_fragments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Payload {
        Payload {
            header_html: String::new(),
            work_text: String::new(),
            style_fragments: [
                "a { -webkit-transition: none; }\n".to_string(),
                String::new(),
                "b { -webkit-transform: none; -webkit-filter: none; }\n".to_string(),
                "c {}\n".to_string(),
            ],
            pre_styles: String::new(),
        }
    }

    #[test]
    fn test_prefix_substitution() {
        let mut p = payload();
        p.apply_prefix("-moz-");
        assert_eq!(p.style_fragments[0], "a { -moz-transition: none; }\n");
        assert_eq!(
            p.style_fragments[2],
            "b { -moz-transform: none; -moz-filter: none; }\n"
        );
    }

    #[test]
    fn test_empty_prefix_strips_vendor() {
        let mut p = payload();
        p.apply_prefix("");
        assert_eq!(p.style_fragments[0], "a { transition: none; }\n");
    }

    #[test]
    fn test_builtin_payload_is_complete() {
        let p = Payload::builtin();
        assert!(!p.header_html.is_empty());
        assert!(p.work_text.starts_with('#'));
        assert!(p.style_fragments.iter().all(|f| !f.is_empty()));
        assert!(p.style_text().contains("#style-text"));
        assert!(!p.pre_styles.is_empty());
    }
}
