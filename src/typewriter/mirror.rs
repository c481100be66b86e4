//! Mirroring typed CSS into highlighted markup and a live style sheet.
//!
//! [`StyleMirror`] classifies characters one at a time as they are typed,
//! wrapping comments, selectors, property names and values in `<span>`s.
//! It works on the tail of the markup it has produced so far, so feeding a
//! text character by character and feeding it all at once produce the same
//! markup. [`StyleSheet`] holds the raw CSS the same characters spell out
//! and exposes the rules that are complete enough to apply.

/// Span classes used in the highlighted markup.
pub mod class {
    pub const COMMENT: &str = "comment";
    pub const SELECTOR: &str = "selector";
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";
    pub const PX: &str = "value px";
}

const SPAN_OPEN: &str = "<span";
const SPAN_CLOSE: &str = "</span>";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CommentState {
    #[default]
    Closed,
    /// A `/` was just typed; a `*` next opens a comment.
    Slash,
    Open,
}

/// Incremental CSS highlighter.
#[derive(Clone, Debug, Default)]
pub struct StyleMirror {
    comment: CommentState,
    comment_start: usize,
}

impl StyleMirror {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any open comment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Classify every character of `chunk` into `markup`.
    pub fn push_str(&mut self, markup: &mut String, chunk: &str) {
        for ch in chunk.chars() {
            self.push(markup, ch);
        }
    }

    /// Classify one character into `markup`.
    pub fn push(&mut self, markup: &mut String, ch: char) {
        match self.comment {
            CommentState::Open => {
                if ch == '/' && markup.ends_with('*') {
                    markup.push('/');
                    wrap_from(markup, self.comment_start, class::COMMENT);
                    self.comment = CommentState::Closed;
                } else {
                    push_escaped(markup, ch);
                }
                return;
            }
            CommentState::Slash => {
                if ch == '*' {
                    self.comment = CommentState::Open;
                    markup.push('*');
                    return;
                }
                self.comment = CommentState::Closed;
            }
            CommentState::Closed => {}
        }

        match ch {
            '/' => {
                self.comment_start = markup.len();
                self.comment = CommentState::Slash;
                markup.push('/');
            }
            ':' => {
                let start = key_run_start(markup);
                wrap_from(markup, start, class::KEY);
                markup.push(':');
            }
            ';' => {
                let start = markup.rfind(':').map_or(0, |i| i + 1);
                let start = lift_to_top_level(markup, start);
                wrap_from(markup, start, class::VALUE);
                markup.push(';');
            }
            '{' => {
                let start = markup.rfind('\n').map_or(0, |i| i + 1);
                let start = lift_to_top_level(markup, start);
                wrap_from(markup, start, class::SELECTOR);
                markup.push('{');
            }
            'x' if ends_with_digit_p(markup) => {
                markup.pop();
                markup.push_str("<span class=\"");
                markup.push_str(class::PX);
                markup.push_str("\">px");
                markup.push_str(SPAN_CLOSE);
            }
            _ => push_escaped(markup, ch),
        }
    }

    /// Classify a whole text in one pass.
    #[must_use]
    pub fn render(text: &str) -> String {
        let mut markup = String::with_capacity(text.len() * 2);
        Self::new().push_str(&mut markup, text);
        markup
    }
}

fn push_escaped(markup: &mut String, ch: char) {
    match ch {
        '<' => markup.push_str("&lt;"),
        '>' => markup.push_str("&gt;"),
        '&' => markup.push_str("&amp;"),
        _ => markup.push(ch),
    }
}

/// Wrap `markup[start..]` in a span. Empty tails stay unwrapped.
fn wrap_from(markup: &mut String, start: usize, class: &str) {
    if start >= markup.len() {
        return;
    }
    let open = format!("<span class=\"{class}\">");
    markup.insert_str(start, &open);
    markup.push_str(SPAN_CLOSE);
}

/// Start of the trailing run of property-name characters.
fn key_run_start(markup: &str) -> usize {
    markup
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_ascii_alphabetic() || matches!(c, '-' | ' ' | '^'))
        .last()
        .map_or(markup.len(), |(i, _)| i)
}

fn ends_with_digit_p(markup: &str) -> bool {
    let bytes = markup.as_bytes();
    bytes.len() >= 2 && bytes[bytes.len() - 1] == b'p' && bytes[bytes.len() - 2].is_ascii_digit()
}

/// Move `pos` forward past any span it sits inside, so wrapping from it
/// keeps the markup well nested.
fn lift_to_top_level(markup: &str, pos: usize) -> usize {
    let before = &markup[..pos];
    let mut depth =
        before.matches(SPAN_OPEN).count() as isize - before.matches(SPAN_CLOSE).count() as isize;
    if depth <= 0 {
        return pos;
    }
    let mut i = pos;
    while i < markup.len() {
        let rest = &markup[i..];
        if rest.starts_with(SPAN_CLOSE) {
            depth -= 1;
            i += SPAN_CLOSE.len();
            if depth == 0 {
                return i;
            }
        } else if rest.starts_with(SPAN_OPEN) {
            depth += 1;
            i += SPAN_OPEN.len();
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    markup.len()
}

/// One `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A selector and the declarations typed for it so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// The live style sheet: raw CSS in effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    overrides: String,
    text: String,
}

impl StyleSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text mirrored from typing (or set by an edit).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push_str(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    /// Replace the mirrored text wholesale.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// CSS placed ahead of the typed text.
    pub fn set_overrides(&mut self, css: impl Into<String>) {
        self.overrides = css.into();
    }

    #[must_use]
    pub fn overrides(&self) -> &str {
        &self.overrides
    }

    /// Everything in effect: overrides followed by the typed text.
    #[must_use]
    pub fn css(&self) -> String {
        let mut css = String::with_capacity(self.overrides.len() + self.text.len());
        css.push_str(&self.overrides);
        css.push_str(&self.text);
        css
    }

    /// Rules parsed from [`Self::css`].
    ///
    /// A block still being typed contributes the declarations already closed
    /// by `;`. At-rule blocks are skipped.
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        parse_rules(&strip_comments(&self.css()))
    }

    /// Last value declared for `property` in a rule whose selector list
    /// contains `selector`.
    #[must_use]
    pub fn lookup(&self, selector: &str, property: &str) -> Option<String> {
        self.rules()
            .iter()
            .filter(|rule| rule.selector.split(',').any(|s| s.trim() == selector))
            .flat_map(|rule| rule.declarations.iter())
            .filter(|d| d.property == property)
            .last()
            .map(|d| d.value.clone())
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn parse_rules(css: &str) -> Vec<Rule> {
    let mut rules = Vec::new();
    let mut rest = css;
    while let Some(open) = rest.find('{') {
        let selector = rest[..open].trim();
        let body_start = open + 1;
        if selector.starts_with('@') {
            rest = skip_block(&rest[body_start..]);
            continue;
        }
        let (body, next, closed) = match rest[body_start..].find('}') {
            Some(close) => (
                &rest[body_start..body_start + close],
                &rest[body_start + close + 1..],
                true,
            ),
            None => (&rest[body_start..], "", false),
        };
        let declarations = parse_declarations(body, closed);
        if !selector.is_empty() {
            rules.push(Rule {
                selector: selector.to_string(),
                declarations,
            });
        }
        rest = next;
    }
    rules
}

fn parse_declarations(body: &str, closed: bool) -> Vec<Declaration> {
    let mut parts: Vec<&str> = body.split(';').collect();
    if !closed {
        // the piece after the last ';' is still being typed
        parts.pop();
    }
    parts
        .into_iter()
        .filter_map(|part| {
            let (property, value) = part.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property: property.to_ascii_lowercase(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Skip a (possibly nested) block whose `{` was already consumed.
fn skip_block(s: &str) -> &str {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return &s[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}
