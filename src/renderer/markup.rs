//! Surface markup to styled text lines.
//!
//! Handles the small HTML subset surfaces carry: highlighted `<span>`s from
//! the style mirror, rendered markdown, and the header. Unknown tags are
//! dropped; their text is kept.

/// What a run of text represents, for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Plain,
    Comment,
    Selector,
    Key,
    Value,
    /// A numeric value with a unit (`value px`).
    Px,
    Heading,
    Link,
    Code,
}

impl Role {
    /// Class selector whose `color` tints this role.
    #[must_use]
    pub fn selector(self) -> Option<&'static str> {
        match self {
            Self::Comment => Some(".comment"),
            Self::Selector => Some(".selector"),
            Self::Key => Some(".key"),
            Self::Value => Some(".value"),
            Self::Px => Some(".px"),
            Self::Link => Some("a"),
            Self::Plain | Self::Heading | Self::Code => None,
        }
    }

    fn from_class(class: &str) -> Option<Self> {
        let mut classes = class.split_whitespace();
        let first = classes.next()?;
        let role = match first {
            "comment" => Self::Comment,
            "selector" => Self::Selector,
            "key" => Self::Key,
            "value" if classes.any(|c| c == "px") => Self::Px,
            "value" => Self::Value,
            _ => return None,
        };
        Some(role)
    }
}

/// A run of text with one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub role: Role,
    /// `id` of the enclosing anchor, if it has one.
    pub anchor: Option<String>,
}

pub type Line = Vec<Span>;

/// How text whitespace is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whitespace {
    /// Newlines break lines and spaces are kept (`<pre>` content).
    Pre,
    /// Runs of whitespace collapse to one space; only tags break lines.
    Normal,
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "pre", "blockquote", "table",
    "tr", "hr",
];

struct Builder {
    lines: Vec<Line>,
    roles: Vec<(Role, Option<String>)>,
    pre_depth: usize,
    mode: Whitespace,
    pending_space: bool,
}

impl Builder {
    fn new(mode: Whitespace) -> Self {
        Self {
            lines: vec![Vec::new()],
            roles: Vec::new(),
            pre_depth: 0,
            mode,
            pending_space: false,
        }
    }

    fn role(&self) -> Role {
        self.roles.last().map_or(Role::Plain, |(role, _)| *role)
    }

    fn anchor(&self) -> Option<String> {
        self.roles.iter().rev().find_map(|(_, anchor)| anchor.clone())
    }

    fn preformatted(&self) -> bool {
        self.mode == Whitespace::Pre || self.pre_depth > 0
    }

    fn current_is_empty(&self) -> bool {
        self.lines.last().is_none_or(|line| line.iter().all(|s| s.text.is_empty()))
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let role = self.role();
        let anchor = self.anchor();
        if let Some(line) = self.lines.last_mut() {
            match line.last_mut() {
                Some(span) if span.role == role && span.anchor == anchor => {
                    span.text.push_str(text);
                }
                _ => line.push(Span {
                    text: text.to_string(),
                    role,
                    anchor,
                }),
            }
        }
    }

    fn newline(&mut self) {
        self.pending_space = false;
        self.lines.push(Vec::new());
    }

    /// Start a new line unless the current one is still empty.
    fn block_break(&mut self) {
        if !self.current_is_empty() {
            self.newline();
        }
        self.pending_space = false;
    }

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        if self.preformatted() {
            let mut parts = decoded.split('\n');
            if let Some(first) = parts.next() {
                self.push_text(first);
            }
            for part in parts {
                self.newline();
                self.push_text(part);
            }
            return;
        }
        for (i, word) in decoded.split_whitespace().enumerate() {
            let space_before = i > 0 || decoded.starts_with(char::is_whitespace) || self.pending_space;
            if space_before && !self.current_is_empty() {
                self.push_text(" ");
            }
            self.pending_space = false;
            self.push_text(word);
        }
        if decoded.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn tag(&mut self, tag: &str) {
        let closing = tag.starts_with('/');
        let body = tag.trim_start_matches('/').trim_end_matches('/');
        let name_end = body.find(|c: char| c.is_whitespace()).unwrap_or(body.len());
        let name = body[..name_end].to_ascii_lowercase();
        let attrs = &body[name_end..];

        match (name.as_str(), closing) {
            ("br", _) => self.newline(),
            ("span", false) => {
                let role = attribute(attrs, "class")
                    .and_then(|c| Role::from_class(&c))
                    .unwrap_or_else(|| self.role());
                self.roles.push((role, None));
            }
            ("a", false) => self.roles.push((Role::Link, attribute(attrs, "id"))),
            ("code", false) => self.roles.push((Role::Code, None)),
            ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", false) => {
                self.block_break();
                self.roles.push((Role::Heading, None));
            }
            ("span" | "a" | "code", true) | ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", true) => {
                self.roles.pop();
                if name.starts_with('h') {
                    self.block_break();
                }
            }
            ("pre", false) => {
                self.block_break();
                self.pre_depth += 1;
            }
            ("pre", true) => {
                self.pre_depth = self.pre_depth.saturating_sub(1);
                self.block_break();
            }
            ("li", false) => {
                self.block_break();
                self.push_text("• ");
            }
            ("hr", _) => {
                self.block_break();
                self.push_text("────");
                self.newline();
            }
            (name, _) if BLOCK_TAGS.contains(&name) => self.block_break(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line> {
        while self.lines.len() > 1 && self.current_is_empty() {
            self.lines.pop();
        }
        self.lines
    }
}

/// Split `markup` into styled lines.
#[must_use]
pub fn styled_lines(markup: &str, mode: Whitespace) -> Vec<Line> {
    let mut builder = Builder::new(mode);
    let mut rest = markup;
    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => match rest.find('>') {
                Some(end) => {
                    builder.tag(&rest[1..end]);
                    rest = &rest[end + 1..];
                }
                None => {
                    // unterminated tag while it is being typed
                    break;
                }
            },
            Some(start) => {
                builder.text(&rest[..start]);
                rest = &rest[start..];
            }
            None => {
                builder.text(rest);
                rest = "";
            }
        }
    }
    builder.finish()
}

/// Value of `name="..."` (or single-quoted) in a tag's attribute text.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    let mut rest = attrs;
    while let Some(pos) = rest.find(name) {
        let after = rest[pos + name.len()..].trim_start();
        if let Some(value) = after.strip_prefix('=') {
            let value = value.trim_start();
            let quote = value.chars().next()?;
            if quote == '"' || quote == '\'' {
                let inner = &value[1..];
                return inner.find(quote).map(|end| inner[..end].to_string());
            }
        }
        rest = &rest[pos + name.len()..];
    }
    None
}

/// Decode the entities pulldown-cmark and the mirror emit.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|end| *end <= 10).and_then(|end| {
            let entity = &rest[1..end];
            let ch = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            }?;
            Some((ch, end))
        });
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
