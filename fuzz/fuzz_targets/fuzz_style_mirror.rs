//! Fuzz target for the style highlighter and the live style sheet.
//!
//! Typing text one character at a time must produce the same markup as a
//! single pass, and neither the markup nor the sheet may panic the renderer.

#![no_main]

use libfuzzer_sys::fuzz_target;
use typedesk::renderer::{Whitespace, styled_lines};
use typedesk::typewriter::{StyleMirror, StyleSheet};

fuzz_target!(|text: &str| {
    let mut mirror = StyleMirror::new();
    let mut markup = String::new();
    for ch in text.chars() {
        mirror.push(&mut markup, ch);
    }
    assert_eq!(markup, StyleMirror::render(text));

    let _ = styled_lines(&markup, Whitespace::Pre);

    let mut sheet = StyleSheet::new();
    sheet.push_str(text);
    for rule in sheet.rules() {
        let _ = sheet.lookup(&rule.selector, "color");
    }
});
