//! Fuzz target for the terminal input parser.
//!
//! Arbitrary bytes must never panic the parser, and `parse_all` must never
//! claim more bytes than it was given.

#![no_main]

use libfuzzer_sys::fuzz_target;
use typedesk::input::{InputParser, ParseError};

fuzz_target!(|data: &[u8]| {
    let mut parser = InputParser::new();

    let (_, used) = parser.parse_all(data);
    assert!(used <= data.len());

    let mut remaining = data;
    let mut iterations = 0;
    const MAX_ITERATIONS: usize = 10000;

    while !remaining.is_empty() && iterations < MAX_ITERATIONS {
        iterations += 1;
        match parser.parse(remaining) {
            Ok((_event, consumed)) => {
                assert!(consumed > 0, "parser consumed nothing");
                remaining = &remaining[consumed.min(remaining.len())..];
            }
            Err(ParseError::Empty | ParseError::Incomplete) => break,
            Err(ParseError::Unrecognized(_) | ParseError::InvalidUtf8) => {
                remaining = &remaining[1..];
            }
        }
    }

    assert!(
        iterations < MAX_ITERATIONS,
        "Parser appears to be in an infinite loop"
    );
});
