//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use token_markdown::{EditDescriptor, MarkdownParser, StyleCategory, StyleRun};

/// A parser that has already parsed `text`
pub fn parsed(text: &str) -> MarkdownParser {
    let mut parser = MarkdownParser::new();
    parser.parse(text).expect("full parse");
    parser
}

/// Replace `old` with `new` in the parser through a single incremental edit
pub fn edit_to(parser: &mut MarkdownParser, old: &str, new: &str) {
    let edit = EditDescriptor::from_texts(old, new).expect("texts differ");
    parser.apply_edit(new, &edit).expect("incremental edit");
}

/// `(offset, length, category)` triples, in generation order
pub fn run_summary(runs: &[StyleRun]) -> Vec<(usize, usize, StyleCategory)> {
    runs.iter().map(|r| (r.offset, r.length, r.category)).collect()
}

/// Source text covered by the first run of `category`
pub fn text_of_first<'s>(
    source: &'s str,
    runs: &[StyleRun],
    category: StyleCategory,
) -> Option<&'s str> {
    runs.iter()
        .find(|r| r.category == category)
        .map(|r| &source[r.offset..r.end()])
}
