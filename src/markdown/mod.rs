//! Markdown structural parsing
//!
//! [`MarkdownParser`] keeps a block-level tree in sync with an edited buffer
//! and derives style runs and the heading outline from it.

pub mod edit;
pub mod inline;
pub mod nodes;
mod parser;

pub use edit::{byte_to_point, EditDescriptor, TextPoint};
pub use inline::{InlineParser, InlineTree};
pub use parser::MarkdownParser;
