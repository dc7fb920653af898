//! Incremental Markdown structure for editors
//!
//! A [`MarkdownParser`] keeps a tree-sitter syntax tree in sync with an
//! edited buffer and derives three views from it on every change:
//! overlapping [`StyleRun`]s for rendering, a heading outline, and syntax
//! tokens for fenced code blocks.

pub mod cli;
pub mod config_paths;
pub mod error;
pub mod markdown;
pub mod outline;
pub mod side_table;
pub mod style;
pub mod syntax;
pub mod tracing;

// Re-export commonly used types
pub use error::ParseError;
pub use markdown::{EditDescriptor, MarkdownParser, TextPoint};
pub use outline::{Heading, HeadingRecord};
pub use side_table::{RangeKey, RangeStateTable};
pub use style::{StyleCategory, StyleConfiguration, StyleRun};
pub use syntax::{LanguageId, SyntaxToken, SyntaxTokenizer, TokenKind};
