//! Code block syntax tokenizer
//!
//! Provides tree-sitter based tokenization for fenced code blocks:
//! - Case-insensitive language alias registry
//! - Stateless per-call tokenizing (fresh parser per snippet)
//! - Heuristic token classification from node type labels
//!
//! ## Supported Languages
//!
//! YAML, Rust, HTML, CSS, JavaScript, TypeScript/TSX, JSON, TOML, Python,
//! Go, PHP, C, C++, Java, Bash, Scheme/Racket, INI, XML

mod languages;
mod tokenizer;
mod tokens;

pub use languages::{LanguageId, ALL_LANGUAGES};
pub use tokenizer::SyntaxTokenizer;
pub use tokens::{classify_node_kind, SyntaxToken, TokenKind};
