//! Classified lexical tokens produced by the code tokenizer

use serde::Serialize;

/// Coarse token classes used to color code block contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Type,
    Function,
    Variable,
    String,
    Number,
    Comment,
    Operator,
    Normal,
}

/// A classified span within a code snippet (byte offsets local to the snippet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxToken {
    pub offset: usize,
    pub length: usize,
    pub kind: TokenKind,
}

impl SyntaxToken {
    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Classify a tree-sitter node type label.
///
/// Rules are checked in order, first match wins. Anonymous nodes are only
/// eligible for the short-alphabetic keyword rule.
pub fn classify_node_kind(kind: &str, is_named: bool) -> TokenKind {
    if !is_named {
        let len = kind.chars().count();
        if (2..=15).contains(&len) && kind.chars().all(|c| c.is_ascii_alphabetic()) {
            return TokenKind::Keyword;
        }
        return TokenKind::Normal;
    }

    if kind.contains("comment") {
        TokenKind::Comment
    } else if kind.contains("string") || kind.contains("char") {
        TokenKind::String
    } else if kind.contains("number") || kind.contains("integer") || kind.contains("float") {
        TokenKind::Number
    } else if kind.contains("type") {
        TokenKind::Type
    } else if kind.contains("function") || kind.contains("method") {
        TokenKind::Function
    } else if kind.contains("operator") {
        TokenKind::Operator
    } else if kind.contains("keyword") {
        TokenKind::Keyword
    } else if kind == "identifier" || kind.contains("variable") {
        TokenKind::Variable
    } else {
        TokenKind::Normal
    }
}
