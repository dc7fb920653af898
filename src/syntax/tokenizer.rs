//! Standalone tokenizer for fenced code block contents
//!
//! Parses a snippet with the language's tree-sitter grammar and classifies
//! nodes by their type label. A fresh parser is created per call so the
//! tokenizer itself holds nothing but the read-only language registry.

use std::collections::HashMap;

use tree_sitter::{Language, Node, Parser};

use super::languages::{LanguageId, ALL_LANGUAGES};
use super::tokens::{classify_node_kind, SyntaxToken, TokenKind};

/// Language-keyed code tokenizer
pub struct SyntaxTokenizer {
    grammars: HashMap<LanguageId, Language>,
}

impl SyntaxTokenizer {
    /// Create a tokenizer with every built-in grammar registered
    pub fn new() -> Self {
        let grammars = ALL_LANGUAGES
            .iter()
            .map(|lang| (*lang, lang.grammar()))
            .collect();
        Self { grammars }
    }

    /// Whether `name` (any alias, case-insensitive) has a registered grammar
    pub fn supports_language(&self, name: &str) -> bool {
        LanguageId::from_alias(name).is_some_and(|lang| self.grammars.contains_key(&lang))
    }

    /// Canonical names of all registered languages, sorted
    pub fn supported_languages(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.grammars.keys().map(|lang| lang.name()).collect();
        names.sort_unstable();
        names
    }

    /// Tokenize `code` as `language`.
    ///
    /// Returns an empty list for unknown languages or when the grammar fails
    /// to produce a tree. Tokens are sorted by offset.
    pub fn tokenize(&self, code: &str, language: &str) -> Vec<SyntaxToken> {
        let Some(lang) = LanguageId::from_alias(language) else {
            return Vec::new();
        };
        let Some(grammar) = self.grammars.get(&lang) else {
            return Vec::new();
        };
        if code.is_empty() {
            return Vec::new();
        }

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(grammar) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return Vec::new();
        }

        let Some(tree) = parser.parse(code, None) else {
            tracing::warn!("Tokenizer parse failed for {:?}", lang);
            return Vec::new();
        };

        let mut tokens = Vec::new();
        collect_tokens(tree.root_node(), &mut tokens);
        tokens.sort_by_key(|t| (t.offset, t.length));

        tracing::trace!("Tokenized {} bytes of {:?} into {} tokens", code.len(), lang, tokens.len());
        tokens
    }
}

impl Default for SyntaxTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_tokens(node: Node, tokens: &mut Vec<SyntaxToken>) {
    let kind = classify_node_kind(node.kind(), node.is_named());
    let length = node.end_byte() - node.start_byte();
    if kind != TokenKind::Normal && length > 0 {
        tokens.push(SyntaxToken {
            offset: node.start_byte(),
            length,
            kind,
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_is_empty() {
        let tokenizer = SyntaxTokenizer::new();
        assert!(tokenizer.tokenize("int x = 1;", "cobol").is_empty());
        assert!(!tokenizer.supports_language("cobol"));
    }

    #[test]
    fn test_empty_code_is_empty() {
        let tokenizer = SyntaxTokenizer::new();
        assert!(tokenizer.tokenize("", "rust").is_empty());
    }

    #[test]
    fn test_supports_aliases_case_insensitively() {
        let tokenizer = SyntaxTokenizer::new();
        assert!(tokenizer.supports_language("js"));
        assert!(tokenizer.supports_language("JavaScript"));
        assert!(tokenizer.supports_language("CPP"));
        assert!(tokenizer.supports_language("py"));
    }

    #[test]
    fn test_supported_languages_sorted() {
        let tokenizer = SyntaxTokenizer::new();
        let names = tokenizer.supported_languages();
        assert_eq!(names.len(), ALL_LANGUAGES.len());
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"rust"));
    }

    #[test]
    fn test_cpp_declaration_tokens() {
        let tokenizer = SyntaxTokenizer::new();
        let code = "int x = 1; // c";
        let tokens = tokenizer.tokenize(code, "cpp");

        let comment = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Comment)
            .expect("comment token");
        assert_eq!(comment.offset, 11);
        assert_eq!(&code[comment.offset..comment.end()], "// c");

        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Type && &code[t.offset..t.end()] == "int"));
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Number && &code[t.offset..t.end()] == "1"));
    }

    #[test]
    fn test_tokens_sorted_and_deterministic() {
        let tokenizer = SyntaxTokenizer::new();
        let first = tokenizer.tokenize("int x = 1; // c", "cpp");
        let second = tokenizer.tokenize("int x = 1; // c", "cpp");
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0].offset <= w[1].offset));
    }

    #[test]
    fn test_rust_keywords_and_strings() {
        let tokenizer = SyntaxTokenizer::new();
        let code = "fn main() { let s = \"hi\"; }";
        let tokens = tokenizer.tokenize(code, "rust");

        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Keyword && &code[t.offset..t.end()] == "fn"));
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::String && code[t.offset..t.end()].contains("hi")));
    }
}
