//! Inline grammar instance
//!
//! tree-sitter-md only expresses inline formatting (emphasis, code spans,
//! links) when the inline grammar parses a block's inline content in
//! isolation. Each region is parsed standalone, so node offsets in an
//! [`InlineTree`] are local to the region and must be translated by the
//! region's base offset. Nodes are never shared between the block tree and
//! inline trees.

use std::ops::Range;

use tree_sitter::{Language, LanguageError, Node, Parser, Tree};

/// Second grammar instance dedicated to inline content
pub struct InlineParser {
    parser: Parser,
}

/// An inline CST over one region of the document
pub struct InlineTree {
    tree: Tree,
    base_offset: usize,
}

impl InlineParser {
    pub fn new() -> Result<Self, LanguageError> {
        let language: Language = tree_sitter_md::INLINE_LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parse `source[range]` standalone with the inline grammar.
    ///
    /// Returns `None` for empty or out-of-bounds regions.
    pub fn parse_region(&mut self, source: &[u8], range: Range<usize>) -> Option<InlineTree> {
        if range.start >= range.end || range.end > source.len() {
            return None;
        }
        let tree = self.parser.parse(&source[range.clone()], None)?;
        Some(InlineTree {
            tree,
            base_offset: range.start,
        })
    }
}

impl InlineTree {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Document offset of the region start
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Translate a region-local offset to a document offset
    pub fn to_document(&self, local: usize) -> usize {
        self.base_offset + local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_translate_by_base() {
        let mut parser = InlineParser::new().unwrap();
        let source = b"xxxxSome **bold** text.";
        let tree = parser.parse_region(source, 4..source.len()).unwrap();

        assert_eq!(tree.base_offset(), 4);
        assert_eq!(tree.to_document(0), 4);
        assert_eq!(tree.root_node().start_byte(), 0);
    }

    #[test]
    fn test_empty_region() {
        let mut parser = InlineParser::new().unwrap();
        assert!(parser.parse_region(b"abc", 2..2).is_none());
        assert!(parser.parse_region(b"abc", 1..10).is_none());
    }
}
