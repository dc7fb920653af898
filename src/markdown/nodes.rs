//! Node kind helpers for the tree-sitter-md block and inline grammars

use std::ops::Range;

use tree_sitter::Node;

pub const ATX_HEADING: &str = "atx_heading";
pub const SETEXT_HEADING: &str = "setext_heading";
pub const INLINE: &str = "inline";
pub const FENCED_CODE_BLOCK: &str = "fenced_code_block";
pub const INDENTED_CODE_BLOCK: &str = "indented_code_block";
pub const INFO_STRING: &str = "info_string";
pub const CODE_FENCE_CONTENT: &str = "code_fence_content";
pub const PIPE_TABLE_CELL: &str = "pipe_table_cell";
pub const PIPE_TABLE_HEADER: &str = "pipe_table_header";
pub const PIPE_TABLE_DELIMITER_ROW: &str = "pipe_table_delimiter_row";
pub const LINK_DESTINATION: &str = "link_destination";
pub const TABLE_PIPE: &str = "|";

/// Whether `node` is an ATX or setext heading
pub fn is_heading(node: &Node) -> bool {
    matches!(node.kind(), ATX_HEADING | SETEXT_HEADING)
}

/// Heading level (1-6) from the digit in the marker or underline child kind
/// (`atx_h2_marker`, `setext_h1_underline`).
pub fn heading_level(node: &Node) -> Option<u8> {
    if !is_heading(node) {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = child.kind();
        if !(kind.ends_with("_marker") || kind.ends_with("_underline")) {
            continue;
        }
        if let Some(digit) = kind.chars().find_map(|c| c.to_digit(10)) {
            return Some(digit.clamp(1, 6) as u8);
        }
    }

    // Setext headings without an underline child cannot occur; ATX fallback
    Some(1)
}

/// Heading text with markers and surrounding whitespace removed
pub fn heading_text(node: &Node, source: &[u8]) -> String {
    if let Some(content) = node.child_by_field_name("heading_content") {
        let text = node_text(&content, source).trim();
        if node.kind() == ATX_HEADING {
            return strip_closing_hashes(text).to_string();
        }
        return text.to_string();
    }

    // Fallback: extract from the full heading text
    let full = node_text(node, source);
    if node.kind() == ATX_HEADING {
        strip_closing_hashes(full.trim().trim_start_matches('#').trim()).to_string()
    } else {
        full.lines().next().unwrap_or("").trim().to_string()
    }
}

/// Styled extent of a heading.
///
/// An ATX heading ends at its own line ending; inside a container the node
/// also spans the next line's continuation prefix (`> `), which is cut off.
pub fn heading_range(node: &Node, source: &[u8]) -> Range<usize> {
    let range = node_range(node, source);
    if node.kind() != ATX_HEADING {
        return range;
    }
    match source[range.clone()].iter().position(|&b| b == b'\n') {
        Some(newline) => range.start..range.start + newline + 1,
        None => range,
    }
}

/// Drop an optional closing `###` sequence from ATX heading content
fn strip_closing_hashes(text: &str) -> &str {
    let stripped = text.trim_end_matches('#');
    if stripped.len() == text.len() {
        return text;
    }
    if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
        stripped.trim_end()
    } else {
        text
    }
}

/// First direct child of `node` with the given kind
pub fn child_of_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Byte range of `node` clamped to `source`.
///
/// The block tree is parsed with one virtual line ending after the buffer,
/// so nodes closing at end of input may extend one byte past it.
pub fn node_range(node: &Node, source: &[u8]) -> Range<usize> {
    let end = node.end_byte().min(source.len());
    node.start_byte().min(end)..end
}

/// Node text as UTF-8, empty on invalid bytes
pub fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node_range(node, source)]).unwrap_or("")
}
