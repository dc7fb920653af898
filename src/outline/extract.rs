//! Flat outline extraction with structural parents
//!
//! Depth-first walk threading the current parent offset. Inside a
//! container, each recorded heading becomes the parent for whatever
//! follows it in that container (and for its own children); leaving the
//! container restores the parent the container was entered with.
//! tree-sitter-md wraps each heading and its body in a `section`, so a
//! sub-section heading gets the heading opening its enclosing section.

use tree_sitter::{Node, Tree};

use super::{Heading, HeadingRecord};
use crate::markdown::nodes::is_heading;

/// Build the document-order heading list for `tree`
pub fn build_outline(tree: &Tree, source: &[u8]) -> Vec<HeadingRecord> {
    let mut records = Vec::new();
    walk_container(tree.root_node(), source, None, &mut records);
    records
}

/// Walk the children of `node` with `parent_offset` as the incoming parent
fn walk_container(
    node: Node,
    source: &[u8],
    parent_offset: Option<usize>,
    records: &mut Vec<HeadingRecord>,
) {
    let mut current_parent = parent_offset;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if is_heading(&child) {
            if let Some(heading) = Heading::from_node(&child, source) {
                let offset = heading.offset;
                records.push(HeadingRecord {
                    level: heading.level,
                    text: heading.text,
                    offset,
                    length: heading.length,
                    structural_parent_offset: current_parent,
                });
                walk_container(child, source, Some(offset), records);
                current_parent = Some(offset);
                continue;
            }
        }
        walk_container(child, source, current_parent, records);
    }
}
