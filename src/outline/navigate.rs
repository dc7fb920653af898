//! Level-based heading navigation
//!
//! Computed directly over the block tree on demand. "Parent" here means the
//! nearest preceding heading with a smaller level, which is what
//! breadcrumbs and outline navigation need; it ignores structural nesting.

use tree_sitter::Tree;

use super::Heading;
use crate::markdown::nodes::is_heading;

/// Every heading in document order (cursor traversal, no recursion)
pub fn find_all_headings(tree: &Tree, source: &[u8]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        if is_heading(&node) {
            if let Some(heading) = Heading::from_node(&node, source) {
                headings.push(heading);
            }
        } else if cursor.goto_first_child() {
            // Headings never contain headings, so only descend into others
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return headings;
            }
        }
    }
}

/// Heading containing `offset`: smallest node at `offset`, then up the
/// parent chain until a heading is found
pub fn heading_at_offset(tree: &Tree, source: &[u8], offset: usize) -> Option<Heading> {
    let mut node = tree
        .root_node()
        .descendant_for_byte_range(offset, offset)?;

    loop {
        if is_heading(&node) {
            return Heading::from_node(&node, source);
        }
        node = node.parent()?;
    }
}

/// Nearest preceding heading with a strictly smaller level.
///
/// When `offset` is inside a heading, that heading's level is the bound and
/// the scan starts before it. Otherwise any preceding heading qualifies, so
/// the result is the heading whose section contains `offset`.
pub fn find_parent_heading(tree: &Tree, source: &[u8], offset: usize) -> Option<Heading> {
    let headings = find_all_headings(tree, source);
    let current = heading_at_offset(tree, source, offset);
    parent_among(&headings, offset, current.as_ref())
}

fn parent_among(headings: &[Heading], offset: usize, current: Option<&Heading>) -> Option<Heading> {
    let (boundary, level) = match current {
        Some(heading) => (heading.offset, heading.level),
        None => (offset.saturating_add(1), u8::MAX),
    };

    headings
        .iter()
        .rev()
        .filter(|h| h.offset < boundary)
        .find(|h| h.level < level)
        .cloned()
}

/// Headings at the same level as `heading` under the same level-based
/// parent, in document order (including `heading` itself).
///
/// The scope runs from the parent to the next heading at or above the
/// parent's level; without a parent it is the whole document.
pub fn find_sibling_headings(tree: &Tree, source: &[u8], heading: &Heading) -> Vec<Heading> {
    let headings = find_all_headings(tree, source);
    let parent = parent_among(&headings, heading.offset, Some(heading));

    let (scope_start, scope_end) = match &parent {
        Some(parent) => {
            let end = headings
                .iter()
                .find(|h| h.offset > parent.offset && h.level <= parent.level)
                .map(|h| h.offset)
                .unwrap_or(usize::MAX);
            (parent.end(), end)
        }
        None => (0, usize::MAX),
    };

    headings
        .into_iter()
        .filter(|h| h.level == heading.level && h.offset >= scope_start && h.offset < scope_end)
        .collect()
}

/// Breadcrumb at `offset`, oldest ancestor first.
///
/// Walks headings starting at or before `offset`, popping every stacked
/// heading whose level is at or below the incoming one before pushing it.
pub fn heading_context(tree: &Tree, source: &[u8], offset: usize) -> Vec<Heading> {
    let mut stack: Vec<Heading> = Vec::new();

    for heading in find_all_headings(tree, source) {
        if heading.offset > offset {
            break;
        }
        while stack.last().is_some_and(|top| top.level >= heading.level) {
            stack.pop();
        }
        stack.push(heading);
    }

    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Language, Parser};

    fn parse(source: &str) -> Tree {
        let language: Language = tree_sitter_md::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        parser.parse(source, None).unwrap()
    }

    const DOC: &str = "# H1a\n\n## H2a\n\n## H2b\n\n# H1b\n\n## H2c\n\nbody\n";

    fn texts(headings: &[Heading]) -> Vec<&str> {
        headings.iter().map(|h| h.text.as_str()).collect()
    }

    #[test]
    fn test_find_all_headings() {
        let tree = parse(DOC);
        let headings = find_all_headings(&tree, DOC.as_bytes());
        assert_eq!(texts(&headings), vec!["H1a", "H2a", "H2b", "H1b", "H2c"]);
        assert_eq!(
            headings.iter().map(|h| h.level).collect::<Vec<_>>(),
            vec![1, 2, 2, 1, 2]
        );
    }

    #[test]
    fn test_heading_at_offset() {
        let tree = parse(DOC);
        let h2b = DOC.find("## H2b").unwrap();
        let heading = heading_at_offset(&tree, DOC.as_bytes(), h2b + 4).unwrap();
        assert_eq!(heading.text, "H2b");

        let body = DOC.find("body").unwrap();
        assert!(heading_at_offset(&tree, DOC.as_bytes(), body).is_none());
    }

    #[test]
    fn test_breadcrumb_uses_level_stack() {
        let tree = parse(DOC);
        let inside_last = DOC.find("## H2c").unwrap() + 3;
        let crumbs = heading_context(&tree, DOC.as_bytes(), inside_last);
        assert_eq!(texts(&crumbs), vec!["H1b", "H2c"]);
    }

    #[test]
    fn test_breadcrumb_before_any_heading() {
        let source = "intro\n\n# Later\n";
        let tree = parse(source);
        assert!(heading_context(&tree, source.as_bytes(), 0).is_empty());
    }

    #[test]
    fn test_parent_of_heading() {
        let tree = parse(DOC);
        let h2b = DOC.find("## H2b").unwrap();
        let parent = find_parent_heading(&tree, DOC.as_bytes(), h2b).unwrap();
        assert_eq!(parent.text, "H1a");

        let h1b = DOC.find("# H1b").unwrap();
        assert!(find_parent_heading(&tree, DOC.as_bytes(), h1b).is_none());
    }

    #[test]
    fn test_parent_of_body_text() {
        let tree = parse(DOC);
        let body = DOC.find("body").unwrap();
        let parent = find_parent_heading(&tree, DOC.as_bytes(), body).unwrap();
        assert_eq!(parent.text, "H2c");
    }

    #[test]
    fn test_siblings_scoped_by_parent() {
        let tree = parse(DOC);
        let headings = find_all_headings(&tree, DOC.as_bytes());

        let siblings = find_sibling_headings(&tree, DOC.as_bytes(), &headings[1]);
        assert_eq!(texts(&siblings), vec!["H2a", "H2b"]);

        let siblings = find_sibling_headings(&tree, DOC.as_bytes(), &headings[4]);
        assert_eq!(texts(&siblings), vec!["H2c"]);
    }

    #[test]
    fn test_top_level_siblings_span_document() {
        let tree = parse(DOC);
        let headings = find_all_headings(&tree, DOC.as_bytes());
        let siblings = find_sibling_headings(&tree, DOC.as_bytes(), &headings[0]);
        assert_eq!(texts(&siblings), vec!["H1a", "H1b"]);
    }
}
