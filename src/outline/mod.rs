//! Heading outline
//!
//! Two views over the same block tree:
//! - [`build_outline`]: document-order flat list with each heading's
//!   *structural* parent (the heading that opened the enclosing container)
//! - [`navigate`]: level-based queries (parent, siblings, breadcrumb)
//!   computed on demand, independent of structural nesting
//!
//! The two notions of "parent" differ on purpose and are never merged.

mod extract;
pub mod navigate;

pub use extract::build_outline;
pub use navigate::{
    find_all_headings, find_parent_heading, find_sibling_headings, heading_at_offset,
    heading_context,
};

use serde::Serialize;
use tree_sitter::Node;

use crate::markdown::nodes::{heading_level, heading_range, heading_text};

/// A heading as seen by the level-based queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1-6
    pub level: u8,
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

impl Heading {
    /// Read a heading node; `None` if `node` is not a heading
    pub fn from_node(node: &Node, source: &[u8]) -> Option<Self> {
        let level = heading_level(node)?;
        let range = heading_range(node, source);
        Some(Self {
            level,
            text: heading_text(node, source),
            offset: range.start,
            length: range.end - range.start,
        })
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Entry of the flat outline list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRecord {
    pub level: u8,
    pub text: String,
    pub offset: usize,
    pub length: usize,
    /// Offset of the nearest enclosing container's last-seen heading
    pub structural_parent_offset: Option<usize>,
}

impl HeadingRecord {
    /// Short label for rendering in an outline list
    pub fn label(&self) -> &'static str {
        match self.level {
            1 => "H1",
            2 => "H2",
            3 => "H3",
            4 => "H4",
            5 => "H5",
            6 => "H6",
            _ => "H?",
        }
    }
}
