//! Style projection: CST → presentation overlays
//!
//! Style runs are overlays, not a partition of the document. A consumer
//! fills the queried range with the normal style first, then applies the
//! returned runs in order so nested, more specific runs win.

mod config;
mod projection;

pub use config::{
    CategoryStyle, Color, FontRef, GlyphSettings, StyleConfiguration, BUILTIN_STYLES,
    DEFAULT_DARK_YAML, DEFAULT_LIGHT_YAML,
};
pub use projection::{runs_in_range, style_category_for_node, StyleProjector};

use serde::{Deserialize, Serialize};

use crate::syntax::TokenKind;

/// Style category of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    Normal,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    CodeBlock,
    InlineCode,
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    Image,
    BlockQuote,
    ListBullet,
    ListNumber,
    TaskChecked,
    TaskUnchecked,
    TableHeader,
    TableCell,
    TablePipe,
    TableDelimiter,
    ThematicBreak,
    HtmlBlock,
    Metadata,
    CodeKeyword,
    CodeType,
    CodeFunction,
    CodeVariable,
    CodeString,
    CodeNumber,
    CodeComment,
    CodeOperator,
}

impl StyleCategory {
    /// Heading category for a level; out-of-range levels clamp to 1..=6
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => StyleCategory::Heading1,
            2 => StyleCategory::Heading2,
            3 => StyleCategory::Heading3,
            4 => StyleCategory::Heading4,
            5 => StyleCategory::Heading5,
            _ => StyleCategory::Heading6,
        }
    }

    /// Heading level if this is a heading category
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            StyleCategory::Heading1 => Some(1),
            StyleCategory::Heading2 => Some(2),
            StyleCategory::Heading3 => Some(3),
            StyleCategory::Heading4 => Some(4),
            StyleCategory::Heading5 => Some(5),
            StyleCategory::Heading6 => Some(6),
            _ => None,
        }
    }

    /// Code category for a tokenizer class (`Normal` tokens have none)
    pub fn for_token(kind: TokenKind) -> Option<Self> {
        let category = match kind {
            TokenKind::Keyword => StyleCategory::CodeKeyword,
            TokenKind::Type => StyleCategory::CodeType,
            TokenKind::Function => StyleCategory::CodeFunction,
            TokenKind::Variable => StyleCategory::CodeVariable,
            TokenKind::String => StyleCategory::CodeString,
            TokenKind::Number => StyleCategory::CodeNumber,
            TokenKind::Comment => StyleCategory::CodeComment,
            TokenKind::Operator => StyleCategory::CodeOperator,
            TokenKind::Normal => return None,
        };
        Some(category)
    }
}

/// A presentation overlay over `[offset, offset + length)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRun {
    pub offset: usize,
    pub length: usize,
    pub category: StyleCategory,
    pub font: FontRef,
    pub foreground: Color,
    pub background: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Glyph to draw instead of the source text (list and task markers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl StyleRun {
    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Half-open interval overlap with `[start, end)`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.offset < end && self.end() > start
    }
}
