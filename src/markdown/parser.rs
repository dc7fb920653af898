//! Structural parser: owns the source buffer, the block tree and the
//! derived style runs and outline.
//!
//! Every successful `parse`/`apply_edit` recomputes style runs and the
//! outline wholesale over the new tree. Incrementality is a re-parse
//! optimization only. Failures leave the previous tree, buffer and derived
//! lists untouched so the caller can retry with a full parse.

use std::ops::Range;
use std::time::Instant;

use tree_sitter::{InputEdit, Language, Parser, Point, Tree};

use super::edit::EditDescriptor;
use super::inline::InlineParser;
use crate::error::{ParseError, Result};
use crate::outline::{self, Heading, HeadingRecord};
use crate::style::{runs_in_range, StyleConfiguration, StyleProjector, StyleRun};
use crate::syntax::SyntaxTokenizer;

/// Source buffer and its tree, replaced together
struct ParsedDocument {
    source: String,
    tree: Tree,
}

/// Incremental Markdown structural parser
pub struct MarkdownParser {
    /// Block grammar parser (`None` if the grammar failed to load)
    block: Option<Parser>,
    /// Inline grammar instance used by style projection
    inline: Option<InlineParser>,
    tokenizer: SyntaxTokenizer,
    config: StyleConfiguration,
    document: Option<ParsedDocument>,
    style_runs: Vec<StyleRun>,
    outline: Vec<HeadingRecord>,
    changed_ranges: Vec<Range<usize>>,
    /// Bumped on every successful parse or edit
    generation: u64,
}

impl MarkdownParser {
    /// Create a parser with the default style configuration
    pub fn new() -> Self {
        Self::with_config(StyleConfiguration::default())
    }

    /// Create a parser with the given style configuration
    pub fn with_config(config: StyleConfiguration) -> Self {
        let language: Language = tree_sitter_md::LANGUAGE.into();
        let mut block = Parser::new();
        let block = match block.set_language(&language) {
            Ok(()) => Some(block),
            Err(e) => {
                tracing::error!("Failed to set block markdown grammar: {}", e);
                None
            }
        };

        let inline = match InlineParser::new() {
            Ok(inline) => Some(inline),
            Err(e) => {
                tracing::error!("Failed to set inline markdown grammar: {}", e);
                None
            }
        };

        Self {
            block,
            inline,
            tokenizer: SyntaxTokenizer::new(),
            config,
            document: None,
            style_runs: Vec::new(),
            outline: Vec::new(),
            changed_ranges: Vec::new(),
            generation: 0,
        }
    }

    /// Whether both grammars loaded
    pub fn is_initialized(&self) -> bool {
        self.block.is_some() && self.inline.is_some()
    }

    /// Whether a tree from a previous successful parse exists
    pub fn has_tree(&self) -> bool {
        self.document.is_some()
    }

    /// Full parse of `text`, discarding any existing tree and buffer
    pub fn parse(&mut self, text: &str) -> Result<()> {
        let started = Instant::now();
        let block = self.block.as_mut().ok_or(ParseError::NotInitialized)?;
        if self.inline.is_none() {
            return Err(ParseError::NotInitialized);
        }

        let source = text.to_owned();
        let Some(tree) = parse_terminated(block, &source, None) else {
            tracing::error!("Full parse failed ({} bytes)", source.len());
            return Err(ParseError::ParseFailed);
        };

        let len = source.len();
        self.install(ParsedDocument { source, tree }, vec![0..len]);

        tracing::debug!(
            "Full parse: {} bytes, {} runs, {} headings in {:?}",
            len,
            self.style_runs.len(),
            self.outline.len(),
            started.elapsed()
        );
        Ok(())
    }

    /// Apply one contiguous edit; `text` is the full text after the edit.
    ///
    /// Without a prior tree this degrades to [`parse`](Self::parse).
    pub fn apply_edit(&mut self, text: &str, edit: &EditDescriptor) -> Result<()> {
        if self.document.is_none() {
            tracing::debug!("No prior tree, falling back to full parse");
            return self.parse(text);
        }

        let started = Instant::now();
        edit.validate(text.len()).map_err(ParseError::InvalidEdit)?;

        let block = self.block.as_mut().ok_or(ParseError::NotInitialized)?;
        let Some(previous) = self.document.as_ref() else {
            return Err(ParseError::ParseFailed);
        };

        // Edit a copy so a failed re-parse leaves the old tree intact
        let input_edit = InputEdit::from(edit);
        let mut old_tree = previous.tree.clone();
        old_tree.edit(&input_edit);

        tracing::trace!(
            "Incremental parse: edit at byte {}..{} -> {}..{}",
            edit.start_byte,
            edit.old_end_byte,
            edit.start_byte,
            edit.new_end_byte
        );

        let source = text.to_owned();
        let Some(tree) = parse_terminated(block, &source, Some(&old_tree)) else {
            tracing::warn!("Incremental parse failed, keeping previous tree");
            return Err(ParseError::IncrementalParseFailed);
        };

        let len = source.len();
        let changed: Vec<Range<usize>> = old_tree
            .changed_ranges(&tree)
            .map(|r| r.start_byte.min(len)..r.end_byte.min(len))
            .filter(|r| !r.is_empty())
            .collect();

        self.install(ParsedDocument { source, tree }, changed);

        tracing::debug!(
            "Incremental parse: {} runs, {} headings in {:?}",
            self.style_runs.len(),
            self.outline.len(),
            started.elapsed()
        );
        Ok(())
    }

    /// Replace the style configuration; applies from the next parse, edit
    /// or [`restyle`](Self::restyle)
    pub fn set_style_configuration(&mut self, config: StyleConfiguration) {
        self.config = config;
    }

    pub fn style_configuration(&self) -> &StyleConfiguration {
        &self.config
    }

    /// Recompute style runs over the current tree without re-parsing
    pub fn restyle(&mut self) {
        self.style_runs = self.project_styles();
    }

    /// Swap in a new document and recompute every derived list
    fn install(&mut self, document: ParsedDocument, changed: Vec<Range<usize>>) {
        self.document = Some(document);
        self.changed_ranges = changed;
        self.generation += 1;
        self.style_runs = self.project_styles();
        self.outline = match &self.document {
            Some(doc) => outline::build_outline(&doc.tree, doc.source.as_bytes()),
            None => Vec::new(),
        };
    }

    fn project_styles(&mut self) -> Vec<StyleRun> {
        let (Some(doc), Some(inline)) = (self.document.as_ref(), self.inline.as_mut()) else {
            return Vec::new();
        };
        StyleProjector::new(doc.source.as_bytes(), &self.config, &self.tokenizer, inline)
            .project(doc.tree.root_node())
    }

    /// Code tokenizer shared with style projection
    pub fn tokenizer(&self) -> &SyntaxTokenizer {
        &self.tokenizer
    }

    /// The owned source buffer of the last successful parse
    pub fn source(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.source.as_str())
    }

    /// The block tree of the last successful parse
    pub fn tree(&self) -> Option<&Tree> {
        self.document.as_ref().map(|doc| &doc.tree)
    }

    /// Counter bumped on every successful parse or edit
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Byte ranges whose structure changed in the last parse or edit
    pub fn changed_ranges(&self) -> &[Range<usize>] {
        &self.changed_ranges
    }

    /// All style runs, in generation order
    pub fn style_runs(&self) -> &[StyleRun] {
        &self.style_runs
    }

    /// Runs overlapping `[start, end)`, in generation order
    pub fn style_runs_in_range(&self, start: usize, end: usize) -> Vec<&StyleRun> {
        runs_in_range(&self.style_runs, start, end)
    }

    /// Flat heading list with structural parents
    pub fn outline(&self) -> &[HeadingRecord] {
        &self.outline
    }

    /// Every heading in document order, read from the tree
    pub fn find_all_headings(&self) -> Vec<Heading> {
        match &self.document {
            Some(doc) => outline::find_all_headings(&doc.tree, doc.source.as_bytes()),
            None => Vec::new(),
        }
    }

    /// Heading containing `offset`, if any
    pub fn heading_at_offset(&self, offset: usize) -> Option<Heading> {
        let doc = self.document.as_ref()?;
        outline::heading_at_offset(&doc.tree, doc.source.as_bytes(), offset)
    }

    /// Level-based parent heading for `offset`
    pub fn find_parent_heading(&self, offset: usize) -> Option<Heading> {
        let doc = self.document.as_ref()?;
        outline::find_parent_heading(&doc.tree, doc.source.as_bytes(), offset)
    }

    /// Same-level headings sharing `heading`'s level-based parent
    pub fn find_sibling_headings(&self, heading: &Heading) -> Vec<Heading> {
        match &self.document {
            Some(doc) => outline::find_sibling_headings(&doc.tree, doc.source.as_bytes(), heading),
            None => Vec::new(),
        }
    }

    /// Breadcrumb at `offset`, oldest ancestor first
    pub fn heading_context(&self, offset: usize) -> Vec<Heading> {
        match &self.document {
            Some(doc) => outline::heading_context(&doc.tree, doc.source.as_bytes(), offset),
            None => Vec::new(),
        }
    }

    /// 0-based line of `offset`, counting newlines from the buffer start.
    ///
    /// O(offset) scan; offsets past the end clamp to the last line.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let Some(source) = self.source() else {
            return 0;
        };
        let end = offset.min(source.len());
        source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
    }
}

/// Parse `source` followed by one virtual line ending.
///
/// tree-sitter-md closes blocks at line endings; a document whose only line
/// is an unterminated ATX heading otherwise parses as an ERROR node. Offsets
/// inside `source` are unchanged. Nodes closing at end of input may extend
/// one byte past `source`; readers clamp with `nodes::node_range`.
fn parse_terminated(parser: &mut Parser, source: &str, old_tree: Option<&Tree>) -> Option<Tree> {
    const TERMINATOR: &[u8] = b"\n";
    let bytes = source.as_bytes();
    let mut input = |offset: usize, _: Point| -> &[u8] {
        if offset < bytes.len() {
            &bytes[offset..]
        } else if offset == bytes.len() {
            TERMINATOR
        } else {
            &bytes[bytes.len()..]
        }
    };
    parser.parse_with_options(&mut input, old_tree, None)
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl MarkdownParser {
    /// A parser whose grammars never loaded
    fn uninitialized() -> Self {
        Self {
            block: None,
            inline: None,
            ..Self::new()
        }
    }
}
