//! CST walk that emits style runs
//!
//! Block nodes are dispatched by kind; `inline` nodes and table cells are
//! re-parsed with the inline grammar and their runs translated to document
//! offsets. Fenced code with a known language is handed to the code
//! tokenizer. Runs are emitted parent-first, so nested runs come later and
//! win when applied in order.

use std::ops::Range;

use tree_sitter::Node;

use super::{StyleCategory, StyleConfiguration, StyleRun};
use crate::markdown::inline::{InlineParser, InlineTree};
use crate::markdown::nodes::{
    self, child_of_kind, heading_level, heading_range, node_range, node_text, CODE_FENCE_CONTENT,
    FENCED_CODE_BLOCK, INFO_STRING, INLINE, LINK_DESTINATION, PIPE_TABLE_CELL,
    PIPE_TABLE_DELIMITER_ROW, PIPE_TABLE_HEADER, TABLE_PIPE,
};
use crate::syntax::SyntaxTokenizer;

/// Classify a block or inline node into a style category.
///
/// Anything unmatched is `Normal`, which produces no run.
pub fn style_category_for_node(node: &Node) -> StyleCategory {
    match node.kind() {
        nodes::ATX_HEADING | nodes::SETEXT_HEADING => {
            StyleCategory::heading(heading_level(node).unwrap_or(1))
        }
        FENCED_CODE_BLOCK | nodes::INDENTED_CODE_BLOCK => StyleCategory::CodeBlock,
        "code_span" => StyleCategory::InlineCode,
        "emphasis" => StyleCategory::Emphasis,
        "strong_emphasis" => StyleCategory::Strong,
        "strikethrough" => StyleCategory::Strikethrough,
        "inline_link"
        | "full_reference_link"
        | "collapsed_reference_link"
        | "shortcut_link"
        | "uri_autolink"
        | "email_autolink"
        | "link_reference_definition" => StyleCategory::Link,
        "image" => StyleCategory::Image,
        "block_quote" => StyleCategory::BlockQuote,
        PIPE_TABLE_CELL => {
            if node.parent().is_some_and(|p| p.kind() == PIPE_TABLE_HEADER) {
                StyleCategory::TableHeader
            } else {
                StyleCategory::TableCell
            }
        }
        PIPE_TABLE_DELIMITER_ROW => StyleCategory::TableDelimiter,
        "list_marker_minus" | "list_marker_plus" | "list_marker_star" => StyleCategory::ListBullet,
        "list_marker_dot" | "list_marker_parenthesis" => StyleCategory::ListNumber,
        "task_list_marker_checked" => StyleCategory::TaskChecked,
        "task_list_marker_unchecked" => StyleCategory::TaskUnchecked,
        "thematic_break" => StyleCategory::ThematicBreak,
        "html_block" => StyleCategory::HtmlBlock,
        "minus_metadata" | "plus_metadata" => StyleCategory::Metadata,
        _ => StyleCategory::Normal,
    }
}

/// Runs overlapping `[start, end)`, in generation order
pub fn runs_in_range(runs: &[StyleRun], start: usize, end: usize) -> Vec<&StyleRun> {
    runs.iter().filter(|run| run.overlaps(start, end)).collect()
}

/// One projection pass over a block tree.
///
/// The configuration is borrowed for the whole pass, so it cannot change
/// while runs are being generated.
pub struct StyleProjector<'a> {
    source: &'a [u8],
    config: &'a StyleConfiguration,
    tokenizer: &'a SyntaxTokenizer,
    inline: &'a mut InlineParser,
    runs: Vec<StyleRun>,
}

impl<'a> StyleProjector<'a> {
    pub fn new(
        source: &'a [u8],
        config: &'a StyleConfiguration,
        tokenizer: &'a SyntaxTokenizer,
        inline: &'a mut InlineParser,
    ) -> Self {
        Self {
            source,
            config,
            tokenizer,
            inline,
            runs: Vec::new(),
        }
    }

    /// Walk the tree from `root` and return every run in generation order
    pub fn project(mut self, root: Node) -> Vec<StyleRun> {
        self.process_node(root);
        self.runs
    }

    fn process_node(&mut self, node: Node) {
        let kind = node.kind();

        if !node.is_named() {
            if kind == TABLE_PIPE {
                self.push_category(&node, StyleCategory::TablePipe);
            }
            return;
        }

        match kind {
            "task_list_marker_checked"
            | "task_list_marker_unchecked"
            | "list_marker_minus"
            | "list_marker_plus"
            | "list_marker_star" => {
                let category = style_category_for_node(&node);
                let mut run = self.run_for(&node, category);
                run.replacement = self.config.replacement_for(category);
                self.push_run(run);
                return;
            }
            PIPE_TABLE_DELIMITER_ROW => {
                self.push_category(&node, StyleCategory::TableDelimiter);
                return;
            }
            INLINE => {
                self.process_inline_region(node_range(&node, self.source));
                return;
            }
            PIPE_TABLE_CELL => {
                self.push_category(&node, style_category_for_node(&node));
                self.process_table_cell(node);
                return;
            }
            _ => {}
        }

        let category = style_category_for_node(&node);
        if category != StyleCategory::Normal {
            let mut run = self.run_for(&node, category);
            match category {
                StyleCategory::CodeBlock => {
                    run.language = code_block_language(&node, self.source);
                }
                StyleCategory::Link => {
                    run.url = link_url(&node, self.source);
                }
                _ => {}
            }
            let language = run.language.clone();
            self.push_run(run);

            if let Some(language) = language {
                self.highlight_code_block(node, &language);
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.process_node(child);
        }
    }

    /// Inline pass over a table cell: its `inline` children if the grammar
    /// produced any, otherwise the cell's own text
    fn process_table_cell(&mut self, cell: Node) {
        let mut cursor = cell.walk();
        let inline_children: Vec<Node> = cell
            .children(&mut cursor)
            .filter(|c| c.kind() == INLINE)
            .collect();

        if inline_children.is_empty() {
            self.process_inline_region(node_range(&cell, self.source));
        } else {
            for child in inline_children {
                self.process_inline_region(node_range(&child, self.source));
            }
        }
    }

    /// Nested inline pass over `range` with the inline grammar
    fn process_inline_region(&mut self, range: Range<usize>) {
        let source = self.source;
        let Some(inline_tree) = self.inline.parse_region(source, range.clone()) else {
            return;
        };
        let region = &source[range];
        self.process_inline_node(&inline_tree, inline_tree.root_node(), region, None);
    }

    /// `enclosing` is the category of the nearest ancestor that emitted a run.
    /// A node nested in a run of its own category (`~~s~~` parses as two
    /// strikethrough nodes) adds nothing and is skipped.
    fn process_inline_node(
        &mut self,
        tree: &InlineTree,
        node: Node,
        region: &[u8],
        enclosing: Option<StyleCategory>,
    ) {
        let mut enclosing = enclosing;
        if node.is_named() {
            let category = style_category_for_node(&node);
            if category != StyleCategory::Normal && enclosing != Some(category) {
                let local = node_range(&node, region);
                let offset = tree.to_document(local.start);
                let mut run = self.config.make_run(offset, local.len(), category);
                if matches!(category, StyleCategory::Link | StyleCategory::Image) {
                    run.url = link_url(&node, region);
                }
                self.push_run(run);
                enclosing = Some(category);
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.process_inline_node(tree, child, region, enclosing);
        }
    }

    /// Merge tokenizer output for a fenced code block's content
    fn highlight_code_block(&mut self, node: Node, language: &str) {
        if !self.tokenizer.supports_language(language) {
            return;
        }
        let Some(content) = child_of_kind(&node, CODE_FENCE_CONTENT) else {
            return;
        };
        let source = self.source;
        let code = node_text(&content, source);
        let base = node_range(&content, source).start;

        for token in self.tokenizer.tokenize(code, language) {
            let Some(category) = StyleCategory::for_token(token.kind) else {
                continue;
            };
            let mut run = self.config.make_run(base + token.offset, token.length, category);
            run.language = Some(language.to_string());
            self.push_run(run);
        }
    }

    fn run_for(&self, node: &Node, category: StyleCategory) -> StyleRun {
        let range = if nodes::is_heading(node) {
            heading_range(node, self.source)
        } else {
            node_range(node, self.source)
        };
        self.config.make_run(range.start, range.len(), category)
    }

    fn push_category(&mut self, node: &Node, category: StyleCategory) {
        let run = self.run_for(node, category);
        self.push_run(run);
    }

    fn push_run(&mut self, run: StyleRun) {
        if run.length > 0 {
            self.runs.push(run);
        }
    }
}

/// Language tag from a fenced code block's info string, trimmed
fn code_block_language(node: &Node, source: &[u8]) -> Option<String> {
    let info = child_of_kind(node, INFO_STRING)?;
    let text = match child_of_kind(&info, "language") {
        Some(language) => node_text(&language, source),
        None => node_text(&info, source),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Link target: the destination child, or the autolink text without brackets
fn link_url(node: &Node, source: &[u8]) -> Option<String> {
    if let Some(destination) = child_of_kind(node, LINK_DESTINATION) {
        let url = node_text(&destination, source)
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>');
        return (!url.is_empty()).then(|| url.to_string());
    }

    match node.kind() {
        "uri_autolink" | "email_autolink" => {
            let url = node_text(node, source)
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>');
            (!url.is_empty()).then(|| url.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Language, Parser, Tree};

    fn parse_block(source: &str) -> Tree {
        let language: Language = tree_sitter_md::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        parser.parse(source, None).unwrap()
    }

    fn project(source: &str, config: &StyleConfiguration) -> Vec<StyleRun> {
        let tree = parse_block(source);
        let tokenizer = SyntaxTokenizer::new();
        let mut inline = InlineParser::new().unwrap();
        StyleProjector::new(source.as_bytes(), config, &tokenizer, &mut inline)
            .project(tree.root_node())
    }

    fn text_of<'s>(source: &'s str, run: &StyleRun) -> &'s str {
        &source[run.offset..run.end()]
    }

    #[test]
    fn test_heading_and_strong_runs() {
        let source = "# A\n\nSome **bold** text.\n";
        let runs = project(source, &StyleConfiguration::default());

        let heading = runs
            .iter()
            .find(|r| r.category == StyleCategory::Heading1)
            .expect("heading run");
        assert_eq!(heading.offset, 0);
        assert!(heading.length >= 3);

        let strong = runs
            .iter()
            .find(|r| r.category == StyleCategory::Strong)
            .expect("strong run");
        assert_eq!(text_of(source, strong), "**bold**");
    }

    #[test]
    fn test_heading_levels() {
        let source = "### Third\n";
        let runs = project(source, &StyleConfiguration::default());
        assert!(runs.iter().any(|r| r.category == StyleCategory::Heading3));
        assert!(!runs.iter().any(|r| r.category == StyleCategory::Heading1));
    }

    #[test]
    fn test_nested_inline_in_heading_comes_after_heading() {
        let source = "## A *b* c\n";
        let runs = project(source, &StyleConfiguration::default());

        let heading_idx = runs
            .iter()
            .position(|r| r.category == StyleCategory::Heading2)
            .unwrap();
        let emphasis_idx = runs
            .iter()
            .position(|r| r.category == StyleCategory::Emphasis)
            .unwrap();
        assert!(heading_idx < emphasis_idx);
        assert_eq!(text_of(source, &runs[emphasis_idx]), "*b*");
    }

    #[test]
    fn test_inline_code_and_link_url() {
        let source = "Use `cargo` and [docs](https://example.com).\n";
        let runs = project(source, &StyleConfiguration::default());

        let code = runs
            .iter()
            .find(|r| r.category == StyleCategory::InlineCode)
            .unwrap();
        assert_eq!(text_of(source, code), "`cargo`");

        let link = runs
            .iter()
            .find(|r| r.category == StyleCategory::Link)
            .unwrap();
        assert_eq!(link.url.as_deref(), Some("https://example.com"));
        assert_eq!(text_of(source, link), "[docs](https://example.com)");
    }

    #[test]
    fn test_fenced_code_language_and_tokens() {
        let source = "```rust\nfn main() {}\n```\n";
        let runs = project(source, &StyleConfiguration::default());

        let block = runs
            .iter()
            .find(|r| r.category == StyleCategory::CodeBlock)
            .unwrap();
        assert_eq!(block.language.as_deref(), Some("rust"));

        let keyword = runs
            .iter()
            .find(|r| r.category == StyleCategory::CodeKeyword)
            .expect("keyword token run");
        assert_eq!(text_of(source, keyword), "fn");
        assert_eq!(keyword.language.as_deref(), Some("rust"));
    }

    #[test]
    fn test_unknown_code_language_has_no_tokens() {
        let source = "```klingon\nqapla'\n```\n";
        let runs = project(source, &StyleConfiguration::default());

        let block = runs
            .iter()
            .find(|r| r.category == StyleCategory::CodeBlock)
            .unwrap();
        assert_eq!(block.language.as_deref(), Some("klingon"));
        assert!(!runs.iter().any(|r| r.category == StyleCategory::CodeKeyword));
    }

    #[test]
    fn test_bullet_marker_replacement() {
        let source = "- item\n";
        let runs = project(source, &StyleConfiguration::default());
        let bullet = runs
            .iter()
            .find(|r| r.category == StyleCategory::ListBullet)
            .unwrap();
        assert_eq!(bullet.offset, 0);
        assert_eq!(bullet.replacement.as_deref(), Some("•"));

        let mut config = StyleConfiguration::default();
        config.set_glyphs_enabled(false);
        let runs = project(source, &config);
        let bullet = runs
            .iter()
            .find(|r| r.category == StyleCategory::ListBullet)
            .unwrap();
        assert_eq!(bullet.replacement, None);
    }

    #[test]
    fn test_table_runs() {
        let source = "| H1 | H2 |\n| --- | --- |\n| a | **b** |\n";
        let runs = project(source, &StyleConfiguration::default());

        assert!(runs.iter().any(|r| r.category == StyleCategory::TableHeader));
        assert!(runs.iter().any(|r| r.category == StyleCategory::TableCell));
        assert!(runs.iter().any(|r| r.category == StyleCategory::TablePipe
            && text_of(source, r) == "|"));

        let delimiter: Vec<_> = runs
            .iter()
            .filter(|r| r.category == StyleCategory::TableDelimiter)
            .collect();
        assert_eq!(delimiter.len(), 1);
        assert!(text_of(source, delimiter[0]).contains("---"));

        let strong = runs
            .iter()
            .find(|r| r.category == StyleCategory::Strong)
            .expect("strong inside table cell");
        assert_eq!(text_of(source, strong), "**b**");
    }

    #[test]
    fn test_strikethrough_emits_single_run() {
        let source = "a ~~s~~ b\n";
        let runs = project(source, &StyleConfiguration::default());
        let strikes: Vec<_> = runs
            .iter()
            .filter(|r| r.category == StyleCategory::Strikethrough)
            .collect();
        assert_eq!(strikes.len(), 1);
        assert_eq!(text_of(source, strikes[0]), "~~s~~");
    }

    #[test]
    fn test_quoted_heading_stops_at_line_end() {
        let source = "> # Q\n> ## R\n";
        let runs = project(source, &StyleConfiguration::default());

        let h1 = runs
            .iter()
            .find(|r| r.category == StyleCategory::Heading1)
            .expect("quoted h1");
        assert_eq!(text_of(source, h1), "# Q\n");

        let h2 = runs
            .iter()
            .find(|r| r.category == StyleCategory::Heading2)
            .expect("quoted h2");
        assert!(text_of(source, h2).starts_with("## R"));
        assert!(!text_of(source, h2).contains('>'));
    }

    #[test]
    fn test_all_runs_non_empty_and_in_bounds() {
        let source = "# T\n\n> quote *x*\n\n- [x] done\n- [ ] todo\n\n---\n\n```\nplain\n```\n";
        let runs = project(source, &StyleConfiguration::default());
        assert!(!runs.is_empty());
        for run in &runs {
            assert!(run.length > 0);
            assert!(run.end() <= source.len());
        }
        assert!(runs.iter().any(|r| r.category == StyleCategory::BlockQuote));
    }

    #[test]
    fn test_runs_in_range_filter() {
        let config = StyleConfiguration::default();
        let runs = vec![
            config.make_run(0, 5, StyleCategory::Heading1),
            config.make_run(3, 2, StyleCategory::Strong),
            config.make_run(10, 4, StyleCategory::Link),
        ];
        let hits = runs_in_range(&runs, 4, 11);
        assert_eq!(hits.len(), 3);
        let hits = runs_in_range(&runs, 5, 10);
        assert!(hits.is_empty());
        let hits = runs_in_range(&runs, 0, 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, StyleCategory::Heading1);
    }
}
