mod common;

use common::parsed;
use pretty_assertions::assert_eq;

const DOC: &str = "# Intro\n\ntext\n\n## Setup\n\n## Usage\n\n# Reference\n\n## API\n\nbody\n";

fn texts(headings: &[token_markdown::Heading]) -> Vec<String> {
    headings.iter().map(|h| h.text.clone()).collect()
}

#[test]
fn test_outline_in_document_order() {
    let parser = parsed(DOC);
    let summary: Vec<(u8, &str)> = parser
        .outline()
        .iter()
        .map(|r| (r.level, r.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "Intro"),
            (2, "Setup"),
            (2, "Usage"),
            (1, "Reference"),
            (2, "API")
        ]
    );
}

#[test]
fn test_breadcrumb_inside_last_heading() {
    let parser = parsed(DOC);
    let offset = DOC.find("## API").unwrap() + 3;
    assert_eq!(
        texts(&parser.heading_context(offset)),
        vec!["Reference".to_string(), "API".to_string()]
    );
}

#[test]
fn test_breadcrumb_in_body_text() {
    let parser = parsed(DOC);
    let offset = DOC.find("text").unwrap();
    assert_eq!(texts(&parser.heading_context(offset)), vec!["Intro".to_string()]);
}

#[test]
fn test_heading_at_offset_and_parent() {
    let parser = parsed(DOC);
    let usage = DOC.find("## Usage").unwrap();

    let heading = parser.heading_at_offset(usage + 4).unwrap();
    assert_eq!(heading.text, "Usage");
    assert_eq!(heading.level, 2);
    assert_eq!(heading.offset, usage);

    let parent = parser.find_parent_heading(usage).unwrap();
    assert_eq!(parent.text, "Intro");
}

#[test]
fn test_siblings_do_not_cross_parent() {
    let parser = parsed(DOC);
    let setup = parser.heading_at_offset(DOC.find("Setup").unwrap()).unwrap();
    assert_eq!(
        texts(&parser.find_sibling_headings(&setup)),
        vec!["Setup".to_string(), "Usage".to_string()]
    );
}

#[test]
fn test_line_numbers_for_outline() {
    let parser = parsed(DOC);
    let lines: Vec<usize> = parser
        .outline()
        .iter()
        .map(|r| parser.line_for_offset(r.offset))
        .collect();
    assert_eq!(lines, vec![0, 4, 6, 8, 10]);
}

#[test]
fn test_structural_parents_follow_sections() {
    let parser = parsed(DOC);
    let outline = parser.outline();
    let intro = outline[0].offset;
    let reference = outline[3].offset;

    assert_eq!(outline[0].structural_parent_offset, None);
    assert_eq!(outline[1].structural_parent_offset, Some(intro));
    assert_eq!(outline[4].structural_parent_offset, Some(reference));
}

#[test]
fn test_quoted_headings_stay_on_their_line() {
    let doc = "> # Q\n> ## R\n";
    let parser = parsed(doc);
    let outline = parser.outline();
    assert_eq!(outline.len(), 2);
    assert_eq!(&doc[outline[0].offset..outline[0].offset + outline[0].length], "# Q\n");
    assert_eq!(outline[1].text, "R");
}
