use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::{json, Map, Value};

use token_markdown::cli::{CliArgs, Report, RunConfig, StyleSource};
use token_markdown::{MarkdownParser, StyleConfiguration};

fn main() -> Result<()> {
    let config = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    token_markdown::tracing::init(config.log_file);

    let text = std::fs::read_to_string(&config.file)
        .with_context(|| format!("Failed to read {}", config.file.display()))?;

    let style = load_style(&config.style)?;
    let mut parser = MarkdownParser::with_config(style);

    let needs_markdown = config
        .reports
        .iter()
        .any(|r| !matches!(r, Report::Tokens(_)));
    if needs_markdown {
        parser
            .parse(&text)
            .with_context(|| format!("Failed to parse {}", config.file.display()))?;
    }

    if config.json {
        print_json(&config, &parser, &text)
    } else {
        print_text(&config, &parser, &text);
        Ok(())
    }
}

fn load_style(source: &StyleSource) -> Result<StyleConfiguration> {
    let style = match source {
        StyleSource::Default => return Ok(StyleConfiguration::default()),
        StyleSource::Id(id) => StyleConfiguration::load(id),
        StyleSource::File(path) => StyleConfiguration::from_file(path),
    };
    style.map_err(|e| anyhow!(e))
}

fn print_text(config: &RunConfig, parser: &MarkdownParser, text: &str) {
    for report in &config.reports {
        match report {
            Report::Runs => {
                for run in parser.style_runs() {
                    let mut line = format!(
                        "{:>6}..{:<6} {:?} {}",
                        run.offset,
                        run.end(),
                        run.category,
                        run.foreground.to_hex()
                    );
                    if let Some(lang) = &run.language {
                        line.push_str(&format!(" lang={}", lang));
                    }
                    if let Some(url) = &run.url {
                        line.push_str(&format!(" url={}", url));
                    }
                    if let Some(replacement) = &run.replacement {
                        line.push_str(&format!(" glyph={}", replacement));
                    }
                    println!("{}", line);
                }
            }
            Report::Outline => {
                for record in parser.outline() {
                    let indent = "  ".repeat(usize::from(record.level.saturating_sub(1)));
                    println!(
                        "{}{} {} (line {})",
                        indent,
                        record.label(),
                        record.text,
                        parser.line_for_offset(record.offset) + 1
                    );
                }
            }
            Report::Breadcrumb(offset) => {
                let crumbs: Vec<String> = parser
                    .heading_context(*offset)
                    .into_iter()
                    .map(|h| h.text)
                    .collect();
                println!("{}", crumbs.join(" > "));
            }
            Report::Tokens(lang) => {
                for token in parser.tokenizer().tokenize(text, lang) {
                    let slice = text.get(token.offset..token.end()).unwrap_or("");
                    println!(
                        "{:>6}..{:<6} {:?} {:?}",
                        token.offset,
                        token.end(),
                        token.kind,
                        slice
                    );
                }
            }
        }
    }
}

fn print_json(config: &RunConfig, parser: &MarkdownParser, text: &str) -> Result<()> {
    let mut out = Map::new();
    for report in &config.reports {
        let (key, value) = match report {
            Report::Runs => ("runs", serde_json::to_value(parser.style_runs())?),
            Report::Outline => ("outline", serde_json::to_value(parser.outline())?),
            Report::Breadcrumb(offset) => (
                "breadcrumb",
                json!({
                    "offset": offset,
                    "headings": parser.heading_context(*offset),
                }),
            ),
            Report::Tokens(lang) => (
                "tokens",
                json!({
                    "language": lang,
                    "tokens": parser.tokenizer().tokenize(text, lang),
                }),
            ),
        };
        out.insert(key.to_string(), value);
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(out))?);
    Ok(())
}
