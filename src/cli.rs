//! Command-line argument parsing for the `token-markdown` binary
//!
//! Supports:
//! - Dumping style runs, the outline or a breadcrumb for a Markdown file
//! - Tokenizing a file as code in any supported language
//! - Selecting a built-in, user or on-disk style configuration

use clap::Parser;
use std::path::PathBuf;

/// Inspect the structure of a Markdown file
#[derive(Parser, Debug)]
#[command(
    name = "token-markdown",
    version,
    about = "Inspect the structure of a Markdown file"
)]
pub struct CliArgs {
    /// Markdown file to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print style runs
    #[arg(short = 'r', long)]
    pub runs: bool,

    /// Print the heading outline (default when nothing else is selected)
    #[arg(short = 'o', long)]
    pub outline: bool,

    /// Print the heading breadcrumb at byte OFFSET
    #[arg(short = 'b', long, value_name = "OFFSET")]
    pub breadcrumb: Option<usize>,

    /// Tokenize the whole file as code in LANG instead of parsing Markdown
    #[arg(short = 't', long, value_name = "LANG")]
    pub tokens: Option<String>,

    /// Style id (builtin or user) or path to a style YAML file
    #[arg(short = 's', long, value_name = "ID|PATH")]
    pub style: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also write debug logs to the config directory
    #[arg(long)]
    pub log_file: bool,
}

/// Where the style configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// Built-in default
    Default,
    /// Looked up by id: user styles dir first, then built-ins
    Id(String),
    /// Explicit YAML file
    File(PathBuf),
}

/// One section of output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Runs,
    Outline,
    Breadcrumb(usize),
    Tokens(String),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub style: StyleSource,
    /// Requested sections, in output order
    pub reports: Vec<Report>,
    pub json: bool,
    pub log_file: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let style = match self.style {
            None => StyleSource::Default,
            Some(s) if s.trim().is_empty() => return Err("Empty style id".to_string()),
            Some(s) if looks_like_path(&s) => StyleSource::File(PathBuf::from(s)),
            Some(s) => StyleSource::Id(s),
        };

        let mut reports = Vec::new();
        if let Some(lang) = self.tokens {
            reports.push(Report::Tokens(lang));
        }
        if self.runs {
            reports.push(Report::Runs);
        }
        if self.outline {
            reports.push(Report::Outline);
        }
        if let Some(offset) = self.breadcrumb {
            reports.push(Report::Breadcrumb(offset));
        }
        if reports.is_empty() {
            reports.push(Report::Outline);
        }

        Ok(RunConfig {
            file: self.file,
            style,
            reports,
            json: self.json,
            log_file: self.log_file,
        })
    }
}

fn looks_like_path(s: &str) -> bool {
    s.contains(std::path::MAIN_SEPARATOR)
        || s.contains('/')
        || s.ends_with(".yaml")
        || s.ends_with(".yml")
}
