use crate::dashboard::DashboardView;
use crate::errors::Result;
use crate::formatting::FormattingConfig;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored tables for an interactive terminal
    #[default]
    Terminal,
    /// Machine-readable view
    Json,
    /// GitHub-flavored Markdown report
    Markdown,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminal" => Some(Self::Terminal),
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_view(&mut self, view: &DashboardView) -> Result<()>;
}

/// Writer for `format` emitting into `destination`.
pub fn create_writer<'a>(
    format: OutputFormat,
    destination: Box<dyn Write + 'a>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination, formatting)),
    }
}
