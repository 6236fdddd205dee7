//! Output formatting for the CLI.

use crate::error::Result;
use crate::models::Record;
use console::{style, Style};
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use tabled::{settings::Style as TableStyle, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One row per record
    #[default]
    Table,
    /// A single JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Table row for a record.
#[derive(Debug, Serialize, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Table")]
    pub key: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            kind: record.kind().to_string(),
            key: record.identity().key(),
            detail: truncate(&record.summary(), 80),
        }
    }
}

/// Write records in the requested format.
pub fn write_records<W: Write>(out: &mut W, records: &[Record], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if records.is_empty() {
                writeln!(out, "{}", style("No records extracted").dim())?;
            } else {
                let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
                let table = Table::new(rows).with(TableStyle::rounded()).to_string();
                writeln!(out, "{}", table)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
        }
    }
    Ok(())
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: impl Display) {
    let key_style = Style::new().cyan().bold();
    eprintln!("{}: {}", key_style.apply_to(key), value);
}

/// Print a section header
pub fn print_header(title: &str) {
    eprintln!();
    eprintln!("{}", style(title).bold().underlined());
}

/// Error message
pub fn error(msg: impl Display) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

fn truncate(s: &str, max: usize) -> String {
    let line = s.lines().next().unwrap_or_default();
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
