use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use super::parser::{is_separator_row, table_runs};

/// Default file name offered for exports.
pub const CSV_FILE_NAME: &str = "aufmarket_export.csv";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

lazy_static! {
    static ref BOLD_STARS: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref BOLD_UNDERSCORES: Regex = Regex::new(r"__(.*?)__").unwrap();
    static ref ITALIC_STAR: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref ITALIC_UNDERSCORE: Regex = Regex::new(r"_(.*?)_").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Data tidak ditemukan untuk di-export.")]
    NoRows,

    #[error("Gagal menyimpan file export: {0}")]
    Io(#[from] std::io::Error),
}

/// Build spreadsheet-ready CSV from the raw markdown of a search result.
///
/// Works from the text, not from a rendered view, so every well-formed
/// table line in the document is exported (including the header row of each
/// table). Lone `|` lines are not tables and separator rows are skipped. The
/// output starts with a UTF-8 BOM.
pub fn export_csv(markdown: &str) -> Result<String, ExportError> {
    let rows: Vec<String> = table_runs(markdown)
        .into_iter()
        .flatten()
        .filter_map(export_row)
        .collect();

    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }

    let mut csv = String::new();
    csv.push(BYTE_ORDER_MARK);
    csv.push_str(&rows.join("\n"));
    Ok(csv)
}

/// Export to a file. Returns the number of CSV lines written.
pub fn write_csv(markdown: &str, path: &Path) -> Result<usize, ExportError> {
    let csv = export_csv(markdown)?;
    let lines = csv.lines().count();
    std::fs::write(path, csv)?;
    info!(path = %path.display(), lines, "CSV exported");
    Ok(lines)
}

fn export_row(trimmed: &str) -> Option<String> {
    if trimmed.len() < 2 || !trimmed.starts_with('|') || !trimmed.ends_with('|') {
        return None;
    }

    let content = &trimmed[1..trimmed.len() - 1];
    let cells: Vec<&str> = content.split('|').map(str::trim).collect();

    if is_separator_row(&cells) || cells.len() < 2 {
        return None;
    }

    Some(
        cells
            .iter()
            .map(|cell| quote(&clean_cell(cell)))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Strip emphasis and flatten `[label](url)` into `label (url)`.
fn clean_cell(cell: &str) -> String {
    let text = BOLD_STARS.replace_all(cell, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    LINK.replace_all(&text, "${1} (${2})").into_owned()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
