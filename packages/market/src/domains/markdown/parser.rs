use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
}

/// Fewest consecutive `|` lines that make a table (header plus separator).
pub const MIN_TABLE_LINES: usize = 2;

/// One displayable unit of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    ListItem(String),
    Paragraph(String),
    Table(TableBlock),
}

/// A pipe table: the header row and its data rows (separator rows removed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lazily parse markdown text into blocks.
///
/// Consecutive lines starting with `|` are buffered and emitted as one
/// [`Block::Table`] when the first non-table line (or the end of input) is
/// reached. A buffer holding a single line has no header/separator pair and
/// is dropped.
pub fn parse_blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
        table: Vec::new(),
        pending: None,
    }
}

/// Iterator returned by [`parse_blocks`].
pub struct Blocks<'a> {
    lines: std::str::Lines<'a>,
    table: Vec<Vec<String>>,
    pending: Option<Block>,
}

impl Blocks<'_> {
    fn flush_table(&mut self) -> Option<Block> {
        if self.table.is_empty() {
            return None;
        }

        let buffer = std::mem::take(&mut self.table);
        if buffer.len() < MIN_TABLE_LINES {
            return None;
        }

        let mut lines = buffer.into_iter();
        let header = lines.next().unwrap_or_default();
        let rows = lines.filter(|row| !is_separator_row(row)).collect();

        Some(Block::Table(TableBlock { header, rows }))
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if let Some(block) = self.pending.take() {
            return Some(block);
        }

        loop {
            let Some(line) = self.lines.next() else {
                return self.flush_table();
            };

            let trimmed = line.trim();
            if trimmed.starts_with('|') {
                self.table.push(split_cells(trimmed));
                continue;
            }

            let block = classify_line(trimmed);
            match self.flush_table() {
                Some(table) => {
                    self.pending = block;
                    return Some(table);
                }
                None => {
                    if block.is_some() {
                        return block;
                    }
                }
            }
        }
    }
}

fn classify_line(trimmed: &str) -> Option<Block> {
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('#') {
        let text = trimmed.trim_start_matches('#').trim_start();
        return Some(Block::Heading(text.to_string()));
    }

    if trimmed.starts_with('-') || trimmed.starts_with('*') {
        // Bold first, so `**Catatan:** x` keeps its words and only loses the marker
        let text = unwrap_bold(trimmed);
        let text = text
            .strip_prefix(&['-', '*'][..])
            .unwrap_or(text.as_str())
            .trim_start()
            .to_string();
        return Some(Block::ListItem(text));
    }

    Some(Block::Paragraph(unwrap_bold(trimmed)))
}

/// Runs of consecutive table lines (trimmed), in document order. Runs too
/// short to form a table are left out, matching [`parse_blocks`].
pub fn table_runs(text: &str) -> Vec<Vec<&str>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.starts_with('|') {
            current.push(line);
            continue;
        }
        let run = std::mem::take(&mut current);
        if run.len() >= MIN_TABLE_LINES {
            runs.push(run);
        }
    }
    if current.len() >= MIN_TABLE_LINES {
        runs.push(current);
    }

    runs
}

/// Split a table line into trimmed cells, dropping the outer pipes.
pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// A row is a separator when every cell is made only of `-`, `:` and whitespace.
pub fn is_separator_row<S: AsRef<str>>(cells: &[S]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let cell = cell.as_ref();
            !cell.is_empty()
                && cell
                    .chars()
                    .all(|c| c == '-' || c == ':' || c.is_whitespace())
        })
}

/// Replace `**text**` with `text`.
pub fn unwrap_bold(text: &str) -> String {
    BOLD.replace_all(text, "$1").into_owned()
}
