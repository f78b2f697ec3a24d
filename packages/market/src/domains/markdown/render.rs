use lazy_static::lazy_static;
use regex::Regex;

use super::columns::ColumnRoles;
use super::parser::{parse_blocks, Block, TableBlock};
use crate::domains::messaging::Lead;

/// Header of the synthetic trailing column that carries row actions.
pub const ACTION_HEADER: &str = "Action";

/// Label shown instead of the raw cell text for map links.
pub const MAPS_LINK_LABEL: &str = "Buka Maps";

lazy_static! {
    static ref LINK_COLUMN: Regex = Regex::new(r"(?i)maps|koordinat|link").unwrap();
    static ref URL_LIKE: Regex = Regex::new(r"^http|www|maps\.").unwrap();
    static ref PAREN_TARGET: Regex = Regex::new(r"\((.*?)\)").unwrap();
}

/// Opaque handle to one rendered row, used to select its lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeadRef {
    table: usize,
    row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCell {
    Text(String),
    Link { label: String, url: String },
}

impl RenderedCell {
    /// Text to show in a plain-text view.
    pub fn display_text(&self) -> &str {
        match self {
            RenderedCell::Text(text) => text,
            RenderedCell::Link { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedRow {
    pub cells: Vec<RenderedCell>,
    pub action: LeadRef,
    pub lead: Lead,
}

#[derive(Debug, Clone)]
pub struct RenderedTable {
    pub header: Vec<String>,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    /// Data headers followed by the synthetic action column.
    pub fn display_header(&self) -> Vec<&str> {
        self.header
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ACTION_HEADER))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum RenderedBlock {
    Heading(String),
    ListItem(String),
    Paragraph(String),
    Table(RenderedTable),
}

/// Row-addressable view of a model response.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedDocument {
    pub fn tables(&self) -> impl Iterator<Item = &RenderedTable> {
        self.blocks.iter().filter_map(|block| match block {
            RenderedBlock::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Every actionable row, across all tables, in display order.
    pub fn rows(&self) -> impl Iterator<Item = &RenderedRow> {
        self.tables().flat_map(|table| table.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Resolve a row handle back to its lead.
    pub fn lead(&self, action: LeadRef) -> Option<&Lead> {
        self.tables()
            .nth(action.table)
            .and_then(|table| table.rows.get(action.row))
            .map(|row| &row.lead)
    }
}

/// Render markdown text into displayable blocks.
pub fn render(markdown: &str) -> RenderedDocument {
    let mut tables = 0;
    let blocks = parse_blocks(markdown)
        .map(|block| match block {
            Block::Heading(text) => RenderedBlock::Heading(text),
            Block::ListItem(text) => RenderedBlock::ListItem(text),
            Block::Paragraph(text) => RenderedBlock::Paragraph(text),
            Block::Table(table) => {
                let rendered = render_table(table, tables);
                tables += 1;
                RenderedBlock::Table(rendered)
            }
        })
        .collect();

    RenderedDocument { blocks }
}

fn render_table(table: TableBlock, index: usize) -> RenderedTable {
    let roles = ColumnRoles::resolve(&table.header);
    let link_columns: Vec<bool> = table
        .header
        .iter()
        .map(|h| LINK_COLUMN.is_match(h))
        .collect();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| RenderedRow {
            cells: row
                .iter()
                .enumerate()
                .map(|(column, cell)| {
                    render_cell(cell, link_columns.get(column).copied().unwrap_or(false))
                })
                .collect(),
            action: LeadRef {
                table: index,
                row: row_index,
            },
            lead: roles.lead_from_row(row),
        })
        .collect();

    RenderedTable {
        header: table.header,
        rows,
    }
}

fn render_cell(cell: &str, link_column: bool) -> RenderedCell {
    let text = cell.trim();

    if link_column && (URL_LIKE.is_match(text) || text.contains("http")) {
        if let Some(url) = extract_link(text) {
            return RenderedCell::Link {
                label: MAPS_LINK_LABEL.to_string(),
                url,
            };
        }
    }

    RenderedCell::Text(text.to_string())
}

/// Pull a usable URL out of a cell: the `(target)` of a markdown link when
/// present, else the whole cell, with unsafe characters removed.
fn extract_link(text: &str) -> Option<String> {
    let candidate = PAREN_TARGET
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(text);

    let url: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ":/.?=&_%-".contains(*c))
        .collect();

    url.starts_with("http").then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_ROWS: &str = "\
| Nama Bisnis | Kontak (Telp/WA) | Alamat Lengkap | Alasan Prospek |
|---|---|---|---|
| Kafe Senja | 0812-1111-2222 | Jl. Braga 1 | Butuh biji kopi |
| Warung Kopi Pojok | 0813 3333 4444 | Jl. Dago 2 | Menu kopi tubruk |
| Hotel Asri | - | Jl. Riau 3 | Sarapan tamu |";

    #[test]
    fn every_row_gets_an_action_handle() {
        let doc = render(THREE_ROWS);

        assert_eq!(doc.row_count(), 3);
        let table = doc.tables().next().unwrap();
        assert_eq!(table.display_header().last(), Some(&ACTION_HEADER));
        assert_eq!(table.display_header().len(), 5);

        let second = doc.rows().nth(1).unwrap();
        let lead = doc.lead(second.action).unwrap();
        assert_eq!(lead.name, "Warung Kopi Pojok");
        assert_eq!(lead.contact, "0813 3333 4444");
        assert_eq!(lead.location, "Jl. Dago 2");
        assert_eq!(lead.reason, "Menu kopi tubruk");
    }

    #[test]
    fn handles_resolve_rows_in_later_tables() {
        let text = format!("{}\n\n### Tambahan\n{}", THREE_ROWS, THREE_ROWS);
        let doc = render(&text);

        assert_eq!(doc.tables().count(), 2);
        assert_eq!(doc.row_count(), 6);
        let last = doc.rows().last().unwrap();
        assert_eq!(last.action, LeadRef { table: 1, row: 2 });
        assert_eq!(doc.lead(last.action).unwrap().name, "Hotel Asri");
    }

    #[test]
    fn unknown_handle_resolves_to_nothing() {
        let doc = render(THREE_ROWS);

        assert!(doc.lead(LeadRef { table: 4, row: 0 }).is_none());
        assert!(doc.lead(LeadRef { table: 0, row: 9 }).is_none());
    }

    #[test]
    fn map_column_links_are_sanitized() {
        let text = "\
| Nama | Link Maps |
|---|---|
| Toko A | [Lihat](https://maps.google.com/?q=Toko A&z=1) |
| Toko B | https://goo.gl/maps/xyz\" |
| Toko C | maps.google.com/abc |
| Toko D | belum ada |";
        let doc = render(text);
        let cells: Vec<&RenderedCell> = doc.rows().map(|r| &r.cells[1]).collect();

        assert_eq!(
            cells[0],
            &RenderedCell::Link {
                label: MAPS_LINK_LABEL.into(),
                url: "https://maps.google.com/?q=TokoA&z=1".into()
            }
        );
        assert_eq!(
            cells[1],
            &RenderedCell::Link {
                label: MAPS_LINK_LABEL.into(),
                url: "https://goo.gl/maps/xyz".into()
            }
        );
        // URL-like but not http after sanitizing
        assert_eq!(cells[2], &RenderedCell::Text("maps.google.com/abc".into()));
        assert_eq!(cells[3], &RenderedCell::Text("belum ada".into()));
    }

    #[test]
    fn urls_outside_link_columns_stay_text() {
        let text = "| Nama | Website |\n|---|---|\n| Toko | https://toko.id |";
        let doc = render(text);

        assert_eq!(
            doc.rows().next().unwrap().cells[1],
            RenderedCell::Text("https://toko.id".into())
        );
    }
}
