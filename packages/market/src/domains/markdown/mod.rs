// Markdown domain - turns model output into something people can act on
//
// Responsibilities:
// - Line-oriented block parsing (headings, list items, paragraphs, pipe tables)
// - Column role guessing from Indonesian table headers
// - Row-addressable rendering with map links and lead handles
// - CSV export straight from the raw text

pub mod columns;
pub mod export;
pub mod parser;
pub mod render;

pub use columns::ColumnRoles;
pub use export::{export_csv, write_csv, ExportError, CSV_FILE_NAME};
pub use parser::{parse_blocks, Block, TableBlock};
pub use render::{
    render, LeadRef, RenderedBlock, RenderedCell, RenderedDocument, RenderedRow, RenderedTable,
    ACTION_HEADER, MAPS_LINK_LABEL,
};
