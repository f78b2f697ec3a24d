//! Terminal rendering of search results, sources and drafts

use colored::Colorize;
use console::{measure_text_width, pad_str, Alignment};
use market_core::domains::markdown::{RenderedBlock, RenderedCell, RenderedDocument, RenderedTable};
use market_core::domains::messaging::MessageDraft;
use market_core::domains::search::GroundingSource;

/// Widest a cell may be before it is cut.
const MAX_CELL_WIDTH: usize = 42;

/// Print a rendered document. Table rows are numbered across all tables so
/// the numbers can be used to pick a lead.
pub fn print_document(doc: &RenderedDocument) {
    let mut row_number = 1;

    for block in &doc.blocks {
        match block {
            RenderedBlock::Heading(text) => {
                println!();
                println!("{}", text.bold().green());
            }
            RenderedBlock::ListItem(text) => println!("  • {}", text),
            RenderedBlock::Paragraph(text) => println!("{}", text),
            RenderedBlock::Table(table) => {
                println!();
                print_table(table, &mut row_number);
                println!();
            }
        }
    }
}

fn print_table(table: &RenderedTable, row_number: &mut usize) {
    let header: Vec<String> = std::iter::once("#".to_string())
        .chain(table.header.iter().cloned())
        .collect();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let number = *row_number;
            *row_number += 1;
            std::iter::once(number.to_string())
                .chain(row.cells.iter().map(cell_text))
                .collect()
        })
        .collect();

    let columns = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            std::iter::once(&header)
                .chain(rows.iter())
                .filter_map(|r| r.get(i))
                .map(|c| measure_text_width(c))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    println!("{}", format_row(&header, &widths).bold());
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─")
            .dimmed()
    );
    for row in &rows {
        println!("{}", format_row(row, &widths));
    }
}

fn cell_text(cell: &RenderedCell) -> String {
    match cell {
        RenderedCell::Text(text) => text.clone(),
        RenderedCell::Link { label, url } => format!("{} <{}>", label, url),
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            pad_str(cell, *width, Alignment::Left, Some("…")).into_owned()
        })
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// List the provenance references returned with the results.
pub fn print_sources(sources: &[GroundingSource]) {
    if sources.is_empty() {
        println!("{}", "Tidak ada sumber referensi.".dimmed());
        return;
    }

    println!("{}", "Sumber Referensi".bold());
    for (i, source) in sources.iter().enumerate() {
        if let Some(web) = &source.web {
            println!(
                "  {}. {} {}",
                i + 1,
                web.title.as_deref().unwrap_or("(tanpa judul)"),
                web.uri.as_deref().unwrap_or("").cyan()
            );
        }
        if let Some(maps) = &source.maps {
            println!(
                "  {}. 📍 {} {}",
                i + 1,
                maps.title.as_deref().unwrap_or("(tanpa nama)"),
                maps.uri.as_deref().unwrap_or("").cyan()
            );
            for snippet in &maps.review_snippets {
                println!("       \"{}\"", snippet.italic().dimmed());
            }
        }
    }
}

pub fn print_draft(draft: &MessageDraft) {
    println!("{} {}", "Nomor WhatsApp:".bold(), draft.target);
    println!("{}", "Pesan:".bold());
    for line in draft.body.lines() {
        println!("  {}", line);
    }
    println!("{}", format!("{} Karakter", draft.body_len()).dimmed());
    if let Some(attachment) = &draft.attachment {
        println!("{} {}", "Lampiran:".bold(), attachment.file_name);
    }
}
