//! Interactive menu loop

use anyhow::Result;
use dialoguer::{FuzzySelect, Input, Select};
use market_core::domains::markdown::{write_csv, CSV_FILE_NAME};
use market_core::domains::messaging::Lead;
use market_core::domains::search::{Coordinates, SearchMode, SearchRequest, SearchSession};
use std::path::PathBuf;

use crate::cmd::{message, settings};
use crate::context::AppContext;
use crate::render::{print_document, print_sources};

pub async fn run(ctx: &AppContext) -> Result<()> {
    let items = [
        "🔍 Pencarian baru",
        "➕ Muat data tambahan (area sekitar)",
        "💬 Pilih baris & kirim pesan",
        "📄 Export CSV",
        "🌐 Tampilkan sumber referensi",
        "⚙️  Konfigurasi pesan",
        "🧪 Tes kirim pesan",
        "🔄 Reset",
        "❌ Keluar",
    ];

    let mut session: Option<SearchSession> = None;

    loop {
        println!();
        let choice = FuzzySelect::with_theme(&ctx.theme())
            .with_prompt("Apa yang ingin dilakukan?")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                if session.is_none() {
                    match ctx.search_session() {
                        Ok(created) => session = Some(created),
                        Err(e) => {
                            ctx.print_error(&format!("{:#}", e));
                            continue;
                        }
                    }
                }
                if let Some(session) = session.as_mut() {
                    new_search(ctx, session).await?;
                }
            }
            1 => match session.as_mut() {
                Some(session) => load_more(ctx, session).await,
                None => ctx.print_warning("Belum ada hasil pencarian."),
            },
            2 => match session.as_mut() {
                Some(session) => pick_and_message(ctx, session).await?,
                None => ctx.print_warning("Belum ada hasil pencarian."),
            },
            3 => export(ctx, session.as_ref())?,
            4 => match session.as_ref().and_then(SearchSession::data) {
                Some(data) => print_sources(&data.grounding_sources),
                None => ctx.print_warning("Belum ada hasil pencarian."),
            },
            5 => {
                let saved = ctx.store.load()?;
                settings::edit_interactively(ctx, saved)?;
            }
            6 => {
                let mode = session.as_ref().map(SearchSession::mode).unwrap_or_default();
                message::compose_for_lead(ctx, &Lead::sample(), mode).await?;
            }
            7 => {
                if let Some(session) = session.as_mut() {
                    session.reset();
                }
                ctx.print_info("Hasil pencarian dihapus.");
            }
            _ => break,
        }
    }

    Ok(())
}

async fn new_search(ctx: &AppContext, session: &mut SearchSession) -> Result<()> {
    let modes = ["Cari Pembeli (leads)", "Cari Supplier (kulakan)"];
    let mode = match Select::with_theme(&ctx.theme())
        .with_prompt("Mode")
        .items(&modes)
        .default(0)
        .interact()?
    {
        0 => SearchMode::Leads,
        _ => SearchMode::Suppliers,
    };

    let product: String = Input::with_theme(&ctx.theme())
        .with_prompt(match mode {
            SearchMode::Leads => "Produk yang dijual",
            SearchMode::Suppliers => "Barang yang dicari",
        })
        .interact_text()?;

    let place = Select::with_theme(&ctx.theme())
        .with_prompt("Lokasi")
        .items(&["Nama area", "Koordinat GPS"])
        .default(0)
        .interact()?;

    let request = if place == 0 {
        let location: String = Input::with_theme(&ctx.theme())
            .with_prompt("Area (kota/kecamatan)")
            .interact_text()?;
        SearchRequest::new(mode, product, location)
    } else {
        let latitude: f64 = Input::with_theme(&ctx.theme())
            .with_prompt("Latitude")
            .interact_text()?;
        let longitude: f64 = Input::with_theme(&ctx.theme())
            .with_prompt("Longitude")
            .interact_text()?;
        SearchRequest::new(mode, product, "")
            .with_coordinates(Coordinates::new(latitude, longitude))
    };

    ctx.print_info("Mencari...");
    match session.search(request).await {
        Ok(_) => show_results(session),
        Err(e) => ctx.print_error(&format!("Pencarian Terhenti: {}", e)),
    }
    Ok(())
}

async fn load_more(ctx: &AppContext, session: &mut SearchSession) {
    ctx.print_info("Memuat data tambahan...");
    match session.load_more().await {
        Ok(_) => show_results(session),
        Err(e) => ctx.print_warning(&e.to_string()),
    }
}

fn show_results(session: &SearchSession) {
    if let Some(doc) = session.rendered() {
        print_document(&doc);
    }
}

async fn pick_and_message(ctx: &AppContext, session: &mut SearchSession) -> Result<()> {
    let Some(doc) = session.rendered() else {
        ctx.print_warning("Belum ada hasil pencarian.");
        return Ok(());
    };

    let rows: Vec<_> = doc.rows().collect();
    if rows.is_empty() {
        ctx.print_warning("Tidak ada baris tabel untuk dipilih.");
        return Ok(());
    }

    let labels: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{}. {} ({})", i + 1, row.lead.name, row.lead.contact))
        .collect();

    let index = FuzzySelect::with_theme(&ctx.theme())
        .with_prompt("Pilih target")
        .items(&labels)
        .default(0)
        .interact()?;

    if !session.select_lead(rows[index].action) {
        return Ok(());
    }

    if let Some(lead) = session.selected().cloned() {
        message::compose_for_lead(ctx, &lead, session.mode()).await?;
    }
    session.clear_selection();
    Ok(())
}

fn export(ctx: &AppContext, session: Option<&SearchSession>) -> Result<()> {
    let Some(data) = session.and_then(SearchSession::data) else {
        ctx.print_warning("Belum ada hasil pencarian.");
        return Ok(());
    };

    let path: String = Input::with_theme(&ctx.theme())
        .with_prompt("Simpan ke")
        .default(CSV_FILE_NAME.to_string())
        .interact_text()?;

    match write_csv(&data.markdown_text, &PathBuf::from(path.trim())) {
        Ok(lines) => ctx.print_success(&format!("{} baris diekspor.", lines)),
        Err(e) => ctx.print_warning(&e.to_string()),
    }
    Ok(())
}
