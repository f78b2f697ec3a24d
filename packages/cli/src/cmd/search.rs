//! One-shot search command

use anyhow::Result;
use clap::Args;
use market_core::domains::markdown::write_csv;
use market_core::domains::search::{Coordinates, SearchMode, SearchRequest};
use std::path::PathBuf;

use crate::context::AppContext;
use crate::render::{print_document, print_sources};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// What to look for: buyers (leads) or suppliers
    #[arg(long, default_value = "leads")]
    pub mode: SearchMode,

    /// Product you sell (leads) or want to stock (suppliers)
    #[arg(long)]
    pub product: String,

    /// Area name, e.g. "Bandung"
    #[arg(long, required_unless_present = "lat")]
    pub location: Option<String>,

    /// Latitude to search around
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to search around
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Load more results this many times after the first search
    #[arg(long, default_value_t = 0)]
    pub more: usize,

    /// Write all table rows to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Also list grounding sources
    #[arg(long)]
    pub sources: bool,
}

impl SearchArgs {
    pub fn to_request(&self) -> SearchRequest {
        let request = SearchRequest::new(
            self.mode,
            self.product.as_str(),
            self.location.clone().unwrap_or_default(),
        );
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => request.with_coordinates(Coordinates::new(lat, lng)),
            _ => request,
        }
    }
}

pub async fn run(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let mut session = ctx.search_session()?;

    ctx.print_header(&format!("Mencari {} untuk \"{}\"", args.mode, args.product));
    session.search(args.to_request()).await?;

    for round in 1..=args.more {
        ctx.print_info(&format!("Memuat data tambahan ({}/{})...", round, args.more));
        if let Err(e) = session.load_more().await {
            // Earlier results stay valid
            ctx.print_warning(&e.to_string());
            break;
        }
    }

    let Some(data) = session.data() else {
        return Ok(());
    };

    if let Some(doc) = session.rendered() {
        print_document(&doc);
    }

    if args.sources {
        println!();
        print_sources(&data.grounding_sources);
    }

    if let Some(path) = &args.export {
        let lines = write_csv(&data.markdown_text, path)?;
        ctx.print_success(&format!("{} baris diekspor ke {}", lines, path.display()));
    }

    Ok(())
}
