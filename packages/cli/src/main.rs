//! Aufmarket command line
//!
//! Market research from the terminal: find buyers or suppliers, export the
//! results and message a lead over WhatsApp.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod context;
mod interactive;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "aufmarket")]
#[command(about = "Riset pasar: cari pembeli dan supplier tangan pertama")]
#[command(version)]
struct Cli {
    /// Run in quiet mode (non-interactive)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the result tables
    Search(cmd::search::SearchArgs),

    /// Menu-driven session (default)
    Interactive,

    /// Gateway token, sender name and message template
    #[command(subcommand)]
    Settings(cmd::settings::SettingsCommand),

    /// Send a sample message to check gateway settings
    TestMessage {
        /// Image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so tables and CSV paths stay clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,market_core=info,aufmarket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::new(cli.quiet)?;

    match cli.command {
        Some(Commands::Search(args)) => cmd::search::run(&ctx, args).await,
        Some(Commands::Settings(cmd)) => cmd::settings::run(&ctx, cmd),
        Some(Commands::TestMessage { image }) => cmd::message::run_test(&ctx, image).await,
        Some(Commands::Interactive) | None => interactive::run(&ctx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::domains::search::{Coordinates, SearchMode};

    #[test]
    fn search_accepts_area_name() {
        let cli = Cli::try_parse_from([
            "aufmarket", "search", "--product", "Kopi Robusta", "--location", "Bandung",
        ])
        .unwrap();

        let Some(Commands::Search(args)) = cli.command else {
            panic!("expected search");
        };
        let request = args.to_request();
        assert_eq!(request.mode, SearchMode::Leads);
        assert_eq!(request.location, "Bandung");
        assert!(request.coordinates.is_none());
    }

    #[test]
    fn search_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "aufmarket", "search", "--mode", "suppliers", "--product", "Gula", "--lat", "-6.9",
            "--lng", "107.6",
        ])
        .unwrap();

        let Some(Commands::Search(args)) = cli.command else {
            panic!("expected search");
        };
        let request = args.to_request();
        assert_eq!(request.mode, SearchMode::Suppliers);
        assert_eq!(request.coordinates, Some(Coordinates::new(-6.9, 107.6)));
    }

    #[test]
    fn search_needs_a_place() {
        assert!(Cli::try_parse_from(["aufmarket", "search", "--product", "Kopi"]).is_err());
        assert!(Cli::try_parse_from([
            "aufmarket", "search", "--product", "Kopi", "--lat", "-6.9"
        ])
        .is_err());
    }
}
