//! Messaging settings commands

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use dialoguer::{Editor, Input, Password};
use market_core::domains::messaging::MessagingSettings;
use std::path::PathBuf;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show saved gateway settings
    Show,

    /// Update saved gateway settings
    Set {
        /// Fonnte API token
        #[arg(long)]
        token: Option<String>,

        /// Name used in the message signature (empty to drop it)
        #[arg(long)]
        sender: Option<String>,

        /// Read the message template from a file
        #[arg(long)]
        template_file: Option<PathBuf>,
    },
}

pub fn run(ctx: &AppContext, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show => show(ctx),
        SettingsCommand::Set {
            token,
            sender,
            template_file,
        } => set(ctx, token, sender, template_file),
    }
}

fn show(ctx: &AppContext) -> Result<()> {
    let settings = ctx.store.load()?;

    ctx.print_header("Konfigurasi Pesan");
    println!("  File:    {}", ctx.store.path().display());
    println!("  Token:   {}", masked(&settings.token));
    println!(
        "  Pengirim: {}",
        if settings.sender_name.is_empty() {
            style("(kosong)".to_string()).dim()
        } else {
            style(settings.sender_name.clone())
        }
    );
    match &settings.template {
        Some(template) => {
            println!("  Template:");
            for line in template.lines() {
                println!("    {}", style(line).dim());
            }
        }
        None => println!("  Template: {}", style("(bawaan)").dim()),
    }
    Ok(())
}

fn set(
    ctx: &AppContext,
    token: Option<String>,
    sender: Option<String>,
    template_file: Option<PathBuf>,
) -> Result<()> {
    let mut settings = ctx.store.load()?;

    if let Some(token) = token {
        settings.token = token.trim().to_string();
    }
    if let Some(sender) = sender {
        settings.sender_name = sender.trim().to_string();
    }
    if let Some(path) = template_file {
        let template = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        settings.template = Some(template);
    }

    ctx.store.save(&settings)?;
    ctx.print_success("Konfigurasi Tersimpan!");
    Ok(())
}

/// Prompt for every setting, prefilled with the current values.
pub fn edit_interactively(ctx: &AppContext, mut settings: MessagingSettings) -> Result<MessagingSettings> {
    let token = Password::with_theme(&ctx.theme())
        .with_prompt("Token API Fonnte (kosongkan untuk tetap)")
        .allow_empty_password(true)
        .interact()?;
    if !token.trim().is_empty() {
        settings.token = token.trim().to_string();
    }

    settings.sender_name = Input::with_theme(&ctx.theme())
        .with_prompt("Nama pengirim")
        .with_initial_text(settings.sender_name.clone())
        .allow_empty(true)
        .interact_text()?;

    if ctx.confirm("Ubah template pesan?", false)? {
        let current = settings.template.clone().unwrap_or_default();
        if let Some(edited) = Editor::new().edit(&current)? {
            settings.template = Some(edited);
        }
    }

    ctx.store.save(&settings)?;
    ctx.print_success("Konfigurasi Tersimpan!");
    Ok(settings)
}

fn masked(token: &str) -> String {
    let count = token.chars().count();
    if count == 0 {
        return "(belum diatur)".to_string();
    }
    let tail: String = token.chars().skip(count.saturating_sub(4)).collect();
    format!("{}{}", "*".repeat(count.saturating_sub(4)), tail)
}
