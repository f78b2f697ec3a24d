//! Draft, edit and send a WhatsApp message to one lead

use anyhow::Result;
use dialoguer::{Editor, Input, Select};
use market_core::domains::messaging::{
    Attachment, Lead, MessageComposer, MessageDraft, SendReceipt,
};
use market_core::domains::search::SearchMode;
use std::path::{Path, PathBuf};

use crate::context::AppContext;
use crate::render::print_draft;

/// `test-message`: send the sample lead's draft to check gateway settings.
pub async fn run_test(ctx: &AppContext, image: Option<PathBuf>) -> Result<()> {
    let settings = ctx.messaging_settings(SearchMode::Leads)?;
    let composer = ctx.composer(settings);

    let mut draft = composer.draft_for(&Lead::sample());
    if let Some(path) = image {
        draft = draft.with_attachment(Attachment::from_path(&path).await?);
    }

    if ctx.quiet {
        composer.send(&draft).await?;
        ctx.print_success(SendReceipt::SUCCESS_MESSAGE);
        return Ok(());
    }
    compose(ctx, &composer, draft).await
}

/// Interactive draft editor for a selected lead.
pub async fn compose_for_lead(ctx: &AppContext, lead: &Lead, mode: SearchMode) -> Result<()> {
    let settings = ctx.messaging_settings(mode)?;
    let composer = ctx.composer(settings);

    ctx.print_header(&format!("Kirim Pesan ke {}", lead.name));
    println!("  Lokasi: {}", lead.location);
    compose(ctx, &composer, composer.draft_for(lead)).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComposeAction {
    Send,
    ChangeTarget,
    EditBody,
    AttachImage,
    RemoveAttachment,
    Cancel,
}

impl ComposeAction {
    fn label(self) -> &'static str {
        match self {
            ComposeAction::Send => "📤 Kirim",
            ComposeAction::ChangeTarget => "📞 Ubah nomor",
            ComposeAction::EditBody => "✏️  Ubah pesan",
            ComposeAction::AttachImage => "🖼️  Lampirkan gambar",
            ComposeAction::RemoveAttachment => "🗑️  Hapus lampiran",
            ComposeAction::Cancel => "↩️  Batal",
        }
    }
}

/// Menu for the current draft. Attaching again replaces the image.
fn compose_actions(has_attachment: bool) -> Vec<ComposeAction> {
    let mut actions = vec![
        ComposeAction::Send,
        ComposeAction::ChangeTarget,
        ComposeAction::EditBody,
        ComposeAction::AttachImage,
    ];
    if has_attachment {
        actions.push(ComposeAction::RemoveAttachment);
    }
    actions.push(ComposeAction::Cancel);
    actions
}

async fn compose(ctx: &AppContext, composer: &MessageComposer, mut draft: MessageDraft) -> Result<()> {
    loop {
        println!();
        print_draft(&draft);
        println!();

        let actions = compose_actions(draft.attachment.is_some());
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let choice = Select::with_theme(&ctx.theme())
            .with_prompt("Pesan")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            ComposeAction::Send => {
                if send(ctx, composer, &draft).await {
                    return Ok(());
                }
            }
            ComposeAction::ChangeTarget => {
                draft.target = Input::with_theme(&ctx.theme())
                    .with_prompt("Nomor WhatsApp")
                    .with_initial_text(draft.target.clone())
                    .allow_empty(true)
                    .interact_text()?;
            }
            ComposeAction::EditBody => {
                if let Some(body) = Editor::new().edit(&draft.body)? {
                    draft.body = body;
                }
            }
            ComposeAction::AttachImage => {
                let path: String = Input::with_theme(&ctx.theme())
                    .with_prompt("Path gambar")
                    .interact_text()?;
                match Attachment::from_path(Path::new(path.trim())).await {
                    Ok(attachment) => draft.attachment = Some(attachment),
                    Err(e) => ctx.print_warning(&e.to_string()),
                }
            }
            ComposeAction::RemoveAttachment => {
                draft.attachment = None;
                ctx.print_info("Lampiran dihapus");
            }
            ComposeAction::Cancel => return Ok(()),
        }
    }
}

// Failures are printed and the draft stays open for another try.
async fn send(ctx: &AppContext, composer: &MessageComposer, draft: &MessageDraft) -> bool {
    ctx.print_info("Mengirim...");
    match composer.send(draft).await {
        Ok(_) => {
            ctx.print_success(SendReceipt::SUCCESS_MESSAGE);
            true
        }
        Err(e) => {
            ctx.print_error(&e.to_string());
            false
        }
    }
}
