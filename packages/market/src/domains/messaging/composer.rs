use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::errors::SendError;
use super::models::{Lead, MessageDraft, SendReceipt};
use super::phone::normalize_phone;
use super::settings::MessagingSettings;
use super::templates::{expand_template, LEADS_DEFAULT_TEMPLATE};
use crate::kernel::{BaseMessageGateway, OutgoingMessage};

/// Shortest target the gateway is ever asked to deliver to.
const MIN_TARGET_CHARS: usize = 5;

/// Drafts messages for leads and hands them to the gateway.
pub struct MessageComposer {
    gateway: Arc<dyn BaseMessageGateway>,
    settings: MessagingSettings,
}

impl MessageComposer {
    pub fn new(gateway: Arc<dyn BaseMessageGateway>, settings: MessagingSettings) -> Self {
        Self { gateway, settings }
    }

    pub fn settings(&self) -> &MessagingSettings {
        &self.settings
    }

    /// Prefilled, editable draft for a lead.
    pub fn draft_for(&self, lead: &Lead) -> MessageDraft {
        let template = self
            .settings
            .saved_template()
            .unwrap_or(LEADS_DEFAULT_TEMPLATE);

        MessageDraft {
            target: normalize_phone(&lead.contact),
            body: expand_template(template, lead, &self.settings.sender_name),
            attachment: None,
        }
    }

    /// Submit a draft once. No retry on any failure.
    #[instrument(skip(self, draft), fields(recipient = %draft.target, attachment = draft.attachment.is_some()))]
    pub async fn send(&self, draft: &MessageDraft) -> Result<SendReceipt, SendError> {
        if !self.settings.has_token() {
            return Err(SendError::MissingToken);
        }

        let target = draft.target.trim();
        if target.chars().count() < MIN_TARGET_CHARS {
            return Err(SendError::InvalidTarget);
        }

        let reply = self
            .gateway
            .send(
                self.settings.token.trim(),
                OutgoingMessage {
                    target: target.to_string(),
                    message: draft.body.clone(),
                    attachment: draft.attachment.clone(),
                },
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "Message gateway unreachable");
                SendError::Network(e.to_string())
            })?;

        if !reply.accepted {
            let reason = reply
                .reason
                .unwrap_or_else(|| "alasan tidak diketahui".to_string());
            warn!(reason = %reason, "Message rejected by gateway");
            return Err(SendError::Rejected(reason));
        }

        info!("Message sent");
        Ok(SendReceipt {
            detail: reply.detail,
        })
    }
}
