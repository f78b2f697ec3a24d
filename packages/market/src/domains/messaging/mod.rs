// Messaging domain - WhatsApp outreach to a selected lead
//
// Responsibilities:
// - Normalize contact cells into gateway targets
// - Expand per-mode message templates
// - Persist gateway token, sender name and template
// - Validate and submit drafts through the message gateway

pub mod composer;
pub mod errors;
pub mod models;
pub mod phone;
pub mod settings;
pub mod templates;

pub use composer::MessageComposer;
pub use errors::{SendError, SettingsError};
pub use models::{Attachment, Lead, MessageDraft, SendReceipt};
pub use phone::normalize_phone;
pub use settings::{MessagingSettings, SettingsStore};
pub use templates::{
    default_template, expand_template, needs_replacement, GENERIC_REASON, LEADS_DEFAULT_TEMPLATE,
    SUPPLIER_DEFAULT_TEMPLATE,
};
