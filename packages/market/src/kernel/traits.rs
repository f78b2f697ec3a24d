// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt building, merging and template expansion live in the domains and use
// these traits to reach the outside world.
//
// Naming convention: Base* for trait names (e.g., BaseSearchModel)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::messaging::Attachment;
use crate::domains::search::{Coordinates, GroundingSource};

// =============================================================================
// Search Model Trait (Infrastructure - grounded generation)
// =============================================================================

/// One grounded generation call. Both retrieval tools (web search and map
/// lookup) are always requested together.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    /// Where the map tool should center its lookup.
    pub center: Option<Coordinates>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    /// Primary text output; `None` when the model produced no text.
    pub text: Option<String>,
    pub grounding_sources: Vec<GroundingSource>,
}

#[async_trait]
pub trait BaseSearchModel: Send + Sync {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelReply>;
}

// =============================================================================
// Message Gateway Trait (Infrastructure - WhatsApp send)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub target: String,
    pub message: String,
    pub attachment: Option<Attachment>,
}

/// Gateway answer. `accepted == false` carries the gateway's own reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub accepted: bool,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

#[async_trait]
pub trait BaseMessageGateway: Send + Sync {
    /// Submit one message. `Err` means the gateway could not be reached or
    /// understood; a refusal is an `Ok` reply.
    async fn send(&self, token: &str, message: OutgoingMessage) -> Result<GatewayReply>;
}
