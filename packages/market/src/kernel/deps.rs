//! Application dependencies (using traits for testability)
//!
//! Adapters wrap the REST clients behind the kernel traits so domain code
//! never touches HTTP directly.

use anyhow::Result;
use async_trait::async_trait;
use fonnte::models::{FileUpload, SendMessage};
use fonnte::{FonnteOptions, FonnteService};
use gemini_client::types::{GenerateContentRequest, GroundingChunk, Tool};
use gemini_client::GeminiClient;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::domains::search::{GroundingSource, MapsSource, WebSource};
use crate::kernel::{
    BaseMessageGateway, BaseSearchModel, GatewayReply, ModelReply, ModelRequest, OutgoingMessage,
};

// =============================================================================
// GeminiClient Adapter (implements BaseSearchModel trait)
// =============================================================================

/// Wrapper around GeminiClient that implements BaseSearchModel trait
pub struct GeminiAdapter(pub Arc<GeminiClient>);

impl GeminiAdapter {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseSearchModel for GeminiAdapter {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelReply> {
        let response = self
            .0
            .generate_content(&request.model, &build_request(request))
            .await
            .map_err(|e| {
                warn!(error = %e, transient = e.is_transient(), "Gemini call failed");
                anyhow::anyhow!("{}", e.message())
            })?;

        Ok(ModelReply {
            text: response.text(),
            grounding_sources: response
                .grounding_chunks()
                .iter()
                .map(grounding_source)
                .collect(),
        })
    }
}

/// Grounded request: web search and maps in a single tool entry, centred on
/// the request's coordinates when it has any.
fn build_request(request: &ModelRequest) -> GenerateContentRequest {
    let body = GenerateContentRequest::new(&request.prompt)
        .system_instruction(&request.system_instruction)
        .tool(Tool::google_search().with(Tool::google_maps()))
        .temperature(request.temperature);

    match request.center {
        Some(center) => body.retrieval_center(center.latitude, center.longitude),
        None => body,
    }
}

fn grounding_source(chunk: &GroundingChunk) -> GroundingSource {
    GroundingSource {
        web: chunk.web.as_ref().map(|web| WebSource {
            uri: web.uri.clone(),
            title: web.title.clone(),
        }),
        maps: chunk.maps.as_ref().map(|maps| MapsSource {
            uri: maps.uri.clone(),
            title: maps.title.clone(),
            place_id: maps.place_id.clone(),
            review_snippets: maps
                .place_answer_sources
                .iter()
                .flat_map(|sources| sources.review_snippets.iter())
                .filter_map(|snippet| snippet.content.clone())
                .collect(),
        }),
    }
}

// =============================================================================
// FonnteService Adapter (implements BaseMessageGateway trait)
// =============================================================================

/// Builds a [`FonnteService`] per send, since the token comes from the
/// user's saved settings rather than the environment.
pub struct FonnteAdapter {
    base_url: String,
}

impl FonnteAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BaseMessageGateway for FonnteAdapter {
    async fn send(&self, token: &str, message: OutgoingMessage) -> Result<GatewayReply> {
        let service =
            FonnteService::new(FonnteOptions::new(token).with_base_url(self.base_url.as_str()));

        let response = service
            .send_message(SendMessage {
                target: message.target,
                message: message.message,
                file: message.attachment.map(|a| FileUpload {
                    file_name: a.file_name,
                    mime_type: a.mime_type,
                    bytes: a.bytes,
                }),
            })
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(GatewayReply {
            accepted: response.status,
            reason: response.reason,
            detail: response.detail,
        })
    }
}

// =============================================================================
// AppDeps
// =============================================================================

/// Dependencies shared by the search and messaging domains
#[derive(Clone)]
pub struct AppDeps {
    pub search_model: Arc<dyn BaseSearchModel>,
    pub gateway: Arc<dyn BaseMessageGateway>,
}

impl AppDeps {
    pub fn new(search_model: Arc<dyn BaseSearchModel>, gateway: Arc<dyn BaseMessageGateway>) -> Self {
        Self {
            search_model,
            gateway,
        }
    }

    /// Production wiring: Gemini for search, Fonnte for messages.
    pub fn from_config(config: &Config) -> Result<Self> {
        let gemini = GeminiClient::new(config.require_gemini_api_key()?)
            .with_base_url(config.gemini_base_url.as_str());

        Ok(Self::new(
            Arc::new(GeminiAdapter::new(Arc::new(gemini))),
            Arc::new(FonnteAdapter::new(config.fonnte_base_url.as_str())),
        ))
    }
}
