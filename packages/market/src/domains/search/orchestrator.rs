use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::errors::SearchError;
use super::models::{SearchRequest, SearchResponse};
use super::prompts::build_prompt;
use crate::kernel::{BaseSearchModel, ModelRequest, DEFAULT_TEMPERATURE, GEMINI_2_5_FLASH};

/// Shown when the model answered without any text.
pub const NO_MATCHING_DATA: &str = "Maaf, tidak ditemukan data yang sesuai saat ini.";

const GENERIC_CONNECTION_ERROR: &str = "Koneksi bermasalah";

/// Turns a [`SearchRequest`] into one grounded model call.
#[derive(Clone)]
pub struct SearchOrchestrator {
    model: Arc<dyn BaseSearchModel>,
    model_name: String,
    temperature: f32,
}

impl SearchOrchestrator {
    pub fn new(model: Arc<dyn BaseSearchModel>) -> Self {
        Self {
            model,
            model_name: GEMINI_2_5_FLASH.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[instrument(skip(self, request), fields(mode = %request.mode, expand = request.expand_radius))]
    pub async fn find_leads(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let prompts = build_prompt(request);

        let model_request = ModelRequest {
            model: self.model_name.clone(),
            system_instruction: prompts.system_instruction,
            prompt: prompts.prompt,
            center: request.coordinates,
            temperature: self.temperature,
        };

        let reply = self.model.generate(&model_request).await.map_err(|e| {
            warn!(error = %e, "Search model call failed");
            let message = e.to_string();
            if message.trim().is_empty() {
                SearchError::Upstream(GENERIC_CONNECTION_ERROR.to_string())
            } else {
                SearchError::Upstream(message)
            }
        })?;

        let markdown_text = reply
            .text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_MATCHING_DATA.to_string());

        info!(
            chars = markdown_text.chars().count(),
            sources = reply.grounding_sources.len(),
            "Search completed"
        );

        Ok(SearchResponse {
            markdown_text,
            grounding_sources: reply.grounding_sources,
        })
    }
}
