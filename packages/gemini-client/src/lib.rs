//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports system instructions, the built-in Google
//! Search / Google Maps grounding tools, retrieval centering and grounding
//! metadata in responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest, Tool};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let request = GenerateContentRequest::new("Grosir kopi di Bandung")
//!     .system_instruction("Anda adalah asisten riset pasar.")
//!     .tool(Tool::google_search().with(Tool::google_maps()))
//!     .temperature(0.7);
//!
//! let response = client.generate_content("gemini-2.5-flash", &request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY` (or `API_KEY`).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| GeminiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Generate content.
    ///
    /// Non-2xx responses are turned into [`GeminiError::Api`] carrying the
    /// code, status and message from the API's error envelope when present.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(api_error(&error_text, status));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        debug!(
            model = %model,
            candidates = body.candidates.len(),
            grounding_chunks = body.grounding_chunks().len(),
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(body)
    }
}

fn api_error(body: &str, status: reqwest::StatusCode) -> GeminiError {
    match serde_json::from_str::<types::ErrorEnvelope>(body) {
        Ok(envelope) => {
            let detail = envelope.error;
            let message = if detail.message.is_empty() {
                detail.status.clone().unwrap_or_else(|| status.to_string())
            } else {
                detail.message
            };
            GeminiError::Api {
                code: detail.code.unwrap_or(status.as_u16()),
                status: detail.status,
                message,
            }
        }
        Err(_) => GeminiError::Api {
            code: status.as_u16(),
            status: None,
            message: if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}
