// Thin client for the Fonnte WhatsApp gateway (https://docs.fonnte.com/).

pub mod models;

use reqwest::{header, multipart, Client};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{SendMessage, SendResponse};

const DEFAULT_BASE_URL: &str = "https://api.fonnte.com";

#[derive(Debug, Error)]
pub enum FonnteError {
    /// The request never produced a readable HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway answered with something that is not a send response.
    #[error("unexpected gateway response ({status}): {body}")]
    Parse { status: u16, body: String },

    /// The attachment's MIME type could not be used in a multipart part.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),
}

#[derive(Debug, Clone)]
pub struct FonnteOptions {
    pub token: String,
    pub base_url: String,
}

impl FonnteOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct FonnteService {
    options: FonnteOptions,
    client: Client,
}

impl FonnteService {
    pub fn new(options: FonnteOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    pub fn send_url(&self) -> String {
        format!("{}/send", self.options.base_url.trim_end_matches('/'))
    }

    /// Submit one message. A gateway refusal is returned as `Ok` with
    /// `status == false`; only transport and decoding problems are errors.
    pub async fn send_message(&self, message: SendMessage) -> Result<SendResponse, FonnteError> {
        let mut form = multipart::Form::new()
            .text("target", message.target.clone())
            .text("message", message.message);

        if let Some(file) = message.file {
            let size = file.bytes.len();
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| FonnteError::InvalidAttachment(e.to_string()))?;
            debug!(file_name = %file.file_name, size, "Attaching file");
            form = form.part("file", part);
        }

        let res = self
            .client
            .post(self.send_url())
            .header(header::AUTHORIZATION, self.options.token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request to Fonnte failed");
                FonnteError::Network(e.to_string())
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FonnteError::Network(e.to_string()))?;

        match serde_json::from_str::<SendResponse>(&body) {
            Ok(data) => {
                debug!(
                    recipient = %message.target,
                    accepted = data.status,
                    "Fonnte send response"
                );
                Ok(data)
            }
            Err(e) => {
                warn!(status = %status, error = %e, "Failed to parse Fonnte response");
                Err(FonnteError::Parse {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_url_respects_base_url() {
        let service = FonnteService::new(
            FonnteOptions::new("token").with_base_url("http://localhost:9000/"),
        );

        assert_eq!(service.send_url(), "http://localhost:9000/send");
    }

    #[test]
    fn default_base_url_points_at_fonnte() {
        let service = FonnteService::new(FonnteOptions::new("token"));

        assert_eq!(service.send_url(), "https://api.fonnte.com/send");
    }

    #[test]
    fn parses_success_and_refusal_bodies() {
        let ok: SendResponse = serde_json::from_str(
            r#"{"detail":"success! message in queue","id":["80367170"],"process":"pending","status":true,"target":["6281234567890"]}"#,
        )
        .unwrap();
        assert!(ok.status);
        assert_eq!(ok.detail.as_deref(), Some("success! message in queue"));

        let refused: SendResponse =
            serde_json::from_str(r#"{"status":false,"reason":"invalid token"}"#).unwrap();
        assert!(!refused.status);
        assert_eq!(refused.reason.as_deref(), Some("invalid token"));
    }
}
