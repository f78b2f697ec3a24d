use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key in the environment.
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx reply. `status` is the canonical code from the error envelope
    /// (`INVALID_ARGUMENT`, `RESOURCE_EXHAUSTED`, ...) when the body had one.
    #[error("{message} (HTTP {code})")]
    Api {
        code: u16,
        status: Option<String>,
        message: String,
    },

    /// 2xx reply whose body is not a generateContent response.
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl GeminiError {
    /// Text fit for showing to an end user: the API's own message for
    /// envelope errors, the bare cause otherwise.
    pub fn message(&self) -> String {
        match self {
            GeminiError::Api { message, .. } => message.clone(),
            GeminiError::Network(cause) | GeminiError::Decode(cause) => cause.clone(),
            GeminiError::MissingApiKey => self.to_string(),
        }
    }

    /// Quota exhaustion and server-side failures.
    pub fn is_transient(&self) -> bool {
        match self {
            GeminiError::Api { code, status, .. } => {
                *code == 429 || *code >= 500 || status.as_deref() == Some("RESOURCE_EXHAUSTED")
            }
            GeminiError::Network(_) => true,
            _ => false,
        }
    }
}
