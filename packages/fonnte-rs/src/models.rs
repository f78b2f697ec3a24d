use serde::{Deserialize, Serialize};

/// Body of a `POST /send` request.
#[derive(Debug, Clone)]
pub struct SendMessage {
    /// Destination number, digits only with country prefix (e.g. `6281234567890`).
    pub target: String,
    pub message: String,
    pub file: Option<FileUpload>,
}

/// A binary attachment sent as the `file` multipart field.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Gateway reply. `status == false` means the gateway refused the message;
/// `reason` then says why (invalid token, disconnected device, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub process: Option<String>,
    /// Message ids; an array or a scalar depending on gateway version.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub target: Option<serde_json::Value>,
}
