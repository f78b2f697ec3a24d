use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::SendError;

/// A row of a result table, read through the column roles of its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    /// Raw contact cell, not yet phone-normalized.
    pub contact: String,
    pub location: String,
    pub reason: String,
}

impl Lead {
    /// Made-up lead used to check that gateway settings work.
    pub fn sample() -> Self {
        Self {
            name: "Customer/Supplier Tes".to_string(),
            contact: "081234567890".to_string(),
            location: "Lokasi Simulasi".to_string(),
            reason: "Ini adalah simulasi leads untuk mengetes konfigurasi pengiriman pesan Fonnte anda."
                .to_string(),
        }
    }
}

/// An editable outgoing message. Derived from a lead, then freely edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub target: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl MessageDraft {
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Characters in the body, as shown under the editor.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}

/// One image sent along with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Read an image from disk. Anything that does not look like an image is
    /// refused.
    pub async fn from_path(path: &Path) -> Result<Self, SendError> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(SendError::InvalidAttachment(format!(
                "{} bukan file gambar.",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            SendError::InvalidAttachment(format!("Gagal membaca {}: {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            file_name,
            mime_type: mime.essence_str().to_string(),
            bytes,
        })
    }
}

/// What the gateway said after accepting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub detail: Option<String>,
}

impl SendReceipt {
    pub const SUCCESS_MESSAGE: &'static str = "Pesan Berhasil Terkirim!";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_image_attachments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("katalog.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();

        assert_eq!(attachment.file_name, "katalog.png");
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.bytes.len(), 4);
    }

    #[tokio::test]
    async fn refuses_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harga.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let result = Attachment::from_path(&path).await;

        assert!(matches!(result, Err(SendError::InvalidAttachment(_))));
    }

    #[tokio::test]
    async fn missing_image_is_invalid() {
        let dir = tempfile::tempdir().unwrap();

        let result = Attachment::from_path(&dir.path().join("hilang.jpg")).await;

        assert!(matches!(result, Err(SendError::InvalidAttachment(_))));
    }
}
