use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Token API Fonnte belum dikonfigurasi. Silakan atur di menu utama.")]
    MissingToken,

    #[error("Nomor target tidak valid.")]
    InvalidTarget,

    #[error("{0}")]
    InvalidAttachment(String),

    /// The gateway answered and refused the message.
    #[error("Gagal: {0}")]
    Rejected(String),

    /// The gateway could not be reached or answered with garbage.
    #[error("Gagal Terkirim. Periksa koneksi jaringan ke gateway pesan ({0}).")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Gagal membaca/menyimpan konfigurasi: {0}")]
    Io(#[from] std::io::Error),

    #[error("File konfigurasi rusak: {0}")]
    Json(#[from] serde_json::Error),
}
