use thiserror::Error;

/// Search failures, worded for the person running the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The form was incomplete; nothing was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// The model call failed in transport or upstream.
    #[error("Gagal mengambil data: {0}")]
    Upstream(String),

    /// A follow-up call succeeded but returned nothing usable.
    #[error("Tidak ditemukan data tambahan yang valid di area sekitar.")]
    NoAdditionalData,

    /// "Load more" without a previous successful search.
    #[error("Belum ada hasil pencarian untuk diperluas.")]
    NothingToExtend,

    /// Another search from the same session has not finished yet.
    #[error("Pencarian sebelumnya masih berjalan.")]
    Busy,
}
