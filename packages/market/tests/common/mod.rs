// Common test utilities
#![allow(dead_code)]

use market_core::domains::search::{SearchOrchestrator, SearchSession};
use market_core::kernel::MockSearchModel;
use std::sync::Arc;

/// Three leads as the model returns them, with a lead-in paragraph.
pub const KOPI_BANDUNG_LEADS: &str = "\
Berikut daftar prospek potensial untuk Kopi Robusta di Bandung:

| Nama Bisnis | Kontak (Telp/WA) | Alamat Lengkap | Alasan Prospek |
|---|---|---|---|
| Kafe Senja | 0812-1111-2222 | Jl. Braga No. 1, Bandung | Menyajikan kopi manual brew setiap hari |
| Warung Kopi Pojok | 0813 3333 4444 | Jl. Dago No. 2, Bandung | Menu utama kopi tubruk |
| Hotel Asri | (022) 420 1234 | Jl. Riau No. 3, Bandung | Sarapan tamu membutuhkan pasokan kopi rutin dalam jumlah besar setiap minggu |

Semua bisnis di atas terverifikasi di Google Maps.";

/// A second batch for "load more".
pub const KOPI_LEMBANG_LEADS: &str = "\
| Nama Bisnis | Kontak (Telp/WA) | Alamat Lengkap | Alasan Prospek |
|---|---|---|---|
| Kedai Lembang | 0815 5555 6666 | Jl. Raya Lembang 10 | Kafe wisata ramai |";

pub fn session_with(model: &MockSearchModel) -> SearchSession {
    SearchSession::new(SearchOrchestrator::new(Arc::new(model.clone())))
}
