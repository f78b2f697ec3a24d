use super::models::{SearchMode, SearchRequest};
use super::refiner::MAX_EXCLUDED_NAMES;

/// Text pair sent to the model for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    pub system_instruction: String,
    pub prompt: String,
}

const LEADS_SYSTEM_INSTRUCTION: &str = "Anda adalah asisten riset pasar 'Aufmarket'. \
Tugas anda adalah mencari target market (leads) potensial untuk pengguna yang menjual produk tertentu.\n\
Fokus pada bisnis/toko/instansi yang valid dan ada di Google Maps. \
Gunakan tool googleMaps dan googleSearch untuk memverifikasi keberadaan bisnis tersebut.";

const SUPPLIERS_SYSTEM_INSTRUCTION: &str = "Anda adalah asisten riset pasar 'Aufmarket'. \
Tugas anda adalah mencari Supplier/Grosir/Distributor tangan pertama untuk pengguna yang ingin kulakan barang.\n\
Fokus pada supplier yang valid, tangan pertama, atau distributor resmi di Google Maps. \
Gunakan tool googleMaps dan googleSearch untuk memverifikasi.";

const LEADS_COLUMNS: &str = "| Nama Bisnis | Kontak (Telp/WA) | Alamat Lengkap | Alasan Prospek |";
const SUPPLIERS_COLUMNS: &str =
    "| Nama Supplier | Kontak (Telp/WA) | Alamat Lengkap | Kategori/Catatan |";

const FOCUS_AREA: &str = "Fokus di area tersebut.";

/// Build system instruction and user prompt for a request.
pub fn build_prompt(request: &SearchRequest) -> PromptSet {
    let location = location_phrase(request);
    let exclusions = exclusion_clause(&request.exclude_names);

    let (system_instruction, opening, criteria, columns) = match request.mode {
        SearchMode::Leads => (
            LEADS_SYSTEM_INSTRUCTION,
            format!(
                "Saya menjual produk: \"{}\".\n\
                 Tolong carikan daftar prospek/calon pembeli potensial (bisnis/toko/instansi) yang berlokasi {}.",
                request.product, location
            ),
            [
                "Target harus relevan dan mungkin membutuhkan produk tersebut.",
                "Berikan alasan spesifik kenapa mereka butuh.",
                if request.expand_radius {
                    "Perluas pencarian radius jika di titik pusat sudah habis."
                } else {
                    FOCUS_AREA
                },
            ],
            LEADS_COLUMNS,
        ),
        SearchMode::Suppliers => (
            SUPPLIERS_SYSTEM_INSTRUCTION,
            format!(
                "Saya ingin mencari barang/kulakan: \"{}\".\n\
                 Tolong carikan daftar Supplier/Grosir/Distributor/Pabrik yang berlokasi {}.",
                request.product, location
            ),
            [
                "Prioritaskan tangan pertama, distributor resmi, atau grosir besar.",
                "Hindari pengecer kecil jika memungkinkan.",
                if request.expand_radius {
                    "Cari hingga ke kota sebelah jika tidak ada di lokasi spesifik."
                } else {
                    FOCUS_AREA
                },
            ],
            SUPPLIERS_COLUMNS,
        ),
    };

    let criteria: String = criteria
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}\n", i + 1, line))
        .collect();

    let prompt = format!(
        "{opening}\n\n\
         Kriteria pencarian:\n\
         {criteria}{exclusions}\n\n\
         Format output WAJIB berupa Tabel Markdown dengan kolom:\n\
         {columns}\n\n\
         Pastikan menyertakan minimal 5-10 hasil yang valid dan benar-benar ada di Maps."
    );

    PromptSet {
        system_instruction: system_instruction.to_string(),
        prompt,
    }
}

fn location_phrase(request: &SearchRequest) -> String {
    match request.coordinates {
        Some(at) => {
            let mut phrase = format!(
                "di sekitar koordinat lat: {}, long: {}",
                at.latitude, at.longitude
            );
            if request.expand_radius {
                phrase.push_str(
                    " (Silakan cari radius yang lebih luas hingga ke kecamatan/kota sebelah)",
                );
            }
            phrase
        }
        None => {
            let mut phrase = format!("di area \"{}\"", request.location);
            if request.expand_radius {
                phrase.push_str(" (Silakan cari radius yang lebih luas hingga ke area sekitarnya)");
            }
            phrase
        }
    }
}

/// Names of two characters or fewer are dropped before capping.
fn exclusion_clause(names: &[String]) -> String {
    let kept: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| name.chars().count() > 2)
        .take(MAX_EXCLUDED_NAMES)
        .collect();

    if kept.is_empty() {
        return String::new();
    }

    format!(
        "\n\nCATATAN PENTING - FILTER DUPLIKASI:\n\
         JANGAN sertakan bisnis berikut karena sudah ada di hasil sebelumnya: {}.\n\
         Carilah nama bisnis LAIN yang belum disebutkan.",
        kept.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::search::models::Coordinates;

    #[test]
    fn leads_prompt_names_product_area_and_columns() {
        let request = SearchRequest::new(SearchMode::Leads, "Kopi Robusta", "Bandung");
        let set = build_prompt(&request);

        assert!(set.system_instruction.contains("target market (leads)"));
        assert!(set.prompt.starts_with("Saya menjual produk: \"Kopi Robusta\"."));
        assert!(set.prompt.contains("yang berlokasi di area \"Bandung\"."));
        assert!(set.prompt.contains("3. Fokus di area tersebut."));
        assert!(set.prompt.contains(LEADS_COLUMNS));
        assert!(!set.prompt.contains("FILTER DUPLIKASI"));
        assert!(!set.prompt.contains("radius yang lebih luas"));
    }

    #[test]
    fn suppliers_prompt_deprioritizes_retailers() {
        let request = SearchRequest::new(SearchMode::Suppliers, "Gula Aren", "Garut");
        let set = build_prompt(&request);

        assert!(set.system_instruction.contains("Supplier/Grosir/Distributor"));
        assert!(set.prompt.contains("barang/kulakan: \"Gula Aren\""));
        assert!(set.prompt.contains("2. Hindari pengecer kecil jika memungkinkan."));
        assert!(set.prompt.contains(SUPPLIERS_COLUMNS));
    }

    #[test]
    fn coordinates_take_precedence_over_area_name() {
        let request = SearchRequest {
            expand_radius: true,
            ..SearchRequest::new(SearchMode::Leads, "Kopi", "Bandung")
                .with_coordinates(Coordinates::new(-6.9, 107.61))
        };
        let set = build_prompt(&request);

        assert!(set.prompt.contains(
            "di sekitar koordinat lat: -6.9, long: 107.61 (Silakan cari radius yang lebih luas hingga ke kecamatan/kota sebelah)"
        ));
        assert!(!set.prompt.contains("Bandung"));
        assert!(set
            .prompt
            .contains("3. Perluas pencarian radius jika di titik pusat sudah habis."));
    }

    #[test]
    fn expanded_area_search_widens_to_surroundings() {
        let request = SearchRequest {
            expand_radius: true,
            ..SearchRequest::new(SearchMode::Suppliers, "Gula", "Garut")
        };
        let set = build_prompt(&request);

        assert!(set.prompt.contains(
            "di area \"Garut\" (Silakan cari radius yang lebih luas hingga ke area sekitarnya)"
        ));
        assert!(set
            .prompt
            .contains("3. Cari hingga ke kota sebelah jika tidak ada di lokasi spesifik."));
    }

    #[test]
    fn exclusion_clause_skips_short_names() {
        let request = SearchRequest {
            exclude_names: vec!["Toko Abadi".into(), "AB".into(), "Kafe Senja".into()],
            ..SearchRequest::new(SearchMode::Leads, "Kopi", "Bandung")
        };
        let set = build_prompt(&request);

        assert!(set.prompt.contains(
            "JANGAN sertakan bisnis berikut karena sudah ada di hasil sebelumnya: Toko Abadi, Kafe Senja.\nCarilah nama bisnis LAIN yang belum disebutkan."
        ));
    }

    #[test]
    fn exclusion_clause_is_capped() {
        let names: Vec<String> = (0..60).map(|i| format!("Toko {:02}", i)).collect();

        let clause = exclusion_clause(&names);

        assert!(clause.contains("Toko 39."));
        assert!(!clause.contains("Toko 40"));
    }
}
