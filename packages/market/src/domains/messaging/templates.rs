use super::models::Lead;
use crate::domains::search::SearchMode;

/// Sales pitch sent to potential buyers.
pub const LEADS_DEFAULT_TEMPLATE: &str = "Halo Kak {name} 👋,\n\n\
Salam kenal ya. Saya lihat bisnis Kakak di {location} menarik banget.\n\n\
Kebetulan saya ada info/produk yang cocok buat Kakak karena {reason}.\n\n\
Boleh saya share detailnya sebentar Kak? Makasih sebelumnya 🙏\n\n\
~ {sender}";

/// Reseller inquiry sent to suppliers.
pub const SUPPLIER_DEFAULT_TEMPLATE: &str = "Halo Kak Admin {name} 👋,\n\n\
Saya dapat info tokonya di {location}.\n\n\
Saya tertarik banget mau ikut jualin produknya (Dropship/Reseller). Boleh minta info pricelist grosir atau katalognya Kak?\n\n\
Rencananya mau saya pasarkan kembali, siap order rutin kalau cocok.\n\n\
Makasih banyak Kak 🙏\n\n\
~ {sender}";

/// Used instead of reasons too long for a chat message.
pub const GENERIC_REASON: &str = "potensi pasar di area tersebut";

const MAX_REASON_CHARS: usize = 50;

pub fn default_template(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Leads => LEADS_DEFAULT_TEMPLATE,
        SearchMode::Suppliers => SUPPLIER_DEFAULT_TEMPLATE,
    }
}

/// Fill `{name}`, `{location}`, `{reason}` and `{sender}`. With no sender the
/// signature (`~ {sender}`) is dropped entirely.
pub fn expand_template(template: &str, lead: &Lead, sender_name: &str) -> String {
    let reason = if lead.reason.chars().count() > MAX_REASON_CHARS {
        GENERIC_REASON
    } else {
        lead.reason.as_str()
    };

    let body = template
        .replace("{name}", &lead.name)
        .replace("{location}", &lead.location)
        .replace("{reason}", reason);

    if sender_name.is_empty() {
        body.replace("~ {sender}", "").replace("{sender}", "")
    } else {
        body.replace("{sender}", sender_name)
    }
}

fn reads_as_leads(text: &str) -> bool {
    text.contains("penawaran menarik") || text.contains("bisnis kakak") || text.contains("bisnis Kakak")
}

fn reads_as_supplier(text: &str) -> bool {
    text.contains("Dropship") || text.contains("Reseller") || text.contains("kulakan")
}

// Signature format of early template versions.
fn is_old_style(text: &str) -> bool {
    text.contains("Salam,\n{sender}")
}

/// Whether a saved template should give way to the mode's default.
pub fn needs_replacement(template: Option<&str>, mode: SearchMode) -> bool {
    let Some(text) = template.filter(|text| !text.trim().is_empty()) else {
        return true;
    };

    match mode {
        SearchMode::Leads => reads_as_supplier(text) || is_old_style(text),
        SearchMode::Suppliers => {
            reads_as_leads(text) || !text.contains("Dropship") || is_old_style(text)
        }
    }
}
