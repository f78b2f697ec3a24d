/// Country prefix that replaces a local leading `0`.
pub const COUNTRY_PREFIX: &str = "62";

/// Turn a contact cell into a gateway target: digits only, local `0`
/// rewritten to the country prefix. Cells without any digit are kept as
/// written so the user can see and fix them.
pub fn normalize_phone(contact: &str) -> String {
    let digits: String = contact.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return contact.trim().to_string();
    }

    match digits.strip_prefix('0') {
        Some(rest) => format!("{}{}", COUNTRY_PREFIX, rest),
        None => digits,
    }
}
