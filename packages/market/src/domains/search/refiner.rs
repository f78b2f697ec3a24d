//! Builds "load more" follow-up requests.
//!
//! The first cell of every table row already shown is treated as a business
//! name and sent back to the model as an exclusion list, so the next batch
//! surfaces different businesses.

use indexmap::IndexSet;

use super::models::SearchRequest;

/// Upper bound on names sent back to the model.
pub const MAX_EXCLUDED_NAMES: usize = 40;

/// Names already present in the rendered markdown, first-seen order,
/// deduplicated and capped at [`MAX_EXCLUDED_NAMES`].
pub fn extract_seen_names(markdown: &str) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();

    for line in markdown.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split('|').collect();
        if parts.len() <= 2 {
            continue;
        }

        let candidate = parts[1].trim();
        if !is_name_candidate(candidate) {
            continue;
        }

        let clean: String = candidate
            .chars()
            .filter(|c| !matches!(c, '*' | '_' | '[' | ']'))
            .collect();
        let clean = clean.trim();
        if !clean.is_empty() {
            names.insert(clean.to_string());
        }
    }

    names.into_iter().take(MAX_EXCLUDED_NAMES).collect()
}

// Filters header cells ("Nama Bisnis", "Nama Supplier") and separators.
fn is_name_candidate(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.contains("---") {
        return false;
    }

    let lower = candidate.to_lowercase();
    if lower.contains("nama") || lower.contains("bisnis") {
        return false;
    }

    candidate.chars().count() > 1
}

/// The previous request, excluding everything already shown and widening the
/// search radius.
pub fn follow_up_request(last: &SearchRequest, rendered_markdown: &str) -> SearchRequest {
    SearchRequest {
        exclude_names: extract_seen_names(rendered_markdown),
        expand_radius: true,
        ..last.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::search::models::{SearchMode, MORE_RESULTS_HEADING};

    #[test]
    fn duplicates_and_header_collapse_to_one_name() {
        let markdown = "\
| Nama Bisnis | Kontak |
|---|---|
| Toko Abadi | 0812 |
| Toko Abadi | 0813 |";

        assert_eq!(extract_seen_names(markdown), vec!["Toko Abadi".to_string()]);
    }

    #[test]
    fn strips_markdown_emphasis_and_brackets() {
        let markdown = "| **Kafe Senja** | x |\n| [Hotel_Asri] | y |";

        assert_eq!(
            extract_seen_names(markdown),
            vec!["Kafe Senja".to_string(), "HotelAsri".to_string()]
        );
    }

    #[test]
    fn rejects_short_and_separator_cells() {
        let markdown = "| A | x |\n| :---: | y |\n|  | z |\n| only-one-part";

        assert!(extract_seen_names(markdown).is_empty());
    }

    #[test]
    fn header_words_are_matched_case_insensitively() {
        let markdown = "| NAMA SUPPLIER | x |\n| Pusat BISNIS Kopi | y |\n| CV Maju | z |";

        assert_eq!(extract_seen_names(markdown), vec!["CV Maju".to_string()]);
    }

    #[test]
    fn list_is_capped_in_first_seen_order() {
        let markdown: String = (0..55)
            .map(|i| format!("| Toko {:02} | 08{} |\n", i, i))
            .collect();

        let names = extract_seen_names(&markdown);

        assert_eq!(names.len(), MAX_EXCLUDED_NAMES);
        assert_eq!(names.first().map(String::as_str), Some("Toko 00"));
        assert_eq!(names.last().map(String::as_str), Some("Toko 39"));
    }

    #[test]
    fn follow_up_keeps_request_and_widens_radius() {
        let last = SearchRequest::new(SearchMode::Suppliers, "Gula Aren", "Garut");
        let markdown = format!(
            "| Nama Supplier | Kontak |\n|---|---|\n| CV Manis | 0812 |{}| Nama Supplier | Kontak |\n|---|---|\n| UD Legi | 0813 |",
            MORE_RESULTS_HEADING
        );

        let next = follow_up_request(&last, &markdown);

        assert_eq!(next.mode, SearchMode::Suppliers);
        assert_eq!(next.product, "Gula Aren");
        assert_eq!(next.location, "Garut");
        assert!(next.expand_radius);
        assert_eq!(next.exclude_names, vec!["CV Manis", "UD Legi"]);
    }
}
