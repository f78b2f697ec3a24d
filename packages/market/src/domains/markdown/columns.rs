use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::messaging::Lead;

// Header vocabulary the search prompts ask the model to use.
lazy_static! {
    static ref NAME: Regex = Regex::new(r"(?i)nama|bisnis|supplier").unwrap();
    static ref CONTACT: Regex = Regex::new(r"(?i)kontak|telp|wa").unwrap();
    static ref LOCATION: Regex = Regex::new(r"(?i)lokasi|alamat").unwrap();
    static ref REASON: Regex = Regex::new(r"(?i)alasan|prospek|kelebihan|catatan").unwrap();
}

pub const NAME_PLACEHOLDER: &str = "Target";
pub const FIELD_PLACEHOLDER: &str = "-";

/// Column index per semantic role, resolved from a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub name: Option<usize>,
    pub contact: Option<usize>,
    pub location: Option<usize>,
    pub reason: Option<usize>,
}

impl ColumnRoles {
    /// Each role takes the first header cell matching its pattern.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Self {
        let first = |pattern: &Regex| header.iter().position(|h| pattern.is_match(h.as_ref()));

        Self {
            name: first(&NAME),
            contact: first(&CONTACT),
            location: first(&LOCATION),
            reason: first(&REASON),
        }
    }

    /// Build a lead from one data row, falling back to placeholders for
    /// unresolved roles, short rows and blank cells.
    pub fn lead_from_row<S: AsRef<str>>(&self, row: &[S]) -> Lead {
        let field = |index: Option<usize>, placeholder: &str| {
            index
                .and_then(|i| row.get(i))
                .map(|cell| cell.as_ref().trim())
                .filter(|cell| !cell.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        };

        Lead {
            name: field(self.name, NAME_PLACEHOLDER),
            contact: field(self.contact, FIELD_PLACEHOLDER),
            location: field(self.location, FIELD_PLACEHOLDER),
            reason: field(self.reason, FIELD_PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_leads_header() {
        let roles = ColumnRoles::resolve(&[
            "Nama Bisnis",
            "Kontak (Telp/WA)",
            "Alamat Lengkap",
            "Alasan Prospek",
        ]);

        assert_eq!(
            roles,
            ColumnRoles {
                name: Some(0),
                contact: Some(1),
                location: Some(2),
                reason: Some(3),
            }
        );
    }

    #[test]
    fn resolves_suppliers_header() {
        let roles = ColumnRoles::resolve(&[
            "Nama Supplier",
            "Kontak (Telp/WA)",
            "Alamat Lengkap",
            "Kategori/Catatan",
        ]);

        assert_eq!(roles.name, Some(0));
        assert_eq!(roles.reason, Some(3));
    }

    #[test]
    fn matching_ignores_column_order_and_case() {
        let roles = ColumnRoles::resolve(&["ALASAN", "lokasi", "No. WA", "SUPPLIER"]);

        assert_eq!(
            roles,
            ColumnRoles {
                name: Some(3),
                contact: Some(2),
                location: Some(1),
                reason: Some(0),
            }
        );
    }

    #[test]
    fn first_matching_column_wins() {
        let roles = ColumnRoles::resolve(&["Nama", "Nama Bisnis", "Telp", "Kontak"]);

        assert_eq!(roles.name, Some(0));
        assert_eq!(roles.contact, Some(2));
    }

    #[test]
    fn unmatched_roles_fall_back_to_placeholders() {
        let roles = ColumnRoles::resolve(&["Nama Bisnis", "Rating"]);
        let lead = roles.lead_from_row(&["Toko Abadi", "4.5"]);

        assert_eq!(lead.name, "Toko Abadi");
        assert_eq!(lead.contact, "-");
        assert_eq!(lead.location, "-");
        assert_eq!(lead.reason, "-");
    }

    #[test]
    fn blank_or_missing_cells_fall_back_to_placeholders() {
        let roles = ColumnRoles::resolve(&["Nama Bisnis", "Kontak", "Alamat"]);
        let lead = roles.lead_from_row(&["  ", "0812"]);

        assert_eq!(lead.name, "Target");
        assert_eq!(lead.contact, "0812");
        assert_eq!(lead.location, "-");
    }
}
