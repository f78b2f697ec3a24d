use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::SearchError;

/// What the user is looking for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Buyers for something the user sells.
    #[default]
    Leads,
    /// First-hand sources for something the user wants to stock.
    Suppliers,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Leads => "leads",
            SearchMode::Suppliers => "suppliers",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leads" | "pembeli" => Ok(SearchMode::Leads),
            "suppliers" | "supplier" => Ok(SearchMode::Suppliers),
            other => Err(format!("unknown search mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One search submission. Follow-ups are clones with overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub product: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub exclude_names: Vec<String>,
    #[serde(default)]
    pub expand_radius: bool,
}

impl SearchRequest {
    pub fn new(mode: SearchMode, product: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            mode,
            product: product.into(),
            location: location.into(),
            coordinates: None,
            exclude_names: Vec::new(),
            expand_radius: false,
        }
    }

    /// Search around the device's position instead of a named area.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Reject submissions the form would never send.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.product.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "Produk yang dicari wajib diisi.".into(),
            ));
        }
        if self.location.trim().is_empty() && self.coordinates.is_none() {
            return Err(SearchError::InvalidInput(
                "Lokasi wajib diisi atau gunakan koordinat GPS.".into(),
            ));
        }
        Ok(())
    }
}

/// Provenance reference returned alongside model output. Passed through,
/// never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapsSource {
    pub uri: Option<String>,
    pub title: Option<String>,
    pub place_id: Option<String>,
    #[serde(default)]
    pub review_snippets: Vec<String>,
}

/// Separator placed between the first result and each "load more" batch.
pub const MORE_RESULTS_HEADING: &str = "\n\n---\n\n### 🌍 Data Tambahan (Area Sekitar):\n";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub markdown_text: String,
    pub grounding_sources: Vec<GroundingSource>,
}

impl SearchResponse {
    pub fn new(markdown_text: impl Into<String>) -> Self {
        Self {
            markdown_text: markdown_text.into(),
            grounding_sources: Vec::new(),
        }
    }

    /// Append a follow-up batch. Sources are concatenated as-is, without
    /// deduplication.
    pub fn merged_with(&self, more: &SearchResponse) -> SearchResponse {
        let mut grounding_sources = self.grounding_sources.clone();
        grounding_sources.extend(more.grounding_sources.iter().cloned());

        SearchResponse {
            markdown_text: format!(
                "{}{}{}",
                self.markdown_text, MORE_RESULTS_HEADING, more.markdown_text
            ),
            grounding_sources,
        }
    }
}
