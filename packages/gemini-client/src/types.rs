//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// generateContent request
// =============================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,

    /// System instruction (persona and task framing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Built-in tools the model may consult
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,

    /// Tool configuration (e.g. retrieval centering)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,

    /// Sampling parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Create a request with a single user turn.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            ..Default::default()
        }
    }

    /// Set the system instruction.
    pub fn system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::text(text));
        self
    }

    /// Add a tool entry.
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Center retrieval tools on a coordinate.
    pub fn retrieval_center(mut self, latitude: f64, longitude: f64) -> Self {
        self.tool_config = Some(ToolConfig {
            retrieval_config: Some(RetrievalConfig {
                lat_lng: Some(LatLng {
                    latitude,
                    longitude,
                }),
            }),
        });
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .temperature = Some(temperature);
        self
    }
}

/// A conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model" (absent for system instructions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Create a role-less text block (used for system instructions).
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

/// A content part. Only text parts are produced by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Built-in retrieval tools. Several may be enabled in one entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<EmptyObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<EmptyObject>,
}

impl Tool {
    /// Google Search grounding.
    pub fn google_search() -> Self {
        Self {
            google_search: Some(EmptyObject {}),
            ..Default::default()
        }
    }

    /// Google Maps grounding.
    pub fn google_maps() -> Self {
        Self {
            google_maps: Some(EmptyObject {}),
            ..Default::default()
        }
    }

    /// Merge another tool entry's enabled tools into this one.
    pub fn with(mut self, other: Tool) -> Self {
        if other.google_search.is_some() {
            self.google_search = other.google_search;
        }
        if other.google_maps.is_some() {
            self.google_maps = other.google_maps;
        }
        self
    }
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_config: Option<RetrievalConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lng: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Sampling parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

// =============================================================================
// generateContent response
// =============================================================================

/// Response body of `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any text was produced.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Grounding chunks of the first candidate (empty if absent).
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,

    #[serde(default)]
    pub finish_reason: Option<String>,

    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub web_search_queries: Vec<String>,

    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// A citation: either a web page or a map place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebChunk>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsChunk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_answer_sources: Option<PlaceAnswerSources>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAnswerSources {
    #[serde(default)]
    pub review_snippets: Vec<ReviewSnippet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_camel_case() {
        let request = GenerateContentRequest::new("find suppliers")
            .system_instruction("you are a researcher")
            .tool(Tool::google_search().with(Tool::google_maps()))
            .retrieval_center(-6.9, 107.6)
            .temperature(0.7);

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "find suppliers");
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "you are a researcher"
        );
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["tools"], json!([{ "googleSearch": {}, "googleMaps": {} }]));
        assert_eq!(
            value["toolConfig"]["retrievalConfig"]["latLng"]["latitude"],
            -6.9
        );
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn request_omits_unset_sections() {
        let value = serde_json::to_value(GenerateContentRequest::new("hi")).unwrap();

        assert!(value.get("tools").is_none());
        assert!(value.get("toolConfig").is_none());
        assert!(value.get("generationConfig").is_none());
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn response_text_joins_parts_and_exposes_grounding() {
        let raw = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "| a |" }, { "text": " b" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com", "title": "Example" } },
                        { "maps": {
                            "uri": "https://maps.google.com/?cid=1",
                            "title": "Toko Abadi",
                            "placeId": "places/abc",
                            "placeAnswerSources": { "reviewSnippets": [{ "content": "Ramah" }] }
                        } }
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(response.text().as_deref(), Some("| a | b"));
        let chunks = response.grounding_chunks();
        assert_eq!(chunks.len(), 2);
        let maps = chunks[1].maps.as_ref().unwrap();
        assert_eq!(maps.place_id.as_deref(), Some("places/abc"));
        assert_eq!(
            maps.place_answer_sources.as_ref().unwrap().review_snippets[0]
                .content
                .as_deref(),
            Some("Ramah")
        );
    }

    #[test]
    fn empty_response_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();

        assert!(response.text().is_none());
        assert!(response.grounding_chunks().is_empty());
    }
}
