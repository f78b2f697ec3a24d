use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::domains::messaging::SettingsStore;
use crate::kernel::{DEFAULT_TEMPERATURE, GEMINI_2_5_FLASH};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_FONNTE_BASE_URL: &str = "https://api.fonnte.com";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Only needed for searching; messaging works without it.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub search_temperature: f32,
    pub fonnte_base_url: String,
    pub settings_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_2_5_FLASH.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            search_temperature: match env::var("SEARCH_TEMPERATURE") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .context("SEARCH_TEMPERATURE must be a number")?,
                Err(_) => DEFAULT_TEMPERATURE,
            },
            fonnte_base_url: env::var("FONNTE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_FONNTE_BASE_URL.to_string()),
            settings_path: env::var("AUFMARKET_SETTINGS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| SettingsStore::default_path()),
        })
    }

    /// The Gemini key, or an error explaining how to provide one.
    pub fn require_gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .context("GEMINI_API_KEY (or API_KEY) must be set to search")
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.settings_path.clone())
    }
}
