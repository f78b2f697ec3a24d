use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::errors::SettingsError;
use super::templates::{default_template, needs_replacement};
use crate::domains::search::SearchMode;

/// Gateway credentials and message defaults the user saves between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingSettings {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl MessagingSettings {
    /// A token made only of whitespace counts as missing. Pasted tokens
    /// often carry a trailing newline, and the composer sends the trimmed value.
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// The saved template, unless it is blank.
    pub fn saved_template(&self) -> Option<&str> {
        self.template
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Swap in the mode's default template when the saved one belongs to the
    /// other mode or is missing. Returns true if the template changed.
    pub fn reconcile_template(&mut self, mode: SearchMode) -> bool {
        if !needs_replacement(self.saved_template(), mode) {
            return false;
        }
        self.template = Some(default_template(mode).to_string());
        true
    }
}

/// JSON file holding [`MessagingSettings`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/aufmarket/settings.json`, or a file in the working
    /// directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("aufmarket"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("settings.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved settings, or defaults if nothing was saved yet.
    pub fn load(&self) -> Result<MessagingSettings, SettingsError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No saved settings, using defaults");
            return Ok(MessagingSettings::default());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, settings: &MessagingSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::messaging::templates::{
        LEADS_DEFAULT_TEMPLATE, SUPPLIER_DEFAULT_TEMPLATE,
    };

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("none.json"));

        assert_eq!(store.load().unwrap(), MessagingSettings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/aufmarket/settings.json"));
        let settings = MessagingSettings {
            token: "abc123".into(),
            sender_name: "Rina".into(),
            template: Some("Halo {name}".into()),
        };

        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            SettingsStore::new(path).load(),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn switching_modes_swaps_default_templates() {
        let mut settings = MessagingSettings::default();

        assert!(settings.reconcile_template(SearchMode::Leads));
        assert_eq!(settings.template.as_deref(), Some(LEADS_DEFAULT_TEMPLATE));
        assert!(!settings.reconcile_template(SearchMode::Leads));

        assert!(settings.reconcile_template(SearchMode::Suppliers));
        assert_eq!(settings.template.as_deref(), Some(SUPPLIER_DEFAULT_TEMPLATE));

        assert!(settings.reconcile_template(SearchMode::Leads));
        assert_eq!(settings.template.as_deref(), Some(LEADS_DEFAULT_TEMPLATE));
    }

    #[test]
    fn custom_leads_template_survives() {
        let mut settings = MessagingSettings {
            template: Some("Halo {name}, ada promo.".into()),
            ..Default::default()
        };

        assert!(!settings.reconcile_template(SearchMode::Leads));
        assert_eq!(settings.template.as_deref(), Some("Halo {name}, ada promo."));
    }

    #[test]
    fn blank_template_is_replaced() {
        let mut settings = MessagingSettings {
            template: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(settings.saved_template(), None);
        assert!(settings.reconcile_template(SearchMode::Leads));
        assert_eq!(settings.template.as_deref(), Some(LEADS_DEFAULT_TEMPLATE));
    }

    #[test]
    fn whitespace_token_counts_as_missing() {
        let blank = MessagingSettings {
            token: " \n".into(),
            ..Default::default()
        };
        let padded = MessagingSettings {
            token: " abc123\n".into(),
            ..Default::default()
        };

        assert!(!blank.has_token());
        assert!(padded.has_token());
    }
}
