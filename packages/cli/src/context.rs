//! Application context with shared state and utilities

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use market_core::domains::messaging::{MessageComposer, MessagingSettings, SettingsStore};
use market_core::domains::search::{SearchMode, SearchOrchestrator, SearchSession};
use market_core::kernel::{AppDeps, BaseMessageGateway, FonnteAdapter};
use market_core::Config;
use std::sync::Arc;

/// Application context passed to all commands
pub struct AppContext {
    pub quiet: bool,
    pub config: Config,
    pub store: SettingsStore,
}

impl AppContext {
    pub fn new(quiet: bool) -> Result<Self> {
        let config = Config::from_env().context("Failed to load configuration")?;
        let store = config.settings_store();
        Ok(Self {
            quiet,
            config,
            store,
        })
    }

    /// A search session backed by the configured model.
    pub fn search_session(&self) -> Result<SearchSession> {
        let deps = AppDeps::from_config(&self.config)?;
        let orchestrator = SearchOrchestrator::new(deps.search_model)
            .with_model_name(self.config.gemini_model.as_str())
            .with_temperature(self.config.search_temperature);
        Ok(SearchSession::new(orchestrator))
    }

    /// Saved messaging settings, with the template matched to `mode`. A
    /// swapped template is written back right away.
    pub fn messaging_settings(&self, mode: SearchMode) -> Result<MessagingSettings> {
        let mut settings = self.store.load()?;
        if settings.reconcile_template(mode) {
            self.store.save(&settings)?;
        }
        Ok(settings)
    }

    /// A composer that only needs the gateway; searching is not required.
    pub fn composer(&self, settings: MessagingSettings) -> MessageComposer {
        let gateway: Arc<dyn BaseMessageGateway> =
            Arc::new(FonnteAdapter::new(self.config.fonnte_base_url.as_str()));
        MessageComposer::new(gateway, settings)
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.quiet {
            return Ok(default);
        }
        Ok(Confirm::with_theme(&self.theme())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn print_header(&self, msg: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(msg).bold());
        }
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }

    pub fn print_error(&self, msg: &str) {
        eprintln!("{}", style(msg).red());
    }

    pub fn print_info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", style(msg).cyan());
        }
    }
}
