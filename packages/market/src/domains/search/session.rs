use tracing::{info, warn};

use super::errors::SearchError;
use super::machines::{LoadingState, SearchCommand, SearchEvent, SearchMachine};
use super::models::{SearchMode, SearchRequest, SearchResponse};
use super::orchestrator::SearchOrchestrator;
use crate::domains::markdown::{render, LeadRef, RenderedDocument};
use crate::domains::messaging::Lead;

/// One user's search screen: current results, their state and the selected
/// lead. Runs the commands the [`SearchMachine`] decides on.
///
/// Methods take `&mut self`, so a session never has two searches in flight.
pub struct SearchSession {
    orchestrator: SearchOrchestrator,
    machine: SearchMachine,
}

impl SearchSession {
    pub fn new(orchestrator: SearchOrchestrator) -> Self {
        Self {
            orchestrator,
            machine: SearchMachine::new(),
        }
    }

    /// Start a fresh search. Clears results and selection first.
    pub async fn search(&mut self, request: SearchRequest) -> Result<&SearchResponse, SearchError> {
        request.validate()?;

        let event = SearchEvent::SearchRequested { request };
        self.machine.check(&event)?;
        if let Some(command) = self.machine.decide(event) {
            self.run(command).await;
        }
        self.outcome()
    }

    /// Fetch more results around the last search, excluding names already
    /// shown, and append them.
    pub async fn load_more(&mut self) -> Result<&SearchResponse, SearchError> {
        let event = SearchEvent::LoadMoreRequested;
        self.machine.check(&event)?;
        if let Some(command) = self.machine.decide(event) {
            self.run(command).await;
        }
        self.outcome()
    }

    async fn run(&mut self, command: SearchCommand) {
        let request = match &command {
            SearchCommand::RunSearch { request } | SearchCommand::RunFollowUp { request } => {
                request
            }
        };

        if let SearchCommand::RunFollowUp { request } = &command {
            info!(excluded = request.exclude_names.len(), "Loading more results");
        }

        let event = match self.orchestrator.find_leads(request).await {
            Ok(response) => SearchEvent::ResultsReturned { response },
            Err(error) => SearchEvent::SearchFailed { error },
        };
        self.machine.decide(event);
    }

    fn outcome(&self) -> Result<&SearchResponse, SearchError> {
        if let Some(error) = self.machine.error() {
            warn!(error = %error, "Search did not produce results");
            return Err(error.clone());
        }
        self.machine.data().ok_or(SearchError::NothingToExtend)
    }

    pub fn reset(&mut self) {
        self.machine.decide(SearchEvent::ResetRequested);
    }

    pub fn state(&self) -> LoadingState {
        self.machine.state()
    }

    pub fn mode(&self) -> SearchMode {
        self.machine.mode()
    }

    /// Current merged results, kept visible through follow-up failures.
    pub fn data(&self) -> Option<&SearchResponse> {
        self.machine.data()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.machine.error()
    }

    /// Render the current results for display.
    pub fn rendered(&self) -> Option<RenderedDocument> {
        self.data().map(|data| render(&data.markdown_text))
    }

    /// Select the lead behind a rendered row. Returns false for handles that
    /// no longer match a row.
    pub fn select_lead(&mut self, row: LeadRef) -> bool {
        let Some(lead) = self.rendered().and_then(|doc| doc.lead(row).cloned()) else {
            return false;
        };
        self.machine.select_lead(lead);
        true
    }

    /// Select a lead that did not come from the results (test messages).
    pub fn select_custom_lead(&mut self, lead: Lead) {
        self.machine.select_lead(lead);
    }

    pub fn clear_selection(&mut self) {
        self.machine.clear_selection();
    }

    pub fn selected(&self) -> Option<&Lead> {
        self.machine.selected()
    }
}
