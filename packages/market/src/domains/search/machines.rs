//! Search state machine. Pure: decides what to run next, never runs it.

use super::errors::SearchError;
use super::models::{SearchMode, SearchRequest, SearchResponse};
use super::refiner::follow_up_request;
use crate::domains::messaging::Lead;

/// Follow-up text shorter than this is treated as an apology, not data.
pub const MIN_FOLLOW_UP_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    SearchRequested { request: SearchRequest },
    LoadMoreRequested,
    ResultsReturned { response: SearchResponse },
    SearchFailed { error: SearchError },
    ResetRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    /// Run the request and replace whatever is shown.
    RunSearch { request: SearchRequest },
    /// Run the request and append to what is shown.
    RunFollowUp { request: SearchRequest },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Initial,
    FollowUp,
}

/// Why a requested event produced no command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    Busy,
    NothingToExtend,
}

impl From<Refusal> for SearchError {
    fn from(refusal: Refusal) -> Self {
        match refusal {
            Refusal::Busy => SearchError::Busy,
            Refusal::NothingToExtend => SearchError::NothingToExtend,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchMachine {
    state: LoadingState,
    mode: SearchMode,
    data: Option<SearchResponse>,
    last_request: Option<SearchRequest>,
    error: Option<SearchError>,
    selected: Option<Lead>,
    pending: Option<Pending>,
}

impl SearchMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn data(&self) -> Option<&SearchResponse> {
        self.data.as_ref()
    }

    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    pub fn selected(&self) -> Option<&Lead> {
        self.selected.as_ref()
    }

    /// Select a lead, replacing any earlier selection.
    pub fn select_lead(&mut self, lead: Lead) {
        self.selected = Some(lead);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Check whether an event would be accepted, without changing state.
    pub fn check(&self, event: &SearchEvent) -> Result<(), Refusal> {
        match event {
            SearchEvent::SearchRequested { .. } | SearchEvent::LoadMoreRequested
                if self.state == LoadingState::Loading =>
            {
                Err(Refusal::Busy)
            }
            SearchEvent::LoadMoreRequested
                if self.last_request.is_none() || self.data.is_none() =>
            {
                Err(Refusal::NothingToExtend)
            }
            _ => Ok(()),
        }
    }

    pub fn decide(&mut self, event: SearchEvent) -> Option<SearchCommand> {
        if self.check(&event).is_err() {
            return None;
        }

        match event {
            SearchEvent::SearchRequested { request } => {
                self.state = LoadingState::Loading;
                self.mode = request.mode;
                self.error = None;
                self.data = None;
                self.selected = None;
                self.last_request = Some(request.clone());
                self.pending = Some(Pending::Initial);
                Some(SearchCommand::RunSearch { request })
            }
            SearchEvent::LoadMoreRequested => {
                let last = self.last_request.as_ref()?;
                let shown = self.data.as_ref()?;
                let request = follow_up_request(last, &shown.markdown_text);
                self.state = LoadingState::Loading;
                self.error = None;
                self.pending = Some(Pending::FollowUp);
                Some(SearchCommand::RunFollowUp { request })
            }
            SearchEvent::ResultsReturned { response } => {
                match self.pending.take() {
                    Some(Pending::Initial) => {
                        self.data = Some(response);
                        self.state = LoadingState::Success;
                    }
                    Some(Pending::FollowUp) => self.accept_follow_up(response),
                    // Stale result after a reset
                    None => {}
                }
                None
            }
            SearchEvent::SearchFailed { error } => {
                if self.pending.take().is_some() {
                    self.state = LoadingState::Error;
                    self.error = Some(error);
                }
                None
            }
            SearchEvent::ResetRequested => {
                self.state = LoadingState::Idle;
                self.data = None;
                self.error = None;
                self.selected = None;
                self.pending = None;
                None
            }
        }
    }

    fn accept_follow_up(&mut self, response: SearchResponse) {
        if response.markdown_text.chars().count() < MIN_FOLLOW_UP_CHARS {
            self.state = LoadingState::Error;
            self.error = Some(SearchError::NoAdditionalData);
            return;
        }

        self.data = Some(match self.data.take() {
            Some(shown) => shown.merged_with(&response),
            None => response,
        });
        self.state = LoadingState::Success;
    }
}
