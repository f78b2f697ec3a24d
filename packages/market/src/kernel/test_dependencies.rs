// TestDependencies - mock implementations for testing
//
// Provides mock search models and message gateways that record their calls
// and answer from a queue of canned replies.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{
    AppDeps, BaseMessageGateway, BaseSearchModel, GatewayReply, ModelReply, ModelRequest,
    OutgoingMessage,
};
use crate::domains::search::GroundingSource;

// =============================================================================
// Mock Search Model
// =============================================================================

enum ModelOutcome {
    Reply(ModelReply),
    Fail(String),
}

#[derive(Clone)]
pub struct MockSearchModel {
    outcomes: Arc<Mutex<Vec<ModelOutcome>>>,
    calls: Arc<Mutex<Vec<ModelRequest>>>,
}

impl MockSearchModel {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply with the given text
    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(ModelReply {
            text: Some(text.to_string()),
            grounding_sources: Vec::new(),
        })
    }

    /// Queue a reply with text and grounding sources
    pub fn with_grounded_text(self, text: &str, sources: Vec<GroundingSource>) -> Self {
        self.with_reply(ModelReply {
            text: Some(text.to_string()),
            grounding_sources: sources,
        })
    }

    /// Queue a reply where the model produced no text
    pub fn with_empty_reply(self) -> Self {
        self.with_reply(ModelReply::default())
    }

    pub fn with_reply(self, reply: ModelReply) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(ModelOutcome::Reply(reply));
        self
    }

    /// Queue a failure with the given message
    pub fn with_failure(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(ModelOutcome::Fail(message.to_string()));
        self
    }

    /// Get all requests the model received
    pub fn calls(&self) -> Vec<ModelRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockSearchModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSearchModel for MockSearchModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelReply> {
        self.calls.lock().unwrap().push(request.clone());

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Ok(ModelReply::default());
        }

        match outcomes.remove(0) {
            ModelOutcome::Reply(reply) => Ok(reply),
            ModelOutcome::Fail(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

// =============================================================================
// Mock Message Gateway
// =============================================================================

/// Arguments captured from a send call
#[derive(Debug, Clone)]
pub struct SendCallArgs {
    pub token: String,
    pub message: OutgoingMessage,
}

enum GatewayOutcome {
    Reply(GatewayReply),
    Fail(String),
}

#[derive(Clone)]
pub struct MockMessageGateway {
    outcomes: Arc<Mutex<Vec<GatewayOutcome>>>,
    calls: Arc<Mutex<Vec<SendCallArgs>>>,
}

impl MockMessageGateway {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a refusal with the gateway's reason
    pub fn with_rejection(self, reason: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(GatewayOutcome::Reply(GatewayReply {
                accepted: false,
                reason: Some(reason.to_string()),
                detail: None,
            }));
        self
    }

    /// Queue a transport failure
    pub fn with_network_failure(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(GatewayOutcome::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<SendCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockMessageGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessageGateway for MockMessageGateway {
    async fn send(&self, token: &str, message: OutgoingMessage) -> Result<GatewayReply> {
        self.calls.lock().unwrap().push(SendCallArgs {
            token: token.to_string(),
            message,
        });

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Ok(GatewayReply {
                accepted: true,
                reason: None,
                detail: Some("success! message in queue".to_string()),
            });
        }

        match outcomes.remove(0) {
            GatewayOutcome::Reply(reply) => Ok(reply),
            GatewayOutcome::Fail(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks bundled with the [`AppDeps`] that wraps them. Tests keep the
/// concrete mocks to inspect recorded calls.
pub struct TestDependencies {
    pub search_model: MockSearchModel,
    pub gateway: MockMessageGateway,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            search_model: MockSearchModel::new(),
            gateway: MockMessageGateway::new(),
        }
    }

    pub fn mock_search_model(mut self, model: MockSearchModel) -> Self {
        self.search_model = model;
        self
    }

    pub fn mock_gateway(mut self, gateway: MockMessageGateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn deps(&self) -> AppDeps {
        AppDeps::new(
            Arc::new(self.search_model.clone()),
            Arc::new(self.gateway.clone()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
