use crate::domain::command::Command;
use crate::domain::parameters::{GatewayResponse, Parameters, SIGNATURE_FIELD, ValidatedParameters};
use crate::domain::ports::GatewayClient;
use crate::domain::signature::SignatureEngine;
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Recorded {
    requests: Vec<(Command, Parameters)>,
    authorizations: VecDeque<Parameters>,
    statuses: VecDeque<Parameters>,
}

/// An in-memory gateway that answers with scripted responses and records
/// every request it receives.
///
/// `Clone` shares the underlying state, so a test can keep a handle while
/// the method owns the boxed copy. When a response phrase is set, status
/// responses are signed with it the way the gateway signs them.
#[derive(Default, Clone)]
pub struct RecordingGateway {
    // Never locked across an `.await`.
    state: Arc<Mutex<Recorded>>,
    response_signer: Option<(SignatureEngine, String)>,
}

impl RecordingGateway {
    /// Creates a gateway with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs status responses with `phrase` before returning them.
    pub fn signing_with(mut self, engine: SignatureEngine, phrase: impl Into<String>) -> Self {
        self.response_signer = Some((engine, phrase.into()));
        self
    }

    /// Queues the next authorization response.
    pub fn with_authorization(self, response: Parameters) -> Self {
        self.lock().authorizations.push_back(response);
        self
    }

    /// Queues the next check-status response.
    pub fn with_status(self, response: Parameters) -> Self {
        self.lock().statuses.push_back(response);
        self
    }

    /// Number of requests that reached the gateway.
    pub fn dispatch_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<(Command, Parameters)> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GatewayClient for RecordingGateway {
    async fn authorize_transaction(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push((Command::Authorization, params.into_inner()));
        let response = state
            .authorizations
            .pop_front()
            .ok_or_else(|| {
                TransportError::Unavailable("no scripted authorization response".to_string())
            })?;
        Ok(GatewayResponse::new(response))
    }

    async fn check_status(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push((Command::CheckStatus, params.into_inner()));
        let mut response = state
            .statuses
            .pop_front()
            .ok_or_else(|| {
                TransportError::Unavailable("no scripted check status response".to_string())
            })?;
        if let Some((engine, phrase)) = &self.response_signer
            && response.signature().is_none()
        {
            let signature = engine.sign(&response, phrase);
            response.insert(SIGNATURE_FIELD, signature);
        }
        Ok(GatewayResponse::new(response))
    }
}
