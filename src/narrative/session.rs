//! Session state for the narrative fetch.
//!
//! The narrative is requested at most once per results session, however
//! many times the report is rendered. Failures are logged and collapsed
//! into a fixed fallback message; they never abort the report.

use crate::narrative::client::{NarrativeClient, NarrativeError, NarrativePayload};
use tracing::error;

/// Message shown in place of the narrative when generation fails.
pub const FALLBACK_MESSAGE: &str =
    "❌ Error al generar el análisis automático. Por favor, intenta de nuevo.";

/// Lifecycle of the narrative text within one session.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeState {
    /// No request made yet.
    Idle,
    /// Request in flight.
    Loading,
    /// The service produced a report.
    Ready(String),
    /// The request failed; carries the fallback text.
    Failed(String),
}

/// Fetch-once guard around the narrative request.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeSession {
    state: NarrativeState,
    requested: bool,
}

impl NarrativeSession {
    pub fn new() -> Self {
        Self {
            state: NarrativeState::Idle,
            requested: false,
        }
    }

    /// Current state of the fetch.
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// True once a request has been started, successful or not.
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Runs the narrative request exactly once.
    ///
    /// The first call performs the fetch; later calls return the settled
    /// state without touching the network again. A failed fetch settles
    /// on the fallback message and is not retried within the session.
    pub async fn ensure(
        &mut self,
        client: &NarrativeClient,
        payload: &NarrativePayload,
    ) -> &NarrativeState {
        if self.requested {
            return &self.state;
        }

        self.requested = true;
        self.state = NarrativeState::Loading;

        let result = client.generate(payload).await;
        self.apply(result);

        &self.state
    }

    fn apply(&mut self, result: Result<String, NarrativeError>) {
        match result {
            Ok(report) => {
                self.state = NarrativeState::Ready(report);
            }
            Err(err) => {
                error!("Narrative generation failed: {}", err);
                self.state = NarrativeState::Failed(FALLBACK_MESSAGE.to_string());
            }
        }
    }

    /// Text for the analysis section: report or fallback once settled,
    /// nothing while idle or loading.
    pub fn display_text(&self) -> Option<&str> {
        match &self.state {
            NarrativeState::Ready(text) | NarrativeState::Failed(text) => Some(text.as_str()),
            NarrativeState::Idle | NarrativeState::Loading => None,
        }
    }

    /// Clears the guard so the next `ensure` fetches again, as a brand
    /// new session would.
    pub fn reset(&mut self) {
        self.state = NarrativeState::Idle;
        self.requested = false;
    }
}

impl Default for NarrativeSession {
    fn default() -> Self {
        Self::new()
    }
}
