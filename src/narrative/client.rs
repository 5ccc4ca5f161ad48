//! HTTP client for the narrative service.
//!
//! One endpoint: POST the scored survey, get back prose. The request
//! body mirrors the score card keyed by display labels, so the service
//! sees the same names the respondent does.

use crate::models::ScoreCard;
use crate::scoring::round_two;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Path of the report-generation endpoint on the narrative service.
pub const REPORT_ENDPOINT: &str = "/api/survey/generate-report";

/// Failure modes of a narrative request.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The request never completed: connect, timeout or decode failure.
    #[error("narrative request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("narrative service returned {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// The service answered 2xx but the body carried no report text.
    #[error("narrative response had no report text")]
    MalformedResponse,
}

/// Request body for the narrative service.
///
/// Serialized as a single flat JSON object: one entry per pillar label
/// mapping category labels to their rounded values, then `Nombre` and
/// `Empresa` when known, then `TotalScore`. Key order follows the
/// taxonomy, which is why serialization is written out by hand instead
/// of derived through a map type.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativePayload {
    pillars: Vec<(String, Vec<(String, f64)>)>,
    nombre: Option<String>,
    empresa: Option<String>,
    total_score: f64,
}

impl NarrativePayload {
    /// Builds the payload from a score card and optional identity.
    pub fn new(card: &ScoreCard, nombre: Option<String>, empresa: Option<String>) -> Self {
        let pillars = card
            .pillars
            .iter()
            .map(|pillar| {
                let categories = pillar
                    .categories
                    .iter()
                    .map(|c| (c.label.clone(), c.value))
                    .collect();
                (pillar.label().to_string(), categories)
            })
            .collect();

        Self {
            pillars,
            nombre,
            empresa,
            total_score: round_two(card.overall),
        }
    }

    /// The overall score as sent on the wire.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }
}

struct CategoryValues<'a>(&'a [(String, f64)]);

impl Serialize for CategoryValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl Serialize for NarrativePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut len = self.pillars.len() + 1;
        if self.nombre.is_some() {
            len += 1;
        }
        if self.empresa.is_some() {
            len += 1;
        }

        let mut map = serializer.serialize_map(Some(len))?;
        for (label, categories) in &self.pillars {
            map.serialize_entry(label, &CategoryValues(categories))?;
        }
        if let Some(nombre) = &self.nombre {
            map.serialize_entry("Nombre", nombre)?;
        }
        if let Some(empresa) = &self.empresa {
            map.serialize_entry("Empresa", empresa)?;
        }
        map.serialize_entry("TotalScore", &self.total_score)?;
        map.end()
    }
}

/// Client for the narrative service.
#[derive(Debug, Clone)]
pub struct NarrativeClient {
    http: reqwest::Client,
    base_url: String,
}

impl NarrativeClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// Generation can take a while, so no timeout is applied unless the
    /// caller asks for one.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self, NarrativeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The service base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs the score payload and returns the generated report text.
    ///
    /// One attempt only. Callers decide what a failure means; this
    /// method just reports it.
    pub async fn generate(&self, payload: &NarrativePayload) -> Result<String, NarrativeError> {
        let url = format!("{}{}", self.base_url, REPORT_ENDPOINT);
        debug!("Requesting narrative report from {}", url);

        let response = self.http.post(&url).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status {
                status,
                detail: error_detail(&body),
            });
        }

        let body: Value = response.json().await?;
        body.get("report")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(NarrativeError::MalformedResponse)
    }
}

/// Pulls the service's `detail` field out of an error body, falling
/// back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no detail provided".to_string()
            } else {
                trimmed.to_string()
            }
        })
}
