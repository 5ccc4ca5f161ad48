//! Narrative report generation.
//!
//! Talks to the service that turns a score card into prose, and holds
//! the per-session fetch guard plus the fixed fallback message shown
//! when generation fails.

pub mod client;
pub mod session;

pub use client::{NarrativeClient, NarrativeError, NarrativePayload, REPORT_ENDPOINT};
pub use session::{NarrativeSession, NarrativeState, FALLBACK_MESSAGE};
