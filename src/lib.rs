//! Digital maturity survey scoring with AI-generated narrative reports.
//!
//! Takes a completed survey (a flat JSON map of question ids to 1-5
//! Likert scores), aggregates it into category, pillar and overall
//! maturity scores, and renders the results as Markdown or JSON with an
//! optional analysis fetched from the narrative service.

pub mod cli;
pub mod config;
pub mod models;
pub mod narrative;
pub mod results;
pub mod scoring;
pub mod taxonomy;

// Re-export key types for convenience
pub use models::{AnswerMap, AnswerValue, MaturityLevel, PillarId, ScoreCard};
pub use narrative::{NarrativeClient, NarrativeSession, NarrativeState};
pub use results::SurveyResults;
pub use taxonomy::Taxonomy;
