//! Survey results assembly.
//!
//! `SurveyResults` is the composition root for one scored survey: it
//! owns the answers, the score card computed from them and the
//! narrative session, and feeds the gauge, radar, markdown and document
//! renderers. Scores are computed once at construction and never change
//! for the lifetime of the value.

pub mod document;
pub mod markdown;
pub mod views;

pub use document::{strip_html_tags, DocumentPillar, SurveyDocument, DOCUMENT_FILE_NAME};
pub use markdown::{generate_json_report, generate_markdown_report};
pub use views::{gauge_views, overview_radar, pillar_radar, GaugeView, RadarPoint, RadarSeries};

use crate::models::{AnswerMap, CategoryScore, ReportMetadata, ScoreCard};
use crate::narrative::{NarrativeClient, NarrativePayload, NarrativeSession, NarrativeState};
use crate::scoring::{round_two, score_survey};
use crate::taxonomy::Taxonomy;
use chrono::Utc;
use serde::Serialize;

type NewSurveyCallback = Box<dyn Fn() + Send + Sync>;

/// One respondent's scored survey and everything derived from it.
pub struct SurveyResults {
    answers: AnswerMap,
    taxonomy: Taxonomy,
    scores: ScoreCard,
    saved_survey_id: Option<String>,
    narrative: NarrativeSession,
    on_new_survey: Option<NewSurveyCallback>,
}

impl SurveyResults {
    /// Scores the answers against the taxonomy and takes ownership of
    /// both. The resulting card is fixed for this value's lifetime.
    pub fn new(answers: AnswerMap, taxonomy: Taxonomy) -> Self {
        let scores = score_survey(&answers, &taxonomy);

        Self {
            answers,
            taxonomy,
            scores,
            saved_survey_id: None,
            narrative: NarrativeSession::new(),
            on_new_survey: None,
        }
    }

    /// Attaches the id the survey was persisted under, for the
    /// confirmation line in the report.
    pub fn with_saved_survey_id(mut self, id: impl Into<String>) -> Self {
        self.saved_survey_id = Some(id.into());
        self
    }

    /// Registers the hook fired when the respondent asks to start over.
    pub fn with_on_new_survey(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_new_survey = Some(Box::new(callback));
        self
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn scores(&self) -> &ScoreCard {
        &self.scores
    }

    pub fn saved_survey_id(&self) -> Option<&str> {
        self.saved_survey_id.as_deref()
    }

    pub fn narrative(&self) -> &NarrativeSession {
        &self.narrative
    }

    /// The request body the narrative service expects for this survey.
    pub fn payload(&self) -> NarrativePayload {
        NarrativePayload::new(&self.scores, self.answers.nombre(), self.answers.empresa())
    }

    /// Fetches the narrative through the session guard: at most one
    /// request per results value, failures settle on the fallback text.
    pub async fn ensure_narrative(&mut self, client: &NarrativeClient) -> &NarrativeState {
        let payload = self.payload();
        self.narrative.ensure(client, &payload).await
    }

    /// Fires the new-survey hook and clears the narrative session, as a
    /// fresh results value would start.
    pub fn request_new_survey(&mut self) {
        if let Some(callback) = &self.on_new_survey {
            callback();
        }
        self.narrative.reset();
    }

    /// Report metadata for this survey, stamped now.
    pub fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            nombre: self.answers.nombre(),
            empresa: self.answers.empresa(),
            saved_survey_id: self.saved_survey_id.clone(),
            generated_at: Utc::now(),
            questions_answered: self.answers.answered_count(&self.taxonomy),
            questions_total: self.taxonomy.question_count(),
        }
    }

    /// Serializable view of the whole result, with every score rounded
    /// to two decimals.
    pub fn snapshot(&self) -> ResultsSnapshot {
        ResultsSnapshot {
            metadata: self.metadata(),
            total_score: self.scores.overall_rounded(),
            maturity: self.scores.maturity().label().to_string(),
            pillars: self
                .scores
                .pillars
                .iter()
                .map(|p| PillarSnapshot {
                    pilar: p.name.numbered_label(),
                    average: round_two(p.average),
                    maturity: p.maturity().label().to_string(),
                    categories: p.categories.clone(),
                })
                .collect(),
            narrative: self.narrative.display_text().map(str::to_string),
        }
    }
}

/// Snapshot of one pillar for the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct PillarSnapshot {
    pub pilar: String,
    pub average: f64,
    pub maturity: String,
    pub categories: Vec<CategoryScore>,
}

/// Snapshot of the full results for the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsSnapshot {
    pub metadata: ReportMetadata,
    pub total_score: f64,
    pub maturity: String,
    pub pillars: Vec<PillarSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn full_results() -> SurveyResults {
        let taxonomy = Taxonomy::standard();
        let mut answers: AnswerMap = taxonomy
            .question_ids()
            .map(|id| (id.to_string(), AnswerValue::Number(4.0)))
            .collect();
        answers.insert("Nombre", AnswerValue::Text("Ana".into()));
        answers.insert("Empresa", AnswerValue::Text("Acme".into()));

        SurveyResults::new(answers, taxonomy)
    }

    #[test]
    fn test_scores_computed_at_construction() {
        let results = full_results();

        assert_eq!(results.scores().overall, 4.0);
        assert_eq!(results.scores().pillars.len(), 4);
        assert_eq!(results.metadata().questions_answered, 63);
        assert_eq!(results.metadata().questions_total, 63);
    }

    #[test]
    fn test_saved_survey_id_builder() {
        let results = full_results().with_saved_survey_id("abc-123");
        assert_eq!(results.saved_survey_id(), Some("abc-123"));
    }

    #[test]
    fn test_new_survey_hook_fires_and_resets_narrative() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let mut results = full_results().with_on_new_survey(move || {
            flag.store(true, Ordering::SeqCst);
        });

        results.request_new_survey();

        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(results.narrative().state(), &NarrativeState::Idle);
    }

    #[test]
    fn test_payload_carries_identity_and_total() {
        let payload = full_results().payload();
        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("\"Nombre\":\"Ana\""));
        assert!(json.contains("\"Empresa\":\"Acme\""));
        assert_eq!(payload.total_score(), 4.0);
    }

    #[test]
    fn test_snapshot_rounds_everything() {
        let snapshot = full_results().snapshot();

        assert_eq!(snapshot.total_score, 4.0);
        assert_eq!(snapshot.maturity, "04. Avanzado");
        assert_eq!(snapshot.pillars.len(), 4);
        assert_eq!(snapshot.pillars[0].pilar, "1. Estrategia");
        assert_eq!(snapshot.pillars[0].average, 4.0);
        assert!(snapshot.narrative.is_none());
    }
}
