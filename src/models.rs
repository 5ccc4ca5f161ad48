//! Data models for the maturity survey.
//!
//! This module contains the core data structures used throughout the
//! application: answer values, the answer store, and the score types
//! produced by the aggregation engine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Lowest valid Likert response.
pub const MIN_SCORE: f64 = 1.0;
/// Highest valid Likert response. Also the gauge scale ceiling.
pub const MAX_SCORE: f64 = 5.0;

/// Answer keys that carry identity text instead of a Likert score.
pub const IDENTITY_FIELDS: [&str; 2] = ["Nombre", "Empresa"];

/// One of the four top-level maturity pillars, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillarId {
    Pilar1,
    Pilar2,
    Pilar3,
    Pilar4,
}

impl PillarId {
    /// All pillars in their fixed display order.
    pub const ALL: [PillarId; 4] = [
        PillarId::Pilar1,
        PillarId::Pilar2,
        PillarId::Pilar3,
        PillarId::Pilar4,
    ];

    /// Human-readable pillar label.
    pub fn label(&self) -> &'static str {
        match self {
            PillarId::Pilar1 => "Estrategia",
            PillarId::Pilar2 => "Tecnología",
            PillarId::Pilar3 => "Analítica de datos",
            PillarId::Pilar4 => "Gente y Liderazgo",
        }
    }

    /// 1-based position within the fixed order.
    pub fn position(&self) -> usize {
        match self {
            PillarId::Pilar1 => 1,
            PillarId::Pilar2 => 2,
            PillarId::Pilar3 => 3,
            PillarId::Pilar4 => 4,
        }
    }

    /// Label prefixed with its position, e.g. `1. Estrategia`.
    pub fn numbered_label(&self) -> String {
        format!("{}. {}", self.position(), self.label())
    }
}

impl fmt::Display for PillarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative maturity level mapped from a 1–5 score.
///
/// Display-layer concern only; the aggregation engine never computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    Basico,
    Inicial,
    Intermedio,
    Avanzado,
    Optimo,
}

impl MaturityLevel {
    /// Maps a numeric score to its level: nearest integer, clamped to [1,5].
    ///
    /// Scores below 1 (including the 0 emitted for unanswered surveys)
    /// clamp to `Basico`.
    pub fn from_score(score: f64) -> Self {
        match score.round().clamp(MIN_SCORE, MAX_SCORE) as u8 {
            1 => MaturityLevel::Basico,
            2 => MaturityLevel::Inicial,
            3 => MaturityLevel::Intermedio,
            4 => MaturityLevel::Avanzado,
            _ => MaturityLevel::Optimo,
        }
    }

    /// Numbered display label, e.g. `03. Intermedio`.
    pub fn label(&self) -> &'static str {
        match self {
            MaturityLevel::Basico => "01. Básico",
            MaturityLevel::Inicial => "02. Inicial",
            MaturityLevel::Intermedio => "03. Intermedio",
            MaturityLevel::Avanzado => "04. Avanzado",
            MaturityLevel::Optimo => "05. Óptimo",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single survey response: a numeric Likert score or free text.
///
/// Identity fields (`Nombre`, `Empresa`) arrive as text; question ids carry
/// numbers. The union is untagged so the inbound JSON stays a flat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Returns the numeric value, if this answer is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The answer store: QuestionId → response.
///
/// Populated by the survey-taking flow (here: a JSON file); read-only to
/// the aggregation engine, which never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<String, AnswerValue>);

impl AnswerMap {
    /// Creates an empty answer map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an answer map from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse answers file: {}", path.display()))
    }

    /// Inserts or replaces an answer.
    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.0.insert(id.into(), value);
    }

    /// Looks up a raw answer.
    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    /// Looks up an answer and returns it only if it is numeric.
    pub fn numeric(&self, id: &str) -> Option<f64> {
        self.0.get(id).and_then(AnswerValue::as_number)
    }

    /// Returns the display form of an answer, if present.
    pub fn display_value(&self, id: &str) -> Option<String> {
        self.0.get(id).map(|v| v.to_string())
    }

    /// The respondent's name, if provided.
    pub fn nombre(&self) -> Option<String> {
        self.display_value("Nombre")
    }

    /// The respondent's company, if provided.
    pub fn empresa(&self) -> Option<String> {
        self.display_value("Empresa")
    }

    /// Number of entries, identity fields included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no answers are present at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts the taxonomy questions that have a numeric answer.
    pub fn answered_count(&self, taxonomy: &crate::taxonomy::Taxonomy) -> usize {
        taxonomy
            .question_ids()
            .filter(|id| self.numeric(id).is_some())
            .count()
    }

    /// Lenient validation: reports anomalies as warnings, never fails.
    ///
    /// Missing answers are not anomalies (partial surveys still score);
    /// flagged are unknown ids, text where a score was expected, and
    /// numbers outside [1,5]. All flagged answers still reach the engine
    /// untouched.
    pub fn validate(&self, taxonomy: &crate::taxonomy::Taxonomy) -> Vec<String> {
        let mut warnings = Vec::new();

        for (id, value) in &self.0 {
            if IDENTITY_FIELDS.contains(&id.as_str()) {
                continue;
            }

            if !taxonomy.contains_question(id) {
                warnings.push(format!("Unknown question id: {}", id));
                continue;
            }

            match value.as_number() {
                Some(n) if !(MIN_SCORE..=MAX_SCORE).contains(&n) => {
                    warnings.push(format!("Answer for {} is out of range [1,5]: {}", id, n));
                }
                Some(_) => {}
                None => {
                    warnings.push(format!("Answer for {} is not numeric: {}", id, value));
                }
            }
        }

        warnings.sort();
        warnings
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Average score for one category of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Category display label.
    pub label: String,
    /// Mean of the numeric answers present, rounded to 2 decimals;
    /// 0.0 when the category has no numeric answer.
    pub value: f64,
}

/// Aggregate for one pillar: its category scores and their mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    /// Which pillar this is.
    pub name: PillarId,
    /// Unweighted mean of the category values. Zero-filled categories
    /// count fully; the value is left unrounded.
    pub average: f64,
    /// Category scores in taxonomy order.
    pub categories: Vec<CategoryScore>,
}

impl PillarScore {
    /// Display label of the pillar.
    pub fn label(&self) -> &'static str {
        self.name.label()
    }

    /// Display-layer maturity level for this pillar.
    pub fn maturity(&self) -> MaturityLevel {
        MaturityLevel::from_score(self.average)
    }
}

/// The complete scoring output: the four pillar scores and their mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// One entry per pillar, always 4, in fixed order.
    pub pillars: Vec<PillarScore>,
    /// Unweighted mean across the pillar averages, unrounded.
    pub overall: f64,
}

impl ScoreCard {
    /// Overall average rounded to 2 decimals, for display and serialization.
    pub fn overall_rounded(&self) -> f64 {
        crate::scoring::round_two(self.overall)
    }

    /// Display-layer maturity level for the overall score.
    pub fn maturity(&self) -> MaturityLevel {
        MaturityLevel::from_score(self.overall)
    }

    /// Looks up one pillar's score.
    pub fn pillar(&self, id: PillarId) -> Option<&PillarScore> {
        self.pillars.iter().find(|p| p.name == id)
    }
}

/// Metadata attached to a generated results report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Respondent name, when provided.
    pub nombre: Option<String>,
    /// Respondent company, when provided.
    pub empresa: Option<String>,
    /// Persisted-survey id passed by the host flow, display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_survey_id: Option<String>,
    /// When the report was generated.
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Taxonomy questions with a numeric answer.
    pub questions_answered: usize,
    /// Total questions in the taxonomy.
    pub questions_total: usize,
}
