//! Document export.
//!
//! Assembles everything the typesetting service needs to produce the
//! PDF handout. The crate emits the assembly as JSON under a canonical
//! file name; the rendering itself happens outside.

use crate::models::CategoryScore;
use crate::results::SurveyResults;
use crate::scoring::round_two;
use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Canonical file name of the exported document.
pub const DOCUMENT_FILE_NAME: &str = "reporte-madurez-digital.pdf";

/// One pillar, flattened for the document layout.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPillar {
    pub pilar_name: String,
    pub average: f64,
    pub categories: Vec<CategoryScore>,
}

/// The document renderer's input, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDocument {
    pub file_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    pub total_score: f64,
    pub maturity: String,
    pub pillars: Vec<DocumentPillar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl SurveyDocument {
    /// Flattens the results for the document template. Narrative text
    /// is stripped of HTML tags because the template renders plain
    /// text.
    pub fn assemble(results: &SurveyResults) -> Self {
        let scores = results.scores();

        Self {
            file_name: DOCUMENT_FILE_NAME.to_string(),
            title: "Resultados de Madurez Digital".to_string(),
            nombre: results.answers().nombre(),
            empresa: results.answers().empresa(),
            total_score: scores.overall_rounded(),
            maturity: scores.maturity().label().to_string(),
            pillars: scores
                .pillars
                .iter()
                .map(|p| DocumentPillar {
                    pilar_name: p.name.numbered_label(),
                    average: round_two(p.average),
                    categories: p.categories.clone(),
                })
                .collect(),
            narrative: results.narrative().display_text().map(strip_html_tags),
        }
    }

    /// The JSON handed to the renderer.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// Removes HTML tags from narrative text, leaving the visible content.
pub fn strip_html_tags(input: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

    re.replace_all(input, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerMap, AnswerValue};
    use crate::taxonomy::Taxonomy;

    fn create_test_results() -> SurveyResults {
        let taxonomy = Taxonomy::standard();
        let mut answers: AnswerMap = taxonomy
            .question_ids()
            .map(|id| (id.to_string(), AnswerValue::Number(5.0)))
            .collect();
        answers.insert("Nombre", AnswerValue::Text("Ana".into()));

        SurveyResults::new(answers, taxonomy)
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("<p>Hola</p>"), "Hola");
        assert_eq!(
            strip_html_tags("<div class=\"x\">A</div> y <b>B</b>"),
            "A y B"
        );
        assert_eq!(strip_html_tags("sin etiquetas"), "sin etiquetas");
        assert_eq!(strip_html_tags("3 < 5"), "3 < 5");
        assert_eq!(strip_html_tags(""), "");
    }

    #[test]
    fn test_assemble_document() {
        let document = SurveyDocument::assemble(&create_test_results());

        assert_eq!(document.file_name, DOCUMENT_FILE_NAME);
        assert_eq!(document.nombre.as_deref(), Some("Ana"));
        assert_eq!(document.empresa, None);
        assert_eq!(document.total_score, 5.0);
        assert_eq!(document.maturity, "05. Óptimo");
        assert_eq!(document.pillars.len(), 4);
        assert_eq!(document.pillars[0].pilar_name, "1. Estrategia");
        assert!(document.narrative.is_none());
    }

    #[test]
    fn test_document_json() {
        let json = SurveyDocument::assemble(&create_test_results())
            .to_json()
            .unwrap();

        assert!(json.contains("reporte-madurez-digital.pdf"));
        assert!(json.contains("\"pilar_name\": \"1. Estrategia\""));
        assert!(!json.contains("\"empresa\""));
    }
}
