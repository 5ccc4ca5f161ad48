//! Markdown report generation.
//!
//! Renders a scored survey as the sectioned Markdown report handed to
//! the respondent, plus the JSON snapshot variant.

use crate::config::ReportConfig;
use crate::models::{MaturityLevel, PillarScore, ReportMetadata, ScoreCard};
use crate::results::views::{gauge_views, overview_radar, pillar_radar, percent_of_scale};
use crate::results::SurveyResults;
use crate::scoring::round_two;
use anyhow::Result;

/// Generate the complete Markdown report.
pub fn generate_markdown_report(results: &SurveyResults, options: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Resultados de Madurez Digital\n\n");

    // Respondent and survey metadata
    output.push_str(&generate_header_section(&results.metadata()));

    // Gauge summary
    if options.include_gauges {
        output.push_str(&generate_summary_section(results.scores()));
    }

    // AI narrative, when a request has settled
    output.push_str(&generate_narrative_section(
        results.narrative().display_text(),
    ));

    // Four-pillar comparison
    if options.include_radar {
        output.push_str(&generate_radar_section(results.scores()));
    }

    // Per-pillar breakdown
    for pillar in &results.scores().pillars {
        output.push_str(&generate_pillar_section(pillar));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata header.
fn generate_header_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Fecha:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(nombre) = &metadata.nombre {
        section.push_str(&format!("- **Nombre:** {}\n", nombre));
    }
    if let Some(empresa) = &metadata.empresa {
        section.push_str(&format!("- **Empresa:** {}\n", empresa));
    }
    section.push_str(&format!(
        "- **Preguntas respondidas:** {}/{}\n",
        metadata.questions_answered, metadata.questions_total
    ));
    section.push_str("\n");

    if let Some(id) = &metadata.saved_survey_id {
        section.push_str(&format!(
            "✅ Tu encuesta se ha guardado exitosamente (ID: {})\n\n",
            short_id(id)
        ));
    }

    section
}

/// Generate the gauge summary table.
fn generate_summary_section(card: &ScoreCard) -> String {
    let mut section = String::new();

    section.push_str("## Resumen General\n\n");
    section.push_str("| Indicador | Puntaje | Porcentaje | Nivel |\n");
    section.push_str("|:---|:---:|:---:|:---|\n");

    for gauge in gauge_views(card) {
        let level = MaturityLevel::from_score(gauge.value);
        section.push_str(&format!(
            "| {} | {:.1} | {:.0}% | {} |\n",
            gauge.label,
            gauge.value,
            gauge.percent,
            level.label()
        ));
    }
    section.push_str("\n");

    section
}

/// Generate the AI narrative section. Empty until a request settles;
/// after a failed request this carries the fallback message.
fn generate_narrative_section(narrative: Option<&str>) -> String {
    match narrative {
        Some(text) => format!("## Análisis con IA\n\n{}\n\n", text.trim()),
        None => String::new(),
    }
}

/// Generate the four-pillar comparison table.
fn generate_radar_section(card: &ScoreCard) -> String {
    let radar = overview_radar(card);
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", radar.title));
    section.push_str(&format!("*{}*\n\n", radar.description));
    section.push_str("| Pilar | Puntaje |\n");
    section.push_str("|:---|:---:|\n");
    for point in &radar.points {
        section.push_str(&format!("| {} | {:.2} |\n", point.category, point.value));
    }
    section.push_str("\n");

    section
}

/// Generate one pillar's section with its category breakdown.
fn generate_pillar_section(pillar: &PillarScore) -> String {
    let radar = pillar_radar(pillar);
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", pillar.name.numbered_label()));
    section.push_str(&format!("*{}*\n\n", radar.description));
    section.push_str(&format!(
        "**Promedio:** {:.1} ({})\n\n",
        round_two(pillar.average),
        pillar.maturity().label()
    ));

    section.push_str("### Desglose por Categoría\n\n");
    section.push_str("| Categoría | Puntaje | Porcentaje |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for category in &pillar.categories {
        section.push_str(&format!(
            "| {} | {:.1} | {:.0}% |\n",
            category.label,
            category.value,
            percent_of_scale(category.value)
        ));
    }
    section.push_str("\n");

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Reporte generado por Madurómetro*\n");

    footer
}

/// Last eight characters of a persisted-survey id.
fn short_id(id: &str) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(8)).collect()
}

/// Generate the JSON report from the results snapshot.
pub fn generate_json_report(results: &SurveyResults) -> Result<String> {
    serde_json::to_string_pretty(&results.snapshot()).map_err(Into::into)
}
