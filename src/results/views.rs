//! View models for the result charts.
//!
//! Gauges and radar series are plain data: the renderer decides how to
//! draw them. Values are rounded to two decimals here because this is a
//! display boundary.

use crate::models::{PillarScore, ScoreCard, MAX_SCORE};
use crate::scoring::round_two;
use serde::Serialize;

/// One gauge: a labelled score plus its percent of the 1–5 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

/// One axis of a radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub category: String,
    pub value: f64,
}

/// A titled radar series with its descriptive subtitle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub title: String,
    pub description: String,
    pub points: Vec<RadarPoint>,
}

/// Converts a 1–5 score to its percent of the scale ceiling.
pub fn percent_of_scale(value: f64) -> f64 {
    value / MAX_SCORE * 100.0
}

/// The five gauges: overall first, then one per pillar in fixed order.
pub fn gauge_views(card: &ScoreCard) -> Vec<GaugeView> {
    let overall = round_two(card.overall);

    let mut gauges = vec![GaugeView {
        label: "Madurez Digital".to_string(),
        value: overall,
        percent: percent_of_scale(overall),
    }];

    for pillar in &card.pillars {
        let value = round_two(pillar.average);
        gauges.push(GaugeView {
            label: pillar.name.numbered_label(),
            value,
            percent: percent_of_scale(value),
        });
    }

    gauges
}

/// The four-pillar comparison radar.
pub fn overview_radar(card: &ScoreCard) -> RadarSeries {
    RadarSeries {
        title: "Vista General".to_string(),
        description: "Comparación de los 4 pilares de madurez digital".to_string(),
        points: card
            .pillars
            .iter()
            .map(|p| RadarPoint {
                category: p.label().to_string(),
                value: round_two(p.average),
            })
            .collect(),
    }
}

/// The per-category radar for one pillar.
pub fn pillar_radar(pillar: &PillarScore) -> RadarSeries {
    RadarSeries {
        title: pillar.label().to_string(),
        description: format!("Análisis detallado de {}", pillar.label().to_lowercase()),
        points: pillar
            .categories
            .iter()
            .map(|c| RadarPoint {
                category: c.label.clone(),
                value: c.value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerMap, AnswerValue};
    use crate::scoring::score_survey;
    use crate::taxonomy::Taxonomy;

    fn uniform_card(value: f64) -> ScoreCard {
        let taxonomy = Taxonomy::standard();
        let answers: AnswerMap = taxonomy
            .question_ids()
            .map(|id| (id.to_string(), AnswerValue::Number(value)))
            .collect();
        score_survey(&answers, &taxonomy)
    }

    #[test]
    fn test_gauges_order_and_scale() {
        let gauges = gauge_views(&uniform_card(4.0));

        assert_eq!(gauges.len(), 5);
        assert_eq!(gauges[0].label, "Madurez Digital");
        assert_eq!(gauges[0].value, 4.0);
        assert_eq!(gauges[0].percent, 80.0);
        assert_eq!(gauges[1].label, "1. Estrategia");
        assert_eq!(gauges[4].label, "4. Gente y Liderazgo");
    }

    #[test]
    fn test_overview_radar_covers_all_pillars() {
        let radar = overview_radar(&uniform_card(3.0));

        assert_eq!(radar.title, "Vista General");
        assert_eq!(
            radar.description,
            "Comparación de los 4 pilares de madurez digital"
        );
        assert_eq!(radar.points.len(), 4);
        assert_eq!(radar.points[0].category, "Estrategia");
        assert!(radar.points.iter().all(|p| p.value == 3.0));
    }

    #[test]
    fn test_pillar_radar_describes_pillar() {
        let card = uniform_card(2.0);
        let radar = pillar_radar(&card.pillars[0]);

        assert_eq!(radar.title, "Estrategia");
        assert_eq!(radar.description, "Análisis detallado de estrategia");
        assert_eq!(radar.points.len(), 5);
        assert_eq!(radar.points[0].category, "Visión Digital");
    }

    #[test]
    fn test_percent_of_scale() {
        assert_eq!(percent_of_scale(5.0), 100.0);
        assert_eq!(percent_of_scale(2.5), 50.0);
        assert_eq!(percent_of_scale(0.0), 0.0);
    }
}
