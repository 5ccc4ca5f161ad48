//! The aggregation engine.
//!
//! Collapses raw answers into per-category means, per-pillar averages
//! and the overall score. Category values are rounded to two decimals
//! as they are computed; pillar and overall means stay unrounded until
//! a display or serialization boundary asks for rounding.

use crate::models::{AnswerMap, CategoryScore, PillarScore, ScoreCard};
use crate::taxonomy::{CategoryTaxonomy, Taxonomy};

/// Rounds to two decimal places, half away from zero.
pub fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the numeric answers present in each category.
///
/// Every category appears in the output in taxonomy order. A category
/// with no numeric answer scores 0.0; missing or non-numeric answers
/// simply do not contribute to the mean.
pub fn category_averages(
    answers: &AnswerMap,
    categories: &[CategoryTaxonomy],
) -> Vec<CategoryScore> {
    categories
        .iter()
        .map(|category| {
            let values: Vec<f64> = category
                .questions
                .iter()
                .filter_map(|id| answers.numeric(id))
                .collect();

            let value = if values.is_empty() {
                0.0
            } else {
                round_two(mean(&values))
            };

            CategoryScore {
                label: category.label.clone(),
                value,
            }
        })
        .collect()
}

/// Scores every pillar of the taxonomy, in taxonomy order.
///
/// A pillar's average is the unweighted mean of its rounded category
/// values. Zero-filled categories count at full weight, so a sparsely
/// answered pillar scores low rather than dropping out.
pub fn pillar_scores(answers: &AnswerMap, taxonomy: &Taxonomy) -> Vec<PillarScore> {
    taxonomy
        .pillars
        .iter()
        .map(|pillar| {
            let categories = category_averages(answers, &pillar.categories);
            let values: Vec<f64> = categories.iter().map(|c| c.value).collect();

            PillarScore {
                name: pillar.id,
                average: mean(&values),
                categories,
            }
        })
        .collect()
}

/// Unweighted mean across pillar averages; 0.0 when there are none.
pub fn overall_average(pillars: &[PillarScore]) -> f64 {
    let values: Vec<f64> = pillars.iter().map(|p| p.average).collect();
    mean(&values)
}

/// Runs the full aggregation: answers plus taxonomy in, score card out.
///
/// The answer map is never mutated, so scoring the same survey twice
/// yields the same card.
pub fn score_survey(answers: &AnswerMap, taxonomy: &Taxonomy) -> ScoreCard {
    let pillars = pillar_scores(answers, taxonomy);
    let overall = overall_average(&pillars);

    ScoreCard { pillars, overall }
}
