use crate::types::result::MetricMap;
use crate::types::scoring::{round2, CategoryScore, ScoreSet};
use crate::types::status::Status;
use crate::types::taxonomy::{Category, Taxonomy};
use tracing::debug;

/// Equal-weight average of per-category scores. Excellent earns full credit,
/// Good half, Fair and Poor none; N/A and missing metrics leave the denominator.
pub fn score(taxonomy: &Taxonomy, metrics: &MetricMap) -> ScoreSet {
    let categories = taxonomy
        .categories
        .iter()
        .map(|category| score_category(category, metrics))
        .collect();
    ScoreSet::new(categories)
}

fn score_category(category: &Category, metrics: &MetricMap) -> CategoryScore {
    let mut scored = 0usize;
    let mut credit = 0.0;
    for metric in &category.metrics {
        let status = metrics
            .get(metric)
            .copied()
            .unwrap_or(Status::NotApplicable);
        if let Some(value) = status.credit() {
            scored += 1;
            credit += value;
        }
    }

    let score = if scored == 0 {
        0.0
    } else {
        round2(100.0 * credit / scored as f64)
    };
    debug!(category = %category.name, score, scored, "category scored");

    CategoryScore {
        category: category.name.clone(),
        key: category.key(),
        score,
        scored_metrics: scored,
    }
}
