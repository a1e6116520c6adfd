pub mod buckets;
pub mod evaluator;
pub mod scoring;

use crate::types::result::{AuditResult, CategoryView, MetricItem, MetricMap};
use crate::types::taxonomy::Taxonomy;
use chrono::{DateTime, Utc};
use evaluator::{MetricEvaluator, StoredStatuses};
use std::sync::Arc;
use tracing::info;

/// Stateless audit runner bound to one taxonomy for the life of the process.
#[derive(Debug, Clone)]
pub struct AuditEngine {
    taxonomy: Arc<Taxonomy>,
}

impl AuditEngine {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Evaluates every metric in category order, then scores the flat map once.
    /// The url is passed through to the evaluator untouched.
    pub fn run(&self, url: &str, evaluator: &mut dyn MetricEvaluator) -> AuditResult {
        let mut metrics = MetricMap::new();
        let mut categories = Vec::with_capacity(self.taxonomy.categories.len());

        for category in &self.taxonomy.categories {
            let mut items = Vec::with_capacity(category.metrics.len());
            for metric in &category.metrics {
                let status = evaluator.evaluate(metric, url);
                metrics.insert(metric.clone(), status);
                items.push(MetricItem::new(metric, status));
            }
            categories.push(CategoryView {
                name: category.name.clone(),
                description: category.description.clone(),
                items,
            });
        }

        let scores = scoring::score(&self.taxonomy, &metrics);
        info!(
            url,
            taxonomy = %self.taxonomy.name,
            metrics = metrics.len(),
            overall = scores.overall,
            "audit completed"
        );

        AuditResult {
            url: url.to_string(),
            taxonomy: self.taxonomy.name.clone(),
            audited_at: Utc::now(),
            metrics,
            categories,
            scores,
        }
    }

    /// Rebuilds a result from a stored flat map. Metrics the taxonomy does not
    /// know are dropped; taxonomy metrics missing from the map become N/A.
    pub fn rebuild(&self, url: &str, audited_at: DateTime<Utc>, metrics: &MetricMap) -> AuditResult {
        let mut replay = StoredStatuses::new(metrics);
        let mut result = self.run(url, &mut replay);
        result.audited_at = audited_at;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::RandomSimulator;
    use crate::types::config::AuditConfig;
    use crate::types::status::Status;
    use crate::types::taxonomy::TaxonomyVariant;
    use std::collections::BTreeSet;

    fn engine(variant: TaxonomyVariant) -> AuditEngine {
        AuditEngine::new(Taxonomy::builtin(variant).expect("taxonomy should build"))
    }

    fn simulator(seed: u64) -> RandomSimulator {
        RandomSimulator::seeded(seed, &AuditConfig::default().status_weights())
    }

    #[test]
    fn run_covers_every_metric_exactly_once() {
        for variant in [TaxonomyVariant::Standard, TaxonomyVariant::Extended] {
            let engine = engine(variant);
            let result = engine.run("https://example.com", &mut simulator(1));

            let expected: BTreeSet<&str> = engine.taxonomy().metric_names().collect();
            let actual: BTreeSet<&str> = result.metrics.keys().map(String::as_str).collect();
            assert_eq!(actual, expected);
            assert_eq!(result.metrics.len(), engine.taxonomy().metric_count());
        }
    }

    #[test]
    fn grouped_view_agrees_with_flat_map() {
        let engine = engine(TaxonomyVariant::Standard);
        let result = engine.run("https://example.com", &mut simulator(5));

        assert_eq!(result.categories.len(), 5);
        for (view, category) in result.categories.iter().zip(&engine.taxonomy().categories) {
            assert_eq!(view.name, category.name);
            assert_eq!(view.description, category.description);
            let names: Vec<&str> = view.items.iter().map(|item| item.name.as_str()).collect();
            let expected: Vec<&str> = category.metrics.iter().map(String::as_str).collect();
            assert_eq!(names, expected);
            for item in &view.items {
                assert_eq!(result.metrics.get(&item.name), Some(&item.status));
                assert!(item.suggestion.contains(&item.name));
            }
        }
    }

    #[test]
    fn run_scores_match_direct_aggregation() {
        let engine = engine(TaxonomyVariant::Standard);
        let result = engine.run("https://example.com", &mut simulator(8));
        assert_eq!(result.scores, scoring::score(engine.taxonomy(), &result.metrics));
        assert_eq!(result.taxonomy, "standard");
        assert_eq!(result.url, "https://example.com");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let engine = engine(TaxonomyVariant::Extended);
        let a = engine.run("https://a.example", &mut simulator(77));
        let b = engine.run("https://b.example", &mut simulator(77));
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn rebuild_restores_statuses_and_timestamp() {
        let engine = engine(TaxonomyVariant::Standard);
        let original = engine.run("https://example.com", &mut simulator(9));
        let rebuilt = engine.rebuild(&original.url, original.audited_at, &original.metrics);
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn rebuild_treats_missing_metrics_as_not_applicable() {
        let engine = engine(TaxonomyVariant::Standard);
        let mut metrics = MetricMap::new();
        metrics.insert("HTTPS Enabled".to_string(), Status::Excellent);
        metrics.insert("Not In Taxonomy".to_string(), Status::Poor);

        let rebuilt = engine.rebuild("https://example.com", Utc::now(), &metrics);
        assert_eq!(rebuilt.metrics.get("HTTPS Enabled"), Some(&Status::Excellent));
        assert_eq!(rebuilt.metrics.get("Firewall Active"), Some(&Status::NotApplicable));
        assert!(!rebuilt.metrics.contains_key("Not In Taxonomy"));
        assert_eq!(rebuilt.scores.get("Security"), Some(100.0));
        assert_eq!(rebuilt.scores.get("Performance"), Some(0.0));
    }
}
