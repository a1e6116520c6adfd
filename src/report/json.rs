use crate::types::result::{AuditResult, MetricMap};

pub fn to_json(result: &AuditResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Compact encoding of the flat map, the form kept in storage.
pub fn metrics_to_json(metrics: &MetricMap) -> Result<String, serde_json::Error> {
    serde_json::to_string(metrics)
}

/// Fails on any status label outside the enumeration.
pub fn metrics_from_json(content: &str) -> Result<MetricMap, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::RandomSimulator;
    use crate::engine::AuditEngine;
    use crate::types::config::AuditConfig;
    use crate::types::status::Status;
    use crate::types::taxonomy::{Taxonomy, TaxonomyVariant};
    use proptest::prelude::*;

    fn sample() -> AuditResult {
        let engine = AuditEngine::new(
            Taxonomy::builtin(TaxonomyVariant::Standard).expect("taxonomy should build"),
        );
        let mut sim = RandomSimulator::seeded(21, &AuditConfig::default().status_weights());
        engine.run("https://example.com", &mut sim)
    }

    #[test]
    fn json_report_contains_scores_and_metrics() {
        let rendered = to_json(&sample()).expect("json should serialize");
        assert!(rendered.contains("\"overall\":"));
        assert!(rendered.contains("\"HTTPS Enabled\":"));
        assert!(rendered.contains("\"suggestion\":"));
    }

    #[test]
    fn full_result_survives_json() {
        let result = sample();
        let rendered = to_json(&result).expect("json should serialize");
        let parsed: AuditResult = serde_json::from_str(&rendered).expect("json should parse");
        assert_eq!(parsed, result);
    }

    #[test]
    fn metrics_from_json_rejects_unknown_status() {
        let err = metrics_from_json(r#"{"HTTPS Enabled": "Superb"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn metrics_from_json_reads_short_not_applicable_label() {
        let metrics = metrics_from_json(r#"{"Firewall Active": "N/A", "Favicon Present": "Good"}"#)
            .expect("map should parse");
        assert_eq!(metrics.get("Firewall Active"), Some(&Status::NotApplicable));
        assert_eq!(metrics.get("Favicon Present"), Some(&Status::Good));
    }

    proptest! {
        #[test]
        fn flat_map_round_trips_through_text(
            entries in prop::collection::btree_map(
                "[A-Za-z0-9 ./()&-]{1,40}",
                prop::sample::select(Status::ALL.to_vec()),
                0..50,
            )
        ) {
            let metrics: MetricMap = entries;
            let text = metrics_to_json(&metrics).expect("map should serialize");
            let back = metrics_from_json(&text).expect("map should parse");
            prop_assert_eq!(back, metrics);
        }
    }
}
