use crate::types::scoring::ScoreSet;
use crate::types::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat metric name to status mapping; the only part of a result that is persisted.
pub type MetricMap = BTreeMap<String, Status>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricItem {
    pub name: String,
    pub status: Status,
    pub suggestion: String,
}

impl MetricItem {
    pub fn new(name: &str, status: Status) -> Self {
        Self {
            name: name.to_string(),
            status,
            suggestion: suggestion_for(name),
        }
    }
}

pub fn suggestion_for(metric: &str) -> String {
    format!("Check documentation for best practice on '{metric}'")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub name: String,
    pub description: String,
    pub items: Vec<MetricItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub url: String,
    pub taxonomy: String,
    pub audited_at: DateTime<Utc>,
    pub metrics: MetricMap,
    pub categories: Vec<CategoryView>,
    pub scores: ScoreSet,
}
