use serde::{Deserialize, Serialize};

/// Percentage in `[0, 100]`, rounded to two decimals.
pub type Score = f64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub key: String,
    pub score: Score,
    /// Metrics counted in the denominator (everything except N/A).
    pub scored_metrics: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub categories: Vec<CategoryScore>,
    pub overall: Score,
}

impl ScoreSet {
    pub fn new(categories: Vec<CategoryScore>) -> Self {
        let overall = if categories.is_empty() {
            0.0
        } else {
            let sum: f64 = categories.iter().map(|category| category.score).sum();
            round2(sum / categories.len() as f64)
        };
        Self {
            categories,
            overall,
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<Score> {
        self.categories
            .iter()
            .find(|entry| entry.category == category || entry.key == category)
            .map(|entry| entry.score)
    }
}

/// Two-decimal rounding with ties to even, so `3.125` becomes `3.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
