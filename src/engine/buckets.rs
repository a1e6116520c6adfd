//! Five-bucket roll-up kept alongside the primary `ScoreSet`.
//!
//! Categories are folded into performance / security / accessibility /
//! tech_seo / ux buckets, Excellent and Good both count as a pass, and each
//! bucket score is the integer pass percentage. This never feeds `ScoreSet`.

use crate::types::result::MetricMap;
use crate::types::taxonomy::Taxonomy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Performance,
    Security,
    Accessibility,
    TechSeo,
    Ux,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Performance,
        Bucket::Security,
        Bucket::Accessibility,
        Bucket::TechSeo,
        Bucket::Ux,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Accessibility => "accessibility",
            Self::TechSeo => "tech_seo",
            Self::Ux => "ux",
        }
    }
}

const EXPLICIT: [(&str, Bucket); 10] = [
    ("Performance & Core Web Vitals", Bucket::Performance),
    ("Website Security Audit", Bucket::Security),
    ("Accessibility Audit (WCAG Standards)", Bucket::Accessibility),
    ("Technical SEO Audit", Bucket::TechSeo),
    ("On-Page SEO Audit", Bucket::TechSeo),
    ("Off-Page SEO & Backlinks", Bucket::TechSeo),
    ("Analytics & Tracking Audit", Bucket::TechSeo),
    ("User Experience (UX) Audit", Bucket::Ux),
    ("Content Audit", Bucket::Ux),
    ("E-Commerce Audit (If applicable)", Bucket::Ux),
];

/// Bucket for a category name: explicit table first, then name substrings.
pub fn bucket_for(category: &str) -> Option<Bucket> {
    if let Some((_, bucket)) = EXPLICIT.iter().find(|(name, _)| *name == category) {
        return Some(*bucket);
    }

    let lower = category.to_lowercase();
    let has_word = |needle: &str| {
        lower
            .split(|ch: char| !ch.is_ascii_alphanumeric())
            .any(|word| word == needle)
    };
    if lower.contains("performance") {
        Some(Bucket::Performance)
    } else if lower.contains("security") {
        Some(Bucket::Security)
    } else if lower.contains("accessibility") {
        Some(Bucket::Accessibility)
    } else if has_word("seo") || lower.contains("analytics") {
        Some(Bucket::TechSeo)
    } else if has_word("ux") || lower.contains("user experience") || lower.contains("content") {
        Some(Bucket::Ux)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketScore {
    pub bucket: Bucket,
    pub score: u32,
    pub passed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketScores {
    pub buckets: Vec<BucketScore>,
    /// Categories that matched no bucket and were left out.
    pub unmapped: Vec<String>,
}

impl BucketScores {
    #[cfg(test)]
    pub fn get(&self, bucket: Bucket) -> u32 {
        self.buckets
            .iter()
            .find(|entry| entry.bucket == bucket)
            .map(|entry| entry.score)
            .unwrap_or(0)
    }
}

pub fn rollup(taxonomy: &Taxonomy, metrics: &MetricMap) -> BucketScores {
    let mut buckets: Vec<BucketScore> = Bucket::ALL
        .iter()
        .map(|bucket| BucketScore {
            bucket: *bucket,
            score: 0,
            passed: 0,
            total: 0,
        })
        .collect();
    let mut unmapped = Vec::new();

    for category in &taxonomy.categories {
        let Some(bucket) = bucket_for(&category.name) else {
            unmapped.push(category.name.clone());
            continue;
        };
        let Some(entry) = buckets.iter_mut().find(|entry| entry.bucket == bucket) else {
            continue;
        };
        entry.total += category.metrics.len();
        entry.passed += category
            .metrics
            .iter()
            .filter(|metric| {
                metrics
                    .get(metric.as_str())
                    .map(|status| status.is_positive())
                    .unwrap_or(false)
            })
            .count();
    }

    for entry in &mut buckets {
        if entry.total > 0 {
            entry.score = (100.0 * entry.passed as f64 / entry.total as f64).round_ties_even() as u32;
        }
    }

    BucketScores { buckets, unmapped }
}
