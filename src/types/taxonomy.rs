use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub metrics: Vec<String>,
}

impl Category {
    pub fn new(name: &str, description: &str, metrics: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            metrics: metrics.iter().map(|metric| metric.to_string()).collect(),
        }
    }

    /// Snake-case key used for score fields, e.g. `best_practices`.
    pub fn key(&self) -> String {
        category_key(&self.name)
    }
}

pub fn category_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyVariant {
    /// Five categories, nine metrics each.
    Standard,
    /// Ten service-style categories.
    Extended,
}

impl TaxonomyVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }

    /// Built-in variant whose taxonomy carries `name`, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::Standard),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }
}

/// Immutable category table. Category keys and metric names are unique
/// across the whole table.
#[derive(Debug, Clone, Serialize)]
pub struct Taxonomy {
    pub name: String,
    pub categories: Vec<Category>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    name: Option<String>,
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn new(name: impl Into<String>, categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(AuditError::EmptyTaxonomy);
        }

        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut index = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            if let Some(existing) = keys.insert(category.key(), position) {
                return Err(AuditError::DuplicateCategory {
                    key: category.key(),
                    first: categories[existing].name.clone(),
                    second: category.name.clone(),
                });
            }
            for metric in &category.metrics {
                if let Some(existing) = index.insert(metric.clone(), position) {
                    return Err(AuditError::DuplicateMetric {
                        metric: metric.clone(),
                        first: categories[existing].name.clone(),
                        second: category.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.into(),
            categories,
            index,
        })
    }

    pub fn builtin(variant: TaxonomyVariant) -> Result<Self> {
        let table = match variant {
            TaxonomyVariant::Standard => STANDARD,
            TaxonomyVariant::Extended => EXTENDED,
        };
        let categories = table
            .iter()
            .map(|(name, description, metrics)| Category::new(name, description, metrics))
            .collect();
        Self::new(variant.as_str(), categories)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)?;
        Self::new(file.name.unwrap_or_else(|| "custom".to_string()), file.categories)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AuditError::Toml(inner) => {
                AuditError::ConfigParse(format!("{}: {}", path.display(), inner))
            }
            other => other,
        })
    }

    pub fn category_of(&self, metric: &str) -> Option<&Category> {
        self.index
            .get(metric)
            .and_then(|position| self.categories.get(*position))
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|category| category.metrics.iter().map(String::as_str))
    }

    pub fn metric_count(&self) -> usize {
        self.index.len()
    }
}

type CategoryRow = (&'static str, &'static str, &'static [&'static str]);

const STANDARD: &[CategoryRow] = &[
    (
        "Performance",
        "Measures speed, responsiveness, and optimization of the website.",
        &[
            "First Contentful Paint",
            "Largest Contentful Paint",
            "Cumulative Layout Shift",
            "Speed Index",
            "Time to Interactive",
            "Total Blocking Time",
            "Server Response Time",
            "Resource Compression",
            "Image Optimization",
        ],
    ),
    (
        "Security",
        "Checks security standards and vulnerability risks.",
        &[
            "HTTPS Enabled",
            "Secure Cookies",
            "Content Security Policy",
            "No Mixed Content",
            "XSS Protection",
            "SQL Injection Protection",
            "Password Strength Enforcement",
            "CSRF Protection",
            "Firewall Active",
        ],
    ),
    (
        "Accessibility",
        "Evaluates website accessibility for all users.",
        &[
            "Alt Text on Images",
            "Contrast Ratio",
            "ARIA Roles",
            "Keyboard Navigation",
            "Form Labels",
            "Error Identification",
            "Heading Structure",
            "Link Purpose Clear",
            "Page Language Specified",
        ],
    ),
    (
        "SEO",
        "Search engine optimization compliance.",
        &[
            "Meta Description",
            "Title Tag Length",
            "Heading Tags",
            "Canonical Tags",
            "XML Sitemap",
            "Robots.txt Presence",
            "Mobile Friendly",
            "Structured Data",
            "Alt Attributes for Images",
        ],
    ),
    (
        "Best Practices",
        "General best practices for modern websites.",
        &[
            "HTTPS Redirects",
            "No Deprecated APIs",
            "Responsive Design",
            "Error Page Handling",
            "Favicon Present",
            "Console Errors Free",
            "Secure External Scripts",
            "Lazy Loading",
            "Clean Code Structure",
        ],
    ),
];

const EXTENDED: &[CategoryRow] = &[
    (
        "Technical SEO Audit",
        "A technical assessment of how search engines crawl and index the site.",
        &[
            "Crawlability (robots.txt, sitemap, crawl errors)",
            "Indexability (noindex tags, canonicals, duplicate pages)",
            "Internal linking (broken links, orphan pages, link depth)",
            "Redirects (301/302, redirect loops, chains)",
            "URL structure and site architecture",
        ],
    ),
    (
        "Performance & Core Web Vitals",
        "Evaluates how fast pages load and respond on real devices.",
        &[
            "Core Web Vitals (LCP, INP/FID, CLS)",
            "Page speed & load time",
            "Server performance (TTFB)",
            "Image optimization (compression, WebP)",
            "CSS/JS optimization",
            "CDN, caching, lazy loading",
            "Mobile performance",
        ],
    ),
    (
        "On-Page SEO Audit",
        "Focuses on individual page content and markup.",
        &[
            "Meta tags",
            "Content quality",
            "Duplicate/thin content",
            "Image SEO",
            "Structured data",
            "Readability",
        ],
    ),
    (
        "User Experience (UX) Audit",
        "Analyzes how real users navigate and convert.",
        &[
            "Navigation usability",
            "Mobile experience",
            "Readability (layout and typography)",
            "Conversion optimization",
            "Visual consistency",
        ],
    ),
    (
        "Website Security Audit",
        "Ensures the website is safe for visitors and operators.",
        &[
            "HTTPS & SSL",
            "Mixed content",
            "Malware checks",
            "Plugin updates",
            "Firewall",
            "Backups",
        ],
    ),
    (
        "Accessibility Audit (WCAG Standards)",
        "Ensures people with disabilities can use the website.",
        &[
            "Color contrast",
            "ALT text",
            "Keyboard nav",
            "Screen reader",
            "ARIA labels",
            "Semantic HTML",
        ],
    ),
    (
        "Content Audit",
        "Reviews the entire content inventory of the website.",
        &[
            "Uniqueness",
            "Relevance",
            "Outdated content",
            "Engagement metrics",
            "Content gaps",
        ],
    ),
    (
        "Off-Page SEO & Backlinks",
        "Analyzes the site's reputation across the web.",
        &[
            "Backlink profile quality",
            "Toxic/spam link detection",
            "Local SEO signals",
            "NAP consistency",
            "Brand mentions",
        ],
    ),
    (
        "Analytics & Tracking Audit",
        "Checks that the website has accurate measurement in place.",
        &[
            "Google Analytics / GA4 setup",
            "Goals, events, and conversions",
            "Heatmap & behavior tools",
            "Tag Manager correctness",
            "No duplicate tracking codes",
        ],
    ),
    (
        "E-Commerce Audit (If applicable)",
        "For online stores: product, cart, and checkout health.",
        &[
            "Product page optimization",
            "Checkout flow usability",
            "Cart abandonment issues",
            "Payment gateway reliability",
            "Inventory & pricing visibility",
        ],
    ),
];
