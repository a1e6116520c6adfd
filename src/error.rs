use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("unknown metric status: {0}")]
    UnknownStatus(String),

    #[error("duplicate metric name in taxonomy: {metric} (categories {first} and {second})")]
    DuplicateMetric {
        metric: String,
        first: String,
        second: String,
    },

    #[error("duplicate category in taxonomy: {key} (categories {first} and {second})")]
    DuplicateCategory {
        key: String,
        first: String,
        second: String,
    },

    #[error("taxonomy has no categories")]
    EmptyTaxonomy,

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("report not found: {0}")]
    ReportNotFound(u64),

    #[error("report {id} was recorded against taxonomy '{stored}', but '{bound}' is bound")]
    TaxonomyMismatch {
        id: u64,
        stored: String,
        bound: String,
    },

    #[error("corrupt report record: {0}")]
    CorruptRecord(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
