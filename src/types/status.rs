use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of evaluating one metric for one audit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Excellent,
        Status::Good,
        Status::Fair,
        Status::Poor,
        Status::NotApplicable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NotApplicable => "N/A",
        }
    }

    /// Credit toward a category score, or `None` when the metric is left out
    /// of the denominator.
    pub fn credit(self) -> Option<f64> {
        match self {
            Self::Excellent => Some(1.0),
            Self::Good => Some(0.5),
            Self::Fair | Self::Poor => Some(0.0),
            Self::NotApplicable => None,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AuditError::UnknownStatus(s.to_string()))
    }
}
