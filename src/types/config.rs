use crate::error::AuditError;
use crate::types::status::Status;
use crate::types::taxonomy::TaxonomyVariant;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_DIR: &str = ".webaudit/reports";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    pub taxonomy: Option<TaxonomyConfig>,
    pub simulation: Option<SimulationConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyConfig {
    pub variant: Option<TaxonomyVariant>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
    pub weights: Option<HashMap<String, u32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

/// Where the engine's taxonomy comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonomySource {
    Builtin(TaxonomyVariant),
    File(PathBuf),
}

const WEIGHT_KEYS: [&str; 5] = ["excellent", "good", "fair", "poor", "not_applicable"];

impl AuditConfig {
    /// Excellent, Good, Fair, Poor, N/A.
    pub fn default_weights() -> [u32; 5] {
        [4, 4, 3, 2, 1]
    }

    pub fn status_weights(&self) -> [(Status, u32); 5] {
        let defaults = Self::default_weights();
        let configured = self
            .simulation
            .as_ref()
            .and_then(|simulation| simulation.weights.as_ref());
        let mut weights = [(Status::Excellent, 0); 5];
        for (slot, ((status, key), default)) in weights
            .iter_mut()
            .zip(Status::ALL.into_iter().zip(WEIGHT_KEYS).zip(defaults))
        {
            let weight = configured
                .and_then(|map| map.get(key).copied())
                .unwrap_or(default);
            *slot = (status, weight);
        }
        weights
    }

    pub fn seed(&self) -> Option<u64> {
        self.simulation.as_ref().and_then(|simulation| simulation.seed)
    }

    pub fn taxonomy_source(&self) -> TaxonomySource {
        match &self.taxonomy {
            Some(TaxonomyConfig {
                path: Some(path), ..
            }) => TaxonomySource::File(path.clone()),
            Some(TaxonomyConfig {
                variant: Some(variant),
                ..
            }) => TaxonomySource::Builtin(*variant),
            _ => TaxonomySource::Builtin(TaxonomyVariant::Standard),
        }
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|storage| storage.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if let Some(taxonomy) = &self.taxonomy {
            if taxonomy.variant.is_some() && taxonomy.path.is_some() {
                return Err(AuditError::ConfigParse(
                    "taxonomy.variant and taxonomy.path cannot both be set".to_string(),
                ));
            }
        }

        if let Some(weights) = self
            .simulation
            .as_ref()
            .and_then(|simulation| simulation.weights.as_ref())
        {
            let mut unknown = weights
                .keys()
                .filter(|key| !WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(AuditError::ConfigParse(format!(
                    "simulation.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let total: u64 = self
            .status_weights()
            .iter()
            .map(|(_, weight)| u64::from(*weight))
            .sum();
        if total == 0 {
            return Err(AuditError::ConfigParse(
                "simulation.weights must contain at least one positive weight".to_string(),
            ));
        }

        if let Some(dir) = self.storage.as_ref().and_then(|storage| storage.dir.as_ref()) {
            if dir.as_os_str().is_empty() {
                return Err(AuditError::ConfigParse(
                    "storage.dir must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
