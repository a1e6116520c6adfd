use crate::error::{AuditError, Result};
use crate::report::json::metrics_to_json;
use crate::types::result::{AuditResult, MetricMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// What gets persisted for one audit. Scores are not stored; they are
/// re-derived from `metrics` when the report is viewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: u64,
    pub url: String,
    pub taxonomy: String,
    pub audited_at: DateTime<Utc>,
    pub metrics: MetricMap,
    pub metrics_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, result: &AuditResult) -> Result<StoredReport> {
        fs::create_dir_all(&self.dir).map_err(AuditError::Io)?;
        let id = self.next_id();
        let record = StoredReport {
            id,
            url: result.url.clone(),
            taxonomy: result.taxonomy.clone(),
            audited_at: result.audited_at,
            metrics: result.metrics.clone(),
            metrics_sha256: metrics_digest(&result.metrics)?,
        };
        let json = serde_json::to_string_pretty(&record)?;
        let path = self.record_path(id);
        fs::write(&path, json).map_err(AuditError::Io)?;
        info!(id, url = %record.url, path = %path.display(), "report saved");
        Ok(record)
    }

    pub fn load(&self, id: u64) -> Result<StoredReport> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(AuditError::ReportNotFound(id));
        }
        read_record(&path)
    }

    /// All readable records ordered by id. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<StoredReport>> {
        let mut records = Vec::new();
        for (_, path) in self.record_files() {
            match read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable report"),
            }
        }
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn next_id(&self) -> u64 {
        self.record_files()
            .into_iter()
            .map(|(id, _)| id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("report-{id}.json"))
    }

    fn record_files(&self) -> Vec<(u64, PathBuf)> {
        if !self.dir.exists() {
            return Vec::new();
        }
        WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let id = parse_record_id(entry.file_name().to_str()?)?;
                Some((id, entry.path().to_path_buf()))
            })
            .collect()
    }
}

fn parse_record_id(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix("report-")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

fn read_record(path: &Path) -> Result<StoredReport> {
    let content = fs::read_to_string(path)?;
    let record: StoredReport = serde_json::from_str(&content)
        .map_err(|e| AuditError::CorruptRecord(format!("{}: {}", path.display(), e)))?;
    let digest = metrics_digest(&record.metrics)?;
    if digest != record.metrics_sha256 {
        return Err(AuditError::CorruptRecord(format!(
            "{}: metrics digest mismatch",
            path.display()
        )));
    }
    Ok(record)
}

fn metrics_digest(metrics: &MetricMap) -> Result<String> {
    let canonical = metrics_to_json(metrics)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::RandomSimulator;
    use crate::engine::AuditEngine;
    use crate::types::config::AuditConfig;
    use crate::types::status::Status;
    use crate::types::taxonomy::{Taxonomy, TaxonomyVariant};
    use tempfile::TempDir;

    fn run(url: &str, seed: u64) -> AuditResult {
        let engine = AuditEngine::new(
            Taxonomy::builtin(TaxonomyVariant::Standard).expect("taxonomy should build"),
        );
        let mut sim = RandomSimulator::seeded(seed, &AuditConfig::default().status_weights());
        engine.run(url, &mut sim)
    }

    #[test]
    fn save_assigns_increasing_ids_and_load_returns_record() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ReportStore::new(dir.path().join("reports"));

        let first = store.save(&run("https://a.example", 1)).expect("save should succeed");
        let second = store.save(&run("https://b.example", 2)).expect("save should succeed");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let loaded = store.load(2).expect("load should succeed");
        assert_eq!(loaded, second);
        assert_eq!(loaded.url, "https://b.example");
    }

    #[test]
    fn load_missing_report_is_not_found() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ReportStore::new(dir.path());
        assert!(matches!(store.load(4), Err(AuditError::ReportNotFound(4))));
    }

    #[test]
    fn load_detects_tampered_metrics() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ReportStore::new(dir.path());
        let saved = store.save(&run("https://a.example", 3)).expect("save should succeed");

        let path = dir.path().join("report-1.json");
        let mut record = saved.clone();
        if let Some(status) = record.metrics.values_mut().next() {
            *status = match *status {
                Status::Poor => Status::Excellent,
                _ => Status::Poor,
            };
        }
        fs::write(&path, serde_json::to_string(&record).expect("record should serialize"))
            .expect("record should write");

        let err = store.load(1).expect_err("tampered record should fail");
        assert!(matches!(err, AuditError::CorruptRecord(msg) if msg.contains("digest mismatch")));
    }

    #[test]
    fn list_orders_by_id_and_skips_garbage() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ReportStore::new(dir.path());
        for seed in 1..=3 {
            store
                .save(&run(&format!("https://{seed}.example"), seed))
                .expect("save should succeed");
        }
        fs::write(dir.path().join("report-9.json"), "{ not json").expect("garbage should write");
        fs::write(dir.path().join("notes.txt"), "ignore me").expect("notes should write");

        let records = store.list().expect("list should succeed");
        let ids: Vec<u64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let next = store.save(&run("https://4.example", 4)).expect("save should succeed");
        assert_eq!(next.id, 10);
    }

    #[test]
    fn list_on_missing_dir_is_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = ReportStore::new(dir.path().join("absent"));
        assert!(store.list().expect("list should succeed").is_empty());
    }

    #[test]
    fn parse_record_id_requires_exact_shape() {
        assert_eq!(parse_record_id("report-12.json"), Some(12));
        assert_eq!(parse_record_id("report-x.json"), None);
        assert_eq!(parse_record_id("plan-1.json"), None);
    }
}
