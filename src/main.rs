mod cli;
mod config;
mod engine;
mod error;
mod report;
mod store;
mod telemetry;
mod types;

use crate::engine::evaluator::{RandomSimulator, SimpleRng};
use crate::engine::AuditEngine;
use crate::error::AuditError;
use crate::store::{ReportStore, StoredReport};
use crate::types::result::{AuditResult, MetricMap};
use crate::types::taxonomy::{Taxonomy, TaxonomyVariant};
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Html => report::OutputFormat::Html,
    }
}

fn read_metric_map(path: &Path) -> Result<MetricMap, AuditError> {
    let content = std::fs::read_to_string(path)?;
    let metrics = report::json::metrics_from_json(&content)?;
    Ok(metrics)
}

fn warn_unknown_metrics(taxonomy: &Taxonomy, metrics: &MetricMap) {
    let unknown = metrics
        .keys()
        .filter(|name| taxonomy.category_of(name).is_none())
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        warn!(
            taxonomy = %taxonomy.name,
            unknown = %unknown.join(", "),
            "metrics outside the taxonomy are ignored"
        );
    }

    let missing = taxonomy
        .metric_names()
        .filter(|name| !metrics.contains_key(*name))
        .count();
    if missing > 0 {
        info!(
            taxonomy = %taxonomy.name,
            missing,
            "taxonomy metrics absent from the map are scored as N/A"
        );
    }
}

/// Rebuilds a saved report under the taxonomy it was recorded with. Built-in
/// variants are reconstructed on demand; any other name must match the bound
/// taxonomy.
fn rebuild_stored(engine: &AuditEngine, record: &StoredReport) -> Result<AuditResult, AuditError> {
    if record.taxonomy == engine.taxonomy().name {
        return Ok(engine.rebuild(&record.url, record.audited_at, &record.metrics));
    }

    let Some(variant) = TaxonomyVariant::from_name(&record.taxonomy) else {
        return Err(AuditError::TaxonomyMismatch {
            id: record.id,
            stored: record.taxonomy.clone(),
            bound: engine.taxonomy().name.clone(),
        });
    };
    debug!(
        id = record.id,
        stored = %record.taxonomy,
        bound = %engine.taxonomy().name,
        "rebuilding report under its recorded taxonomy"
    );
    let recorded = AuditEngine::new(Taxonomy::builtin(variant)?);
    Ok(recorded.rebuild(&record.url, record.audited_at, &record.metrics))
}

fn run() -> Result<i32, AuditError> {
    let cli = cli::Cli::parse();
    telemetry::init_tracing(cli.log_json, telemetry::level_for(cli.verbose, cli.quiet));

    let cfg = config::load_config(&cli.config_dir)?;
    let taxonomy = match cli.taxonomy_variant {
        Some(cli::TaxonomyArg::Standard) => Taxonomy::builtin(TaxonomyVariant::Standard)?,
        Some(cli::TaxonomyArg::Extended) => Taxonomy::builtin(TaxonomyVariant::Extended)?,
        None => config::load_taxonomy(&cfg)?,
    };
    let engine = AuditEngine::new(taxonomy);
    let store = ReportStore::new(config::storage_dir(&cli.config_dir, &cfg));

    match cli.command {
        cli::Commands::Run(cmd) => {
            cli::validate_target_url(&cmd.url)?;
            let weights = cfg.status_weights();
            let mut simulator = match cmd.seed.or_else(|| cfg.seed()) {
                Some(seed) => RandomSimulator::seeded(seed, &weights),
                None => RandomSimulator::new(SimpleRng::from_clock(), &weights),
            };
            let result = engine.run(cmd.url.trim(), &mut simulator);

            let rendered = report::render(&result, output_format(cmd.format))?;
            println!("{rendered}");

            if cmd.save {
                let record = store.save(&result)?;
                eprintln!("saved report {} to {}", record.id, store.dir().display());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Taxonomy(cmd) => {
            let rendered = match cmd.format {
                cli::ListingFormat::Json => serde_json::to_string_pretty(engine.taxonomy())?,
                cli::ListingFormat::Md => report::md::taxonomy_to_markdown(engine.taxonomy()),
            };
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Rescore(cmd) => {
            let url = match &cmd.url {
                Some(url) => {
                    cli::validate_target_url(url)?;
                    url.trim().to_string()
                }
                None => format!("file://{}", cmd.file.display()),
            };
            let metrics = read_metric_map(&cmd.file)?;
            warn_unknown_metrics(engine.taxonomy(), &metrics);
            let result = engine.rebuild(&url, Utc::now(), &metrics);
            let rendered = report::render(&result, output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::List(_) => {
            let records = store.list()?;
            if records.is_empty() {
                println!("list: no saved reports");
                return Ok(exit_code::SUCCESS);
            }
            println!("reports:");
            for record in &records {
                let overall = match rebuild_stored(&engine, record) {
                    Ok(result) => format!("{:.2}", result.scores.overall),
                    Err(AuditError::TaxonomyMismatch { stored, .. }) => {
                        format!("unavailable (taxonomy '{stored}' not bound)")
                    }
                    Err(e) => return Err(e),
                };
                println!(
                    "- {} [{}] {} overall {}",
                    record.id,
                    record.audited_at.format("%Y-%m-%d %H:%M"),
                    record.url,
                    overall
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Show(cmd) => {
            let record = store.load(cmd.id)?;
            let result = rebuild_stored(&engine, &record)?;
            let rendered = report::render(&result, output_format(cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Export(cmd) => {
            let record = store.load(cmd.id)?;
            let result = rebuild_stored(&engine, &record)?;
            let format = output_format(cmd.format);
            let rendered = report::render(&result, format)?;

            std::fs::create_dir_all(&cmd.out)?;
            let path = cmd
                .out
                .join(report::export_filename(&record.url, record.id, format.extension()));
            std::fs::write(&path, rendered)?;
            println!("exported: {}", path.display());
            println!("content-type: {}", format.content_type());
            if matches!(format, report::OutputFormat::Html) {
                println!(
                    "pdf: convert to {} as {}",
                    report::export_filename(&record.url, record.id, "pdf"),
                    report::PDF_CONTENT_TYPE
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Buckets(cmd) => {
            let metrics = read_metric_map(&cmd.file)?;
            warn_unknown_metrics(engine.taxonomy(), &metrics);
            let scores = engine::buckets::rollup(engine.taxonomy(), &metrics);
            let rendered = match cmd.format {
                cli::ListingFormat::Json => serde_json::to_string_pretty(&scores)?,
                cli::ListingFormat::Md => report::md::buckets_to_markdown(&scores),
            };
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
