use crate::error::AuditError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "webaudit",
    version,
    about = "Website audit evaluation and scoring CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory holding webaudit.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Override the configured taxonomy variant
    #[arg(long = "taxonomy", global = true, value_enum)]
    pub taxonomy_variant: Option<TaxonomyArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a URL and print the report
    Run(RunCommand),
    /// Print the bound taxonomy
    Taxonomy(TaxonomyCommand),
    /// Score a stored metric map (JSON object of metric name to status)
    Rescore(RescoreCommand),
    /// List saved reports
    List(ListCommand),
    /// Render a saved report
    Show(ShowCommand),
    /// Write a saved report to <subject>_<id>.<ext>
    Export(ExportCommand),
    /// Five-bucket roll-up of a metric map
    Buckets(BucketsCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TaxonomyArg {
    Standard,
    Extended,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Html,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ListingFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct RunCommand {
    pub url: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Seed for reproducible simulated statuses
    #[arg(long)]
    pub seed: Option<u64>,
    /// Save the report to the history directory
    #[arg(long)]
    pub save: bool,
}

#[derive(Args)]
pub struct TaxonomyCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ListingFormat,
}

#[derive(Args)]
pub struct RescoreCommand {
    pub file: PathBuf,
    /// Audited site to show in the report (defaults to a file:// URL of the map)
    #[arg(long)]
    pub url: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ListCommand {}

#[derive(Args)]
pub struct ShowCommand {
    pub id: u64,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ExportCommand {
    pub id: u64,
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: ReportFormat,
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct BucketsCommand {
    pub file: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ListingFormat,
}

/// Accepts only absolute `http`/`https` URLs with a host.
pub fn validate_target_url(url: &str) -> Result<(), AuditError> {
    let trimmed = url.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| AuditError::InvalidUrl(format!("{url}: scheme must be http or https")))?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(AuditError::InvalidUrl(format!("{url}: missing host")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_target_url_accepts_http_and_https() {
        assert!(validate_target_url("https://example.com").is_ok());
        assert!(validate_target_url("http://localhost:8080/path?q=1").is_ok());
    }

    #[test]
    fn validate_target_url_rejects_other_schemes_and_missing_hosts() {
        for bad in ["example.com", "ftp://example.com", "https://", "https:///path", "http://:80"] {
            let err = validate_target_url(bad).expect_err("url should be rejected");
            assert!(matches!(err, AuditError::InvalidUrl(_)), "{bad}");
        }
    }
}
