pub mod html;
pub mod json;
pub mod md;

use crate::error::AuditError;
use crate::types::result::AuditResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Md => "md",
            Self::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Md => "text/markdown; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn render(result: &AuditResult, format: OutputFormat) -> Result<String, AuditError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(AuditError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
        OutputFormat::Html => Ok(html::to_html(result)),
    }
}

/// `<subject>_<id>.<extension>`, where subject is the audited host with
/// anything outside `[A-Za-z0-9.-]` replaced by `_`.
pub fn export_filename(url: &str, id: u64, extension: &str) -> String {
    format!("{}_{}.{}", export_subject(url), id, extension)
}

pub fn export_subject(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.rsplit('@').next().unwrap_or(host);
    let subject: String = host
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if subject.is_empty() {
        "report".to_string()
    } else {
        subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filename_uses_sanitised_host() {
        assert_eq!(
            export_filename("https://www.example.com/path?q=1", 7, "pdf"),
            "www.example.com_7.pdf"
        );
        assert_eq!(
            export_filename("http://user@localhost:8080/", 12, "html"),
            "localhost_8080_12.html"
        );
        assert_eq!(export_filename("", 1, "md"), "report_1.md");
    }

    #[test]
    fn formats_expose_content_types() {
        assert_eq!(OutputFormat::Html.content_type(), "text/html; charset=utf-8");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(PDF_CONTENT_TYPE, "application/pdf");
    }
}
