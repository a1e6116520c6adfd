use crate::types::result::AuditResult;
use crate::types::status::Status;

const STYLE: &str = "@page { size: A4; margin: 2cm; } \
body { font-family: sans-serif; } \
table { border-collapse: collapse; } \
td, th { border: 1px solid #ccc; padding: 4px 8px; } \
.excellent { color: #1a7f37; } .good { color: #2f6f9f; } \
.fair { color: #9a6700; } .poor { color: #cf222e; } .na { color: #6e7781; }";

/// Self-contained page, suitable as input for an HTML-to-PDF converter.
pub fn to_html(result: &AuditResult) -> String {
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str(&format!(
        "<title>Website Audit: {}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape(&result.url),
        STYLE
    ));
    output.push_str("<h1>Website Audit Report</h1>\n");
    output.push_str(&format!(
        "<p>URL: {}<br>Taxonomy: {}<br>Audited: {}</p>\n",
        escape(&result.url),
        escape(&result.taxonomy),
        result.audited_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "<p class=\"overall\">Overall score: {:.2}</p>\n",
        result.scores.overall
    ));

    output.push_str("<table>\n<tr><th>Category</th><th>Score</th></tr>\n");
    for entry in &result.scores.categories {
        output.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td></tr>\n",
            escape(&entry.category),
            entry.score
        ));
    }
    output.push_str("</table>\n");

    for category in &result.categories {
        output.push_str(&format!("<h2>{}</h2>\n", escape(&category.name)));
        if !category.description.is_empty() {
            output.push_str(&format!("<p>{}</p>\n", escape(&category.description)));
        }
        output.push_str("<ul>\n");
        for item in &category.items {
            output.push_str(&format!(
                "<li>{} <span class=\"{}\">{}</span><br><small>{}</small></li>\n",
                escape(&item.name),
                status_class(item.status),
                item.status,
                escape(&item.suggestion)
            ));
        }
        output.push_str("</ul>\n");
    }

    output.push_str("</body>\n</html>\n");
    output
}

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Excellent => "excellent",
        Status::Good => "good",
        Status::Fair => "fair",
        Status::Poor => "poor",
        Status::NotApplicable => "na",
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::StoredStatuses;
    use crate::engine::AuditEngine;
    use crate::types::result::MetricMap;
    use crate::types::taxonomy::{Category, Taxonomy};

    fn render(url: &str) -> String {
        let engine = AuditEngine::new(
            Taxonomy::new(
                "tiny",
                vec![Category::new("Performance & Speed", "", &["CSS/JS <minified>"])],
            )
            .expect("taxonomy should build"),
        );
        let mut metrics = MetricMap::new();
        metrics.insert("CSS/JS <minified>".to_string(), Status::Good);
        to_html(&engine.run(url, &mut StoredStatuses::new(&metrics)))
    }

    #[test]
    fn html_report_contains_scores_and_items() {
        let page = render("https://example.com");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Overall score: 50.00"));
        assert!(page.contains("<span class=\"good\">Good</span>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn html_report_escapes_dynamic_text() {
        let page = render("https://example.com/?q=<script>");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("Performance &amp; Speed"));
        assert!(page.contains("CSS/JS &lt;minified&gt;"));
        assert!(page.contains("best practice on &#39;CSS/JS &lt;minified&gt;&#39;"));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape("HTTPS Enabled"), "HTTPS Enabled");
    }
}
