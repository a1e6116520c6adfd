use crate::engine::buckets::BucketScores;
use crate::types::result::AuditResult;
use crate::types::taxonomy::Taxonomy;

pub fn to_markdown(result: &AuditResult) -> String {
    let mut output = String::new();
    output.push_str("# Website Audit Report\n\n");
    output.push_str(&format!("- URL: {}\n", result.url));
    output.push_str(&format!("- Taxonomy: {}\n", result.taxonomy));
    output.push_str(&format!("- Audited: {}\n\n", result.audited_at.to_rfc3339()));
    output.push_str(&format!("Overall score: {:.2}\n\n", result.scores.overall));

    output.push_str("## Category Scores\n\n");
    output.push_str("| Category | Score | Scored metrics |\n|---|---:|---:|\n");
    for entry in &result.scores.categories {
        output.push_str(&format!(
            "| {} | {:.2} | {} |\n",
            entry.category, entry.score, entry.scored_metrics
        ));
    }
    output.push('\n');

    for category in &result.categories {
        output.push_str(&format!("## {}\n\n", category.name));
        if !category.description.is_empty() {
            output.push_str(&format!("{}\n\n", category.description));
        }
        for item in &category.items {
            output.push_str(&format!(
                "- {} [{}]: {}\n",
                item.name, item.status, item.suggestion
            ));
        }
        output.push('\n');
    }

    output
}

pub fn taxonomy_to_markdown(taxonomy: &Taxonomy) -> String {
    let mut output = format!(
        "# Taxonomy: {} ({} categories, {} metrics)\n\n",
        taxonomy.name,
        taxonomy.categories.len(),
        taxonomy.metric_count()
    );
    for category in &taxonomy.categories {
        output.push_str(&format!("## {} (`{}`)\n\n", category.name, category.key()));
        if !category.description.is_empty() {
            output.push_str(&format!("{}\n\n", category.description));
        }
        for metric in &category.metrics {
            output.push_str(&format!("- {metric}\n"));
        }
        output.push('\n');
    }
    output
}

pub fn buckets_to_markdown(scores: &BucketScores) -> String {
    let mut output = String::from("# Bucket Scores\n\n| Bucket | Score | Passed | Total |\n|---|---:|---:|---:|\n");
    for entry in &scores.buckets {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.bucket.as_str(),
            entry.score,
            entry.passed,
            entry.total
        ));
    }
    if !scores.unmapped.is_empty() {
        output.push_str(&format!("\nUnmapped categories: {}\n", scores.unmapped.join(", ")));
    }
    output
}
