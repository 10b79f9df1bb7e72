use nr_core::Report;

/// Render the human-readable artifact for a report. Reconstructed from
/// the same fields as the JSON artifact, never cached.
pub fn render_markdown(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Topic: {}", report.topic));
    lines.push(String::new());
    lines.push(format!("Generated at: {}", report.generated_at.to_rfc3339()));
    lines.push(format!("Articles: {}", report.article_count));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(report.summary.clone());
    lines.push(String::new());
    lines.push("## Key takeaways".to_string());
    lines.push(String::new());
    for item in &report.key_takeaways {
        lines.push(format!("- {}", item));
    }
    lines.push(String::new());
    lines.push("## Organizations / Terms".to_string());
    lines.push(String::new());
    for item in &report.organizations_and_terms {
        lines.push(format!("- {}", item));
    }
    lines.push(String::new());
    lines.push("## Articles".to_string());
    lines.push(String::new());
    for article in &report.articles {
        lines.push(format!(
            "- {} ({}) - {}",
            article.title, article.source, article.url
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}
