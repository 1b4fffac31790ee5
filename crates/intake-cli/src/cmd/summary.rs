use crate::output::print_json;
use anyhow::Context;
use intake_core::{io::atomic_write, ClientSummary};
use std::path::Path;

use super::open_store;

const NOT_AVAILABLE: &str = "(n/a)";

fn industry(summary: &ClientSummary) -> &str {
    summary
        .most_common_industry
        .as_deref()
        .unwrap_or(NOT_AVAILABLE)
}

fn average(summary: &ClientSummary) -> String {
    summary
        .average_employee_count
        .map(|a| format!("{a:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn render_text(summary: &ClientSummary) -> String {
    let mut out = String::new();
    out.push_str("=== Clients Summary ===\n");
    out.push_str(&format!("Total clients: {}\n", summary.total_count));
    out.push_str(&format!("Most common industry: {}\n", industry(summary)));
    out.push_str(&format!("Average employee count: {}\n", average(summary)));
    out.push_str("\nAll main challenges:\n");
    if summary.all_challenges.is_empty() {
        out.push_str("- (none)\n");
    }
    for c in &summary.all_challenges {
        out.push_str(&format!("- {c}\n"));
    }
    out
}

pub fn render_markdown(summary: &ClientSummary) -> String {
    let mut out = String::new();
    out.push_str("# Clients Summary\n\n");
    out.push_str(&format!("- Total clients: {}\n", summary.total_count));
    out.push_str(&format!("- Most common industry: {}\n", industry(summary)));
    out.push_str(&format!("- Average employee count: {}\n", average(summary)));
    out.push_str("\n## Main Challenges\n\n");
    if summary.all_challenges.is_empty() {
        out.push_str("- (none)\n");
    }
    for c in &summary.all_challenges {
        out.push_str(&format!("- {c}\n"));
    }
    out
}

pub fn run(root: &Path, markdown: bool, out: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (config, store) = open_store(root)?;
    let summary = store.summary().context("failed to summarize clients")?;

    if markdown {
        let path = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.summary_path(root));
        atomic_write(&path, render_markdown(&summary).as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        if json {
            return print_json(&serde_json::json!({
                "path": path,
                "summary": summary,
            }));
        }
        println!("Wrote summary to {}", path.display());
        return Ok(());
    }

    if json {
        return print_json(&summary);
    }
    print!("{}", render_text(&summary));
    Ok(())
}
