use crate::output::print_json;
use anyhow::Context;
use intake_core::report::{load_template, Report};
use serde_json::json;
use std::path::Path;

use super::open_store;

pub fn run(
    root: &Path,
    file: &str,
    template: Option<&Path>,
    out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let (config, store) = open_store(root)?;
    let doc = store
        .load(file)
        .with_context(|| format!("cannot report on '{file}'"))?;

    let template_path = template
        .map(Path::to_path_buf)
        .or_else(|| config.template_path(root));
    let template = load_template(template_path.as_deref())?;

    let report = Report::render(&doc, &template, chrono::Local::now().date_naive());
    let path = report
        .write(&config.reports_dir(root), out)
        .context("failed to write report")?;

    if json {
        return print_json(&json!({
            "path": path,
            "business_name": report.context.business_name,
            "fired": report.analysis.fired,
        }));
    }

    println!("Wrote report for {} to {}", report.context.business_name, path.display());
    Ok(())
}
