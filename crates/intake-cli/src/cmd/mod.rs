pub mod add;
pub mod config;
pub mod export;
pub mod list;
pub mod report;
pub mod search;
pub mod show;
pub mod summary;
pub mod update;

use anyhow::Context;
use intake_core::{config::Config, ClientRecord, ClientStore};
use std::path::Path;

/// Load `intake.yaml` (defaults when absent) and open the clients directory.
pub(crate) fn open_store(root: &Path) -> anyhow::Result<(Config, ClientStore)> {
    let config = Config::load(root).context("failed to load intake.yaml")?;
    let store = ClientStore::new(config.clients_dir(root));
    Ok((config, store))
}

pub(crate) fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// One table row per client, shared by `list` and `search`.
pub(crate) fn client_rows(records: &[ClientRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.source_file.clone(),
                r.date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                opt(r.business_name.as_deref()),
                opt(r.contact_name.as_deref()),
                opt(r.industry.as_deref()),
                r.employee_count
                    .map(format_count)
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

pub(crate) const CLIENT_HEADERS: &[&str] =
    &["FILE", "DATE", "BUSINESS", "CONTACT", "INDUSTRY", "EMPLOYEES"];

/// Whole counts print without a fractional part.
pub(crate) fn format_count(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
