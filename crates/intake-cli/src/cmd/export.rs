use crate::output::print_json;
use anyhow::Context;
use serde_json::json;
use std::path::Path;

use super::open_store;

pub fn run(root: &Path, out: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (config, store) = open_store(root)?;
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.export_path(root));

    let rows = store
        .export_csv(&path)
        .with_context(|| format!("failed to export to {}", path.display()))?;

    if json {
        return print_json(&json!({ "path": path, "rows": rows }));
    }

    if rows == 0 {
        println!("No clients to export; wrote header-only {}", path.display());
    } else {
        println!("Exported {rows} client(s) to {}", path.display());
    }
    Ok(())
}
