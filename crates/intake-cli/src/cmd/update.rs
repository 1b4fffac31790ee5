use crate::output::print_json;
use anyhow::{bail, Context};
use intake_core::fields::RawRecord;
use serde_json::Value;
use std::path::Path;

use super::open_store;

/// Parse `KEY=VALUE` pairs. VALUE is read as JSON (`42`, `true`, `["a"]`,
/// `null`) when it parses, and kept as a plain string otherwise.
pub fn parse_assignments(pairs: &[String]) -> anyhow::Result<RawRecord> {
    let mut updates = RawRecord::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid --set '{pair}': expected KEY=VALUE");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid --set '{pair}': key is empty");
        }
        let value = serde_json::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        updates.insert(key.to_string(), value);
    }
    Ok(updates)
}

pub fn run(root: &Path, file: &str, set: &[String], json: bool) -> anyhow::Result<()> {
    let updates = parse_assignments(set)?;
    let (_, store) = open_store(root)?;
    let record = store
        .update(file, &updates)
        .with_context(|| format!("failed to update '{file}'"))?;

    if json {
        return print_json(&record);
    }

    if updates.is_empty() {
        println!("Rewrote {file} (no fields changed)");
    } else {
        let keys: Vec<&str> = updates.keys().map(String::as_str).collect();
        println!("Updated {file}: {}", keys.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_parse_as_json_when_possible() {
        let updates = parse_assignments(&[
            "employees_count=42".to_string(),
            "industry=Retail".to_string(),
            "active=true".to_string(),
            "tags=[\"a\",\"b\"]".to_string(),
            "note=a=b".to_string(),
        ])
        .unwrap();
        assert_eq!(updates["employees_count"], json!(42));
        assert_eq!(updates["industry"], json!("Retail"));
        assert_eq!(updates["active"], json!(true));
        assert_eq!(updates["tags"], json!(["a", "b"]));
        assert_eq!(updates["note"], json!("a=b"));
    }

    #[test]
    fn rejects_missing_separator_or_key() {
        assert!(parse_assignments(&["industry".to_string()]).is_err());
        assert!(parse_assignments(&["=Retail".to_string()]).is_err());
    }

    #[test]
    fn empty_value_is_empty_string() {
        let updates = parse_assignments(&["industry=".to_string()]).unwrap();
        assert_eq!(updates["industry"], json!(""));
    }
}
