use crate::output::print_json;
use anyhow::Context;
use intake_core::fields::as_text;
use serde_json::json;
use std::path::Path;

use super::{format_count, open_store};

pub fn run(root: &Path, file: &str, json: bool) -> anyhow::Result<()> {
    let (_, store) = open_store(root)?;
    let doc = store
        .load(file)
        .with_context(|| format!("cannot show '{file}'"))?;
    let is_client = doc.is_client();
    let record = doc.to_client();

    if json {
        return print_json(&json!({
            "file": doc.file_name,
            "is_client": is_client,
            "client": record,
            "data": doc.data,
        }));
    }

    println!("File:      {}", doc.file_name);
    if !is_client {
        println!("(not recognised as a client record)");
    }
    println!("Business:  {}", record.display_name());
    println!("Contact:   {}", record.contact_name.as_deref().unwrap_or("-"));
    println!("Email:     {}", record.email.as_deref().unwrap_or("-"));
    println!("Industry:  {}", record.industry.as_deref().unwrap_or("-"));
    println!(
        "Employees: {}",
        record
            .employee_count
            .map(format_count)
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(date) = record.date {
        println!("Date:      {date}");
    }
    if !record.main_challenges.is_empty() {
        println!("\nChallenges:");
        for c in &record.main_challenges {
            println!("  - {c}");
        }
    }

    println!("\nStored fields:");
    for (key, value) in &doc.data {
        let text = as_text(value).unwrap_or_else(|| value.to_string());
        println!("  {key}: {text}");
    }
    Ok(())
}
