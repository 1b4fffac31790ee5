use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use intake_core::intake::{parse_employee_count, NewClient};
use serde_json::json;
use std::path::Path;

use super::open_store;

#[derive(Args)]
pub struct AddArgs {
    /// Contact person
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// At least 10 digits; punctuation is ignored
    #[arg(long)]
    pub phone: Option<String>,
    /// Business name (also used for the file name)
    #[arg(long)]
    pub business: String,
    /// Headcount; thousands separators allowed
    #[arg(long)]
    pub employees: String,
    #[arg(long)]
    pub industry: String,
    /// Main challenge; repeat for several
    #[arg(long = "challenge")]
    pub challenges: Vec<String>,
    /// Intake date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

pub fn run(root: &Path, args: AddArgs, json: bool) -> anyhow::Result<()> {
    let employees_count = parse_employee_count(&args.employees)?;
    let client = NewClient {
        contact_name: args.name,
        email: args.email,
        phone: args.phone,
        business_name: args.business,
        employees_count,
        industry: args.industry,
        challenges: args.challenges,
    };

    let date = match args.date.as_deref() {
        Some(d) => intake_core::paths::parse_date(d)
            .with_context(|| format!("invalid --date '{d}'"))?,
        None => chrono::Local::now().date_naive(),
    };

    let (_, store) = open_store(root)?;
    let doc = store
        .create(&client, date)
        .context("failed to save client")?;

    if json {
        return print_json(&json!({
            "file": doc.file_name,
            "path": doc.path,
            "data": doc.data,
        }));
    }

    println!("Saved client '{}' to {}", client.business_name.trim(), doc.path.display());
    Ok(())
}
