use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use intake_core::{paths, SearchCriteria};
use std::path::Path;

use super::{client_rows, open_store, CLIENT_HEADERS};

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring of the business name
    #[arg(long)]
    pub business: Option<String>,
    /// Case-insensitive substring of the industry
    #[arg(long)]
    pub industry: Option<String>,
    /// Intake date (YYYY-MM-DD) as embedded in the file name
    #[arg(long)]
    pub date: Option<String>,
}

impl SearchArgs {
    fn criteria(self) -> anyhow::Result<SearchCriteria> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => Some(paths::parse_date(d).with_context(|| format!("invalid --date '{d}'"))?),
            None => None,
        };
        Ok(SearchCriteria {
            business_name: self.business,
            industry: self.industry,
            date,
        })
    }
}

pub fn run(root: &Path, args: SearchArgs, json: bool) -> anyhow::Result<()> {
    let criteria = args.criteria()?;
    let (_, store) = open_store(root)?;
    let matches = store
        .search(&criteria)
        .context("failed to read client files")?;

    if json {
        return print_json(&matches);
    }

    if matches.is_empty() {
        println!("No matching clients.");
        return Ok(());
    }

    print_table(CLIENT_HEADERS, client_rows(&matches));
    println!("\n{} match(es)", matches.len());
    Ok(())
}
