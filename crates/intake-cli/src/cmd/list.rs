use crate::output::{print_json, print_table};
use anyhow::Context;
use std::path::Path;

use super::{client_rows, open_store, CLIENT_HEADERS};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, store) = open_store(root)?;
    let records = store.clients().context("failed to read client files")?;

    if json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No clients found in {}.", store.dir().display());
        return Ok(());
    }

    print_table(CLIENT_HEADERS, client_rows(&records));
    Ok(())
}
