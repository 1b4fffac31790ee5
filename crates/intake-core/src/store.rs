use crate::error::{IntakeError, Result};
use crate::fields::RawRecord;
use crate::intake::NewClient;
use crate::paths;
use crate::record::{ClientRecord, StoredDocument};
use crate::search::{self, SearchCriteria};
use crate::summary::{self, ClientSummary};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Flat directory of client JSON files.
///
/// There is no locking: one process at a time is assumed to write. Two
/// concurrent writers to the same file race, and the last rename wins.
#[derive(Debug, Clone)]
pub struct ClientStore {
    dir: PathBuf,
}

impl ClientStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf> {
        paths::validate_file_name(file_name)?;
        Ok(self.dir.join(file_name))
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    /// Every parseable JSON object in the directory, in directory order.
    ///
    /// Unreadable files, invalid JSON and non-object roots are skipped with a
    /// warning; one bad file never stops the scan. A missing directory is an
    /// empty store.
    pub fn documents(&self) -> Result<Vec<StoredDocument>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        dir = %self.dir.display(),
                        error = %e,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !paths::is_record_file(&path) {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            match read_document(&path, &file_name) {
                Ok(data) => docs.push(StoredDocument {
                    file_name,
                    path,
                    data,
                }),
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "skipping client file");
                }
            }
        }
        Ok(docs)
    }

    /// Documents that classify as clients, in listing order.
    pub fn client_documents(&self) -> Result<Vec<StoredDocument>> {
        let mut docs: Vec<StoredDocument> = self
            .documents()?
            .into_iter()
            .filter(StoredDocument::is_client)
            .collect();
        docs.sort_by(|a, b| a.listing_key().cmp(&b.listing_key()));
        Ok(docs)
    }

    /// Canonical client records, in listing order.
    pub fn clients(&self) -> Result<Vec<ClientRecord>> {
        let mut records: Vec<ClientRecord> = self
            .documents()?
            .iter()
            .filter(|d| d.is_client())
            .map(StoredDocument::to_client)
            .collect();
        search::sort_for_listing(&mut records);
        tracing::debug!(dir = %self.dir.display(), count = records.len(), "loaded clients");
        Ok(records)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ClientRecord>> {
        Ok(search::search(&self.clients()?, criteria))
    }

    pub fn summary(&self) -> Result<ClientSummary> {
        Ok(summary::summarize(&self.clients()?))
    }

    /// Load one named document. Unlike the bulk scan, a bad file here is an
    /// error.
    pub fn load(&self, file_name: &str) -> Result<StoredDocument> {
        let path = self.path_for(file_name)?;
        if !path.is_file() {
            return Err(IntakeError::NotFound(file_name.to_string()));
        }
        let data = read_document(&path, file_name)?;
        Ok(StoredDocument {
            file_name: file_name.to_string(),
            path,
            data,
        })
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    /// Shallow-merge `updates` into a stored document and write it back.
    ///
    /// Existing keys are overwritten in place, new keys are appended, and keys
    /// not named in `updates` are kept as they were. The write is atomic.
    pub fn update(&self, file_name: &str, updates: &RawRecord) -> Result<ClientRecord> {
        let mut doc = self.load(file_name)?;
        for (key, value) in updates {
            doc.data.insert(key.clone(), value.clone());
        }
        crate::io::write_json(&doc.path, &doc.data)?;
        tracing::info!(file = %file_name, keys = updates.len(), "updated client file");
        Ok(doc.to_client())
    }

    /// Write a new intake record as `{slug}-{date}.json`. Refuses to replace an
    /// existing file.
    pub fn create(&self, client: &NewClient, date: NaiveDate) -> Result<StoredDocument> {
        client.validate()?;
        let file_name = paths::record_file_name(&paths::slugify(&client.business_name), date);
        let path = self.path_for(&file_name)?;
        if path.exists() {
            return Err(IntakeError::ClientExists(file_name));
        }
        let data = client.to_raw();
        crate::io::write_json(&path, &data)?;
        tracing::info!(file = %file_name, "saved new client");
        Ok(StoredDocument {
            file_name,
            path,
            data,
        })
    }

    /// Flatten every client document into a CSV file.
    ///
    /// Columns are `filename` followed by the sorted union of all raw keys, so
    /// records from different producers line up in one sheet.
    pub fn export_csv(&self, out: &Path) -> Result<usize> {
        let docs = self.client_documents()?;

        let keys: BTreeSet<&str> = docs
            .iter()
            .flat_map(|d| d.data.keys().map(String::as_str))
            .collect();

        let mut header = vec!["filename"];
        header.extend(keys.iter().copied());

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&header)?;
        for doc in &docs {
            let mut row = vec![doc.file_name.clone()];
            row.extend(keys.iter().map(|k| csv_cell(doc.data.get(*k))));
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| IntakeError::Io(std::io::Error::other(e.to_string())))?;

        crate::io::atomic_write(out, &bytes)?;
        tracing::info!(path = %out.display(), rows = docs.len(), "exported clients");
        Ok(docs.len())
    }
}

fn read_document(path: &Path, file_name: &str) -> Result<RawRecord> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IntakeError::Malformed {
        file: file_name.to_string(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(IntakeError::Malformed {
            file: file_name.to_string(),
            reason: "root of JSON must be an object".to_string(),
        }),
    }
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
