use crate::record::ClientRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// SearchCriteria
// ---------------------------------------------------------------------------

/// Filters combined with AND. Empty strings count as "not given".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.business_name).is_none()
            && non_empty(&self.industry).is_none()
            && self.date.is_none()
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        if let Some(needle) = non_empty(&self.business_name) {
            if !contains_ci(record.business_name.as_deref(), needle) {
                return false;
            }
        }
        if let Some(needle) = non_empty(&self.industry) {
            if !contains_ci(record.industry.as_deref(), needle) {
                return false;
            }
        }
        if let Some(date) = self.date {
            if record.date != Some(date) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Filtering and ordering
// ---------------------------------------------------------------------------

/// Records matching `criteria`, in their input order. No criteria is a no-op.
pub fn search(records: &[ClientRecord], criteria: &SearchCriteria) -> Vec<ClientRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Listing sort key: file date ascending with undated files first, then file
/// name. Records and raw documents both sort through this key.
pub fn listing_key(date: Option<NaiveDate>, file_name: &str) -> (Option<NaiveDate>, &str) {
    // `None < Some(_)`, so undated files sort as the minimum date.
    (date, file_name)
}

pub fn listing_order(a: &ClientRecord, b: &ClientRecord) -> Ordering {
    listing_key(a.date, &a.source_file).cmp(&listing_key(b.date, &b.source_file))
}

pub fn sort_for_listing(records: &mut [ClientRecord]) {
    records.sort_by(listing_order);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
