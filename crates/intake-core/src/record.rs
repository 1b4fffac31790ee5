use crate::fields::{self, CanonicalField, RawRecord};
use crate::paths;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Truthiness of a stored value: null, `""`, `false`, `0`, `[]` and `{}` count
/// as not filled in.
fn is_filled(raw: &RawRecord, key: &str) -> bool {
    match raw.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}

/// Soft classification of a stored document as a client record.
///
/// Accepts the contact-style shape (`name` + `business_name`) and the
/// analyzer-style shape (`business_name` plus an `employees_count` or
/// `industry` key). This is a presence heuristic, not schema validation.
pub fn is_client_record(raw: &RawRecord) -> bool {
    if !is_filled(raw, "business_name") {
        return false;
    }
    is_filled(raw, "name") || raw.contains_key("employees_count") || raw.contains_key("industry")
}

// ---------------------------------------------------------------------------
// ClientRecord (canonical view)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub source_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// `None` both when no count was recorded and when it does not parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<f64>,
    #[serde(default)]
    pub main_challenges: Vec<String>,
    /// Date embedded in the file name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ClientRecord {
    /// Normalize a raw document. Pure: the same input always yields the same
    /// record.
    pub fn from_raw(source_file: impl Into<String>, raw: &RawRecord) -> Self {
        let source_file = source_file.into();
        let text = |field| fields::extract(raw, field).and_then(fields::as_text);
        Self {
            date: paths::date_from_file_name(&source_file),
            business_name: text(CanonicalField::BusinessName),
            contact_name: text(CanonicalField::ContactName),
            email: text(CanonicalField::Email),
            industry: text(CanonicalField::Industry),
            employee_count: fields::extract(raw, CanonicalField::EmployeeCount)
                .and_then(fields::as_number),
            main_challenges: fields::extract_challenges(raw),
            source_file,
        }
    }

    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or("(unknown)")
    }
}

// ---------------------------------------------------------------------------
// StoredDocument
// ---------------------------------------------------------------------------

/// One parsed file of the clients directory.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub file_name: String,
    pub path: PathBuf,
    pub data: RawRecord,
}

impl StoredDocument {
    pub fn date(&self) -> Option<NaiveDate> {
        paths::date_from_file_name(&self.file_name)
    }

    pub fn is_client(&self) -> bool {
        is_client_record(&self.data)
    }

    pub fn listing_key(&self) -> (Option<NaiveDate>, &str) {
        crate::search::listing_key(self.date(), &self.file_name)
    }

    pub fn to_client(&self) -> ClientRecord {
        ClientRecord::from_raw(&self.file_name, &self.data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawRecord {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn contact_shape_is_client() {
        assert!(is_client_record(&raw(json!({
            "name": "Jane", "business_name": "Acme"
        }))));
    }

    #[test]
    fn analyzer_shape_is_client() {
        assert!(is_client_record(&raw(json!({
            "business_name": "Acme", "industry": "Retail"
        }))));
        // Key presence is enough for the secondary attribute.
        assert!(is_client_record(&raw(json!({
            "business_name": "Acme", "employees_count": null
        }))));
    }

    #[test]
    fn non_clients_are_rejected() {
        for doc in [
            json!({}),
            json!({ "name": "Jane" }),
            json!({ "business_name": "Acme" }),
            json!({ "business_name": "", "name": "Jane", "industry": "Retail" }),
            json!({ "business": "Acme", "industry": "Retail" }),
            json!({ "business_name": "Acme", "employees": 10 }),
            json!({ "business_name": "Acme", "name": "" }),
            json!({ "business_name": 0, "industry": "Retail" }),
            json!({ "business_name": "Acme", "name": 0 }),
            json!({ "business_name": "Acme", "name": 0.0 }),
        ] {
            assert!(!is_client_record(&raw(doc.clone())), "expected non-client: {doc}");
        }
    }

    #[test]
    fn nonzero_numbers_count_as_filled() {
        assert!(is_client_record(&raw(json!({ "business_name": "Acme", "name": 7 }))));
        assert!(is_client_record(&raw(json!({ "business_name": 42, "name": "Jane" }))));
    }

    #[test]
    fn from_raw_builds_canonical_view() {
        let doc = raw(json!({
            "business_name": "Acme Corp",
            "owner_name": "Jane Doe",
            "contact_email": "jane@acme.test",
            "industry": " Retail ",
            "num_employees": 12,
            "main_challenges": ["Hiring", "Cash flow"],
        }));
        let rec = ClientRecord::from_raw("acme-corp-2025-11-16.json", &doc);
        assert_eq!(rec.business_name.as_deref(), Some("Acme Corp"));
        assert_eq!(rec.contact_name.as_deref(), Some("Jane Doe"));
        assert_eq!(rec.email.as_deref(), Some("jane@acme.test"));
        assert_eq!(rec.industry.as_deref(), Some("Retail"));
        assert_eq!(rec.employee_count, Some(12.0));
        assert_eq!(rec.main_challenges, vec!["Hiring", "Cash flow"]);
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2025, 11, 16));
        assert_eq!(rec.source_file, "acme-corp-2025-11-16.json");
    }

    #[test]
    fn name_doubles_as_business_and_contact() {
        let rec = ClientRecord::from_raw("x.json", &raw(json!({ "name": "Solo Shop" })));
        assert_eq!(rec.business_name.as_deref(), Some("Solo Shop"));
        assert_eq!(rec.contact_name.as_deref(), Some("Solo Shop"));
    }

    #[test]
    fn employee_extraction_is_idempotent() {
        for doc in [
            json!({ "employees_count": 10 }),
            json!({ "employees": "bad" }),
            json!({ "num_employees": "1,200" }),
            json!({}),
        ] {
            let r = raw(doc);
            let first = ClientRecord::from_raw("a.json", &r).employee_count;
            let second = ClientRecord::from_raw("a.json", &r).employee_count;
            assert_eq!(first, second);
        }
    }

    #[test]
    fn stored_document_helpers() {
        let doc = StoredDocument {
            file_name: "acme.json".to_string(),
            path: PathBuf::from("/tmp/acme.json"),
            data: raw(json!({ "name": "Jane", "business_name": "Acme" })),
        };
        assert!(doc.is_client());
        assert_eq!(doc.date(), None);
        assert_eq!(doc.to_client().display_name(), "Acme");
    }
}
