//! Field-name reconciliation for heterogeneous client documents.
//!
//! Producers of client files never agreed on key names. Each canonical field
//! owns one ordered list of source keys, and every lookup goes through
//! [`extract_field`], so the fallback order lives in exactly one place.

use serde_json::{Map, Value};
use std::fmt;

/// A stored document as read from disk: string keys, arbitrary JSON values.
pub type RawRecord = Map<String, Value>;

// ---------------------------------------------------------------------------
// CanonicalField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    BusinessName,
    ContactName,
    Email,
    Industry,
    EmployeeCount,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        CanonicalField::BusinessName,
        CanonicalField::ContactName,
        CanonicalField::Email,
        CanonicalField::Industry,
        CanonicalField::EmployeeCount,
    ];

    /// Source keys in priority order; the first usable one wins.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            CanonicalField::BusinessName => &["business_name", "business", "name"],
            CanonicalField::ContactName => &["name", "owner_name", "contact_name"],
            CanonicalField::Email => &["email", "contact_email"],
            CanonicalField::Industry => &["industry"],
            CanonicalField::EmployeeCount => &["employees_count", "employees", "num_employees"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::BusinessName => "business_name",
            CanonicalField::ContactName => "contact_name",
            CanonicalField::Email => "email",
            CanonicalField::Industry => "industry",
            CanonicalField::EmployeeCount => "employee_count",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys whose values are merged into the challenge list, in merge order.
/// `main_challenge` is a single string, the others are lists.
pub const CHALLENGE_KEYS: &[&str] = &["main_challenge", "challenges", "main_challenges"];

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Value of the first key in `keys` that is present and neither null nor the
/// empty string. Missing keys are not an error.
pub fn extract_field<'a>(raw: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| raw.get(*k))
        .find(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
}

pub fn extract(raw: &RawRecord, field: CanonicalField) -> Option<&Value> {
    extract_field(raw, field.keys())
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Trimmed text of a scalar value. Whitespace-only strings, lists, and maps
/// have no text.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric reading of a value: JSON numbers, or strings such as `"1,250"`.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Non-empty trimmed strings of a list (or a lone string). Other item types are
/// ignored.
pub fn as_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// All challenge strings of a document, merged across [`CHALLENGE_KEYS`],
/// duplicates removed with the first occurrence kept.
pub fn extract_challenges(raw: &RawRecord) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in CHALLENGE_KEYS {
        let Some(value) = raw.get(*key) else {
            continue;
        };
        for item in as_string_list(value) {
            if !out.contains(&item) {
                out.push(item);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
