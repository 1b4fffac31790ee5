use crate::error::{IntakeError, Result};
use crate::fields::RawRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap()
    })
}

const MIN_PHONE_DIGITS: usize = 10;

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

pub fn validate_email(value: &str) -> Result<()> {
    if email_re().is_match(value.trim()) {
        Ok(())
    } else {
        Err(IntakeError::validation(
            "email",
            "please enter a valid email (e.g., name@example.com)",
        ))
    }
}

pub fn validate_phone(value: &str) -> Result<()> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(IntakeError::validation(
            "phone",
            format!("please enter a phone number with at least {MIN_PHONE_DIGITS} digits"),
        ));
    }
    Ok(())
}

/// Parse a headcount such as `"1,234"`. Must be a non-negative integer.
pub fn parse_employee_count(value: &str) -> Result<u64> {
    let cleaned = value.trim().replace(',', "");
    match cleaned.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n as u64),
        Ok(_) => Err(IntakeError::validation(
            "employees",
            "please enter a non-negative integer",
        )),
        Err(_) => Err(IntakeError::validation(
            "employees",
            format!("please enter a valid integer (e.g., 25), got '{value}'"),
        )),
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::validation(field, "is required"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// NewClient
// ---------------------------------------------------------------------------

/// A client captured by the intake front end, before it is written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub contact_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub business_name: String,
    pub employees_count: u64,
    pub industry: String,
    #[serde(default)]
    pub challenges: Vec<String>,
}

impl NewClient {
    pub fn validate(&self) -> Result<()> {
        require("contact name", &self.contact_name)?;
        require("business name", &self.business_name)?;
        require("industry", &self.industry)?;
        validate_email(&self.email)?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            validate_phone(phone)?;
        }
        Ok(())
    }

    /// The stored document shape. Field names match what the contact-style
    /// intake has always written, so older readers keep working.
    pub fn to_raw(&self) -> RawRecord {
        let challenges: Vec<String> = self
            .challenges
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let mut raw = RawRecord::new();
        raw.insert("name".into(), Value::from(self.contact_name.trim()));
        raw.insert("email".into(), Value::from(self.email.trim()));
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            raw.insert("phone".into(), Value::from(phone));
        }
        raw.insert("business_name".into(), Value::from(self.business_name.trim()));
        raw.insert("employees_count".into(), Value::from(self.employees_count));
        raw.insert("industry".into(), Value::from(self.industry.trim()));
        if let Some(first) = challenges.first() {
            raw.insert("main_challenge".into(), Value::from(first.as_str()));
        }
        raw.insert("challenges".into(), Value::from(challenges));
        raw
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{is_client_record, ClientRecord};

    fn sample() -> NewClient {
        NewClient {
            contact_name: "Jane Doe".into(),
            email: "jane@acme.com".into(),
            phone: Some("(555) 123-4567".into()),
            business_name: "Acme Corp".into(),
            employees_count: 42,
            industry: "Retail".into(),
            challenges: vec!["Cash flow".into(), " ".into(), "Hiring".into()],
        }
    }

    #[test]
    fn email_validation() {
        validate_email("name@example.com").unwrap();
        validate_email("First.Last+tag@Sub.Example.ORG").unwrap();
        for bad in ["", "name@", "@example.com", "name@example", "a b@example.com"] {
            assert!(validate_email(bad).is_err(), "expected invalid: {bad}");
        }
    }

    #[test]
    fn phone_needs_ten_digits() {
        validate_phone("555-123-4567").unwrap();
        validate_phone("+1 (555) 123 4567").unwrap();
        assert!(validate_phone("555-1234").is_err());
    }

    #[test]
    fn employee_count_parsing() {
        assert_eq!(parse_employee_count("1,234").unwrap(), 1234);
        assert_eq!(parse_employee_count(" 0 ").unwrap(), 0);
        assert!(parse_employee_count("-5").is_err());
        assert!(parse_employee_count("abc").is_err());
        assert!(parse_employee_count("2.5").is_err());
    }

    #[test]
    fn validate_accepts_complete_client() {
        sample().validate().unwrap();
        let no_phone = NewClient {
            phone: None,
            ..sample()
        };
        no_phone.validate().unwrap();
    }

    #[test]
    fn validate_rejects_missing_required() {
        let err = NewClient {
            business_name: "  ".into(),
            ..sample()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("business name"));
    }

    #[test]
    fn to_raw_is_a_classifiable_client() {
        let raw = sample().to_raw();
        assert!(is_client_record(&raw));
        assert_eq!(raw["main_challenge"], "Cash flow");
        assert_eq!(raw["challenges"], serde_json::json!(["Cash flow", "Hiring"]));

        let rec = ClientRecord::from_raw("acme-corp-2025-11-16.json", &raw);
        assert_eq!(rec.employee_count, Some(42.0));
        assert_eq!(rec.main_challenges, vec!["Cash flow", "Hiring"]);
    }
}
