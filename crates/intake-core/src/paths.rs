use crate::error::{IntakeError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "intake.yaml";

pub const DEFAULT_CLIENTS_DIR: &str = "data/clients";
pub const DEFAULT_REPORTS_DIR: &str = "data/reports";
pub const DEFAULT_EXPORT_FILE: &str = "clients_export.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "clients_summary.md";

pub const RECORD_EXTENSION: &str = "json";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `{slug}-{YYYY-MM-DD}.json`
pub fn record_file_name(slug: &str, date: NaiveDate) -> String {
    format!("{slug}-{}.{RECORD_EXTENSION}", date.format(DATE_FORMAT))
}

/// `{slug}-report-{YYYY-MM-DD}.md`
pub fn report_file_name(slug: &str, date: NaiveDate) -> String {
    format!("{slug}-report-{}.md", date.format(DATE_FORMAT))
}

pub fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(RECORD_EXTENSION))
}

/// Reject anything that is not a bare file name, so a caller-supplied name can
/// never address a file outside the clients directory.
pub fn validate_file_name(name: &str) -> Result<()> {
    let bare = Path::new(name).file_name().and_then(|n| n.to_str());
    if name.is_empty() || name.contains(['/', '\\']) || bare != Some(name) {
        return Err(IntakeError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filename dates
// ---------------------------------------------------------------------------

static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn date_re() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

/// Parse the date embedded in a `{slug}-YYYY-MM-DD.{ext}` file name.
///
/// The last ten characters of the stem are read as `YYYY-MM-DD`; the stem must
/// be longer than the date itself. Anything else yields `None`.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let base = Path::new(name).file_name()?.to_str()?;
    let stem = match base.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => base,
    };
    if stem.len() <= DATE_LEN {
        return None;
    }
    let start = stem.len() - DATE_LEN;
    let tail = stem.get(start..)?;
    if !date_re().is_match(tail) {
        return None;
    }
    NaiveDate::parse_from_str(tail, DATE_FORMAT).ok()
}

/// Strict `YYYY-MM-DD`: four-digit year, two-digit month and day.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if !date_re().is_match(trimmed) {
        return Err(IntakeError::validation("date", format!("'{value}' is not YYYY-MM-DD")));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        IntakeError::validation("date", format!("'{value}' is not a valid date ({e})"))
    })
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
static UNSAFE_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn unsafe_re() -> &'static Regex {
    UNSAFE_RE.get_or_init(|| Regex::new(r"[^a-z0-9_\-]").unwrap())
}

/// Lowercase, dash-separated, filesystem-safe token. Falls back to `client`.
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let dashed = whitespace_re().replace_all(&lowered, "-");
    let cleaned = unsafe_re().replace_all(&dashed, "");
    if cleaned.is_empty() {
        "client".to_string()
    } else {
        cleaned.into_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
