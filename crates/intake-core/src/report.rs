use crate::analysis::{Analysis, Analyzer, ReportContext};
use crate::error::{IntakeError, Result};
use crate::paths;
use crate::record::StoredDocument;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.md");

const DEFAULT_EXECUTIVE_SUMMARY: &str =
    "This report summarizes the current state, challenges, and opportunities for the business.";
const NOT_SPECIFIED: &str = "Not specified";

/// Read a custom template, or fall back to the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        None => Ok(DEFAULT_TEMPLATE.to_string()),
        Some(p) if p.is_file() => Ok(std::fs::read_to_string(p)?),
        Some(p) => Err(IntakeError::TemplateNotFound(p.display().to_string())),
    }
}

/// Replace every `{{ KEY }}` with its value. Unknown placeholders are left in
/// place.
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{ {key} }}}}"), value)
    })
}

pub fn placeholders(
    ctx: &ReportContext,
    analysis: &Analysis,
    date: NaiveDate,
) -> Vec<(&'static str, String)> {
    let or_default = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());
    vec![
        ("BUSINESS_NAME", ctx.business_name.clone()),
        ("INDUSTRY", ctx.industry.clone()),
        (
            "EMPLOYEES",
            if ctx.employees > 0 {
                ctx.employees.to_string()
            } else {
                NOT_SPECIFIED.to_string()
            },
        ),
        ("CONTACT_NAME", ctx.contact_name.clone()),
        ("EMAIL", ctx.email.clone()),
        ("PHONE", ctx.phone.clone()),
        ("LOCATION", or_default(&ctx.location)),
        ("OFFERING", or_default(&ctx.offering)),
        (
            "EXECUTIVE_SUMMARY",
            ctx.executive_summary
                .clone()
                .unwrap_or_else(|| DEFAULT_EXECUTIVE_SUMMARY.to_string()),
        ),
        ("REPORT_DATE", date.format("%Y-%m-%d").to_string()),
        ("BUSINESS_PROFILE_SUMMARY", analysis.business_profile_summary.clone()),
        ("METRICS_INTERPRETATION", analysis.metrics_interpretation.clone()),
        ("CHALLENGE_LIST", analysis.challenge_list.clone()),
        ("CHALLENGE_PRIORITIZATION", analysis.challenge_prioritization.clone()),
        ("QUICK_WINS", analysis.quick_wins.clone()),
        ("FOCUS_AREAS", analysis.focus_areas.clone()),
        ("NEXT_STEPS", analysis.next_steps.clone()),
    ]
}

/// A rendered consulting report, not yet written.
#[derive(Debug, Clone)]
pub struct Report {
    pub context: ReportContext,
    pub analysis: Analysis,
    pub content: String,
    pub date: NaiveDate,
}

impl Report {
    pub fn render(doc: &StoredDocument, template: &str, date: NaiveDate) -> Self {
        let context = ReportContext::from_raw(&doc.file_name, &doc.data);
        let analysis = Analyzer::default().analyze(&context);
        let content = fill_template(template, &placeholders(&context, &analysis, date));
        Self {
            context,
            analysis,
            content,
            date,
        }
    }

    /// `{slug}-report-{date}.md`
    pub fn file_name(&self) -> String {
        paths::report_file_name(&paths::slugify(&self.context.business_name), self.date)
    }

    /// Write into `dir` under the default file name, or to `out` when given.
    pub fn write(&self, dir: &Path, out: Option<&Path>) -> Result<PathBuf> {
        let path = match out {
            Some(p) => p.to_path_buf(),
            None => dir.join(self.file_name()),
        };
        crate::io::atomic_write(&path, self.content.as_bytes())?;
        tracing::info!(path = %path.display(), "wrote consulting report");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(v: serde_json::Value) -> StoredDocument {
        StoredDocument {
            file_name: "blue-sky-2025-03-04.json".into(),
            path: PathBuf::from("blue-sky-2025-03-04.json"),
            data: v.as_object().cloned().unwrap(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn fill_replaces_known_placeholders_only() {
        let out = fill_template(
            "Hi {{ NAME }}, {{ NAME }}! {{ OTHER }} {{NAME}}",
            &[("NAME", "Jane".to_string())],
        );
        assert_eq!(out, "Hi Jane, Jane! {{ OTHER }} {{NAME}}");
    }

    #[test]
    fn default_template_is_fully_filled() {
        let report = Report::render(
            &doc(json!({ "business_name": "Blue Sky", "industry": "Roofing", "employees": 8 })),
            DEFAULT_TEMPLATE,
            date(),
        );
        assert!(!report.content.contains("{{"), "unfilled placeholder:\n{}", report.content);
        assert!(report.content.starts_with("# Consulting Report: Blue Sky"));
        assert!(report.content.contains("- **Employees:** 8"));
        assert!(report.content.contains("- **Location:** Not specified"));
        assert!(report.content.contains("_Prepared 2025-03-10_"));
    }

    #[test]
    fn unknown_headcount_reads_not_specified() {
        let report = Report::render(
            &doc(json!({ "business_name": "Acme" })),
            DEFAULT_TEMPLATE,
            date(),
        );
        assert!(report.content.contains("- **Employees:** Not specified"));
    }

    #[test]
    fn file_name_uses_business_slug_and_date() {
        let report =
            Report::render(&doc(json!({ "business_name": "Blue Sky Roofing" })), "x", date());
        assert_eq!(report.file_name(), "blue-sky-roofing-report-2025-03-10.md");
    }

    #[test]
    fn write_to_reports_dir() {
        let dir = TempDir::new().unwrap();
        let report = Report::render(
            &doc(json!({ "business_name": "Acme" })),
            "{{ BUSINESS_NAME }}",
            date(),
        );
        let path = report.write(&dir.path().join("data/reports"), None).unwrap();
        assert_eq!(path, dir.path().join("data/reports/acme-report-2025-03-10.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Acme");
    }

    #[test]
    fn custom_template_loading() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("custom.md");
        std::fs::write(&p, "# {{ BUSINESS_NAME }}").unwrap();
        assert_eq!(load_template(Some(&p)).unwrap(), "# {{ BUSINESS_NAME }}");
        assert_eq!(load_template(None).unwrap(), DEFAULT_TEMPLATE);
        assert!(matches!(
            load_template(Some(&dir.path().join("missing.md"))),
            Err(IntakeError::TemplateNotFound(_))
        ));
    }
}
