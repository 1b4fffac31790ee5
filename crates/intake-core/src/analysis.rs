use crate::fields::{self, RawRecord};
use crate::record::ClientRecord;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ReportContext
// ---------------------------------------------------------------------------

/// Everything the report rules look at, with display defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub business_name: String,
    pub industry: String,
    /// Zero when unknown or unparseable.
    pub employees: u64,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub challenges: Vec<String>,
    pub annual_revenue: Option<f64>,
    pub location: Option<String>,
    pub offering: Option<String>,
    pub executive_summary: Option<String>,
}

impl ReportContext {
    pub fn from_raw(source_file: &str, raw: &RawRecord) -> Self {
        let rec = ClientRecord::from_raw(source_file, raw);
        let text = |key: &str| raw.get(key).and_then(fields::as_text);
        Self {
            business_name: rec.business_name.unwrap_or_else(|| "Client".to_string()),
            industry: rec.industry.unwrap_or_else(|| "N/A".to_string()),
            employees: rec
                .employee_count
                .filter(|n| *n >= 0.0)
                .map(|n| n as u64)
                .unwrap_or(0),
            contact_name: rec.contact_name.unwrap_or_else(|| "N/A".to_string()),
            email: rec.email.unwrap_or_else(|| "N/A".to_string()),
            phone: text("phone").unwrap_or_else(|| "N/A".to_string()),
            challenges: rec.main_challenges,
            annual_revenue: raw.get("annual_revenue").and_then(fields::as_number),
            location: text("location"),
            offering: text("offering"),
            executive_summary: text("executive_summary"),
        }
    }

    fn challenge_text(&self) -> String {
        self.challenges.join(" ").to_lowercase()
    }

    fn challenges_mention(&self, words: &[&str]) -> bool {
        let text = self.challenge_text();
        words.iter().any(|w| text.contains(w))
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Metrics,
    QuickWins,
    FocusAreas,
}

/// A fn-pointer rule: when `condition` holds, `text` joins its section.
pub struct Rule {
    pub id: &'static str,
    pub section: Section,
    pub condition: fn(&ReportContext) -> bool,
    pub text: &'static str,
}

fn lean_team(ctx: &ReportContext) -> bool {
    (1..=10).contains(&ctx.employees)
}

fn growing_team(ctx: &ReportContext) -> bool {
    (11..=50).contains(&ctx.employees)
}

fn large_team(ctx: &ReportContext) -> bool {
    ctx.employees > 50
}

fn early_revenue(ctx: &ReportContext) -> bool {
    ctx.annual_revenue.is_some_and(|r| r < 250_000.0)
}

fn product_market_revenue(ctx: &ReportContext) -> bool {
    ctx.annual_revenue
        .is_some_and(|r| (250_000.0..1_000_000.0).contains(&r))
}

fn established_revenue(ctx: &ReportContext) -> bool {
    ctx.annual_revenue.is_some_and(|r| r >= 1_000_000.0)
}

fn sales_trouble(ctx: &ReportContext) -> bool {
    ctx.challenges_mention(&["sales", "lead"])
}

fn process_trouble(ctx: &ReportContext) -> bool {
    ctx.challenges_mention(&["operations", "process", "delivery"])
}

fn margin_trouble(ctx: &ReportContext) -> bool {
    ctx.challenges_mention(&["cash", "profit", "margin"])
}

fn roofing(ctx: &ReportContext) -> bool {
    ctx.industry.to_lowercase().contains("roof")
}

fn has_staff(ctx: &ReportContext) -> bool {
    ctx.employees >= 5
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        // -- Metrics ---------------------------------------------------------
        Rule {
            id: "headcount_lean",
            section: Section::Metrics,
            condition: lean_team,
            text: "Headcount suggests a lean operation; capacity and owner dependency are likely key risks.",
        },
        Rule {
            id: "headcount_growing",
            section: Section::Metrics,
            condition: growing_team,
            text: "Headcount indicates a growing team; process standardization and role clarity become important.",
        },
        Rule {
            id: "headcount_large",
            section: Section::Metrics,
            condition: large_team,
            text: "Headcount points to a larger organization where cross-functional coordination and governance matter.",
        },
        Rule {
            id: "revenue_early",
            section: Section::Metrics,
            condition: early_revenue,
            text: "Revenue is in an early-stage band; improving lead generation and offer clarity is often highest impact.",
        },
        Rule {
            id: "revenue_product_market",
            section: Section::Metrics,
            condition: product_market_revenue,
            text: "Revenue suggests product-market fit; focus often shifts to scalable delivery and customer retention.",
        },
        Rule {
            id: "revenue_established",
            section: Section::Metrics,
            condition: established_revenue,
            text: "Revenue indicates established traction; systematizing operations and leadership depth become priorities.",
        },
        // -- Quick wins ------------------------------------------------------
        Rule {
            id: "core_offer",
            section: Section::QuickWins,
            condition: sales_trouble,
            text: "- Clarify a single core offer and tighten the ideal customer profile for the next 90 days.",
        },
        Rule {
            id: "follow_up_sequence",
            section: Section::QuickWins,
            condition: sales_trouble,
            text: "- Standardize a simple follow-up sequence for all open quotes and past leads.",
        },
        Rule {
            id: "process_checklists",
            section: Section::QuickWins,
            condition: process_trouble,
            text: "- Map the top 3 recurring processes and introduce simple checklists to reduce errors.",
        },
        Rule {
            id: "pricing_review",
            section: Section::QuickWins,
            condition: margin_trouble,
            text: "- Review pricing and discounting rules on the last 3 months of deals to identify quick margin gains.",
        },
        // -- Focus areas -----------------------------------------------------
        Rule {
            id: "roofing_sales_process",
            section: Section::FocusAreas,
            condition: roofing,
            text: "- Build a simple, repeatable sales process from first contact through signed contract and install.",
        },
        Rule {
            id: "roofing_job_costing",
            section: Section::FocusAreas,
            condition: roofing,
            text: "- Implement basic job cost tracking per project to understand true profitability by job type.",
        },
        Rule {
            id: "role_clarity",
            section: Section::FocusAreas,
            condition: has_staff,
            text: "- Clarify roles and handoffs between sales, operations, and admin to reduce owner bottlenecks.",
        },
    ]
}

const NEXT_STEPS: &str =
    "Schedule a follow-up session to validate assumptions and finalize the 90-day plan.";

fn fallback(section: Section) -> &'static str {
    match section {
        Section::Metrics => {
            "Based on the available data, the business appears to be in a growth phase. \
             Further quantitative metrics (margin, conversion, retention) would enable a deeper analysis."
        }
        Section::QuickWins => {
            "- Book a 60-minute working session to clarify goals, constraints, and quick-win opportunities."
        }
        Section::FocusAreas => {
            "- Define 3 measurable outcomes for the next 6 months and align projects directly to these outcomes."
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub business_profile_summary: String,
    pub metrics_interpretation: String,
    pub challenge_list: String,
    pub challenge_prioritization: String,
    pub quick_wins: String,
    pub focus_areas: String,
    pub next_steps: String,
    /// Ids of the rules that fired, in rule order.
    pub fired: Vec<&'static str>,
}

pub struct Analyzer {
    rules: Vec<Rule>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Analyzer {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    fn section(
        &self,
        ctx: &ReportContext,
        section: Section,
        sep: &str,
    ) -> (String, Vec<&'static str>) {
        let hits: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| r.section == section && (r.condition)(ctx))
            .collect();
        if hits.is_empty() {
            return (fallback(section).to_string(), Vec::new());
        }
        let text = hits.iter().map(|r| r.text).collect::<Vec<_>>().join(sep);
        (text, hits.iter().map(|r| r.id).collect())
    }

    pub fn analyze(&self, ctx: &ReportContext) -> Analysis {
        let (metrics_interpretation, mut fired) = self.section(ctx, Section::Metrics, "\n\n");
        let (quick_wins, wins) = self.section(ctx, Section::QuickWins, "\n");
        let (focus_areas, focus) = self.section(ctx, Section::FocusAreas, "\n");
        fired.extend(wins);
        fired.extend(focus);

        Analysis {
            business_profile_summary: profile_summary(ctx),
            metrics_interpretation,
            challenge_list: challenge_list(ctx),
            challenge_prioritization: prioritization(ctx),
            quick_wins,
            focus_areas,
            next_steps: NEXT_STEPS.to_string(),
            fired,
        }
    }
}

pub fn size_band(employees: u64) -> Option<&'static str> {
    match employees {
        0 => None,
        1..=25 => Some("small"),
        26..=250 => Some("mid-sized"),
        _ => Some("large"),
    }
}

fn profile_summary(ctx: &ReportContext) -> String {
    let mut out = format!("{} operates in the {} space.", ctx.business_name, ctx.industry);
    if let Some(size) = size_band(ctx.employees) {
        out.push_str(&format!(
            " The organization is a {size} team with approximately {} employees.",
            ctx.employees
        ));
    }
    out
}

fn challenge_list(ctx: &ReportContext) -> String {
    if ctx.challenges.is_empty() {
        return "- Not explicitly stated.".to_string();
    }
    ctx.challenges
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prioritization(ctx: &ReportContext) -> String {
    match ctx.challenges.first() {
        Some(top) => format!(
            "The primary stated challenge is **{top}**. Secondary or related challenges \
             should be clarified in follow-up discussions to confirm priorities."
        ),
        None => "No explicit challenges were captured. A short discovery conversation is \
                 recommended to clarify the top 2-3 problems before prescribing solutions."
            .to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
