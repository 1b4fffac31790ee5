use crate::record::ClientRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// ClientSummary
// ---------------------------------------------------------------------------

/// Aggregate snapshot over a set of client records. Each statistic only looks
/// at the records where its own field is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub total_count: usize,
    pub most_common_industry: Option<String>,
    pub average_employee_count: Option<f64>,
    pub all_challenges: Vec<String>,
}

pub fn summarize<'a, I>(records: I) -> ClientSummary
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let mut total_count = 0usize;
    let mut industry_counts: HashMap<&str, usize> = HashMap::new();
    let mut most_common: Option<(&str, usize)> = None;
    let mut employee_sum = 0.0f64;
    let mut employee_n = 0usize;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut all_challenges = Vec::new();

    for rec in records {
        total_count += 1;

        if let Some(industry) = rec.industry.as_deref() {
            let count = industry_counts.entry(industry).or_insert(0);
            *count += 1;
            // Strictly greater: on a tie the value that got there first keeps it.
            if most_common.is_none_or(|(_, best)| *count > best) {
                most_common = Some((industry, *count));
            }
        }

        if let Some(n) = rec.employee_count.filter(|n| *n >= 0.0) {
            employee_sum += n;
            employee_n += 1;
        }

        for challenge in &rec.main_challenges {
            if seen.insert(challenge.as_str()) {
                all_challenges.push(challenge.clone());
            }
        }
    }

    ClientSummary {
        total_count,
        most_common_industry: most_common.map(|(industry, _)| industry.to_string()),
        average_employee_count: (employee_n > 0).then(|| employee_sum / employee_n as f64),
        all_challenges,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::RawRecord;
    use serde_json::{json, Value};

    fn rec(v: Value) -> ClientRecord {
        let raw: RawRecord = v.as_object().cloned().unwrap();
        ClientRecord::from_raw("client.json", &raw)
    }

    fn with_industry(industry: &str) -> ClientRecord {
        rec(json!({ "business_name": "B", "industry": industry }))
    }

    #[test]
    fn empty_set() {
        let s = summarize(&Vec::<ClientRecord>::new());
        assert_eq!(s.total_count, 0);
        assert_eq!(s.most_common_industry, None);
        assert_eq!(s.average_employee_count, None);
        assert!(s.all_challenges.is_empty());
    }

    #[test]
    fn tie_goes_to_first_to_reach_max() {
        let records: Vec<_> = ["Retail", "Tech", "Retail", "Tech"]
            .into_iter()
            .map(with_industry)
            .collect();
        assert_eq!(
            summarize(&records).most_common_industry.as_deref(),
            Some("Retail")
        );
    }

    #[test]
    fn tie_break_is_not_first_seen() {
        // Tech is seen first, but Retail reaches two occurrences first.
        let records: Vec<_> = ["Tech", "Retail", "Retail", "Tech"]
            .into_iter()
            .map(with_industry)
            .collect();
        assert_eq!(
            summarize(&records).most_common_industry.as_deref(),
            Some("Retail")
        );
    }

    #[test]
    fn clear_winner() {
        let records: Vec<_> = ["Tech", "Retail", "Tech", "Finance", "Tech"]
            .into_iter()
            .map(with_industry)
            .collect();
        assert_eq!(summarize(&records).most_common_industry.as_deref(), Some("Tech"));
    }

    #[test]
    fn average_skips_unparseable_counts() {
        let records = vec![
            rec(json!({ "business_name": "A", "employees_count": 10 })),
            rec(json!({ "business_name": "B", "employees_count": "bad" })),
            rec(json!({ "business_name": "C", "employees_count": 20 })),
        ];
        let s = summarize(&records);
        assert_eq!(s.total_count, 3);
        assert_eq!(s.average_employee_count, Some(15.0));
    }

    #[test]
    fn average_skips_negative_counts() {
        let records = vec![
            rec(json!({ "business_name": "A", "employees": -4 })),
            rec(json!({ "business_name": "B", "employees": 8 })),
        ];
        assert_eq!(summarize(&records).average_employee_count, Some(8.0));
    }

    #[test]
    fn average_absent_without_counts() {
        let records = vec![rec(json!({ "business_name": "A", "industry": "Retail" }))];
        assert_eq!(summarize(&records).average_employee_count, None);
    }

    #[test]
    fn challenges_dedupe_across_records_in_order() {
        let records = vec![
            rec(json!({ "main_challenge": "Cash flow", "challenges": ["Hiring"] })),
            rec(json!({ "challenges": ["Hiring", "Marketing", "Cash flow"] })),
        ];
        let s = summarize(&records);
        assert_eq!(s.all_challenges, vec!["Cash flow", "Hiring", "Marketing"]);
        assert_eq!(summarize(&records), s, "recomputation must be stable");
    }

    #[test]
    fn duplicate_challenge_does_not_grow_aggregate() {
        let base = vec![rec(json!({ "challenges": ["Hiring", "Sales"] }))];
        let dup = vec![rec(json!({ "challenges": ["Hiring", "Sales", "Hiring"] }))];
        assert_eq!(
            summarize(&base).all_challenges.len(),
            summarize(&dup).all_challenges.len()
        );
    }
}
