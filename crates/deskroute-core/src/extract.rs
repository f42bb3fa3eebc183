//! Parameter and entity extraction from free-text queries

use crate::types::{Entities, EntityKind, Priority};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::OnceLock;

/// Structured filters pulled out of a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

enum PeriodValue {
    Fixed(&'static str),
    Uppercase,
    Lowercase,
}

/// Captured vendor names rejected because they are period phrases
const VENDOR_STOPLIST: &[&str] = &["last month", "this month", "last", "this", "quarter"];

const STATUS_KEYWORDS: &str = r"(?i)\b(failed|pending|reconciled|open|closed|processing)\b";

const HIGH_PRIORITY: &[&str] = &["urgent", "high priority", "critical"];
const LOW_PRIORITY: &[&str] = &["low priority", "minor"];

static PERIOD_RULES: OnceLock<Vec<(Regex, PeriodValue)>> = OnceLock::new();
static VENDOR_RULES: OnceLock<Vec<Regex>> = OnceLock::new();
static STATUS_RULES: OnceLock<Vec<Regex>> = OnceLock::new();

static INVOICE_ID_RE: OnceLock<Regex> = OnceLock::new();
static TICKET_ID_RE: OnceLock<Regex> = OnceLock::new();
static AMOUNT_RES: OnceLock<Vec<Regex>> = OnceLock::new();

fn period_rules() -> &'static [(Regex, PeriodValue)] {
    PERIOD_RULES.get_or_init(|| {
        vec![
            (
                Regex::new(r"(?i)\blast\s+month\b").unwrap(),
                PeriodValue::Fixed("last_month"),
            ),
            (
                Regex::new(r"(?i)\bthis\s+month\b").unwrap(),
                PeriodValue::Fixed("this_month"),
            ),
            (
                Regex::new(r"(?i)\blast\s+quarter\b").unwrap(),
                PeriodValue::Fixed("last_quarter"),
            ),
            (
                Regex::new(r"(?i)\bq[1-4]\s*20\d{2}\b").unwrap(),
                PeriodValue::Uppercase,
            ),
            (
                Regex::new(
                    r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+20\d{2}\b",
                )
                .unwrap(),
                PeriodValue::Lowercase,
            ),
        ]
    })
}

/// `key=value` with a quoted value, a run of capitalized words or one bare token
fn assignment_rule(key: &str) -> String {
    format!(
        r#"(?i)\b{}\s*[=:]\s*(?:"([^"]+)"|'([^']+)'|(?-i:([A-Z][\w&-]*(?:[ \t]+[A-Z][\w&-]*)*))|([^\s,;'"=]+))"#,
        key
    )
}

fn vendor_rules() -> &'static [Regex] {
    VENDOR_RULES.get_or_init(|| {
        vec![
            // vendor=Tech Corp, vendor: "Tech Corp", vendor=indisky
            Regex::new(&assignment_rule("vendor")).unwrap(),
            // supplier=Data Flow Systems
            Regex::new(&assignment_rule("supplier")).unwrap(),
            // vendor IndiSky
            Regex::new(r"\b(?i:vendor|supplier)\s+([A-Z][\w&-]*(?:[ \t]+[A-Z][\w&-]*)*)").unwrap(),
            // from IndiSky
            Regex::new(r"\b(?i:from)\s+([A-Z][\w&-]*(?:[ \t]+[A-Z][\w&-]*)*)").unwrap(),
        ]
    })
}

fn status_rules() -> &'static [Regex] {
    STATUS_RULES.get_or_init(|| {
        vec![
            Regex::new(r#"(?i)\bstatus\s*[=:]\s*['"]?(\w+)"#).unwrap(),
            Regex::new(STATUS_KEYWORDS).unwrap(),
        ]
    })
}

fn invoice_id_re() -> &'static Regex {
    INVOICE_ID_RE.get_or_init(|| Regex::new(r"(?i)\bINV-\d+(?:-\d+)*\b").unwrap())
}

fn ticket_id_re() -> &'static Regex {
    TICKET_ID_RE.get_or_init(|| Regex::new(r"(?i)\bTCK-\d+\b").unwrap())
}

fn amount_res() -> &'static [Regex] {
    AMOUNT_RES.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(?:₹|\brs\.?|\binr)\s*\d[\d,]*(?:\.\d+)?").unwrap(),
            Regex::new(r"(?i)\b\d[\d,]*(?:\.\d+)?\s*(?:rupees|lakhs?|crores?)\b").unwrap(),
        ]
    })
}

/// Blank out `range` so later rules cannot re-capture it. Byte length is
/// preserved, keeping every other match offset valid.
fn mask(text: &mut String, range: Range<usize>) {
    let blank = " ".repeat(range.len());
    text.replace_range(range, &blank);
}

fn find_period(text: &str) -> Option<(String, Range<usize>)> {
    for (re, value) in period_rules() {
        if let Some(m) = re.find(text) {
            let period = match value {
                PeriodValue::Fixed(v) => v.to_string(),
                PeriodValue::Uppercase => m
                    .as_str()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase(),
                PeriodValue::Lowercase => m.as_str().to_lowercase(),
            };
            return Some((period, m.range()));
        }
    }
    None
}

fn find_vendor(text: &str) -> Option<(String, Range<usize>)> {
    for re in vendor_rules() {
        for caps in re.captures_iter(text) {
            let Some(group) = (1..caps.len()).find_map(|i| caps.get(i)) else {
                continue;
            };
            let mut name = group.as_str().trim();
            // A capitalized run may swallow the key of the next `key=value`
            if text[group.end()..].trim_start().starts_with(['=', ':']) {
                name = match name.rsplit_once([' ', '\t']) {
                    Some((head, _)) => head.trim_end(),
                    None => "",
                };
            }
            if name.is_empty() || VENDOR_STOPLIST.contains(&name.to_lowercase().as_str()) {
                continue;
            }
            let raw = group.as_str();
            let start = group.start() + (raw.len() - raw.trim_start().len());
            return Some((name.to_string(), start..start + name.len()));
        }
    }
    None
}

fn find_status(text: &str) -> Option<(String, Range<usize>)> {
    for re in status_rules() {
        if let Some(caps) = re.captures(text) {
            if let Some(group) = caps.get(1) {
                return Some((group.as_str().to_lowercase(), group.range()));
            }
        }
    }
    None
}

fn find_priority(text: &str) -> Priority {
    let lower = text.to_lowercase();
    if HIGH_PRIORITY.iter().any(|kw| lower.contains(kw)) {
        Priority::High
    } else if LOW_PRIORITY.iter().any(|kw| lower.contains(kw)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Extract period, vendor, status and priority, in that order.
///
/// Each rule runs on the text left over by the previous ones, so a phrase
/// consumed as a period can never come back as a vendor.
pub fn extract_parameters(query: &str) -> Params {
    let mut remaining = query.to_string();
    let mut params = Params::default();

    if let Some((period, range)) = find_period(&remaining) {
        params.period = Some(period);
        mask(&mut remaining, range);
    }

    if let Some((vendor, range)) = find_vendor(&remaining) {
        params.vendor = Some(vendor);
        mask(&mut remaining, range);
    }

    if let Some((status, range)) = find_status(&remaining) {
        params.status = Some(status);
        mask(&mut remaining, range);
    }

    params.priority = find_priority(&remaining);
    params
}

/// All non-overlapping matches across `regexes`, in text order, deduplicated
/// case-insensitively
fn collect_matches<'a>(text: &str, regexes: impl IntoIterator<Item = &'a Regex>) -> Vec<String> {
    let mut found: Vec<(usize, usize, &str)> = Vec::new();
    for re in regexes {
        for m in re.find_iter(text) {
            found.push((m.start(), m.end(), m.as_str()));
        }
    }
    found.sort_by_key(|&(start, end, _)| (start, std::cmp::Reverse(end)));

    let mut values: Vec<String> = Vec::new();
    let mut last_end = 0;
    for (start, end, value) in found {
        if start < last_end {
            continue;
        }
        last_end = end;
        let value = value.trim();
        if !values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            values.push(value.to_string());
        }
    }
    values
}

/// Extract domain identifiers; categories with no match are omitted
pub fn extract_entities(text: &str) -> Entities {
    let mut entities = Entities::new();

    let mut insert = |kind: EntityKind, values: Vec<String>| {
        if !values.is_empty() {
            entities.insert(kind, values);
        }
    };

    insert(
        EntityKind::InvoiceId,
        collect_matches(text, std::iter::once(invoice_id_re())),
    );
    insert(
        EntityKind::TicketId,
        collect_matches(text, std::iter::once(ticket_id_re())),
    );
    insert(EntityKind::Amount, collect_matches(text, amount_res()));
    insert(
        EntityKind::Period,
        collect_matches(text, period_rules().iter().map(|(re, _)| re)),
    );

    let mut without_periods = text.to_string();
    for (re, _) in period_rules() {
        let ranges: Vec<Range<usize>> = re.find_iter(text).map(|m| m.range()).collect();
        for range in ranges {
            mask(&mut without_periods, range);
        }
    }
    if let Some((vendor, _)) = find_vendor(&without_periods) {
        insert(EntityKind::Vendor, vec![vendor]);
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_month_is_not_a_vendor() {
        let params = extract_parameters("Show invoices from last month");
        assert_eq!(params.period.as_deref(), Some("last_month"));
        assert_eq!(params.vendor, None);
    }

    #[test]
    fn test_vendor_and_period_together() {
        let params = extract_parameters("Filter invoices from IndiSky last month");
        assert_eq!(params.vendor.as_deref(), Some("IndiSky"));
        assert_eq!(params.period.as_deref(), Some("last_month"));
        assert_eq!(params.priority, Priority::Medium);
    }

    #[test]
    fn test_vendor_assignment_forms() {
        assert_eq!(
            extract_parameters("list invoices vendor=IndiSky").vendor.as_deref(),
            Some("IndiSky")
        );
        assert_eq!(
            extract_parameters("list invoices vendor = TechCorp ").vendor.as_deref(),
            Some("TechCorp")
        );
        assert_eq!(
            extract_parameters(r#"list invoices supplier="Data Flow""#).vendor.as_deref(),
            Some("Data Flow")
        );
        assert_eq!(
            extract_parameters("show invoices from Tech Corp, please").vendor.as_deref(),
            Some("Tech Corp")
        );
    }

    #[test]
    fn test_multi_word_vendor_assignment() {
        assert_eq!(
            extract_parameters("filter invoices vendor=Tech Corp").vendor.as_deref(),
            Some("Tech Corp")
        );
        assert_eq!(
            extract_parameters("show invoices supplier=Data Flow Systems").vendor.as_deref(),
            Some("Data Flow Systems")
        );
        assert_eq!(
            extract_parameters("invoices vendor = Data Flow Systems, please").vendor.as_deref(),
            Some("Data Flow Systems")
        );
    }

    #[test]
    fn test_vendor_assignment_stops_at_next_key() {
        let params = extract_parameters("filter vendor=Tech Corp Status=failed");
        assert_eq!(params.vendor.as_deref(), Some("Tech Corp"));
        assert_eq!(params.status.as_deref(), Some("failed"));

        let params = extract_parameters("filter vendor=IndiSky status=pending");
        assert_eq!(params.vendor.as_deref(), Some("IndiSky"));
        assert_eq!(params.status.as_deref(), Some("pending"));
    }

    #[test]
    fn test_vendor_stoplist() {
        assert_eq!(extract_parameters("invoices vendor=last").vendor, None);
        assert_eq!(extract_parameters("invoices from This").vendor, None);
        assert_eq!(extract_parameters("invoices supplier='quarter'").vendor, None);
    }

    #[test]
    fn test_period_forms() {
        assert_eq!(
            extract_parameters("report for this month").period.as_deref(),
            Some("this_month")
        );
        assert_eq!(
            extract_parameters("reconcile last quarter").period.as_deref(),
            Some("last_quarter")
        );
        assert_eq!(
            extract_parameters("download gst report q3  2024").period.as_deref(),
            Some("Q3 2024")
        );
        assert_eq!(
            extract_parameters("filing status for November 2024").period.as_deref(),
            Some("november 2024")
        );
    }

    #[test]
    fn test_first_period_pattern_wins() {
        let params = extract_parameters("compare Q1 2024 with last month");
        assert_eq!(params.period.as_deref(), Some("last_month"));
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(
            extract_parameters("invoices status=Pending").status.as_deref(),
            Some("pending")
        );
        assert_eq!(
            extract_parameters("show failed invoices").status.as_deref(),
            Some("failed")
        );
        assert_eq!(extract_parameters("show invoices").status, None);
    }

    #[test]
    fn test_priority_levels() {
        assert_eq!(extract_parameters("urgent: GST mismatch").priority, Priority::High);
        assert_eq!(extract_parameters("critical failure").priority, Priority::High);
        assert_eq!(extract_parameters("minor typo on invoice").priority, Priority::Low);
        assert_eq!(extract_parameters("raise ticket for invoice mismatch").priority, Priority::Medium);
    }

    #[test]
    fn test_filters_serialize_without_empty_keys() {
        let params = extract_parameters("Filter invoices from IndiSky last month");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["vendor"], "IndiSky");
        assert_eq!(json["period"], "last_month");
        assert_eq!(json["priority"], "medium");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_entities_identifiers() {
        let entities = extract_entities("INV-2024-001 and inv-2024-005 relate to TCK-101, also INV-2024-001");
        assert_eq!(
            entities[&EntityKind::InvoiceId],
            vec!["INV-2024-001".to_string(), "inv-2024-005".to_string()]
        );
        assert_eq!(entities[&EntityKind::TicketId], vec!["TCK-101".to_string()]);
        assert!(!entities.contains_key(&EntityKind::Amount));
    }

    #[test]
    fn test_entities_amounts_and_periods() {
        let entities = extract_entities("Paid ₹50,000 last month and Rs. 1,200 in Q4 2024, 2 lakh pending");
        assert_eq!(
            entities[&EntityKind::Amount],
            vec!["₹50,000".to_string(), "Rs. 1,200".to_string(), "2 lakh".to_string()]
        );
        assert_eq!(
            entities[&EntityKind::Period],
            vec!["last month".to_string(), "Q4 2024".to_string()]
        );
    }

    #[test]
    fn test_entities_vendor() {
        let entities = extract_entities("why did invoices from IndiSky fail last month");
        assert_eq!(entities[&EntityKind::Vendor], vec!["IndiSky".to_string()]);

        let entities = extract_entities("invoices from last month");
        assert!(!entities.contains_key(&EntityKind::Vendor));
    }

    #[test]
    fn test_no_entities() {
        assert!(extract_entities("asdkjasd").is_empty());
    }
}
