//! Resolve extracted period tokens to calendar month spans

use chrono::{Datelike, NaiveDate};

/// Month the invoice fixture treats as "now"; December 2024 is last month
pub const REFERENCE_MONTH: (i32, u32) = (2025, 1);

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Inclusive range of (year, month) pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub start: (i32, u32),
    pub end: (i32, u32),
}

impl MonthSpan {
    fn single(year: i32, month: u32) -> Self {
        Self {
            start: (year, month),
            end: (year, month),
        }
    }

    fn quarter(year: i32, quarter: u32) -> Self {
        let first = (quarter - 1) * 3 + 1;
        Self {
            start: (year, first),
            end: (year, first + 2),
        }
    }

    /// Whether an ISO `YYYY-MM-DD` date falls inside the span
    pub fn contains(&self, date: &str) -> bool {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(d) => {
                let key = (d.year(), d.month());
                self.start <= key && key <= self.end
            }
            Err(_) => false,
        }
    }
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Map `last_month`, `this_month`, `last_quarter`, `Q<n> <year>` or
/// `<month> <year>` onto months, relative to `reference`
pub fn resolve_period(period: &str, reference: (i32, u32)) -> Option<MonthSpan> {
    let lower = period.trim().to_lowercase();
    match lower.as_str() {
        "last_month" => {
            let (y, m) = previous_month(reference);
            return Some(MonthSpan::single(y, m));
        }
        "this_month" => return Some(MonthSpan::single(reference.0, reference.1)),
        "last_quarter" => {
            let (year, month) = reference;
            let current = quarter_of(month);
            return Some(if current == 1 {
                MonthSpan::quarter(year - 1, 4)
            } else {
                MonthSpan::quarter(year, current - 1)
            });
        }
        _ => {}
    }

    let compact: String = lower.split_whitespace().collect();
    if let Some(rest) = compact.strip_prefix('q') {
        let quarter = rest.get(..1)?.parse::<u32>().ok()?;
        let year = rest.get(1..)?.parse::<i32>().ok()?;
        return (1..=4)
            .contains(&quarter)
            .then(|| MonthSpan::quarter(year, quarter));
    }

    let mut words = lower.split_whitespace();
    let name = words.next()?;
    let year = words.next()?.parse::<i32>().ok()?;
    let month = MONTH_PREFIXES
        .iter()
        .position(|p| name.starts_with(p))? as u32
        + 1;
    Some(MonthSpan::single(year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_periods() {
        assert_eq!(
            resolve_period("last_month", REFERENCE_MONTH),
            Some(MonthSpan::single(2024, 12))
        );
        assert_eq!(
            resolve_period("this_month", REFERENCE_MONTH),
            Some(MonthSpan::single(2025, 1))
        );
        assert_eq!(
            resolve_period("last_quarter", REFERENCE_MONTH),
            Some(MonthSpan::quarter(2024, 4))
        );
        assert_eq!(
            resolve_period("last_quarter", (2024, 8)),
            Some(MonthSpan::quarter(2024, 2))
        );
    }

    #[test]
    fn test_explicit_periods() {
        let q1 = resolve_period("Q1 2024", REFERENCE_MONTH).unwrap();
        assert_eq!(q1.start, (2024, 1));
        assert_eq!(q1.end, (2024, 3));
        assert_eq!(resolve_period("Q42024", REFERENCE_MONTH), Some(MonthSpan::quarter(2024, 4)));

        assert_eq!(
            resolve_period("december 2024", REFERENCE_MONTH),
            Some(MonthSpan::single(2024, 12))
        );
        assert_eq!(
            resolve_period("sept 2023", REFERENCE_MONTH),
            Some(MonthSpan::single(2023, 9))
        );
    }

    #[test]
    fn test_unknown_period() {
        assert_eq!(resolve_period("someday", REFERENCE_MONTH), None);
        assert_eq!(resolve_period("Q5 2024", REFERENCE_MONTH), None);
    }

    #[test]
    fn test_span_contains() {
        let span = MonthSpan::quarter(2024, 4);
        assert!(span.contains("2024-12-20"));
        assert!(span.contains("2024-10-01"));
        assert!(!span.contains("2024-09-30"));
        assert!(!span.contains("not a date"));
    }
}
