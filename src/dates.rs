//! Date-range resolution for listing and summarization filters.
//!
//! Turns a natural-language range keyword and/or explicit date expressions
//! into an inclusive `[start, end]` pair of calendar dates. Every resolver
//! takes `today` as an argument so callers (and tests) control the anchor;
//! [`local_today`] supplies the wall-clock anchor for real invocations.

use std::sync::OnceLock;

use chrono::{Datelike, Days, Duration, Local, NaiveDate};
use regex::Regex;

use crate::error::ExpenseError;

/// Formats accepted for explicit date expressions, tried in order.
/// ISO first, then day-first numeric forms, then month-name forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Month-name forms without a year; the current year is assumed.
const YEARLESS_FORMATS: &[&str] = &["%B %d", "%b %d", "%d %B", "%d %b"];

/// Today's date in the server's local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a recognized range keyword to an inclusive `[start, end]` pair
/// anchored at `today`.
///
/// Keywords are matched case-insensitively after trimming. An unrecognized
/// keyword resolves to `None` rather than an error, so callers fall through
/// to explicit start/end expressions.
pub fn keyword_range(keyword: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let normalized = keyword.trim().to_lowercase();
    match normalized.as_str() {
        "today" => Some((today, today)),
        "yesterday" => {
            let day = today - Duration::days(1);
            Some((day, day))
        }
        "this week" => Some((monday_of(today), today)),
        "last week" => {
            let monday = monday_of(today);
            Some((monday - Duration::days(7), monday - Duration::days(1)))
        }
        "this month" => Some((first_of_month(today), today)),
        "last month" => {
            let end = first_of_month(today) - Duration::days(1);
            Some((first_of_month(end), end))
        }
        "this year" => Some((first_of_year(today), today)),
        "last year" => {
            let end = first_of_year(today) - Duration::days(1);
            Some((first_of_year(end), end))
        }
        // "last N days" and free-form variants of it ("last 30 days or so").
        other if other.contains("last") && other.contains("day") => {
            let n = digit_run(other)?;
            let start = today.checked_sub_days(Days::new(n))?;
            Some((start, today))
        }
        _ => None,
    }
}

/// Parse a single explicit date expression to a calendar date.
///
/// Accepts the relative words `today`, `now`, `yesterday`, `tomorrow`, the
/// pattern "N days ago", and the fixed format list above. Anything else is
/// an [`ExpenseError::InvalidDate`].
pub fn parse_fuzzy_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ExpenseError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    match lowered.as_str() {
        "today" | "now" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if let Some(n) = days_ago(&lowered) {
        if let Some(date) = today.checked_sub_days(Days::new(n)) {
            return Ok(date);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in YEARLESS_FORMATS {
        let with_year = format!("{} {}", trimmed, today.year());
        let format_with_year = format!("{} %Y", format);
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, &format_with_year) {
            return Ok(date);
        }
    }

    Err(ExpenseError::InvalidDate(trimmed.to_string()))
}

/// Resolve the range keyword and explicit start/end expressions into
/// independently-optional inclusive bounds.
///
/// A recognized keyword wins and sets both bounds. An unrecognized keyword
/// is silently ignored and the explicit expressions are consulted instead;
/// an unparseable explicit expression, by contrast, is an error.
pub fn resolve_range(
    date_range: &str,
    start_date: &str,
    end_date: &str,
    today: NaiveDate,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ExpenseError> {
    if let Some((start, end)) = keyword_range(date_range, today) {
        return Ok((Some(start), Some(end)));
    }

    let start = match start_date.trim() {
        "" => None,
        expression => Some(parse_fuzzy_date(expression, today)?),
    };
    let end = match end_date.trim() {
        "" => None,
        expression => Some(parse_fuzzy_date(expression, today)?),
    };
    Ok((start, end))
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// First run of digits embedded in `text`, if any.
fn digit_run(text: &str) -> Option<u64> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("valid regex"));
    digits.find(text)?.as_str().parse().ok()
}

/// Number of days for a "N days ago" expression.
fn days_ago(text: &str) -> Option<u64> {
    static DAYS_AGO: OnceLock<Regex> = OnceLock::new();
    let pattern =
        DAYS_AGO.get_or_init(|| Regex::new(r"^(\d+)\s*days?\s+ago$").expect("valid regex"));
    let captures = pattern.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}
