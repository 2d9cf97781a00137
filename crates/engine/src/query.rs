use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dates::StayRange;

const MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

/// `10-15 Aug`
static SAME_MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)(\d{{1,2}})-(\d{{1,2}})\s+({})", MONTHS))
        .expect("SAME_MONTH_RANGE should compile - this is a bug")
});

/// `10 Aug to 15 Sep`
static SPANNING_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(\d{{1,2}})\s+({m})\s+to\s+(\d{{1,2}})\s+({m})",
        m = MONTHS
    ))
    .expect("SPANNING_RANGE should compile - this is a bug")
});

fn month_number(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_ascii_lowercase();
    MONTHS
        .split('|')
        .position(|m| m == lower)
        .map(|i| i as u32 + 1)
}

fn day_in(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month_number(month)?, day.parse().ok()?)
}

/// Pull a stay window out of free text such as `"rooms for 10-15 Aug"` or
/// `"10 Aug to 15 Aug"`. `year` is the caller's current year.
///
/// Returns `None` when no pattern matches, a day does not exist, or the
/// window is not increasing.
pub fn parse_natural_date_query(text: &str, year: i32) -> Option<StayRange> {
    let (start, end) = if let Some(caps) = SAME_MONTH_RANGE.captures(text) {
        (
            day_in(year, &caps[3], &caps[1])?,
            day_in(year, &caps[3], &caps[2])?,
        )
    } else if let Some(caps) = SPANNING_RANGE.captures(text) {
        (
            day_in(year, &caps[2], &caps[1])?,
            day_in(year, &caps[4], &caps[3])?,
        )
    } else {
        return None;
    };
    StayRange::new(start, end, "Date query").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
