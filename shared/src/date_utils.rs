//! Date helpers shared by the editor, the statistics and the calendar popover.

use chrono::{Datelike, Duration, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Full month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("January")
}

/// Three-letter month name for a 1-based month number
pub fn short_month_name(month: u32) -> &'static str {
    &month_name(month)[..3]
}

/// "January 2025"
pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

/// "Jan 2025", the label the store uses for monthly aggregates
pub fn short_month_label(year: i32, month: u32) -> String {
    format!("{} {}", short_month_name(month), year)
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long display form, e.g. "October 19th, 2026"
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        month_name(date.month()),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// Parse `YYYY-MM-DD`, also accepting a longer timestamp that starts with one
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 30,
    }
}

/// (year, month) of the month before the given one
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// (year, month) of the month after the given one
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// One cell of the calendar popover grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

/// Six Sunday-first weeks covering the given month, padded with the
/// neighbouring months' days.
pub fn calendar_grid(year: i32, month: u32) -> Vec<CalendarCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(lead);

    (0..42)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarCell {
                date,
                in_month: date.month() == month && date.year() == year,
            }
        })
        .collect()
}

/// Serde adapter: writes `YYYY-MM-DD`, reads either that or an RFC 3339
/// timestamp and keeps its calendar date.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw)))
    }
}
