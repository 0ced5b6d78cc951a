//! Weekly class timetable.
//!
//! The table is indexed by [`Weekday::ordinal`], Sunday first. Class names are
//! unique within a day since attendance is tracked by name.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

const SCHEDULE: [&[&str]; 7] = [
    // Sunday
    &[],
    // Monday
    &["Java Lab 1", "Java Lab 2", "SE", "IMED", "DM", "DS/AI"],
    // Tuesday
    &["SE Lab 1", "SE Lab 2", "SE", "IMED", "PDS"],
    // Wednesday
    &["SE Lab 1", "SE Lab 2", "DS/AI Lab 1", "DS/AI Lab 2", "DM", "DS/AI"],
    // Thursday
    &["Java Lab 1", "Java Lab 2", "SE", "IMED", "PDS"],
    // Friday
    &["SE", "Java 1", "Java 2", "IMED", "DM", "DS/AI"],
    // Saturday
    &["Java 1", "Java 2", "DM", "DS/AI"],
];

pub fn classes_for_weekday(day: Weekday) -> &'static [&'static str] {
    SCHEDULE[day.ordinal()]
}

/// Ordered class list for the weekday of `date`
pub fn classes_for(date: NaiveDate) -> &'static [&'static str] {
    classes_for_weekday(Weekday::from_date(date))
}

pub fn scheduled_count(date: NaiveDate) -> usize {
    classes_for(date).len()
}

pub fn is_scheduled(date: NaiveDate, class_name: &str) -> bool {
    classes_for(date).contains(&class_name)
}

/// Position of a class in its day's schedule, used to keep selections in
/// timetable order. Unknown names sort last.
pub(crate) fn schedule_position(date: NaiveDate, class_name: &str) -> usize {
    classes_for(date)
        .iter()
        .position(|c| *c == class_name)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_from_date() {
        assert_eq!(Weekday::from_date(ymd(2025, 1, 5)), Weekday::Sunday);
        assert_eq!(Weekday::from_date(ymd(2025, 1, 6)), Weekday::Monday);
        assert_eq!(Weekday::from_date(ymd(2025, 1, 11)), Weekday::Saturday);
        assert_eq!(Weekday::Wednesday.name(), "Wednesday");
    }

    #[test]
    fn test_sunday_has_no_classes() {
        assert!(classes_for(ymd(2025, 1, 5)).is_empty());
        assert!(classes_for(ymd(2026, 10, 18)).is_empty());
    }

    #[test]
    fn test_classes_follow_weekday() {
        // Every date in a fortnight maps to its weekday's list
        for offset in 0..14 {
            let date = ymd(2025, 3, 1) + chrono::Duration::days(offset);
            assert_eq!(
                classes_for(date),
                classes_for_weekday(Weekday::from_date(date))
            );
        }

        assert_eq!(scheduled_count(ymd(2025, 1, 6)), 6);
        assert_eq!(scheduled_count(ymd(2025, 1, 7)), 5);
        assert_eq!(classes_for(ymd(2025, 1, 10))[1], "Java 1");
    }

    #[test]
    fn test_class_names_unique_per_day() {
        for day in Weekday::ALL {
            let names = classes_for_weekday(day);
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "duplicate class on {}", day.name());
        }
    }

    #[test]
    fn test_schedule_position() {
        let monday = ymd(2025, 1, 6);
        assert!(is_scheduled(monday, "DM"));
        assert!(!is_scheduled(monday, "PDS"));
        assert_eq!(schedule_position(monday, "SE"), 2);
        assert_eq!(schedule_position(monday, "PDS"), usize::MAX);
    }
}
