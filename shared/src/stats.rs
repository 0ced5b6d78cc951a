//! Statistics folded from the fetched record list, plus chart-ready series
//! built from the store's monthly aggregates.
//!
//! Everything here is recomputed from scratch on every refresh.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::date_utils::month_label;
use crate::{AttendanceRecord, MonthlyStat};

/// Overall counters across a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStat {
    pub total: u32,
    pub attended: u32,
    pub missed: u32,
}

/// One wedge of the attended/missed pie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u32,
}

impl OverviewStat {
    /// Attendance percentage, or `None` when no classes were held
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.attended as f64 / self.total as f64 * 100.0)
        }
    }

    /// Display form of [`percent`](Self::percent): `87.5%`, `100%`, and `0%`
    /// when there is nothing to divide by.
    pub fn percent_label(&self) -> String {
        match self.percent() {
            None => "0%".to_string(),
            Some(p) if p.fract() == 0.0 => format!("{:.0}%", p),
            Some(p) => format!("{:.1}%", p),
        }
    }

    pub fn slices(&self) -> [ChartSlice; 2] {
        [
            ChartSlice { label: "Classes Taken", value: self.attended },
            ChartSlice { label: "Classes Missed", value: self.missed },
        ]
    }

    fn add_record(mut self, record: &AttendanceRecord) -> Self {
        self.total = self.total.saturating_add(record.total_classes);
        self.attended = self.attended.saturating_add(record.attended_count());
        self.missed = self.missed.saturating_add(record.missed_classes());
        self
    }
}

/// Fold a record list into overview counters
pub fn overview(records: &[AttendanceRecord]) -> OverviewStat {
    records
        .iter()
        .fold(OverviewStat::default(), OverviewStat::add_record)
}

pub fn overview_for_month(records: &[AttendanceRecord], year: i32, month: u32) -> OverviewStat {
    records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .fold(OverviewStat::default(), OverviewStat::add_record)
}

/// Sum of the store's monthly aggregates
pub fn overview_from_monthly(stats: &[MonthlyStat]) -> OverviewStat {
    stats.iter().fold(OverviewStat::default(), |acc, s| OverviewStat {
        total: acc.total.saturating_add(s.total),
        attended: acc.attended.saturating_add(s.present),
        missed: acc.missed.saturating_add(s.absent),
    })
}

/// Distinct (year, month) pairs that have records, newest first
pub fn months_present(records: &[AttendanceRecord]) -> Vec<(i32, u32)> {
    let mut months: Vec<(i32, u32)> = records
        .iter()
        .map(|r| (r.date.year(), r.date.month()))
        .collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

/// Month selection of the overview card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Month { year: i32, month: u32 },
}

impl MonthFilter {
    pub fn label(&self) -> String {
        match self {
            MonthFilter::All => "Show All".to_string(),
            MonthFilter::Month { year, month } => month_label(*year, *month),
        }
    }

    /// Stable key for `<select>` options: `all` or `YYYY-MM`
    pub fn key(&self) -> String {
        match self {
            MonthFilter::All => "all".to_string(),
            MonthFilter::Month { year, month } => format!("{:04}-{:02}", year, month),
        }
    }

    pub fn from_key(key: &str) -> Self {
        let mut parts = key.splitn(2, '-');
        match (
            parts.next().and_then(|y| y.parse::<i32>().ok()),
            parts.next().and_then(|m| m.parse::<u32>().ok()),
        ) {
            (Some(year), Some(month)) if (1..=12).contains(&month) => {
                MonthFilter::Month { year, month }
            }
            _ => MonthFilter::All,
        }
    }

    /// "Show All" followed by each month that has records
    pub fn options(records: &[AttendanceRecord]) -> Vec<MonthFilter> {
        std::iter::once(MonthFilter::All)
            .chain(
                months_present(records)
                    .into_iter()
                    .map(|(year, month)| MonthFilter::Month { year, month }),
            )
            .collect()
    }

    pub fn apply(&self, records: &[AttendanceRecord]) -> OverviewStat {
        match self {
            MonthFilter::All => overview(records),
            MonthFilter::Month { year, month } => overview_for_month(records, *year, *month),
        }
    }
}

/// Which counter a bar chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Present,
    Absent,
    Total,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Present => "Present Classes",
            Metric::Absent => "Absent Classes",
            Metric::Total => "Total Classes",
        }
    }

    pub fn legend(self) -> &'static str {
        match self {
            Metric::Present => "Present",
            Metric::Absent => "Absent",
            Metric::Total => "Total",
        }
    }
}

/// Column-oriented view of the monthly aggregates for bar charts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub present: Vec<u32>,
    pub absent: Vec<u32>,
    pub total: Vec<u32>,
}

impl MonthlySeries {
    pub fn from_stats(stats: &[MonthlyStat]) -> Self {
        let mut series = Self::default();
        for stat in stats {
            series.labels.push(stat.month.clone());
            series.present.push(stat.present);
            series.absent.push(stat.absent);
            series.total.push(stat.total);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn values(&self, metric: Metric) -> &[u32] {
        match metric {
            Metric::Present => &self.present,
            Metric::Absent => &self.absent,
            Metric::Total => &self.total,
        }
    }

    /// Largest value across the given metrics, at least 1 so axes never collapse
    pub fn max_value(&self, metrics: &[Metric]) -> u32 {
        metrics
            .iter()
            .flat_map(|m| self.values(*m).iter().copied())
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), attended: usize, total: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("{:?}", date),
            owner_email: "student@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            attended_classes: (0..attended).map(|i| format!("Class {}", i)).collect(),
            canceled_classes: vec![],
            total_classes: total,
        }
    }

    #[test]
    fn test_overview_of_empty_list() {
        let stats = overview(&[]);
        assert_eq!(stats, OverviewStat { total: 0, attended: 0, missed: 0 });
        assert_eq!(stats.percent(), None);
        assert_eq!(stats.percent_label(), "0%");
    }

    #[test]
    fn test_overview_two_records() {
        let records = vec![record((2025, 1, 6), 4, 5), record((2025, 1, 7), 3, 3)];
        let stats = overview(&records);

        assert_eq!(stats.total, 8);
        assert_eq!(stats.attended, 7);
        assert_eq!(stats.missed, 1);
        assert_eq!(stats.percent(), Some(87.5));
        assert_eq!(stats.percent_label(), "87.5%");
    }

    #[test]
    fn test_percent_label_formats() {
        let full = OverviewStat { total: 4, attended: 4, missed: 0 };
        assert_eq!(full.percent_label(), "100%");

        let third = OverviewStat { total: 3, attended: 2, missed: 1 };
        assert_eq!(third.percent_label(), "66.7%");
    }

    #[test]
    fn test_overview_for_month_and_filters() {
        let records = vec![
            record((2025, 1, 6), 4, 5),
            record((2025, 2, 3), 1, 6),
            record((2025, 2, 4), 5, 5),
            record((2024, 12, 30), 0, 6),
        ];

        assert_eq!(months_present(&records), vec![(2025, 2), (2025, 1), (2024, 12)]);

        let feb = overview_for_month(&records, 2025, 2);
        assert_eq!(feb, OverviewStat { total: 11, attended: 6, missed: 5 });

        let options = MonthFilter::options(&records);
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], MonthFilter::All);
        assert_eq!(options[1].label(), "February 2025");
        assert_eq!(options[1].apply(&records), feb);
        assert_eq!(options[0].apply(&records), overview(&records));
    }

    #[test]
    fn test_month_filter_keys() {
        let filter = MonthFilter::Month { year: 2025, month: 3 };
        assert_eq!(filter.key(), "2025-03");
        assert_eq!(MonthFilter::from_key("2025-03"), filter);
        assert_eq!(MonthFilter::from_key("all"), MonthFilter::All);
        assert_eq!(MonthFilter::from_key("2025-13"), MonthFilter::All);
    }

    #[test]
    fn test_overview_from_monthly() {
        let stats = vec![
            MonthlyStat { month: "Jan".into(), present: 40, absent: 10, total: 50 },
            MonthlyStat { month: "Feb".into(), present: 20, absent: 5, total: 25 },
        ];
        let sum = overview_from_monthly(&stats);
        assert_eq!(sum, OverviewStat { total: 75, attended: 60, missed: 15 });
        assert_eq!(sum.percent_label(), "80%");
    }

    #[test]
    fn test_monthly_series() {
        let stats = vec![
            MonthlyStat { month: "Jan 2025".into(), present: 40, absent: 10, total: 50 },
            MonthlyStat { month: "Feb 2025".into(), present: 20, absent: 55, total: 75 },
        ];
        let series = MonthlySeries::from_stats(&stats);

        assert_eq!(series.len(), 2);
        assert_eq!(series.labels, vec!["Jan 2025", "Feb 2025"]);
        assert_eq!(series.values(Metric::Absent), &[10, 55]);
        assert_eq!(series.max_value(&[Metric::Present]), 40);
        assert_eq!(series.max_value(&[Metric::Present, Metric::Absent]), 55);
        assert_eq!(MonthlySeries::default().max_value(&[Metric::Total]), 1);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let records = vec![record((2025, 1, 6), 1, u32::MAX), record((2025, 1, 7), 1, 5)];
        let stats = overview(&records);
        assert_eq!(stats.total, u32::MAX);
        assert_eq!(stats.attended, 2);
        assert_eq!(stats.missed, u32::MAX);
        assert!(stats.percent().unwrap() < 1.0);

        let monthly = vec![
            MonthlyStat { month: "Jan".into(), present: u32::MAX, absent: 1, total: u32::MAX },
            MonthlyStat { month: "Feb".into(), present: 3, absent: 1, total: 4 },
        ];
        let sum = overview_from_monthly(&monthly);
        assert_eq!(sum, OverviewStat { total: u32::MAX, attended: u32::MAX, missed: 2 });
    }

    #[test]
    fn test_slices() {
        let stats = OverviewStat { total: 8, attended: 7, missed: 1 };
        let [taken, missed] = stats.slices();
        assert_eq!(taken, ChartSlice { label: "Classes Taken", value: 7 });
        assert_eq!(missed.value, 1);
    }
}
