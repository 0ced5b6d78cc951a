//! Shared attendance model used by the web client.
//!
//! Everything in this crate is platform independent: the wire types exchanged
//! with the remote attendance store, the weekly class schedule, the editing
//! state machine and the statistics folded from fetched records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod config;
pub mod date_utils;
pub mod editor;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod store;

pub use config::AppConfig;
pub use editor::{AttendanceEditor, EditorError, EditorMode, EditorPhase};
pub use schedule::{classes_for, classes_for_weekday, scheduled_count, Weekday};
pub use session::{ActiveView, DashboardModel, Identity, Modal, Page, Route, Theme};
pub use stats::{overview, MonthFilter, MonthlySeries, OverviewStat};
pub use store::{InMemoryRecordStore, RecordStore, StoreError};

/// One user's attendance entry for one calendar date, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Opaque identifier assigned by the store
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "emailAddress")]
    pub owner_email: String,
    #[serde(with = "date_utils::flexible_date")]
    pub date: NaiveDate,
    /// Classes marked present (wire name `classes`)
    #[serde(rename = "classes")]
    pub attended_classes: Vec<String>,
    /// Classes that did not take place that day
    #[serde(default)]
    pub canceled_classes: Vec<String>,
    /// Scheduled classes minus canceled ones, fixed when the record was written
    pub total_classes: u32,
}

/// Present when at least one class was attended that day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Present,
    Absent,
}

impl RecordStatus {
    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Present => "Present",
            RecordStatus::Absent => "Absent",
        }
    }
}

/// Ways a fetched record can break the attendance invariants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("class '{0}' is both attended and canceled")]
    AttendedAndCanceled(String),
    #[error("{attended} attended classes exceed the {total} held")]
    AttendedExceedsTotal { attended: u32, total: u32 },
    #[error("class '{0}' is listed more than once")]
    DuplicateClass(String),
}

impl AttendanceRecord {
    pub fn attended_count(&self) -> u32 {
        self.attended_classes.len() as u32
    }

    /// Classes held but not attended
    pub fn missed_classes(&self) -> u32 {
        self.total_classes.saturating_sub(self.attended_count())
    }

    pub fn status(&self) -> RecordStatus {
        if self.attended_classes.is_empty() {
            RecordStatus::Absent
        } else {
            RecordStatus::Present
        }
    }

    /// Check the record invariants: attended and canceled are disjoint,
    /// neither list repeats a name, and attended never exceeds the total.
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut seen = HashSet::new();
        for name in &self.attended_classes {
            if !seen.insert(name.as_str()) {
                return Err(RecordError::DuplicateClass(name.clone()));
            }
        }

        let mut canceled = HashSet::new();
        for name in &self.canceled_classes {
            if !canceled.insert(name.as_str()) {
                return Err(RecordError::DuplicateClass(name.clone()));
            }
            if seen.contains(name.as_str()) {
                return Err(RecordError::AttendedAndCanceled(name.clone()));
            }
        }

        if self.attended_count() > self.total_classes {
            return Err(RecordError::AttendedExceedsTotal {
                attended: self.attended_count(),
                total: self.total_classes,
            });
        }

        Ok(())
    }

    /// Attended classes joined for table display, `-` when none
    pub fn attended_summary(&self) -> String {
        if self.attended_classes.is_empty() {
            "-".to_string()
        } else {
            self.attended_classes.join(", ")
        }
    }
}

impl fmt::Display for AttendanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} ({}/{} attended)",
            self.id,
            self.date,
            self.attended_count(),
            self.total_classes
        )
    }
}

/// Sort records so the most recent date comes first
pub fn sort_newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Per-month aggregate computed by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMonthlyStat")]
pub struct MonthlyStat {
    pub month: String,
    pub present: u32,
    pub absent: u32,
    pub total: u32,
}

/// Wire shape of [`MonthlyStat`]; older store versions capitalize the counters
/// and omit the total.
#[derive(Deserialize)]
struct RawMonthlyStat {
    month: String,
    #[serde(default, alias = "Present")]
    present: u32,
    #[serde(default, alias = "Absent")]
    absent: u32,
    #[serde(default, alias = "Total")]
    total: Option<u32>,
}

impl From<RawMonthlyStat> for MonthlyStat {
    fn from(raw: RawMonthlyStat) -> Self {
        Self {
            total: raw
                .total
                .unwrap_or_else(|| raw.present.saturating_add(raw.absent)),
            month: raw.month,
            present: raw.present,
            absent: raw.absent,
        }
    }
}

/// Body of `POST /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub email_address: String,
    #[serde(with = "date_utils::flexible_date")]
    pub date: NaiveDate,
    pub classes: Vec<String>,
    pub total_classes: u32,
    pub canceled_classes: Vec<String>,
}

/// Body of `PUT /{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub classes: Vec<String>,
    pub total_classes: u32,
    pub canceled_classes: Vec<String>,
}

/// A day's selections ready to be written, with the denominator already fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub date: NaiveDate,
    pub attended_classes: Vec<String>,
    pub canceled_classes: Vec<String>,
    pub total_classes: u32,
}

impl RecordDraft {
    pub fn missed_classes(&self) -> u32 {
        self.total_classes
            .saturating_sub(self.attended_classes.len() as u32)
    }

    pub fn to_create_request(&self, owner_email: &str) -> CreateRecordRequest {
        CreateRecordRequest {
            email_address: owner_email.to_string(),
            date: self.date,
            classes: self.attended_classes.clone(),
            total_classes: self.total_classes,
            canceled_classes: self.canceled_classes.clone(),
        }
    }

    pub fn to_update_request(&self) -> UpdateRecordRequest {
        UpdateRecordRequest {
            classes: self.attended_classes.clone(),
            total_classes: self.total_classes,
            canceled_classes: self.canceled_classes.clone(),
        }
    }
}
