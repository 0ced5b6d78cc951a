//! # Record Store
//!
//! Abstraction over the remote attendance store. The browser client talks to
//! the store over HTTP; [`InMemoryRecordStore`] is a consistent in-process
//! implementation used by tests.
//!
//! Every operation is a single best-effort round trip: no retries, no caching.

use chrono::Datelike;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::date_utils::short_month_label;
use crate::{AttendanceRecord, CreateRecordRequest, MonthlyStat, UpdateRecordRequest};

/// Failure of a single store round trip
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
    #[error("request aborted")]
    Aborted,
    #[error("record {0} not found")]
    NotFound(String),
}

impl StoreError {
    /// Aborts happen on teardown and are not worth reporting
    pub fn is_aborted(&self) -> bool {
        matches!(self, StoreError::Aborted)
    }
}

/// The five operations the client needs from the attendance store.
///
/// Futures are not required to be `Send`: the browser client runs on a
/// single-threaded executor.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn create(&self, request: &CreateRecordRequest) -> Result<(), StoreError>;

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn update(&self, id: &str, request: &UpdateRecordRequest) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn monthly_stats(&self, owner_email: &str) -> Result<Vec<MonthlyStat>, StoreError>;
}

/// Drop records that break the attendance invariants, logging each one.
pub fn retain_valid(records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping inconsistent record {}: {}", record.id, e);
                false
            }
        })
        .collect()
}

/// Decode a record list one element at a time. Elements with the wrong shape
/// are logged and skipped, then the rest go through [`retain_valid`].
pub fn decode_records(values: Vec<serde_json::Value>) -> Vec<AttendanceRecord> {
    let records = values
        .into_iter()
        .filter_map(|value| {
            let id = value
                .get("_id")
                .or_else(|| value.get("id"))
                .and_then(|v| v.as_str())
                .unwrap_or("<unknown>")
                .to_string();
            match serde_json::from_value::<AttendanceRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping malformed record {}: {}", id, e);
                    None
                }
            }
        })
        .collect();
    retain_valid(records)
}

/// Store kept in process memory. Reads always observe preceding writes.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<AttendanceRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AttendanceRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Copy of every stored record, across all owners
    pub fn snapshot(&self) -> Vec<AttendanceRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AttendanceRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for InMemoryRecordStore {
    async fn create(&self, request: &CreateRecordRequest) -> Result<(), StoreError> {
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            owner_email: request.email_address.clone(),
            date: request.date,
            attended_classes: request.classes.clone(),
            canceled_classes: request.canceled_classes.clone(),
            total_classes: request.total_classes,
        };
        debug!("Storing record {}", record);
        self.lock().push(record);
        Ok(())
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .filter(|r| r.owner_email == owner_email)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, request: &UpdateRecordRequest) -> Result<(), StoreError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.attended_classes = request.classes.clone();
        record.canceled_classes = request.canceled_classes.clone();
        record.total_classes = request.total_classes;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn monthly_stats(&self, owner_email: &str) -> Result<Vec<MonthlyStat>, StoreError> {
        let mut months: BTreeMap<(i32, u32), (u32, u32, u32)> = BTreeMap::new();
        for record in self.lock().iter().filter(|r| r.owner_email == owner_email) {
            let entry = months
                .entry((record.date.year(), record.date.month()))
                .or_default();
            entry.0 = entry.0.saturating_add(record.attended_count());
            entry.1 = entry.1.saturating_add(record.missed_classes());
            entry.2 = entry.2.saturating_add(record.total_classes);
        }

        Ok(months
            .into_iter()
            .map(|((year, month), (present, absent, total))| MonthlyStat {
                month: short_month_label(year, month),
                present,
                absent,
                total,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const OWNER: &str = "student@example.com";

    fn create_request(date: NaiveDate, classes: &[&str], total: u32) -> CreateRecordRequest {
        CreateRecordRequest {
            email_address: OWNER.to_string(),
            date,
            classes: classes.iter().map(|s| s.to_string()).collect(),
            total_classes: total,
            canceled_classes: vec![],
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_by_owner() {
        let store = InMemoryRecordStore::new();
        store.create(&create_request(ymd(2025, 1, 6), &["SE"], 6)).await.unwrap();
        store
            .create(&CreateRecordRequest {
                email_address: "someone@else.com".to_string(),
                ..create_request(ymd(2025, 1, 6), &[], 6)
            })
            .await
            .unwrap();

        let records = store.list_by_owner(OWNER).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attended_classes, vec!["SE"]);
        assert!(!records[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_deleted_record_is_no_longer_listed() {
        let store = InMemoryRecordStore::new();
        store.create(&create_request(ymd(2025, 1, 6), &["SE"], 6)).await.unwrap();
        store.create(&create_request(ymd(2025, 1, 7), &["PDS"], 5)).await.unwrap();

        let records = store.list_by_owner(OWNER).await.unwrap();
        let doomed = records[0].id.clone();
        store.delete(&doomed).await.unwrap();

        let remaining = store.list_by_owner(OWNER).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|r| r.id != doomed));
        assert_eq!(store.delete(&doomed).await, Err(StoreError::NotFound(doomed.clone())));
    }

    #[tokio::test]
    async fn test_update_replaces_selections() {
        let store = InMemoryRecordStore::new();
        store.create(&create_request(ymd(2025, 1, 6), &["SE"], 6)).await.unwrap();
        let id = store.list_by_owner(OWNER).await.unwrap()[0].id.clone();

        store
            .update(
                &id,
                &UpdateRecordRequest {
                    classes: vec!["DM".to_string(), "IMED".to_string()],
                    total_classes: 5,
                    canceled_classes: vec!["SE".to_string()],
                },
            )
            .await
            .unwrap();

        let record = &store.list_by_owner(OWNER).await.unwrap()[0];
        assert_eq!(record.attended_classes, vec!["DM", "IMED"]);
        assert_eq!(record.canceled_classes, vec!["SE"]);
        assert_eq!(record.total_classes, 5);
        assert_eq!(record.date, ymd(2025, 1, 6));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = InMemoryRecordStore::new();
        let request = UpdateRecordRequest {
            classes: vec![],
            total_classes: 0,
            canceled_classes: vec![],
        };
        assert!(matches!(
            store.update("missing", &request).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_monthly_stats_grouped_by_month() {
        let store = InMemoryRecordStore::new();
        store.create(&create_request(ymd(2025, 1, 6), &["SE", "DM"], 6)).await.unwrap();
        store.create(&create_request(ymd(2025, 1, 7), &["PDS"], 5)).await.unwrap();
        store.create(&create_request(ymd(2025, 2, 3), &[], 6)).await.unwrap();

        let stats = store.monthly_stats(OWNER).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].month, "Jan 2025");
        assert_eq!((stats[0].present, stats[0].absent, stats[0].total), (3, 8, 11));
        assert_eq!(stats[1].month, "Feb 2025");
        assert_eq!((stats[1].present, stats[1].absent, stats[1].total), (0, 6, 6));
    }

    #[test]
    fn test_retain_valid_drops_inconsistent_records() {
        let good = AttendanceRecord {
            id: "good".to_string(),
            owner_email: OWNER.to_string(),
            date: ymd(2025, 1, 6),
            attended_classes: vec!["SE".to_string()],
            canceled_classes: vec![],
            total_classes: 6,
        };
        let bad = AttendanceRecord {
            id: "bad".to_string(),
            canceled_classes: vec!["SE".to_string()],
            ..good.clone()
        };

        let kept = retain_valid(vec![good.clone(), bad]);
        assert_eq!(kept, vec![good]);
    }

    #[test]
    fn test_decode_records_skips_malformed_elements() {
        let values: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
                {"_id": "good", "emailAddress": "student@example.com", "date": "2025-01-06",
                 "classes": ["SE"], "totalClasses": 6},
                {"_id": "legacy", "emailAddress": "student@example.com", "date": "2025-01-07",
                 "classes": ["PDS"]},
                {"_id": "overlap", "emailAddress": "student@example.com", "date": "2025-01-08",
                 "classes": ["SE"], "canceledClasses": ["SE"], "totalClasses": 5},
                "not a record"
            ]"#,
        )
        .unwrap();

        let records = decode_records(values);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "good");
        assert_eq!(records[0].total_classes, 6);
    }

    #[tokio::test]
    async fn test_monthly_stats_saturate_on_huge_counts() {
        let store = InMemoryRecordStore::new();
        store.create(&create_request(ymd(2025, 1, 6), &[], u32::MAX)).await.unwrap();
        store.create(&create_request(ymd(2025, 1, 7), &[], 5)).await.unwrap();

        let stats = store.monthly_stats(OWNER).await.unwrap();
        assert_eq!(stats[0].total, u32::MAX);
        assert_eq!(stats[0].absent, u32::MAX);
    }

    #[test]
    fn test_encode_error_message() {
        let e = StoreError::Encode("key must be a string".to_string());
        assert_eq!(e.to_string(), "could not encode request: key must be a string");
    }

    #[test]
    fn test_aborted_is_flagged() {
        assert!(StoreError::Aborted.is_aborted());
        assert!(!StoreError::Network("offline".to_string()).is_aborted());
    }
}
