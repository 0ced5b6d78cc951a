//! # Attendance Editor
//!
//! State machine behind the add/edit attendance dialogs:
//!
//! ```text
//! Idle -> DateSelected -> ClassesToggled -> Saved | Canceled
//!                                 \-> Failed (selections kept for retry)
//! ```
//!
//! Attended and canceled classes are disjoint at every step. A class that is
//! canceled cannot be marked attended until the cancellation is undone, and
//! "mark all present" only covers classes that actually took place.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::schedule::{classes_for, is_scheduled, schedule_position};
use crate::store::{RecordStore, StoreError};
use crate::{AttendanceRecord, RecordDraft};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// New record for the signed-in user; the date is chosen in the dialog
    Create { owner_email: String },
    /// Existing record; its date is fixed
    Edit { record_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    DateSelected,
    ClassesToggled,
    Saved,
    Canceled,
    /// The last commit failed; selections are preserved
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("select a date first")]
    NoDateSelected,
    #[error("the date of an existing record cannot be changed")]
    DateLocked,
    #[error("'{0}' is not scheduled on the selected day")]
    UnknownClass(String),
    #[error("this editing session has already ended")]
    NotEditable,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEditor {
    mode: EditorMode,
    phase: EditorPhase,
    date: Option<NaiveDate>,
    attended: Vec<String>,
    canceled: Vec<String>,
    last_error: Option<String>,
}

impl AttendanceEditor {
    /// Start a session for a new record owned by `owner_email`
    pub fn new(owner_email: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Create {
                owner_email: owner_email.into(),
            },
            phase: EditorPhase::Idle,
            date: None,
            attended: Vec::new(),
            canceled: Vec::new(),
            last_error: None,
        }
    }

    /// Start a session that edits `record` in place. Selections that are no
    /// longer on that weekday's schedule are dropped.
    pub fn open_for_edit(record: &AttendanceRecord) -> Self {
        let keep = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .filter(|name| is_scheduled(record.date, name))
                .cloned()
                .collect()
        };

        let canceled = keep(&record.canceled_classes);
        let attended: Vec<String> = keep(&record.attended_classes)
            .into_iter()
            .filter(|name| !canceled.contains(name))
            .collect();

        if attended.len() != record.attended_classes.len() {
            debug!(
                "Record {} carries classes outside the {} schedule; they were dropped",
                record.id, record.date
            );
        }

        let mut editor = Self {
            mode: EditorMode::Edit {
                record_id: record.id.clone(),
            },
            phase: EditorPhase::DateSelected,
            date: Some(record.date),
            attended,
            canceled,
            last_error: None,
        };
        editor.sort_selections();
        editor
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn attended(&self) -> &[String] {
        &self.attended
    }

    pub fn canceled(&self) -> &[String] {
        &self.canceled
    }

    pub fn is_attended(&self, class_name: &str) -> bool {
        self.attended.iter().any(|c| c == class_name)
    }

    pub fn is_canceled(&self, class_name: &str) -> bool {
        self.canceled.iter().any(|c| c == class_name)
    }

    /// Message from the last failed commit, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Selectable classes for the chosen date, empty until a date is chosen
    pub fn candidates(&self) -> &'static [&'static str] {
        self.date.map(classes_for).unwrap_or(&[])
    }

    /// Classes held that day: scheduled minus canceled
    pub fn total_classes(&self) -> u32 {
        self.candidates().len().saturating_sub(self.canceled.len()) as u32
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), EditorError> {
        if matches!(self.mode, EditorMode::Edit { .. }) {
            return Err(EditorError::DateLocked);
        }

        debug!("Editor date selected: {}", date);
        self.date = Some(date);
        self.attended.clear();
        self.canceled.clear();
        self.last_error = None;
        self.phase = EditorPhase::DateSelected;
        Ok(())
    }

    /// Flip attendance for a class. Returns `Ok(false)` without changing
    /// anything when the class is canceled.
    pub fn toggle_attended(&mut self, class_name: &str) -> Result<bool, EditorError> {
        self.check_class(class_name)?;

        if self.is_canceled(class_name) {
            debug!("Ignoring attendance toggle for canceled class {}", class_name);
            return Ok(false);
        }

        if self.is_attended(class_name) {
            self.attended.retain(|c| c != class_name);
        } else {
            self.attended.push(class_name.to_string());
        }
        self.touch();
        Ok(true)
    }

    /// Flip the canceled flag for a class. Canceling an attended class
    /// removes it from the attended set.
    pub fn toggle_canceled(&mut self, class_name: &str) -> Result<(), EditorError> {
        self.check_class(class_name)?;

        if self.is_canceled(class_name) {
            self.canceled.retain(|c| c != class_name);
        } else {
            self.canceled.push(class_name.to_string());
            self.attended.retain(|c| c != class_name);
        }
        self.touch();
        Ok(())
    }

    /// Mark every class that took place as attended. Canceled classes stay canceled.
    pub fn mark_all_present(&mut self) -> Result<(), EditorError> {
        self.check_editable()?;
        self.attended = self
            .candidates()
            .iter()
            .filter(|c| !self.is_canceled(c))
            .map(|c| c.to_string())
            .collect();
        self.touch();
        Ok(())
    }

    pub fn mark_all_absent(&mut self) -> Result<(), EditorError> {
        self.check_editable()?;
        self.attended.clear();
        self.touch();
        Ok(())
    }

    /// The payload a commit would send, with the denominator fixed from
    /// today's schedule.
    pub fn draft(&self) -> Result<RecordDraft, EditorError> {
        let date = self.date.ok_or(EditorError::NoDateSelected)?;
        Ok(RecordDraft {
            date,
            attended_classes: self.attended.clone(),
            canceled_classes: self.canceled.clone(),
            total_classes: self.total_classes(),
        })
    }

    /// Write the session to the store: create in create mode, update in edit
    /// mode. On success the session is cleared and the written draft returned;
    /// on failure the selections are kept so the user can retry.
    pub async fn commit<S: RecordStore>(&mut self, store: &S) -> Result<RecordDraft, EditorError> {
        self.check_editable()?;
        let draft = self.draft()?;

        let result = match &self.mode {
            EditorMode::Create { owner_email } => {
                store.create(&draft.to_create_request(owner_email)).await
            }
            EditorMode::Edit { record_id } => {
                store.update(record_id, &draft.to_update_request()).await
            }
        };

        match result {
            Ok(()) => {
                info!(
                    "Saved attendance for {}: {}/{} classes",
                    draft.date,
                    draft.attended_classes.len(),
                    draft.total_classes
                );
                self.clear_session();
                self.phase = EditorPhase::Saved;
                Ok(draft)
            }
            Err(e) => {
                if !e.is_aborted() {
                    warn!("Saving attendance for {} failed: {}", draft.date, e);
                }
                self.last_error = Some(e.to_string());
                self.phase = EditorPhase::Failed;
                Err(e.into())
            }
        }
    }

    /// Abandon the session without writing anything
    pub fn cancel(&mut self) {
        self.clear_session();
        self.phase = EditorPhase::Canceled;
    }

    fn clear_session(&mut self) {
        if matches!(self.mode, EditorMode::Create { .. }) {
            self.date = None;
        }
        self.attended.clear();
        self.canceled.clear();
        self.last_error = None;
    }

    fn check_editable(&self) -> Result<(), EditorError> {
        match self.phase {
            EditorPhase::Idle => Err(EditorError::NoDateSelected),
            EditorPhase::Saved | EditorPhase::Canceled => Err(EditorError::NotEditable),
            EditorPhase::DateSelected | EditorPhase::ClassesToggled | EditorPhase::Failed => Ok(()),
        }
    }

    fn check_class(&self, class_name: &str) -> Result<(), EditorError> {
        self.check_editable()?;
        if !self.candidates().contains(&class_name) {
            return Err(EditorError::UnknownClass(class_name.to_string()));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.sort_selections();
        self.phase = EditorPhase::ClassesToggled;
    }

    fn sort_selections(&mut self) {
        if let Some(date) = self.date {
            self.attended.sort_by_key(|c| schedule_position(date, c));
            self.canceled.sort_by_key(|c| schedule_position(date, c));
        }
    }
}
