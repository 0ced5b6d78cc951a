use std::rc::Rc;

use chrono::NaiveDate;
use shared::{AttendanceEditor, AttendanceRecord, EditorError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "attendance_editor";

/// How an editor session starts
#[derive(Clone, PartialEq)]
pub enum EditorSeed {
    Create { owner_email: String },
    Edit(AttendanceRecord),
}

impl EditorSeed {
    fn start(&self) -> AttendanceEditor {
        match self {
            EditorSeed::Create { owner_email } => AttendanceEditor::new(owner_email.clone()),
            EditorSeed::Edit(record) => AttendanceEditor::open_for_edit(record),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct EditorState {
    pub editor: AttendanceEditor,
    pub saving: bool,
    /// Last rejected action or failed save, shown under the form
    pub notice: Option<String>,
}

pub enum EditorAction {
    SelectDate(NaiveDate),
    ToggleAttended(String),
    ToggleCanceled(String),
    MarkAllPresent,
    MarkAllAbsent,
    SaveStarted,
    SaveFinished(AttendanceEditor),
}

impl EditorState {
    fn apply(editor: &mut AttendanceEditor, action: EditorAction) -> Result<(), EditorError> {
        match action {
            EditorAction::SelectDate(date) => editor.select_date(date),
            EditorAction::ToggleAttended(name) => editor.toggle_attended(&name).map(|_| ()),
            EditorAction::ToggleCanceled(name) => editor.toggle_canceled(&name),
            EditorAction::MarkAllPresent => editor.mark_all_present(),
            EditorAction::MarkAllAbsent => editor.mark_all_absent(),
            EditorAction::SaveStarted | EditorAction::SaveFinished(_) => Ok(()),
        }
    }
}

impl Reducible for EditorState {
    type Action = EditorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            EditorAction::SaveStarted => {
                next.saving = true;
                next.notice = None;
            }
            EditorAction::SaveFinished(editor) => {
                next.notice = editor.last_error().map(|e| format!("Could not save: {}", e));
                next.editor = editor;
                next.saving = false;
            }
            // Selections are frozen while a save is in flight
            _ if next.saving => return self,
            action => {
                next.notice = match Self::apply(&mut next.editor, action) {
                    Ok(()) => None,
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &e.to_string());
                        Some(e.to_string())
                    }
                };
            }
        }

        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct UseAttendanceEditorActions {
    pub select_date: Callback<NaiveDate>,
    pub toggle_attended: Callback<String>,
    pub toggle_canceled: Callback<String>,
    pub mark_all_present: Callback<()>,
    pub mark_all_absent: Callback<()>,
    pub save: Callback<()>,
}

pub struct UseAttendanceEditorResult {
    pub state: EditorState,
    pub actions: UseAttendanceEditorActions,
}

/// Drive an [`AttendanceEditor`] from a dialog.
///
/// `on_saved` fires after a successful commit, which is where the caller
/// closes the dialog and refreshes its data.
#[hook]
pub fn use_attendance_editor(
    api_client: &ApiClient,
    seed: EditorSeed,
    on_saved: Callback<()>,
) -> UseAttendanceEditorResult {
    let state = use_reducer(move || EditorState {
        editor: seed.start(),
        saving: false,
        notice: None,
    });

    let dispatcher = state.dispatcher();
    let select_date = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |date| dispatcher.dispatch(EditorAction::SelectDate(date)))
    };
    let toggle_attended = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |name| dispatcher.dispatch(EditorAction::ToggleAttended(name)))
    };
    let toggle_canceled = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |name| dispatcher.dispatch(EditorAction::ToggleCanceled(name)))
    };
    let mark_all_present = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_| dispatcher.dispatch(EditorAction::MarkAllPresent))
    };
    let mark_all_absent = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_| dispatcher.dispatch(EditorAction::MarkAllAbsent))
    };

    let save = {
        let api_client = api_client.clone();
        let state = state.clone();

        Callback::from(move |_| {
            if state.saving {
                return;
            }

            let api_client = api_client.clone();
            let dispatcher = state.dispatcher();
            let on_saved = on_saved.clone();
            let mut editor = state.editor.clone();
            dispatcher.dispatch(EditorAction::SaveStarted);

            spawn_local(async move {
                let result = editor.commit(&api_client).await;
                if api_client.is_aborted() {
                    return;
                }

                let saved = result.is_ok();
                if let Err(e) = result {
                    Logger::error_with_component(COMPONENT, &format!("Save failed: {}", e));
                }
                dispatcher.dispatch(EditorAction::SaveFinished(editor));
                if saved {
                    on_saved.emit(());
                }
            });
        })
    };

    UseAttendanceEditorResult {
        state: (*state).clone(),
        actions: UseAttendanceEditorActions {
            select_date,
            toggle_attended,
            toggle_canceled,
            mark_all_present,
            mark_all_absent,
            save,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    fn fresh() -> Rc<EditorState> {
        Rc::new(EditorState {
            editor: AttendanceEditor::new("student@example.com"),
            saving: false,
            notice: None,
        })
    }

    #[test]
    fn test_reducer_applies_editor_actions() {
        let state = fresh()
            .reduce(EditorAction::SelectDate(monday()))
            .reduce(EditorAction::MarkAllPresent)
            .reduce(EditorAction::ToggleCanceled("DM".to_string()));

        assert_eq!(state.editor.total_classes(), 5);
        assert_eq!(state.editor.attended().len(), 5);
        assert!(!state.editor.is_attended("DM"));
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_reducer_reports_rejected_actions() {
        let state = fresh().reduce(EditorAction::MarkAllPresent);
        assert_eq!(state.notice.as_deref(), Some("select a date first"));

        let state = state
            .reduce(EditorAction::SelectDate(monday()))
            .reduce(EditorAction::ToggleAttended("PDS".to_string()));
        assert!(state.notice.as_deref().unwrap().contains("PDS"));
    }

    #[test]
    fn test_reducer_freezes_selections_while_saving() {
        let state = fresh()
            .reduce(EditorAction::SelectDate(monday()))
            .reduce(EditorAction::SaveStarted)
            .reduce(EditorAction::ToggleAttended("SE".to_string()));

        assert!(state.saving);
        assert!(!state.editor.is_attended("SE"));

        let finished = state.editor.clone();
        let state = state.reduce(EditorAction::SaveFinished(finished));
        assert!(!state.saving);
    }
}
