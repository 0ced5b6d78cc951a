use yew::prelude::*;

use super::attendance_form::AttendanceForm;
use crate::hooks::use_attendance_editor::{use_attendance_editor, EditorSeed};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AttendanceModalProps {
    pub api_client: ApiClient,
    pub seed: EditorSeed,
    pub on_close: Callback<()>,
    /// Fired after a successful save, before the modal closes
    pub on_saved: Callback<()>,
}

#[function_component(AttendanceModal)]
pub fn attendance_modal(props: &AttendanceModalProps) -> Html {
    let is_edit = matches!(props.seed, EditorSeed::Edit(_));

    let on_saved = {
        let on_saved = props.on_saved.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            on_saved.emit(());
            on_close.emit(());
        })
    };

    let editor = use_attendance_editor(&props.api_client, props.seed.clone(), on_saved);
    let can_save = editor.state.editor.selected_date().is_some() && !editor.state.saving;

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_save_click = {
        let save = editor.actions.save.clone();
        Callback::from(move |_: MouseEvent| save.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal attendance-modal" onclick={on_modal_click}>
                <h3 class="modal-title">
                    {if is_edit { "Edit Attendance" } else { "Add Attendance" }}
                </h3>

                <AttendanceForm
                    state={editor.state.clone()}
                    actions={editor.actions.clone()}
                    allow_date_change={!is_edit}
                />

                <div class="modal-actions">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel_click}>
                        {"Cancel"}
                    </button>
                    <button type="button" class="btn btn-primary" onclick={on_save_click} disabled={!can_save}>
                        {if editor.state.saving { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
