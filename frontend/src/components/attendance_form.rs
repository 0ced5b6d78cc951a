use shared::schedule::Weekday;
use shared::EditorPhase;
use yew::prelude::*;

use super::date_picker::DatePicker;
use crate::hooks::use_attendance_editor::{EditorState, UseAttendanceEditorActions};

#[derive(Properties, PartialEq)]
pub struct AttendanceFormProps {
    pub state: EditorState,
    pub actions: UseAttendanceEditorActions,
    /// Offer the date picker; edits keep the record's date
    pub allow_date_change: bool,
}

/// Class checklist for one day: mark-all buttons, then one row per
/// scheduled class with an attended checkbox and a canceled toggle.
#[function_component(AttendanceForm)]
pub fn attendance_form(props: &AttendanceFormProps) -> Html {
    let editor = &props.state.editor;
    let actions = &props.actions;
    let busy = props.state.saving;
    let date = editor.selected_date();
    let candidates = editor.candidates();

    let on_mark_all_present = {
        let mark_all_present = actions.mark_all_present.clone();
        Callback::from(move |_: MouseEvent| mark_all_present.emit(()))
    };
    let on_mark_all_absent = {
        let mark_all_absent = actions.mark_all_absent.clone();
        Callback::from(move |_: MouseEvent| mark_all_absent.emit(()))
    };

    let date_section = if props.allow_date_change {
        html! {
            <DatePicker
                label={Some("Date".to_string())}
                selected={date}
                on_select={actions.select_date.clone()}
                disabled={busy}
            />
        }
    } else {
        html! {}
    };

    let body = match date {
        None => html! { <p class="form-hint">{"Pick a date to see that day's classes."}</p> },
        Some(_) if candidates.is_empty() => {
            html! { <p class="form-hint">{"No classes are scheduled on this day."}</p> }
        }
        Some(date) => html! {
            <>
                <div class="weekday-caption">{format!("Classes for {}", Weekday::from_date(date).name())}</div>

                <div class="mark-all-buttons">
                    <button type="button" class="btn btn-present" onclick={on_mark_all_present} disabled={busy}>
                        {"Mark All Present"}
                    </button>
                    <button type="button" class="btn btn-absent" onclick={on_mark_all_absent} disabled={busy}>
                        {"Mark All Absent"}
                    </button>
                </div>

                <ul class="class-list">
                    {for candidates.iter().map(|name| {
                        let attended = editor.is_attended(name);
                        let canceled = editor.is_canceled(name);
                        let on_attend = {
                            let toggle = actions.toggle_attended.clone();
                            let name = name.to_string();
                            Callback::from(move |_: Event| toggle.emit(name.clone()))
                        };
                        let on_cancel = {
                            let toggle = actions.toggle_canceled.clone();
                            let name = name.to_string();
                            Callback::from(move |_: MouseEvent| toggle.emit(name.clone()))
                        };

                        html! {
                            <li class={classes!("class-row", canceled.then_some("canceled"))} key={*name}>
                                <label class="class-check">
                                    <input
                                        type="checkbox"
                                        checked={attended}
                                        disabled={canceled || busy}
                                        onchange={on_attend}
                                    />
                                    <span class="class-name">{*name}</span>
                                </label>
                                <button type="button" class="cancel-toggle" onclick={on_cancel} disabled={busy}>
                                    {if canceled { "Restore" } else { "Canceled?" }}
                                </button>
                            </li>
                        }
                    })}
                </ul>

                <div class="form-summary">
                    {format!(
                        "{} of {} classes attended",
                        editor.attended().len(),
                        editor.total_classes()
                    )}
                </div>
            </>
        },
    };

    let notice = match (&props.state.notice, editor.phase()) {
        (Some(message), _) => html! { <div class="form-error">{message}</div> },
        (None, EditorPhase::Failed) => html! {
            <div class="form-error">{editor.last_error().unwrap_or("Could not save")}</div>
        },
        _ => html! {},
    };

    html! {
        <div class="attendance-form">
            {date_section}
            {body}
            {notice}
        </div>
    }
}
