use shared::date_utils::format_long;
use shared::{AttendanceRecord, RecordStatus};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {
    /// Already sorted newest first
    pub records: Vec<AttendanceRecord>,
    pub loading: bool,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
}

fn status_class(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Present => "badge badge-present",
        RecordStatus::Absent => "badge badge-absent",
    }
}

#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    html! {
        <section class="records-section">
            <h2>{"Attendance Records"}</h2>

            {if props.loading && props.records.is_empty() {
                html! { <div class="loading">{"Loading records..."}</div> }
            } else if props.records.is_empty() {
                html! { <div class="empty">{"No attendance recorded yet."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="records-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Classes Attended"}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.records.iter().map(|record| {
                                    let status = record.status();
                                    let on_edit = {
                                        let on_edit = props.on_edit.clone();
                                        let id = record.id.clone();
                                        Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
                                    };
                                    let on_delete = {
                                        let on_delete = props.on_delete.clone();
                                        let id = record.id.clone();
                                        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                                    };

                                    html! {
                                        <tr key={record.id.clone()}>
                                            <td class="date">{format_long(record.date)}</td>
                                            <td><span class={status_class(status)}>{status.label()}</span></td>
                                            <td class="classes">{record.attended_summary()}</td>
                                            <td class="actions">
                                                <button type="button" class="btn-icon" title="Edit" onclick={on_edit}>{"✏️"}</button>
                                                <button type="button" class="btn-icon" title="Delete" onclick={on_delete}>{"🗑️"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badges() {
        assert_eq!(status_class(RecordStatus::Present), "badge badge-present");
        assert_eq!(status_class(RecordStatus::Absent), "badge badge-absent");
    }
}
