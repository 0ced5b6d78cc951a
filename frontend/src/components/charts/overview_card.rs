use shared::{AttendanceRecord, MonthFilter};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::attendance_pie::AttendancePie;

#[derive(Properties, PartialEq)]
pub struct OverviewCardProps {
    pub records: Vec<AttendanceRecord>,
}

/// Totals for all records or one month, with the attendance percentage and
/// a pie of attended vs missed classes.
#[function_component(OverviewCard)]
pub fn overview_card(props: &OverviewCardProps) -> Html {
    let filter = use_state(MonthFilter::default);

    let options = MonthFilter::options(&props.records);
    // A month that disappeared after a delete falls back to everything
    let active = if options.contains(&*filter) { *filter } else { MonthFilter::All };
    let stat = active.apply(&props.records);

    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
                filter.set(MonthFilter::from_key(&select.value()));
            }
        })
    };

    html! {
        <section class="overview-card">
            <div class="overview-header">
                <h2>{"Overview"}</h2>
                <select class="month-select" onchange={on_filter_change}>
                    {for options.iter().map(|option| html! {
                        <option value={option.key()} selected={*option == active}>
                            {option.label()}
                        </option>
                    })}
                </select>
            </div>

            <div class="overview-body">
                <div class="overview-counters">
                    <div class="counter">
                        <span class="counter-label">{"Total Classes"}</span>
                        <span class="counter-value">{stat.total}</span>
                    </div>
                    <div class="counter counter-present">
                        <span class="counter-label">{"Attended"}</span>
                        <span class="counter-value">{stat.attended}</span>
                    </div>
                    <div class="counter counter-absent">
                        <span class="counter-label">{"Missed"}</span>
                        <span class="counter-value">{stat.missed}</span>
                    </div>
                    <div class="counter counter-percent">
                        <span class="counter-label">{"Attendance"}</span>
                        <span class="counter-value">{stat.percent_label()}</span>
                    </div>
                </div>

                <AttendancePie stat={stat} />
            </div>
        </section>
    }
}
