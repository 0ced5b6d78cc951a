use chrono::{Datelike, NaiveDate};
use shared::date_utils::{calendar_grid, format_long, month_label, next_month, previous_month};
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::services::date_utils::{is_today, today};

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    pub selected: Option<NaiveDate>,
    pub on_select: Callback<NaiveDate>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub label: Option<String>,
}

#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let show_calendar = use_state(|| false);
    let picker_ref = use_node_ref();

    // Month shown in the popover, starting at the selection or today
    let visible_month = {
        let start = props.selected.unwrap_or_else(today);
        use_state(move || (start.year(), start.month()))
    };

    let display_text = match props.selected {
        Some(date) => format_long(date),
        None => "Pick a date".to_string(),
    };

    let toggle_calendar = {
        let show_calendar = show_calendar.clone();
        Callback::from(move |_: MouseEvent| show_calendar.set(!*show_calendar))
    };

    let on_day_click = {
        let on_select = props.on_select.clone();
        let show_calendar = show_calendar.clone();
        Callback::from(move |date: NaiveDate| {
            on_select.emit(date);
            show_calendar.set(false);
        })
    };

    let on_today_click = {
        let on_day_click = on_day_click.clone();
        Callback::from(move |_: MouseEvent| on_day_click.emit(today()))
    };

    // Close when clicking outside the picker
    {
        let show_calendar = show_calendar.clone();
        let picker_ref = picker_ref.clone();
        use_effect_with(*show_calendar, move |is_open| {
            let listener = if *is_open {
                web_sys::window().map(|window| {
                    gloo::events::EventListener::new(&window, "click", move |e| {
                        let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());
                        if let (Some(target), Some(picker)) = (target, picker_ref.cast::<Element>()) {
                            if !picker.contains(Some(&target)) {
                                show_calendar.set(false);
                            }
                        }
                    })
                })
            } else {
                None
            };

            move || drop(listener)
        });
    }

    let on_prev_month = {
        let visible_month = visible_month.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = *visible_month;
            visible_month.set(previous_month(year, month));
        })
    };

    let on_next_month = {
        let visible_month = visible_month.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = *visible_month;
            visible_month.set(next_month(year, month));
        })
    };

    let (year, month) = *visible_month;
    let cells = calendar_grid(year, month);

    html! {
        <div class="date-picker" ref={picker_ref}>
            {if let Some(label) = &props.label {
                html! { <label class="date-picker-label">{label}</label> }
            } else { html! {} }}

            <div class="date-picker-input">
                <button
                    type="button"
                    class="date-display-button"
                    onclick={toggle_calendar}
                    disabled={props.disabled}
                >
                    <span class="date-text">{display_text}</span>
                    <span class="calendar-icon">{"📅"}</span>
                </button>

                {if *show_calendar && !props.disabled {
                    html! {
                        <div class="calendar-dropdown">
                            <div class="calendar-header">
                                <button type="button" class="nav-button" onclick={on_prev_month}>{"‹"}</button>
                                <span class="month-year">{month_label(year, month)}</span>
                                <button type="button" class="nav-button" onclick={on_next_month}>{"›"}</button>
                            </div>

                            <div class="calendar-grid">
                                <div class="weekday-header">
                                    {for ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].iter().map(|d| html! { <span>{*d}</span> })}
                                </div>

                                <div class="calendar-days">
                                    {for cells.iter().map(|cell| {
                                        let date = cell.date;
                                        let on_day_click = on_day_click.clone();
                                        let is_selected = props.selected == Some(date);

                                        html! {
                                            <button
                                                type="button"
                                                class={classes!(
                                                    "calendar-day",
                                                    if cell.in_month { "current-month" } else { "other-month" },
                                                    is_selected.then_some("selected"),
                                                    is_today(date).then_some("today")
                                                )}
                                                onclick={Callback::from(move |_: MouseEvent| on_day_click.emit(date))}
                                            >
                                                {date.day()}
                                            </button>
                                        }
                                    })}
                                </div>
                            </div>

                            <div class="calendar-footer">
                                <button type="button" class="today-button" onclick={on_today_click}>
                                    {"Today"}
                                </button>
                            </div>
                        </div>
                    }
                } else { html! {} }}
            </div>
        </div>
    }
}
