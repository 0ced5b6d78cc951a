use chrono::NaiveDate;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .unwrap_or_default()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}
