use chrono::{DateTime, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Calendar day used when an application is submitted without a date.
pub fn today() -> NaiveDate {
    now().date_naive()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
