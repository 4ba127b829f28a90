// src/date.rs

use chrono::{Local, NaiveDate};

use crate::error::{ScrapeError, ScrapeResult};

/// The day before `today`, or `None` at `NaiveDate::MIN`.
pub fn previous_day(today: NaiveDate) -> Option<NaiveDate> {
    today.pred_opt()
}

/// Yesterday in the local calendar. This is the default delivery date.
pub fn yesterday() -> NaiveDate {
    let today = Local::now().date_naive();
    // the local clock is never at the start of chrono's calendar
    previous_day(today).unwrap_or(today)
}

/// Parse a `YYYY-MM-DD` delivery date given on the command line.
pub fn parse_delivery_date(s: &str) -> ScrapeResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ScrapeError::InvalidDate(s.to_string()))
}

/// Zero-padded `YYYY-MM-DD`, as used in the request URL and output file name.
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
