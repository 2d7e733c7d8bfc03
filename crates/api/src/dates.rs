//! Calendar date handling for the range endpoints.
//!
//! Dates travel through the API and the dataset as fixed-width `YYYY-MM-DD`
//! strings, so anything accepted here can be compared with the stored `date`
//! column directly.

use time::{macros::format_description, Date, Duration};

/// Length of the trailing window used by the precipitation and tobs routes
pub const TRAILING_WINDOW_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Date entered {0} is not in proper format (yyyy-mm-dd) or is not a date")]
    InvalidStart(String),
    #[error(
        "Date not in proper format (yyyy-mm-dd) or is not a date <Start date '{start}' = {start_valid} | End date '{end}' = {end_valid}>"
    )]
    InvalidDates {
        start: String,
        end: String,
        start_valid: bool,
        end_valid: bool,
    },
    #[error("Start date '{start}' cannot be greater than the end date '{end}'")]
    StartAfterEnd { start: String, end: String },
}

/// True when `value` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Parse a `YYYY-MM-DD` date. Returns `None` for any malformed input.
pub fn parse_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    if !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2) {
        return None;
    }

    let date = Date::parse(value, format_description!("[year]-[month]-[day]")).ok()?;
    // year 0000 is not a Gregorian calendar year
    (date.year() >= 1).then_some(date)
}

fn is_digits(part: &str, width: usize) -> bool {
    part.len() == width && part.bytes().all(|b| b.is_ascii_digit())
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// First day of the trailing year ending at `latest`.
pub fn trailing_year_start(latest: Date) -> Date {
    latest
        .checked_sub(Duration::days(TRAILING_WINDOW_DAYS))
        .unwrap_or(Date::MIN)
}

/// A validated, ordered date range. `end` is open when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    /// Validate raw path segments. Both dates are checked before their order,
    /// and nothing here touches storage.
    pub fn new(start: &str, end: Option<&str>) -> Result<Self, RangeError> {
        let parsed_start = parse_date(start);

        let Some(end) = end else {
            return parsed_start
                .map(|start| DateRange { start, end: None })
                .ok_or_else(|| RangeError::InvalidStart(start.to_string()));
        };

        let parsed_end = parse_date(end);
        match (parsed_start, parsed_end) {
            (Some(s), Some(e)) if s > e => Err(RangeError::StartAfterEnd {
                start: start.to_string(),
                end: end.to_string(),
            }),
            (Some(s), Some(e)) => Ok(DateRange {
                start: s,
                end: Some(e),
            }),
            (s, e) => Err(RangeError::InvalidDates {
                start: start.to_string(),
                end: end.to_string(),
                start_valid: s.is_some(),
                end_valid: e.is_some(),
            }),
        }
    }

    pub fn start_str(&self) -> String {
        format_date(self.start)
    }

    pub fn end_str(&self) -> Option<String> {
        self.end.map(format_date)
    }
}
