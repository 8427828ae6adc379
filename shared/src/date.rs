//! Local calendar helpers
//!
//! "Today" is always the client's local date. Deriving it from UTC puts
//! evening entries on the next day for users west of Greenwich.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Wire format of every date (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local timezone
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// The local date `days` days before today
pub fn days_ago_local(days: u64) -> NaiveDate {
    days_before(today_local(), days)
}

/// `date - days`, saturating at the earliest representable date
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // chrono accepts unpadded fields; the URL contract does not
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Highlight class of a date cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Today,
    Saturday,
    Sunday,
    Weekday,
}

impl DayKind {
    /// Today wins over the weekend classes
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            return Self::Today;
        }
        match date.weekday() {
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
            _ => Self::Weekday,
        }
    }

    /// CSS-style class suffix
    pub fn class_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Today => Some("today"),
            Self::Saturday => Some("saturday"),
            Self::Sunday => Some("sunday"),
            Self::Weekday => None,
        }
    }
}
