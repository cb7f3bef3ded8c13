//! Date identifiers for entries and months.
//!
//! Every diary file is named by its date: `2024-03-10.md`. The stem is the
//! entry's identifier, its sort key, and the source of its URL:
//!
//! ```text
//! 2024-03-10.md  →  id "2024-03-10"  →  /2024/03/10/   (post page)
//!                →  month "2024-03"  →  /archive/2024-03/
//! ```
//!
//! The format is fixed-width, so comparing identifiers as strings orders them
//! chronologically. Anything that is not exactly `YYYY-MM-DD` naming a real
//! calendar date is rejected; there is no lenient fallback.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("malformed entry identifier '{0}': expected YYYY-MM-DD")]
    MalformedIdentifier(String),
    #[error("'{0}' is not a calendar date")]
    InvalidDate(String),
    #[error("malformed month '{0}': expected YYYY-MM")]
    MalformedMonth(String),
}

fn is_digits(s: &str, width: usize) -> bool {
    s.len() == width && s.bytes().all(|b| b.is_ascii_digit())
}

/// A validated `YYYY-MM-DD` entry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryDate(NaiveDate);

impl EntryDate {
    /// Parse an identifier of the exact form `YYYY-MM-DD`.
    ///
    /// ```
    /// # use daybook::naming::EntryDate;
    /// let d = EntryDate::parse("2024-03-10").unwrap();
    /// assert_eq!(d.to_string(), "2024-03-10");
    /// assert!(EntryDate::parse("2024-3-10").is_err());
    /// ```
    pub fn parse(id: &str) -> Result<Self, NamingError> {
        let parts: Vec<&str> = id.split('-').collect();
        let [y, m, d] = parts.as_slice() else {
            return Err(NamingError::MalformedIdentifier(id.to_string()));
        };
        if !(is_digits(y, 4) && is_digits(m, 2) && is_digits(d, 2)) {
            return Err(NamingError::MalformedIdentifier(id.to_string()));
        }
        let date = match (y.parse::<i32>(), m.parse::<u32>(), d.parse::<u32>()) {
            (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
            _ => None,
        };
        date.map(Self)
            .ok_or_else(|| NamingError::InvalidDate(id.to_string()))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `("YYYY", "MM", "DD")`, zero-padded, for building paths and URLs.
    pub fn path_segments(&self) -> (String, String, String) {
        (
            format!("{:04}", self.year()),
            format!("{:02}", self.month()),
            format!("{:02}", self.day()),
        )
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_first(self.0.with_day(1).unwrap_or(self.0))
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for EntryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A `YYYY-MM` month bucket. Derived from entry dates, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    first: NaiveDate,
}

impl MonthKey {
    fn from_first(first: NaiveDate) -> Self {
        Self { first }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::from_first)
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, NamingError> {
        let malformed = || NamingError::MalformedMonth(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(malformed)?;
        if !(is_digits(y, 4) && is_digits(m, 2)) {
            return Err(malformed());
        }
        let year = y.parse().map_err(|_| malformed())?;
        let month = m.parse().map_err(|_| malformed())?;
        Self::new(year, month).ok_or_else(malformed)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Weekday of the 1st, counted from Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Number of days in the month (proleptic Gregorian).
    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(self.first).num_days() as u32,
            // Only reachable for the last month chrono can represent.
            None => 31,
        }
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(&self, day: u32) -> Option<EntryDate> {
        self.first.with_day(day).map(EntryDate)
    }

    /// Human-readable label, e.g. `March 2024`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
