use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// MM-YYYY
const TOKEN_LENGTH: usize = 7;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    #[error("{0:?} is not a valid MM-YYYY month")]
    InvalidFormat(String),
}

/// A calendar month, always anchored at its first day.
///
/// Every date that enters the service (subscription bounds and summary ranges) goes through
/// `Month` before being stored or compared, so day-level precision never leaks into billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    pub fn parse(token: &str) -> Result<Month, MonthParseError> {
        let invalid = || MonthParseError::InvalidFormat(token.to_owned());
        let bytes = token.as_bytes();

        if bytes.len() != TOKEN_LENGTH || bytes[2] != b'-' {
            return Err(invalid());
        }

        let (month, year) = (&token[..2], &token[3..]);

        if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Drops the day of `date`, keeping its year and month.
    pub fn from_date(date: NaiveDate) -> Month {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn first_instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Signed number of calendar months from `self` to `other`.
    pub fn months_until(&self, other: Month) -> i64 {
        let years = i64::from(other.year()) - i64::from(self.year());
        let months = i64::from(other.month()) - i64::from(self.month());

        years * 12 + months
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;

        Month::parse(&token).map_err(serde::de::Error::custom)
    }
}
