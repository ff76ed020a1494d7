use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TenureError};

/// calendar year-month, always anchored on the 1st of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// create from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TenureError::InvalidMonth { month });
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or_else(|| TenureError::InvalidDate {
                message: format!("year {} is out of range", year),
            })
    }

    /// month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// first calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// whole months from `self` to `later`; negative when `later` is earlier
    pub fn months_until(&self, later: YearMonth) -> i64 {
        let years = (later.year() - self.year()) as i64;
        let months = later.month() as i64 - self.month() as i64;
        years * 12 + months
    }

    /// advance by `months`, `None` past the end of the calendar
    pub fn checked_add_months(&self, months: u32) -> Option<YearMonth> {
        self.0.checked_add_months(Months::new(months)).map(YearMonth)
    }

    /// `YYYY-MM` representation used for serialization
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%B %Y"))
    }
}

impl FromStr for YearMonth {
    type Err = TenureError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TenureError::InvalidDate {
            message: format!("expected YYYY-MM, got {:?}", s),
        };

        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = TenureError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_iso()
    }
}
