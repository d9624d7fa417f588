use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::common::exception::{ErrCode, RlwError};

/// Bar timestamp, second resolution, no timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
    pub timestamp: i64,
    datetime: NaiveDateTime,
}

impl Time {
    pub fn to_str(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl FromStr for Time {
    type Err = RlwError;

    /// Supports "YYYY-MM-DD HH:MM:SS" and "YYYYMMDD"
    fn from_str(time_str: &str) -> Result<Self, Self::Err> {
        let to_err = |e: chrono::ParseError| {
            RlwError::new(
                format!("cannot parse time '{}': {}", time_str, e),
                ErrCode::SrcDataFormatError,
            )
        };
        let datetime = if time_str.contains('-') {
            NaiveDateTime::parse_from_str(time_str, "%Y-%m-%d %H:%M:%S").map_err(to_err)?
        } else {
            NaiveDate::parse_from_str(time_str, "%Y%m%d")
                .map_err(to_err)?
                .and_time(NaiveTime::MIN)
        };

        Ok(Self {
            timestamp: datetime.and_utc().timestamp(),
            datetime,
        })
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
