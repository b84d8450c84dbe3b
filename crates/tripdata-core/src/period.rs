use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::IngestError;

/// One scheduling period: the calendar month a pipeline run ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, IngestError> {
        // Delegate range checks (month 1-12, sane year) to chrono.
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| IngestError::Config(format!("invalid period {year:04}-{month:02}")))?;
        Ok(Self { year, month })
    }

    pub fn succ(&self) -> Period {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || IngestError::Config(format!("invalid period '{value}', expected YYYY-MM"));
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Period::new(year, month)
    }
}
