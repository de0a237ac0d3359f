// src/interval/date.rs

//! Calendar dates for simulation time.
//!
//! Model runs routinely start at year 0001 and may use a no-leap calendar,
//! both of which are outside the domain of general-purpose date libraries,
//! so the arithmetic here is written out by hand. Resolution is one day;
//! sub-day sampling frequencies only ever label data, they never shift
//! dates.

use std::fmt;
use std::str::FromStr;

use crate::errors::{PpschedError, Result};

/// Calendar used for a component's simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarType {
    /// Every fourth year is a leap year.
    #[default]
    Julian,
    /// No leap years at all.
    NoLeap,
    Gregorian,
}

impl FromStr for CalendarType {
    type Err = PpschedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "julian" => Ok(CalendarType::Julian),
            "noleap" | "no_leap" => Ok(CalendarType::NoLeap),
            "gregorian" | "standard" => Ok(CalendarType::Gregorian),
            other => Err(PpschedError::ConfigError(format!(
                "unknown calendar type '{other}' (expected julian, noleap or gregorian)"
            ))),
        }
    }
}

pub fn is_leap_year(cal: CalendarType, year: i64) -> bool {
    match cal {
        CalendarType::NoLeap => false,
        CalendarType::Julian => year % 4 == 0,
        CalendarType::Gregorian => year % 4 == 0 && (year % 100 != 0 || year % 400 == 0),
    }
}

pub fn days_in_month(cal: CalendarType, year: i64, month: u8) -> u8 {
    const DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(cal, year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// A date in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelDate {
    pub year: i64,
    pub month: u8,
    pub day: u8,
}

impl ModelDate {
    pub fn new(year: i64, month: u8, day: u8) -> Self {
        debug_assert!((1..=12).contains(&month));
        debug_assert!((1..=31).contains(&day));
        Self { year, month, day }
    }

    /// Parse a `-t`-style date argument.
    ///
    /// Fewer than 7 digits is taken as a bare year (January 1st); 8 digits
    /// and beyond is `yyyymmdd`, with everything before the final `mmdd`
    /// being the year. This allows years past 9999.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PpschedError::ConfigError(format!(
                "'{s}' is not a valid date (expected YYYY or YYYYMMDD)"
            )));
        }
        if s.len() < 7 {
            let year: i64 = s.parse().map_err(|_| {
                PpschedError::ConfigError(format!("'{s}' is not a valid year"))
            })?;
            return Ok(ModelDate::new(year, 1, 1));
        }
        let (ys, mmdd) = s.split_at(s.len() - 4);
        let year: i64 = ys.parse().map_err(|_| {
            PpschedError::ConfigError(format!("'{s}' has an invalid year part"))
        })?;
        let month: u8 = mmdd[0..2].parse().unwrap_or(0);
        let day: u8 = mmdd[2..4].parse().unwrap_or(0);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(PpschedError::ConfigError(format!(
                "'{s}' is not a valid date (month {month}, day {day})"
            )));
        }
        Ok(ModelDate::new(year, month, day))
    }

    pub fn next_day(self, cal: CalendarType) -> Self {
        if self.day < days_in_month(cal, self.year, self.month) {
            ModelDate::new(self.year, self.month, self.day + 1)
        } else if self.month < 12 {
            ModelDate::new(self.year, self.month + 1, 1)
        } else {
            ModelDate::new(self.year + 1, 1, 1)
        }
    }

    pub fn prev_day(self, cal: CalendarType) -> Self {
        if self.day > 1 {
            ModelDate::new(self.year, self.month, self.day - 1)
        } else if self.month > 1 {
            let m = self.month - 1;
            ModelDate::new(self.year, m, days_in_month(cal, self.year, m))
        } else {
            ModelDate::new(self.year - 1, 12, days_in_month(cal, self.year - 1, 12))
        }
    }

    /// Shift by whole months, clamping the day to the target month's length.
    pub fn add_months(self, n: i32, cal: CalendarType) -> Self {
        let total = self.year * 12 + i64::from(self.month) - 1 + i64::from(n);
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let day = self.day.min(days_in_month(cal, year, month));
        ModelDate::new(year, month, day)
    }

    pub fn add_years(self, n: i64, cal: CalendarType) -> Self {
        let year = self.year + n;
        let day = self.day.min(days_in_month(cal, year, self.month));
        ModelDate::new(year, self.month, day)
    }
}

impl fmt::Display for ModelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
