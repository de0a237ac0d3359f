// src/interval/grain.rs

//! Date grains: the granularities at which model output is sampled and
//! labelled.

use super::date::{CalendarType, ModelDate};

/// A granularity of simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeGrain {
    Subhour,
    Hour,
    Day,
    Month,
    Season,
    Year,
}

impl TimeGrain {
    /// Advance a date by `qty` units of this grain.
    ///
    /// Sub-day grains label sampling frequency only; they do not move the
    /// date.
    pub fn advance(self, date: ModelDate, qty: i32, cal: CalendarType) -> ModelDate {
        match self {
            TimeGrain::Subhour | TimeGrain::Hour => date,
            TimeGrain::Day => {
                let mut d = date;
                if qty >= 0 {
                    for _ in 0..qty {
                        d = d.next_day(cal);
                    }
                } else {
                    for _ in 0..-qty {
                        d = d.prev_day(cal);
                    }
                }
                d
            }
            TimeGrain::Month => date.add_months(qty, cal),
            TimeGrain::Season => date.add_months(qty * 3, cal),
            TimeGrain::Year => date.add_years(i64::from(qty), cal),
        }
    }

    /// Truncate a date to this grain's canonical label.
    ///
    /// Seasons are labelled by their starting month (December, March, June,
    /// September), attributed to the year the season starts in.
    pub fn label(self, date: ModelDate) -> String {
        match self {
            TimeGrain::Year => format!("{:04}", date.year),
            TimeGrain::Month => format!("{:04}{:02}", date.year, date.month),
            TimeGrain::Season => {
                let start = match date.month {
                    12 => 12,
                    1 | 2 => 12,
                    m => ((m - 3) / 3) * 3 + 3,
                };
                let year = if date.month <= 2 { date.year - 1 } else { date.year };
                format!("{year:04}{start:02}")
            }
            TimeGrain::Day | TimeGrain::Hour | TimeGrain::Subhour => {
                format!("{:04}{:02}{:02}", date.year, date.month, date.day)
            }
        }
    }
}
