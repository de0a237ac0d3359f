// src/interval/decompose.rs

//! Decomposition of an aggregation period into reusable sub-chunks.

use std::fmt;

use crate::errors::{PpschedError, Result};

use super::date::{CalendarType, ModelDate};
use super::grain::TimeGrain;

/// A contiguous span of simulation time, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubPeriod {
    pub start: ModelDate,
    pub end: ModelDate,
}

impl SubPeriod {
    pub fn new(start: ModelDate, end: ModelDate) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// The period of `months` whole months ending at `end` (inclusive).
    pub fn ending_at(end: ModelDate, months: u32, cal: CalendarType) -> Self {
        let start = TimeGrain::Month.advance(end.next_day(cal), -(months as i32), cal);
        Self::new(start, end)
    }

    /// The year this period is attributed to for job-state purposes.
    pub fn year(&self) -> i64 {
        self.start.year
    }
}

impl fmt::Display for SubPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Split `period` (of length `requested` months) into contiguous
/// non-overlapping sub-periods of `sub` months each.
///
/// Fails unless `requested` is a whole multiple of `sub` and the sub-periods
/// exactly reconstruct the period.
pub fn decompose_into_subchunks(
    requested: u32,
    sub: u32,
    period: &SubPeriod,
    cal: CalendarType,
) -> Result<Vec<SubPeriod>> {
    if sub == 0 || requested % sub != 0 {
        return Err(PpschedError::InvalidDecomposition { requested, sub });
    }

    let count = requested / sub;
    let mut out = Vec::with_capacity(count as usize);
    let mut cursor = period.start;
    for _ in 0..count {
        let next = cursor.add_months(sub as i32, cal);
        out.push(SubPeriod::new(cursor, next.prev_day(cal)));
        cursor = next;
    }

    // The chunk length must match the actual period span.
    if out.last().map(|p| p.end) != Some(period.end) {
        return Err(PpschedError::InvalidDecomposition { requested, sub });
    }
    Ok(out)
}
