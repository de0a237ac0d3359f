// src/interval/mod.rs

//! Interval model: date-grain arithmetic, chunk lengths, readiness checks,
//! and sub-chunk decomposition.
//!
//! - [`date`] holds the calendar types and day-resolution date arithmetic.
//! - [`grain`] provides date grains and canonical labels.
//! - [`chunk`] parses and represents chunk lengths.
//! - [`decompose`] splits an aggregation period into sub-chunks.
//! - [`season`] carries the DJF prior-December special case.

pub mod chunk;
pub mod date;
pub mod decompose;
pub mod grain;
pub mod season;

pub use chunk::{ChunkLength, ChunkUnit};
pub use date::{CalendarType, ModelDate};
pub use decompose::{decompose_into_subchunks, SubPeriod};
pub use grain::TimeGrain;
pub use season::{prior_december, DecemberSource};

/// Whole years between the simulation start and the inclusive end of the
/// current processing period.
pub fn elapsed_years(sim_start: ModelDate, t_end: ModelDate) -> u32 {
    (t_end.year - sim_start.year + 1).max(0) as u32
}

/// Whether an aggregation of the given chunk length is due after
/// `elapsed_years` whole years.
///
/// Expressed in months so that sub-year chunks are due on every yearly
/// invocation and multi-year chunks only on their anniversary.
pub fn is_due(chunk: &ChunkLength, elapsed_years: u32) -> bool {
    let months = chunk.in_months();
    months != 0 && (elapsed_years * 12) % months == 0
}

/// The largest usable sub-interval: the biggest `i` in `available` that is
/// a proper divisor of `requested`.
///
/// `None` means the aggregation has to be computed directly from raw
/// history. The coarsest divisor is preferred to minimise recombination
/// work.
pub fn best_sub_interval(requested: u32, available: &[u32]) -> Option<u32> {
    available
        .iter()
        .copied()
        .filter(|&i| i > 0 && i < requested && requested % i == 0)
        .max()
}
