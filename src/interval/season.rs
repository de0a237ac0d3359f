// src/interval/season.rs

//! The DJF December special case.
//!
//! Season boundaries span a year boundary: a DJF mean for year Y needs the
//! December of year Y-1. On the very first processing of a run there is no
//! prior December at all, and the winter mean is computed from January and
//! February only. On subsequent runs the prior December is taken from the
//! saved December artifact if one was produced, or else reconstructed from
//! raw history with a one-day calendar shift. This is preserved fixed
//! behaviour, not a general rule.

use super::date::{CalendarType, ModelDate};
use super::decompose::SubPeriod;

/// Where the prior December for a DJF mean comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecemberSource {
    /// First processing of the run: no prior December exists; DJF is
    /// truncated to JF.
    FirstDecember,
    /// A previously produced December artifact covers the month.
    FromArtifact(SubPeriod),
    /// Reconstruct from raw history. The window is shifted back one
    /// calendar day so that month-mean timestamps fall inside it.
    FromHistoryShifted(SubPeriod),
}

/// Decide the prior-December source for the seasonal aggregation of the
/// period starting at `period_start`.
///
/// `artifact_available` is the caller's archive existence check; this
/// function itself performs no I/O.
pub fn prior_december(
    start_of_run: bool,
    period_start: ModelDate,
    cal: CalendarType,
    artifact_available: bool,
) -> DecemberSource {
    if start_of_run {
        return DecemberSource::FirstDecember;
    }

    let year = period_start.year - 1;
    let december = SubPeriod::new(ModelDate::new(year, 12, 1), ModelDate::new(year, 12, 31));
    if artifact_available {
        DecemberSource::FromArtifact(december)
    } else {
        DecemberSource::FromHistoryShifted(SubPeriod::new(
            december.start.prev_day(cal),
            december.end.prev_day(cal),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_has_no_prior_december() {
        let src = prior_december(true, ModelDate::new(1, 1, 1), CalendarType::Julian, true);
        assert_eq!(src, DecemberSource::FirstDecember);
    }

    #[test]
    fn subsequent_run_prefers_the_artifact() {
        let src = prior_december(false, ModelDate::new(5, 1, 1), CalendarType::Julian, true);
        match src {
            DecemberSource::FromArtifact(p) => {
                assert_eq!(p.start, ModelDate::new(4, 12, 1));
                assert_eq!(p.end, ModelDate::new(4, 12, 31));
            }
            other => panic!("expected FromArtifact, got {other:?}"),
        }
    }

    #[test]
    fn missing_artifact_falls_back_to_shifted_history() {
        let src = prior_december(false, ModelDate::new(5, 1, 1), CalendarType::Julian, false);
        match src {
            DecemberSource::FromHistoryShifted(p) => {
                assert_eq!(p.start, ModelDate::new(4, 11, 30));
                assert_eq!(p.end, ModelDate::new(4, 12, 30));
            }
            other => panic!("expected FromHistoryShifted, got {other:?}"),
        }
    }
}
