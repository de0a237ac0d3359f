// tests/end_to_end.rs

//! Whole-invocation scenarios: a five-year aggregation built from yearly
//! chunks, deferred behind a submitted dependency, and the seasonal
//! December handling.

mod common;

use common::Harness;
use ppsched::archive::december_artifact;
use ppsched::component::Frequency;
use ppsched::engine::InvocationOutcome;
use ppsched::interval::DecemberSource;
use ppsched::state::{JobState, JobUnit, StateStore};
use ppsched_test_utils::builders::ComponentBuilder;

/// A 5-year time average combinable from configured 1-year averages.
fn five_from_one() -> Harness {
    Harness::new(
        ComponentBuilder::new("atmos_month")
            .time_average(Frequency::Annual, "1yr")
            .time_average(Frequency::Annual, "5yr")
            .build(),
    )
}

#[test]
fn missing_final_year_defers_the_aggregation_behind_it() {
    let mut h = five_from_one();
    // 000000: running interactively, outside any batch job.
    h.job_id = "000000".to_string();
    for year in 1..=4 {
        h.store
            .write(&JobUnit::new("atmos_month", year), &JobState::Ok)
            .unwrap();
    }

    let outcome = h.run(5);

    // Year 5 was absent: it gets submitted, and the current invocation is
    // resubmitted holding behind it.
    let (job, holds) = match outcome {
        InvocationOutcome::Deferred { job, holds } => (job, holds),
        other => panic!("expected Deferred, got {other:?}"),
    };
    assert_eq!(h.scheduler.submitted.len(), 2);

    let dependency = &h.scheduler.submitted[0];
    assert_eq!(dependency.year, 5);
    assert!(dependency.holds.is_empty());

    let own = &h.scheduler.submitted[1];
    assert_eq!(own.year, 5);
    assert_eq!(own.holds, holds);
    assert_eq!(
        own.dependency_directive(),
        Some(format!("afterok:{}", holds[0]))
    );

    // Nothing executed locally, and the unit's record names the deferred
    // job.
    assert!(h.executor.executed.is_empty());
    assert_eq!(
        h.store.read(&JobUnit::new("atmos_month", 5)).unwrap(),
        Some(JobState::Running(job))
    );
}

#[test]
fn satisfied_dependencies_run_both_stages_in_derivation_order() {
    let mut h = five_from_one();
    for year in 1..=4 {
        h.store
            .write(&JobUnit::new("atmos_month", year), &JobState::Ok)
            .unwrap();
    }
    // Year 5 belongs to this very job.
    h.store
        .write(
            &JobUnit::new("atmos_month", 5),
            &JobState::Running(h.job_id.clone()),
        )
        .unwrap();

    let outcome = h.run(5);
    assert_eq!(
        outcome,
        InvocationOutcome::Completed {
            state: JobState::Ok
        }
    );
    assert_eq!(
        h.executor.executed_stages(),
        vec!["annualAV_1yr", "annualAV_5yr"]
    );
    assert!(h.scheduler.submitted.is_empty());

    let five_year = &h.executor.executed[1];
    assert_eq!(five_year.plan.period.start.year, 1);
    assert_eq!(five_year.plan.period.end.year, 5);
}

#[test]
fn mid_chunk_years_have_nothing_to_do() {
    let mut h = Harness::new(
        ComponentBuilder::new("atmos_month")
            .time_average(Frequency::Annual, "5yr")
            .build(),
    );
    assert_eq!(h.run(3), InvocationOutcome::NothingToDo);
    assert!(h.scheduler.submitted.is_empty());
    // No state record is written for a wait.
    assert_eq!(h.store.read(&JobUnit::new("atmos_month", 3)).unwrap(), None);
}

fn seasonal_harness() -> Harness {
    Harness::new(
        ComponentBuilder::new("atmos_month")
            .time_average(Frequency::Seasonal, "1yr")
            .build(),
    )
}

#[test]
fn first_run_truncates_the_winter_season() {
    let mut h = seasonal_harness();
    h.run(1);
    assert_eq!(
        h.executor.executed[0].december,
        Some(DecemberSource::FirstDecember)
    );
}

#[test]
fn later_runs_take_december_from_the_archive_when_present() {
    let mut h = seasonal_harness();
    h.archive.add(december_artifact("atmos_month", 4));

    h.run(5);
    match h.executor.executed[0].december {
        Some(DecemberSource::FromArtifact(p)) => assert_eq!(p.start.year, 4),
        ref other => panic!("expected FromArtifact, got {other:?}"),
    }
}

#[test]
fn later_runs_without_the_artifact_shift_into_history() {
    let mut h = seasonal_harness();

    h.run(5);
    match h.executor.executed[0].december {
        Some(DecemberSource::FromHistoryShifted(p)) => {
            // One-day shift: Nov 30 through Dec 30 of the prior year.
            assert_eq!(p.start.month, 11);
            assert_eq!(p.start.day, 30);
            assert_eq!(p.end.month, 12);
            assert_eq!(p.end.day, 30);
            assert_eq!(p.start.year, 4);
        }
        ref other => panic!("expected FromHistoryShifted, got {other:?}"),
    }
}
