// tests/dependency_resolution.rs

//! Resolver behaviour across dependency years: holds, resubmission,
//! force-redo, and fatal aborts.

use std::collections::BTreeSet;

use ppsched::resolve::{ResolveOptions, resolve};
use ppsched::state::{JobState, JobUnit, MemoryStateStore, StateStore};
use ppsched_test_utils::fakes::FakeScheduler;
use ppsched_test_utils::init_tracing;

fn years(list: &[i64]) -> BTreeSet<i64> {
    list.iter().copied().collect()
}

const SUBMIT: ResolveOptions = ResolveOptions {
    allow_submit: true,
    force_redo: false,
};

#[test]
fn completed_plus_inflight_yields_a_single_hold() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();
    scheduler.set_alive("42");

    store
        .write(&JobUnit::new("atmos_month", 1998), &JobState::Ok)
        .unwrap();
    store
        .write(
            &JobUnit::new("atmos_month", 1999),
            &JobState::Running("42".to_string()),
        )
        .unwrap();

    let outcome = resolve(
        "atmos_month",
        &years(&[1998, 1999]),
        SUBMIT,
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    assert_eq!(outcome.hold_set, ["42".to_string()].into_iter().collect());
    assert!(!outcome.fatal_encountered);
    assert!(outcome.unresolved_blocking.is_empty());
    assert!(scheduler.submitted.is_empty());
}

#[test]
fn failed_years_are_resubmitted_in_order() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();

    store
        .write(&JobUnit::new("atmos_month", 1996), &JobState::Error)
        .unwrap();
    store
        .write(&JobUnit::new("atmos_month", 1997), &JobState::Interactive)
        .unwrap();
    store
        .write(
            &JobUnit::new("atmos_month", 1998),
            &JobState::HistoryDataError,
        )
        .unwrap();

    let outcome = resolve(
        "atmos_month",
        &years(&[1996, 1997, 1998]),
        SUBMIT,
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    let resubmitted: Vec<i64> = scheduler.submitted.iter().map(|r| r.year).collect();
    assert_eq!(resubmitted, vec![1996, 1997, 1998]);
    assert_eq!(outcome.hold_set.len(), 3);

    // Each resubmitted year is now recorded as in flight.
    for year in [1996, 1997, 1998] {
        let state = store.read(&JobUnit::new("atmos_month", year)).unwrap();
        assert!(matches!(state, Some(JobState::Running(_))));
    }
}

#[test]
fn force_redo_treats_ok_as_absent() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();
    store
        .write(&JobUnit::new("atmos_month", 1998), &JobState::Ok)
        .unwrap();

    let opts = ResolveOptions {
        allow_submit: true,
        force_redo: true,
    };
    let outcome = resolve(
        "atmos_month",
        &years(&[1998]),
        opts,
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    assert_eq!(scheduler.submitted.len(), 1);
    assert_eq!(outcome.hold_set.len(), 1);
}

#[test]
fn fatal_aborts_without_submitting_later_years() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();
    store
        .write(&JobUnit::new("atmos_month", 1996), &JobState::Ok)
        .unwrap();
    store
        .write(&JobUnit::new("atmos_month", 1997), &JobState::Fatal)
        .unwrap();

    let outcome = resolve(
        "atmos_month",
        &years(&[1996, 1997, 1998, 1999]),
        SUBMIT,
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    assert!(outcome.fatal_encountered);
    assert!(scheduler.submitted.is_empty());
    // The fatal record itself is untouched.
    assert_eq!(
        store.read(&JobUnit::new("atmos_month", 1997)).unwrap(),
        Some(JobState::Fatal)
    );
}

#[test]
fn without_submission_everything_unresolved_just_warns() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();
    store
        .write(&JobUnit::new("atmos_month", 1997), &JobState::Error)
        .unwrap();

    let outcome = resolve(
        "atmos_month",
        &years(&[1996, 1997]),
        ResolveOptions::default(),
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    assert_eq!(outcome.unresolved_blocking, vec![1996, 1997]);
    assert!(outcome.hold_set.is_empty());
    assert!(scheduler.submitted.is_empty());
}

#[test]
fn lost_running_job_gets_a_fresh_submission() {
    init_tracing();
    let mut store = MemoryStateStore::new();
    let mut scheduler = FakeScheduler::new();
    // "42" is recorded but the scheduler no longer knows it.
    store
        .write(
            &JobUnit::new("atmos_month", 1999),
            &JobState::Running("42".to_string()),
        )
        .unwrap();

    let outcome = resolve(
        "atmos_month",
        &years(&[1999]),
        SUBMIT,
        None,
        &mut store,
        &mut scheduler,
    )
    .unwrap();

    assert_eq!(scheduler.submitted.len(), 1);
    assert!(!outcome.hold_set.contains("42"));
    let state = store.read(&JobUnit::new("atmos_month", 1999)).unwrap();
    assert_ne!(state, Some(JobState::Running("42".to_string())));
}
