// tests/state_machine.rs

//! State transitions driven through whole invocations: OK, the
//! two-failure escalation to FATAL, and the history-data side track.

mod common;

use common::Harness;
use ppsched::component::Frequency;
use ppsched::engine::InvocationOutcome;
use ppsched::state::{JobState, JobUnit, StateStore};
use ppsched_test_utils::builders::ComponentBuilder;
use ppsched_test_utils::fakes::StageFailure;

fn yearly_harness() -> Harness {
    Harness::new(
        ComponentBuilder::new("atmos_month")
            .time_series(Frequency::Monthly, "1yr")
            .build(),
    )
}

#[test]
fn clean_run_writes_ok_and_later_runs_short_circuit() {
    let mut h = yearly_harness();

    let outcome = h.run(3);
    assert_eq!(
        outcome,
        InvocationOutcome::Completed {
            state: JobState::Ok
        }
    );
    assert_eq!(h.executor.executed_stages(), vec!["monthlyTS_1yr"]);

    // Second invocation for the same year does nothing.
    assert_eq!(h.run(3), InvocationOutcome::AlreadyComplete);
    assert_eq!(h.executor.executed.len(), 1);
}

#[test]
fn two_failures_escalate_to_fatal_and_block_the_third() {
    let mut h = yearly_harness();
    h.executor.fail_stage("monthlyTS_1yr", StageFailure::Tool);

    assert_eq!(
        h.run(3),
        InvocationOutcome::Completed {
            state: JobState::Error
        }
    );
    assert_eq!(
        h.run(3),
        InvocationOutcome::Completed {
            state: JobState::Fatal
        }
    );
    // The third attempt is refused outright; nothing more executes.
    assert_eq!(h.run(3), InvocationOutcome::FatalHalt);
    assert_eq!(h.executor.executed.len(), 2);
}

#[test]
fn history_data_failures_stay_retryable() {
    let mut h = yearly_harness();
    h.executor
        .fail_stage("monthlyTS_1yr", StageFailure::HistoryData);

    assert_eq!(
        h.run(3),
        InvocationOutcome::Completed {
            state: JobState::HistoryDataError
        }
    );

    // Data arrived; the retry succeeds.
    h.executor = Default::default();
    assert_eq!(
        h.run(3),
        InvocationOutcome::Completed {
            state: JobState::Ok
        }
    );
}

#[test]
fn force_redo_reruns_a_completed_unit() {
    let mut h = yearly_harness();
    h.run(3);
    assert_eq!(h.run(3), InvocationOutcome::AlreadyComplete);

    h.options.force_redo = true;
    assert_eq!(
        h.run(3),
        InvocationOutcome::Completed {
            state: JobState::Ok
        }
    );
    assert_eq!(h.executor.executed.len(), 2);
}

#[test]
fn dates_before_simulation_start_do_nothing() {
    let mut h = Harness::new(
        ComponentBuilder::new("atmos_month")
            .sim_start(11)
            .time_series(Frequency::Monthly, "1yr")
            .build(),
    );
    assert_eq!(h.run(5), InvocationOutcome::BeforeStart);
    assert!(h.executor.executed.is_empty());
}

#[test]
fn another_live_job_on_the_unit_wins() {
    let mut h = yearly_harness();
    h.scheduler.set_alive("4242");
    h.store
        .write(
            &JobUnit::new("atmos_month", 3),
            &JobState::Running("4242".to_string()),
        )
        .unwrap();

    assert_eq!(
        h.run(3),
        InvocationOutcome::StillRunning("4242".to_string())
    );
    assert!(h.executor.executed.is_empty());
}
