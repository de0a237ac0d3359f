// tests/common/mod.rs

//! Shared harness for the integration tests: one component wired to fake
//! collaborators and an in-memory state store.

use ppsched::component::Component;
use ppsched::engine::{Invocation, InvocationOptions, InvocationOutcome};
use ppsched::interval::ModelDate;
use ppsched::state::MemoryStateStore;
use ppsched_test_utils::fakes::{FakeAggExecutor, FakeArchive, FakeScheduler, FakeSignal};

pub struct Harness {
    pub component: Component,
    pub store: MemoryStateStore,
    pub scheduler: FakeScheduler,
    pub archive: FakeArchive,
    pub signal: FakeSignal,
    pub executor: FakeAggExecutor,
    pub options: InvocationOptions,
    pub job_id: String,
}

impl Harness {
    pub fn new(component: Component) -> Self {
        ppsched_test_utils::init_tracing();
        Harness {
            component,
            store: MemoryStateStore::new(),
            scheduler: FakeScheduler::new(),
            archive: FakeArchive::new(),
            signal: FakeSignal::quiet(),
            executor: FakeAggExecutor::new(),
            options: InvocationOptions {
                allow_submit: true,
                force_redo: false,
            },
            job_id: "7777".to_string(),
        }
    }

    /// Run one invocation for the period starting Jan 1 of `year`.
    pub fn run(&mut self, year: i64) -> InvocationOutcome {
        let mut invocation = Invocation {
            component: &self.component,
            store: &mut self.store,
            scheduler: &mut self.scheduler,
            archive: &self.archive,
            signal: &self.signal,
            executor: &mut self.executor,
            options: self.options,
            host: "testhost".to_string(),
            job_id: self.job_id.clone(),
        };
        invocation
            .run(ModelDate::new(year, 1, 1))
            .expect("invocation should not error")
    }
}
