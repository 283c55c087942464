//! Ordered registration of test containers.
//!
//! Each [`Registration`] holds a monomorphized "create-and-run" function for one container type.
//! The list is fixed before execution starts and is walked in insertion order.

use tracing::debug;

use crate::report::TestReporter;
use crate::runner::Tally;
use crate::{TestCase, TestContainer};

/// Builds one container, runs its sub-tests and returns its counters.
pub type RunFn = fn(&mut dyn TestReporter) -> Tally;

/// One registered container type.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    name: &'static str,
    run: RunFn,
}

impl Registration {
    pub fn of<T: TestContainer>() -> Self {
        Self {
            name: T::name(),
            run: run_container::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Construct a fresh instance and run it against `reporter`.
    pub fn run(&self, reporter: &mut dyn TestReporter) -> Tally {
        (self.run)(reporter)
    }
}

fn run_container<T: TestContainer>(reporter: &mut dyn TestReporter) -> Tally {
    reporter.on_container_start(T::name());
    let mut container = T::default();
    let mut case = TestCase::new(reporter);
    container.run_tests(&mut case);
    let tally = case.tally();
    debug!(container = T::name(), ?tally, "container finished");
    tally
}

/// The fixed, ordered list of containers for one runner.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `T`. Registering a type twice runs it twice.
    pub fn push<T: TestContainer>(&mut self) {
        self.entries.push(Registration::of::<T>());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
