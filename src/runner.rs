//! The aggregator: runs every registered container and reports the totals.

use std::ops::AddAssign;

use tracing::{debug, info};

use crate::TestContainer;
use crate::registry::Registry;
use crate::report::{ConsoleReporter, TestReporter};

// ============================================================================
// Counters and exit codes
// ============================================================================

/// Counters for one container or for a whole run.
///
/// `failed_tests <= tests_run` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub tests_run: usize,
    pub failed_tests: usize,
    pub assertions: usize,
    /// Failed assertions; a single failed sub-test may contribute several.
    pub errors: usize,
}

impl Tally {
    pub fn passed(&self) -> bool {
        self.failed_tests == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        self.tests_run += rhs.tests_run;
        self.failed_tests += rhs.failed_tests;
        self.assertions += rhs.assertions;
        self.errors += rhs.errors;
    }
}

/// Exit code for a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(u8::try_from(code.0).unwrap_or(1))
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs a fixed, ordered list of test containers.
///
/// ```ignore
/// let code = TestRunner::new()
///     .register::<Parsing>()
///     .register::<Formatting>()
///     .run();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestRunner {
    registry: Registry,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a container type to the run list.
    pub fn register<T: TestContainer>(mut self) -> Self {
        self.registry.push::<T>();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every registered container in order and sum their counters.
    pub fn execute_all(&self, reporter: &mut dyn TestReporter) -> Tally {
        let mut total = Tally::default();
        for entry in self.registry.iter() {
            debug!(container = entry.name(), "running container");
            total += entry.run(reporter);
        }
        total
    }

    /// Emit the summary line for `tally` and turn it into an exit code.
    pub fn summarize(tally: &Tally, reporter: &mut dyn TestReporter) -> ExitCode {
        info!(
            tests_run = tally.tests_run,
            failed_tests = tally.failed_tests,
            assertions = tally.assertions,
            "test run complete"
        );
        reporter.on_run_complete(tally);
        tally.exit_code()
    }

    /// Run against an explicit reporter.
    pub fn run_with(&self, reporter: &mut dyn TestReporter) -> ExitCode {
        let tally = self.execute_all(reporter);
        Self::summarize(&tally, reporter)
    }

    /// Run with the summary on stdout and diagnostics on stderr.
    pub fn run(&self) -> ExitCode {
        let mut reporter = ConsoleReporter::stdio();
        self.run_with(&mut reporter)
    }
}

/// Build a [`TestRunner`] over the listed container types and run it on stdio.
///
/// Evaluates to an [`ExitCode`].
///
/// ```ignore
/// let code = otest::run_tests!(Parsing, Formatting);
/// ```
#[macro_export]
macro_rules! run_tests {
    ($($container:ty),+ $(,)?) => {
        $crate::TestRunner::new()
            $(.register::<$container>())+
            .run()
    };
}

/// Define `fn main` for a `harness = false` test target.
///
/// Installs logging, runs the listed containers and exits with the run's status.
///
/// ```ignore
/// otest::test_main!(Parsing, Formatting);
/// ```
#[macro_export]
macro_rules! test_main {
    ($($container:ty),+ $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::logging::init();
            ::std::process::ExitCode::from($crate::run_tests!($($container),+))
        }
    };
}

// ============================================================================
// Tests
// ============================================================================
