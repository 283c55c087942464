//! The sub-test execution primitive and its assertions.
//!
//! A [`TestCase`] is handed to every container by the runner. It runs named sub-tests, counts
//! assertions, and isolates failures so one failing sub-test never affects the next.
//!
//! ## Hard vs soft assertions
//!
//! - [`TestCase::expect`] returns `Err` on failure. Propagating it with `?` stops the body.
//! - [`TestCase::check`] only records the failure. The body keeps going, and `run` turns the
//!   accumulated errors into a single failure once the body returns.

use std::cell::Cell;
use std::fmt::Debug;
use std::mem;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Once;

use tracing::{debug, debug_span};

use crate::report::TestReporter;
use crate::runner::Tally;
use crate::{TestError, TestResult};

/// Counters for the sub-test currently executing. Reset on every `run`.
#[derive(Debug, Default, Clone, Copy)]
struct CurrentTest {
    errors: usize,
    assertions: usize,
}

thread_local! {
    /// Depth of sub-test bodies currently executing on this thread.
    static SUB_TEST_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Wrap the process panic hook so panics caught by `run` stay off stderr. The caught panic is
/// reported through the sub-test's diagnostic line instead. Panics outside a sub-test body still
/// reach the previous hook.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if SUB_TEST_DEPTH.with(Cell::get) == 0 {
                previous(info);
            }
        }));
    });
}

/// Execution context for one test container.
///
/// Only the harness can construct one; containers receive it by `&mut` from
/// [`TestContainer::run_tests`](crate::TestContainer::run_tests).
pub struct TestCase<'r> {
    reporter: &'r mut dyn TestReporter,
    current: CurrentTest,
    tests_run: usize,
    failed_tests: usize,
    errors: usize,
    assertions: usize,
}

impl<'r> TestCase<'r> {
    pub(crate) fn new(reporter: &'r mut dyn TestReporter) -> Self {
        Self {
            reporter,
            current: CurrentTest::default(),
            tests_run: 0,
            failed_tests: 0,
            errors: 0,
            assertions: 0,
        }
    }

    /// Run an untagged sub-test.
    pub fn run<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut TestCase<'r>) -> TestResult,
    {
        self.run_tagged(name, "", body);
    }

    /// Run a sub-test.
    ///
    /// Exactly one outcome is recorded per call. A body that returns `Err`, panics, or finishes
    /// with soft-check errors counts as one failed test and produces one diagnostic. The tag is
    /// handed to the reporter and the logging span and is otherwise unused.
    pub fn run_tagged<F>(&mut self, name: &str, tag: &str, body: F)
    where
        F: FnOnce(&mut TestCase<'r>) -> TestResult,
    {
        // A nested `run` must not clobber the enclosing sub-test's snapshot.
        let enclosing = mem::take(&mut self.current);
        self.tests_run += 1;
        self.reporter.on_test_start(name, tag);

        let span = debug_span!("sub_test", test = name, tag);
        let _entered = span.enter();

        install_quiet_panic_hook();
        SUB_TEST_DEPTH.with(|depth| depth.set(depth.get() + 1));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(self)));
        SUB_TEST_DEPTH.with(|depth| depth.set(depth.get() - 1));

        let outcome = match outcome {
            Ok(result) => result,
            Err(payload) => Err(TestError::from_panic(&*payload)),
        };

        let finished = mem::replace(&mut self.current, enclosing);
        let outcome = outcome.and_then(|()| match finished.errors {
            0 => Ok(()),
            errors => Err(TestError::Failed {
                name: name.to_string(),
                errors,
            }),
        });

        match outcome {
            Ok(()) => debug!(assertions = finished.assertions, "passed"),
            Err(error) => {
                self.failed_tests += 1;
                debug!(%error, "sub-test failed");
                self.reporter.on_test_failed(name, &error);
            }
        }
    }

    /// Hard assertion. On failure the returned error should be propagated with `?`.
    #[track_caller]
    pub fn expect(&mut self, condition: bool) -> TestResult {
        if self.record(condition) {
            Ok(())
        } else {
            Err(TestError::Expectation {
                location: Location::caller(),
            })
        }
    }

    /// Soft assertion. A failure is recorded and the body continues.
    #[track_caller]
    pub fn check(&mut self, condition: bool) {
        if !self.record(condition) {
            debug!(location = %Location::caller(), "check failed");
        }
    }

    /// Hard equality assertion; the failure carries both values.
    #[track_caller]
    pub fn expect_eq<L, R>(&mut self, left: L, right: R) -> TestResult
    where
        L: PartialEq<R> + Debug,
        R: Debug,
    {
        if self.record(left == right) {
            Ok(())
        } else {
            Err(TestError::Mismatch {
                left: format!("{left:?}"),
                right: format!("{right:?}"),
                location: Location::caller(),
            })
        }
    }

    /// Soft equality assertion.
    #[track_caller]
    pub fn check_eq<L, R>(&mut self, left: L, right: R)
    where
        L: PartialEq<R> + Debug,
        R: Debug,
    {
        if !self.record(left == right) {
            debug!(
                location = %Location::caller(),
                left = ?left,
                right = ?right,
                "check failed: left != right"
            );
        }
    }

    /// Fail the current sub-test with a message. Counts as one failed assertion.
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) -> TestResult {
        self.record(false);
        Err(TestError::Explicit {
            message: message.into(),
            location: Location::caller(),
        })
    }

    fn record(&mut self, condition: bool) -> bool {
        self.assertions += 1;
        self.current.assertions += 1;
        if !condition {
            self.errors += 1;
            self.current.errors += 1;
        }
        condition
    }

    pub fn tests_run(&self) -> usize {
        self.tests_run
    }

    pub fn failed_tests(&self) -> usize {
        self.failed_tests
    }

    /// Failed assertions across all sub-tests run so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn assertions(&self) -> usize {
        self.assertions
    }

    /// This container's counters, ready to be folded into the run total.
    pub fn tally(&self) -> Tally {
        Tally {
            tests_run: self.tests_run,
            failed_tests: self.failed_tests,
            assertions: self.assertions,
            errors: self.errors,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
