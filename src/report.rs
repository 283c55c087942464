//! Reporting boundary for test runs.
//!
//! The runner and [`TestCase`](crate::TestCase) never write to the process streams directly. They
//! call a [`TestReporter`], which decides where the summary line and the per-failure diagnostics go.
//! [`ConsoleReporter`] is the default: summary on one writer, diagnostics on another.

use std::io::{self, Stderr, Stdout, Write};

use crate::TestError;
use crate::runner::Tally;

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Trait for reporting test execution results.
pub trait TestReporter {
    /// Called before a registered container is constructed.
    fn on_container_start(&mut self, _name: &str) {}

    /// Called when a sub-test begins. `tag` is empty for untagged sub-tests.
    fn on_test_start(&mut self, _name: &str, _tag: &str) {}

    /// Called once for every sub-test that ends as failed.
    fn on_test_failed(&mut self, name: &str, error: &TestError);

    /// Called once after every registered container has run.
    fn on_run_complete(&mut self, tally: &Tally);
}

/// The summary line for a finished run, without a trailing newline.
pub fn summary_line(tally: &Tally) -> String {
    if tally.failed_tests == 0 {
        format!(
            "Success, tests run: {}, assertions: {}",
            tally.tests_run, tally.assertions
        )
    } else {
        format!(
            "Failure, tests run: {}, assertions: {}, test failed: {}",
            tally.tests_run, tally.assertions, tally.failed_tests
        )
    }
}

// ============================================================================
// Console Reporter
// ============================================================================

/// Writes the summary line to `out` and one diagnostic line per failure to `err`.
///
/// Write errors are ignored; the exit code depends only on the tally.
#[derive(Debug)]
pub struct ConsoleReporter<O = Stdout, E = Stderr> {
    out: O,
    err: E,
}

impl ConsoleReporter {
    /// Reporter bound to the process stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stdio()
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Give back the underlying writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> TestReporter for ConsoleReporter<O, E> {
    fn on_test_failed(&mut self, name: &str, error: &TestError) {
        let _ = writeln!(self.err, "{}", error.diagnostic(name));
    }

    fn on_run_complete(&mut self, tally: &Tally) {
        let _ = writeln!(self.out, "{}", summary_line(tally));
        let _ = self.out.flush();
    }
}

// ============================================================================
// Tests
// ============================================================================
