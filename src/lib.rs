#![forbid(unsafe_code)]
// Enforce explicit error handling - no panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! otest: a minimal test-registration and execution harness
//!
//! Test containers are plain types. They are registered in a fixed, ordered list before the run
//! starts, each one is default-constructed exactly once, and its sub-tests run through a
//! [`TestCase`]. The runner folds every container's counters into a [`Tally`], prints one summary
//! line and yields an [`ExitCode`].
//!
//! ```ignore
//! use otest::{TestCase, TestResult, suite};
//!
//! #[derive(Default)]
//! struct Arithmetic;
//!
//! #[suite]
//! impl Arithmetic {
//!     #[test_case]
//!     fn addition(&mut self, t: &mut TestCase<'_>) -> TestResult {
//!         t.check(2 + 2 == 4);
//!         t.expect_eq(3 * 3, 9)
//!     }
//! }
//!
//! otest::test_main!(Arithmetic);
//! ```
//!
//! ## Modules
//!
//! - `case` - `run` and the hard/soft assertions
//! - `container` - the trait registered types implement
//! - `registry` - the ordered list of create-and-run entries
//! - `runner` - aggregation, summary and exit codes
//! - `report` - where summary and diagnostics are written
//! - `error` - failure signals
//! - `logging` - `tracing` subscriber setup
//!
//! ## Output
//!
//! - stdout: exactly one line, `Success, tests run: N, assertions: M` or
//!   `Failure, tests run: N, assertions: M, test failed: K`
//! - stderr: one diagnostic line per failed sub-test

// Lets `#[suite]` expansions refer to `::otest` inside this crate's own tests.
extern crate self as otest;

pub mod case;
pub mod container;
pub mod error;
pub mod logging;
pub mod registry;
pub mod report;
pub mod runner;

pub use case::TestCase;
pub use container::TestContainer;
pub use error::{TestError, TestResult};
pub use registry::{Registration, Registry};
pub use report::{ConsoleReporter, TestReporter, summary_line};
pub use runner::{ExitCode, Tally, TestRunner};

pub use otest_derive::suite;
