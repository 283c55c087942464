//! Failure signals raised inside sub-tests.
//!
//! A `TestError` aborts the sub-test body it is returned from. The `run` boundary in
//! [`TestCase`](crate::TestCase) catches every variant, so none of them ever reaches the runner.

use std::panic::Location;

use thiserror::Error;

/// Result type returned by sub-test bodies and hard assertions.
pub type TestResult = Result<(), TestError>;

/// Errors that end a sub-test as failed.
#[derive(Debug, Error)]
pub enum TestError {
    /// A hard `expect` saw a false condition.
    #[error("expectation failed at {location}")]
    Expectation { location: &'static Location<'static> },

    /// A hard `expect_eq` saw two unequal values.
    #[error("expectation failed at {location}: left != right (left: {left}, right: {right})")]
    Mismatch {
        left: String,
        right: String,
        location: &'static Location<'static>,
    },

    /// The body finished, but soft checks recorded errors along the way.
    #[error("{name} failed with {errors} errors")]
    Failed { name: String, errors: usize },

    /// The body gave up explicitly through `fail`.
    #[error("{message} at {location}")]
    Explicit {
        message: String,
        location: &'static Location<'static>,
    },

    /// The body panicked.
    #[error("{}", panic_text(.message))]
    Panicked { message: Option<String> },

    /// Any other error the body chose to propagate.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

fn panic_text(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!("panicked: {msg}"),
        None => "panicked without a message".to_string(),
    }
}

impl TestError {
    /// Wrap an arbitrary error so a body can propagate it with `?`.
    ///
    /// ```ignore
    /// let text = std::fs::read_to_string(path).map_err(TestError::other)?;
    /// ```
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TestError::Other(err.into())
    }

    /// Build a `Panicked` error from a payload captured by `catch_unwind`.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        TestError::Panicked { message }
    }

    /// The single diagnostic line printed for a failed sub-test.
    ///
    /// `Failed` already names the sub-test; every other variant gets the name prepended.
    pub fn diagnostic(&self, name: &str) -> String {
        match self {
            TestError::Failed { .. } => self.to_string(),
            _ => format!("{name} failed: {self}"),
        }
    }
}
