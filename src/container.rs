//! The contract a type fulfils to be registered with a [`TestRunner`](crate::TestRunner).

use crate::TestCase;

/// A group of sub-tests, constructed fresh for every run.
///
/// Implement it by hand, or put [`#[suite]`](crate::suite) on an inherent impl block and mark
/// the sub-test methods with `#[test_case]`.
///
/// ```ignore
/// #[derive(Default)]
/// struct Parsing;
///
/// impl TestContainer for Parsing {
///     fn run_tests(&mut self, t: &mut TestCase<'_>) {
///         t.run("empty input", |t| t.expect("".parse::<i32>().is_err()));
///     }
/// }
/// ```
pub trait TestContainer: Default {
    /// Name handed to the reporter before the container runs.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Run every sub-test through `t`.
    fn run_tests(&mut self, t: &mut TestCase<'_>);
}
