//! Tests for containers declared with `#[suite]`.

use otest::{Tally, TestCase, TestContainer, TestError, TestReporter, TestResult, TestRunner, suite};

/// Records every reporter callback as a line of text.
#[derive(Default)]
struct EventLog(Vec<String>);

impl TestReporter for EventLog {
    fn on_container_start(&mut self, name: &str) {
        let short = name.rsplit("::").next().unwrap_or(name);
        self.0.push(format!("container {short}"));
    }

    fn on_test_start(&mut self, name: &str, tag: &str) {
        if tag.is_empty() {
            self.0.push(format!("start {name}"));
        } else {
            self.0.push(format!("start {name} [{tag}]"));
        }
    }

    fn on_test_failed(&mut self, name: &str, error: &TestError) {
        match error {
            TestError::Failed { errors, .. } => self.0.push(format!("failed {name} ({errors} errors)")),
            _ => self.0.push(format!("failed {name}")),
        }
    }

    fn on_run_complete(&mut self, tally: &Tally) {
        self.0.push(format!("done {}/{}", tally.failed_tests, tally.tests_run));
    }
}

#[derive(Default)]
struct Strings {
    checked: usize,
}

#[suite]
impl Strings {
    #[test_case]
    fn upper(&mut self, t: &mut TestCase<'_>) -> TestResult {
        self.checked += 1;
        t.expect_eq("abc".to_uppercase(), "ABC")
    }

    #[test_case(tag = "slow")]
    fn repeat(&mut self, t: &mut TestCase<'_>) -> TestResult {
        self.checked += 1;
        t.check("ab".repeat(3) == "ababab");
        t.check(self.checked == 2);
        Ok(())
    }

    /// Not a sub-test: no marker.
    #[allow(dead_code)]
    fn unused_helper(&self) -> usize {
        self.checked
    }
}

#[derive(Default)]
struct Broken;

#[suite]
impl Broken {
    #[test_case]
    fn two_soft_failures(&self, t: &mut TestCase<'_>) -> TestResult {
        t.check(false);
        t.check_eq(1, 2);
        Ok(())
    }

    #[test_case(tag = "io")]
    fn hard_failure(&self, t: &mut TestCase<'_>) -> TestResult {
        t.fail("fixture unavailable")?;
        t.check(true);
        Ok(())
    }
}

#[test]
fn marked_methods_become_sub_tests_in_declaration_order() {
    let runner = TestRunner::new().register::<Strings>().register::<Broken>();
    let mut log = EventLog::default();

    runner.run_with(&mut log);

    assert_eq!(
        log.0,
        vec![
            "container Strings",
            "start upper",
            "start repeat [slow]",
            "container Broken",
            "start two_soft_failures",
            "failed two_soft_failures (2 errors)",
            "start hard_failure [io]",
            "failed hard_failure",
            "done 2/4",
        ]
    );
}

#[test]
fn generated_impl_uses_the_type_name() {
    assert!(<Strings as TestContainer>::name().ends_with("Strings"));
}

#[test]
fn counters_cover_all_assertion_kinds() {
    let runner = TestRunner::new().register::<Broken>();
    let mut log = EventLog::default();

    let tally = runner.execute_all(&mut log);

    // two checks + one fail; the check after `fail` never runs
    assert_eq!(
        tally,
        Tally {
            tests_run: 2,
            failed_tests: 2,
            assertions: 3,
            errors: 3,
        }
    );
}

mod generic {
    use super::*;

    #[derive(Default)]
    pub struct Roundtrip<T> {
        value: T,
    }

    #[suite]
    impl<T> Roundtrip<T>
    where
        T: Default + Clone + PartialEq + std::fmt::Debug,
    {
        #[test_case]
        fn clone_is_equal(&self, t: &mut TestCase<'_>) -> TestResult {
            t.expect_eq(self.value.clone(), self.value.clone())
        }
    }
}

#[test]
fn generic_containers_are_supported() {
    let runner = TestRunner::new()
        .register::<generic::Roundtrip<String>>()
        .register::<generic::Roundtrip<Vec<u8>>>();
    let mut log = EventLog::default();

    let tally = runner.execute_all(&mut log);

    assert_eq!(tally.tests_run, 2);
    assert!(tally.passed());
}
