//! Matcha Assert - test-runner glue for matcha matchers
//!
//! An [`Assertion`] evaluates an expectation once, keeps the verdict, and on
//! failure renders the records into a report and hands it to a
//! [`FailureSignal`]. The default signal panics, which is how the Rust test
//! harness marks a test as failed.
//!
//! ```
//! use matcha_assert::assert_matcha;
//! use matcha_core::prelude::*;
//!
//! let tags = vec!["b", "a"];
//! assert_matcha!(sequence_of(["a", "b"]).with_order(false), tags);
//! ```

use serde::Serialize;
use std::time::Instant;

use matcha_core::{
    log_op_end, log_op_start, render_report, sorted_by_key, Expect, Inspect, IntoExpect, Record,
    RenderOptions, Value, Verdict,
};
use matcha_core_types::Op;

/// Title used when the expectation has no title of its own
pub const DEFAULT_TITLE: &str = "Expectation not met";

/// Capability to fail the running test.
pub trait FailureSignal {
    /// Mark the test failed with `report` as the explanation
    fn fail_now(&mut self, report: &str);
}

/// Fails by panicking with the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicSignal;

impl FailureSignal for PanicSignal {
    #[track_caller]
    fn fail_now(&mut self, report: &str) {
        panic!("{report}");
    }
}

/// Collects reports instead of failing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSignal {
    reports: Vec<String>,
}

impl RecordingSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }
}

impl FailureSignal for RecordingSignal {
    fn fail_now(&mut self, report: &str) {
        self.reports.push(report.to_string());
    }
}

/// One evaluated expectation.
#[derive(Debug, Clone)]
pub struct Assertion {
    expect: Expect,
    actual: Value,
    verdict: Verdict,
    options: RenderOptions,
}

#[derive(Serialize)]
struct AssertionReport<'a> {
    passed: bool,
    title: String,
    expect: &'a Expect,
    actual: &'a Value,
    records: Vec<Record>,
}

impl Assertion {
    pub fn new<E, A>(expect: E, actual: &A) -> Self
    where
        E: IntoExpect,
        A: Inspect + ?Sized,
    {
        let expect = expect.into_expect();
        let actual = actual.inspect();
        let verdict = expect.evaluate(&actual);
        Self {
            expect,
            actual,
            verdict,
            options: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_match()
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Top-level records, sorted by key
    pub fn records(&self) -> Vec<Record> {
        sorted_by_key(self.verdict.records().to_vec())
    }

    pub fn title(&self) -> String {
        self.expect
            .as_rule()
            .and_then(|rule| rule.title())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Failure explanation; `None` when the assertion passed.
    ///
    /// Expectations that produce no records (literals and leaf matchers) get
    /// a one-line "expect X but got Y".
    pub fn report(&self) -> Option<String> {
        if self.passed() {
            return None;
        }
        let records = self.records();
        if records.is_empty() {
            return Some(format!("expect {} but got {}", self.expect, self.actual));
        }
        Some(render_report(&self.title(), &records, &self.options))
    }

    /// Machine-readable form of the outcome
    pub fn to_json(&self) -> serde_json::Value {
        let report = AssertionReport {
            passed: self.passed(),
            title: self.title(),
            expect: &self.expect,
            actual: &self.actual,
            records: self.records(),
        };
        serde_json::to_value(report).unwrap_or(serde_json::Value::Null)
    }

    /// Log the outcome and signal on failure. Returns whether it passed.
    #[track_caller]
    pub fn check<S: FailureSignal + ?Sized>(&self, signal: &mut S) -> bool {
        log_op_start!(Op::Assert.as_str(), title = %self.title());
        let start = Instant::now();

        let passed = self.passed();
        let report = self.report();
        if let Some(report) = &report {
            tracing::error!(
                component = module_path!(),
                op = Op::Assert.as_str(),
                record_count = self.verdict.records().len(),
                "\n\n{report}\n"
            );
        }

        // The signal may unwind, so the end event goes out first
        log_op_end!(
            Op::Assert.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            passed = passed
        );
        if let Some(report) = report {
            signal.fail_now(&report);
        }
        passed
    }

    /// Panic with the report if the assertion failed.
    #[track_caller]
    pub fn assert(&self) {
        self.check(&mut PanicSignal);
    }
}

/// Panic unless `actual` satisfies `expect`.
#[track_caller]
pub fn assert_equal<E, A>(expect: E, actual: &A)
where
    E: IntoExpect,
    A: Inspect + ?Sized,
{
    Assertion::new(expect, actual).assert();
}

/// Assert that a value satisfies an expectation, panicking with the rendered
/// report otherwise. An optional format string is prepended to the report.
///
/// ```should_panic
/// use matcha_assert::assert_matcha;
/// use matcha_core::prelude::*;
///
/// assert_matcha!(be_int(), "12", "status code for {}", "GET /");
/// ```
#[macro_export]
macro_rules! assert_matcha {
    ($expect:expr, $actual:expr $(,)?) => {
        $crate::assert_equal($expect, &$actual)
    };
    ($expect:expr, $actual:expr, $($arg:tt)+) => {
        if let Some(report) = $crate::Assertion::new($expect, &$actual).report() {
            panic!("{}\n\n{}", format_args!($($arg)+), report);
        }
    };
}
