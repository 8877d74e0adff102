//! Case file parser and runner.
//!
//! Parses the `tests/cases/*.test` format and runs each case through a
//! [`Checker`]:
//!
//! ```text
//! # test: requires_missing
//! # expect: errors
//! # options: {"extraArguments": false}
//! ---
//! {"a": {"requires": ["b"]}}
//! ---
//! {"a": 1}
//! ---
//! {"a": ["requires key 'b'"]}
//! ===
//! ```
//!
//! Sections are template, args, expected. `# expect:` is `ok` (expected is
//! the values object), `errors` (expected is the errors object) or
//! `template_error` (expected is a substring of the error message).
//! `# options:` is optional.

use anyhow::{Context, Result};

use argcheck_kernel::{CheckOptions, Checker};

use crate::{TestResult, TestSummary};

/// A single validation test case.
#[derive(Debug, Clone)]
pub struct CheckTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// Options JSON from the `# options:` line, if any.
    pub options: Option<String>,
    pub template: String,
    pub args: String,
    pub expected: CheckExpectation,
}

/// What we expect from a validation call.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckExpectation {
    /// Values object as JSON.
    Ok(String),
    /// Errors object as JSON.
    Errors(String),
    /// Substring of the structural error message.
    TemplateError(String),
}

/// Parse the *.test file format into test cases.
pub fn parse_check_tests(content: &str) -> Vec<CheckTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        let Some(name) = line.strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        // Header lines until the first ---
        let mut expect = "ok".to_string();
        let mut options = None;
        while i < lines.len() && lines[i].trim() != "---" {
            let header = lines[i].trim();
            if let Some(value) = header.strip_prefix("# expect:") {
                expect = value.trim().to_string();
            } else if let Some(value) = header.strip_prefix("# options:") {
                options = Some(value.trim().to_string());
            }
            i += 1;
        }
        i += 1; // skip the ---

        let template = collect_until(&lines, &mut i, "---");
        let args = collect_until(&lines, &mut i, "---");
        let expected = collect_until(&lines, &mut i, "===");

        let expected = match expect.as_str() {
            "errors" => CheckExpectation::Errors(expected),
            "template_error" => CheckExpectation::TemplateError(expected),
            _ => CheckExpectation::Ok(expected),
        };

        cases.push(CheckTestCase {
            name,
            line_number: start_line,
            options,
            template,
            args,
            expected,
        });
    }

    cases
}

/// Collect trimmed section text up to `end`, consuming the delimiter.
fn collect_until(lines: &[&str], i: &mut usize, end: &str) -> String {
    let mut section = Vec::new();
    while *i < lines.len() && lines[*i].trim() != end {
        section.push(lines[*i]);
        *i += 1;
    }
    *i += 1;
    section.join("\n").trim().to_string()
}

impl CheckTestCase {
    /// Run this test case and return the result.
    pub async fn run(&self) -> TestResult {
        match self.try_run().await {
            Ok(result) => result,
            Err(e) => TestResult::Error {
                message: format!("{:#}", e),
            },
        }
    }

    async fn try_run(&self) -> Result<TestResult> {
        let options: CheckOptions = match &self.options {
            Some(raw) => serde_json::from_str(raw).context("options are not valid JSON")?,
            None => CheckOptions::default(),
        };
        let template: serde_json::Value =
            serde_json::from_str(&self.template).context("template section is not valid JSON")?;
        let args: serde_json::Value =
            serde_json::from_str(&self.args).context("args section is not valid JSON")?;

        let checker = Checker::new(options);
        let prepared = match checker.prepare(&args, &template) {
            Ok(prepared) => prepared,
            Err(e) => {
                let actual = format!("template error: {}", e);
                return Ok(match &self.expected {
                    CheckExpectation::TemplateError(expected) if actual.contains(expected) => {
                        TestResult::Pass
                    }
                    other => TestResult::Fail {
                        expected: describe(other),
                        actual,
                    },
                });
            }
        };

        let (kind, actual) = match prepared.run().await {
            Ok(values) => ("ok", values.to_json()),
            Err(errors) => ("errors", errors.to_json()),
        };

        let result = match &self.expected {
            CheckExpectation::Ok(expected) if kind == "ok" => compare_json(expected, &actual)?,
            CheckExpectation::Errors(expected) if kind == "errors" => {
                compare_json(expected, &actual)?
            }
            other => TestResult::Fail {
                expected: describe(other),
                actual: format!("{}: {}", kind, actual),
            },
        };
        Ok(result)
    }
}

fn compare_json(expected: &str, actual: &serde_json::Value) -> Result<TestResult> {
    let expected: serde_json::Value =
        serde_json::from_str(expected).context("expected section is not valid JSON")?;
    if &expected == actual {
        Ok(TestResult::Pass)
    } else {
        Ok(TestResult::Fail {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn describe(expectation: &CheckExpectation) -> String {
    match expectation {
        CheckExpectation::Ok(s) => format!("ok: {}", s),
        CheckExpectation::Errors(s) => format!("errors: {}", s),
        CheckExpectation::TemplateError(s) => format!("template error: {}", s),
    }
}

/// Run all test cases and return a summary.
pub async fn run_check_tests(cases: &[CheckTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();

    for case in cases {
        let result = case.run().await;
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
