//! Integration tests for validation calls through the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rstest::rstest;
use serde_json::json;

use argcheck_kernel::{check, ArgValidator, CheckOptions, Checker, RuleSet, Template};
use argcheck_types::{ArgMap, ErrorReport, Value};

fn errors(entries: &[(&str, &str)]) -> ErrorReport {
    let mut report = ErrorReport::new();
    for (arg, message) in entries {
        report.push(*arg, *message);
    }
    report
}

// ============================================================================
// Scenarios
// ============================================================================

#[rstest]
#[case::required_present(
    Template::new().arg("a", RuleSet::new().required()),
    ArgMap::new().with("a", "x"),
    Ok(ArgMap::new().with("a", "x"))
)]
#[case::required_missing(
    Template::new().arg("a", RuleSet::new().required()),
    ArgMap::new(),
    Err(errors(&[("a", "argument missing")]))
)]
#[case::default_injected(
    Template::new().arg("a", RuleSet::new().default_value("d")),
    ArgMap::new(),
    Ok(ArgMap::new().with("a", "d"))
)]
#[case::requires_missing(
    Template::new().arg("a", RuleSet::new().requires(["b"])),
    ArgMap::new().with("a", 1),
    Err(errors(&[("a", "requires key 'b'")]))
)]
#[case::excludes_present(
    Template::new().arg("a", RuleSet::new().excludes(["b"])),
    ArgMap::new().with("a", 1).with("b", 2),
    Err(errors(&[("a", "excludes key 'b'")]))
)]
#[case::default_never_overwrites_undefined(
    Template::new().arg("a", RuleSet::new().default_value("d")),
    ArgMap::new().with("a", Value::Undefined),
    Ok(ArgMap::new().with("a", Value::Undefined))
)]
#[case::required_accepts_undefined(
    Template::new().arg("a", RuleSet::new().required()),
    ArgMap::new().with("a", Value::Undefined),
    Ok(ArgMap::new().with("a", Value::Undefined))
)]
#[case::defined_rejects_undefined(
    Template::new().arg("a", RuleSet::new().defined()),
    ArgMap::new().with("a", Value::Undefined),
    Err(errors(&[("a", "argument missing or undefined")]))
)]
#[case::values_hold_declared_keys_only(
    Template::new()
        .arg("a", RuleSet::new())
        .arg("b", RuleSet::new().default_value(2)),
    ArgMap::new().with("a", 1).with("stray", 9),
    Ok(ArgMap::new().with("a", 1).with("b", 2))
)]
#[tokio::test]
async fn scenario(
    #[case] template: Template,
    #[case] args: ArgMap,
    #[case] expected: Result<ArgMap, ErrorReport>,
) {
    let verdict = check(&args, &template, &CheckOptions::default()).await;
    assert_eq!(verdict, expected);
}

// ============================================================================
// Validators
// ============================================================================

/// Validator that sleeps before answering and records the order it ran in.
struct Slow {
    name: String,
    delay: Duration,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ArgValidator for Slow {
    fn name(&self) -> &str {
        &self.name
    }

    async fn validate(&self, value: &Value) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        self.log.lock().unwrap().push(self.name.clone());
        if value.as_str() == Some("goodValue") {
            Ok(())
        } else {
            Err("invalid value, not goodValue".to_string())
        }
    }
}

#[tokio::test]
async fn async_validators_are_awaited_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let slow = |name: &str, ms: u64| Slow {
        name: name.to_string(),
        delay: Duration::from_millis(ms),
        log: log.clone(),
    };

    // The first validator is the slowest; it must still finish first.
    let template = Template::new()
        .arg("a", RuleSet::new().validator(slow("a", 30)))
        .arg("b", RuleSet::new().validator(slow("b", 1)))
        .arg("c", RuleSet::new().validator(slow("c", 10)));
    let args = ArgMap::new()
        .with("a", "goodValue")
        .with("b", "bad")
        .with("c", "goodValue");

    let verdict = Checker::default().check(&args, &template).await;

    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    assert_eq!(
        verdict,
        Err(errors(&[("b", "invalid value, not goodValue")]))
    );
}

#[tokio::test]
async fn closure_validator_message_is_reported() {
    let template = Template::new().arg(
        "a",
        RuleSet::new().validate_with(|v| match v.as_str() {
            Some("goodValue") => Ok(()),
            _ => Err("invalid value, not goodValue".into()),
        }),
    );

    let ok = check(&ArgMap::new().with("a", "goodValue"), &template, &CheckOptions::default()).await;
    assert_eq!(ok, Ok(ArgMap::new().with("a", "goodValue")));

    let err = check(&ArgMap::new().with("a", "b"), &template, &CheckOptions::default()).await;
    assert_eq!(err, Err(errors(&[("a", "invalid value, not goodValue")])));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn template_shared_across_concurrent_calls() {
    let template = Arc::new(
        Template::new()
            .arg("id", RuleSet::new().required().validate_with(|v| {
                if v.as_i64().is_some_and(|i| i % 2 == 0) {
                    Ok(())
                } else {
                    Err("odd".into())
                }
            }))
            .arg("mode", RuleSet::new().default_value("read")),
    );
    let checker = Checker::default();

    let handles: Vec<_> = (0..32i64)
        .map(|i| {
            let template = template.clone();
            let checker = checker.clone();
            tokio::spawn(async move {
                let args = ArgMap::new().with("id", i);
                (i, checker.check(&args, &template).await)
            })
        })
        .collect();

    for handle in handles {
        let (i, verdict) = handle.await.unwrap();
        if i % 2 == 0 {
            let values = verdict.unwrap();
            assert_eq!(values.get("id"), Some(&Value::Int(i)));
            assert_eq!(values.get("mode"), Some(&Value::from("read")));
        } else {
            assert_eq!(verdict, Err(errors(&[("id", "odd")])));
        }
    }
}

/// Three-argument template whose validators log `<prefix><index>` as they run.
fn logging_template(prefix: &str, log: &Arc<Mutex<Vec<String>>>) -> Template {
    (0..3)
        .map(|i| {
            let log = log.clone();
            let entry = format!("{prefix}{i}");
            let rules = RuleSet::new().validate_with(move |_| {
                log.lock().unwrap().push(entry.clone());
                Ok(())
            });
            (format!("arg{i}"), rules)
        })
        .collect()
}

#[tokio::test(flavor = "current_thread")]
async fn checks_yield_between_steps() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let first = logging_template("a", &log);
    let second = logging_template("b", &log);
    let args = ArgMap::new();
    let checker = Checker::default();

    let (a, b) = tokio::join!(checker.check(&args, &first), checker.check(&args, &second));
    assert!(a.is_ok());
    assert!(b.is_ok());

    // Synchronous validators never suspend, so the second call only gets a
    // turn if the executor hands control back between steps.
    let log = log.lock().unwrap().clone();
    assert_eq!(log.len(), 6);
    let position = |entry: &str| log.iter().position(|e| e == entry).unwrap();
    assert!(
        position("b0") < position("a2"),
        "calls did not interleave: {:?}",
        log
    );
}

#[tokio::test]
async fn large_template_runs_without_deep_recursion() {
    let mut template = Template::new();
    let mut args = ArgMap::new();
    for i in 0..5_000i64 {
        template.insert(format!("arg{i}"), RuleSet::new().required().defined());
        args.insert(format!("arg{i}"), i);
    }

    let values = Checker::default().check(&args, &template).await.unwrap();
    assert_eq!(values.len(), 5_000);
}

// ============================================================================
// JSON entry point
// ============================================================================

#[tokio::test]
async fn prepared_json_call() {
    let checker = Checker::default();
    let prepared = checker
        .prepare(
            &json!({"user": "amy", "token": "t"}),
            &json!({
                "user": {"required": true, "validator": "non_empty"},
                "mode": {"default": "read"},
                "token": {"excludes": ["password"]},
                "password": {"requires": ["user"]}
            }),
        )
        .unwrap();

    let values = prepared.run().await.unwrap();
    assert_eq!(
        values.to_json(),
        json!({"user": "amy", "token": "t", "mode": "read"})
    );
}

#[test]
fn structural_error_display() {
    let checker = Checker::default();
    let errors: Vec<String> = [
        json!({"a": {"bogus": true}}),
        json!({"a": {"requires": "b"}}),
        json!({"a": {"validator": "nope"}}),
        json!({"a": {"defined": "yes"}}),
    ]
    .iter()
    .map(|template| checker.prepare(&json!({}), template).unwrap_err().to_string())
    .collect();

    insta::assert_snapshot!(errors.join("\n"), @r"
    a: unknown template option: bogus
    a: passed requires-list should be an array
    a: passed validator is not a function
    a: defined should be a boolean
    ");
}

#[tokio::test]
async fn error_report_propagates_with_anyhow() {
    async fn run() -> anyhow::Result<ArgMap> {
        let template = Template::new().arg("a", RuleSet::new().required());
        let values = Checker::default().check(&ArgMap::new(), &template).await?;
        Ok(values)
    }

    let err = run().await.unwrap_err();
    assert_eq!(err.to_string(), "a: argument missing");
    assert!(err.downcast_ref::<ErrorReport>().is_some());
}
