//! The check predicates.
//!
//! Each check looks at one argument and returns `Ok(())` or the failure
//! messages to file under that argument. Presence is always judged against
//! the caller's input object, never against injected defaults.

use argcheck_types::{ArgMap, Value};

use crate::plan::{CheckKind, CheckStep};
use crate::validators::ArgValidator;

pub const MSG_MISSING: &str = "argument missing";
pub const MSG_UNDEFINED: &str = "argument missing or undefined";
pub const MSG_UNKNOWN: &str = "unknown argument";

/// Outcome of one check.
pub type CheckResult = Result<(), Vec<String>>;

/// Run one step against the input, injecting into `values` as needed.
pub async fn run_step(step: &CheckStep<'_>, args: &ArgMap, values: &mut ArgMap) -> CheckResult {
    let arg = step.arg;
    let Some(rules) = step.rules else {
        return match step.kind {
            CheckKind::Extra => extra(),
            // Template steps always carry their rules.
            _ => Ok(()),
        };
    };

    match step.kind {
        CheckKind::Required => required(args, arg),
        CheckKind::Defined => defined(args, arg),
        CheckKind::Default => match &rules.default {
            Some(default) => {
                inject_default(args, values, arg, default);
                Ok(())
            }
            None => Ok(()),
        },
        CheckKind::Validator => match &rules.validator {
            Some(validator) => validate(args, arg, validator.as_ref()).await,
            None => Ok(()),
        },
        CheckKind::Requires => requires(args, &rules.requires),
        CheckKind::Excludes => excludes(args, &rules.excludes),
        CheckKind::Extra => extra(),
    }
}

/// The key must exist; any value, `Undefined` included, is fine.
pub fn required(args: &ArgMap, arg: &str) -> CheckResult {
    if args.contains(arg) {
        Ok(())
    } else {
        Err(vec![MSG_MISSING.to_string()])
    }
}

/// The key must exist and hold something other than `Undefined`.
pub fn defined(args: &ArgMap, arg: &str) -> CheckResult {
    match args.get(arg) {
        Some(value) if !value.is_undefined() => Ok(()),
        _ => Err(vec![MSG_UNDEFINED.to_string()]),
    }
}

/// Insert `default` when the key is absent from the input.
///
/// A present key is never overwritten, even when it holds `Undefined`.
pub fn inject_default(args: &ArgMap, values: &mut ArgMap, arg: &str, default: &Value) {
    if !args.contains(arg) {
        values.insert(arg, default.clone());
    }
}

/// Hand the input value to a validator and wait for its answer.
pub async fn validate(args: &ArgMap, arg: &str, validator: &dyn ArgValidator) -> CheckResult {
    validator
        .validate(args.get_or_undefined(arg))
        .await
        .map_err(|message| vec![message])
}

/// One message per listed key missing from the input.
pub fn requires(args: &ArgMap, names: &[String]) -> CheckResult {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !args.contains(name))
        .map(|name| format!("requires key '{}'", name))
        .collect();
    if missing.is_empty() { Ok(()) } else { Err(missing) }
}

/// One message per listed key present in the input.
pub fn excludes(args: &ArgMap, names: &[String]) -> CheckResult {
    let present: Vec<String> = names
        .iter()
        .filter(|name| args.contains(name))
        .map(|name| format!("excludes key '{}'", name))
        .collect();
    if present.is_empty() { Ok(()) } else { Err(present) }
}

fn extra() -> CheckResult {
    Err(vec![MSG_UNKNOWN.to_string()])
}
