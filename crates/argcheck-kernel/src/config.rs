//! Options for a validation call.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the fast path (`prod*` values).
pub const ENV_MODE: &str = "ARGCHECK_ENV";

/// Environment variable overriding [`CheckOptions::extra_arguments`].
pub const ENV_EXTRA_ARGUMENTS: &str = "ARGCHECK_EXTRA_ARGUMENTS";

/// Configuration for validation calls.
///
/// Deserializes from the camelCase form used by host configuration files,
/// e.g. `{"extraArguments": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckOptions {
    /// Allow input keys the template does not declare.
    ///
    /// When false, each undeclared key fails with `"unknown argument"`.
    pub extra_arguments: bool,
    /// Skip the structural checks on JSON templates (the fast path).
    ///
    /// Unknown rule keys are then ignored, non-boolean flags fall back to
    /// truthiness, non-list `requires`/`excludes` count as empty and an
    /// unresolvable validator is dropped with a warning. Template mistakes
    /// stop failing fast; use this only for templates already exercised
    /// with the checks on.
    pub skip_template_checks: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            extra_arguments: true,
            skip_template_checks: false,
        }
    }
}

impl CheckOptions {
    /// Options for production: template checks skipped.
    pub fn production() -> Self {
        Self {
            skip_template_checks: true,
            ..Self::default()
        }
    }

    /// Read options from `ARGCHECK_ENV` and `ARGCHECK_EXTRA_ARGUMENTS`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_MODE).ok().as_deref(),
            std::env::var(ENV_EXTRA_ARGUMENTS).ok().as_deref(),
        )
    }

    fn from_vars(mode: Option<&str>, extra: Option<&str>) -> Self {
        let mut options = Self::default();
        if mode.is_some_and(|m| m.starts_with("prod")) {
            options.skip_template_checks = true;
        }
        match extra.map(str::trim) {
            Some("false") | Some("0") | Some("no") => options.extra_arguments = false,
            Some("true") | Some("1") | Some("yes") => options.extra_arguments = true,
            Some(other) => {
                tracing::warn!(
                    var = ENV_EXTRA_ARGUMENTS,
                    value = other,
                    "ignoring unrecognized value"
                );
            }
            None => {}
        }
        options
    }

    pub fn with_extra_arguments(mut self, allow: bool) -> Self {
        self.extra_arguments = allow;
        self
    }

    pub fn with_skip_template_checks(mut self, skip: bool) -> Self {
        self.skip_template_checks = skip;
        self
    }
}
