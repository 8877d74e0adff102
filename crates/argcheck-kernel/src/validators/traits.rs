//! The validator trait and a closure adapter.

use std::fmt;

use async_trait::async_trait;

use argcheck_types::Value;

/// A user-supplied validation function attached to one argument.
///
/// `validate` receives the argument's input value (`Undefined` when the key
/// is missing) and returns `Err(message)` to fail the check. It may finish
/// right away or await I/O first; the executor waits either way before it
/// moves on to the next check.
#[async_trait]
pub trait ArgValidator: Send + Sync {
    /// Name used in logs and for registry lookups.
    fn name(&self) -> &str;

    /// Validate one value.
    async fn validate(&self, value: &Value) -> Result<(), String>;
}

impl fmt::Debug for dyn ArgValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgValidator").field(&self.name()).finish()
    }
}

/// Adapter turning a synchronous closure into an [`ArgValidator`].
pub struct FnValidator<F> {
    name: String,
    func: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> ArgValidator for FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn validate(&self, value: &Value) -> Result<(), String> {
        (self.func)(value)
    }
}

/// Shorthand for [`FnValidator::new`].
pub fn validator_fn<F>(name: impl Into<String>, func: F) -> FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    FnValidator::new(name, func)
}
