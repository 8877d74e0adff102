//! Rule sets: the constraints attached to one argument.

use std::fmt;
use std::sync::Arc;

use argcheck_types::Value;

use crate::validators::{validator_fn, ArgValidator};

/// The recognized rule keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Defined,
    Default,
    Validator,
    Requires,
    Excludes,
}

impl RuleKind {
    /// Every rule, in check order.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Required,
        RuleKind::Defined,
        RuleKind::Default,
        RuleKind::Validator,
        RuleKind::Requires,
        RuleKind::Excludes,
    ];

    /// Key used in JSON templates.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Defined => "defined",
            RuleKind::Default => "default",
            RuleKind::Validator => "validator",
            RuleKind::Requires => "requires",
            RuleKind::Excludes => "excludes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Cross-argument rules, run after every single-argument rule.
    pub fn is_post_check(self) -> bool {
        matches!(self, RuleKind::Requires | RuleKind::Excludes)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constraints for one argument.
///
/// ```ignore
/// let rules = RuleSet::new()
///     .required()
///     .requires(["password"])
///     .excludes(["token"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// The key must be present in the input.
    pub required: bool,
    /// The key must be present and not `Undefined`.
    pub defined: bool,
    /// Injected into the values map when the key is absent.
    pub default: Option<Value>,
    pub validator: Option<Arc<dyn ArgValidator>>,
    /// Keys that must also be present.
    pub requires: Vec<String>,
    /// Keys that must not be present.
    pub excludes: Vec<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn defined(mut self) -> Self {
        self.defined = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: impl ArgValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn validator_arc(mut self, validator: Arc<dyn ArgValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Attach a synchronous closure as the validator.
    pub fn validate_with<F>(self, func: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator(validator_fn("closure", func))
    }

    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Rules that produce a check, in check order.
    pub fn active_rules(&self) -> impl Iterator<Item = RuleKind> + '_ {
        RuleKind::ALL.into_iter().filter(|kind| match kind {
            RuleKind::Required => self.required,
            RuleKind::Defined => self.defined,
            RuleKind::Default => self.default.is_some(),
            RuleKind::Validator => self.validator.is_some(),
            RuleKind::Requires => !self.requires.is_empty(),
            RuleKind::Excludes => !self.excludes.is_empty(),
        })
    }
}
