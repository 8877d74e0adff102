//! Check plans: a template compiled against one input object.
//!
//! A plan is two ordered lists of steps. Pre-checks look at one argument
//! at a time; post-checks (requires/excludes) look across arguments and only
//! run once every pre-check is done and defaults have been injected.
//!
//! ```text
//! template order:  a            b
//!                  ├ required   ├ defined
//!                  ├ default    └ excludes ──┐
//!                  └ requires ───────────┐   │
//!
//! pre:   a.required, a.default, b.defined, [extra...]
//! post:  a.requires, b.excludes
//! ```

use std::fmt;

use argcheck_types::ArgMap;

use crate::config::CheckOptions;
use crate::rules::{RuleKind, RuleSet};
use crate::template::Template;

/// What a single step checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Required,
    Defined,
    Default,
    Validator,
    Requires,
    Excludes,
    /// Input key the template does not declare, when extra arguments are
    /// not allowed.
    Extra,
}

impl CheckKind {
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Required => "required",
            CheckKind::Defined => "defined",
            CheckKind::Default => "default",
            CheckKind::Validator => "validator",
            CheckKind::Requires => "requires",
            CheckKind::Excludes => "excludes",
            CheckKind::Extra => "extra",
        }
    }
}

impl From<RuleKind> for CheckKind {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Required => CheckKind::Required,
            RuleKind::Defined => CheckKind::Defined,
            RuleKind::Default => CheckKind::Default,
            RuleKind::Validator => CheckKind::Validator,
            RuleKind::Requires => CheckKind::Requires,
            RuleKind::Excludes => CheckKind::Excludes,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One unit of work: an argument paired with a check.
#[derive(Debug, Clone)]
pub struct CheckStep<'a> {
    pub arg: &'a str,
    pub kind: CheckKind,
    /// The argument's rules; `None` for `Extra` steps.
    pub rules: Option<&'a RuleSet>,
}

/// Ordered checks for one validation call, plus the seeded values map.
#[derive(Debug)]
pub struct CheckPlan<'a> {
    pub pre: Vec<CheckStep<'a>>,
    pub post: Vec<CheckStep<'a>>,
    /// Input values for every template argument present in the input.
    pub values: ArgMap,
}

impl<'a> CheckPlan<'a> {
    /// Lay out the checks for `template` against `args`.
    ///
    /// Arguments are visited in template order. Within an argument the
    /// pre-checks go required, defined, default, validator and the
    /// post-checks go requires, excludes.
    pub fn compile(template: &'a Template, args: &'a ArgMap, options: &CheckOptions) -> Self {
        let mut pre = Vec::new();
        let mut post = Vec::new();
        let mut values = ArgMap::new();

        for (arg, rules) in template.iter() {
            if let Some(value) = args.get(arg) {
                values.insert(arg, value.clone());
            }

            for rule in rules.active_rules() {
                let step = CheckStep {
                    arg,
                    kind: rule.into(),
                    rules: Some(rules),
                };
                if rule.is_post_check() {
                    post.push(step);
                } else {
                    pre.push(step);
                }
            }
        }

        if !options.extra_arguments {
            for arg in args.names().filter(|name| !template.contains(name)) {
                pre.push(CheckStep {
                    arg,
                    kind: CheckKind::Extra,
                    rules: None,
                });
            }
        }

        Self { pre, post, values }
    }

    /// Total number of steps.
    pub fn len(&self) -> usize {
        self.pre.len() + self.post.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }
}
