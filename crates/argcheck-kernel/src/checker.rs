//! The Checker: entry point for validation calls.
//!
//! Two ways in:
//!
//! - typed: build a [`Template`] with [`RuleSet`](crate::RuleSet)s and call
//!   [`Checker::check`]; nothing structural can go wrong, so the result is
//!   just the [`Verdict`];
//! - JSON: call [`Checker::prepare`] with raw input and template. Shape and
//!   template errors come back right away, before any check has run. The
//!   returned [`PreparedCheck`] is then awaited for the verdict.
//!
//! # Example
//!
//! ```ignore
//! use argcheck_kernel::{Checker, RuleSet, Template};
//! use argcheck_types::ArgMap;
//!
//! let template = Template::new()
//!     .arg("user", RuleSet::new().required())
//!     .arg("mode", RuleSet::new().default_value("read"));
//!
//! let values = Checker::default()
//!     .check(&ArgMap::new().with("user", "amy"), &template)
//!     .await?;
//! assert_eq!(values.get("mode"), Some(&"read".into()));
//! ```

use std::sync::Arc;

use argcheck_types::{ArgMap, Verdict};

use crate::config::CheckOptions;
use crate::error::TemplateError;
use crate::executor::execute;
use crate::plan::CheckPlan;
use crate::template::Template;
use crate::validators::ValidatorRegistry;

/// Runs validation calls with a fixed registry and options.
///
/// Cheap to clone and safe to share: every call gets its own values and
/// errors, and templates are only ever read.
#[derive(Debug, Clone)]
pub struct Checker {
    registry: Arc<ValidatorRegistry>,
    options: CheckOptions,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckOptions::default())
    }
}

impl Checker {
    /// Create a checker with the built-in validators registered.
    pub fn new(options: CheckOptions) -> Self {
        Self::with_registry(ValidatorRegistry::with_builtins(), options)
    }

    /// Create a checker with options taken from the environment.
    pub fn from_env() -> Self {
        Self::new(CheckOptions::from_env())
    }

    /// Create a checker with a caller-built registry.
    pub fn with_registry(registry: ValidatorRegistry, options: CheckOptions) -> Self {
        Self {
            registry: Arc::new(registry),
            options,
        }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Validate `args` against a typed template.
    pub async fn check(&self, args: &ArgMap, template: &Template) -> Verdict {
        check(args, template, &self.options).await
    }

    /// Validate and hand the verdict to `done`, which is called exactly once.
    pub async fn check_with<F>(&self, args: &ArgMap, template: &Template, done: F)
    where
        F: FnOnce(Verdict),
    {
        done(self.check(args, template).await);
    }

    /// Compile a JSON template and input, failing fast on structural errors.
    ///
    /// No check runs until the returned [`PreparedCheck`] is awaited.
    pub fn prepare(
        &self,
        args: &serde_json::Value,
        template: &serde_json::Value,
    ) -> Result<PreparedCheck, TemplateError> {
        let args = ArgMap::from_json(args)?;
        let template = Template::from_json(template, &self.registry, &self.options)?;
        Ok(PreparedCheck {
            args,
            template,
            options: self.options.clone(),
        })
    }

    /// Compile a JSON template once for repeated use.
    pub fn compile(&self, template: &serde_json::Value) -> Result<Template, TemplateError> {
        Template::from_json(template, &self.registry, &self.options)
    }
}

/// A JSON validation call that passed structural checks.
#[derive(Debug)]
pub struct PreparedCheck {
    args: ArgMap,
    template: Template,
    options: CheckOptions,
}

impl PreparedCheck {
    pub fn args(&self) -> &ArgMap {
        &self.args
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Run every check and deliver the verdict.
    pub async fn run(self) -> Verdict {
        check(&self.args, &self.template, &self.options).await
    }
}

/// Validate `args` against `template` with the given options.
pub async fn check(args: &ArgMap, template: &Template, options: &CheckOptions) -> Verdict {
    let plan = CheckPlan::compile(template, args, options);
    execute(plan, args).await
}
