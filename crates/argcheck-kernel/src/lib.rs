//! argcheck-kernel: the validation engine of argcheck.
//!
//! This crate provides:
//!
//! - **Rules and templates**: per-argument [`RuleSet`]s in an ordered
//!   [`Template`], built in code or compiled from JSON
//! - **Check plans**: a template laid out against one input as ordered
//!   pre-checks and post-checks
//! - **Executor**: runs the plan one check at a time and delivers a single
//!   [`Verdict`](argcheck_types::Verdict)
//! - **Validators**: the async [`ArgValidator`] trait, a name registry, and
//!   built-in type predicates
//!
//! Structural mistakes (bad template shape, unknown rule keys, unresolvable
//! validators) are returned as [`TemplateError`] before anything runs. Data
//! problems are collected into an [`ErrorReport`](argcheck_types::ErrorReport)
//! and delivered as the verdict.

pub mod checker;
pub mod checks;
pub mod config;
pub mod error;
pub mod executor;
pub mod plan;
pub mod rules;
pub mod template;
pub mod validators;

pub use checker::{check, Checker, PreparedCheck};
pub use config::CheckOptions;
pub use error::TemplateError;
pub use executor::Phase;
pub use plan::{CheckKind, CheckPlan, CheckStep};
pub use rules::{RuleKind, RuleSet};
pub use template::Template;
pub use validators::{validator_fn, ArgValidator, FnValidator, ValidatorRegistry};
