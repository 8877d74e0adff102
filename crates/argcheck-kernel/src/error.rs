//! Structural errors raised while compiling a template.
//!
//! These are caller bugs, not data problems. They are returned before any
//! check runs and never end up in an [`ErrorReport`](argcheck_types::ErrorReport).

use argcheck_types::ShapeError;

/// A template or call site that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Input or template is not a key/value object.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("{arg}: rule set must be an object, got {found}")]
    RuleSetNotObject { arg: String, found: &'static str },

    #[error("{arg}: unknown template option: {rule}")]
    UnknownRule { arg: String, rule: String },

    /// `validator` is not a string, or names nothing in the registry.
    #[error("{arg}: passed validator is not a function")]
    NotInvocable { arg: String },

    #[error("{arg}: passed {rule}-list should be an array")]
    NotAList { arg: String, rule: &'static str },

    #[error("{arg}: {rule}-list entry {index} should be an argument name")]
    NotAName {
        arg: String,
        rule: &'static str,
        index: usize,
    },

    #[error("{arg}: {rule} should be a boolean")]
    NotABool { arg: String, rule: &'static str },
}

impl TemplateError {
    /// The template argument the error is about, if any.
    pub fn arg(&self) -> Option<&str> {
        match self {
            TemplateError::Shape(_) => None,
            TemplateError::RuleSetNotObject { arg, .. }
            | TemplateError::UnknownRule { arg, .. }
            | TemplateError::NotInvocable { arg }
            | TemplateError::NotAList { arg, .. }
            | TemplateError::NotAName { arg, .. }
            | TemplateError::NotABool { arg, .. } => Some(arg),
        }
    }
}
