//! argcheck-types: pure data types for argcheck.
//!
//! This crate holds the values that flow in and out of a validation call,
//! with no engine logic:
//!
//! - [`Value`]: dynamic argument value with an `Undefined` sentinel
//! - [`ArgMap`]: named arguments (input object and output values map)
//! - [`ErrorReport`]: per-argument failure messages
//! - [`Verdict`]: the single result delivered by a validation call

mod args;
mod report;
mod value;

pub use args::{ArgMap, Args, Values};
pub use report::ErrorReport;
pub use value::Value;

/// Outcome of one validation call: the normalized values, or every failure.
pub type Verdict = Result<ArgMap, ErrorReport>;

/// Input that does not have the shape of a key/value object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{what} must be an object, got {found}")]
    NotAnObject {
        /// Which input was wrong (`args` or `template`).
        what: &'static str,
        found: &'static str,
    },
}

impl ShapeError {
    /// Shape error for a JSON value that should have been an object.
    pub fn not_an_object(what: &'static str, found: &serde_json::Value) -> Self {
        ShapeError::NotAnObject {
            what,
            found: args::json_type_name(found),
        }
    }
}
