//! ErrorReport: per-argument failure messages.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure messages keyed by argument name.
///
/// An argument only appears once at least one message has been pushed for
/// it. Messages keep the order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: BTreeMap<String, Vec<String>>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under `arg`.
    pub fn push(&mut self, arg: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(arg.into())
            .or_default()
            .push(message.into());
    }

    /// Append several messages under `arg`, in order.
    pub fn extend<I, S>(&mut self, arg: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for message in messages {
            self.push(arg, message);
        }
    }

    /// Messages recorded for `arg`.
    pub fn get(&self, arg: &str) -> Option<&[String]> {
        self.errors.get(arg).map(|v| v.as_slice())
    }

    /// Names of the arguments that failed, sorted.
    pub fn args(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of failing arguments (not messages).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of messages across all arguments.
    pub fn message_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.errors
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl<K, I, S> FromIterator<(K, I)> for ErrorReport
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut report = Self::new();
        for (arg, messages) in iter {
            let arg = arg.into();
            for message in messages {
                report.push(arg.clone(), message);
            }
        }
        report
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (arg, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", arg, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}
