//! Named validators for JSON templates.
//!
//! A JSON template cannot carry code, so its `validator` rule holds a name
//! instead. The registry maps those names to [`ArgValidator`]s and turns a raw
//! `validator` entry into something the executor can call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::TemplateError;

use super::traits::ArgValidator;

/// Validators addressable from JSON templates, keyed by [`ArgValidator::name`].
#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    by_name: BTreeMap<String, Arc<dyn ArgValidator>>,
}

impl ValidatorRegistry {
    /// An empty registry. JSON templates compiled against it can't use `validator`.
    pub fn new() -> Self {
        Self::default()
    }

    /// `string`, `integer`, `number`, `boolean`, `array`, `object` and `non_empty`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::register_builtins(&mut registry);
        registry
    }

    /// Add `validator`; a later registration under the same name wins.
    pub fn register(&mut self, validator: impl ArgValidator + 'static) {
        self.register_arc(Arc::new(validator));
    }

    pub fn register_arc(&mut self, validator: Arc<dyn ArgValidator>) {
        self.by_name.insert(validator.name().to_string(), validator);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ArgValidator>> {
        self.by_name.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Turn the raw `validator` entry of `arg`'s rule set into a validator.
    ///
    /// The entry must be a string naming a registered validator. Anything
    /// else is `NotInvocable` when `strict`; otherwise the rule is dropped
    /// with a warning and `Ok(None)` comes back.
    pub fn resolve(
        &self,
        arg: &str,
        raw: &serde_json::Value,
        strict: bool,
    ) -> Result<Option<Arc<dyn ArgValidator>>, TemplateError> {
        if let Some(validator) = raw.as_str().and_then(|name| self.get(name)) {
            return Ok(Some(validator));
        }
        if strict {
            return Err(TemplateError::NotInvocable {
                arg: arg.to_string(),
            });
        }
        tracing::warn!(arg, validator = %raw, "dropping unresolvable validator");
        Ok(None)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::validator_fn;
    use argcheck_types::Value;
    use serde_json::json;

    fn registry() -> ValidatorRegistry {
        let mut registry = ValidatorRegistry::new();
        registry.register(validator_fn("zzz", |_| Ok(())));
        registry.register(validator_fn("aaa", |_| Ok(())));
        registry
    }

    #[test]
    fn names_come_back_sorted() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["aaa", "zzz"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("aaa"));
        assert!(!registry.contains("bbb"));
        assert_eq!(format!("{:?}", registry), r#"{"aaa", "zzz"}"#);
    }

    #[tokio::test]
    async fn later_registration_wins() {
        let mut registry = ValidatorRegistry::new();
        registry.register(validator_fn("v", |_| Err("old".into())));
        registry.register(validator_fn("v", |_| Ok(())));

        assert_eq!(registry.len(), 1);
        let v = registry.get("v").unwrap();
        assert!(v.validate(&Value::Null).await.is_ok());
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ValidatorRegistry::with_builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["array", "boolean", "integer", "non_empty", "number", "object", "string"]
        );
    }

    #[test]
    fn resolve_known_name() {
        let resolved = registry().resolve("a", &json!("aaa"), true).unwrap();
        assert_eq!(resolved.map(|v| v.name().to_string()), Some("aaa".into()));
    }

    #[test]
    fn resolve_rejects_in_strict_mode() {
        let registry = registry();
        for raw in [json!("missing"), json!(42), json!(null)] {
            assert_eq!(
                registry.resolve("a", &raw, true).unwrap_err(),
                TemplateError::NotInvocable { arg: "a".into() }
            );
        }
    }

    #[test]
    fn resolve_drops_in_fast_mode() {
        let registry = registry();
        assert!(registry.resolve("a", &json!("missing"), false).unwrap().is_none());
        assert!(registry.resolve("a", &json!(["aaa"]), false).unwrap().is_none());
    }
}
