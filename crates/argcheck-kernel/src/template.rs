//! Templates and the JSON template compiler.
//!
//! A [`Template`] maps argument names to [`RuleSet`]s and keeps insertion
//! order; that order is the order checks run in. Templates are built either
//! with the typed builder or compiled from JSON:
//!
//! ```json
//! {
//!   "user":     { "required": true, "validator": "non_empty" },
//!   "password": { "defined": true },
//!   "mode":     { "default": "read" },
//!   "token":    { "excludes": ["user", "password"] }
//! }
//! ```
//!
//! JSON compilation fails fast on structural mistakes (unknown rule keys,
//! non-list dependencies, unresolvable validators) unless
//! [`CheckOptions::skip_template_checks`] is set.

use std::collections::HashMap;

use argcheck_types::{ShapeError, Value};

use crate::config::CheckOptions;
use crate::error::TemplateError;
use crate::rules::{RuleKind, RuleSet};
use crate::validators::ValidatorRegistry;

/// Ordered argument name to rule set mapping.
#[derive(Debug, Clone, Default)]
pub struct Template {
    args: Vec<(String, RuleSet)>,
    /// Position of each name in `args`.
    index: HashMap<String, usize>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Template::insert`].
    pub fn arg(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.insert(name, rules);
        self
    }

    /// Add an argument. An existing name keeps its position and gets the
    /// new rule set.
    pub fn insert(&mut self, name: impl Into<String>, rules: RuleSet) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.args[pos].1 = rules,
            None => {
                self.index.insert(name.clone(), self.args.len());
                self.args.push((name, rules));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.index.get(name).map(|&pos| &self.args[pos].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSet)> {
        self.args.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Compile a JSON template, resolving validator names in `registry`.
    pub fn from_json(
        json: &serde_json::Value,
        registry: &ValidatorRegistry,
        options: &CheckOptions,
    ) -> Result<Self, TemplateError> {
        let object = json
            .as_object()
            .ok_or_else(|| ShapeError::not_an_object("template", json))?;

        let strict = !options.skip_template_checks;
        let mut template = Template::new();

        // Needs serde_json's preserve_order so this walks keys as written.
        for (arg, raw_rules) in object {
            let rules = compile_rule_set(arg, raw_rules, registry, strict)?;
            template.insert(arg.clone(), rules);
        }

        Ok(template)
    }

    /// Parse and compile a JSON template from text.
    ///
    /// Malformed JSON is reported as a shape error on `template`.
    pub fn from_json_str(
        source: &str,
        registry: &ValidatorRegistry,
        options: &CheckOptions,
    ) -> Result<Self, TemplateError> {
        let json: serde_json::Value = serde_json::from_str(source).map_err(|_| {
            ShapeError::NotAnObject {
                what: "template",
                found: "malformed JSON",
            }
        })?;
        Self::from_json(&json, registry, options)
    }
}

impl<S: Into<String>> FromIterator<(S, RuleSet)> for Template {
    fn from_iter<I: IntoIterator<Item = (S, RuleSet)>>(iter: I) -> Self {
        let mut template = Template::new();
        for (name, rules) in iter {
            template.insert(name, rules);
        }
        template
    }
}

fn compile_rule_set(
    arg: &str,
    raw: &serde_json::Value,
    registry: &ValidatorRegistry,
    strict: bool,
) -> Result<RuleSet, TemplateError> {
    let Some(object) = raw.as_object() else {
        if strict {
            return Err(TemplateError::RuleSetNotObject {
                arg: arg.to_string(),
                found: json_kind(raw),
            });
        }
        return Ok(RuleSet::new());
    };

    let mut rules = RuleSet::new();

    for (key, value) in object {
        let Some(kind) = RuleKind::from_name(key) else {
            if strict {
                return Err(TemplateError::UnknownRule {
                    arg: arg.to_string(),
                    rule: key.clone(),
                });
            }
            continue;
        };

        match kind {
            RuleKind::Required => rules.required = flag(arg, kind, value, strict)?,
            RuleKind::Defined => rules.defined = flag(arg, kind, value, strict)?,
            RuleKind::Default => rules.default = Some(Value::from(value.clone())),
            RuleKind::Validator => rules.validator = registry.resolve(arg, value, strict)?,
            RuleKind::Requires => rules.requires = name_list(arg, kind, value, strict)?,
            RuleKind::Excludes => rules.excludes = name_list(arg, kind, value, strict)?,
        }
    }

    Ok(rules)
}

fn flag(
    arg: &str,
    kind: RuleKind,
    value: &serde_json::Value,
    strict: bool,
) -> Result<bool, TemplateError> {
    match value.as_bool() {
        Some(b) => Ok(b),
        None if strict => Err(TemplateError::NotABool {
            arg: arg.to_string(),
            rule: kind.name(),
        }),
        None => Ok(Value::from(value.clone()).is_truthy()),
    }
}

fn name_list(
    arg: &str,
    kind: RuleKind,
    value: &serde_json::Value,
    strict: bool,
) -> Result<Vec<String>, TemplateError> {
    let Some(items) = value.as_array() else {
        if strict {
            return Err(TemplateError::NotAList {
                arg: arg.to_string(),
                rule: kind.name(),
            });
        }
        return Ok(Vec::new());
    };

    let mut names = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(name) => names.push(name.to_string()),
            None if strict => {
                return Err(TemplateError::NotAName {
                    arg: arg.to_string(),
                    rule: kind.name(),
                    index,
                });
            }
            None => {}
        }
    }
    Ok(names)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    Value::from(value.clone()).type_name()
}
