//! Built-in validators.
//!
//! Type predicates never coerce: an `Int` is not a `string`, a numeric
//! string is not a `number`.

use async_trait::async_trait;

use argcheck_types::Value;

use super::traits::ArgValidator;

/// Expected kind of value for [`TypeOf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl Kind {
    /// Registry name of the validator for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => matches!(value, Value::String(_)),
            Kind::Integer => matches!(value, Value::Int(_)),
            Kind::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            Kind::Boolean => matches!(value, Value::Bool(_)),
            Kind::Array => matches!(value, Value::Array(_)),
            Kind::Object => matches!(value, Value::Object(_)),
        }
    }
}

/// Passes when the value is of the given kind.
pub struct TypeOf(pub Kind);

#[async_trait]
impl ArgValidator for TypeOf {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn validate(&self, value: &Value) -> Result<(), String> {
        if self.0.matches(value) {
            Ok(())
        } else {
            Err(format!(
                "expected {}, got {}",
                self.0.name(),
                value.type_name()
            ))
        }
    }
}

/// Passes for a non-empty string, array or object.
pub struct NonEmpty;

#[async_trait]
impl ArgValidator for NonEmpty {
    fn name(&self) -> &str {
        "non_empty"
    }

    async fn validate(&self, value: &Value) -> Result<(), String> {
        let empty = match value {
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            other => return Err(format!("expected a collection, got {}", other.type_name())),
        };
        if empty {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::string_ok(Kind::String, Value::from("x"), true)]
    #[case::string_rejects_int(Kind::String, Value::Int(1), false)]
    #[case::integer_rejects_float(Kind::Integer, Value::Float(1.5), false)]
    #[case::number_accepts_int(Kind::Number, Value::Int(1), true)]
    #[case::number_rejects_numeric_string(Kind::Number, Value::from("1"), false)]
    #[case::boolean_rejects_undefined(Kind::Boolean, Value::Undefined, false)]
    #[case::array_ok(Kind::Array, Value::Array(vec![]), true)]
    #[case::object_rejects_null(Kind::Object, Value::Null, false)]
    #[tokio::test]
    async fn type_of(#[case] kind: Kind, #[case] value: Value, #[case] ok: bool) {
        assert_eq!(TypeOf(kind).validate(&value).await.is_ok(), ok);
    }

    #[tokio::test]
    async fn type_of_message() {
        let err = TypeOf(Kind::String).validate(&Value::Int(3)).await.unwrap_err();
        assert_eq!(err, "expected string, got int");
    }

    #[tokio::test]
    async fn non_empty() {
        assert!(NonEmpty.validate(&Value::from("a")).await.is_ok());
        assert_eq!(
            NonEmpty.validate(&Value::from("")).await,
            Err("must not be empty".to_string())
        );
        assert!(NonEmpty.validate(&Value::Array(vec![])).await.is_err());
        assert!(NonEmpty.validate(&Value::Int(0)).await.is_err());
    }
}
