//! Typed preset-value descriptors for provider customization options.

use serde_json::Value;

use crate::error::Error;

/// Placeholder shown instead of a private value in errors and diagnostics.
pub const REDACTED: &str = "[redacted]";

/// The JSON type a customization value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        }
    }

    /// Strict type check. Numeric strings are never coerced; an integral
    /// JSON number is accepted for float-typed options because JSON does
    /// not distinguish `1` from `1.0`.
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Float => value.is_number(),
            ValueType::Boolean => value.is_boolean(),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A typed, constrained description of one configuration option.
///
/// Descriptors are pure metadata: every builder method consumes `self`, and
/// a declared descriptor is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PresetValue {
    value_type: ValueType,
    min_value: Option<f64>,
    max_value: Option<f64>,
    options: Option<Vec<Value>>,
    private: bool,
    include_none: bool,
}

impl PresetValue {
    fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            min_value: None,
            max_value: None,
            options: None,
            private: false,
            include_none: false,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn integer() -> Self {
        Self::new(ValueType::Integer)
    }

    pub fn float() -> Self {
        Self::new(ValueType::Float)
    }

    pub fn boolean() -> Self {
        Self::new(ValueType::Boolean)
    }

    /// Inclusive numeric bounds.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    /// Restrict the value to an explicit set of literals.
    pub fn options(mut self, options: impl IntoIterator<Item = Value>) -> Self {
        self.options = Some(options.into_iter().collect());
        self
    }

    /// Mark the value as sensitive. Private values are validated like any
    /// other but never appear in errors or rendered diagnostics.
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Permit a null/unset value.
    pub fn include_none(mut self) -> Self {
        self.include_none = true;
        self
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn allows_none(&self) -> bool {
        self.include_none
    }

    pub fn allowed_options(&self) -> Option<&[Value]> {
        self.options.as_deref()
    }

    /// Validate `value` against this descriptor.
    ///
    /// Checks run in order: nullability, type, declared options, numeric
    /// bounds. Nothing is clamped or coerced; the first violation aborts
    /// with an error naming `key`.
    pub fn validate(&self, key: &str, value: &Value) -> Result<(), Error> {
        if value.is_null() {
            if self.include_none {
                return Ok(());
            }
            return Err(Error::MissingValue {
                key: key.to_string(),
            });
        }

        if !self.value_type.matches(value) {
            return Err(Error::WrongType {
                key: key.to_string(),
                expected: self.value_type.as_str(),
                actual: json_type_name(value),
            });
        }

        if let Some(options) = &self.options
            && !options.iter().any(|option| option == value)
        {
            return Err(Error::NotInOptions {
                key: key.to_string(),
                value: self.display_value(value),
            });
        }

        if self.min_value.is_some() || self.max_value.is_some() {
            // Type check above guarantees a number here.
            let number = value.as_f64().unwrap_or_default();
            let below = self.min_value.is_some_and(|min| number < min);
            let above = self.max_value.is_some_and(|max| number > max);
            if below || above {
                return Err(Error::OutOfRange {
                    key: key.to_string(),
                    value: self.display_value(value),
                    range: self.range_display(),
                });
            }
        }

        Ok(())
    }

    /// Render a value for an error message, honoring the privacy flag.
    fn display_value(&self, value: &Value) -> String {
        if self.private {
            REDACTED.to_string()
        } else {
            value.to_string()
        }
    }

    fn range_display(&self) -> String {
        let bound = |b: Option<f64>| b.map_or("..".to_string(), |v| v.to_string());
        format!("[{}, {}]", bound(self.min_value), bound(self.max_value))
    }
}
