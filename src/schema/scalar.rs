//! Leaf shapes: type checks, length bounds and patterns.
//!
//! This module provides [`Kind`] for "is this an int/str/dict..." checks,
//! [`Length`] for size bounds on strings, sequences and mappings, and
//! [`Pattern`] for regular-expression matches on strings.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::FailureSet;
use crate::validation::ValidationContext;

use super::ShapeError;

/// The JSON type a value must have.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Expectation, Kind};
/// use serde_json::json;
///
/// let expected = Expectation::new(Kind::Int);
/// assert!(expected == json!(3));
/// assert!(expected != json!("3"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A string.
    Str,
    /// An integer (signed or unsigned).
    Int,
    /// A floating point number.
    Float,
    /// Any number.
    Number,
    /// `true` or `false`.
    Bool,
    /// An object.
    Dict,
    /// An array.
    List,
    /// `null`.
    Null,
}

impl Kind {
    /// Returns the name used in `expected <name>` messages.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Str => "str",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::Dict => "dict",
            Kind::List => "list",
            Kind::Null => "null",
        }
    }

    /// Returns true if `value` has this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Str => value.is_string(),
            Kind::Int => value.is_i64() || value.is_u64(),
            Kind::Float => value.is_f64(),
            Kind::Number => value.is_number(),
            Kind::Bool => value.is_boolean(),
            Kind::Dict => value.is_object(),
            Kind::List => value.is_array(),
            Kind::Null => value.is_null(),
        }
    }

    pub(crate) fn validate(
        self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Validation<Value, FailureSet> {
        if self.matches(value) {
            Validation::Success(value.clone())
        } else {
            ctx.fail("invalid_type", format!("expected {}", self.name()))
        }
    }
}

/// Size bounds for strings (in characters), sequences and mappings.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Length, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new(Length::max(10));
/// assert!(schema.check(&json!("short")).is_success());
/// assert!(schema.check(&json!("lorem ipsum lorem ipsum")).is_failure());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
    message: Option<String>,
}

impl Length {
    /// Requires at least `min` items.
    pub fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
            message: None,
        }
    }

    /// Requires at most `max` items.
    pub fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
            message: None,
        }
    }

    /// Requires between `min` and `max` items, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InvertedBounds`] when `min > max`.
    pub fn between(min: usize, max: usize) -> Result<Self, ShapeError> {
        if min > max {
            return Err(ShapeError::InvertedBounds { min, max });
        }
        Ok(Self {
            min: Some(min),
            max: Some(max),
            message: None,
        })
    }

    /// Replaces every generated message with `message`.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Validation<Value, FailureSet> {
        let len = match measure(value) {
            Some(len) => len,
            None => return ctx.fail("invalid_type", self.message_or("invalid value or type")),
        };

        match (self.min, self.max) {
            (Some(min), _) if len < min => ctx.fail(
                "length",
                self.message_or(&format!("length of value must be at least {}", min)),
            ),
            (_, Some(max)) if len > max => ctx.fail(
                "length",
                self.message_or(&format!("length of value must be at most {}", max)),
            ),
            _ => Validation::Success(value.clone()),
        }
    }

    fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Returns the size of a sized value.
fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// A regular expression a string must match at its start.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: Option<String>,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Pattern`] if the expression does not compile.
    pub fn new(pattern: &str) -> Result<Self, ShapeError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: None,
        })
    }

    /// Replaces the mismatch message with `message`.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Validation<Value, FailureSet> {
        let Some(text) = value.as_str() else {
            return ctx.fail("invalid_type", "expected string or buffer");
        };

        // Anchored at the start only: the leftmost match must begin at 0.
        let matched = self.regex.find(text).is_some_and(|m| m.start() == 0);
        if matched {
            Validation::Success(value.clone())
        } else {
            let message = self.message.clone().unwrap_or_else(|| {
                format!("does not match regular expression {}", self.regex.as_str())
            });
            ctx.fail("pattern", message)
        }
    }
}
