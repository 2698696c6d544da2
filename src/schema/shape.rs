//! The shape description tree.
//!
//! A [`Shape`] describes what a value should look like. Literal JSON converts
//! straight into a shape: objects become [`MappingShape`]s keyed by their keys,
//! arrays become sequence shapes, and scalars must match exactly.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::display::Repr;
use crate::error::FailureSet;
use crate::validation::ValidationContext;

use super::combinators::{validate_all, validate_any};
use super::equal::Equal;
use super::mapping::MappingShape;
use super::scalar::{Kind, Length, Pattern};
use super::sequence::validate_sequence;
use super::traits::{FnValidator, Validator};
use super::unordered::Unordered;
use super::Schema;

/// A declarative description of an expected value.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Kind, Length, MappingShape, Schema, Shape};
/// use serde_json::json;
///
/// // Plain JSON: every key described, every scalar exact.
/// let literal = Shape::from(json!({"platform": "unix", "tags": ["a"]}));
///
/// // Mixed: literals, type checks and constraints.
/// let mixed = MappingShape::new()
///     .key("platform", "unix")
///     .key("description", Length::min(10))
///     .key("downloads", Kind::Dict);
///
/// let schema = Schema::new(mixed).required(true);
/// assert!(schema
///     .check(&json!({
///         "platform": "unix",
///         "description": "lorem ipsum lorem ipsum",
///         "downloads": {"last_month": 0}
///     }))
///     .is_success());
/// # let _ = literal;
/// ```
#[derive(Clone)]
pub enum Shape {
    /// Must equal this scalar exactly.
    Literal(Value),
    /// Must have this JSON type.
    Kind(Kind),
    /// Must be sized within bounds.
    Length(Length),
    /// Must be a string matching a regular expression.
    Pattern(Pattern),
    /// Must be an object matching key by key.
    Mapping(MappingShape),
    /// Must be an array whose elements each match one of these shapes.
    Sequence(Vec<Shape>),
    /// Must match every shape, in order.
    All(Vec<Shape>),
    /// Must match at least one shape.
    Any(Vec<Shape>),
    /// Must equal this value as a whole.
    Equal(Equal),
    /// Must be an array pairing one-to-one with these shapes, in any order.
    Unordered(Unordered),
    /// A nested schema validated under its own policies.
    Schema(Box<Schema>),
    /// Accepts anything.
    Anything,
    /// A user-supplied validator.
    Custom(Arc<dyn Validator>),
}

impl Shape {
    /// Creates a sequence shape from element shapes.
    pub fn sequence<I, S>(shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Shape>,
    {
        Shape::Sequence(shapes.into_iter().map(Into::into).collect())
    }

    /// Creates a shape every one of `shapes` must accept.
    pub fn all<I, S>(shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Shape>,
    {
        Shape::All(shapes.into_iter().map(Into::into).collect())
    }

    /// Creates a shape at least one of `shapes` must accept.
    pub fn any<I, S>(shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Shape>,
    {
        Shape::Any(shapes.into_iter().map(Into::into).collect())
    }

    /// Wraps a closure as a validator.
    ///
    /// ```rust
    /// use shapecheck::{Schema, Shape, ValidationContext};
    /// use serde_json::{json, Value};
    /// use stillwater::Validation;
    ///
    /// let positive = Shape::custom(|value: &Value, ctx: &ValidationContext| {
    ///     match value.as_i64() {
    ///         Some(n) if n > 0 => Validation::Success(value.clone()),
    ///         _ => ctx.fail("positive", "expected a positive number"),
    ///     }
    /// });
    /// assert!(Schema::new(positive).check(&json!(5)).is_success());
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, &ValidationContext) -> Validation<Value, FailureSet> + Send + Sync + 'static,
    {
        Shape::Custom(Arc::new(FnValidator(f)))
    }

    /// Wraps any [`Validator`] implementation.
    pub fn validator(validator: impl Validator + 'static) -> Self {
        Shape::Custom(Arc::new(validator))
    }
}

impl Validator for Shape {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        match self {
            Shape::Literal(expected) => {
                if value == expected {
                    Validation::Success(value.clone())
                } else {
                    ctx.fail("invalid_value", "not a valid value")
                }
            }
            Shape::Kind(kind) => kind.validate(value, ctx),
            Shape::Length(length) => length.validate(value, ctx),
            Shape::Pattern(pattern) => pattern.validate(value, ctx),
            Shape::Mapping(mapping) => mapping.validate(value, ctx),
            Shape::Sequence(items) => validate_sequence(items, value, ctx),
            Shape::All(shapes) => validate_all(shapes, value, ctx),
            Shape::Any(shapes) => validate_any(shapes, value, ctx),
            Shape::Equal(equal) => equal.validate(value, ctx),
            Shape::Unordered(unordered) => unordered.validate(value, ctx),
            Shape::Schema(schema) => schema.validate(value, ctx),
            Shape::Anything => Validation::Success(value.clone()),
            Shape::Custom(validator) => validator.validate(value, ctx),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Literal(value) => write!(f, "{}", Repr(value)),
            Shape::Kind(kind) => write!(f, "{}", kind.name()),
            Shape::Length(length) => write!(f, "{:?}", length),
            Shape::Pattern(pattern) => write!(f, "Match({})", pattern.as_str()),
            Shape::Mapping(mapping) => write!(f, "{:?}", mapping),
            Shape::Sequence(items) => f.debug_list().entries(items).finish(),
            Shape::All(shapes) => f.debug_tuple("All").field(shapes).finish(),
            Shape::Any(shapes) => f.debug_tuple("Any").field(shapes).finish(),
            Shape::Equal(equal) => write!(f, "Equal({})", Repr(equal.target())),
            Shape::Unordered(unordered) => {
                f.debug_tuple("Unordered").field(&unordered.validators()).finish()
            }
            Shape::Schema(schema) => write!(f, "{:?}", schema),
            Shape::Anything => f.write_str("Anything"),
            Shape::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Value> for Shape {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Shape::Mapping(
                map.into_iter()
                    .fold(MappingShape::new(), |shape, (key, v)| shape.key(key, v)),
            ),
            Value::Array(items) => Shape::sequence(items),
            scalar => Shape::Literal(scalar),
        }
    }
}

impl From<&str> for Shape {
    fn from(text: &str) -> Self {
        Shape::Literal(Value::from(text))
    }
}

impl From<Kind> for Shape {
    fn from(kind: Kind) -> Self {
        Shape::Kind(kind)
    }
}

impl From<Length> for Shape {
    fn from(length: Length) -> Self {
        Shape::Length(length)
    }
}

impl From<Pattern> for Shape {
    fn from(pattern: Pattern) -> Self {
        Shape::Pattern(pattern)
    }
}

impl From<MappingShape> for Shape {
    fn from(mapping: MappingShape) -> Self {
        Shape::Mapping(mapping)
    }
}

impl From<Equal> for Shape {
    fn from(equal: Equal) -> Self {
        Shape::Equal(equal)
    }
}

impl From<Unordered> for Shape {
    fn from(unordered: Unordered) -> Self {
        Shape::Unordered(unordered)
    }
}

impl From<Schema> for Shape {
    fn from(schema: Schema) -> Self {
        Shape::Schema(Box::new(schema))
    }
}
