//! Shape descriptions and the validator contract.
//!
//! This module provides the [`Validator`] trait, the [`Shape`] tree that
//! implements it, and [`Schema`], a shape bundled with the policies it is
//! validated under. Every validator accumulates all the errors it finds rather
//! than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{ExtraKeys, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new(json!({"a": 1}));
//!
//! assert!(schema.check(&json!({"a": 1})).is_success());
//! assert!(schema.check(&json!({"a": 1, "b": 2})).is_failure());
//! assert!(schema.check_with(&json!({"a": 1, "b": 2}), ExtraKeys::Allow).is_success());
//! ```

mod combinators;
mod equal;
mod mapping;
mod scalar;
mod sequence;
mod shape;
mod traits;
mod unordered;

pub use equal::Equal;
pub use mapping::{Key, MappingShape, Presence};
pub use scalar::{Kind, Length, Pattern};
pub use shape::Shape;
pub use traits::Validator;
pub use unordered::Unordered;

use serde_json::Value;
use stillwater::Validation;

use crate::error::FailureSet;
use crate::validation::{ExtraKeys, ValidationContext};

/// Errors raised while building a shape.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// A pattern shape's regular expression did not compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A length shape's lower bound exceeds its upper bound.
    #[error("inverted length bounds: min {min} > max {max}")]
    InvertedBounds {
        /// The lower bound given.
        min: usize,
        /// The upper bound given.
        max: usize,
    },
}

/// A shape together with the policies it is validated under.
///
/// - **extra**: how undescribed mapping keys are treated (default:
///   [`ExtraKeys::Reject`])
/// - **required**: whether described keys without an explicit presence marker
///   must be present (default: `false`)
///
/// When a `Schema` is nested inside another shape it switches to its own
/// policies for everything beneath it, while errors keep their full path from the
/// outermost value.
///
/// # Example
///
/// ```rust
/// use shapecheck::{ExtraKeys, Schema};
/// use serde_json::json;
///
/// let info = Schema::new(json!({"platform": "unix"})).extra(ExtraKeys::Allow);
/// let outer = Schema::new(shapecheck::MappingShape::new().key("info", info));
///
/// assert!(outer.check(&json!({"info": {"platform": "unix", "other": 1}})).is_success());
/// assert!(outer.check(&json!({"info": {}, "other": 1})).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    shape: Shape,
    extra: ExtraKeys,
    required: bool,
}

impl Schema {
    /// Creates a schema with default policies.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            extra: ExtraKeys::Reject,
            required: false,
        }
    }

    /// Sets the extra-keys policy.
    pub fn extra(mut self, extra: ExtraKeys) -> Self {
        self.extra = extra;
        self
    }

    /// Sets whether described keys are required by default.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the extra-keys policy.
    pub fn extra_keys(&self) -> ExtraKeys {
        self.extra
    }

    /// Returns whether described keys are required by default.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validates `value` at the root under this schema's own policies.
    pub fn check(&self, value: &Value) -> Validation<Value, FailureSet> {
        self.check_with(value, self.extra)
    }

    /// Validates `value` at the root with `extra` overriding the extra-keys policy.
    ///
    /// Only this schema's own level is affected: nested schemas keep theirs.
    pub fn check_with(&self, value: &Value, extra: ExtraKeys) -> Validation<Value, FailureSet> {
        let ctx = ValidationContext::new(extra, self.required);
        self.shape.validate(value, &ctx)
    }
}

impl Validator for Schema {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        self.shape
            .validate(value, &ctx.with_policy(self.extra, self.required))
    }
}
