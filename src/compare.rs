//! Deferred comparisons against an expected shape.
//!
//! An [`Expectation`] wraps a [`Schema`] and compares it against data on demand.
//! The outcome of the most recent comparison is kept so that an assertion hook
//! can explain a failed `==` or `<=` after the fact.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{Expectation, Operator};
//! use serde_json::json;
//!
//! let expected = Expectation::new(json!({"a": 1}));
//!
//! assert!(expected == json!({"a": 1}));
//! assert!(expected != json!({"a": 1, "b": 2}));
//! assert!(expected <= json!({"a": 1, "b": 2}));
//!
//! let result = expected.compare(Operator::Eq, &json!({"a": 2}));
//! assert!(result.is_failure());
//! assert_eq!(expected.last_failure().map(|f| f.len()), Some(1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::FailureSet;
use crate::report::{Diagnostics, Mismatch, ReportOptions};
use crate::schema::{Schema, Shape, Validator};
use crate::validation::{ExtraKeys, ValidationContext};
use crate::ValidationResult;

/// A comparison operator an assertion can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==`: data must match the shape with no undescribed keys.
    Eq,
    /// `<=`: data must match the shape; undescribed keys are allowed.
    Le,
}

impl Operator {
    /// Returns the operator's source form.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Le => "<=",
        }
    }

    /// The extra-keys policy this operator validates under.
    pub fn extra_keys(self) -> ExtraKeys {
        match self {
            Operator::Eq => ExtraKeys::Reject,
            Operator::Le => ExtraKeys::Allow,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator string other than `==` or `<=`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator: {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Operator::Eq),
            "<=" => Ok(Operator::Le),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

/// An expected shape that validates data when compared with it.
///
/// Every comparison overwrites the cached failure: a failing comparison stores
/// its [`FailureSet`], a passing one clears it, so
/// [`last_failure`](Self::last_failure) never reports a stale result.
///
/// The extra-keys policy is picked per comparison by the operator. The
/// expectation's own default policy (set by [`exact`](Self::exact) or
/// [`partial`](Self::partial)) only applies when it is nested inside another
/// shape.
pub struct Expectation {
    schema: Schema,
    last_failure: Mutex<Option<FailureSet>>,
}

impl Expectation {
    /// Creates an expectation whose described keys must all be present.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self::from_schema(Schema::new(shape).required(true))
    }

    /// Creates an expectation that rejects undescribed keys when nested.
    pub fn exact(shape: impl Into<Shape>) -> Self {
        Self::new(shape)
    }

    /// Creates an expectation that allows undescribed keys when nested.
    ///
    /// ```rust
    /// use shapecheck::Expectation;
    /// use serde_json::json;
    ///
    /// let expected = Expectation::new(
    ///     shapecheck::MappingShape::new().key("info", Expectation::partial(json!({"platform": "unix"}))),
    /// );
    /// assert!(expected == json!({"info": {"platform": "unix", "version": "3.1.3"}}));
    /// ```
    pub fn partial(shape: impl Into<Shape>) -> Self {
        Self::from_schema(Schema::new(shape).required(true).extra(ExtraKeys::Allow))
    }

    /// Wraps an existing schema as is.
    pub fn from_schema(schema: Schema) -> Self {
        Self {
            schema,
            last_failure: Mutex::new(None),
        }
    }

    /// Sets whether described keys must be present.
    pub fn required(self, required: bool) -> Self {
        Self::from_schema(self.schema.required(required))
    }

    /// Returns the wrapped schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Unwraps the schema, discarding any cached failure.
    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// Compares `value` against the shape under `op`'s policy.
    ///
    /// Returns the validated value or the full set of failures, and caches the
    /// outcome for [`last_failure`](Self::last_failure).
    pub fn compare(&self, op: Operator, value: &Value) -> ValidationResult<Value> {
        let result = self.schema.check_with(value, op.extra_keys());

        let failure = match &result {
            Validation::Success(_) => None,
            Validation::Failure(failure) => {
                tracing::debug!(
                    operator = %op,
                    errors = failure.len(),
                    "comparison failed"
                );
                Some(failure.clone())
            }
        };
        *self.last_failure.lock() = failure;

        result
    }

    /// Strict comparison: undescribed keys are errors.
    pub fn strict_eq(&self, value: &Value) -> bool {
        self.compare(Operator::Eq, value).is_success()
    }

    /// Permissive comparison: undescribed keys are accepted.
    pub fn permissive(&self, value: &Value) -> bool {
        self.compare(Operator::Le, value).is_success()
    }

    /// Returns the failure recorded by the most recent comparison, if it failed.
    pub fn last_failure(&self) -> Option<FailureSet> {
        self.last_failure.lock().clone()
    }

    /// Compares and renders a report on failure, using default report options.
    pub fn verify(&self, op: Operator, value: &Value) -> Result<Value, Mismatch> {
        self.verify_with(op, value, &ReportOptions::default())
    }

    /// Compares and renders a report on failure.
    ///
    /// ```rust
    /// use shapecheck::{Expectation, Kind, MappingShape, Operator, ReportOptions};
    /// use serde_json::json;
    ///
    /// let expected = Expectation::new(MappingShape::new().key("id", Kind::Int));
    /// let err = expected
    ///     .verify_with(Operator::Eq, &json!({"id": "7"}), &ReportOptions::default())
    ///     .unwrap_err();
    /// assert_eq!(
    ///     err.lines,
    ///     vec![
    ///         "failed to validation error(s):",
    ///         "- id: expected int for dictionary value @ data['id'] (actual: '7')",
    ///     ]
    /// );
    /// ```
    pub fn verify_with(
        &self,
        op: Operator,
        value: &Value,
        options: &ReportOptions,
    ) -> Result<Value, Mismatch> {
        self.compare(op, value).into_result().map_err(|failure| {
            let lines = Diagnostics::new(*options).report(&failure, Some(value));
            Mismatch { failure, lines }
        })
    }
}

impl Clone for Expectation {
    /// Clones the schema; the copy starts with no cached failure.
    fn clone(&self) -> Self {
        Self::from_schema(self.schema.clone())
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("schema", &self.schema)
            .field("failed", &self.last_failure.lock().is_some())
            .finish()
    }
}

impl Validator for Expectation {
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        self.schema.validate(value, ctx)
    }
}

impl From<Expectation> for Shape {
    fn from(expectation: Expectation) -> Self {
        Shape::from(expectation.schema)
    }
}

impl PartialEq<Value> for Expectation {
    fn eq(&self, other: &Value) -> bool {
        self.strict_eq(other)
    }
}

impl PartialEq<Expectation> for Value {
    fn eq(&self, other: &Expectation) -> bool {
        other.strict_eq(self)
    }
}

impl PartialOrd<Value> for Expectation {
    /// `Equal` when the strict comparison passes, `Less` when only the
    /// permissive one does, `None` otherwise.
    ///
    /// `<`, `>` and `>=` go through here and validate twice, so when the strict
    /// check fails the cached failure is the one from the permissive check.
    /// Only `<=` (see [`le`](Self::le)) validates once under its own policy.
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        if self.strict_eq(other) {
            Some(Ordering::Equal)
        } else if self.permissive(other) {
            Some(Ordering::Less)
        } else {
            None
        }
    }

    fn le(&self, other: &Value) -> bool {
        self.permissive(other)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Expectation>();
    assert_sync::<Expectation>();
};
