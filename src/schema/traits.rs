//! The validator contract.
//!
//! This module provides the [`Validator`] trait: anything that accepts a JSON
//! value or rejects it with a [`FailureSet`]. Every shape implements it, and the
//! comparison and matching machinery only ever talk to shapes through it.

use serde_json::Value;
use stillwater::Validation;

use crate::error::FailureSet;
use crate::validation::ValidationContext;

/// A validator for JSON values.
///
/// On success the validator returns the (possibly normalised) value; on failure
/// it returns every problem it found, each located by a path. Errors should be
/// created through [`ValidationContext::error`] so their messages carry the
/// location suffix consistently.
///
/// The `Send + Sync` bounds allow validators to live inside shared
/// [`Expectation`](crate::Expectation)s and trait objects like `Arc<dyn Validator>`.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Validator, ValidationContext, ValidationResult};
/// use serde_json::{json, Value};
/// use stillwater::Validation;
///
/// struct Even;
///
/// impl Validator for Even {
///     fn validate(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult<Value> {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Validation::Success(value.clone()),
///             _ => ctx.fail("not_even", "expected an even number"),
///         }
///     }
/// }
///
/// assert!(Even.validate(&json!(4), &ValidationContext::default()).is_success());
/// ```
pub trait Validator: Send + Sync {
    /// Validates a value at the location described by `ctx`.
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet>;
}

/// Adapts a closure into a [`Validator`].
pub(crate) struct FnValidator<F>(pub(crate) F);

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &ValidationContext) -> Validation<Value, FailureSet> + Send + Sync,
{
    fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        (self.0)(value, ctx)
    }
}

