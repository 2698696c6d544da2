//! Shape combinators.
//!
//! - `all`: every shape must accept the value, applied in order
//! - `any`: at least one shape must accept the value
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{Kind, Length, Schema, Shape};
//! use serde_json::json;
//!
//! let non_empty_list = Schema::new(Shape::all([Shape::from(Kind::List), Length::min(1).into()]));
//! assert!(non_empty_list.check(&json!([1])).is_success());
//! assert!(non_empty_list.check(&json!([])).is_failure());
//!
//! let id = Schema::new(Shape::any([Kind::Int, Kind::Str]));
//! assert!(id.check(&json!("abc")).is_success());
//! assert!(id.check(&json!(null)).is_failure());
//! ```

use serde_json::Value;
use stillwater::Validation;

use crate::error::FailureSet;
use crate::validation::ValidationContext;

use super::shape::Shape;
use super::traits::Validator;

/// Runs `shapes` in order, feeding each the previous output.
///
/// Stops at the first rejection and returns it unchanged.
pub(crate) fn validate_all(
    shapes: &[Shape],
    value: &Value,
    ctx: &ValidationContext,
) -> Validation<Value, FailureSet> {
    let mut current = value.clone();
    for shape in shapes {
        match shape.validate(&current, ctx) {
            Validation::Success(v) => current = v,
            Validation::Failure(e) => return Validation::Failure(e),
        }
    }
    Validation::Success(current)
}

/// Accepts the value if any of `shapes` does, trying them in order.
///
/// When all reject, the rejection located deepest in the data is returned (the
/// earliest one on ties), since it is the most specific.
pub(crate) fn validate_any(
    shapes: &[Shape],
    value: &Value,
    ctx: &ValidationContext,
) -> Validation<Value, FailureSet> {
    let mut deepest: Option<FailureSet> = None;

    for shape in shapes {
        match shape.validate(value, ctx) {
            Validation::Success(v) => return Validation::Success(v),
            Validation::Failure(e) => {
                let deeper = deepest
                    .as_ref()
                    .map_or(true, |d| e.first().path.len() > d.first().path.len());
                if deeper {
                    deepest = Some(e);
                }
            }
        }
    }

    match deepest {
        Some(failure) => Validation::Failure(failure),
        None => ctx.fail("no_valid_value", "no valid value found"),
    }
}
