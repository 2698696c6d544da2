//! Sequence shape validation.
//!
//! A sequence shape is a list of element validators: every element of the data
//! must satisfy at least one of them. Order and cardinality are not checked here;
//! see [`Unordered`](super::Unordered) for a one-to-one pairing.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{FailureSet, PathError};
use crate::validation::ValidationContext;

use super::shape::Shape;
use super::traits::Validator;

/// Validates `value` as an array whose elements each satisfy one of `validators`.
///
/// Each element is tried against the validators in order and the first success
/// wins. When every validator rejects an element, the last rejection is kept:
///
/// - if it is located at the element itself it is recorded and the remaining
///   elements are still checked;
/// - if it is located deeper inside the element (a nested field), that
///   element's failure is returned at once and later elements are not reported.
///
/// The second rule means a list of mappings reports only its first broken
/// element. This is a known limitation of the reporting granularity, kept so the
/// reported errors stay the ones the element validator produced.
pub(crate) fn validate_sequence(
    validators: &[Shape],
    value: &Value,
    ctx: &ValidationContext,
) -> Validation<Value, FailureSet> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return ctx.fail("invalid_type", "expected a list"),
    };

    if validators.is_empty() {
        return if items.is_empty() {
            Validation::Success(value.clone())
        } else {
            ctx.fail("invalid_value", "not a valid value")
        };
    }

    let mut errors: Vec<PathError> = Vec::new();
    let mut validated = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let item_ctx = ctx.push_index(index);
        let mut rejection = None;

        for validator in validators {
            match validator.validate(item, &item_ctx) {
                Validation::Success(v) => {
                    validated.push(v);
                    rejection = None;
                    break;
                }
                Validation::Failure(failure) => {
                    if failure.first().path.len() > item_ctx.path().len() {
                        return Validation::Failure(failure);
                    }
                    rejection = Some(failure);
                }
            }
        }

        if let Some(failure) = rejection {
            errors.extend(failure);
        }
    }

    match FailureSet::collect(errors) {
        None => Validation::Success(Value::Array(validated)),
        Some(failure) => Validation::Failure(failure),
    }
}
