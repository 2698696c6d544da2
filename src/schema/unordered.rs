//! Order-insensitive sequence matching.
//!
//! [`Unordered`] pairs every observed element with a distinct expected element
//! validator, regardless of position, and reports exactly the observed elements
//! that could not be paired.

use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::display::Plain;
use crate::error::FailureSet;
use crate::validation::{ExtraKeys, ValidationContext};

use super::shape::Shape;
use super::traits::Validator;

/// Ensures a sequence holds one element per expected validator, in any order.
///
/// Matching is first-fit greedy: observed elements are visited in order, and
/// each takes the first not-yet-consumed validator that accepts it. There is no
/// backtracking, so when validators overlap an element can take a validator a
/// later element needed and that later element is reported unmatched even
/// though some other pairing would have succeeded. Validators are usually
/// mutually exclusive type or shape checks, where this does not arise.
///
/// Element validators run under their own policies ([`extra`](Self::extra),
/// [`required`](Self::required)), by default rejecting extra keys and not
/// requiring described keys.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Kind, Schema, Unordered};
/// use serde_json::json;
///
/// let schema = Schema::new(Unordered::new([Kind::Str, Kind::Int]));
/// assert!(schema.check(&json!(["foo", 1])).is_success());
/// assert!(schema.check(&json!([1, "foo"])).is_success());
///
/// let errors = schema.check(&json!([1, 2])).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "Element #1 (2) is not valid against any validator");
/// ```
#[derive(Debug, Clone)]
pub struct Unordered {
    validators: Vec<Shape>,
    extra: ExtraKeys,
    required: bool,
    message: Option<String>,
}

impl Unordered {
    /// Creates a matcher with one validator per expected element.
    pub fn new<I, S>(validators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Shape>,
    {
        Self {
            validators: validators.into_iter().map(Into::into).collect(),
            extra: ExtraKeys::Reject,
            required: false,
            message: None,
        }
    }

    /// Sets the extra-keys policy element validators run under.
    pub fn extra(mut self, extra: ExtraKeys) -> Self {
        self.extra = extra;
        self
    }

    /// Sets whether element validators require their described keys.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replaces every generated message with `message`.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the expected element validators.
    pub fn validators(&self) -> &[Shape] {
        &self.validators
    }

    /// Matches `value` against the expected validators.
    ///
    /// On success the sequence is returned unchanged. Errors are located at the
    /// matcher's own position (`ctx`), never at an element index, since an
    /// unmatched element has no single validator to blame.
    pub fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                tracing::debug!(path = %ctx.path(), "unordered match on a non-sequence");
                return ctx.fail(
                    "not_sequence",
                    self.message_or(|| format!("Value {} is not sequence!", Plain(value))),
                );
            }
        };

        if items.len() != self.validators.len() {
            tracing::debug!(
                path = %ctx.path(),
                observed = items.len(),
                expected = self.validators.len(),
                "unordered match cardinality differs"
            );
            return ctx.fail(
                "length_mismatch",
                self.message_or(|| {
                    format!(
                        "List lengths differ, value:{} != target:{}",
                        items.len(),
                        self.validators.len()
                    )
                }),
            );
        }

        let element_ctx = ValidationContext::new(self.extra, self.required);
        let mut consumed = vec![false; self.validators.len()];
        let mut unmatched: Vec<(usize, &Value)> = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let found = self.validators.iter().enumerate().find(|(slot, validator)| {
                !consumed[*slot] && validator.validate(item, &element_ctx).is_success()
            });

            match found {
                Some((slot, _)) => {
                    tracing::trace!(index, slot, "element paired");
                    consumed[slot] = true;
                }
                None => unmatched.push((index, item)),
            }
        }

        if unmatched.is_empty() {
            return Validation::Success(value.clone());
        }

        tracing::debug!(
            path = %ctx.path(),
            unmatched = unmatched.len(),
            "unordered match left elements unpaired"
        );

        let mut errors = unmatched.into_iter().map(|(index, item)| {
            let message = self.message_or(|| {
                format!(
                    "Element #{} ({}) is not valid against any validator",
                    index,
                    Plain(item)
                )
            });
            ctx.error("unmatched_element", message)
        });

        // One unmatched element stays a single failure; more become a multi-error set.
        match errors.next() {
            Some(first) => Validation::Failure(
                errors.fold(FailureSet::single(first), |acc, error| {
                    acc.combine(FailureSet::single(error))
                }),
            ),
            None => Validation::Success(value.clone()),
        }
    }

    fn message_or(&self, fallback: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Kind, MappingShape};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn ctx() -> ValidationContext {
        ValidationContext::default()
    }

    #[test]
    fn test_any_order_is_accepted() {
        let matcher = Unordered::new([json!(2), json!(1)]);
        assert!(matcher.validate(&json!([2, 1]), &ctx()).is_success());
        assert!(matcher.validate(&json!([1, 2]), &ctx()).is_success());
    }

    #[test]
    fn test_success_returns_sequence_unchanged() {
        let matcher = Unordered::new([Kind::Str, Kind::Int]);
        let value = json!([1, "foo"]);
        let validated = matcher.validate(&value, &ctx()).into_result().unwrap();
        assert_eq!(validated, value);
    }

    #[test]
    fn test_single_unmatched_element() {
        let matcher = Unordered::new([json!("a"), json!("c")]);
        let failure = unwrap_failure(matcher.validate(&json!(["a", "b"]), &ctx()));

        assert!(!failure.is_multiple());
        assert!(failure.first().path.is_root());
        assert_eq!(failure.first().code, "unmatched_element");
        assert_eq!(
            failure.first().message,
            "Element #1 (b) is not valid against any validator"
        );
    }

    #[test]
    fn test_several_unmatched_elements_in_observed_order() {
        let matcher = Unordered::new([Kind::Int, Kind::Int, Kind::Str]);
        let failure = unwrap_failure(matcher.validate(&json!([true, "x", null]), &ctx()));

        assert!(failure.is_multiple());
        assert_eq!(
            failure.messages(),
            vec![
                "Element #0 (true) is not valid against any validator",
                "Element #2 (null) is not valid against any validator",
            ]
        );
    }

    #[test]
    fn test_consumed_validator_is_not_reused() {
        let matcher = Unordered::new([Shape::from(json!(1)), Shape::from(Kind::Str)]);
        let failure = unwrap_failure(matcher.validate(&json!([1, 1]), &ctx()));
        assert_eq!(
            failure.first().message,
            "Element #1 (1) is not valid against any validator"
        );
    }

    #[test]
    fn test_greedy_first_fit_does_not_backtrack() {
        // "a" takes the permissive validator first and leaves nothing for 1.
        let matcher = Unordered::new([Shape::Anything, Shape::from(Kind::Str)]);
        let failure = unwrap_failure(matcher.validate(&json!(["a", 1]), &ctx()));
        assert_eq!(
            failure.first().message,
            "Element #1 (1) is not valid against any validator"
        );
    }

    #[test]
    fn test_non_sequence() {
        let matcher = Unordered::new([Kind::Int]);
        let failure = unwrap_failure(matcher.validate(&json!("abc"), &ctx()));
        assert_eq!(failure.first().message, "Value abc is not sequence!");
        assert_eq!(failure.first().code, "not_sequence");
    }

    #[test]
    fn test_length_mismatch_skips_element_checks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = Shape::custom(move |value: &Value, _ctx: &ValidationContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            Validation::Success(value.clone())
        });

        let matcher = Unordered::new([counting.clone(), counting]);
        let failure = unwrap_failure(matcher.validate(&json!([1, 2, 3]), &ctx()));

        assert_eq!(failure.len(), 1);
        assert!(failure.first().path.is_root());
        assert_eq!(failure.first().message, "List lengths differ, value:3 != target:2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_errors_located_at_matcher_position() {
        let matcher = Unordered::new([Kind::Int]);
        let field_ctx = ctx()
            .push_key("ids")
            .with_role(crate::validation::DICTIONARY_VALUE);
        let failure = unwrap_failure(matcher.validate(&json!(["x"]), &field_ctx));
        assert_eq!(failure.first().path.to_string(), "ids");
        assert_eq!(
            failure.first().message,
            "Element #0 (x) is not valid against any validator for dictionary value @ data['ids']"
        );
    }

    #[test]
    fn test_element_policy() {
        let element = MappingShape::new().key("id", Kind::Int);
        let data = json!([{"id": 1, "name": "x"}]);

        let strict = Unordered::new([element.clone()]);
        assert!(strict.validate(&data, &ctx()).is_failure());

        let permissive = Unordered::new([element]).extra(ExtraKeys::Allow);
        assert!(permissive.validate(&data, &ctx()).is_success());
    }

    #[test]
    fn test_custom_message() {
        let matcher = Unordered::new([Kind::Int]).error("bad ids");
        let failure = unwrap_failure(matcher.validate(&json!([1, 2]), &ctx()));
        assert_eq!(failure.first().message, "bad ids");
    }
}
