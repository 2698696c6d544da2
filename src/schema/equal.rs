//! Exact equality with a target value.

use serde_json::Value;
use stillwater::Validation;

use crate::display::Plain;
use crate::error::FailureSet;
use crate::validation::ValidationContext;

/// Accepts only values equal to `target`.
///
/// Unlike a literal shape, the target is never interpreted as a shape: an object
/// target is compared as a whole instead of key by key.
///
/// ```rust
/// use shapecheck::{Equal, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new(Equal::new(json!({"a": 1})));
/// assert!(schema.check(&json!({"a": 1})).is_success());
///
/// let errors = schema.check(&json!(2)).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "Values are not equal: value:2 != target:{'a': 1}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Equal {
    target: Value,
    message: Option<String>,
}

impl Equal {
    /// Creates an equality check against `target`.
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: target.into(),
            message: None,
        }
    }

    /// Replaces the mismatch message with `message`.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the target value.
    pub fn target(&self) -> &Value {
        &self.target
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        ctx: &ValidationContext,
    ) -> Validation<Value, FailureSet> {
        if value == &self.target {
            return Validation::Success(value.clone());
        }
        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "Values are not equal: value:{} != target:{}",
                Plain(value),
                Plain(&self.target)
            )
        });
        ctx.fail("not_equal", message)
    }
}
