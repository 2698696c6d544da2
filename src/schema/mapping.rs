//! Mapping shape validation.
//!
//! This module provides [`MappingShape`] for validating JSON objects key by key.
//! Whether undescribed keys are errors, and whether described keys must be
//! present, is decided by the [`ValidationContext`] policies unless a key carries
//! its own presence marker.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{FailureSet, PathError};
use crate::validation::{ExtraKeys, ValidationContext, DICTIONARY_VALUE};

use super::shape::Shape;
use super::traits::Validator;

/// A key a mapping shape describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Matches exactly this key.
    Exact(String),
    /// Matches any key not matched by an exact key.
    Any,
}

/// Whether a described key has to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Follow the `required` policy of the enclosing schema.
    #[default]
    Inherit,
    /// Must be present regardless of policy.
    Required,
    /// May be absent regardless of policy.
    Optional,
}

impl Presence {
    fn is_required(self, policy: bool) -> bool {
        match self {
            Presence::Inherit => policy,
            Presence::Required => true,
            Presence::Optional => false,
        }
    }
}

/// Definition of a key within a mapping shape.
#[derive(Debug, Clone)]
struct Entry {
    shape: Shape,
    presence: Presence,
}

/// A shape for JSON objects.
///
/// Entries of the validated object are visited in the object's own order, so
/// errors are reported in data order; missing required keys are reported last,
/// in the order the shape lists them.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Kind, MappingShape, Schema};
/// use serde_json::json;
///
/// let shape = MappingShape::new()
///     .key("name", Kind::Str)
///     .optional("email", Kind::Str)
///     .any_key(Kind::Int);
///
/// let schema = Schema::new(shape).required(true);
/// assert!(schema.check(&json!({"name": "Alice", "age": 30})).is_success());
/// assert!(schema.check(&json!({"age": 30})).is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingShape {
    entries: IndexMap<Key, Entry>,
    type_error_message: Option<String>,
}

impl MappingShape {
    /// Creates a mapping shape with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes `name`; its presence follows the schema's `required` policy.
    pub fn key(self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.insert(Key::Exact(name.into()), shape.into(), Presence::Inherit)
    }

    /// Describes `name` and requires it to be present.
    pub fn required(self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.insert(Key::Exact(name.into()), shape.into(), Presence::Required)
    }

    /// Describes `name` and allows it to be absent.
    pub fn optional(self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.insert(Key::Exact(name.into()), shape.into(), Presence::Optional)
    }

    /// Describes every key that no exact key matches.
    ///
    /// ```rust
    /// use shapecheck::{Kind, MappingShape, Schema};
    /// use serde_json::json;
    ///
    /// let releases = Schema::new(MappingShape::new().any_key(Kind::List));
    /// assert!(releases.check(&json!({"3.1.3": [], "3.0.7": []})).is_success());
    /// ```
    pub fn any_key(self, shape: impl Into<Shape>) -> Self {
        self.insert(Key::Any, shape.into(), Presence::Optional)
    }

    /// Sets a custom message for values that are not objects.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the number of described keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are described.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the described keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    fn insert(mut self, key: Key, shape: Shape, presence: Presence) -> Self {
        self.entries.insert(key, Entry { shape, presence });
        self
    }

    /// Finds the entry for a data key: an exact key first, then the first `Any`.
    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries
            .get(&Key::Exact(name.to_string()))
            .or_else(|| self.entries.get(&Key::Any))
    }

    /// Validates a value against this shape.
    ///
    /// Returns the validated object (undescribed keys included when allowed), or
    /// every error found across all entries.
    pub fn validate(&self, value: &Value, ctx: &ValidationContext) -> Validation<Value, FailureSet> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected a dictionary".to_string());
                return ctx.fail("invalid_type", message);
            }
        };

        let mut errors: Vec<PathError> = Vec::new();
        let mut validated = Map::new();

        for (name, field_value) in obj {
            match self.lookup(name) {
                Some(entry) => {
                    let field_ctx = ctx.push_key(name.as_str()).with_role(DICTIONARY_VALUE);
                    match entry.shape.validate(field_value, &field_ctx) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => errors.extend(e),
                    }
                }
                None => match ctx.extra() {
                    ExtraKeys::Allow => {
                        validated.insert(name.clone(), field_value.clone());
                    }
                    ExtraKeys::Reject => {
                        errors.push(
                            ctx.push_key(name.as_str())
                                .error("extra_keys", "extra keys not allowed"),
                        );
                    }
                },
            }
        }

        for (key, entry) in &self.entries {
            if let Key::Exact(name) = key {
                if entry.presence.is_required(ctx.required()) && !obj.contains_key(name) {
                    errors.push(
                        ctx.push_key(name.as_str())
                            .error("required", "required key not provided"),
                    );
                }
            }
        }

        match FailureSet::collect(errors) {
            None => Validation::Success(Value::Object(validated)),
            Some(failure) => Validation::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;
    use crate::schema::Kind;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn strict() -> ValidationContext {
        ValidationContext::new(ExtraKeys::Reject, true)
    }

    fn permissive() -> ValidationContext {
        ValidationContext::new(ExtraKeys::Allow, true)
    }

    #[test]
    fn test_empty_mapping_shape() {
        let shape = MappingShape::new();
        assert!(shape.validate(&json!({}), &strict()).is_success());
        assert!(shape.is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let shape = MappingShape::new();

        for value in [json!("text"), json!(42), json!(null), json!([1, 2])] {
            let errors = unwrap_failure(shape.validate(&value, &strict()));
            assert_eq!(errors.first().message, "expected a dictionary");
            assert_eq!(errors.first().code, "invalid_type");
        }
    }

    #[test]
    fn test_extra_key_policy() {
        let shape = MappingShape::new().key("a", json!(1));
        let data = json!({"a": 1, "b": 2});

        let errors = unwrap_failure(shape.validate(&data, &strict()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path, JsonPath::from_key("b"));
        assert_eq!(errors.first().message, "extra keys not allowed @ data['b']");

        let validated = unwrap_success(shape.validate(&data, &permissive()));
        assert_eq!(validated, data);
    }

    #[test]
    fn test_required_policy() {
        let shape = MappingShape::new().key("name", Kind::Str);

        let errors = unwrap_failure(shape.validate(&json!({}), &strict()));
        assert_eq!(errors.first().code, "required");
        assert_eq!(errors.first().message, "required key not provided @ data['name']");

        let relaxed = ValidationContext::new(ExtraKeys::Reject, false);
        assert!(shape.validate(&json!({}), &relaxed).is_success());
    }

    #[test]
    fn test_presence_markers_override_policy() {
        let shape = MappingShape::new()
            .required("id", Kind::Int)
            .optional("nickname", Kind::Str);
        let relaxed = ValidationContext::new(ExtraKeys::Reject, false);

        let errors = unwrap_failure(shape.validate(&json!({}), &relaxed));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path, JsonPath::from_key("id"));

        assert!(shape.validate(&json!({"id": 1}), &strict()).is_success());
    }

    #[test]
    fn test_value_errors_carry_dictionary_role() {
        let shape = MappingShape::new().key("platform", json!("INVALID"));
        let errors = unwrap_failure(shape.validate(&json!({"platform": "unix"}), &strict()));
        assert_eq!(
            errors.first().message,
            "not a valid value for dictionary value @ data['platform']"
        );
    }

    #[test]
    fn test_errors_follow_data_order() {
        let shape = MappingShape::new()
            .key("a", Kind::Int)
            .key("b", Kind::Int)
            .key("c", Kind::Int)
            .key("missing", Kind::Int);

        let errors = unwrap_failure(shape.validate(
            &json!({"c": "x", "extra": 1, "a": "y", "b": "z"}),
            &strict(),
        ));
        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["c", "extra", "a", "b", "missing"]);
    }

    #[test]
    fn test_exact_key_wins_over_any_key() {
        let shape = MappingShape::new()
            .key("count", Kind::Int)
            .any_key(Kind::Str);

        assert!(shape
            .validate(&json!({"count": 1, "label": "x"}), &strict())
            .is_success());

        let errors = unwrap_failure(shape.validate(&json!({"count": "1"}), &strict()));
        assert_eq!(errors.first().message, "expected int for dictionary value @ data['count']");
    }

    #[test]
    fn test_nested_paths() {
        let shape = MappingShape::new().key(
            "middle",
            MappingShape::new().key("inner", MappingShape::new().key("value", Kind::Int)),
        );

        let errors = unwrap_failure(shape.validate(
            &json!({"middle": {"inner": {"value": "x"}}}),
            &strict(),
        ));
        assert_eq!(errors.first().path.to_string(), "middle.inner.value");
        assert_eq!(
            errors.first().message,
            "expected int for dictionary value @ data['middle']['inner']['value']"
        );
    }

    #[test]
    fn test_custom_type_error_message() {
        let shape = MappingShape::new().error("must be a user object");
        let errors = unwrap_failure(shape.validate(&json!("nope"), &strict()));
        assert_eq!(errors.first().message, "must be a user object");
    }

    #[test]
    fn test_unicode_keys() {
        let shape = MappingShape::new()
            .key("名前", Kind::Str)
            .key("年齢", Kind::Int);

        assert!(shape.validate(&json!({"名前": "太郎", "年齢": 25}), &strict()).is_success());
        assert_eq!(unwrap_failure(shape.validate(&json!({}), &strict())).len(), 2);
    }
}
