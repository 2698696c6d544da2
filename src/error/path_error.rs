//! Path-located validation errors.
//!
//! This module provides [`PathError`] for single structural failures and
//! [`FailureSet`] for the one-or-many errors of a validation attempt.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single structural failure located inside the validated data.
///
/// `PathError` captures:
/// - **path**: where in the data structure the failing node sits (empty for the
///   whole value)
/// - **message**: human-readable description, exactly as the validator wrote it
/// - **code**: machine-readable error code for programmatic handling
///
/// # Example
///
/// ```rust
/// use shapecheck::{JsonPath, PathError};
///
/// let error = PathError::new(
///     JsonPath::from_key("foo").push_index(0).push_key("id"),
///     "expected int",
/// )
/// .with_code("invalid_type");
///
/// assert_eq!(error.to_string(), "foo.0.id: expected int");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathError {
    /// The path to the node that failed validation.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code (e.g. `extra_keys`).
    pub code: String,
}

impl PathError {
    /// Creates a new error with the given path and message.
    ///
    /// The error code defaults to "validation_error".
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for PathError {}

// All fields are owned, so this holds today; the assertion keeps it that way.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<PathError>();
    assert_sync::<PathError>();
};

/// The outcome of one failed validation attempt.
///
/// A validator reports either one problem ([`FailureSet::Single`]) or several
/// independent ones ([`FailureSet::Multiple`]). The order of a multi-error set is
/// the order in which the validator discovered them and is never changed.
///
/// # Combining Failures
///
/// `FailureSet` implements `Semigroup`; combining always yields `Multiple` with
/// the left errors first:
///
/// ```rust
/// use shapecheck::{FailureSet, JsonPath, PathError};
/// use stillwater::prelude::*;
///
/// let first = FailureSet::single(PathError::new(JsonPath::from_key("a"), "expected int"));
/// let second = FailureSet::single(PathError::new(JsonPath::from_key("b"), "expected str"));
///
/// let combined = first.combine(second);
/// assert!(combined.is_multiple());
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FailureSet {
    /// Exactly one problem.
    Single(PathError),
    /// Several independent problems, in discovery order.
    Multiple(NonEmptyVec<PathError>),
}

impl FailureSet {
    /// Creates a `FailureSet` holding a single error.
    pub fn single(error: PathError) -> Self {
        FailureSet::Single(error)
    }

    /// Collects accumulated errors into a multi-error set.
    ///
    /// Returns `None` when `errors` is empty, meaning nothing failed.
    pub fn collect(errors: Vec<PathError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(FailureSet::Multiple)
    }

    /// Returns true for a set built from several independent failures.
    pub fn is_multiple(&self) -> bool {
        matches!(self, FailureSet::Multiple(_))
    }

    /// Returns the number of errors in this set.
    pub fn len(&self) -> usize {
        match self {
            FailureSet::Single(_) => 1,
            FailureSet::Multiple(errors) => errors.len(),
        }
    }

    /// Always false: a failure set holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors in order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &PathError> + '_> {
        match self {
            FailureSet::Single(error) => Box::new(std::iter::once(error)),
            FailureSet::Multiple(errors) => Box::new(errors.iter()),
        }
    }

    /// Returns the first error.
    pub fn first(&self) -> &PathError {
        match self {
            FailureSet::Single(error) => error,
            FailureSet::Multiple(errors) => errors.head(),
        }
    }

    /// Returns all errors located at `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&PathError> {
        self.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&PathError> {
        self.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.iter().map(|e| e.message.as_str()).collect()
    }

    /// Converts this set into a `Vec<PathError>`.
    pub fn into_vec(self) -> Vec<PathError> {
        self.into_non_empty().into_vec()
    }

    fn into_non_empty(self) -> NonEmptyVec<PathError> {
        match self {
            FailureSet::Single(error) => NonEmptyVec::singleton(error),
            FailureSet::Multiple(errors) => errors,
        }
    }
}

impl From<PathError> for FailureSet {
    fn from(error: PathError) -> Self {
        FailureSet::Single(error)
    }
}

impl Semigroup for FailureSet {
    fn combine(self, other: Self) -> Self {
        FailureSet::Multiple(self.into_non_empty().combine(other.into_non_empty()))
    }
}

impl Display for FailureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureSet::Single(error) => write!(f, "{}", error),
            FailureSet::Multiple(_) => {
                writeln!(f, "{} validation error(s):", self.len())?;
                for (i, error) in self.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FailureSet {}

impl IntoIterator for FailureSet {
    type Item = PathError;
    type IntoIter = std::vec::IntoIter<PathError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FailureSet {
    type Item = &'a PathError;
    type IntoIter = Box<dyn Iterator<Item = &'a PathError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FailureSet>();
    assert_sync::<FailureSet>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn error(key: &str, message: &str) -> PathError {
        PathError::new(JsonPath::from_key(key), message)
    }

    #[test]
    fn test_path_error_defaults() {
        let err = error("name", "required key not provided");
        assert_eq!(err.code, "validation_error");
        assert_eq!(err.path, JsonPath::from_key("name"));
    }

    #[test]
    fn test_path_error_display_root() {
        let err = PathError::new(JsonPath::root(), "expected a list");
        assert_eq!(err.to_string(), "expected a list");
    }

    #[test]
    fn test_collect_empty_is_none() {
        assert!(FailureSet::collect(Vec::new()).is_none());
    }

    #[test]
    fn test_collect_keeps_order() {
        let set = FailureSet::collect(vec![error("z", "1"), error("a", "2"), error("m", "3")])
            .unwrap();
        assert!(set.is_multiple());
        assert_eq!(set.messages(), vec!["1", "2", "3"]);
        assert_eq!(set.first().message, "1");
    }

    #[test]
    fn test_collect_one_error_is_still_multiple() {
        let set = FailureSet::collect(vec![error("a", "only")]).unwrap();
        assert!(set.is_multiple());
        assert_eq!(set.len(), 1);
        assert_eq!(set.first().message, "only");
    }

    #[test]
    fn test_single_is_not_multiple() {
        let set = FailureSet::single(error("a", "boom"));
        assert!(!set.is_multiple());
        assert!(!set.is_empty());
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn test_combine_concatenates() {
        let left = FailureSet::single(error("a", "1"));
        let right = FailureSet::collect(vec![error("b", "2"), error("c", "3")]).unwrap();

        let combined = left.combine(right);
        assert_eq!(combined.messages(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_query_helpers() {
        let set = FailureSet::collect(vec![
            error("a", "1").with_code("required"),
            error("a", "2").with_code("extra_keys"),
            error("b", "3").with_code("required"),
        ])
        .unwrap();

        assert_eq!(set.at_path(&JsonPath::from_key("a")).len(), 2);
        assert_eq!(set.with_code("required").len(), 2);
        assert_eq!(set.with_code("missing").len(), 0);
    }

    #[test]
    fn test_into_iter_yields_owned_errors() {
        let set = FailureSet::single(error("a", "1")).combine(FailureSet::single(error("b", "2")));
        let collected: Vec<PathError> = set.into_iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1].path, JsonPath::from_key("b"));
    }

    #[test]
    fn test_display_multiple() {
        let set = FailureSet::collect(vec![error("name", "required"), error("email", "invalid")])
            .unwrap();
        let display = set.to_string();
        assert!(display.contains("2 validation error(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }
}
