//! Validation context threaded through every shape.
//!
//! [`ValidationContext`] carries where validation currently is (the path), the
//! policies in force (extra keys, implicit key presence) and the role of the
//! current node inside its parent. Errors are created through the context so that
//! every message is rendered consistently:
//!
//! ```text
//! <message>[ for <role>][ @ <subscript>]
//! ```

use stillwater::Validation;

use crate::error::{FailureSet, PathError};
use crate::path::JsonPath;

/// How mapping keys that the shape does not describe are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraKeys {
    /// Undescribed keys are errors (`extra keys not allowed`).
    #[default]
    Reject,
    /// Undescribed keys are accepted and copied through.
    Allow,
}

/// Role of a mapping value, appended to errors raised at the value itself.
pub(crate) const DICTIONARY_VALUE: &str = "dictionary value";

/// Validation state passed down the shape tree.
///
/// Contexts are cheap to derive: [`push_key`](Self::push_key) and
/// [`push_index`](Self::push_index) return a child context one level deeper, and
/// [`with_policy`](Self::with_policy) swaps the policies for a nested schema while
/// keeping the location.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    path: JsonPath,
    extra: ExtraKeys,
    required: bool,
    role: Option<&'static str>,
}

impl ValidationContext {
    /// Creates a root context with the given policies.
    pub fn new(extra: ExtraKeys, required: bool) -> Self {
        Self {
            path: JsonPath::root(),
            extra,
            required,
            role: None,
        }
    }

    /// Returns the location of the node being validated.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Returns the extra-keys policy in force.
    pub fn extra(&self) -> ExtraKeys {
        self.extra
    }

    /// Returns whether keys without an explicit presence marker are required.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the role of the current node, if any.
    pub fn role(&self) -> Option<&'static str> {
        self.role
    }

    /// Returns a child context for the value under mapping key `key`.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        Self {
            path: self.path.push_key(key),
            extra: self.extra,
            required: self.required,
            role: None,
        }
    }

    /// Returns a child context for the sequence element at `index`.
    pub fn push_index(&self, index: usize) -> Self {
        Self {
            path: self.path.push_index(index),
            extra: self.extra,
            required: self.required,
            role: None,
        }
    }

    /// Returns this context with a role attached to the current node.
    pub fn with_role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns a context at the same location with different policies.
    pub fn with_policy(&self, extra: ExtraKeys, required: bool) -> Self {
        Self {
            path: self.path.clone(),
            extra,
            required,
            role: self.role,
        }
    }

    /// Creates an error located at the current node.
    pub fn error(&self, code: &str, message: impl AsRef<str>) -> PathError {
        let mut rendered = message.as_ref().to_string();
        if let Some(role) = self.role {
            rendered.push_str(" for ");
            rendered.push_str(role);
        }
        if !self.path.is_root() {
            rendered.push_str(&format!(" @ {}", self.path.subscript()));
        }
        PathError::new(self.path.clone(), rendered).with_code(code)
    }

    /// Shorthand for a failed validation holding a single error at this node.
    pub fn fail<T>(&self, code: &str, message: impl AsRef<str>) -> Validation<T, FailureSet> {
        Validation::Failure(FailureSet::single(self.error(code, message)))
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ExtraKeys::default(), false)
    }
}
