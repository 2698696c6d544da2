//! Explaining failed assertions.
//!
//! A test harness that sees `expected == actual` fail can call [`explain`] with
//! the operator and both operands. If one of them is an [`Expectation`] holding a
//! cached failure, the hook returns the report lines; otherwise it returns `None`
//! so the harness falls back to its default rendering.
//!
//! ```rust
//! use shapecheck::hook::explain;
//! use shapecheck::{Expectation, Operator};
//! use serde_json::json;
//!
//! let expected = Expectation::new(json!({"info": {"platform": "INVALID"}}));
//! let actual = json!({"info": {"platform": "unix"}});
//!
//! assert!(expected != actual);
//! let lines = explain(Operator::Eq, &expected, &actual).unwrap();
//! assert_eq!(lines[0], "failed to validation error(s):");
//! ```

use serde_json::Value;

use crate::compare::{Expectation, Operator};
use crate::error::FailureSet;
use crate::report::{Diagnostics, ReportOptions};

/// Anything that can hand over the failure of its last comparison.
pub trait FailureSource {
    /// Returns the cached failure, if the last comparison failed.
    fn last_failure(&self) -> Option<FailureSet>;
}

impl FailureSource for Expectation {
    fn last_failure(&self) -> Option<FailureSet> {
        Expectation::last_failure(self)
    }
}

/// One side of a comparison, as seen by the hook.
///
/// Both capabilities default to absent, so an operand type only opts in to what
/// it provides.
pub trait Operand {
    /// Returns this operand as a failure source, if it is one.
    fn as_failure_source(&self) -> Option<&dyn FailureSource> {
        None
    }

    /// Returns this operand as data, if it is data.
    fn as_data(&self) -> Option<&Value> {
        None
    }
}

impl Operand for Expectation {
    fn as_failure_source(&self) -> Option<&dyn FailureSource> {
        Some(self)
    }
}

impl Operand for Value {
    fn as_data(&self) -> Option<&Value> {
        Some(self)
    }
}

/// Explains a failed comparison with default [`ReportOptions`].
pub fn explain(op: Operator, left: &dyn Operand, right: &dyn Operand) -> Option<Vec<String>> {
    explain_with(&ReportOptions::default(), op, left, right)
}

/// Explains a failed comparison.
///
/// `<=` is only explained with the failure source on the left; `==` with it on
/// either side, the left checked first. The other operand, when it is data, is
/// used for the `(actual: ...)` suffixes.
///
/// Returns `None` when no operand qualifies or the qualifying operand has no
/// cached failure.
pub fn explain_with(
    options: &ReportOptions,
    op: Operator,
    left: &dyn Operand,
    right: &dyn Operand,
) -> Option<Vec<String>> {
    let (source, data) = match (left.as_failure_source(), right.as_failure_source()) {
        (Some(source), _) => (source, right.as_data()),
        (None, Some(source)) if op == Operator::Eq => (source, left.as_data()),
        _ => {
            tracing::trace!(operator = %op, "no failure source among operands");
            return None;
        }
    };

    let Some(failure) = source.last_failure() else {
        tracing::trace!(operator = %op, "failure source has nothing cached");
        return None;
    };

    Some(Diagnostics::new(*options).report(&failure, data))
}

/// Like [`explain`], for an operator given in source form (`"=="`, `"<="`).
///
/// Unknown operators are not explained.
pub fn explain_str(op: &str, left: &dyn Operand, right: &dyn Operand) -> Option<Vec<String>> {
    match op.parse::<Operator>() {
        Ok(op) => explain(op, left, right),
        Err(err) => {
            tracing::trace!(%err, "not explaining");
            None
        }
    }
}

/// Asserts that a value matches an expectation strictly (`==`).
///
/// On failure, panics with the report for the mismatch. Report options are read
/// from the environment (see [`ReportOptions::from_env`]).
///
/// ```rust
/// use shapecheck::{assert_shape, Expectation, Kind, MappingShape};
/// use serde_json::json;
///
/// assert_shape!(Expectation::new(MappingShape::new().key("id", Kind::Int)), json!({"id": 1}));
/// ```
///
/// ```rust,should_panic
/// use shapecheck::{assert_shape, Expectation};
/// use serde_json::json;
///
/// assert_shape!(Expectation::new(json!({"a": 1})), json!({"a": 1, "b": 2}));
/// ```
#[macro_export]
macro_rules! assert_shape {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__assert_shape_impl!($crate::Operator::Eq, $expected, $actual)
    };
}

/// Asserts that a value matches an expectation permissively (`<=`).
///
/// ```rust
/// use shapecheck::{assert_shape_le, Expectation};
/// use serde_json::json;
///
/// assert_shape_le!(Expectation::new(json!({"a": 1})), json!({"a": 1, "b": 2}));
/// ```
#[macro_export]
macro_rules! assert_shape_le {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__assert_shape_impl!($crate::Operator::Le, $expected, $actual)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_shape_impl {
    ($op:expr, $expected:expr, $actual:expr) => {
        match (&$expected, &$actual) {
            (expected, actual) => {
                let expected: &$crate::Expectation = expected;
                let actual: &$crate::serde_json::Value = actual;
                let options = $crate::ReportOptions::from_env();
                if let ::std::result::Result::Err(mismatch) =
                    expected.verify_with($op, actual, &options)
                {
                    ::std::panic!("{}", mismatch);
                }
            }
        }
    };
}
