//! # Shapecheck
//!
//! Assert that JSON data matches a declarative shape, and get one diagnostic line
//! per problem when it does not.
//!
//! ## Overview
//!
//! An [`Expectation`] wraps a shape and is compared with data using `==` (no
//! undescribed keys allowed) or `<=` (undescribed keys allowed). Validation
//! accumulates every error it finds instead of stopping at the first, and the
//! most recent failure is kept so the assertion can be explained afterwards:
//!
//! ```text
//! failed to validation error(s):
//! - info.platform: not a valid value for dictionary value @ data['info']['platform'] (actual: 'unix')
//! - releases: extra keys not allowed @ data['releases']
//! ```
//!
//! ## Core Types
//!
//! - [`Expectation`]: a shape compared lazily against data, caching its last failure
//! - [`Shape`] / [`Schema`]: the shape language and the policies it runs under
//! - [`Unordered`]: one-to-one matching of sequence elements in any order
//! - [`Diagnostics`]: renders a [`FailureSet`] as report lines
//! - [`hook::explain`]: the entry point for test harnesses explaining a failed comparison
//! - [`PathError`] / [`FailureSet`]: located errors, one or many
//!
//! ## Example
//!
//! ```rust
//! use shapecheck::{hook, Expectation, Kind, Length, MappingShape, Operator, ReportOptions};
//! use serde_json::json;
//!
//! let expected = Expectation::new(
//!     MappingShape::new()
//!         .key("name", Length::min(1))
//!         .key("tags", Kind::List),
//! );
//! let actual = json!({"name": "", "tags": []});
//!
//! assert!(expected != actual);
//!
//! let options = ReportOptions::new().show_actual(false);
//! let lines = hook::explain_with(&options, Operator::Eq, &expected, &actual).unwrap();
//! assert_eq!(
//!     lines,
//!     vec![
//!         "failed to validation error(s):",
//!         "- name: length of value must be at least 1 for dictionary value @ data['name']",
//!     ]
//! );
//! ```

pub mod compare;
pub mod display;
pub mod error;
pub mod hook;
pub mod path;
pub mod report;
pub mod schema;
pub mod validation;

pub use compare::{Expectation, Operator, UnknownOperator};
pub use display::{Plain, Repr};
pub use error::{FailureSet, PathError};
pub use path::{JsonPath, PathSegment};
pub use report::{Diagnostics, Mismatch, ReportOptions, UnknownVerbosity, Verbosity};
pub use schema::{
    Equal, Key, Kind, Length, MappingShape, Pattern, Presence, Schema, Shape, ShapeError,
    Unordered, Validator,
};
pub use validation::{ExtraKeys, ValidationContext};

#[doc(hidden)]
pub use serde_json;

/// Type alias for validation results using FailureSet
pub type ValidationResult<T> = stillwater::Validation<T, FailureSet>;
