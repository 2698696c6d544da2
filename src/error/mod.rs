//! Error types for validation failures.
//!
//! This module provides [`PathError`], one structural mismatch located by a path,
//! and [`FailureSet`], the complete outcome of one failed validation attempt.

mod path_error;

pub use path_error::{FailureSet, PathError};
