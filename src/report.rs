//! Rendering failures as assertion output.
//!
//! [`Diagnostics`] turns a [`FailureSet`] into one line per error:
//!
//! ```text
//! failed to validation error(s):
//! - info.platform: not a valid value for dictionary value @ data['info']['platform'] (actual: 'unix')
//! - urls: expected int for dictionary value @ data['urls']
//! ```
//!
//! Errors at the root get no path prefix. The `(actual: ...)` suffix is added only
//! when the data was supplied and the error's path can be walked into it.

use std::env;
use std::fmt::Write;
use std::str::FromStr;

use serde_json::Value;

use crate::display::Repr;
use crate::error::{FailureSet, PathError};

/// First line of every report.
pub const HEADER: &str = "failed to validation error(s):";

/// Environment variable selecting the [`Verbosity`] (`full` or `brief`).
pub const VERBOSITY_ENV: &str = "SHAPECHECK_VERBOSITY";

/// Environment variable toggling the `(actual: ...)` suffix (`1`/`true`, `0`/`false`).
pub const SHOW_ACTUAL_ENV: &str = "SHAPECHECK_SHOW_ACTUAL";

/// How much of each message is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Messages verbatim.
    #[default]
    Full,
    /// Messages without their trailing ` @ data[...]` location, which repeats the
    /// dotted prefix.
    Brief,
}

/// A verbosity setting other than `full` or `brief`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verbosity {0:?}, expected \"full\" or \"brief\"")]
pub struct UnknownVerbosity(pub String);

impl FromStr for Verbosity {
    type Err = UnknownVerbosity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Verbosity::Full),
            "brief" => Ok(Verbosity::Brief),
            _ => Err(UnknownVerbosity(s.to_string())),
        }
    }
}

/// Report settings.
///
/// Defaults: actual values shown, [`Verbosity::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    show_actual: bool,
    verbosity: Verbosity,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_actual: true,
            verbosity: Verbosity::Full,
        }
    }
}

impl ReportOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the actual value of a failing node is appended.
    pub fn show_actual(mut self, show: bool) -> Self {
        self.show_actual = show;
        self
    }

    /// Sets the message verbosity.
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Returns whether actual values are shown.
    pub fn shows_actual(&self) -> bool {
        self.show_actual
    }

    /// Returns the message verbosity.
    pub fn message_verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reads options from [`VERBOSITY_ENV`] and [`SHOW_ACTUAL_ENV`].
    ///
    /// Unset variables keep their defaults. Unrecognised values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(raw) = lookup(VERBOSITY_ENV) {
            match raw.parse::<Verbosity>() {
                Ok(verbosity) => options.verbosity = verbosity,
                Err(err) => tracing::warn!(variable = VERBOSITY_ENV, %err, "ignoring setting"),
            }
        }

        if let Some(raw) = lookup(SHOW_ACTUAL_ENV) {
            match parse_flag(&raw) {
                Some(show) => options.show_actual = show,
                None => tracing::warn!(
                    variable = SHOW_ACTUAL_ENV,
                    value = %raw,
                    "ignoring setting, expected 0, 1, false or true"
                ),
            }
        }

        options
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Formats failures as report lines.
///
/// # Example
///
/// ```rust
/// use shapecheck::{Diagnostics, FailureSet, JsonPath, PathError};
/// use serde_json::json;
///
/// let error = PathError::new(JsonPath::from_key("foo").push_index(0).push_key("id"), "expected int");
/// let diagnostics = Diagnostics::default();
///
/// assert_eq!(diagnostics.line(&error, None), "- foo.0.id: expected int");
/// assert_eq!(
///     diagnostics.line(&error, Some(&json!({"foo": [{"id": "bar"}]}))),
///     "- foo.0.id: expected int (actual: 'bar')"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    options: ReportOptions,
}

impl Diagnostics {
    /// Creates a formatter with the given options.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Renders one error as a `- ` line.
    pub fn line(&self, error: &PathError, data: Option<&Value>) -> String {
        let mut line = String::from("- ");

        if error.path.is_root() {
            line.push_str(&error.message);
            return line;
        }

        let _ = write!(line, "{}: {}", error.path, self.message(error));

        if self.options.show_actual {
            if let Some(actual) = data.and_then(|d| error.path.lookup(d)) {
                let _ = write!(line, " (actual: {})", Repr(actual));
            }
        }

        line
    }

    /// Renders every error of `failure`, in order.
    pub fn lines(&self, failure: &FailureSet, data: Option<&Value>) -> Vec<String> {
        failure.iter().map(|error| self.line(error, data)).collect()
    }

    /// Renders [`HEADER`] followed by every error line.
    pub fn report(&self, failure: &FailureSet, data: Option<&Value>) -> Vec<String> {
        std::iter::once(HEADER.to_string())
            .chain(self.lines(failure, data))
            .collect()
    }

    fn message<'e>(&self, error: &'e PathError) -> &'e str {
        match self.options.verbosity {
            Verbosity::Full => &error.message,
            Verbosity::Brief => {
                let location = format!(" @ {}", error.path.subscript());
                error
                    .message
                    .strip_suffix(location.as_str())
                    .unwrap_or(&error.message)
            }
        }
    }
}

/// A failed comparison, with its rendered report.
///
/// Displays as the report lines joined by newlines.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .lines.join("\n"))]
pub struct Mismatch {
    /// The failures found.
    pub failure: FailureSet,
    /// The rendered report, header first.
    pub lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;
    use serde_json::json;

    fn foo_id_error() -> PathError {
        PathError::new(
            JsonPath::from_key("foo").push_index(0).push_key("id"),
            "expected int",
        )
    }

    #[test]
    fn test_root_error_has_no_prefix_or_suffix() {
        let error = PathError::new(JsonPath::root(), "expected a list");
        let line = Diagnostics::default().line(&error, Some(&json!({"a": 1})));
        assert_eq!(line, "- expected a list");
    }

    #[test]
    fn test_walk_failure_omits_suffix() {
        let diagnostics = Diagnostics::default();
        for data in [json!({}), json!({"foo": []}), json!({"foo": {"0": {"id": 1}}})] {
            assert_eq!(diagnostics.line(&foo_id_error(), Some(&data)), "- foo.0.id: expected int");
        }
    }

    #[test]
    fn test_show_actual_can_be_disabled() {
        let diagnostics = Diagnostics::new(ReportOptions::new().show_actual(false));
        let data = json!({"foo": [{"id": "bar"}]});
        assert_eq!(diagnostics.line(&foo_id_error(), Some(&data)), "- foo.0.id: expected int");
    }

    #[test]
    fn test_brief_strips_location() {
        let error = PathError::new(
            JsonPath::from_key("info").push_key("platform"),
            "not a valid value for dictionary value @ data['info']['platform']",
        );
        let diagnostics = Diagnostics::new(
            ReportOptions::new()
                .verbosity(Verbosity::Brief)
                .show_actual(false),
        );
        assert_eq!(
            diagnostics.line(&error, None),
            "- info.platform: not a valid value for dictionary value"
        );
    }

    #[test]
    fn test_report_prepends_header() {
        let failure = FailureSet::single(foo_id_error());
        let lines = Diagnostics::default().report(&failure, None);
        assert_eq!(lines, vec![HEADER, "- foo.0.id: expected int"]);
    }

    #[test]
    fn test_verbosity_parsing() {
        assert_eq!("full".parse::<Verbosity>().unwrap(), Verbosity::Full);
        assert_eq!(" Brief ".parse::<Verbosity>().unwrap(), Verbosity::Brief);
        assert!("loud".parse::<Verbosity>().is_err());
    }

    #[test]
    fn test_options_from_lookup() {
        let options = ReportOptions::from_lookup(|name| match name {
            VERBOSITY_ENV => Some("brief".to_string()),
            SHOW_ACTUAL_ENV => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(options.message_verbosity(), Verbosity::Brief);
        assert!(!options.shows_actual());
    }

    #[test]
    fn test_invalid_settings_keep_defaults() {
        let options = ReportOptions::from_lookup(|_| Some("bogus".to_string()));
        assert_eq!(options, ReportOptions::default());
    }

    #[test]
    fn test_mismatch_display_joins_lines() {
        let failure = FailureSet::single(foo_id_error());
        let lines = Diagnostics::default().report(&failure, None);
        let mismatch = Mismatch { failure, lines };
        assert_eq!(
            mismatch.to_string(),
            "failed to validation error(s):\n- foo.0.id: expected int"
        );
    }
}
