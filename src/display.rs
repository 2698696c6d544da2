//! Compact renderings of JSON values for diagnostic messages.
//!
//! [`Repr`] quotes strings (`'bar'`) so the "actual" value of a failing node is
//! unambiguous. [`Plain`] leaves top-level strings bare and is used inside
//! validator messages such as `Element #1 (b) is not valid against any validator`.

use std::fmt::{self, Display, Write};

use serde_json::Value;

/// Quoted rendering of a value: `'text'`, `[1, 'a']`, `{'k': null}`.
#[derive(Debug, Clone, Copy)]
pub struct Repr<'a>(pub &'a Value);

impl Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", Repr(item))?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {}", Repr(item))?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Like [`Repr`], but a top-level string is written without quotes.
#[derive(Debug, Clone, Copy)]
pub struct Plain<'a>(pub &'a Value);

impl Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", Repr(other)),
        }
    }
}

/// Writes `text` single-quoted, escaping backslashes, quotes and control whitespace.
pub(crate) fn write_quoted(f: &mut impl Write, text: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}
