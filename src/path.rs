//! Paths locating a node inside nested JSON-like data.
//!
//! This module provides [`JsonPath`] and [`PathSegment`]. A path is rendered in
//! two ways: the dotted form used as the prefix of a diagnostic line
//! (`foo.0.id`) and the subscript form embedded in validator messages
//! (`data['foo'][0]['id']`).

use std::fmt::{self, Display};

use serde_json::Value;

/// A segment of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key (e.g. `info`, `platform`)
    Key(String),
    /// A sequence index (e.g. `0`, `42`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Steps from `value` into the child this segment names.
    ///
    /// Keys only step into objects and indices only into arrays; anything else
    /// yields `None`.
    pub fn step<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match (self, value) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
            _ => None,
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested JSON-like structure.
///
/// Paths are immutable: every `push_*` method returns a new path and leaves the
/// original untouched.
///
/// # Example
///
/// ```rust
/// use shapecheck::JsonPath;
///
/// let path = JsonPath::root()
///     .push_key("foo")
///     .push_index(0)
///     .push_key("id");
///
/// assert_eq!(path.to_string(), "foo.0.id");
/// assert_eq!(path.subscript().to_string(), "data['foo'][0]['id']");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the whole value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single key segment.
    pub fn from_key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with a key segment appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, rest)| Self {
            segments: rest.to_vec(),
        })
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Walks this path into `value`, returning the node it locates.
    ///
    /// Returns `None` as soon as a segment is missing: an absent key, an index out
    /// of range, or a key/index applied to the wrong kind of container.
    ///
    /// ```rust
    /// use shapecheck::JsonPath;
    /// use serde_json::json;
    ///
    /// let data = json!({"foo": [{"id": "bar"}]});
    /// let path = JsonPath::from_key("foo").push_index(0).push_key("id");
    /// assert_eq!(path.lookup(&data), Some(&json!("bar")));
    /// assert_eq!(JsonPath::from_key("nope").lookup(&data), None);
    /// ```
    pub fn lookup<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(value, |node, segment| segment.step(node))
    }

    /// Returns a displayable subscript rendering such as `data['info'][0]`.
    pub fn subscript(&self) -> Subscript<'_> {
        Subscript(self)
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Subscript rendering of a [`JsonPath`], see [`JsonPath::subscript`].
#[derive(Debug, Clone, Copy)]
pub struct Subscript<'a>(&'a JsonPath);

impl Display for Subscript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data")?;
        for segment in self.0.segments() {
            match segment {
                PathSegment::Key(name) => {
                    write!(f, "[")?;
                    crate::display::write_quoted(f, name)?;
                    write!(f, "]")?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_is_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.subscript().to_string(), "data");
    }

    #[test]
    fn test_indices_render_inline() {
        let path = JsonPath::root()
            .push_key("users")
            .push_index(0)
            .push_key("email");
        assert_eq!(path.to_string(), "users.0.email");
    }

    #[test]
    fn test_leading_index() {
        let path = JsonPath::from_index(3).push_key("name");
        assert_eq!(path.to_string(), "3.name");
        assert_eq!(path.subscript().to_string(), "data[3]['name']");
    }

    #[test]
    fn test_subscript_escapes_quotes() {
        let path = JsonPath::from_key("it's");
        assert_eq!(path.subscript().to_string(), r"data['it\'s']");
    }

    #[test]
    fn test_parent_and_last() {
        let path = JsonPath::from_key("a").push_index(1);
        assert_eq!(path.last(), Some(&PathSegment::Index(1)));
        assert_eq!(path.parent(), Some(JsonPath::from_key("a")));
        assert_eq!(JsonPath::root().parent(), None);
    }

    #[test]
    fn test_lookup_stops_on_wrong_container() {
        let data = json!({"items": [1, 2]});

        assert_eq!(
            JsonPath::from_key("items").push_index(1).lookup(&data),
            Some(&json!(2))
        );
        assert_eq!(JsonPath::from_key("items").push_index(5).lookup(&data), None);
        assert_eq!(JsonPath::from_key("items").push_key("0").lookup(&data), None);
        assert_eq!(JsonPath::from_index(0).lookup(&data), None);
        assert_eq!(JsonPath::root().lookup(&data), Some(&data));
    }

    #[test]
    fn test_from_iterator() {
        let path: JsonPath = vec![PathSegment::from("foo"), PathSegment::from(0), "id".into()]
            .into_iter()
            .collect();
        assert_eq!(path.to_string(), "foo.0.id");
    }
}
