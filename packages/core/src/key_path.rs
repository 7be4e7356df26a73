//! Key paths: dotted or sequence-form locations in the logical tree.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A location in the logical tree: an ordered sequence of key segments.
///
/// # Path Syntax
///
/// Paths come in two external forms with deliberately different splitting
/// rules:
///
/// - String form: segments are separated by `.`, so `"person.name.first"`
///   names three segments. The empty string is the root path.
/// - Sequence form: each element is one segment, taken literally. This is
///   the only way to address a key whose name contains a dot.
///
/// Splitting is applied ONLY to string-form paths; the two forms are not
/// equivalent when a segment contains a literal dot.
///
/// Segments are plain strings. No identifier validation, no numeric
/// coercion: a segment like `"0"` is an ordinary mapping key, never an
/// array index.
///
/// # Examples
///
/// ```rust
/// use stash_core::KeyPath;
///
/// let dotted = KeyPath::parse("person.name.first");
/// assert_eq!(dotted.len(), 3);
///
/// let literal = KeyPath::from(["array.key.has.dots"]);
/// assert_eq!(literal.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    pub segments: Vec<String>,
}

impl KeyPath {
    /// The empty (root) path.
    pub fn root() -> Self {
        KeyPath {
            segments: Vec::new(),
        }
    }

    /// Parse a string-form path, splitting on `.`.
    ///
    /// The empty string parses to the root path. Interior empty segments
    /// are kept as-is: `"a..b"` has three segments, the middle one the
    /// empty string.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return KeyPath::root();
        }
        KeyPath {
            segments: s.split('.').map(str::to_string).collect(),
        }
    }

    /// Create a path from literal segments. No splitting is performed.
    pub fn from_segments(segments: Vec<String>) -> Self {
        KeyPath { segments }
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }

    /// Concatenate this path with another.
    #[must_use]
    pub fn join(&self, other: &KeyPath) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        KeyPath { segments }
    }

    /// Append a single literal segment, dots included.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        KeyPath { segments }
    }

    /// Split into the first segment and the remaining segments.
    ///
    /// Returns `None` for the root path. The first segment is the flat
    /// medium key; the rest is what the traversal engine walks.
    pub fn split_first(&self) -> Option<(&str, &[String])> {
        let (first, rest) = self.segments.split_first()?;
        Some((first.as_str(), rest))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

// String-form conversions split on dots; sequence-form conversions are
// literal. Both are used pervasively by the Storage API.

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        KeyPath::parse(s)
    }
}

impl From<String> for KeyPath {
    fn from(s: String) -> Self {
        KeyPath::parse(&s)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        KeyPath::from_segments(segments)
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(segments: Vec<&str>) -> Self {
        KeyPath::from_segments(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        KeyPath::from_segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        KeyPath::from_segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl Serialize for KeyPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyPathVisitor;

        impl Visitor<'_> for KeyPathVisitor {
            type Value = KeyPath;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a dotted path string")
            }

            fn visit_str<E>(self, v: &str) -> Result<KeyPath, E>
            where
                E: de::Error,
            {
                Ok(KeyPath::parse(v))
            }
        }

        deserializer.deserialize_str(KeyPathVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_dots() {
        assert_eq!(KeyPath::parse("").len(), 0);
        assert_eq!(KeyPath::parse("foo").len(), 1);
        assert_eq!(KeyPath::parse("foo.bar").len(), 2);
        assert_eq!(KeyPath::parse("person.name.first").len(), 3);
    }

    #[test]
    fn parse_keeps_interior_empty_segments() {
        let p = KeyPath::parse("a..b");
        assert_eq!(p.len(), 3);
        assert_eq!(&p[1], "");
    }

    #[test]
    fn sequence_form_is_literal() {
        let p = KeyPath::from(["array.key.has.dots"]);
        assert_eq!(p.len(), 1);
        assert_eq!(&p[0], "array.key.has.dots");

        // The string form of the same text names four segments instead.
        assert_eq!(KeyPath::parse("array.key.has.dots").len(), 4);
    }

    #[test]
    fn string_and_sequence_forms_agree_without_dots() {
        assert_eq!(
            KeyPath::parse("person.name.first"),
            KeyPath::from(["person", "name", "first"])
        );
    }

    #[test]
    fn split_first_works() {
        let p = KeyPath::parse("person.name.first");
        let (first, rest) = p.split_first().unwrap();
        assert_eq!(first, "person");
        assert_eq!(rest, &["name".to_string(), "first".to_string()]);

        assert!(KeyPath::root().split_first().is_none());
    }

    #[test]
    fn join_concatenates() {
        let ns = KeyPath::parse("my.namespace");
        let p = ns.join(&KeyPath::parse("person.age"));
        assert_eq!(p.to_string(), "my.namespace.person.age");
    }

    #[test]
    fn join_with_root_is_identity() {
        let p = KeyPath::parse("foo");
        assert_eq!(p.join(&KeyPath::root()), p);
        assert_eq!(KeyPath::root().join(&p), p);
    }

    #[test]
    fn child_appends_literally() {
        let ns = KeyPath::root().child("my.namespace");
        assert_eq!(ns.len(), 1);
        assert_eq!(&ns[0], "my.namespace");
    }

    #[test]
    fn display_joins_with_dots() {
        assert_eq!(KeyPath::parse("a.b.c").to_string(), "a.b.c");
        assert_eq!(KeyPath::root().to_string(), "");
    }

    #[test]
    fn serializes_as_dotted_string() {
        let p = KeyPath::parse("person.name");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"person.name\"");

        let back: KeyPath = serde_json::from_str("\"person.name\"").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn hash_and_ord_work() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(KeyPath::parse("foo"));
        set.insert(KeyPath::parse("bar"));
        set.insert(KeyPath::parse("foo"));
        assert_eq!(set.len(), 2);

        assert!(KeyPath::parse("a.b") < KeyPath::parse("a.c"));
    }
}
