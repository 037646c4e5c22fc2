//! Node paths for addressing within form submissions
//!
//! Provides [`NodePath`], the canonical identity of a node in a submission
//! tree. Identity is derived from position, never from content, so two equal
//! values at different positions are different nodes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter, Write as _};
use std::str::FromStr;

/// One step from a parent node to a child
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathStep {
    /// Entry of a record, by field name
    Key(String),
    /// Element of a list, zero-based
    Index(usize),
}

impl PathStep {
    /// Field name, if this step enters a record
    #[inline]
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Element position, if this step enters a list
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Key(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl Display for PathStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Path from the submission root to a node
///
/// The textual form joins keys with `.` and writes list positions as `[i]`:
/// - `["contactInfo", "email"]` → `contactInfo.email`
/// - `["items", 1, "name"]` → `items[1].name`
///
/// Keys containing `.`, `[`, `]`, `"` or `\` are escaped with `\`. An empty
/// key is written as `""`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    /// Empty path (the submission itself)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create path from steps
    #[inline]
    #[must_use]
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    /// Path of a single top-level field
    #[inline]
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![PathStep::Key(key.into())])
    }

    /// Get path steps
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Number of steps (zero for root)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is the root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, rest)| Self(rest.to_vec()))
    }

    /// Get last step (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// Nearest record key on the path, scanning from the leaf
    #[must_use]
    pub fn terminal_key(&self) -> Option<&str> {
        self.0.iter().rev().find_map(PathStep::as_key)
    }

    /// Append a record key, returning new path
    #[must_use]
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(PathStep::Key(key.into()));
        Self(steps)
    }

    /// Append a list position, returning new path
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(PathStep::Index(index));
        Self(steps)
    }

    /// Check if this path is a prefix of another (or equal to it)
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Check if this path is a strict ancestor of another
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Iterator over steps from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PathStep> {
        self.0.iter()
    }
}

/// Text form of an empty key
const EMPTY_KEY: &str = "\"\"";

fn write_escaped_key(out: &mut Formatter<'_>, key: &str) -> fmt::Result {
    if key.is_empty() {
        return out.write_str(EMPTY_KEY);
    }
    for c in key.chars() {
        if matches!(c, '.' | '[' | ']' | '\\' | '"') {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    Ok(())
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            match step {
                PathStep::Key(key) => {
                    if i > 0 {
                        f.write_char('.')?;
                    }
                    write_escaped_key(f, key)?;
                }
                PathStep::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut steps = Vec::new();
        let mut key: Option<String> = None;
        // Set after a '.', cleared once the following segment starts
        let mut awaiting_segment = false;
        let mut chars = s.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '\\' => {
                    let (_, escaped) = chars.next().ok_or(PathError::DanglingEscape)?;
                    key.get_or_insert_with(String::new).push(escaped);
                    awaiting_segment = false;
                }
                '.' => {
                    match key.take() {
                        Some(k) => steps.push(PathStep::Key(k)),
                        None if matches!(steps.last(), Some(PathStep::Index(_))) => {}
                        None => return Err(PathError::EmptySegment),
                    }
                    awaiting_segment = true;
                }
                '[' => {
                    if let Some(k) = key.take() {
                        steps.push(PathStep::Key(k));
                    } else if awaiting_segment {
                        return Err(PathError::EmptySegment);
                    }
                    let mut digits = String::new();
                    let mut closed = false;
                    for (_, d) in chars.by_ref() {
                        if d == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(d);
                    }
                    if !closed {
                        return Err(PathError::UnterminatedIndex);
                    }
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| PathError::InvalidIndex(digits.clone()))?;
                    steps.push(PathStep::Index(index));
                    awaiting_segment = false;
                }
                ']' => return Err(PathError::UnexpectedBracket(pos)),
                '"' => {
                    let closes = chars.next().is_some_and(|(_, q)| q == '"');
                    let at_boundary = chars
                        .clone()
                        .next()
                        .map_or(true, |(_, next)| matches!(next, '.' | '['));
                    if key.is_some() || !closes || !at_boundary {
                        return Err(PathError::UnexpectedQuote(pos));
                    }
                    key = Some(String::new());
                    awaiting_segment = false;
                }
                other => {
                    key.get_or_insert_with(String::new).push(other);
                    awaiting_segment = false;
                }
            }
        }

        if let Some(k) = key {
            steps.push(PathStep::Key(k));
        } else if awaiting_segment {
            return Err(PathError::EmptySegment);
        }

        Ok(Self(steps))
    }
}

impl From<Vec<PathStep>> for NodePath {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}

impl From<&[PathStep]> for NodePath {
    fn from(steps: &[PathStep]) -> Self {
        Self(steps.to_vec())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors parsing the textual path form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty key between separators, or a leading/trailing `.`
    #[error("path contains empty segment")]
    EmptySegment,

    /// `[` without a closing `]`
    #[error("unterminated list index")]
    UnterminatedIndex,

    /// Bracketed text that is not a non-negative integer
    #[error("invalid list index: '{0}'")]
    InvalidIndex(String),

    /// `\` at end of input
    #[error("escape character at end of path")]
    DanglingEscape,

    /// `]` outside an index
    #[error("unexpected ']' at byte {0}")]
    UnexpectedBracket(usize),

    /// `"` that is not part of an empty-key segment `""`
    #[error("unexpected '\"' at byte {0}")]
    UnexpectedQuote(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(steps: &[PathStep]) -> NodePath {
        NodePath::from(steps)
    }

    #[test]
    fn path_root() {
        let root = NodePath::root();
        assert!(root.is_empty());
        assert!(root.parent().is_none());
        assert_eq!(root.to_string(), "");
    }

    #[test]
    fn path_children() {
        let items = NodePath::key("items");
        let second = items.child_index(1);
        let name = second.child_key("name");
        assert_eq!(
            name.steps(),
            &[
                PathStep::Key("items".into()),
                PathStep::Index(1),
                PathStep::Key("name".into())
            ]
        );
        assert_eq!(name.parent(), Some(second));
    }

    #[test]
    fn path_terminal_key_skips_indices() {
        let p = NodePath::key("tags").child_index(3);
        assert_eq!(p.terminal_key(), Some("tags"));
        assert_eq!(NodePath::root().terminal_key(), None);
    }

    #[test]
    fn path_ancestry() {
        let a = NodePath::key("a");
        let ab = a.child_key("b");
        assert!(a.is_ancestor_of(&ab));
        assert!(!ab.is_ancestor_of(&a));
        assert!(!a.is_ancestor_of(&a));
        assert!(a.is_prefix_of(&a));
        assert!(NodePath::root().is_ancestor_of(&a));
    }

    #[test]
    fn path_display() {
        let p = NodePath::key("items").child_index(0).child_key("name");
        assert_eq!(p.to_string(), "items[0].name");

        let nested = NodePath::key("grid").child_index(2).child_index(5);
        assert_eq!(nested.to_string(), "grid[2][5]");
    }

    #[test]
    fn path_display_escapes_reserved_characters() {
        let p = NodePath::key("a.b").child_key("c[0]");
        assert_eq!(p.to_string(), r"a\.b.c\[0\]");
    }

    #[test]
    fn path_parse_canonical_form() {
        let parsed: NodePath = "items[1].name".parse().unwrap();
        assert_eq!(parsed, NodePath::key("items").child_index(1).child_key("name"));

        let indexed_root: NodePath = "[0].x".parse().unwrap();
        assert_eq!(indexed_root, NodePath::root().child_index(0).child_key("x"));
    }

    #[test]
    fn path_parse_escaped_keys() {
        let p = NodePath::key("a.b").child_key(r"back\slash");
        let text = p.to_string();
        assert_eq!(text.parse::<NodePath>().unwrap(), p);
    }

    #[test]
    fn path_empty_keys_have_quoted_form() {
        let first = NodePath::key("");
        assert_eq!(first.to_string(), "\"\"");
        assert_eq!(first.to_string().parse::<NodePath>().unwrap(), first);

        let nested = NodePath::key("a").child_key("").child_index(0).child_key("");
        assert_eq!(nested.to_string(), "a.\"\"[0].\"\"");
        assert_eq!(nested.to_string().parse::<NodePath>().unwrap(), nested);

        let quoted = NodePath::key("say \"hi\"");
        assert_eq!(quoted.to_string(), "say \\\"hi\\\"");
        assert_eq!(quoted.to_string().parse::<NodePath>().unwrap(), quoted);
    }

    #[test]
    fn path_parse_empty_is_root() {
        assert_eq!("".parse::<NodePath>().unwrap(), NodePath::root());
    }

    #[test]
    fn path_parse_errors() {
        assert_eq!("a..b".parse::<NodePath>(), Err(PathError::EmptySegment));
        assert_eq!(".a".parse::<NodePath>(), Err(PathError::EmptySegment));
        assert_eq!("a.".parse::<NodePath>(), Err(PathError::EmptySegment));
        assert_eq!("a.[0]".parse::<NodePath>(), Err(PathError::EmptySegment));
        assert_eq!("a[1".parse::<NodePath>(), Err(PathError::UnterminatedIndex));
        assert_eq!(
            "a[x]".parse::<NodePath>(),
            Err(PathError::InvalidIndex("x".into()))
        );
        assert_eq!("a\\".parse::<NodePath>(), Err(PathError::DanglingEscape));
        assert_eq!("a]".parse::<NodePath>(), Err(PathError::UnexpectedBracket(1)));
        assert_eq!("a\"".parse::<NodePath>(), Err(PathError::UnexpectedQuote(1)));
        assert_eq!("\"\"x".parse::<NodePath>(), Err(PathError::UnexpectedQuote(0)));
        assert_eq!("a.\"".parse::<NodePath>(), Err(PathError::UnexpectedQuote(2)));
    }

    #[test]
    fn path_serializes_as_text() {
        let p = path(&[PathStep::Key("contact".into()), PathStep::Index(2)]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"contact[2]\"");
        let back: NodePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
