//! Tagged form values
//!
//! Every submitted value is classified once into [`FieldValue`] on ingestion.
//! Downstream code dispatches on the tag instead of probing JSON shapes.

use crate::path::{NodePath, PathStep};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Ordered field-name → value mapping
pub type Record = IndexMap<String, FieldValue>;

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 text
    Text(String),
    /// JSON number (integer or finite float)
    Number(Number),
    /// Boolean
    Bool(bool),
    /// Explicit null
    Null,
}

impl Scalar {
    /// Textual presentation; `null` becomes `null_placeholder`
    ///
    /// Integral floats print without a fractional part (`2450.0` → `2450`);
    /// magnitudes outside `[1e-6, 1e21)` use exponent form (`1e+21`, `1e-7`).
    #[must_use]
    pub fn display_with<'a>(&'a self, null_placeholder: &'a str) -> Cow<'a, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(number) => Cow::Owned(format_number(number)),
            Self::Bool(flag) => Cow::Borrowed(if *flag { "true" } else { "false" }),
            Self::Null => Cow::Borrowed(null_placeholder),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Null => Value::Null,
        }
    }
}

/// Format a number the way the dashboard displays it
#[must_use]
pub fn format_number(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        number.as_f64().map(format_float).unwrap_or_default()
    }
}

/// Shortest round-trip digits; exponent form outside `[1e-6, 1e21)` as in JS
fn format_float(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => text,
    }
}

/// Coarse classification of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Text, number, boolean or null
    Scalar,
    /// Ordered mapping
    Record,
    /// Ordered sequence
    List,
    /// Value with no display semantics
    Unsupported,
}

/// Form value, normalized from any JSON-shaped input
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Leaf value
    Scalar(Scalar),
    /// Nested record; entry order is display order
    Record(Record),
    /// Ordered list of values of any kind
    List(Vec<FieldValue>),
    /// Value that is neither scalar, record nor list; carries a short description
    Unsupported(String),
}

impl FieldValue {
    /// Text scalar
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }

    /// Null scalar
    #[inline]
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Classify a JSON value
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(*flag)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number.clone())),
            Value::String(text) => Self::Scalar(Scalar::Text(text.clone())),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Record(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Classify a YAML value
    ///
    /// Non-string mapping keys are stringified. Tagged values and non-finite
    /// floats have no JSON counterpart and become [`FieldValue::Unsupported`].
    #[must_use]
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => Self::Scalar(Scalar::Null),
            Yaml::Bool(flag) => Self::Scalar(Scalar::Bool(*flag)),
            Yaml::Number(number) => yaml_number(number),
            Yaml::String(text) => Self::Scalar(Scalar::Text(text.clone())),
            Yaml::Sequence(items) => Self::List(items.iter().map(Self::from_yaml).collect()),
            Yaml::Mapping(map) => Self::Record(
                map.iter()
                    .map(|(key, value)| (yaml_key(key), Self::from_yaml(value)))
                    .collect(),
            ),
            Yaml::Tagged(tagged) => {
                tracing::warn!(tag = %tagged.tag, "tagged YAML value has no form representation");
                Self::Unsupported(format!("tagged value {}", tagged.tag))
            }
        }
    }

    /// Get the classification tag
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Record(_) => ValueKind::Record,
            Self::List(_) => ValueKind::List,
            Self::Unsupported(_) => ValueKind::Unsupported,
        }
    }

    /// Record or list
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Record(_) | Self::List(_))
    }

    /// Number of children for composites
    #[must_use]
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Self::Record(record) => Some(record.len()),
            Self::List(items) => Some(items.len()),
            Self::Scalar(_) | Self::Unsupported(_) => None,
        }
    }

    /// Resolve a path relative to this value
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&FieldValue> {
        path.iter().try_fold(self, |current, step| match (current, step) {
            (Self::Record(record), PathStep::Key(key)) => record.get(key),
            (Self::List(items), PathStep::Index(index)) => items.get(*index),
            _ => None,
        })
    }

    /// Paths of every composite node at or below `base`, in document order
    ///
    /// Uses an explicit stack, so arbitrarily deep input is safe.
    #[must_use]
    pub fn composite_paths(&self, base: &NodePath) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut stack = vec![(base.clone(), self)];

        while let Some((path, value)) = stack.pop() {
            match value {
                Self::Record(record) => {
                    for (key, child) in record.iter().rev() {
                        stack.push((path.child_key(key.as_str()), child));
                    }
                    found.push(path);
                }
                Self::List(items) => {
                    for (index, child) in items.iter().enumerate().rev() {
                        stack.push((path.child_index(index), child));
                    }
                    found.push(path);
                }
                Self::Scalar(_) | Self::Unsupported(_) => {}
            }
        }

        found
    }

    /// Convert back to JSON; unsupported values become `null`
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(scalar) => scalar.to_json(),
            Self::Record(record) => Value::Object(
                record
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Unsupported(_) => Value::Null,
        }
    }
}

fn yaml_number(number: &serde_yaml::Number) -> FieldValue {
    let converted = if let Some(i) = number.as_i64() {
        Some(Number::from(i))
    } else if let Some(u) = number.as_u64() {
        Some(Number::from(u))
    } else {
        number.as_f64().and_then(Number::from_f64)
    };

    match converted {
        Some(n) => FieldValue::Scalar(Scalar::Number(n)),
        None => FieldValue::Unsupported(format!("non-finite number {number}")),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(text) => text.clone(),
        Yaml::Bool(flag) => flag.to_string(),
        Yaml::Number(number) => number.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_else(|_| "<key>".to_string()),
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        Self::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(Scalar::Text(text)) => serializer.serialize_str(text),
            Self::Scalar(Scalar::Number(number)) => number.serialize(serializer),
            Self::Scalar(Scalar::Bool(flag)) => serializer.serialize_bool(*flag),
            Self::Scalar(Scalar::Null) | Self::Unsupported(_) => serializer.serialize_unit(),
            Self::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
