//! Form submissions
//!
//! A [`FormSubmission`] is the top-level record a user filled in.

use crate::path::{NodePath, PathStep};
use crate::value::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level form data of a request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct FormSubmission {
    fields: Record,
}

impl FormSubmission {
    /// Create from an already classified record
    #[inline]
    #[must_use]
    pub fn new(fields: Record) -> Self {
        Self { fields }
    }

    /// Classify a JSON object
    ///
    /// # Errors
    /// Returns [`ValueError::NotARecord`] if `value` is not an object
    pub fn from_json(value: &Value) -> Result<Self, ValueError> {
        match FieldValue::from_json(value) {
            FieldValue::Record(fields) => Ok(Self { fields }),
            other => Err(ValueError::not_a_record(&other)),
        }
    }

    /// Parse and classify JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or its root is not an object
    pub fn from_json_str(text: &str) -> Result<Self, ValueError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Classify a YAML mapping
    ///
    /// # Errors
    /// Returns [`ValueError::NotARecord`] if `value` is not a mapping
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self, ValueError> {
        match FieldValue::from_yaml(value) {
            FieldValue::Record(fields) => Ok(Self { fields }),
            other => Err(ValueError::not_a_record(&other)),
        }
    }

    /// Parse and classify YAML text
    ///
    /// # Errors
    /// Returns error if the text is not YAML or its root is not a mapping
    pub fn from_yaml_str(text: &str) -> Result<Self, ValueError> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        Self::from_yaml(&value)
    }

    /// Top-level fields in insertion order
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Get a top-level field
    #[inline]
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Resolve a path from the submission root
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&FieldValue> {
        let (first, rest) = path.steps().split_first()?;
        let PathStep::Key(key) = first else {
            return None;
        };
        self.fields.get(key)?.get(&NodePath::from(rest))
    }

    /// Paths of every composite node below the root, in document order
    #[must_use]
    pub fn composite_paths(&self) -> Vec<NodePath> {
        self.entries()
            .flat_map(|(key, value)| value.composite_paths(&NodePath::key(key)))
            .collect()
    }

    /// Number of top-level fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were submitted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying record
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> &Record {
        &self.fields
    }

    /// Consume into a [`FieldValue::Record`]
    #[inline]
    #[must_use]
    pub fn into_value(self) -> FieldValue {
        FieldValue::Record(self.fields)
    }
}

impl TryFrom<Value> for FormSubmission {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl From<FormSubmission> for Value {
    fn from(submission: FormSubmission) -> Self {
        submission.into_value().to_json()
    }
}

impl FromIterator<(String, FieldValue)> for FormSubmission {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Errors ingesting form data
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Submission root is not a record
    #[error("form data must be an object, found {found}")]
    NotARecord {
        /// Kind of value found at the root
        found: String,
    },

    /// Malformed JSON text
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML text
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ValueError {
    fn not_a_record(value: &FieldValue) -> Self {
        let found = match value {
            FieldValue::List(_) => "list".to_string(),
            FieldValue::Scalar(_) => "scalar".to_string(),
            FieldValue::Unsupported(description) => description.clone(),
            FieldValue::Record(_) => "record".to_string(),
        };
        Self::NotARecord { found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_from_object() {
        let submission = FormSubmission::from_json(&json!({"name": "Jane", "cost": 1299.99})).unwrap();
        assert_eq!(submission.len(), 2);
        assert_eq!(submission.field("name"), Some(&FieldValue::text("Jane")));
    }

    #[test]
    fn submission_rejects_non_object() {
        let err = FormSubmission::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ValueError::NotARecord { ref found } if found == "list"));
        assert_eq!(err.to_string(), "form data must be an object, found list");
    }

    #[test]
    fn submission_from_invalid_text() {
        assert!(matches!(
            FormSubmission::from_json_str("{\"a\":"),
            Err(ValueError::Json(_))
        ));
    }

    #[test]
    fn submission_get_requires_key_first() {
        let submission = FormSubmission::from_json(&json!({"tags": ["a", "b"]})).unwrap();
        assert_eq!(
            submission.get(&NodePath::key("tags").child_index(1)),
            Some(&FieldValue::text("b"))
        );
        assert_eq!(submission.get(&NodePath::root().child_index(0)), None);
        assert_eq!(submission.get(&NodePath::root()), None);
    }

    #[test]
    fn submission_composite_paths_skip_root() {
        let submission =
            FormSubmission::from_json(&json!({"a": {"b": 1}, "c": 2, "d": [[]]})).unwrap();
        let paths: Vec<_> = submission
            .composite_paths()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, vec!["a", "d", "d[0]"]);
    }

    #[test]
    fn submission_deserializes_through_serde() {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(rename = "formData")]
            form_data: FormSubmission,
        }

        let envelope: Envelope =
            serde_json::from_str(r#"{"formData": {"z": 1, "a": {"b": null}}}"#).unwrap();
        let keys: Vec<_> = envelope.form_data.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);

        let bad: Result<Envelope, _> = serde_json::from_str(r#"{"formData": "oops"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn submission_from_yaml() {
        let submission = FormSubmission::from_yaml_str("name: Jane\nitems: [1, 2]\n").unwrap();
        assert_eq!(submission.len(), 2);
        assert!(FormSubmission::from_yaml_str("- 1\n- 2\n").is_err());
    }
}
