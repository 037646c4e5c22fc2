//! Recursive renderer for nested form data
//!
//! Records and lists become collapsible sections whose toggles are bound to
//! their [`NodePath`]; scalars become `key: value` lines. Output depends only
//! on the value and the tracker snapshot, so identical inputs yield identical
//! instructions.

use crate::config::RenderConfig;
use crate::instruction::{CompositeKind, DisplayInstruction};
use crate::tracker::ExpansionTracker;
use formdesk_value::{FieldValue, FormSubmission, NodePath};

/// Structured field renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create renderer with configuration
    #[inline]
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every top-level field in insertion order
    #[must_use]
    pub fn render(
        &self,
        submission: &FormSubmission,
        tracker: &ExpansionTracker,
    ) -> Vec<DisplayInstruction> {
        let rendered: Vec<_> = submission
            .entries()
            .map(|(key, value)| self.render_value(value, &NodePath::key(key), key, tracker))
            .collect();

        tracing::debug!(
            fields = rendered.len(),
            open = tracker.open_count(),
            "rendered submission"
        );
        rendered
    }

    /// Render one value at `path` under `label`
    ///
    /// Children of open composites are rendered at `path` extended by their
    /// key or index. Composite list elements are labeled `"{label} - {n}"`
    /// with `n` 1-based; scalar list elements become bare value lines.
    #[must_use]
    pub fn render_value(
        &self,
        value: &FieldValue,
        path: &NodePath,
        label: &str,
        tracker: &ExpansionTracker,
    ) -> DisplayInstruction {
        match value {
            FieldValue::List(items) => {
                let open = tracker.is_open(path);
                let children = if open {
                    items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let item_path = path.child_index(index);
                            if item.is_composite() {
                                let item_label = format!(
                                    "{label}{}{}",
                                    self.config.list_label_separator,
                                    index + 1
                                );
                                self.render_value(item, &item_path, &item_label, tracker)
                            } else {
                                self.leaf(item, item_path, None)
                            }
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                DisplayInstruction::Composite {
                    path: path.clone(),
                    label: label.to_string(),
                    kind: CompositeKind::List,
                    open,
                    len: items.len(),
                    children,
                }
            }
            FieldValue::Record(record) => {
                let open = tracker.is_open(path);
                let children = if open {
                    record
                        .iter()
                        .map(|(key, child)| {
                            self.render_value(child, &path.child_key(key.as_str()), key, tracker)
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                DisplayInstruction::Composite {
                    path: path.clone(),
                    label: label.to_string(),
                    kind: CompositeKind::Record,
                    open,
                    len: record.len(),
                    children,
                }
            }
            FieldValue::Scalar(_) | FieldValue::Unsupported(_) => {
                self.leaf(value, path.clone(), Some(label.to_string()))
            }
        }
    }

    fn leaf(&self, value: &FieldValue, path: NodePath, label: Option<String>) -> DisplayInstruction {
        let text = match value {
            FieldValue::Scalar(scalar) => scalar
                .display_with(&self.config.null_placeholder)
                .into_owned(),
            FieldValue::Unsupported(description) => {
                tracing::warn!(%path, %description, "rendering unsupported value as placeholder");
                self.config.unsupported_placeholder.clone()
            }
            // Composite list elements never reach here
            FieldValue::Record(_) | FieldValue::List(_) => {
                self.config.unsupported_placeholder.clone()
            }
        };

        DisplayInstruction::Leaf { path, label, text }
    }
}

/// Render with the default configuration
#[must_use]
pub fn render(submission: &FormSubmission, tracker: &ExpansionTracker) -> Vec<DisplayInstruction> {
    Renderer::default().render(submission, tracker)
}
