//! Display instructions produced by the renderer

use formdesk_value::NodePath;
use serde::Serialize;

/// Which kind of composite a section renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeKind {
    /// Record with named entries
    Record,
    /// List with positional elements
    List,
}

/// One unit of renderer output
///
/// Hosts paint composites as collapsible sections with a toggle bound to
/// `path`, and leaves as a single line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayInstruction {
    /// Collapsible section for a record or list
    Composite {
        /// Node identity; the toggle target
        path: NodePath,
        /// Header text
        label: String,
        /// Record or list
        kind: CompositeKind,
        /// Whether children are shown
        open: bool,
        /// Number of entries or elements, shown or not
        len: usize,
        /// Rendered children; empty while closed
        children: Vec<DisplayInstruction>,
    },
    /// Single line of text
    Leaf {
        /// Node identity
        path: NodePath,
        /// Field name; `None` for bare list elements
        label: Option<String>,
        /// Presented value
        text: String,
    },
}

impl DisplayInstruction {
    /// Node identity
    #[must_use]
    pub fn path(&self) -> &NodePath {
        match self {
            Self::Composite { path, .. } | Self::Leaf { path, .. } => path,
        }
    }

    /// Header or field label
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Composite { label, .. } => Some(label),
            Self::Leaf { label, .. } => label.as_deref(),
        }
    }

    /// Check if this is a collapsible section
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite { .. })
    }

    /// Open flag; always `false` for leaves
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Composite { open: true, .. })
    }

    /// Rendered children (empty for leaves and closed sections)
    #[must_use]
    pub fn children(&self) -> &[DisplayInstruction] {
        match self {
            Self::Composite { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    /// Leaf text as one line: `key: value`, or the bare value for list elements
    #[must_use]
    pub fn line(&self) -> Option<String> {
        match self {
            Self::Leaf {
                label: Some(label),
                text,
                ..
            } => Some(format!("{label}: {text}")),
            Self::Leaf { label: None, text, .. } => Some(text.clone()),
            Self::Composite { .. } => None,
        }
    }

    /// Depth-first walk of `instructions`, yielding each node with its depth
    #[must_use]
    pub fn walk(instructions: &[DisplayInstruction]) -> Vec<(usize, &DisplayInstruction)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, &DisplayInstruction)> =
            instructions.iter().rev().map(|i| (0, i)).collect();

        while let Some((depth, instruction)) = stack.pop() {
            out.push((depth, instruction));
            for child in instruction.children().iter().rev() {
                stack.push((depth + 1, child));
            }
        }

        out
    }

    /// Find the instruction rendered for `path`
    #[must_use]
    pub fn find<'a>(
        instructions: &'a [DisplayInstruction],
        path: &NodePath,
    ) -> Option<&'a DisplayInstruction> {
        Self::walk(instructions)
            .into_iter()
            .map(|(_, instruction)| instruction)
            .find(|instruction| instruction.path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: NodePath, label: Option<&str>, text: &str) -> DisplayInstruction {
        DisplayInstruction::Leaf {
            path,
            label: label.map(str::to_string),
            text: text.to_string(),
        }
    }

    #[test]
    fn leaf_lines() {
        assert_eq!(
            leaf(NodePath::key("note"), Some("note"), "").line().as_deref(),
            Some("note: ")
        );
        assert_eq!(
            leaf(NodePath::key("tags").child_index(0), None, "red").line().as_deref(),
            Some("red")
        );
    }

    #[test]
    fn walk_is_preorder_with_depth() {
        let tags = NodePath::key("tags");
        let tree = vec![
            DisplayInstruction::Composite {
                path: tags.clone(),
                label: "tags".into(),
                kind: CompositeKind::List,
                open: true,
                len: 2,
                children: vec![
                    leaf(tags.child_index(0), None, "a"),
                    leaf(tags.child_index(1), None, "b"),
                ],
            },
            leaf(NodePath::key("x"), Some("x"), "1"),
        ];

        let walked: Vec<_> = DisplayInstruction::walk(&tree)
            .into_iter()
            .map(|(depth, i)| (depth, i.path().to_string()))
            .collect();
        assert_eq!(
            walked,
            vec![
                (0, "tags".to_string()),
                (1, "tags[0]".to_string()),
                (1, "tags[1]".to_string()),
                (0, "x".to_string()),
            ]
        );

        let found = DisplayInstruction::find(&tree, &tags.child_index(1)).unwrap();
        assert_eq!(found.line().as_deref(), Some("b"));
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_value(leaf(NodePath::key("a"), Some("a"), "1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "leaf", "path": "a", "label": "a", "text": "1"})
        );
    }
}
