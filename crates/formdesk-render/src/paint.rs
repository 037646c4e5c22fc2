//! Painters turning display instructions into terminal or JSON output

use crate::config::RenderConfig;
use crate::instruction::DisplayInstruction;
use std::fmt::Write as _;

/// Marker for an expanded section
pub const OPEN_MARKER: &str = "[-]";

/// Marker for a collapsed section
pub const CLOSED_MARKER: &str = "[+]";

/// Paint an indented outline, one node per line
///
/// Composite headers carry a toggle marker and their path, so a reader can
/// pass the path back to expand or collapse that section.
#[must_use]
pub fn paint_text(instructions: &[DisplayInstruction], config: &RenderConfig) -> String {
    let mut out = String::new();

    for (depth, instruction) in DisplayInstruction::walk(instructions) {
        let pad = " ".repeat(depth * config.indent);
        match instruction {
            DisplayInstruction::Composite {
                path,
                label,
                open,
                len,
                ..
            } => {
                let marker = if *open { OPEN_MARKER } else { CLOSED_MARKER };
                let _ = writeln!(out, "{pad}{marker} {label} ({len}) <{path}>");
            }
            DisplayInstruction::Leaf { .. } => {
                let line = instruction.line().unwrap_or_default();
                let _ = writeln!(out, "{pad}{line}");
            }
        }
    }

    out
}

/// Paint instructions as pretty-printed JSON
///
/// # Errors
/// Returns error if serialization fails
pub fn paint_json(instructions: &[DisplayInstruction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, ExpansionTracker};
    use formdesk_value::{FormSubmission, NodePath};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn text_outline() {
        let form = FormSubmission::from_json(&json!({
            "name": "John Doe",
            "contactInfo": {"phone": "+1234567890", "email": "john.doe@company.com"},
            "tags": []
        }))
        .unwrap();
        let mut tracker = ExpansionTracker::new();
        tracker.open(&NodePath::key("contactInfo"));

        let text = paint_text(&render(&form, &tracker), &RenderConfig::default());
        assert_eq!(
            text,
            "name: John Doe\n\
             [-] contactInfo (2) <contactInfo>\n\
             \x20 phone: +1234567890\n\
             \x20 email: john.doe@company.com\n\
             [+] tags (0) <tags>\n"
        );
    }

    #[test]
    fn json_output_is_tagged() {
        let form = FormSubmission::from_json(&json!({"a": [1]})).unwrap();
        let painted = paint_json(&render(&form, &ExpansionTracker::new())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&painted).unwrap();
        assert_eq!(
            parsed,
            json!([{
                "type": "composite",
                "path": "a",
                "label": "a",
                "kind": "list",
                "open": false,
                "len": 1,
                "children": []
            }])
        );
    }
}
