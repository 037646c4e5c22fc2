//! Input loading for the terminal host

use anyhow::{bail, Context, Result};
use formdesk_review::{ProcessRequest, RequestBoard, RequestStatus};
use formdesk_value::FormSubmission;
use serde_json::Value;
use std::path::Path;

/// What a render input file contains
#[derive(Debug)]
pub(crate) enum RenderInput {
    /// Full request, decorated by status
    Request(Box<ProcessRequest>),
    /// Bare form data
    Form(FormSubmission),
}

impl RenderInput {
    pub(crate) fn form_data(&self) -> &FormSubmission {
        match self {
            Self::Request(request) => &request.form_data,
            Self::Form(form) => form,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"))
}

/// Load a request or bare form data from JSON or YAML
pub(crate) fn load_render_input(path: &Path) -> Result<RenderInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    if is_yaml(path) {
        let value: serde_yaml::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing YAML in {}", path.display()))?;
        if value.get("formData").is_some() {
            let request = serde_yaml::from_value(value).context("decoding request")?;
            return Ok(RenderInput::Request(Box::new(request)));
        }
        return Ok(RenderInput::Form(FormSubmission::from_yaml(&value)?));
    }

    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing JSON in {}", path.display()))?;
    if value.get("formData").is_some() {
        let request = serde_json::from_value(value).context("decoding request")?;
        return Ok(RenderInput::Request(Box::new(request)));
    }
    Ok(RenderInput::Form(FormSubmission::from_json(&value)?))
}

/// Load a board from a request array or an object keyed by status
pub(crate) fn load_board(path: &Path, validator: &str) -> Result<RequestBoard> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing JSON in {}", path.display()))?;

    let mut board = RequestBoard::new(validator);
    match value {
        Value::Array(_) => {
            let requests: Vec<ProcessRequest> =
                serde_json::from_value(value).context("decoding requests")?;
            for status in RequestStatus::ALL {
                let matching = requests.iter().filter(|r| r.status == status).cloned().collect();
                board.finish_fetch(status, matching);
            }
        }
        Value::Object(mut by_status) => {
            for status in RequestStatus::ALL {
                let Some(list) = by_status.remove(status.as_str()) else {
                    continue;
                };
                let requests: Vec<ProcessRequest> = serde_json::from_value(list)
                    .with_context(|| format!("decoding {status} requests"))?;
                board.finish_fetch(status, requests);
            }
        }
        _ => bail!("expected a request array or an object keyed by status"),
    }
    Ok(board)
}

/// Board contents keyed by status, in the shape [`load_board`] accepts
pub(crate) fn board_snapshot(board: &RequestBoard) -> Result<Value> {
    let mut out = serde_json::Map::new();
    for status in RequestStatus::ALL {
        out.insert(
            status.as_str().to_string(),
            serde_json::to_value(board.requests(status))?,
        );
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_review::RequestId;
    use formdesk_test_utils::{sample_request, sample_requests, sample_requests_json};
    use std::io::Write;

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn json_request_is_detected() {
        let file = temp_file(".json", &sample_request("rejected").to_string());
        let input = load_render_input(file.path()).unwrap();
        assert!(matches!(input, RenderInput::Request(ref r) if r.status == RequestStatus::Rejected));
        assert_eq!(input.form_data().len(), 8);
    }

    #[test]
    fn bare_form_data() {
        let file = temp_file(".json", r#"{"a": {"b": 1}}"#);
        let input = load_render_input(file.path()).unwrap();
        assert!(matches!(input, RenderInput::Form(_)));
    }

    #[test]
    fn yaml_form_data() {
        let file = temp_file(".yaml", "name: Jane\nitems:\n  - x\n  - y\n");
        let input = load_render_input(file.path()).unwrap();
        assert_eq!(input.form_data().len(), 2);
    }

    #[test]
    fn non_object_is_an_error() {
        let file = temp_file(".json", "[1, 2]");
        let err = load_render_input(file.path()).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn board_from_keyed_object_and_array() {
        let keyed = temp_file(".json", &sample_requests_json().to_string());
        let board = load_board(keyed.path(), "v").unwrap();
        assert_eq!(board.requests(RequestStatus::Pending).len(), 2);
        assert_eq!(board.requests(RequestStatus::Rejected).len(), 1);

        let array = temp_file(".json", &sample_requests("pending").to_string());
        let board = load_board(array.path(), "v").unwrap();
        assert!(board.find(&RequestId::from("REQ-1002")).is_some());
        assert!(board.requests(RequestStatus::Approved).is_empty());
    }

    #[test]
    fn request_under_wrong_status_key_is_kept() {
        let keyed = serde_json::json!({
            "pending": sample_requests("rejected"),
            "rejected": []
        });
        let file = temp_file(".json", &keyed.to_string());
        let board = load_board(file.path(), "v").unwrap();
        let request = board.find(&RequestId::from("REQ-0802")).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        assert!(board.requests(RequestStatus::Pending).is_empty());
    }

    #[test]
    fn snapshot_reloads() {
        let keyed = temp_file(".json", &sample_requests_json().to_string());
        let board = load_board(keyed.path(), "v").unwrap();
        let snapshot = board_snapshot(&board).unwrap();
        assert_eq!(snapshot, sample_requests_json());
    }
}
