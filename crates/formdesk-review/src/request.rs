//! Process requests as the validator dashboard receives them

use crate::error::ReviewError;
use chrono::{DateTime, Utc};
use formdesk_value::FormSubmission;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request identifier (e.g. `REQ-1001`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Borrow as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Review status of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision
    Pending,
    /// Approved by a validator
    Approved,
    /// Rejected by a validator, with a comment
    Rejected,
}

impl RequestStatus {
    /// All statuses in dashboard tab order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ReviewError::UnknownStatus(s.to_string())),
        }
    }
}

/// Submitted process request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RequestRecord", into = "RequestRecord")]
pub struct ProcessRequest {
    /// Request identifier
    pub id: RequestId,
    /// Current status
    pub status: RequestStatus,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Submitting user
    pub submitted_by: String,
    /// Approval or rejection time
    pub decided_at: Option<DateTime<Utc>>,
    /// Deciding validator
    pub decided_by: Option<String>,
    /// Reason given on rejection
    pub rejection_comment: Option<String>,
    /// Form data the user filled in
    pub form_data: FormSubmission,
}

impl ProcessRequest {
    /// Create a pending request
    #[must_use]
    pub fn pending(
        id: impl Into<String>,
        submitted_by: impl Into<String>,
        created_at: DateTime<Utc>,
        form_data: FormSubmission,
    ) -> Self {
        Self {
            id: RequestId(id.into()),
            status: RequestStatus::Pending,
            created_at,
            submitted_by: submitted_by.into(),
            decided_at: None,
            decided_by: None,
            rejection_comment: None,
            form_data,
        }
    }
}

/// Wire shape used by the dashboard API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestRecord {
    id: RequestId,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    submitted_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejection_comment: Option<String>,
    #[serde(default)]
    form_data: FormSubmission,
}

impl From<RequestRecord> for ProcessRequest {
    fn from(record: RequestRecord) -> Self {
        let (decided_at, decided_by) = match record.status {
            RequestStatus::Pending => (None, None),
            RequestStatus::Approved => (record.approved_at, record.approved_by),
            RequestStatus::Rejected => (record.rejected_at, record.rejected_by),
        };

        Self {
            id: record.id,
            status: record.status,
            created_at: record.created_at,
            submitted_by: record.submitted_by,
            decided_at,
            decided_by,
            rejection_comment: record.rejection_comment,
            form_data: record.form_data,
        }
    }
}

impl From<ProcessRequest> for RequestRecord {
    fn from(request: ProcessRequest) -> Self {
        let approved = request.status == RequestStatus::Approved;
        let rejected = request.status == RequestStatus::Rejected;

        Self {
            id: request.id,
            status: request.status,
            created_at: request.created_at,
            submitted_by: request.submitted_by,
            approved_at: request.decided_at.filter(|_| approved),
            approved_by: request.decided_by.clone().filter(|_| approved),
            rejected_at: request.decided_at.filter(|_| rejected),
            rejected_by: request.decided_by.filter(|_| rejected),
            rejection_comment: request.rejection_comment,
            form_data: request.form_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdesk_test_utils::sample_request;
    use formdesk_value::FieldValue;

    #[test]
    fn status_parse_and_display() {
        assert_eq!("Rejected".parse::<RequestStatus>().unwrap(), RequestStatus::Rejected);
        assert_eq!(RequestStatus::Approved.to_string(), "approved");
        assert_eq!(
            "archived".parse::<RequestStatus>(),
            Err(ReviewError::UnknownStatus("archived".to_string()))
        );
    }

    #[test]
    fn deserialize_pending() {
        let request: ProcessRequest = serde_json::from_value(sample_request("pending")).unwrap();
        assert_eq!(request.id.as_str(), "REQ-1001");
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.decided_at.is_none());
        assert_eq!(request.form_data.len(), 9);
        assert!(request.form_data.field("contactInfo").is_some_and(FieldValue::is_composite));
    }

    #[test]
    fn deserialize_decisions() {
        let approved: ProcessRequest = serde_json::from_value(sample_request("approved")).unwrap();
        assert_eq!(approved.decided_by.as_deref(), Some("validator001"));
        assert!(approved.decided_at.is_some());

        let rejected: ProcessRequest = serde_json::from_value(sample_request("rejected")).unwrap();
        assert_eq!(rejected.decided_by.as_deref(), Some("validator002"));
        assert_eq!(
            rejected.rejection_comment.as_deref(),
            Some("Budget constraints - please find a lower-cost alternative")
        );
    }

    #[test]
    fn missing_form_data_is_empty() {
        let request: ProcessRequest = serde_json::from_value(serde_json::json!({
            "id": "REQ-1",
            "status": "pending",
            "createdAt": "2023-05-15T09:30:00Z",
            "submittedBy": "user1"
        }))
        .unwrap();
        assert!(request.form_data.is_empty());
    }

    #[test]
    fn serialize_restores_dashboard_shape() {
        let source = sample_request("rejected");
        let request: ProcessRequest = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap(), source);
    }
}
