//! Status-specific decoration around renderer output
//!
//! The renderer knows nothing about request status. Each status supplies a
//! [`Decorator`] that wraps the rendered body with its own title, palette,
//! footer and actions.

use crate::request::{ProcessRequest, RequestStatus};
use formdesk_render::DisplayInstruction;
use serde::Serialize;

/// Palette for one status, as used by the request table and review card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    /// Card accent (`None` for the neutral pending card)
    pub accent: Option<&'static str>,
    /// Background of expanded section content
    pub content_background: Option<&'static str>,
    /// Status chip background
    pub chip_background: &'static str,
    /// Status chip text
    pub chip_text: &'static str,
    /// Status chip border
    pub chip_border: &'static str,
}

impl StatusStyle {
    /// Palette for a status
    #[must_use]
    pub fn for_status(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => Self {
                accent: None,
                content_background: None,
                chip_background: "#FFF3E0",
                chip_text: "#EF6C00",
                chip_border: "#EF6C0020",
            },
            RequestStatus::Approved => Self {
                accent: Some("green"),
                content_background: Some("white"),
                chip_background: "#E8F5E9",
                chip_text: "#2E7D32",
                chip_border: "#2E7D3220",
            },
            RequestStatus::Rejected => Self {
                accent: Some("red"),
                content_background: Some("white"),
                chip_background: "#FFEBEE",
                chip_text: "#D32F2F",
                chip_border: "#D32F2F20",
            },
        }
    }
}

/// User-triggered action offered by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Approve the request
    Approve,
    /// Reject the request; requires a comment
    Reject,
}

/// Labeled block below the rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Ribbon label
    pub label: String,
    /// Footer text
    pub text: String,
}

/// Fully decorated review card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    /// Card heading
    pub title: &'static str,
    /// Status palette
    pub style: StatusStyle,
    /// Rendered form data
    pub body: Vec<DisplayInstruction>,
    /// Optional footer block
    pub footer: Option<Footer>,
    /// Offered actions, in button order
    pub actions: Vec<ReviewAction>,
}

/// Wraps rendered form data in status-specific chrome
pub trait Decorator: Send + Sync {
    /// Status this decorator serves
    fn status(&self) -> RequestStatus;

    /// Build the card for `request` around `body`
    fn decorate(&self, request: &ProcessRequest, body: Vec<DisplayInstruction>) -> ReviewView;
}

/// Review card with approve/reject buttons
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingDecorator;

impl Decorator for PendingDecorator {
    fn status(&self) -> RequestStatus {
        RequestStatus::Pending
    }

    fn decorate(&self, _request: &ProcessRequest, body: Vec<DisplayInstruction>) -> ReviewView {
        ReviewView {
            title: "Form Submission Review",
            style: StatusStyle::for_status(RequestStatus::Pending),
            body,
            footer: None,
            actions: vec![ReviewAction::Approve, ReviewAction::Reject],
        }
    }
}

/// Read-only card for approved requests
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovedDecorator;

impl Decorator for ApprovedDecorator {
    fn status(&self) -> RequestStatus {
        RequestStatus::Approved
    }

    fn decorate(&self, _request: &ProcessRequest, body: Vec<DisplayInstruction>) -> ReviewView {
        ReviewView {
            title: "Approved Form Submission",
            style: StatusStyle::for_status(RequestStatus::Approved),
            body,
            footer: None,
            actions: Vec::new(),
        }
    }
}

/// Read-only card for rejected requests, showing the rejection comment
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectedDecorator;

impl Decorator for RejectedDecorator {
    fn status(&self) -> RequestStatus {
        RequestStatus::Rejected
    }

    fn decorate(&self, request: &ProcessRequest, body: Vec<DisplayInstruction>) -> ReviewView {
        let footer = request
            .rejection_comment
            .as_deref()
            .filter(|comment| !comment.is_empty())
            .map(|comment| Footer {
                label: "Rejection Comment".to_string(),
                text: comment.to_string(),
            });

        ReviewView {
            title: "Rejected Form Submission",
            style: StatusStyle::for_status(RequestStatus::Rejected),
            body,
            footer,
            actions: Vec::new(),
        }
    }
}

/// Decorator for a status
#[must_use]
pub fn decorator_for(status: RequestStatus) -> &'static dyn Decorator {
    match status {
        RequestStatus::Pending => &PendingDecorator,
        RequestStatus::Approved => &ApprovedDecorator,
        RequestStatus::Rejected => &RejectedDecorator,
    }
}
