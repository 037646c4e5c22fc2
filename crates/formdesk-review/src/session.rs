//! Review sessions
//!
//! A [`ReviewSession`] lives as long as one open review dialog. It owns a
//! snapshot of the request and a fresh [`ExpansionTracker`]; closing the
//! dialog drops both.

use crate::actions::{Decision, RejectionComment, RequestActions};
use crate::decorate::{decorator_for, ReviewView};
use crate::error::{ReviewError, ReviewResult};
use crate::request::{ProcessRequest, RequestStatus};
use formdesk_render::{ExpansionTracker, Renderer};
use formdesk_value::NodePath;

/// State of one open review dialog
#[derive(Debug, Clone)]
pub struct ReviewSession {
    request: ProcessRequest,
    tracker: ExpansionTracker,
    renderer: Renderer,
}

impl ReviewSession {
    /// Open a session with every section collapsed
    #[must_use]
    pub fn open(request: ProcessRequest, renderer: Renderer) -> Self {
        tracing::debug!(id = %request.id, status = %request.status, "opened review session");
        Self {
            request,
            tracker: ExpansionTracker::new(),
            renderer,
        }
    }

    /// Replace the expansion state, e.g. with sections opened up front
    #[must_use]
    pub fn with_tracker(mut self, tracker: ExpansionTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Request snapshot under review
    #[inline]
    #[must_use]
    pub fn request(&self) -> &ProcessRequest {
        &self.request
    }

    /// Current expansion state
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &ExpansionTracker {
        &self.tracker
    }

    /// Check whether a section is expanded
    #[inline]
    #[must_use]
    pub fn is_open(&self, path: &NodePath) -> bool {
        self.tracker.is_open(path)
    }

    /// Flip one section, returning its new state
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        self.tracker.toggle(path)
    }

    /// Expand every section
    pub fn expand_all(&mut self) {
        self.tracker.expand_all(&self.request.form_data);
    }

    /// Render and decorate the request for its status
    #[must_use]
    pub fn view(&self) -> ReviewView {
        let body = self.renderer.render(&self.request.form_data, &self.tracker);
        decorator_for(self.request.status).decorate(&self.request, body)
    }

    /// Approve through `actions`
    ///
    /// # Errors
    /// Returns error if the request is not pending or the data layer refuses
    pub fn approve(&mut self, actions: &mut impl RequestActions) -> ReviewResult<()> {
        self.ensure_pending()?;
        let decision = actions.approve(&self.request.id)?;
        self.record(RequestStatus::Approved, decision);
        Ok(())
    }

    /// Reject through `actions`; `comment` must not be blank
    ///
    /// # Errors
    /// Returns error if the comment is blank, the request is not pending, or
    /// the data layer refuses
    pub fn reject(&mut self, actions: &mut impl RequestActions, comment: &str) -> ReviewResult<()> {
        let comment = RejectionComment::new(comment)?;
        self.ensure_pending()?;
        let decision = actions.reject(&self.request.id, &comment)?;
        self.record(RequestStatus::Rejected, decision);
        self.request.rejection_comment = Some(comment.as_str().to_string());
        Ok(())
    }

    fn record(&mut self, status: RequestStatus, decision: Decision) {
        self.request.status = status;
        self.request.decided_at = Some(decision.at);
        self.request.decided_by = Some(decision.by);
    }

    fn ensure_pending(&self) -> ReviewResult<()> {
        if self.request.status == RequestStatus::Pending {
            Ok(())
        } else {
            Err(ReviewError::not_pending(&self.request.id, self.request.status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::ReviewAction;
    use crate::request::RequestId;
    use chrono::{DateTime, Utc};
    use formdesk_test_utils::sample_request;

    fn decided_at() -> DateTime<Utc> {
        "2024-03-01T12:00:00Z".parse().unwrap()
    }

    fn decision() -> Decision {
        Decision {
            at: decided_at(),
            by: "validator007".to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingActions {
        approved: Vec<RequestId>,
        rejected: Vec<(RequestId, String)>,
    }

    impl RequestActions for RecordingActions {
        fn approve(&mut self, id: &RequestId) -> ReviewResult<Decision> {
            self.approved.push(id.clone());
            Ok(decision())
        }

        fn reject(&mut self, id: &RequestId, comment: &RejectionComment) -> ReviewResult<Decision> {
            self.rejected.push((id.clone(), comment.to_string()));
            Ok(decision())
        }
    }

    fn session(status: &str) -> ReviewSession {
        let request = serde_json::from_value(sample_request(status)).unwrap();
        ReviewSession::open(request, Renderer::default())
    }

    #[test]
    fn new_session_is_collapsed() {
        let session = session("pending");
        assert_eq!(session.tracker().open_count(), 0);
        let view = session.view();
        assert!(view.body.iter().all(|i| !i.is_open()));
        assert_eq!(view.actions, vec![ReviewAction::Approve, ReviewAction::Reject]);
    }

    #[test]
    fn toggle_reflects_in_view() {
        let mut session = session("pending");
        let contact = NodePath::key("contactInfo");
        assert!(session.toggle(&contact));
        assert!(session.is_open(&contact));

        let view = session.view();
        let section = view.body.iter().find(|i| i.path() == &contact).unwrap();
        let lines: Vec<_> = section.children().iter().filter_map(|c| c.line()).collect();
        assert_eq!(lines, vec!["phone: +1234567890", "email: john.doe@company.com"]);
    }

    #[test]
    fn preset_tracker_is_used_for_view() {
        let mut tracker = ExpansionTracker::new();
        tracker.open(&NodePath::key("contactInfo"));
        let session = session("pending").with_tracker(tracker);
        let view = session.view();
        let section = view.body.iter().find(|i| i.path() == &NodePath::key("contactInfo")).unwrap();
        assert!(section.is_open());
    }

    #[test]
    fn approve_forwards_id_once() {
        let mut session = session("pending");
        let mut actions = RecordingActions::default();
        session.approve(&mut actions).unwrap();
        assert_eq!(actions.approved, vec![RequestId::from("REQ-1001")]);
        assert_eq!(session.view().title, "Approved Form Submission");
        assert_eq!(session.request().decided_at, Some(decided_at()));
        assert_eq!(session.request().decided_by.as_deref(), Some("validator007"));

        let again = session.approve(&mut actions);
        assert!(matches!(again, Err(ReviewError::NotPending { .. })));
        assert_eq!(actions.approved.len(), 1);
    }

    #[test]
    fn reject_requires_comment() {
        let mut session = session("pending");
        let mut actions = RecordingActions::default();
        assert_eq!(
            session.reject(&mut actions, "   "),
            Err(ReviewError::EmptyRejectionComment)
        );
        assert!(actions.rejected.is_empty());

        session.reject(&mut actions, "missing receipts").unwrap();
        assert_eq!(
            actions.rejected,
            vec![(RequestId::from("REQ-1001"), "missing receipts".to_string())]
        );
        assert_eq!(session.request().decided_by.as_deref(), Some("validator007"));
        let view = session.view();
        assert_eq!(view.footer.map(|f| f.text).as_deref(), Some("missing receipts"));
    }

    #[test]
    fn decided_sessions_offer_no_decisions() {
        let mut session = session("approved");
        let mut actions = RecordingActions::default();
        assert!(session.view().actions.is_empty());
        assert!(session.reject(&mut actions, "late").is_err());
        assert!(actions.rejected.is_empty());
    }
}
