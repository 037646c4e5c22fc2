//! In-memory request board
//!
//! Holds the per-status request lists together with the fetch lifecycle
//! flags a host shows (spinner while loading, alert on error). Decisions move
//! requests between lists.

use crate::actions::{Decision, RejectionComment, RequestActions};
use crate::error::{ReviewError, ReviewResult};
use crate::request::{ProcessRequest, RequestId, RequestStatus};
use chrono::Utc;
use std::collections::HashSet;

/// Requests grouped by status, plus fetch state
#[derive(Debug, Clone)]
pub struct RequestBoard {
    validator: String,
    pending: Vec<ProcessRequest>,
    approved: Vec<ProcessRequest>,
    rejected: Vec<ProcessRequest>,
    adopted: HashSet<RequestId>,
    loading: bool,
    error: Option<String>,
}

impl RequestBoard {
    /// Create empty board; decisions are stamped with `validator`
    #[must_use]
    pub fn new(validator: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            pending: Vec::new(),
            approved: Vec::new(),
            rejected: Vec::new(),
            adopted: HashSet::new(),
            loading: false,
            error: None,
        }
    }

    /// Validator recorded on decisions
    #[inline]
    #[must_use]
    pub fn validator(&self) -> &str {
        &self.validator
    }

    /// Mark a fetch as started; clears any previous error
    pub fn begin_fetch(&mut self, status: RequestStatus) {
        tracing::debug!(%status, "fetching requests");
        self.loading = true;
        self.error = None;
    }

    /// Store fetched requests for one status
    ///
    /// Replaces the list for `status`. Requests whose own status differs are
    /// filed under their own status and survive a later fetch of that status
    /// that does not return them. Each id is listed once; the latest fetch
    /// wins.
    pub fn finish_fetch(&mut self, status: RequestStatus, requests: Vec<ProcessRequest>) {
        tracing::debug!(%status, count = requests.len(), "fetched requests");
        let (matching, misfiled): (Vec<_>, Vec<_>) =
            requests.into_iter().partition(|r| r.status == status);

        for request in &matching {
            self.adopted.remove(&request.id);
        }
        for other in RequestStatus::ALL.into_iter().filter(|s| *s != status) {
            self.list_mut(other)
                .retain(|r| !matching.iter().any(|m| m.id == r.id));
        }
        let previous = std::mem::replace(self.list_mut(status), matching);
        let carried: Vec<_> = previous
            .into_iter()
            .filter(|r| self.adopted.contains(&r.id))
            .collect();
        self.list_mut(status).extend(carried);

        for request in misfiled {
            tracing::warn!(id = %request.id, expected = %status, actual = %request.status, "request filed under its own status");
            self.file(request);
        }
        self.loading = false;
    }

    /// Record a failed fetch
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "request fetch failed");
        self.loading = false;
        self.error = Some(message);
    }

    /// Check whether a fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last fetch error, if any
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Requests with a status
    #[must_use]
    pub fn requests(&self, status: RequestStatus) -> &[ProcessRequest] {
        match status {
            RequestStatus::Pending => &self.pending,
            RequestStatus::Approved => &self.approved,
            RequestStatus::Rejected => &self.rejected,
        }
    }

    /// Find a request by id in any list
    #[must_use]
    pub fn find(&self, id: &RequestId) -> Option<&ProcessRequest> {
        RequestStatus::ALL
            .iter()
            .flat_map(|status| self.requests(*status))
            .find(|request| &request.id == id)
    }

    fn list_mut(&mut self, status: RequestStatus) -> &mut Vec<ProcessRequest> {
        match status {
            RequestStatus::Pending => &mut self.pending,
            RequestStatus::Approved => &mut self.approved,
            RequestStatus::Rejected => &mut self.rejected,
        }
    }

    fn file(&mut self, request: ProcessRequest) {
        for status in RequestStatus::ALL {
            self.list_mut(status).retain(|r| r.id != request.id);
        }
        self.adopted.insert(request.id.clone());
        self.list_mut(request.status).push(request);
    }

    fn stamp(&self, request: &mut ProcessRequest, status: RequestStatus) -> Decision {
        let decision = Decision {
            at: Utc::now(),
            by: self.validator.clone(),
        };
        request.status = status;
        request.decided_at = Some(decision.at);
        request.decided_by = Some(decision.by.clone());
        decision
    }

    fn take_pending(&mut self, id: &RequestId) -> ReviewResult<ProcessRequest> {
        if let Some(position) = self.pending.iter().position(|r| &r.id == id) {
            self.adopted.remove(id);
            return Ok(self.pending.remove(position));
        }
        match self.find(id) {
            Some(request) => Err(ReviewError::not_pending(id, request.status)),
            None => Err(ReviewError::NotFound(id.clone())),
        }
    }
}

impl RequestActions for RequestBoard {
    fn approve(&mut self, id: &RequestId) -> ReviewResult<Decision> {
        let mut request = self.take_pending(id)?;
        let decision = self.stamp(&mut request, RequestStatus::Approved);
        tracing::info!(%id, validator = %self.validator, "request approved");
        self.approved.push(request);
        Ok(decision)
    }

    fn reject(&mut self, id: &RequestId, comment: &RejectionComment) -> ReviewResult<Decision> {
        let mut request = self.take_pending(id)?;
        let decision = self.stamp(&mut request, RequestStatus::Rejected);
        request.rejection_comment = Some(comment.as_str().to_string());
        tracing::info!(%id, validator = %self.validator, "request rejected");
        self.rejected.push(request);
        Ok(decision)
    }
}
