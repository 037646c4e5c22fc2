//! Error types for validator review
//!
//! Covers:
//! - Decision preconditions (pending status, non-empty rejection comment)
//! - Request lookup
//! - Status parsing

use crate::request::{RequestId, RequestStatus};

/// Errors during review and decision operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    /// Rejection attempted without a reason
    #[error("rejection comment must not be empty")]
    EmptyRejectionComment,

    /// Decision attempted on a request that was already decided
    #[error("request {id} is {status}, only pending requests can be decided")]
    NotPending {
        /// Request that was targeted
        id: RequestId,
        /// Its current status
        status: RequestStatus,
    },

    /// No request with this id is known
    #[error("request not found: {0}")]
    NotFound(RequestId),

    /// Status text is not one of pending/approved/rejected
    #[error("unknown request status: '{0}'")]
    UnknownStatus(String),
}

impl ReviewError {
    /// Create not-pending error
    pub fn not_pending(id: &RequestId, status: RequestStatus) -> Self {
        Self::NotPending {
            id: id.clone(),
            status,
        }
    }
}

/// Result type alias for review operations
pub type ReviewResult<T> = Result<T, ReviewError>;
