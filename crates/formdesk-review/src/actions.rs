//! Validator decision contract
//!
//! Hosts forward approve/reject clicks through [`RequestActions`]; the data
//! layer behind it is free to be remote or in-memory.

use crate::error::{ReviewError, ReviewResult};
use crate::request::RequestId;
use chrono::{DateTime, Utc};
use std::fmt;

/// Non-empty reason for rejecting a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionComment(String);

impl RejectionComment {
    /// Validate a comment; surrounding whitespace is trimmed
    ///
    /// # Errors
    /// Returns [`ReviewError::EmptyRejectionComment`] for blank text
    pub fn new(text: impl AsRef<str>) -> ReviewResult<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReviewError::EmptyRejectionComment);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When and by whom a decision was recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Decision time
    pub at: DateTime<Utc>,
    /// Deciding validator
    pub by: String,
}

/// Decisions a validator can take on a pending request
pub trait RequestActions {
    /// Approve a request
    ///
    /// # Errors
    /// Returns error if the request is unknown or not pending
    fn approve(&mut self, id: &RequestId) -> ReviewResult<Decision>;

    /// Reject a request with a reason
    ///
    /// # Errors
    /// Returns error if the request is unknown or not pending
    fn reject(&mut self, id: &RequestId, comment: &RejectionComment) -> ReviewResult<Decision>;
}
