//! Formdesk Review
//!
//! Validator-side review of submitted process requests.
//!
//! # Core Operations
//!
//! - **Open**: [`ReviewSession::open`] starts a dialog with all sections collapsed
//! - **View**: [`ReviewSession::view`] renders the form data and wraps it in
//!   the status decoration ([`decorator_for`])
//! - **Decide**: [`ReviewSession::approve`] / [`ReviewSession::reject`] forward
//!   to a [`RequestActions`] implementation such as [`RequestBoard`]
//!
//! # Architecture
//!
//! ```text
//! RequestBoard ──request──▶ ReviewSession ──render──▶ Renderer
//!      ▲                         │                       │
//!      └──approve/reject─────────┘◀──decorate── Decorator┘
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod actions;
pub mod board;
pub mod config;
pub mod decorate;
pub mod error;
pub mod request;
pub mod session;

// Re-exports for convenience
pub use actions::{Decision, RejectionComment, RequestActions};
pub use board::RequestBoard;
pub use config::ReviewConfig;
pub use decorate::{
    decorator_for, ApprovedDecorator, Decorator, Footer, PendingDecorator, RejectedDecorator,
    ReviewAction, ReviewView, StatusStyle,
};
pub use error::{ReviewError, ReviewResult};
pub use request::{ProcessRequest, RequestId, RequestStatus};
pub use session::ReviewSession;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for review hosts
    pub use crate::{
        ProcessRequest, RequestActions, RequestBoard, RequestId, RequestStatus, ReviewConfig,
        ReviewError, ReviewSession, ReviewView,
    };
    pub use formdesk_render::{DisplayInstruction, ExpansionTracker, Renderer};
    pub use formdesk_value::{FieldValue, FormSubmission, NodePath};
}
