//! Formdesk Value Model
//!
//! Typed form-submission data with positional node identity.
//!
//! # Core Concepts
//!
//! - [`FieldValue`]: Tagged union over scalar, record and list values
//! - [`FormSubmission`]: Top-level record a user filled in
//! - [`NodePath`]: Canonical identity of a node, derived from its position
//!
//! # Example
//!
//! ```rust
//! use formdesk_value::{FieldValue, FormSubmission, NodePath};
//!
//! let submission = FormSubmission::from_json_str(
//!     r#"{"contactInfo": {"email": "john.doe@company.com"}}"#,
//! ).unwrap();
//!
//! let path: NodePath = "contactInfo.email".parse().unwrap();
//! assert_eq!(submission.get(&path), Some(&FieldValue::text("john.doe@company.com")));
//! ```

#![warn(unreachable_pub)]

mod path;
mod submission;
mod value;

pub use path::{NodePath, PathError, PathStep};
pub use submission::{FormSubmission, ValueError};
pub use value::{format_number, FieldValue, Record, Scalar, ValueKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
