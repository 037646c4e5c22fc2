//! Formdesk Renderer
//!
//! Renders arbitrarily nested form data as collapsible sections.
//!
//! # Core Operations
//!
//! - **Render**: [`render`] / [`Renderer::render`] turn a submission into
//!   [`DisplayInstruction`]s
//! - **Toggle**: [`ExpansionTracker::toggle`] flips one section by path
//! - **Paint**: [`paint_text`] and [`paint_json`] produce host output
//!
//! # Example
//!
//! ```rust
//! use formdesk_render::{render, ExpansionTracker};
//! use formdesk_value::{FormSubmission, NodePath};
//!
//! let form = FormSubmission::from_json_str(r#"{"a": {"b": {"c": "x"}}}"#).unwrap();
//! let mut tracker = ExpansionTracker::new();
//! tracker.toggle(&NodePath::key("a"));
//!
//! let out = render(&form, &tracker);
//! assert!(out[0].is_open());
//! assert!(!out[0].children()[0].is_open());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod instruction;
pub mod paint;
pub mod renderer;
pub mod tracker;

// Re-exports for convenience
pub use config::{ConfigError, RenderConfig};
pub use instruction::{CompositeKind, DisplayInstruction};
pub use paint::{paint_json, paint_text};
pub use renderer::{render, Renderer};
pub use tracker::ExpansionTracker;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
