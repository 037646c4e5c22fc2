//! Expansion state
//!
//! Provides [`ExpansionTracker`], the open/closed flag of every composite
//! node in one display session. Nodes are keyed by [`NodePath`], so state
//! survives re-renders of unchanged data at every depth.

use formdesk_value::{FormSubmission, NodePath};
use std::collections::HashSet;

/// Open/closed flags for composite nodes, keyed by path
///
/// Unseen paths are closed. Create one per display session and drop it with
/// the session; it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    open: HashSet<NodePath>,
}

impl ExpansionTracker {
    /// Create tracker with every node closed
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a node is expanded
    #[inline]
    #[must_use]
    pub fn is_open(&self, path: &NodePath) -> bool {
        self.open.contains(path)
    }

    /// Flip one node's flag, returning the new state
    ///
    /// No other path is affected, including ancestors and descendants.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        let now_open = if self.open.remove(path) {
            false
        } else {
            self.open.insert(path.clone());
            true
        };
        tracing::trace!(%path, open = now_open, "toggled node");
        now_open
    }

    /// Expand a node
    pub fn open(&mut self, path: &NodePath) {
        self.open.insert(path.clone());
    }

    /// Collapse a node
    pub fn close(&mut self, path: &NodePath) {
        self.open.remove(path);
    }

    /// Collapse everything
    pub fn clear(&mut self) {
        self.open.clear();
    }

    /// Number of expanded nodes
    #[inline]
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Expanded paths in sorted order
    #[must_use]
    pub fn open_paths(&self) -> Vec<&NodePath> {
        let mut paths: Vec<_> = self.open.iter().collect();
        paths.sort();
        paths
    }

    /// Expand every composite node of a submission
    pub fn expand_all(&mut self, submission: &FormSubmission) {
        self.open.extend(submission.composite_paths());
    }

    /// Forget paths that no longer name a composite node in `submission`
    ///
    /// Returns the number of entries dropped.
    pub fn retain_existing(&mut self, submission: &FormSubmission) -> usize {
        let before = self.open.len();
        self.open
            .retain(|path| submission.get(path).is_some_and(|v| v.is_composite()));
        before - self.open.len()
    }
}
