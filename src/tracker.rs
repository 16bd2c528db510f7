//! Fire-and-forget event tracking.
//!
//! The publish flow reports outcomes here without observing any result.
//! The default implementation writes to the log file; tests substitute a
//! capturing double.

use crate::share::PostStatus;
use tracing::{error, info};

/// Collaborator for recording publish outcomes and internal errors.
pub trait Tracker: Send + Sync {
    /// Record an internal or remote error. Not user-facing.
    fn record_error(&self, description: &str);

    /// Record a successful publish with the post status used.
    fn record_posted(&self, status: PostStatus);
}

/// Tracker that reports through the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn record_error(&self, description: &str) {
        error!("tracked error: {}", description);
    }

    fn record_posted(&self, status: PostStatus) {
        info!("tracked post: status={}", status);
    }
}
