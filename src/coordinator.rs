//! Publish submission coordinator.
//!
//! Owns the submit flow: precondition checks, the choice between the plain
//! and the with-media upload path, and outcome reporting. Visibility-state
//! transitions stay with the screen; the coordinator only decides whether a
//! submission starts and how it ends.
//!
//! State machine: Idle → Publishing → Success (dismiss)
//!                                  → Failed (modal) → Idle (retry)
//!                                                   → Cancelling → dismiss
//!
//! There is no automatic retry or backoff; every retry is user-initiated,
//! and the publish action stays disabled while a submission is in flight,
//! so at most one attempt runs at a time.

use crate::config::Config;
use crate::remote::ShareService;
use crate::share::ShareData;
use crate::site::SelectionState;
use crate::tracker::Tracker;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Terminal outcome of a started submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The post was accepted; the screen should dismiss.
    Posted,
    /// The remote call failed; the screen should offer retry or cancel.
    Failed(String),
}

/// Orchestrates the submit flow against the service and tracker seams.
#[derive(Clone)]
pub struct PublishCoordinator {
    service: Arc<dyn ShareService>,
    tracker: Arc<dyn Tracker>,
}

impl PublishCoordinator {
    pub fn new(service: Arc<dyn ShareService>, tracker: Arc<dyn Tracker>) -> Self {
        Self { service, tracker }
    }

    /// Validate submission preconditions and record the chosen site.
    ///
    /// A missing credential or missing selection is a configuration error:
    /// it is reported to the tracker, no network call is attempted, and no
    /// user-facing alert is shown. Returns the site id to publish to when
    /// the submission may proceed.
    ///
    /// Persisting the last-used site is best-effort and deliberately not
    /// part of the success/failure path.
    pub fn begin(
        &self,
        token: &str,
        selection: &SelectionState,
        config: &mut Config,
        config_path: &Path,
    ) -> Option<u64> {
        let site_id = match selection.selected_site_id {
            Some(id) => id,
            None => {
                self.tracker
                    .record_error("publish submitted without a selected site");
                return None;
            }
        };

        if token.trim().is_empty() {
            self.tracker
                .record_error("publish submitted without an auth credential");
            return None;
        }

        config.remember_site(site_id, selection.selected_site_name.clone());
        if let Err(e) = config.save(config_path) {
            warn!("Failed to persist last-used site: {:#}", e);
        }

        Some(site_id)
    }

    /// Run the upload. Chooses the with-media path iff the shared content
    /// carries at least one staged attachment.
    pub async fn publish(&self, share: &ShareData, site_id: u64) -> PublishOutcome {
        let result = self.upload(share, site_id).await;

        match result {
            Ok(()) => {
                info!("Publish to site {} succeeded", site_id);
                self.tracker.record_posted(share.status);
                PublishOutcome::Posted
            }
            Err(e) => {
                let description = format!("publish to site {} failed: {:#}", site_id, e);
                self.tracker.record_error(&description);
                PublishOutcome::Failed(e.to_string())
            }
        }
    }

    async fn upload(&self, share: &ShareData, site_id: u64) -> Result<()> {
        if share.has_media() {
            self.service
                .upload_post_with_media(
                    &share.title,
                    &share.body,
                    share.status,
                    site_id,
                    &share.media(),
                )
                .await
        } else {
            self.service
                .save_and_upload_post(&share.title, &share.body, share.status, site_id)
                .await
        }
    }

    /// Abandon a failed submission: remove any staged shared-content
    /// storage. Does not cancel in-flight network calls; it only runs after
    /// a failure has already been reported.
    pub fn cancel(&self, share: &ShareData) {
        info!("Publish abandoned by user, cleaning up staged content");
        share.cleanup_staging();
    }
}
