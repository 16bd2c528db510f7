//! Shared test doubles for the publish-flow integration tests.
//!
//! `ScriptedService` stands in for the remote API: each operation pops its
//! next scripted result and records that it was called. `CapturingTracker`
//! collects the fire-and-forget tracking events so tests can assert on
//! them.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sharepost::share::{MediaMetadata, PostStatus};
use sharepost::site::Site;
use sharepost::ShareService;
use sharepost::tracker::Tracker;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn site(id: u64, name: &str) -> Site {
    Site {
        id,
        name: Some(name.to_string()),
        url: format!("https://{}.example.com", name),
        icon_url: None,
    }
}

/// Remote-service double with scripted results.
#[derive(Default)]
pub struct ScriptedService {
    fetch_results: Mutex<VecDeque<Result<Vec<Site>, String>>>,
    publish_results: Mutex<VecDeque<Result<(), String>>>,
    pub fetch_calls: AtomicUsize,
    pub plain_calls: AtomicUsize,
    pub media_calls: AtomicUsize,
    pub last_site_id: Mutex<Option<u64>>,
    pub last_media: Mutex<Vec<PathBuf>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_fetch(&self, result: Result<Vec<Site>, &str>) {
        self.fetch_results
            .lock()
            .unwrap()
            .push_back(result.map_err(String::from));
    }

    pub fn script_publish(&self, result: Result<(), &str>) {
        self.publish_results
            .lock()
            .unwrap()
            .push_back(result.map_err(String::from));
    }

    pub fn total_publish_calls(&self) -> usize {
        self.plain_calls.load(Ordering::SeqCst) + self.media_calls.load(Ordering::SeqCst)
    }

    fn next_publish_result(&self) -> Result<()> {
        self.publish_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
            .map_err(|e| anyhow!(e))
    }
}

#[async_trait]
impl ShareService for ScriptedService {
    async fn fetch_sites(&self) -> Result<Vec<Site>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
            .map_err(|e| anyhow!(e))
    }

    async fn save_and_upload_post(
        &self,
        _title: &str,
        _body: &str,
        _status: PostStatus,
        site_id: u64,
    ) -> Result<()> {
        self.plain_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_site_id.lock().unwrap() = Some(site_id);
        self.next_publish_result()
    }

    async fn upload_post_with_media(
        &self,
        _title: &str,
        _body: &str,
        _status: PostStatus,
        site_id: u64,
        media: &[(PathBuf, MediaMetadata)],
    ) -> Result<()> {
        self.media_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_site_id.lock().unwrap() = Some(site_id);
        *self.last_media.lock().unwrap() = media.iter().map(|(p, _)| p.clone()).collect();
        self.next_publish_result()
    }
}

/// Tracker double that captures every recorded event.
#[derive(Default)]
pub struct CapturingTracker {
    pub errors: Mutex<Vec<String>>,
    pub posted: Mutex<Vec<PostStatus>>,
}

impl CapturingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn posted_count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }
}

impl Tracker for CapturingTracker {
    fn record_error(&self, description: &str) {
        self.errors.lock().unwrap().push(description.to_string());
    }

    fn record_posted(&self, status: PostStatus) {
        self.posted.lock().unwrap().push(status);
    }
}
