//! Application event loop.
//!
//! Single UI thread: the loop below is the only place that touches screen
//! state. The async collaborators (site fetch, publish) run on the tokio
//! runtime and report back through an mpsc channel; their completions are
//! applied between draws, never from the worker threads.

use crate::config::Config;
use crate::coordinator::{PublishCoordinator, PublishOutcome};
use crate::remote::{CmsClient, ShareService};
use crate::screens::{RenderContext, Screen, ScreenAction, SitePickerScreen};
use crate::share::ShareData;
use crate::site::Site;
use crate::tracker::{LogTracker, Tracker};
use crate::tui::Tui;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// Completions marshalled back onto the UI thread.
enum AppEvent {
    SitesFetched(Vec<Site>),
    SitesFetchFailed(String),
    PublishFinished(PublishOutcome),
}

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    share: ShareData,
    service: Arc<dyn ShareService>,
    coordinator: PublishCoordinator,
    runtime: Runtime,
    tui: Tui,
    screen: SitePickerScreen,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(share: ShareData) -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config = Config::load_or_create(&config_path)?;

        let token = config.token().unwrap_or_default();
        let service: Arc<dyn ShareService> =
            Arc::new(CmsClient::new(config.api_base.clone(), token));
        let tracker: Arc<dyn Tracker> = Arc::new(LogTracker);
        let coordinator = PublishCoordinator::new(Arc::clone(&service), tracker);

        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let tui = Tui::new()?;
        let (events_tx, events_rx) = mpsc::channel();

        Ok(Self {
            config,
            config_path,
            share,
            service,
            coordinator,
            runtime,
            tui,
            screen: SitePickerScreen::new(),
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.reload();

        // Main event loop
        loop {
            self.drain_completions();
            self.draw()?;

            if self.should_quit {
                break;
            }

            // Poll for events with 250ms timeout
            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                let action = self.screen.handle_event(event)?;
                self.apply_action(action);
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let config = &self.config;
        let share = &self.share;
        let screen = &mut self.screen;
        self.tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            let ctx = RenderContext::new(config, share);
            let _ = screen.render(frame, area, &ctx);
        })?;
        Ok(())
    }

    /// Re-render immediately if sites are already loaded; otherwise start
    /// the fetch.
    fn reload(&mut self) {
        if self.screen.sites_loaded() {
            return;
        }
        self.start_fetch(false);
    }

    /// Manual refresh: drop current sites, re-render the empty table, and
    /// fetch again with the refresh indicator instead of the loading
    /// overlay.
    fn refresh(&mut self) {
        self.screen.clear_and_refresh();
        self.start_fetch(true);
    }

    fn start_fetch(&mut self, manual: bool) {
        self.screen.begin_loading(manual);
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let event = match service.fetch_sites().await {
                Ok(sites) => AppEvent::SitesFetched(sites),
                Err(e) => AppEvent::SitesFetchFailed(format!("{e:#}")),
            };
            let _ = tx.send(event);
        });
    }

    /// Apply async completions on the UI thread.
    fn drain_completions(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::SitesFetched(sites) => {
                    self.screen
                        .apply_fetch_success(sites, self.config.last_used_site_id);
                }
                AppEvent::SitesFetchFailed(message) => {
                    warn!("Site fetch failed: {}", message);
                    self.screen.apply_fetch_failure();
                }
                AppEvent::PublishFinished(PublishOutcome::Posted) => {
                    info!("Post uploaded, dismissing");
                    self.should_quit = true;
                }
                AppEvent::PublishFinished(PublishOutcome::Failed(message)) => {
                    self.screen.show_failure(message);
                }
            }
        }
    }

    fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::Submit | ScreenAction::Retry => self.start_publish(),
            ScreenAction::CancelPublish => {
                self.screen.set_cancelling();
                self.coordinator.cancel(&self.share);
                self.should_quit = true;
            }
            ScreenAction::Refresh => self.refresh(),
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::None => {}
        }
    }

    /// Validate and start a submission. A configuration error leaves the
    /// screen untouched; a started submission flips it into Publishing
    /// until the completion arrives.
    fn start_publish(&mut self) {
        let token = self.config.token().unwrap_or_default();
        let selection = self.screen.selection().clone();

        let Some(site_id) =
            self.coordinator
                .begin(&token, &selection, &mut self.config, &self.config_path)
        else {
            return;
        };

        self.screen.set_publishing();

        let coordinator = self.coordinator.clone();
        let share = self.share.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = coordinator.publish(&share, site_id).await;
            let _ = tx.send(AppEvent::PublishFinished(outcome));
        });
    }
}
