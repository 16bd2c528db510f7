//! Screen trait and associated types.
//!
//! Screens own their state; event handling returns an action instead of
//! mutating shared state, and context objects give read-only access to
//! resources owned by the app.

use crate::config::Config;
use crate::share::ShareData;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
    /// The content being shared.
    pub share: &'a ShareData,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, share: &'a ShareData) -> Self {
        Self { config, share }
    }
}

/// Actions a screen can return after handling an event.
///
/// The app interprets these; screens never start network calls or touch
/// the runtime themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// No action needed, stay as is.
    None,
    /// Start a publish submission.
    Submit,
    /// Re-submit after a failure ("Try again").
    Retry,
    /// Abandon a failed submission ("Nevermind"): cleanup, then dismiss.
    CancelPublish,
    /// Manually refresh the site list.
    Refresh,
    /// Dismiss the screen without publishing.
    Quit,
}

impl Default for ScreenAction {
    fn default() -> Self {
        Self::None
    }
}

/// Trait for screen controllers.
pub trait Screen {
    /// Render the screen into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event and return the resulting action.
    fn handle_event(&mut self, event: Event) -> Result<ScreenAction>;
}
