//! UI-visibility state for the site-picker screen.
//!
//! Exactly one [`VisibilityState`] is active at a time; it decides which
//! overlay renders and whether the publish action can be enabled. All
//! mutation happens on the UI thread; async completions are marshalled
//! back through the app's event channel before they touch this state.

use crate::site::{SelectionState, SiteList};
use ratatui::widgets::ListState;

/// Which overlay the screen shows. Replaces the scattered show/hide calls
/// a view-per-state approach would need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Initial fetch in progress, loading overlay shown.
    #[default]
    Loading,
    /// Fetch completed with no sites, or the fetch failed.
    Empty,
    /// Sites available, list shown.
    Normal,
    /// Submission in flight, publishing overlay shown.
    Publishing,
    /// User abandoned a failed submission, cleanup in progress.
    Cancelling,
}

/// State owned by the site-picker screen.
#[derive(Debug, Default)]
pub struct SitePickerState {
    /// Candidate destination sites, server order.
    pub sites: SiteList,
    /// Cursor position in the sites list.
    pub list_state: ListState,
    /// Row currently rendered with a check mark.
    ///
    /// Kept separate from `selection` on purpose: the deselect gesture
    /// clears only this visual mark, never the underlying selection.
    pub checked: Option<usize>,
    /// The logical selection driving the publish action.
    pub selection: SelectionState,
    /// Active overlay.
    pub visibility: VisibilityState,
    /// A manual refresh is in progress; it shows its own indicator, so the
    /// loading overlay is suppressed while this is set.
    pub refreshing: bool,
    /// Failure message shown in the retry/cancel modal, when present.
    pub failure_message: Option<String>,
}

impl SitePickerState {
    pub fn new() -> Self {
        Self::default()
    }
}
