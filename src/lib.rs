//! sharepost - a terminal share sheet for publishing to your sites
//!
//! This library provides the site selection state machine, the publish
//! submission flow, and the TUI that binds them together.

// Core modules
pub mod app;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod remote;
pub mod screens;
pub mod share;
pub mod site;
pub mod styles;
pub mod tracker;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use coordinator::{PublishCoordinator, PublishOutcome};
pub use remote::ShareService;
pub use share::{PostStatus, ShareData};
pub use site::{SelectionState, Site, SiteList};
pub use ui::VisibilityState;
