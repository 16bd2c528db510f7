//! Screen controllers.
//!
//! Screens own their state exclusively and communicate with the app
//! through [`ScreenAction`] values returned from event handling.

pub mod screen_trait;
pub mod site_picker;

pub use screen_trait::{RenderContext, Screen, ScreenAction};
pub use site_picker::SitePickerScreen;
