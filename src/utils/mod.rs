pub mod list_navigation;

pub use list_navigation::ListStateExt;

use std::path::PathBuf;

/// Path of the config file under the platform config directory.
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sharepost")
        .join("config.toml")
}

/// Directory where attachments are staged before upload.
pub fn get_staging_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sharepost")
        .join("staging")
}

/// Center a popup of the given size within an area.
pub fn center_popup(area: ratatui::layout::Rect, width: u16, height: u16) -> ratatui::layout::Rect {
    use ratatui::layout::Rect;

    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
