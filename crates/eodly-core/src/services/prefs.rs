//! Theme preference persistence

use crate::error::Result;
use crate::models::Theme;
use crate::store::{keys, StorageArea};

/// Load the persisted theme, defaulting to light
pub fn theme(store: &dyn StorageArea) -> Theme {
    match store.load(keys::THEME) {
        Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("[prefs] Discarding unreadable theme: {}", e);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            log::warn!("[prefs] Failed to read theme: {}", e);
            Theme::default()
        }
    }
}

/// Persist the theme preference
pub fn set_theme(store: &dyn StorageArea, theme: Theme) -> Result<()> {
    let value = serde_json::to_value(theme)?;
    store.save(keys::THEME, &value)
}
