//! Hover configuration
//!
//! This module re-exports shared types from hovers-types and provides
//! platform-specific defaults and persistence for HoverConfig.

use std::path::PathBuf;

pub use hovers_types::{Color, DEFAULT_HOVER_COLOR, HoverConfig, NameSourceKind};

use super::ConfigError;

const APP_NAME: &str = "item-hovers";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// `<config dir>/item-hovers/hovers`, or empty when the platform has no config dir
pub fn default_hovers_dir() -> String {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME).join("hovers"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// HoverConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for HoverConfig persistence and path helpers
pub trait HoverConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn hovers_path(&self) -> PathBuf;
    fn catalog_file(&self) -> Option<PathBuf>;
    fn symbol_table_file(&self) -> Option<PathBuf>;
}

impl HoverConfigExt for HoverConfig {
    fn load() -> Self {
        match confy::load::<HoverConfig>(APP_NAME, CONFIG_NAME) {
            Ok(mut config) => {
                if config.hovers_dir.is_empty() {
                    config.hovers_dir = default_hovers_dir();
                }
                config
            }
            Err(e) => {
                tracing::warn!(error = %ConfigError::from(e), "Falling back to default configuration");
                Self::load_with_defaults()
            }
        }
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        HoverConfig::with_hovers_dir(default_hovers_dir())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn hovers_path(&self) -> PathBuf {
        PathBuf::from(&self.hovers_dir)
    }

    fn catalog_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.catalog_path)
    }

    fn symbol_table_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.symbol_table_path)
    }
}

fn non_empty_path(path: &str) -> Option<PathBuf> {
    let path = path.trim();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_config_dir() {
        let config = HoverConfig::load_with_defaults();
        if let Some(base) = dirs::config_dir() {
            assert_eq!(config.hovers_path(), base.join("item-hovers").join("hovers"));
        }
        assert_eq!(config.default_color, DEFAULT_HOVER_COLOR);
    }

    #[test]
    fn blank_optional_paths_are_none() {
        let mut config = HoverConfig::with_hovers_dir("/tmp/hovers".to_string());
        assert_eq!(config.catalog_file(), None);

        config.catalog_path = "  ".to_string();
        config.symbol_table_path = "/data/items.toml".to_string();
        assert_eq!(config.catalog_file(), None);
        assert_eq!(
            config.symbol_table_file(),
            Some(PathBuf::from("/data/items.toml"))
        );
    }
}
