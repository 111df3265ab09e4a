//! Shared configuration types for item hovers
//!
//! This crate contains serializable configuration types that are shared between
//! the hover engine (hovers-core) and its hosts (hovers-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

/// Light grey used when a hover does not specify its own color
pub const DEFAULT_HOVER_COLOR: Color = [238, 238, 238, 255];

// ─────────────────────────────────────────────────────────────────────────────
// Name Source
// ─────────────────────────────────────────────────────────────────────────────

/// Where the names used by `items` / `items_regex` targets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSourceKind {
    /// Display names read from the live item catalog ("Pineapple sapling")
    #[default]
    DisplayNames,
    /// Symbolic constant names from a versioned table ("PINEAPPLE_SAPLING")
    SymbolTable,
}

impl NameSourceKind {
    /// Get a user-friendly label for this source
    pub fn label(&self) -> &'static str {
        match self {
            Self::DisplayNames => "Display Names",
            Self::SymbolTable => "Symbol Table",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hover Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverConfig {
    /// Re-scan the hover directory when files in it change
    #[serde(default)]
    pub hot_reload: bool,

    /// Directory containing hover definition files
    #[serde(default)]
    pub hovers_dir: String,

    /// Text color used by the renderer when a hover has none of its own
    #[serde(default = "default_hover_color")]
    pub default_color: Color,

    /// Chat/REPL command that forces a reload of the hover directory
    #[serde(default = "default_reload_command")]
    pub reload_command: String,

    #[serde(default)]
    pub name_source: NameSourceKind,

    /// Item catalog file (TOML). Empty means no catalog.
    #[serde(default)]
    pub catalog_path: String,

    /// Symbol table file (TOML), only read for `NameSourceKind::SymbolTable`
    #[serde(default)]
    pub symbol_table_path: String,
}

fn default_hover_color() -> Color {
    DEFAULT_HOVER_COLOR
}

fn default_reload_command() -> String {
    "reloadhovers".to_string()
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self::with_hovers_dir(String::new())
    }
}

impl HoverConfig {
    /// Create a new HoverConfig with the specified hover directory.
    /// Other fields use their default values.
    pub fn with_hovers_dir(hovers_dir: String) -> Self {
        Self {
            hot_reload: false,
            hovers_dir,
            default_color: DEFAULT_HOVER_COLOR,
            reload_command: default_reload_command(),
            name_source: NameSourceKind::default(),
            catalog_path: String::new(),
            symbol_table_path: String::new(),
        }
    }

    /// Whether `line` is the configured reload command (surrounding whitespace ignored)
    pub fn is_reload_command(&self, line: &str) -> bool {
        !self.reload_command.is_empty() && line.trim() == self.reload_command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = HoverConfig::with_hovers_dir("/tmp/hovers".to_string());
        assert_eq!(config.hovers_dir, "/tmp/hovers");
        assert!(!config.hot_reload);
        assert_eq!(config.default_color, DEFAULT_HOVER_COLOR);
        assert_eq!(config.reload_command, "reloadhovers");
        assert_eq!(config.name_source, NameSourceKind::DisplayNames);
    }

    #[test]
    fn reload_command_matches_trimmed_line() {
        let config = HoverConfig::default();
        assert!(config.is_reload_command("  reloadhovers "));
        assert!(!config.is_reload_command("reload"));

        let disabled = HoverConfig {
            reload_command: String::new(),
            ..HoverConfig::default()
        };
        assert!(!disabled.is_reload_command(""));
    }
}
