//! Configuration file support for sided
//!
//! Config file location: `~/.config/sided/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! view_mode = "split"
//! hide_unchanged = false
//! line_numbers = true
//!
//! [ui.colors]
//! delete = "#3b1d1d"
//! insert = "#1d3b22"
//! replace = "#3b361d"
//!
//! [export]
//! format = "unified"
//! context = 3
//! directory = "~/diffs"
//!
//! [files]
//! extensions = [".cfg", ".conf", ".txt"]
//! page_size = 40
//! ```

use ratatui::style::Color;
use serde::Deserialize;
use sided_core::{ExportFormat, DEFAULT_CONTEXT, DEFAULT_EXTENSIONS};
use std::path::PathBuf;
use std::str::FromStr;

/// Row background colors, as names or `#rrggbb`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub delete: String,
    pub insert: String,
    pub replace: String,
    pub empty: String,
    pub line_number: String,
    pub marker: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            delete: "#4b1f24".to_string(),
            insert: "#1f4b2c".to_string(),
            replace: "#4b431f".to_string(),
            empty: "#262626".to_string(),
            line_number: "darkgray".to_string(),
            marker: "cyan".to_string(),
        }
    }
}

/// Resolved theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub delete_bg: Color,
    pub insert_bg: Color,
    pub replace_bg: Color,
    pub empty_bg: Color,
    pub line_number: Color,
    pub marker: Color,
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        tracing::warn!(value, "invalid color in config, using default");
        fallback
    })
}

impl ColorsConfig {
    pub fn resolve(&self) -> Theme {
        let defaults = Theme::default();
        Theme {
            delete_bg: parse_color(&self.delete, defaults.delete_bg),
            insert_bg: parse_color(&self.insert, defaults.insert_bg),
            replace_bg: parse_color(&self.replace, defaults.replace_bg),
            empty_bg: parse_color(&self.empty, defaults.empty_bg),
            line_number: parse_color(&self.line_number, defaults.line_number),
            marker: parse_color(&self.marker, defaults.marker),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            delete_bg: Color::Rgb(0x4b, 0x1f, 0x24),
            insert_bg: Color::Rgb(0x1f, 0x4b, 0x2c),
            replace_bg: Color::Rgb(0x4b, 0x43, 0x1f),
            empty_bg: Color::Rgb(0x26, 0x26, 0x26),
            line_number: Color::DarkGray,
            marker: Color::Cyan,
        }
    }
}

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Default view mode: "split" or "merged"
    pub view_mode: Option<String>,
    /// Start with unchanged rows hidden
    pub hide_unchanged: bool,
    /// Show line number gutters
    pub line_numbers: bool,
    pub colors: ColorsConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            view_mode: None,
            hide_unchanged: false,
            line_numbers: true,
            colors: ColorsConfig::default(),
        }
    }
}

/// Export configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Context lines around unified hunks
    pub context: usize,
    /// Directory for exports from the TUI (defaults to the working directory)
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Unified,
            context: DEFAULT_CONTEXT,
            directory: None,
        }
    }
}

impl ExportConfig {
    /// Export directory with a leading `~` expanded
    pub fn resolved_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => match dir.strip_prefix("~") {
                Ok(rest) => dirs::home_dir()
                    .map(|home| home.join(rest))
                    .unwrap_or_else(|| dir.clone()),
                Err(_) => dir.clone(),
            },
            None => PathBuf::from("."),
        }
    }
}

/// Files listing configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub extensions: Vec<String>,
    /// Entries per page in `--list` output
    pub page_size: usize,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            page_size: 40,
        }
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub export: ExportConfig,
    pub files: FilesConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG_CONFIG_HOME (if set)
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("sided").join("config.toml"));
        }

        // 2. ~/.config/sided/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("sided").join("config.toml"));
        }

        // 3. Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("sided").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Parse config text, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        toml::from_str(content)
            .map_err(|e| {
                eprintln!("Warning: Failed to parse config: {}", e);
                tracing::warn!(error = %e, "failed to parse config");
                e
            })
            .unwrap_or_default()
    }

    /// Parse view mode string to ViewMode enum
    pub fn parse_view_mode(&self) -> Option<crate::app::ViewMode> {
        self.ui.view_mode.as_ref().and_then(|s| match s.as_str() {
            "split" | "sbs" => Some(crate::app::ViewMode::Split),
            "merged" | "unified" => Some(crate::app::ViewMode::Merged),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewMode;

    #[test]
    fn test_defaults() {
        let config = Config::parse("");
        assert!(config.ui.line_numbers);
        assert!(!config.ui.hide_unchanged);
        assert_eq!(config.export.format, ExportFormat::Unified);
        assert_eq!(config.export.context, 3);
        assert_eq!(config.files.extensions.len(), DEFAULT_EXTENSIONS.len());
        assert_eq!(config.parse_view_mode(), None);
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::parse(
            r##"
            [ui]
            view_mode = "merged"
            hide_unchanged = true

            [ui.colors]
            delete = "red"
            insert = "#00ff00"

            [export]
            format = "merged"
            context = 1
            directory = "/tmp/diffs"
            "##,
        );
        assert_eq!(config.parse_view_mode(), Some(ViewMode::Merged));
        assert!(config.ui.hide_unchanged);
        assert_eq!(config.export.format, ExportFormat::Merged);
        assert_eq!(config.export.resolved_directory(), PathBuf::from("/tmp/diffs"));

        let theme = config.ui.colors.resolve();
        assert_eq!(theme.delete_bg, Color::Red);
        assert_eq!(theme.insert_bg, Color::Rgb(0, 255, 0));
        assert_eq!(theme.replace_bg, Theme::default().replace_bg);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let config = Config::parse("[ui.colors]\ndelete = \"not-a-color\"\n");
        assert_eq!(config.ui.colors.resolve().delete_bg, Theme::default().delete_bg);
    }

    #[test]
    fn test_invalid_toml_uses_defaults() {
        let config = Config::parse("[ui\nview_mode = 3");
        assert_eq!(config.export.context, DEFAULT_CONTEXT);
    }

    #[test]
    fn test_home_directory_expansion() {
        let export = ExportConfig {
            directory: Some(PathBuf::from("~/diffs")),
            ..ExportConfig::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(export.resolved_directory(), home.join("diffs"));
        }
    }
}
