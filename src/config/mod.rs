use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration (stored in ~/.config/kanban/)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// UI theme/colors
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Board startup settings
    #[serde(default)]
    pub board: BoardConfig,

    /// Log file settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Theme configuration with hex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Border color of the focused column (hex, e.g. "#FF00FF")
    #[serde(default = "default_color_focused")]
    pub color_focused: String,

    /// Border color of unfocused columns
    #[serde(default = "default_color_normal")]
    pub color_normal: String,

    /// Highlight of the selected task card
    #[serde(default = "default_color_selected")]
    pub color_selected: String,

    /// Text color for titles
    #[serde(default = "default_color_text")]
    pub color_text: String,

    /// Color for task descriptions
    #[serde(default = "default_color_description")]
    pub color_description: String,

    /// Color for hints and empty placeholders
    #[serde(default = "default_color_dimmed")]
    pub color_dimmed: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            color_focused: default_color_focused(),
            color_normal: default_color_normal(),
            color_selected: default_color_selected(),
            color_text: default_color_text(),
            color_description: default_color_description(),
            color_dimmed: default_color_dimmed(),
        }
    }
}

fn default_color_focused() -> String {
    "#FF00FF".to_string() // Magenta
}

fn default_color_normal() -> String {
    "#5cfff7".to_string() // Cyan
}

fn default_color_selected() -> String {
    "#ead49a".to_string() // Yellow
}

fn default_color_text() -> String {
    "#f2ece6".to_string()
}

fn default_color_description() -> String {
    "#C4B0AC".to_string()
}

fn default_color_dimmed() -> String {
    "#9C9991".to_string()
}

impl ThemeConfig {
    /// Parse a hex color string to RGB tuple
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Start with the built-in example tasks
    #[serde(default = "default_true")]
    pub seed_tasks: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { seed_tasks: true }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a file, falling back to defaults if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Write config to a file, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    /// Always uses ~/.config/kanban/ on all platforms
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("kanban").join("config.toml"))
    }

    /// Get the path to the data directory
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "kanban")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Directory the log file is written to
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
