// Application settings
// Loaded from ~/.config/sheetlens/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default insight endpoint: the backend's local development address.
/// Overridable via flag, environment, or this settings file; the client
/// itself never carries a URL.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:1000/analyze";

/// Persisted dark/light preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    #[default]
    Light,
}

impl ThemePreference {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemePreference::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // UI
    #[serde(rename = "ui.theme")]
    pub theme: ThemePreference,

    // Insight backend
    #[serde(rename = "insight.endpoint")]
    pub endpoint: String,

    #[serde(rename = "insight.timeoutSecs")]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetlens");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults.
    /// The preference store may be unavailable entirely; that is not an
    /// error the caller sees.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(path);
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // UI
    // "dark" or "light"
    "ui.theme": "light",

    // Insight backend
    "insight.endpoint": "http://127.0.0.1:1000/analyze",
    "insight.timeoutSecs": 30
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }
}
