//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + knowledge-base override):
//!   Windows: %APPDATA%\cs-helper\
//!   macOS:   ~/Library/Application Support/cs-helper/
//!   Linux:   ~/.config/cs-helper/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `cs_keywords.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the optional knowledge-base override.
    pub knowledge_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "cs-helper";

    /// Falls back to the current directory if the platform cannot provide a
    /// standard config path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self {
            settings_file: config_dir.join("settings.toml"),
            knowledge_file: config_dir.join("cs_keywords.json"),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
