//! Server Configuration
//!
//! Operator-facing settings loaded from an optional `scss-lsp.json` file at
//! the workspace root. Missing or malformed files fall back to defaults.

use std::fs;
use std::path::Path;
use serde::Deserialize;

/// Name of the optional configuration file at the workspace root
pub const CONFIG_FILE_NAME: &str = "scss-lsp.json";

/// Configuration for the SCSS language server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Call names that are never reported as undefined (css built-ins)
    pub call_whitelist: Vec<String>,
    /// Directory names skipped during the workspace scan
    pub exclude_dirs: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            call_whitelist: [
                "url",
                "var",
                "translateY",
                "translateX",
                "calc",
                "linear-gradient",
                "repeat",
                "nth-child",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exclude_dirs: [".git", "build", "vendor", "contrib"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Load the configuration file from the given workspace root.
    ///
    /// A missing file is normal and returns defaults silently. A file that
    /// exists but does not parse is logged and also falls back to defaults,
    /// so a typo in the config never takes the server down.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
