//! Shell configuration

use crate::error::{ShellError, ShellResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "chatpane";

/// How a host is compared against the trusted domain list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginMatching {
    /// Host equals a trusted domain or is a dot-subdomain of one
    #[default]
    Suffix,
    /// Host contains a trusted domain anywhere. Accepts crafted hosts such as
    /// `openai.com.attacker.net`.
    Contains,
}

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Page loaded into every new window
    pub start_url: String,

    /// Window title
    pub title: String,

    /// First-party domains; navigation to these stays in the window
    pub trusted_origins: Vec<String>,

    /// Matching mode for `trusted_origins`
    pub origin_matching: OriginMatching,

    /// Where the window state file lives
    pub data_dir: PathBuf,

    /// Inject the monospace font stylesheet at document start
    pub inject_font: bool,

    /// Allow the developer tools to be opened
    pub devtools: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: "https://chat.openai.com".to_string(),
            title: "ChatGPT".to_string(),
            trusted_origins: vec![
                "openai.com".to_string(),
                "chatgpt.com".to_string(),
                "oaistatic.com".to_string(),
                "oaiusercontent.com".to_string(),
            ],
            origin_matching: OriginMatching::default(),
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
            inject_font: true,
            devtools: true,
        }
    }
}

impl ShellConfig {
    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join("config.json")
    }

    /// Load configuration from the given path, returning defaults if the file
    /// is missing or cannot be parsed
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> ShellResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ShellError::config(format!("invalid config {:?}: {}", path, e)))
    }

    /// Path of the persisted window state
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join("window-state.json")
    }
}
