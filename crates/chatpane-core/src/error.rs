//! Error types for Chatpane

use thiserror::Error;

/// Result type alias for Chatpane operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Main error type for Chatpane
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Failed to open externally: {0}")]
    ExternalOpenFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WebView error: {0}")]
    WebView(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Create a new malformed URL error
    pub fn malformed_url(raw: impl Into<String>) -> Self {
        Self::MalformedUrl(raw.into())
    }

    /// Create a new external open error
    pub fn external_open(msg: impl Into<String>) -> Self {
        Self::ExternalOpenFailed(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a new clipboard error
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Create a new WebView error
    pub fn webview(msg: impl Into<String>) -> Self {
        Self::WebView(msg.into())
    }

    /// Create a new window error
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }
}
