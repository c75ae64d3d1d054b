//! IPC between the hosted page and the shell
//!
//! The page talks to Rust through `window.ipc.postMessage` with JSON bodies
//! tagged by `cmd`. The bridge exposes a deliberately small surface.

use serde::Deserialize;

/// IPC message from JavaScript to Rust
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IpcMessage {
    /// Open a link in the system browser
    OpenExternal { url: String },
    /// Flip always-on-top for the calling window
    ToggleAlwaysOnTop,
}

impl IpcMessage {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// JavaScript bridge injected into every document
pub const JS_BRIDGE: &str = r#"
(function() {
    if (window.chatpane) {
        return;
    }

    const post = (message) => window.ipc.postMessage(JSON.stringify(message));

    window.chatpane = Object.freeze({
        openExternal: (url) => post({ cmd: 'open_external', url: String(url) }),
        toggleAlwaysOnTop: () => post({ cmd: 'toggle_always_on_top' }),
    });
})();
"#;
