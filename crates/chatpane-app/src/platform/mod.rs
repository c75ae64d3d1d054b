//! Platform abstraction layer
//!
//! Unified interface for the operations that differ across macOS, Windows
//! and Linux: attaching the menu bar, handing URLs to the default browser,
//! and the modifier used for keyboard shortcuts.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "linux")]
mod linux;

use muda::accelerator::Modifiers;
use muda::Menu;
use tao::window::Window;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Platform-specific error types
#[derive(Debug, Clone)]
pub enum PlatformError {
    /// Menu initialization failed
    MenuInitFailed(String),
    /// Failed to open external URL
    OpenExternalFailed(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::MenuInitFailed(msg) => write!(f, "Menu initialization failed: {}", msg),
            PlatformError::OpenExternalFailed(msg) => write!(f, "Failed to open external: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Platform-specific capabilities
#[derive(Debug, Clone)]
pub struct PlatformCapabilities {
    /// Modifier for the primary shortcuts (Cmd on macOS, Ctrl elsewhere)
    pub primary_modifier: Modifiers,
    /// Whether the menu bar belongs to the application rather than a window
    pub app_wide_menu: bool,
    /// Platform name for logging/debugging
    pub platform_name: &'static str,
}

impl PlatformCapabilities {
    /// Whether a newly opened window needs the menu attached, given how many
    /// windows are already open. An app-wide menu is attached once.
    pub fn needs_menu_attach(&self, open_windows: usize) -> bool {
        !self.app_wide_menu || open_windows == 0
    }
}

/// Trait for platform-specific operations
pub trait PlatformManager {
    /// Add menus the platform expects before the shell's own (the macOS
    /// application menu)
    fn prepare_menu(&self, _menu: &Menu) -> PlatformResult<()> {
        Ok(())
    }

    /// Attach the menu bar to a window. Callers skip this for later windows
    /// when the menu is app-wide (see [`PlatformCapabilities::needs_menu_attach`]).
    fn attach_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()>;

    /// Open a URL with the system's default handler
    fn open_external(&self, url: &str) -> PlatformResult<()>;

    /// Get the platform's capabilities
    fn capabilities(&self) -> &PlatformCapabilities;

    /// Get the platform name for logging
    fn platform_name(&self) -> &'static str {
        self.capabilities().platform_name
    }
}

/// Get the platform manager for the current operating system
pub fn get_platform_manager() -> Box<dyn PlatformManager> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacOSPlatform::new())
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsPlatform::new())
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxPlatform::new())
    }
}

/// Spawn the opener without waiting for it; the browser may outlive us
pub(crate) fn spawn_opener(mut command: std::process::Command, url: &str) -> PlatformResult<()> {
    command
        .spawn()
        .map(|_| ())
        .map_err(|e| PlatformError::OpenExternalFailed(format!("{}: {}", url, e)))
}
