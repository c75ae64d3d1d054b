//! Windows platform implementation
//!
//! Each top-level window owns its menu bar, attached through the HWND.

use super::{spawn_opener, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::accelerator::Modifiers;
use muda::Menu;
use std::process::Command;
use tao::window::Window;
use tracing::debug;

/// Windows platform manager
pub struct WindowsPlatform {
    capabilities: PlatformCapabilities,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                primary_modifier: Modifiers::CONTROL,
                app_wide_menu: false,
                platform_name: "Windows",
            },
        }
    }

    /// URLs come from untrusted pages and must never reach cmd.exe, where
    /// `&`, `|` and `^` are command syntax
    fn opener(url: &str) -> Command {
        let mut command = Command::new("rundll32");
        command.args(["url.dll,FileProtocolHandler", url]);
        command
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for WindowsPlatform {
    fn attach_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        use tao::platform::windows::WindowExtWindows;
        unsafe {
            menu.init_for_hwnd(window.hwnd() as _)
                .map_err(|e| PlatformError::MenuInitFailed(format!("HWND init failed: {}", e)))?;
        }

        debug!("Windows menu attached");
        Ok(())
    }

    fn open_external(&self, url: &str) -> PlatformResult<()> {
        debug!("Opening external URL: {}", url);
        spawn_opener(Self::opener(url), url)
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}
