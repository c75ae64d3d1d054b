//! macOS platform implementation
//!
//! The menu bar is application-wide and must carry the standard app menu;
//! without an Edit menu the Cmd+C/V shortcuts do nothing in the webview.

use super::{spawn_opener, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::accelerator::Modifiers;
use muda::{Menu, PredefinedMenuItem, Submenu};
use std::process::Command;
use tao::window::Window;
use tracing::debug;

/// macOS platform manager
pub struct MacOSPlatform {
    capabilities: PlatformCapabilities,
}

impl MacOSPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                primary_modifier: Modifiers::META,
                app_wide_menu: true,
                platform_name: "macOS",
            },
        }
    }

    fn opener(url: &str) -> Command {
        let mut command = Command::new("open");
        command.arg(url);
        command
    }
}

impl Default for MacOSPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for MacOSPlatform {
    fn prepare_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let app_menu = Submenu::new("Chatpane", true);

        app_menu
            .append_items(&[
                &PredefinedMenuItem::about(Some("About Chatpane"), None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::services(None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::hide(None),
                &PredefinedMenuItem::hide_others(None),
                &PredefinedMenuItem::show_all(None),
            ])
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to build app menu: {}", e)))?;

        menu.append(&app_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append app menu: {}", e)))?;

        Ok(())
    }

    fn attach_menu(&self, _window: &Window, menu: &Menu) -> PlatformResult<()> {
        menu.init_for_nsapp();
        debug!("macOS menu initialized");
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
