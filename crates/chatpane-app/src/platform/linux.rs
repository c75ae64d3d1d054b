//! Linux platform implementation
//!
//! The menu bar lives in tao's GTK vbox. External links go through
//! `xdg-open`, which reports handler failures only after it has been spawned.

use super::{spawn_opener, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use muda::accelerator::Modifiers;
use muda::Menu;
use std::process::Command;
use tao::window::Window;
use tracing::{debug, warn};

/// Linux platform manager
pub struct LinuxPlatform {
    capabilities: PlatformCapabilities,
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                primary_modifier: Modifiers::CONTROL,
                app_wide_menu: false,
                platform_name: "Linux",
            },
        }
    }

    fn opener(url: &str) -> Command {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for LinuxPlatform {
    fn attach_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        use tao::platform::unix::WindowExtUnix;

        // The vbox is missing in headless environments; the menu is optional there
        match window.default_vbox() {
            Some(vbox) => {
                menu.init_for_gtk_window(window.gtk_window(), Some(vbox))
                    .map_err(|e| PlatformError::MenuInitFailed(format!("GTK init failed: {}", e)))?;
                debug!("Linux menu attached");
            }
            None => warn!("GTK container not available for menu initialization"),
        }

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
