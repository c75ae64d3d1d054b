//! OS services used when a link cannot be handled in the window

use crate::platform::PlatformManager;
use chatpane_core::{ShellError, ShellResult};
use std::cell::RefCell;
use tracing::warn;

/// Operating system services the controller calls into
pub trait Desktop {
    /// Open a URL with the default handler
    fn open_external(&self, url: &str) -> ShellResult<()>;

    /// Put text on the system clipboard
    fn copy_to_clipboard(&self, text: &str) -> ShellResult<()>;

    /// Native notice, used when the page cannot show one
    fn notify(&self, title: &str, body: &str);
}

/// [`Desktop`] backed by the platform manager, `arboard` and `rfd`
pub struct SystemDesktop {
    platform: Box<dyn PlatformManager>,
    clipboard: RefCell<Option<arboard::Clipboard>>,
}

impl SystemDesktop {
    pub fn new(platform: Box<dyn PlatformManager>) -> Self {
        Self {
            platform,
            clipboard: RefCell::new(None),
        }
    }

    pub fn platform(&self) -> &dyn PlatformManager {
        self.platform.as_ref()
    }
}

impl Desktop for SystemDesktop {
    fn open_external(&self, url: &str) -> ShellResult<()> {
        self.platform
            .open_external(url)
            .map_err(|e| ShellError::external_open(e.to_string()))
    }

    fn copy_to_clipboard(&self, text: &str) -> ShellResult<()> {
        let mut slot = self.clipboard.borrow_mut();
        if slot.is_none() {
            *slot = Some(arboard::Clipboard::new().map_err(|e| ShellError::clipboard(e.to_string()))?);
        }

        match slot.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_owned())
                .map_err(|e| ShellError::clipboard(e.to_string())),
            None => Err(ShellError::clipboard("clipboard unavailable")),
        }
    }

    fn notify(&self, title: &str, body: &str) {
        warn!("{}: {}", title, body);
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(body)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
