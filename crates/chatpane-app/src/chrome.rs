//! Menu bar and keyboard shortcuts
//!
//! The menu is a view of the window controller: check marks and the window
//! list are re-synced from [`ChromeFlags`] after every change, and each item
//! maps to a [`ChromeCommand`] handled in the event loop.

use crate::platform::{PlatformCapabilities, PlatformError, PlatformManager, PlatformResult};
use chatpane_core::types::ShellWindowId;
use muda::accelerator::{Accelerator, Code, Modifiers};
use muda::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};

/// Menu item IDs
pub mod menu_ids {
    pub const RELOAD: &str = "reload";
    pub const TOGGLE_DEVTOOLS: &str = "toggle_devtools";
    pub const TOGGLE_THEME: &str = "toggle_theme";
    pub const ALWAYS_ON_TOP: &str = "always_on_top";
    pub const SPLIT_VIEW: &str = "split_view";
    pub const QUIT: &str = "quit";
    pub const WINDOW_PREFIX: &str = "window:";
}

/// User-facing command behind a menu item or shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeCommand {
    Reload,
    ToggleDevtools,
    ToggleTheme,
    ToggleAlwaysOnTop,
    SplitView,
    Quit,
    FocusWindow(ShellWindowId),
}

impl ChromeCommand {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            menu_ids::RELOAD => Some(Self::Reload),
            menu_ids::TOGGLE_DEVTOOLS => Some(Self::ToggleDevtools),
            menu_ids::TOGGLE_THEME => Some(Self::ToggleTheme),
            menu_ids::ALWAYS_ON_TOP => Some(Self::ToggleAlwaysOnTop),
            menu_ids::SPLIT_VIEW => Some(Self::SplitView),
            menu_ids::QUIT => Some(Self::Quit),
            other => other
                .strip_prefix(menu_ids::WINDOW_PREFIX)
                .and_then(|raw| raw.parse().ok())
                .map(|n| Self::FocusWindow(ShellWindowId(n))),
        }
    }
}

/// Flags the menu mirrors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeFlags {
    /// Always-on-top state of the focused window
    pub always_on_top: bool,
    pub theme_enabled: bool,
}

/// One open window as listed in the Window menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowListing {
    pub id: ShellWindowId,
    pub label: String,
    pub focused: bool,
}

/// Description of a menu item, independent of the toolkit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub accelerator: Option<Accelerator>,
    /// `Some` for check items
    pub checked: Option<bool>,
}

impl MenuEntry {
    fn item(id: &str, label: &str, accelerator: Option<Accelerator>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            accelerator,
            checked: None,
        }
    }

    fn check(id: &str, label: &str, checked: bool, accelerator: Option<Accelerator>) -> Self {
        Self {
            checked: Some(checked),
            ..Self::item(id, label, accelerator)
        }
    }
}

fn shortcut(primary: Modifiers, shift: bool, code: Code) -> Option<Accelerator> {
    let modifiers = if shift {
        primary | Modifiers::SHIFT
    } else {
        primary
    };
    Some(Accelerator::new(Some(modifiers), code))
}

/// Items of the File menu
pub fn file_entries(primary: Modifiers) -> Vec<MenuEntry> {
    vec![
        MenuEntry::item(
            menu_ids::SPLIT_VIEW,
            "Split View",
            shortcut(primary, true, Code::KeyN),
        ),
        MenuEntry::item(menu_ids::QUIT, "Quit", shortcut(primary, false, Code::KeyQ)),
    ]
}

/// Items of the View menu
pub fn view_entries(primary: Modifiers, flags: &ChromeFlags) -> Vec<MenuEntry> {
    vec![
        MenuEntry::item(menu_ids::RELOAD, "Reload", shortcut(primary, false, Code::KeyR)),
        MenuEntry::item(
            menu_ids::TOGGLE_DEVTOOLS,
            "Toggle Developer Tools",
            shortcut(primary, true, Code::KeyI),
        ),
        MenuEntry::check(
            menu_ids::TOGGLE_THEME,
            "Theme",
            flags.theme_enabled,
            shortcut(primary, true, Code::KeyD),
        ),
        MenuEntry::check(
            menu_ids::ALWAYS_ON_TOP,
            "Always on Top",
            flags.always_on_top,
            shortcut(primary, true, Code::KeyT),
        ),
    ]
}

/// Items of the Window menu, one per open window
pub fn window_entries(windows: &[WindowListing]) -> Vec<MenuEntry> {
    windows
        .iter()
        .map(|w| {
            MenuEntry::check(
                &format!("{}{}", menu_ids::WINDOW_PREFIX, w.id.0),
                &w.label,
                w.focused,
                None,
            )
        })
        .collect()
}

fn menu_err(what: &str) -> impl Fn(muda::Error) -> PlatformError + '_ {
    move |e| PlatformError::MenuInitFailed(format!("Failed to add {}: {}", what, e))
}

/// The live menu bar
pub struct ShellMenu {
    menu: Menu,
    theme_item: CheckMenuItem,
    always_on_top_item: CheckMenuItem,
    window_menu: Submenu,
    window_items: Vec<CheckMenuItem>,
}

impl ShellMenu {
    /// Build the menu bar for the current flags and window list
    pub fn build(
        platform: &dyn PlatformManager,
        flags: &ChromeFlags,
        windows: &[WindowListing],
    ) -> PlatformResult<Self> {
        let caps: &PlatformCapabilities = platform.capabilities();
        let primary = caps.primary_modifier;
        let menu = Menu::new();
        platform.prepare_menu(&menu)?;

        let file_menu = Submenu::new("File", true);
        for entry in file_entries(primary) {
            if entry.id == menu_ids::QUIT {
                file_menu
                    .append(&PredefinedMenuItem::separator())
                    .map_err(menu_err("separator"))?;
            }
            file_menu
                .append(&plain_item(&entry))
                .map_err(menu_err(&entry.label))?;
        }
        menu.append(&file_menu).map_err(menu_err("File menu"))?;

        let edit_menu = Submenu::new("Edit", true);
        edit_menu
            .append_items(&[
                &PredefinedMenuItem::undo(None),
                &PredefinedMenuItem::redo(None),
                &PredefinedMenuItem::separator(),
                &PredefinedMenuItem::cut(None),
                &PredefinedMenuItem::copy(None),
                &PredefinedMenuItem::paste(None),
                &PredefinedMenuItem::select_all(None),
            ])
            .map_err(menu_err("Edit items"))?;
        menu.append(&edit_menu).map_err(menu_err("Edit menu"))?;

        let view_menu = Submenu::new("View", true);
        let mut theme_item = None;
        let mut always_on_top_item = None;
        for entry in view_entries(primary, flags) {
            match entry.checked {
                Some(_) => {
                    let item = check_item(&entry);
                    view_menu.append(&item).map_err(menu_err(&entry.label))?;
                    if entry.id == menu_ids::TOGGLE_THEME {
                        theme_item = Some(item);
                    } else {
                        always_on_top_item = Some(item);
                    }
                }
                None => {
                    view_menu
                        .append(&plain_item(&entry))
                        .map_err(menu_err(&entry.label))?;
                }
            }
        }
        menu.append(&view_menu).map_err(menu_err("View menu"))?;

        let window_menu = Submenu::new("Window", true);
        menu.append(&window_menu).map_err(menu_err("Window menu"))?;

        let (Some(theme_item), Some(always_on_top_item)) = (theme_item, always_on_top_item) else {
            return Err(PlatformError::MenuInitFailed(
                "View menu is missing its check items".to_string(),
            ));
        };

        let mut shell_menu = Self {
            menu,
            theme_item,
            always_on_top_item,
            window_menu,
            window_items: Vec::new(),
        };
        shell_menu.sync(flags, windows);
        Ok(shell_menu)
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Reflect the controller's current state
    pub fn sync(&mut self, flags: &ChromeFlags, windows: &[WindowListing]) {
        self.theme_item.set_checked(flags.theme_enabled);
        self.always_on_top_item.set_checked(flags.always_on_top);

        for item in self.window_items.drain(..) {
            if let Err(e) = self.window_menu.remove(&item) {
                tracing::warn!("Failed to remove window menu item: {}", e);
            }
        }
        for entry in window_entries(windows) {
            let item = check_item(&entry);
            match self.window_menu.append(&item) {
                Ok(()) => self.window_items.push(item),
                Err(e) => tracing::warn!("Failed to add window menu item: {}", e),
            }
        }
    }
}

fn plain_item(entry: &MenuEntry) -> MenuItem {
    MenuItem::with_id(entry.id.as_str(), &entry.label, true, entry.accelerator)
}

fn check_item(entry: &MenuEntry) -> CheckMenuItem {
    CheckMenuItem::with_id(
        entry.id.as_str(),
        &entry.label,
        true,
        entry.checked.unwrap_or(false),
        entry.accelerator,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ids_map_to_commands() {
        assert_eq!(
            ChromeCommand::from_menu_id(menu_ids::RELOAD),
            Some(ChromeCommand::Reload)
        );
        assert_eq!(
            ChromeCommand::from_menu_id(menu_ids::ALWAYS_ON_TOP),
            Some(ChromeCommand::ToggleAlwaysOnTop)
        );
        assert_eq!(
            ChromeCommand::from_menu_id("window:7"),
            Some(ChromeCommand::FocusWindow(ShellWindowId(7)))
        );
        assert_eq!(ChromeCommand::from_menu_id("window:abc"), None);
        assert_eq!(ChromeCommand::from_menu_id("unknown"), None);
    }

    #[test]
    fn test_every_entry_has_a_command() {
        let flags = ChromeFlags::default();
        let entries = file_entries(Modifiers::CONTROL)
            .into_iter()
            .chain(view_entries(Modifiers::CONTROL, &flags));
        for entry in entries {
            assert!(
                ChromeCommand::from_menu_id(&entry.id).is_some(),
                "{} has no command",
                entry.id
            );
        }
    }

    #[test]
    fn test_view_entries_reflect_flags() {
        let flags = ChromeFlags {
            always_on_top: true,
            theme_enabled: false,
        };
        let entries = view_entries(Modifiers::META, &flags);
        let theme = entries.iter().find(|e| e.id == menu_ids::TOGGLE_THEME).unwrap();
        let on_top = entries.iter().find(|e| e.id == menu_ids::ALWAYS_ON_TOP).unwrap();

        assert_eq!(theme.checked, Some(false));
        assert_eq!(on_top.checked, Some(true));
        assert_eq!(
            on_top.accelerator,
            Some(Accelerator::new(
                Some(Modifiers::META | Modifiers::SHIFT),
                Code::KeyT
            ))
        );
    }

    #[test]
    fn test_window_entries_follow_open_windows() {
        let windows = vec![
            WindowListing {
                id: ShellWindowId(3),
                label: "ChatGPT".to_string(),
                focused: false,
            },
            WindowListing {
                id: ShellWindowId(4),
                label: "ChatGPT (2)".to_string(),
                focused: true,
            },
        ];
        let entries = window_entries(&windows);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "window:3");
        assert_eq!(entries[1].label, "ChatGPT (2)");
        assert_eq!(entries[1].checked, Some(true));
        assert!(window_entries(&[]).is_empty());
    }
}
