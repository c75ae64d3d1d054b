//! Window controller
//!
//! Owns the open windows, the persisted [`WindowState`], and the actions the
//! menu and the page can trigger. Everything runs on the event-loop thread.

use crate::chrome::{ChromeFlags, WindowListing};
use crate::desktop::Desktop;
use crate::inject::{inject_style_script, remove_style_script, toast_script, THEME_CSS, THEME_STYLE_ID};
use chatpane_core::types::{ShellWindowId, WindowBounds, WindowGeometry, WindowState};
use chatpane_core::{ShellError, ShellResult, WindowStateStore};
use chatpane_policy::{Decision, Followup, NavigationPolicy};
use tracing::{debug, info, warn};

/// Smallest window a restored state may produce
pub const MIN_WINDOW_WIDTH: u32 = 200;
pub const MIN_WINDOW_HEIGHT: u32 = 150;

/// Operations the controller needs from a toolkit window
pub trait ShellWindow {
    /// Outer position and inner size in logical pixels
    fn bounds(&self) -> Option<WindowBounds>;
    fn set_always_on_top(&self, on: bool);
    fn load_url(&self, url: &str) -> ShellResult<()>;
    fn evaluate_script(&self, script: &str) -> ShellResult<()>;
    fn reload(&self) -> ShellResult<()>;
    /// Returns whether the tools are open afterwards
    fn toggle_devtools(&self) -> bool;
    fn focus(&self);
}

/// Per-window record
pub struct WindowEntry<W> {
    pub id: ShellWindowId,
    pub window: W,
    /// Whether the theme stylesheet is present in the current document
    pub theme_applied: bool,
    pub always_on_top: bool,
}

impl<W: ShellWindow> WindowEntry<W> {
    fn apply_theme(&mut self) {
        if self.theme_applied {
            return;
        }
        match self
            .window
            .evaluate_script(&inject_style_script(THEME_STYLE_ID, THEME_CSS))
        {
            Ok(()) => self.theme_applied = true,
            Err(e) => warn!("Failed to apply theme to window {:?}: {}", self.id, e),
        }
    }

    fn remove_theme(&mut self) {
        if !self.theme_applied {
            return;
        }
        match self.window.evaluate_script(&remove_style_script(THEME_STYLE_ID)) {
            Ok(()) => self.theme_applied = false,
            Err(e) => warn!("Failed to remove theme from window {:?}: {}", self.id, e),
        }
    }
}

/// Open windows in creation order; the first entry is the primary window
pub struct WindowRegistry<W> {
    entries: Vec<WindowEntry<W>>,
}

impl<W> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<W> WindowRegistry<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: WindowEntry<W>) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, id: ShellWindowId) -> Option<WindowEntry<W>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: ShellWindowId) -> Option<&WindowEntry<W>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ShellWindowId) -> Option<&mut WindowEntry<W>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn primary(&self) -> Option<&WindowEntry<W>> {
        self.entries.first()
    }

    pub fn is_primary(&self, id: ShellWindowId) -> bool {
        self.primary().is_some_and(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry<W>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowEntry<W>> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Geometry of the first window, from the persisted state
pub fn primary_geometry(state: &WindowState) -> WindowGeometry {
    WindowGeometry {
        width: state.width.max(MIN_WINDOW_WIDTH),
        height: state.height.max(MIN_WINDOW_HEIGHT),
        position: state.position(),
    }
}

/// Geometry of a split-view window: half the persisted width, placed against
/// the right edge of the primary window
pub fn secondary_geometry(state: &WindowState, primary: Option<WindowBounds>) -> WindowGeometry {
    WindowGeometry {
        width: (state.width / 2).max(1),
        height: state.height.max(1),
        position: primary.map(|b| {
            let width = i32::try_from(b.width).unwrap_or(i32::MAX);
            (b.x.saturating_add(width), b.y)
        }),
    }
}

/// Owns the window registry and the persisted state
pub struct WindowController<W> {
    registry: WindowRegistry<W>,
    state: WindowState,
    store: WindowStateStore,
    policy: NavigationPolicy,
    focused: Option<ShellWindowId>,
    title: String,
}

impl<W: ShellWindow> WindowController<W> {
    pub fn new(store: WindowStateStore, policy: NavigationPolicy, title: impl Into<String>) -> Self {
        let state = store.load();
        info!(
            "Loaded window state {}x{} from {:?}",
            state.width,
            state.height,
            store.path()
        );

        Self {
            registry: WindowRegistry::new(),
            state,
            store,
            policy,
            focused: None,
            title: title.into(),
        }
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn policy(&self) -> &NavigationPolicy {
        &self.policy
    }

    #[cfg(test)]
    pub fn registry(&self) -> &WindowRegistry<W> {
        &self.registry
    }

    /// Geometry for the next window to open
    pub fn next_geometry(&self) -> WindowGeometry {
        match self.registry.primary() {
            None => primary_geometry(&self.state),
            Some(primary) => secondary_geometry(
                &self.state,
                primary.window.bounds().filter(WindowBounds::is_placeable),
            ),
        }
    }

    /// Title for the next window to open
    pub fn next_title(&self) -> String {
        self.listing_label(self.registry.len())
    }

    fn listing_label(&self, index: usize) -> String {
        if index == 0 {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, index + 1)
        }
    }

    pub fn register(&mut self, id: ShellWindowId, window: W) {
        let always_on_top = self.state.always_on_top;
        window.set_always_on_top(always_on_top);
        self.registry.insert(WindowEntry {
            id,
            window,
            theme_applied: false,
            always_on_top,
        });
        if self.focused.is_none() {
            self.focused = Some(id);
        }
        info!("Registered window {:?} ({} open)", id, self.registry.len());
    }

    /// Record a move or resize. Only the primary window is persisted.
    pub fn geometry_changed(&mut self, id: ShellWindowId) {
        if !self.registry.is_primary(id) {
            return;
        }
        let Some(bounds) = self.registry.get(id).and_then(|e| e.window.bounds()) else {
            return;
        };
        if !bounds.is_placeable() {
            debug!("Ignoring geometry of minimized window {:?}: {:?}", id, bounds);
            return;
        }

        let mut next = self.state;
        next.set_bounds(bounds);
        if next != self.state {
            self.state = next;
            self.persist();
        }
    }

    pub fn set_focused(&mut self, id: ShellWindowId) {
        if self.registry.get(id).is_some() {
            self.focused = Some(id);
        }
    }

    /// Window that menu commands act on: the focused one, else the primary
    pub fn target(&self) -> Option<ShellWindowId> {
        self.focused
            .filter(|id| self.registry.get(*id).is_some())
            .or_else(|| self.registry.primary().map(|e| e.id))
    }

    pub fn toggle_always_on_top(&mut self, id: ShellWindowId) -> Option<bool> {
        let is_primary = self.registry.is_primary(id);
        let entry = self.registry.get_mut(id)?;
        entry.always_on_top = !entry.always_on_top;
        entry.window.set_always_on_top(entry.always_on_top);
        let on = entry.always_on_top;
        info!("Window {:?} always on top: {}", id, on);

        if is_primary {
            self.state.always_on_top = on;
            self.persist();
        }
        Some(on)
    }

    pub fn toggle_theme(&mut self) -> bool {
        let enabled = !self.state.theme_enabled;
        self.state.theme_enabled = enabled;
        for entry in self.registry.iter_mut() {
            if enabled {
                entry.apply_theme();
            } else {
                entry.remove_theme();
            }
        }
        info!("Theme {}", if enabled { "enabled" } else { "disabled" });
        self.persist();
        enabled
    }

    /// Apply the theme to one window if it is enabled and not yet applied
    pub fn ensure_theme(&mut self, id: ShellWindowId) {
        if !self.state.theme_enabled {
            return;
        }
        if let Some(entry) = self.registry.get_mut(id) {
            entry.apply_theme();
        }
    }

    /// A new document finished loading; injected styles are gone
    pub fn page_loaded(&mut self, id: ShellWindowId) {
        if let Some(entry) = self.registry.get_mut(id) {
            entry.theme_applied = false;
        }
        self.ensure_theme(id);
    }

    pub fn reload(&self, id: ShellWindowId) {
        if let Some(entry) = self.registry.get(id) {
            if let Err(e) = entry.window.reload() {
                warn!("Failed to reload window {:?}: {}", id, e);
            }
        }
    }

    pub fn toggle_devtools(&self, id: ShellWindowId) -> Option<bool> {
        let open = self.registry.get(id)?.window.toggle_devtools();
        debug!("Window {:?} devtools open: {}", id, open);
        Some(open)
    }

    pub fn focus(&mut self, id: ShellWindowId) {
        if let Some(entry) = self.registry.get(id) {
            entry.window.focus();
            self.focused = Some(id);
        }
    }

    pub fn flags(&self) -> ChromeFlags {
        let always_on_top = self
            .target()
            .and_then(|id| self.registry.get(id))
            .map(|e| e.always_on_top)
            .unwrap_or(self.state.always_on_top);

        ChromeFlags {
            always_on_top,
            theme_enabled: self.state.theme_enabled,
        }
    }

    pub fn window_list(&self) -> Vec<WindowListing> {
        let target = self.target();
        self.registry
            .iter()
            .enumerate()
            .map(|(index, entry)| WindowListing {
                id: entry.id,
                label: self.listing_label(index),
                focused: Some(entry.id) == target,
            })
            .collect()
    }

    /// Drop a closed window. Returns whether any windows remain.
    pub fn close(&mut self, id: ShellWindowId) -> bool {
        let was_primary = self.registry.is_primary(id);
        if self.registry.remove(id).is_some() {
            info!("Closed window {:?} ({} open)", id, self.registry.len());
        }
        if self.focused == Some(id) {
            self.focused = self.registry.primary().map(|e| e.id);
        }
        if was_primary {
            if let Some(primary) = self.registry.primary() {
                info!("Window {:?} is now primary", primary.id);
            }
        }
        !self.registry.is_empty()
    }

    pub fn persist(&self) {
        self.store.save(&self.state);
    }

    /// Act on work left by a navigation callback
    pub fn handle_followup(&mut self, id: ShellWindowId, followup: Followup, desktop: &dyn Desktop) {
        match followup {
            Followup::LoadInPlace(url) => {
                if let Some(entry) = self.registry.get(id) {
                    info!("Loading popup target in window {:?}: {}", id, url);
                    if let Err(e) = entry.window.load_url(&url) {
                        warn!("Failed to load {}: {}", url, e);
                    }
                }
            }
            Followup::OpenExternally(url) => self.open_externally(id, &url, desktop),
            Followup::Invalid(raw) => self.report_invalid(id, &raw, desktop),
        }
    }

    /// The page asked for a link to be opened in the system browser
    pub fn open_external_request(&mut self, id: ShellWindowId, raw: &str, desktop: &dyn Desktop) {
        match self.policy.resolve_external(raw) {
            Decision::OpenExternally(url) => self.open_externally(id, &url, desktop),
            Decision::Invalid(raw) => self.report_invalid(id, &raw, desktop),
            Decision::AllowInPlace => {}
        }
    }

    fn open_externally(&self, id: ShellWindowId, url: &str, desktop: &dyn Desktop) {
        match desktop.open_external(url) {
            Ok(()) => info!("Opened in default browser: {}", url),
            Err(e) => {
                warn!("{}", e);
                let body = match desktop.copy_to_clipboard(url) {
                    Ok(()) => format!(
                        "The link was copied to your clipboard. Paste it into your browser: {}",
                        url
                    ),
                    Err(e) => {
                        warn!("Clipboard fallback failed: {}", e);
                        format!("Open this link in your browser: {}", url)
                    }
                };
                self.notify(id, "Couldn't open link", &body, desktop);
            }
        }
    }

    fn report_invalid(&self, id: ShellWindowId, raw: &str, desktop: &dyn Desktop) {
        warn!("{}", ShellError::malformed_url(raw));
        let body = match desktop.copy_to_clipboard(raw) {
            Ok(()) => format!("The link text was copied to your clipboard: {}", raw),
            Err(e) => {
                warn!("Clipboard fallback failed: {}", e);
                format!("This link could not be opened: {}", raw)
            }
        };
        self.notify(id, "Link looks malformed", &body, desktop);
    }

    /// Show a notice in the page. The native dialog is used only when the
    /// webview rejects the script; page-side errors are not reported back.
    fn notify(&self, id: ShellWindowId, title: &str, body: &str, desktop: &dyn Desktop) {
        let shown = self
            .registry
            .get(id)
            .map(|e| e.window.evaluate_script(&toast_script(title, body)))
            .is_some_and(|result| result.is_ok());
        if !shown {
            desktop.notify(title, body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatpane_core::types::{NavigationIntent, NavigationKind, MINIMIZED_POSITION};
    use chatpane_core::OriginMatching;
    use chatpane_policy::{intercept, TrustedOrigins};
    use std::cell::{Cell, RefCell};
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct FakeWindow {
        bounds: Cell<Option<WindowBounds>>,
        on_top: Cell<bool>,
        scripts: RefCell<Vec<String>>,
        loaded: RefCell<Vec<String>>,
        reloads: Cell<u32>,
        devtools: Cell<bool>,
        focused: Cell<bool>,
        broken: bool,
    }

    impl FakeWindow {
        fn at(x: i32, y: i32, width: u32, height: u32) -> Self {
            let window = Self::default();
            window.bounds.set(Some(WindowBounds {
                x,
                y,
                width,
                height,
            }));
            window
        }

        fn count(&self, needle: &str) -> usize {
            self.scripts
                .borrow()
                .iter()
                .filter(|s| s.contains(needle))
                .count()
        }
    }

    impl ShellWindow for FakeWindow {
        fn bounds(&self) -> Option<WindowBounds> {
            self.bounds.get()
        }

        fn set_always_on_top(&self, on: bool) {
            self.on_top.set(on);
        }

        fn load_url(&self, url: &str) -> ShellResult<()> {
            self.loaded.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn evaluate_script(&self, script: &str) -> ShellResult<()> {
            if self.broken {
                return Err(ShellError::webview("webview gone"));
            }
            self.scripts.borrow_mut().push(script.to_string());
            Ok(())
        }

        fn reload(&self) -> ShellResult<()> {
            self.reloads.set(self.reloads.get() + 1);
            Ok(())
        }

        fn toggle_devtools(&self) -> bool {
            self.devtools.set(!self.devtools.get());
            self.devtools.get()
        }

        fn focus(&self) {
            self.focused.set(true);
        }
    }

    #[derive(Default)]
    struct FakeDesktop {
        opened: RefCell<Vec<String>>,
        clipboard: RefCell<Vec<String>>,
        notices: RefCell<Vec<(String, String)>>,
        open_fails: bool,
        clipboard_fails: bool,
    }

    impl Desktop for FakeDesktop {
        fn open_external(&self, url: &str) -> ShellResult<()> {
            if self.open_fails {
                return Err(ShellError::external_open(url));
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn copy_to_clipboard(&self, text: &str) -> ShellResult<()> {
            if self.clipboard_fails {
                return Err(ShellError::clipboard("no display"));
            }
            self.clipboard.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn notify(&self, title: &str, body: &str) {
            self.notices
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
        }
    }

    fn policy() -> NavigationPolicy {
        NavigationPolicy::new(TrustedOrigins::new(["openai.com"], OriginMatching::Suffix))
    }

    fn controller() -> (TempDir, WindowController<FakeWindow>) {
        let dir = tempdir().unwrap();
        let store = WindowStateStore::new(dir.path().join("window-state.json"));
        (dir, WindowController::new(store, policy(), "ChatGPT"))
    }

    fn saved(dir: &TempDir) -> Option<WindowState> {
        let store = WindowStateStore::new(dir.path().join("window-state.json"));
        store.path().exists().then(|| store.load())
    }

    fn window(controller: &WindowController<FakeWindow>, id: ShellWindowId) -> &FakeWindow {
        &controller.registry().get(id).unwrap().window
    }

    #[test]
    fn test_secondary_window_without_state_file() {
        let (_dir, mut controller) = controller();
        assert_eq!(
            controller.next_geometry(),
            WindowGeometry {
                width: 1000,
                height: 800,
                position: None
            }
        );

        controller.register(ShellWindowId(1), FakeWindow::at(120, 40, 1000, 800));
        assert_eq!(
            controller.next_geometry(),
            WindowGeometry {
                width: 500,
                height: 800,
                position: Some((1120, 40))
            }
        );
    }

    #[test]
    fn test_secondary_geometry_uses_persisted_width() {
        let state = WindowState {
            width: 1400,
            height: 900,
            ..WindowState::default()
        };
        let geometry = secondary_geometry(&state, None);
        assert_eq!((geometry.width, geometry.height), (700, 900));
        assert_eq!(geometry.position, None);
    }

    #[test]
    fn test_primary_geometry_clamps_tiny_state() {
        let state = WindowState {
            width: 0,
            height: 10,
            x: Some(5),
            y: Some(6),
            ..WindowState::default()
        };
        let geometry = primary_geometry(&state);
        assert_eq!(geometry.width, MIN_WINDOW_WIDTH);
        assert_eq!(geometry.height, MIN_WINDOW_HEIGHT);
        assert_eq!(geometry.position, Some((5, 6)));
    }

    #[test]
    fn test_only_primary_geometry_is_persisted() {
        let (dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::at(0, 0, 1000, 800));
        controller.register(ShellWindowId(2), FakeWindow::at(1000, 0, 500, 800));

        controller.geometry_changed(ShellWindowId(2));
        assert_eq!(saved(&dir), None);

        window(&controller, ShellWindowId(1)).bounds.set(Some(WindowBounds {
            x: 30,
            y: 60,
            width: 1100,
            height: 700,
        }));
        controller.geometry_changed(ShellWindowId(1));

        let state = saved(&dir).unwrap();
        assert_eq!(state.position(), Some((30, 60)));
        assert_eq!((state.width, state.height), (1100, 700));
    }

    #[test]
    fn test_minimized_geometry_is_not_persisted() {
        let (dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::at(40, 30, 1100, 700));
        controller.geometry_changed(ShellWindowId(1));
        let placed = saved(&dir).unwrap();

        window(&controller, ShellWindowId(1)).bounds.set(Some(WindowBounds {
            x: MINIMIZED_POSITION,
            y: MINIMIZED_POSITION,
            width: 0,
            height: 0,
        }));
        controller.geometry_changed(ShellWindowId(1));
        assert_eq!(saved(&dir), Some(placed));
        assert_eq!(*controller.state(), placed);

        let geometry = controller.next_geometry();
        assert_eq!(geometry.position, None);

        let store = WindowStateStore::new(dir.path().join("window-state.json"));
        let reopened: WindowController<FakeWindow> =
            WindowController::new(store, policy(), "ChatGPT");
        assert_eq!(
            reopened.next_geometry(),
            WindowGeometry {
                width: 1100,
                height: 700,
                position: Some((40, 30))
            }
        );
    }

    #[test]
    fn test_always_on_top_persists_for_primary() {
        let (dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::default());
        controller.register(ShellWindowId(2), FakeWindow::default());

        assert_eq!(controller.toggle_always_on_top(ShellWindowId(2)), Some(true));
        assert!(window(&controller, ShellWindowId(2)).on_top.get());
        assert_eq!(saved(&dir), None);

        assert_eq!(controller.toggle_always_on_top(ShellWindowId(1)), Some(true));
        assert!(saved(&dir).unwrap().always_on_top);
        assert_eq!(controller.toggle_always_on_top(ShellWindowId(9)), None);
    }

    #[test]
    fn test_new_windows_inherit_persisted_flags() {
        let dir = tempdir().unwrap();
        let store = WindowStateStore::new(dir.path().join("window-state.json"));
        store.save(&WindowState {
            always_on_top: true,
            theme_enabled: true,
            ..WindowState::default()
        });

        let mut controller = WindowController::new(store, policy(), "ChatGPT");
        controller.register(ShellWindowId(1), FakeWindow::default());
        assert!(window(&controller, ShellWindowId(1)).on_top.get());
        assert!(controller.flags().theme_enabled);

        controller.page_loaded(ShellWindowId(1));
        assert_eq!(window(&controller, ShellWindowId(1)).count("el.textContent"), 1);
    }

    #[test]
    fn test_theme_toggle_and_idempotent_apply() {
        let (dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::default());
        controller.register(ShellWindowId(2), FakeWindow::default());

        assert!(controller.toggle_theme());
        controller.ensure_theme(ShellWindowId(1));
        controller.ensure_theme(ShellWindowId(1));
        assert_eq!(window(&controller, ShellWindowId(1)).count("el.textContent"), 1);
        assert_eq!(window(&controller, ShellWindowId(2)).count("el.textContent"), 1);
        assert!(saved(&dir).unwrap().theme_enabled);

        assert!(!controller.toggle_theme());
        assert_eq!(window(&controller, ShellWindowId(1)).count("el.remove()"), 1);
        assert!(!controller.registry().get(ShellWindowId(1)).unwrap().theme_applied);
        assert!(!saved(&dir).unwrap().theme_enabled);
    }

    #[test]
    fn test_page_load_reapplies_theme() {
        let (_dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.page_loaded(ShellWindowId(1));
        assert_eq!(window(&controller, ShellWindowId(1)).count("el.textContent"), 0);

        controller.toggle_theme();
        controller.page_loaded(ShellWindowId(1));
        assert_eq!(window(&controller, ShellWindowId(1)).count("el.textContent"), 2);
    }

    #[test]
    fn test_external_open_success() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop::default();
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.handle_followup(
            ShellWindowId(1),
            Followup::OpenExternally("https://evil.com/phish".to_string()),
            &desktop,
        );
        assert_eq!(*desktop.opened.borrow(), ["https://evil.com/phish"]);
        assert!(desktop.clipboard.borrow().is_empty());
        assert_eq!(window(&controller, ShellWindowId(1)).count("chatpane-toast"), 0);
    }

    #[test]
    fn test_external_open_failure_copies_and_notifies() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop {
            open_fails: true,
            ..FakeDesktop::default()
        };
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.handle_followup(
            ShellWindowId(1),
            Followup::OpenExternally("https://example.com/".to_string()),
            &desktop,
        );
        assert_eq!(*desktop.clipboard.borrow(), ["https://example.com/"]);
        let page = window(&controller, ShellWindowId(1));
        assert_eq!(page.count("chatpane-toast"), 1);
        assert_eq!(page.count("copied to your clipboard"), 1);
        assert!(desktop.notices.borrow().is_empty());
    }

    #[test]
    fn test_malformed_link_scenario() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop::default();
        controller.register(ShellWindowId(1), FakeWindow::default());

        let intent = NavigationIntent::new(
            "not a url!!",
            "https://chat.openai.com",
            NavigationKind::LinkClick,
        );
        let result = intercept(&intent, controller.policy().classify(&intent));
        assert!(!result.allow);

        controller.handle_followup(ShellWindowId(1), result.followup.unwrap(), &desktop);
        assert_eq!(*desktop.clipboard.borrow(), ["not a url!!"]);
        assert_eq!(window(&controller, ShellWindowId(1)).count("Link looks malformed"), 1);
    }

    #[test]
    fn test_notice_falls_back_to_native_dialog() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop {
            clipboard_fails: true,
            ..FakeDesktop::default()
        };
        controller.register(
            ShellWindowId(1),
            FakeWindow {
                broken: true,
                ..FakeWindow::default()
            },
        );

        controller.handle_followup(ShellWindowId(1), Followup::Invalid("%%".to_string()), &desktop);
        let notices = desktop.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, "Link looks malformed");
        assert!(notices[0].1.contains("could not be opened: %%"));
    }

    #[test]
    fn test_popup_target_loads_in_place() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop::default();
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.handle_followup(
            ShellWindowId(1),
            Followup::LoadInPlace("https://chat.openai.com/c/1".to_string()),
            &desktop,
        );
        assert_eq!(
            *window(&controller, ShellWindowId(1)).loaded.borrow(),
            ["https://chat.openai.com/c/1"]
        );
    }

    #[test]
    fn test_script_open_external_request() {
        let (_dir, mut controller) = controller();
        let desktop = FakeDesktop::default();
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.open_external_request(ShellWindowId(1), "openai.com/docs", &desktop);
        controller.open_external_request(ShellWindowId(1), "javascript:alert(1)", &desktop);

        assert_eq!(*desktop.opened.borrow(), ["https://openai.com/docs"]);
        assert_eq!(*desktop.clipboard.borrow(), ["javascript:alert(1)"]);
    }

    #[test]
    fn test_close_promotes_next_window() {
        let (dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::at(0, 0, 1000, 800));
        controller.register(ShellWindowId(2), FakeWindow::at(1000, 0, 500, 800));
        controller.set_focused(ShellWindowId(1));

        assert!(controller.close(ShellWindowId(1)));
        assert!(controller.registry().is_primary(ShellWindowId(2)));
        assert_eq!(controller.target(), Some(ShellWindowId(2)));

        controller.geometry_changed(ShellWindowId(2));
        assert_eq!(saved(&dir).unwrap().width, 500);

        assert!(!controller.close(ShellWindowId(2)));
        assert!(controller.registry().is_empty());
    }

    #[test]
    fn test_window_list_and_flags_follow_focus() {
        let (_dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::default());
        controller.register(ShellWindowId(2), FakeWindow::default());
        controller.toggle_always_on_top(ShellWindowId(2));

        assert!(!controller.flags().always_on_top);
        controller.focus(ShellWindowId(2));
        assert!(controller.flags().always_on_top);
        assert!(window(&controller, ShellWindowId(2)).focused.get());

        let list = controller.window_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].label, "ChatGPT");
        assert_eq!(list[1].label, "ChatGPT (2)");
        assert!(list[1].focused);
        assert_eq!(controller.next_title(), "ChatGPT (3)");
    }

    #[test]
    fn test_reload_and_devtools_forward_to_window() {
        let (_dir, mut controller) = controller();
        controller.register(ShellWindowId(1), FakeWindow::default());

        controller.reload(ShellWindowId(1));
        assert_eq!(window(&controller, ShellWindowId(1)).reloads.get(), 1);
        assert_eq!(controller.toggle_devtools(ShellWindowId(1)), Some(true));
        assert_eq!(controller.toggle_devtools(ShellWindowId(1)), Some(false));
        assert_eq!(controller.toggle_devtools(ShellWindowId(5)), None);
    }
}
