//! Event-loop state: the controller, the menu bar and the tao window map

use crate::chrome::{ChromeCommand, ShellMenu};
use crate::controller::WindowController;
use crate::desktop::SystemDesktop;
use crate::window::{BrowserWindow, WindowOptions};
use crate::UserEvent;
use chatpane_core::types::ShellWindowId;
use chatpane_core::{ShellConfig, ShellResult, WindowStateStore};
use chatpane_policy::NavigationPolicy;
use std::collections::HashMap;
use tao::event::WindowEvent;
use tao::event_loop::{ControlFlow, EventLoopProxy, EventLoopWindowTarget};
use tao::window::WindowId;
use tracing::{debug, error, info, warn};

pub struct Shell {
    config: ShellConfig,
    controller: WindowController<BrowserWindow>,
    desktop: SystemDesktop,
    menu: Option<ShellMenu>,
    windows: HashMap<WindowId, ShellWindowId>,
    proxy: EventLoopProxy<UserEvent>,
}

impl Shell {
    pub fn new(config: ShellConfig, desktop: SystemDesktop, proxy: EventLoopProxy<UserEvent>) -> Self {
        let store = WindowStateStore::new(config.state_path());
        let policy = NavigationPolicy::from_config(&config);
        let controller = WindowController::new(store, policy, config.title.clone());

        let menu = match ShellMenu::build(
            desktop.platform(),
            &controller.flags(),
            &controller.window_list(),
        ) {
            Ok(menu) => Some(menu),
            Err(e) => {
                // Editing shortcuts are lost on macOS without it, but the page still works
                error!("Failed to build menu: {}", e);
                None
            }
        };

        Self {
            config,
            controller,
            desktop,
            menu,
            windows: HashMap::new(),
            proxy,
        }
    }

    pub fn open_window(&mut self, target: &EventLoopWindowTarget<UserEvent>) -> ShellResult<ShellWindowId> {
        let id = ShellWindowId::new();
        let options = WindowOptions {
            id,
            title: self.controller.next_title(),
            url: self.config.start_url.clone(),
            geometry: self.controller.next_geometry(),
            always_on_top: self.controller.state().always_on_top,
            devtools: self.config.devtools,
            inject_font: self.config.inject_font,
            source_origin: self.config.start_url.clone(),
        };

        let window = BrowserWindow::open(
            target,
            options,
            self.controller.policy().clone(),
            self.proxy.clone(),
        )?;

        let platform = self.desktop.platform();
        if let Some(menu) = &self.menu {
            if platform.capabilities().needs_menu_attach(self.windows.len()) {
                if let Err(e) = platform.attach_menu(window.window(), menu.menu()) {
                    warn!("{}", e);
                }
            }
        }

        self.windows.insert(window.window().id(), id);
        self.controller.register(id, window);
        self.sync_menu();
        Ok(id)
    }

    pub fn handle_window_event(
        &mut self,
        window_id: WindowId,
        event: WindowEvent,
        control_flow: &mut ControlFlow,
    ) {
        let Some(&id) = self.windows.get(&window_id) else {
            return;
        };

        match event {
            WindowEvent::Moved(_) | WindowEvent::Resized(_) => {
                self.controller.geometry_changed(id);
            }
            WindowEvent::Focused(true) => {
                self.controller.set_focused(id);
                self.sync_menu();
            }
            WindowEvent::CloseRequested => {
                self.windows.remove(&window_id);
                if self.controller.close(id) {
                    self.sync_menu();
                } else {
                    info!("Last window closed, shutting down...");
                    self.controller.persist();
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    }

    pub fn handle_user_event(
        &mut self,
        event: UserEvent,
        target: &EventLoopWindowTarget<UserEvent>,
        control_flow: &mut ControlFlow,
    ) {
        match event {
            UserEvent::Followup { window, followup } => {
                self.controller.handle_followup(window, followup, &self.desktop);
            }
            UserEvent::PageLoaded(window) => self.controller.page_loaded(window),
            UserEvent::OpenExternal { window, url } => {
                self.controller
                    .open_external_request(window, &url, &self.desktop);
            }
            UserEvent::ToggleAlwaysOnTop(window) => {
                self.controller.toggle_always_on_top(window);
                self.sync_menu();
            }
            UserEvent::Menu(menu_id) => match ChromeCommand::from_menu_id(&menu_id.0) {
                Some(command) => self.run_command(command, target, control_flow),
                None => debug!("Unhandled menu item {:?}", menu_id),
            },
        }
    }

    fn run_command(
        &mut self,
        command: ChromeCommand,
        target: &EventLoopWindowTarget<UserEvent>,
        control_flow: &mut ControlFlow,
    ) {
        let focused = self.controller.target();
        match command {
            ChromeCommand::Reload => {
                if let Some(id) = focused {
                    self.controller.reload(id);
                }
            }
            ChromeCommand::ToggleDevtools => {
                if let Some(id) = focused {
                    self.controller.toggle_devtools(id);
                }
            }
            ChromeCommand::ToggleTheme => {
                self.controller.toggle_theme();
            }
            ChromeCommand::ToggleAlwaysOnTop => {
                if let Some(id) = focused {
                    self.controller.toggle_always_on_top(id);
                }
            }
            ChromeCommand::SplitView => {
                if let Err(e) = self.open_window(target) {
                    error!("Failed to open split view: {}", e);
                }
            }
            ChromeCommand::Quit => {
                info!("Quit requested, shutting down...");
                self.controller.persist();
                *control_flow = ControlFlow::Exit;
            }
            ChromeCommand::FocusWindow(id) => self.controller.focus(id),
        }
        self.sync_menu();
    }

    fn sync_menu(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.sync(&self.controller.flags(), &self.controller.window_list());
        }
    }
}
