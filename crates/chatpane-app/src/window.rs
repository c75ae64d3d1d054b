//! Native window hosting the chat site
//!
//! Navigation callbacks answer synchronously through the policy engine and
//! post any remaining work to the event loop as a [`UserEvent`].

use crate::controller::ShellWindow;
use crate::inject::{document_start_style_script, FONT_CSS, FONT_STYLE_ID};
use crate::ipc::{IpcMessage, JS_BRIDGE};
use crate::UserEvent;
use chatpane_core::types::{
    NavigationIntent, NavigationKind, ShellWindowId, WindowBounds, WindowGeometry,
};
use chatpane_core::{ShellError, ShellResult};
use chatpane_policy::{intercept, NavigationPolicy};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

/// Everything needed to open one window
pub struct WindowOptions {
    pub id: ShellWindowId,
    pub title: String,
    pub url: String,
    pub geometry: WindowGeometry,
    pub always_on_top: bool,
    pub devtools: bool,
    pub inject_font: bool,
    /// Origin relative links and popups are resolved against
    pub source_origin: String,
}

/// A tao window with its webview
pub struct BrowserWindow {
    window: Window,
    webview: WebView,
}

impl BrowserWindow {
    pub fn open(
        target: &EventLoopWindowTarget<UserEvent>,
        options: WindowOptions,
        policy: NavigationPolicy,
        proxy: EventLoopProxy<UserEvent>,
    ) -> ShellResult<Self> {
        let WindowOptions {
            id,
            title,
            url,
            geometry,
            always_on_top,
            devtools,
            inject_font,
            source_origin,
        } = options;

        let mut window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
            .with_always_on_top(always_on_top);
        if let Some((x, y)) = geometry.position {
            window_builder = window_builder.with_position(LogicalPosition::new(x, y));
        }
        let window = window_builder
            .build(target)
            .map_err(|e| ShellError::window(e.to_string()))?;

        let nav_policy = policy.clone();
        let nav_proxy = proxy.clone();
        let nav_origin = source_origin.clone();
        let popup_policy = policy.clone();
        let popup_proxy = proxy.clone();
        let load_proxy = proxy.clone();
        let ipc_proxy = proxy;

        let font_script = document_start_style_script(FONT_STYLE_ID, FONT_CSS);
        let mut builder = WebViewBuilder::new()
            .with_url(url.as_str())
            .with_devtools(devtools)
            .with_clipboard(true)
            .with_initialization_script(JS_BRIDGE);
        if inject_font {
            builder = builder.with_initialization_script(&font_script);
        }

        let builder = builder
            .with_navigation_handler(move |url| {
                route(
                    &nav_policy,
                    &nav_proxy,
                    id,
                    NavigationIntent::new(url, nav_origin.as_str(), NavigationKind::LinkClick),
                )
            })
            .with_new_window_req_handler(move |url| {
                route(
                    &popup_policy,
                    &popup_proxy,
                    id,
                    NavigationIntent::new(
                        url,
                        source_origin.as_str(),
                        NavigationKind::WindowOpenRequest,
                    ),
                )
            })
            .with_on_page_load_handler(move |event, url| {
                if let PageLoadEvent::Finished = event {
                    debug!("Window {:?} finished loading {}", id, url);
                    let _ = load_proxy.send_event(UserEvent::PageLoaded(id));
                }
            })
            .with_ipc_handler(move |request| {
                let host = request.uri().host().unwrap_or_default();
                if !policy.trusted().matches(host) {
                    warn!("Ignoring IPC message from untrusted host {:?}", host);
                    return;
                }

                match IpcMessage::parse(request.body()) {
                    Ok(IpcMessage::OpenExternal { url }) => {
                        let _ = ipc_proxy.send_event(UserEvent::OpenExternal { window: id, url });
                    }
                    Ok(IpcMessage::ToggleAlwaysOnTop) => {
                        let _ = ipc_proxy.send_event(UserEvent::ToggleAlwaysOnTop(id));
                    }
                    Err(e) => warn!("Invalid IPC message: {}", e),
                }
            });

        #[cfg(not(target_os = "linux"))]
        let webview = builder.build(&window);

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;

            let vbox = window
                .default_vbox()
                .ok_or_else(|| ShellError::window("window has no GTK container"))?;
            builder.build_gtk(vbox)
        };

        let webview = webview.map_err(|e| ShellError::webview(e.to_string()))?;
        info!("Opened window {:?} at {}", id, url);

        Ok(Self { window, webview })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Answer a webview navigation callback and queue its followup
fn route(
    policy: &NavigationPolicy,
    proxy: &EventLoopProxy<UserEvent>,
    window: ShellWindowId,
    intent: NavigationIntent,
) -> bool {
    let decision = policy.classify(&intent);
    debug!("{:?} {} -> {:?}", intent.kind, intent.target_url, decision);

    let result = intercept(&intent, decision);
    if let Some(followup) = result.followup {
        let _ = proxy.send_event(UserEvent::Followup { window, followup });
    }
    result.allow
}

impl ShellWindow for BrowserWindow {
    fn bounds(&self) -> Option<WindowBounds> {
        if self.window.is_minimized() {
            return None;
        }
        let scale = self.window.scale_factor();
        let position = self.window.outer_position().ok()?.to_logical::<i32>(scale);
        let size = self.window.inner_size().to_logical::<u32>(scale);

        Some(WindowBounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn set_always_on_top(&self, on: bool) {
        self.window.set_always_on_top(on);
    }

    fn load_url(&self, url: &str) -> ShellResult<()> {
        self.webview
            .load_url(url)
            .map_err(|e| ShellError::webview(e.to_string()))
    }

    fn evaluate_script(&self, script: &str) -> ShellResult<()> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| ShellError::webview(e.to_string()))
    }

    fn reload(&self) -> ShellResult<()> {
        self.webview
            .reload()
            .map_err(|e| ShellError::webview(e.to_string()))
    }

    fn toggle_devtools(&self) -> bool {
        if self.webview.is_devtools_open() {
            self.webview.close_devtools();
            false
        } else {
            self.webview.open_devtools();
            true
        }
    }

    fn focus(&self) {
        self.window.set_focus();
    }
}
