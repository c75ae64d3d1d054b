//! Chatpane - desktop shell for a single hosted chat site
//!
//! Each window is one webview pointed at the configured start URL. Links to
//! trusted origins stay in the window; everything else goes to the system
//! browser. Window geometry and the menu toggles persist across launches.

mod app;
mod chrome;
mod controller;
mod desktop;
mod inject;
mod ipc;
mod platform;
mod window;

use anyhow::Context;
use app::Shell;
use chatpane_core::types::ShellWindowId;
use chatpane_core::ShellConfig;
use chatpane_policy::Followup;
use desktop::SystemDesktop;
use muda::{MenuEvent, MenuId};
use platform::get_platform_manager;
use tao::event::Event;
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Work posted to the event loop from webview and menu callbacks
#[derive(Debug)]
pub enum UserEvent {
    /// A navigation callback left work for the controller
    Followup {
        window: ShellWindowId,
        followup: Followup,
    },
    /// A document finished loading
    PageLoaded(ShellWindowId),
    /// The page asked for a link to open in the system browser
    OpenExternal { window: ShellWindowId, url: String },
    ToggleAlwaysOnTop(ShellWindowId),
    Menu(MenuId),
}

fn init_logging() {
    // Route `log` records from the library crates into tracing
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to set log tracer: {}", e);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    info!("Starting Chatpane...");

    let config_path = ShellConfig::default_path();
    let config = ShellConfig::load(&config_path);
    info!("Config: {:?}", config_path);
    info!("Start URL: {}", config.start_url);

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event.id));
    }));

    let platform = get_platform_manager();
    info!("Platform: {}", platform.platform_name());

    let mut shell = Shell::new(config, SystemDesktop::new(platform), proxy);
    shell
        .open_window(&event_loop)
        .context("Failed to open the main window")?;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id, event, ..
            } => shell.handle_window_event(window_id, event, control_flow),
            Event::UserEvent(user_event) => shell.handle_user_event(user_event, target, control_flow),
            _ => {}
        }
    })
}
