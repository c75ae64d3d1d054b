//! Common types used throughout Chatpane

use serde::{Deserialize, Serialize};

/// Default window width in logical pixels
pub const DEFAULT_WIDTH: u32 = 1000;
/// Default window height in logical pixels
pub const DEFAULT_HEIGHT: u32 = 800;

/// Unique identifier for a shell window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShellWindowId(pub u64);

impl ShellWindowId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ShellWindowId {
    fn default() -> Self {
        Self::new()
    }
}

/// Persisted window placement and user preferences.
///
/// Stored as a flat JSON object. Unknown keys are ignored and missing keys
/// fall back to [`WindowState::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub always_on_top: bool,
    pub theme_enabled: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
            always_on_top: false,
            theme_enabled: false,
        }
    }
}

impl WindowState {
    /// Position as a pair, only when both coordinates are known
    pub fn position(&self) -> Option<(i32, i32)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    /// Record the latest observed bounds
    pub fn set_bounds(&mut self, bounds: WindowBounds) {
        self.x = Some(bounds.x);
        self.y = Some(bounds.y);
        self.width = bounds.width;
        self.height = bounds.height;
    }
}

/// Live geometry of a window in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Windows parks minimized windows at this position
pub const MINIMIZED_POSITION: i32 = -32000;

impl WindowBounds {
    /// Whether these bounds describe a visible placement worth restoring.
    /// Minimized windows report an empty client area and, on Windows, the
    /// parking position.
    pub fn is_placeable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.x > MINIMIZED_POSITION
            && self.y > MINIMIZED_POSITION
    }
}

/// Geometry a new window is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub position: Option<(i32, i32)>,
}

/// What triggered a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    LinkClick,
    FormSubmit,
    ProgrammaticOpen,
    WindowOpenRequest,
}

impl NavigationKind {
    /// Whether the webview wants a new window rather than an in-place load
    pub fn opens_window(self) -> bool {
        matches!(self, NavigationKind::WindowOpenRequest)
    }
}

/// A navigation the embedded page is about to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_url: String,
    pub source_origin: String,
    pub kind: NavigationKind,
}

impl NavigationIntent {
    pub fn new(
        target_url: impl Into<String>,
        source_origin: impl Into<String>,
        kind: NavigationKind,
    ) -> Self {
        Self {
            target_url: target_url.into(),
            source_origin: source_origin.into(),
            kind,
        }
    }
}
