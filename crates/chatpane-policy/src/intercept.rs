//! Adapter between webview navigation callbacks and [`Decision`]s
//!
//! Webview handlers must answer synchronously with allow/deny. Anything
//! beyond that is returned as a [`Followup`] for the event loop.

use crate::normalize::{normalize, Candidate};
use crate::Decision;
use chatpane_core::types::NavigationIntent;
use url::Url;

/// Work left for the event loop after a navigation callback returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    /// Load this URL in the window that asked for a popup
    LoadInPlace(String),
    /// Hand the URL to the system browser
    OpenExternally(String),
    /// Tell the user the link was malformed
    Invalid(String),
}

/// Answer for a webview navigation callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interception {
    pub allow: bool,
    pub followup: Option<Followup>,
}

impl Interception {
    fn allow() -> Self {
        Self {
            allow: true,
            followup: None,
        }
    }

    fn block(followup: Option<Followup>) -> Self {
        Self {
            allow: false,
            followup,
        }
    }
}

/// Map a decision to the webview answer for this intent.
///
/// Popup requests never create native windows: first-party web targets load
/// in the originating window, other in-place targets are dropped.
pub fn intercept(intent: &NavigationIntent, decision: Decision) -> Interception {
    match decision {
        Decision::AllowInPlace if intent.kind.opens_window() => {
            Interception::block(popup_target(intent).map(Followup::LoadInPlace))
        }
        Decision::AllowInPlace => Interception::allow(),
        Decision::OpenExternally(url) => Interception::block(Some(Followup::OpenExternally(url))),
        Decision::Invalid(raw) => Interception::block(Some(Followup::Invalid(raw))),
    }
}

fn popup_target(intent: &NavigationIntent) -> Option<String> {
    let url = match normalize(&intent.target_url) {
        Candidate::Absolute(candidate) => Url::parse(&candidate).ok()?,
        Candidate::Relative => Url::parse(&intent.source_origin)
            .ok()?
            .join(intent.target_url.trim())
            .ok()?,
        Candidate::Empty => return None,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
