//! Navigation policy for Chatpane
//!
//! Decides whether a URL the embedded page wants to visit stays inside the
//! shell window, goes to the system browser, or is rejected as malformed.
//! Everything here is pure; the window controller performs the side effects.

pub mod intercept;
pub mod normalize;
pub mod origins;

use chatpane_core::types::NavigationIntent;
use chatpane_core::ShellConfig;
use normalize::Candidate;
use url::Url;

pub use intercept::{intercept, Followup, Interception};
pub use origins::TrustedOrigins;

/// Outcome of classifying a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the webview load it
    AllowInPlace,
    /// Block and hand the normalized URL to the OS default browser
    OpenExternally(String),
    /// Could not be parsed; carries the raw input
    Invalid(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::AllowInPlace)
    }
}

/// Classify a navigation intent against the trusted domains
pub fn classify(intent: &NavigationIntent, trusted: &TrustedOrigins) -> Decision {
    let raw = &intent.target_url;
    let candidate = match normalize::normalize(raw) {
        Candidate::Empty => return Decision::Invalid(raw.clone()),
        Candidate::Relative => return Decision::AllowInPlace,
        Candidate::Absolute(candidate) => candidate,
    };

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("Unparsable navigation target {:?}: {}", raw, e);
            return Decision::Invalid(raw.clone());
        }
    };

    if url.host_str().is_some_and(|host| trusted.matches(host)) {
        return Decision::AllowInPlace;
    }

    match url.scheme() {
        "http" | "https" => Decision::OpenExternally(url.to_string()),
        _ => Decision::AllowInPlace,
    }
}

/// Schemes never handed to the OS, even on explicit request
const NON_EXTERNAL_SCHEMES: &[&str] = &["javascript", "data", "about", "blob", "file"];

/// The navigation policy bound to one trusted origin set
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    trusted: TrustedOrigins,
}

impl NavigationPolicy {
    pub fn new(trusted: TrustedOrigins) -> Self {
        Self { trusted }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(TrustedOrigins::new(
            &config.trusted_origins,
            config.origin_matching,
        ))
    }

    pub fn trusted(&self) -> &TrustedOrigins {
        &self.trusted
    }

    pub fn classify(&self, intent: &NavigationIntent) -> Decision {
        classify(intent, &self.trusted)
    }

    /// Resolve a link the page explicitly asked to open in the system
    /// browser. Trusted hosts are opened externally too; script-like and
    /// local schemes are refused.
    pub fn resolve_external(&self, raw: &str) -> Decision {
        let Candidate::Absolute(candidate) = normalize::normalize(raw) else {
            return Decision::Invalid(raw.to_string());
        };

        match Url::parse(&candidate) {
            Ok(url) if !NON_EXTERNAL_SCHEMES.contains(&url.scheme()) => {
                Decision::OpenExternally(url.to_string())
            }
            Ok(url) => {
                log::warn!("Refusing to open {} URL externally", url.scheme());
                Decision::Invalid(raw.to_string())
            }
            Err(_) => Decision::Invalid(raw.to_string()),
        }
    }
}
