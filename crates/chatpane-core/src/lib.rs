//! Chatpane Core Library
//!
//! Shared types, errors, configuration and window state persistence.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{OriginMatching, ShellConfig};
pub use error::{ShellError, ShellResult};
pub use store::WindowStateStore;
