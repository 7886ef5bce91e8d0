//! # Application State
//!
//! Core business state for the chat client. This module contains domain
//! state only - no TUI-specific types. Presentation state lives in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Transcript          // message log
//! ├── pending_upload: Option<...>     // the one attachable file
//! ├── in_flight: usize                // sends awaiting a reply
//! ├── status_message: String          // status bar text
//! └── server_label: String            // endpoint shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::path::PathBuf;

use crate::core::config::ResolvedConfig;
use crate::core::transcript::Transcript;

/// Reference to the single selected file. Content is read at send time,
/// not at selection time, so removing the upload after a send has started
/// has no effect on that send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub name: String,
    pub path: PathBuf,
}

pub struct App {
    pub transcript: Transcript,
    /// At most one upload at a time; a new selection replaces the old.
    pub pending_upload: Option<PendingUpload>,
    /// Number of sends whose reply has not settled yet. Sends may overlap;
    /// nothing blocks the composer while this is non-zero.
    pub in_flight: usize,
    pub status_message: String,
    pub server_label: String,
}

impl App {
    pub fn new(server_label: String) -> Self {
        Self {
            transcript: Transcript::new(),
            pending_upload: None,
            in_flight: 0,
            status_message: String::new(),
            server_label,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.base_url.clone())
    }
}
