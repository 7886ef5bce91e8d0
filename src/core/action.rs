//! # Actions
//!
//! Everything that can happen in the chat client becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A reply lands? That's `Action::ReplyResolved`.
//!
//! The `update()` function takes the current state and an action and
//! applies it, returning an `Effect` describing the I/O the caller must
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the whole send protocol testable without a terminal or a
//! server: feed actions, assert on the transcript.
//!
//! ## The send protocol
//!
//! One submit produces at most one outgoing request:
//!
//! ```text
//! Submit ──► user entry appended, composer consumed ──► Effect::Send
//!                                                          │
//!                          (background task: read file, POST /chat)
//!                                                          │
//! RequestDispatched ──► pending placeholder appended       │
//! ReplyResolved ─────► placeholder removed, reply/error appended
//! ```
//!
//! Sends are independent and may overlap; the placeholder id keeps each
//! resolution paired with its own invocation.

use std::path::PathBuf;

use log::{error, info};
use uuid::Uuid;

use crate::api::{ChatError, ChatResponse};
use crate::core::state::{App, PendingUpload};
use crate::core::transcript::{
    CONNECTION_ERROR_TEXT, EntryId, EntryKind, NO_RESPONSE_TEXT, format_reply,
};

#[derive(Debug)]
pub enum Action {
    /// The composer was submitted with this text (may be empty).
    Submit(String),
    /// A file was selected for upload.
    AttachSelected { name: String, path: PathBuf },
    /// The pending upload's removal control was used.
    RemoveUpload,
    /// A send invocation is about to issue its request.
    RequestDispatched { id: EntryId },
    /// A send invocation's request settled, one way or the other.
    ReplyResolved {
        id: EntryId,
        result: Result<ChatResponse, ChatError>,
    },
    /// The selected file could not be read; the send went nowhere.
    UploadReadFailed { name: String, error: String },
    Quit,
}

/// What gets transmitted for one send invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// The trimmed composer text.
    Text(String),
    /// A file whose decoded content becomes the message text. The
    /// annotation typed alongside it is display-only and never sent.
    File { name: String, path: PathBuf },
}

/// I/O the caller must perform after an `update()`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn the background send for this invocation.
    Send { id: EntryId, payload: Outgoing },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),
        Action::AttachSelected { name, path } => {
            info!("Upload selected: {name}");
            app.status_message = format!("Attached {name}");
            // A new selection silently replaces any previous one.
            app.pending_upload = Some(PendingUpload { name, path });
            Effect::None
        }
        Action::RemoveUpload => {
            // No-op when nothing is attached.
            if app.pending_upload.take().is_some() {
                app.status_message = String::from("Attachment removed");
            }
            Effect::None
        }
        Action::RequestDispatched { id } => {
            app.transcript.push_pending(id);
            Effect::None
        }
        Action::ReplyResolved { id, result } => {
            app.transcript.resolve_pending(id);
            app.in_flight = app.in_flight.saturating_sub(1);
            match result {
                Ok(reply) => match reply.text() {
                    Some(text) => {
                        app.transcript.push(EntryKind::Reply(format_reply(text)));
                    }
                    None => {
                        app.transcript
                            .push(EntryKind::Error(NO_RESPONSE_TEXT.to_string()));
                    }
                },
                Err(e) => {
                    error!("Chat request failed: {e}");
                    app.transcript
                        .push(EntryKind::Error(CONNECTION_ERROR_TEXT.to_string()));
                }
            }
            Effect::None
        }
        Action::UploadReadFailed { name, error } => {
            error!("Failed to read upload '{name}': {error}");
            app.in_flight = app.in_flight.saturating_sub(1);
            app.transcript
                .push(EntryKind::Error(format!("Couldn't read {name}.")));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Consumes the composer state atomically and decides what, if anything,
/// goes out. The upload branch wins: the typed text becomes a display-only
/// annotation and only the file's content is transmitted.
fn submit(app: &mut App, text: String) -> Effect {
    let trimmed = text.trim();

    if let Some(upload) = app.pending_upload.take() {
        let annotation = (!trimmed.is_empty()).then(|| trimmed.to_string());
        app.transcript.push(EntryKind::UserFile {
            name: upload.name.clone(),
            annotation,
        });
        app.in_flight += 1;
        return Effect::Send {
            id: Uuid::new_v4(),
            payload: Outgoing::File {
                name: upload.name,
                path: upload.path,
            },
        };
    }

    if trimmed.is_empty() {
        // Whitespace-only submit with nothing attached: silently ignored.
        return Effect::None;
    }

    app.transcript
        .push(EntryKind::UserText(trimmed.to_string()));
    app.in_flight += 1;
    Effect::Send {
        id: Uuid::new_v4(),
        payload: Outgoing::Text(trimmed.to_string()),
    }
}
