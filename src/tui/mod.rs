//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! background send tasks live here too: each submit spawns one task that
//! (optionally) reads the attached file, POSTs the message, and feeds the
//! resulting actions back over an mpsc channel. The reducer only ever
//! runs on this loop's thread, so the transcript needs no locking.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: while replies are outstanding
//! it draws every ~80ms so the pending spinner animates; otherwise it
//! sleeps up to 500ms and only redraws on events.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor
//! because ratatui's `set_cursor_position` resets the terminal's blink
//! timer on every `draw()` call, making blinking cursors appear erratic
//! during continuous redraws.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ChatBackend, HttpBackend};
use crate::core::action::{Action, Effect, Outgoing, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::transcript::EntryId;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable the Kitty keyboard protocol unconditionally (allows
        // Shift+Enter detection). Terminals that don't support it ignore
        // the escape sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(config.base_url.clone()));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background send tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Animate the pending spinner while any reply is outstanding
        let animating = app.in_flight > 0;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}

                // Ctrl+C always quits
                TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }

                TuiEvent::AttachPrompt => {
                    tui.input_box.enter_attach_mode();
                }

                // Removing a non-existent upload is a no-op in the reducer
                TuiEvent::RemoveAttachment => {
                    update(&mut app, Action::RemoveUpload);
                }

                e @ (TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown) => {
                    tui.message_list.handle_event(&e);
                }

                // Everything else belongs to the composer
                e => {
                    if let Some(input_event) = tui.input_box.handle_event(&e) {
                        match input_event {
                            InputEvent::Submit(text) => {
                                if let Effect::Send { id, payload } =
                                    update(&mut app, Action::Submit(text))
                                {
                                    spawn_send(backend.clone(), id, payload, tx.clone());
                                }
                                tui.message_list.pin_to_bottom();
                            }
                            InputEvent::AttachPath(raw) => {
                                attach_from_path(&mut app, &raw);
                            }
                            InputEvent::ContentChanged => {}
                        }
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (request lifecycle)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            // Every one of these mutates the transcript; bring it into view
            tui.message_list.pin_to_bottom();
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Validates a path typed into the attach prompt and stores the selection.
/// Rejections touch only the status bar; the composer state is unchanged.
fn attach_from_path(app: &mut App, raw: &str) {
    let path = PathBuf::from(raw);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| raw.to_string());
            update(app, Action::AttachSelected { name, path });
        }
        _ => {
            warn!("Attach rejected, not a file: {raw}");
            app.status_message = format!("Not a file: {raw}");
        }
    }
}

fn spawn_send(
    backend: Arc<dyn ChatBackend>,
    id: EntryId,
    payload: Outgoing,
    tx: mpsc::Sender<Action>,
) {
    info!("Dispatching chat request (id={id})");
    tokio::spawn(send_chat(backend, id, payload, tx));
}

/// One send invocation, start to finish: resolve the outgoing text (for
/// files, read and lossily decode the captured reference; the upload may
/// have been replaced or removed since, which changes nothing here), then
/// announce the dispatch, perform the request, and report the outcome.
///
/// There is no timeout and no cancellation: once started, the invocation
/// always runs to a resolution or hangs with its placeholder on screen.
pub async fn send_chat(
    backend: Arc<dyn ChatBackend>,
    id: EntryId,
    payload: Outgoing,
    tx: mpsc::Sender<Action>,
) {
    let message = match payload {
        Outgoing::Text(text) => text,
        Outgoing::File { name, path } => match tokio::fs::read(&path).await {
            // No binary handling: whatever the lossy decode produces is sent.
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                if tx
                    .send(Action::UploadReadFailed {
                        name,
                        error: e.to_string(),
                    })
                    .is_err()
                {
                    warn!("Failed to send read-failure action: receiver dropped");
                }
                return;
            }
        },
    };

    // The placeholder must land before the resolution; channel ordering
    // guarantees it since both come from this task.
    if tx.send(Action::RequestDispatched { id }).is_err() {
        warn!("Failed to send dispatch action: receiver dropped");
        return;
    }

    let result = backend.send_message(&message).await;
    if tx.send(Action::ReplyResolved { id, result }).is_err() {
        warn!("Failed to send resolution action: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedBackend;
    use uuid::Uuid;

    fn drain(rx: &mpsc::Receiver<Action>) -> Vec<Action> {
        rx.try_iter().collect()
    }

    #[tokio::test]
    async fn test_send_chat_text_dispatches_then_resolves() {
        let backend = Arc::new(ScriptedBackend::replying("hi"));
        let (tx, rx) = mpsc::channel();
        let id = Uuid::new_v4();

        send_chat(
            backend.clone(),
            id,
            Outgoing::Text("hello".to_string()),
            tx,
        )
        .await;

        let actions = drain(&rx);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::RequestDispatched { id: got } if got == id));
        assert!(
            matches!(&actions[1], Action::ReplyResolved { id: got, result: Ok(_) } if *got == id)
        );
        assert_eq!(backend.sent(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_send_chat_transmits_file_content() {
        let path = std::env::temp_dir().join(format!("confab-test-{}.txt", Uuid::new_v4()));
        std::fs::write(&path, "file body").unwrap();

        let backend = Arc::new(ScriptedBackend::replying("ok"));
        let (tx, rx) = mpsc::channel();

        send_chat(
            backend.clone(),
            Uuid::new_v4(),
            Outgoing::File {
                name: "notes.txt".to_string(),
                path: path.clone(),
            },
            tx,
        )
        .await;
        std::fs::remove_file(&path).ok();

        let actions = drain(&rx);
        assert_eq!(actions.len(), 2);
        // The decoded file content is the outgoing message text.
        assert_eq!(backend.sent(), vec!["file body"]);
    }

    #[tokio::test]
    async fn test_send_chat_missing_file_reports_read_failure() {
        let backend = Arc::new(ScriptedBackend::replying("never"));
        let (tx, rx) = mpsc::channel();

        send_chat(
            backend.clone(),
            Uuid::new_v4(),
            Outgoing::File {
                name: "gone.txt".to_string(),
                path: PathBuf::from("/definitely/not/here.txt"),
            },
            tx,
        )
        .await;

        let actions = drain(&rx);
        // No dispatch, no resolution, just the read failure.
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::UploadReadFailed { name, .. } if name == "gone.txt"));
        assert!(backend.sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_chat_lossy_decodes_non_utf8() {
        let path = std::env::temp_dir().join(format!("confab-test-{}.bin", Uuid::new_v4()));
        std::fs::write(&path, [0x68, 0x69, 0xFF]).unwrap();

        let backend = Arc::new(ScriptedBackend::replying("ok"));
        let (tx, rx) = mpsc::channel();

        send_chat(
            backend.clone(),
            Uuid::new_v4(),
            Outgoing::File {
                name: "blob.bin".to_string(),
                path: path.clone(),
            },
            tx,
        )
        .await;
        std::fs::remove_file(&path).ok();

        assert_eq!(drain(&rx).len(), 2);
        // Invalid bytes decode into the replacement character, silently.
        assert_eq!(backend.sent(), vec!["hi\u{FFFD}"]);
    }
}
