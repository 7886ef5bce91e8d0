//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Scroll model
//!
//! The view sticks to the bottom: every transcript change re-pins it so
//! the newest entry is visible (the event loop calls
//! [`MessageListState::pin_to_bottom`] whenever the log mutates). Manual
//! scrolling unpins; scrolling back past the end re-pins.
//!
//! `MessageList` is a transient component (created each frame) wrapping
//! `&mut MessageListState` (persistent) and the transcript (props).
//! Heights are recomputed per frame — the log is small and the math is
//! cheap compared to the draw itself.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll state for the message list. Persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on render.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for clamping between frames).
    pub viewport_height: u16,
    /// Per-entry heights from the last layout pass.
    heights: Vec<u16>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            heights: Vec::new(),
        }
    }

    /// Re-engage stick-to-bottom; called after any transcript change so the
    /// newest entry is always brought into view.
    pub fn pin_to_bottom(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        let total: u16 = self.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        let total: u16 = self.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scroll events are handled on the state (not the transient component)
/// because they need data that persists across frames.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable transcript view. Created fresh each frame.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Layout: measure every entry at the current width.
        self.state.heights = self
            .transcript
            .entries
            .iter()
            .map(|entry| Message::calculate_height(&entry.kind, content_width))
            .collect();
        let total_height: u16 = self.state.heights.iter().sum();

        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        // 2. Render entries into the scroll canvas.
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (entry, &height) in self.transcript.entries.iter().zip(&self.state.heights) {
            let entry_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&entry.kind, self.spinner_frame), entry_rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
