//! # InputBox Component
//!
//! The composer: captures message text, and doubles as the path prompt
//! when attaching a file.
//!
//! ## Modes
//!
//! - `Compose`: normal message editing. Enter submits the buffer as-is;
//!   whether an empty submit means anything is the reducer's call, not
//!   ours. Shift+Enter (or Ctrl+J) arrives as `InputChar('\n')` and
//!   inserts a literal newline.
//! - `Attach`: a one-line path prompt opened with Ctrl+F. Enter selects
//!   the typed path, Esc cancels. The compose buffer (an annotation,
//!   perhaps) is kept intact underneath and restored on return.
//!
//! ## Placeholder
//!
//! The placeholder is derived from the `upload_pending` prop: the default
//! hint when the composer is free, empty while an upload is pending, and
//! back to the default once the upload is removed or sent.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Left + right borders consumed horizontally by the bordered block.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders consumed vertically.
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in.
const MAX_VISIBLE_LINES: u16 = 6;

/// Shown when the composer is empty and no upload is pending.
pub const DEFAULT_PLACEHOLDER: &str = "Type a message…";
/// Hint inside the attach prompt.
const ATTACH_HINT: &str = "Path to attach…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerMode {
    Compose,
    Attach,
}

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter in compose mode: the whole buffer, already taken.
    Submit(String),
    /// Enter in attach mode: the trimmed path the user typed.
    AttachPath(String),
    /// Text or mode changed (parent just needs a redraw).
    ContentChanged,
}

pub struct InputBox {
    /// Message text; serves as the annotation while an upload is pending.
    pub buffer: String,
    /// Path being typed in attach mode. Edited at its end only.
    attach_buffer: String,
    pub mode: ComposerMode,
    /// Prop: true while an upload is pending (clears the placeholder).
    pub upload_pending: bool,
    /// Cursor byte offset into `buffer` (compose mode only).
    cursor: usize,
    /// Line offset for internal scrolling of tall compose buffers.
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            attach_buffer: String::new(),
            mode: ComposerMode::Compose,
            upload_pending: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Switch into the attach prompt, leaving the compose buffer untouched.
    pub fn enter_attach_mode(&mut self) {
        self.mode = ComposerMode::Attach;
        self.attach_buffer.clear();
    }

    /// Required height for the current content, clamped to the viewport
    /// limit. Includes the borders.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        match self.mode {
            ComposerMode::Attach => 1 + VERTICAL_OVERHEAD,
            ComposerMode::Compose => {
                let width = inner_width(content_width);
                wrap_line_count(&self.buffer, width).min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
            }
        }
    }

    fn handle_compose(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                // Always emits, even when empty: consuming the composer is
                // atomic and the reducer decides what an empty submit means.
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }

    fn handle_attach(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.attach_buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.attach_buffer
                    .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.attach_buffer.pop();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                let path = self.attach_buffer.trim().to_string();
                if path.is_empty() {
                    return None;
                }
                // Reset the prompt so the same path can be selected again.
                self.attach_buffer.clear();
                self.mode = ComposerMode::Compose;
                Some(InputEvent::AttachPath(path))
            }
            TuiEvent::Escape => {
                self.attach_buffer.clear();
                self.mode = ComposerMode::Compose;
                Some(InputEvent::ContentChanged)
            }
            _ => None,
        }
    }

    /// Keep the cursor's line inside the visible window of a tall buffer.
    fn update_scroll_offset(&mut self, content_width: u16) {
        let width = inner_width(content_width);
        let total_lines = wrap_line_count(&self.buffer, width);

        if total_lines <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.cursor_line(width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Which wrapped line (0-based) the cursor sits on.
    fn cursor_line(&self, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let before = &self.buffer[..self.cursor];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = lines.len().saturating_sub(1) as u16;
        // A trailing newline right before the cursor isn't represented as
        // an empty wrapped line.
        if self.cursor > 0
            && self.buffer.as_bytes()[self.cursor - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            line += 1;
        }
        line
    }

    /// Screen position for the terminal cursor.
    fn cursor_screen_pos(&self, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + 1, area.y + 1);
        }

        match self.mode {
            ComposerMode::Attach => {
                let col = (self.attach_buffer.width() as u16).min(width.saturating_sub(1));
                (area.x + 1 + col, area.y + 1)
            }
            ComposerMode::Compose => {
                let row = self.cursor_line(width).saturating_sub(self.scroll_offset);
                let before = &self.buffer[..self.cursor];
                let col = if self.cursor > 0 && self.buffer.as_bytes()[self.cursor - 1] == b'\n' {
                    0
                } else {
                    let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
                    let logical = &before[last_newline..];
                    textwrap::wrap(logical, wrap_options(width))
                        .last()
                        .map(|seg| seg.as_ref().width() as u16)
                        .unwrap_or(0)
                };
                (
                    area.x + 1 + col.min(width),
                    area.y + 1 + row.min(MAX_VISIBLE_LINES - 1),
                )
            }
        }
    }

    /// Visible slice of a tall compose buffer (pre-wrapped lines).
    fn visible_text(&self, content_width: u16) -> String {
        if self.scroll_offset == 0 {
            return self.buffer.clone();
        }
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = self.scroll_offset as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.mode {
            ComposerMode::Compose => "Message",
            ComposerMode::Attach => "Attach file (Enter to select, Esc to cancel)",
        };
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(title);

        let paragraph = match self.mode {
            ComposerMode::Attach if self.attach_buffer.is_empty() => {
                Paragraph::new(ATTACH_HINT).style(Style::default().fg(Color::DarkGray))
            }
            ComposerMode::Attach => Paragraph::new(self.attach_buffer.clone())
                .style(Style::default().fg(Color::Green)),
            ComposerMode::Compose if self.buffer.is_empty() => {
                let placeholder = if self.upload_pending {
                    ""
                } else {
                    DEFAULT_PLACEHOLDER
                };
                Paragraph::new(placeholder).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
            }
            ComposerMode::Compose => {
                self.update_scroll_offset(area.width);
                Paragraph::new(self.visible_text(area.width))
                    .wrap(Wrap { trim: false })
                    .style(Style::default().fg(Color::Green))
            }
        };

        frame.render_widget(paragraph.block(block), area);

        let (cursor_x, cursor_y) = self.cursor_screen_pos(area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match self.mode {
            ComposerMode::Compose => self.handle_compose(event),
            ComposerMode::Attach => self.handle_attach(event),
        }
    }
}

// ── Wrapping helpers ────────────────────────────────────────────────────────

/// Build textwrap options configured for the input box inner width.
fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after subtracting the border overhead.
fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Count wrapped lines, accounting for trailing newlines that textwrap
/// may not represent as empty lines.
fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);

    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }

    count
}

/// Byte offset of the previous character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
