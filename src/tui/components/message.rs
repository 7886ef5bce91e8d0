use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{EntryKind, PENDING_TEXT};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Braille spinner shown on pending placeholders. Every frame is one cell
/// wide, so the spinner never changes an entry's height.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A stateless component that renders a single transcript entry with
/// role-based styling.
///
/// `Message` is a transient component: it's created fresh each frame with
/// the entry it needs to render and holds no state of its own.
///
/// # Styling
///
/// - **you** (green): typed text and sent files
/// - **ai** (blue): replies; the pending placeholder is dark gray italic
/// - **error** (red): inline failure notices
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height
/// using `textwrap` with options that match Ratatui's `Paragraph`
/// wrapping, so the parent `MessageList` can lay entries out without
/// rendering them first.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub kind: &'a EntryKind,
    /// Animation frame for the pending spinner.
    pub spinner_frame: usize,
}

impl<'a> Message<'a> {
    pub fn new(kind: &'a EntryKind, spinner_frame: usize) -> Self {
        Self {
            kind,
            spinner_frame,
        }
    }

    /// Role tag shown in the entry's border.
    fn role(kind: &EntryKind) -> &'static str {
        match kind {
            EntryKind::UserText(_) | EntryKind::UserFile { .. } => "you",
            EntryKind::Reply(_) | EntryKind::Pending => "ai",
            EntryKind::Error(_) => "error",
        }
    }

    fn style(kind: &EntryKind) -> Style {
        match kind {
            EntryKind::UserText(_) | EntryKind::UserFile { .. } => {
                Style::default().fg(Color::Green)
            }
            EntryKind::Reply(_) => Style::default().fg(Color::Blue),
            EntryKind::Error(_) => Style::default().fg(Color::Red),
            EntryKind::Pending => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        }
    }

    /// Text body of an entry. File entries show the name and, when
    /// present, the annotation on its own line.
    fn body(kind: &EntryKind, spinner_frame: usize) -> String {
        match kind {
            EntryKind::UserText(text) => text.clone(),
            EntryKind::UserFile { name, annotation } => match annotation {
                Some(note) => format!("File: {name}\n{note}"),
                None => format!("File: {name}"),
            },
            EntryKind::Reply(text) | EntryKind::Error(text) => text.clone(),
            EntryKind::Pending => format!(
                "{} {}",
                SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()],
                PENDING_TEXT
            ),
        }
    }

    /// Height this entry needs at the given width.
    ///
    /// Uses `textwrap` to predict the height *without* rendering, which
    /// lets the parent build its scroll layout in one pass. The wrapping
    /// options must match Ratatui's `Paragraph` defaults for a 1:1 mapping.
    pub fn calculate_height(kind: &EntryKind, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let body = Self::body(kind, 0);
        let content = body.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Self::style(self.kind);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(Self::role(self.kind))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let body = Self::body(self.kind, self.spinner_frame);
        let paragraph = Paragraph::new(body.trim().to_string())
            .style(style)
            .wrap(Wrap { trim: true });

        paragraph.render(inner_area, buf);
    }
}

/// `Message` is stateless; the Component impl just delegates to Widget.
impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let kind = EntryKind::UserText(String::new());
        assert_eq!(Message::calculate_height(&kind, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let kind = EntryKind::UserText("Hello world".to_string());
        assert_eq!(Message::calculate_height(&kind, 0), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let kind = EntryKind::UserText("Hello".to_string());
        assert_eq!(Message::calculate_height(&kind, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let kind = EntryKind::UserText("Hello world".to_string());
        // "Hello world" = 11 chars, width 9 → content_width = 5
        // Wraps to: "Hello" | "world" = 2 lines
        assert_eq!(Message::calculate_height(&kind, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_reply_newlines_count_as_lines() {
        let kind = EntryKind::Reply("Hi there\nfriend".to_string());
        assert_eq!(Message::calculate_height(&kind, 80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_file_with_annotation_has_two_lines() {
        let kind = EntryKind::UserFile {
            name: "a.txt".to_string(),
            annotation: Some("note".to_string()),
        };
        assert_eq!(Message::calculate_height(&kind, 80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_file_without_annotation_has_one_line() {
        let kind = EntryKind::UserFile {
            name: "a.txt".to_string(),
            annotation: None,
        };
        assert_eq!(Message::calculate_height(&kind, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_pending_is_stable_across_spinner_frames() {
        let kind = EntryKind::Pending;
        let h = Message::calculate_height(&kind, 80);
        assert_eq!(h, 1 + VERTICAL_OVERHEAD);
        // Every spinner frame is one cell wide, so the height holds.
        for frame in 0..SPINNER_FRAMES.len() {
            let body = Message::body(&kind, frame);
            assert!(body.contains(PENDING_TEXT));
        }
    }

    // ==========================================================================
    // Role and style tests
    // ==========================================================================

    #[test]
    fn role_tags_by_kind() {
        assert_eq!(Message::role(&EntryKind::UserText("t".into())), "you");
        assert_eq!(
            Message::role(&EntryKind::UserFile {
                name: "a".into(),
                annotation: None
            }),
            "you"
        );
        assert_eq!(Message::role(&EntryKind::Reply("r".into())), "ai");
        assert_eq!(Message::role(&EntryKind::Pending), "ai");
        assert_eq!(Message::role(&EntryKind::Error("e".into())), "error");
    }

    #[test]
    fn style_user_is_green() {
        let style = Message::style(&EntryKind::UserText("t".into()));
        assert_eq!(style.fg, Some(Color::Green));
    }

    #[test]
    fn style_reply_is_blue() {
        let style = Message::style(&EntryKind::Reply("t".into()));
        assert_eq!(style.fg, Some(Color::Blue));
    }

    #[test]
    fn style_error_is_red() {
        let style = Message::style(&EntryKind::Error("t".into()));
        assert_eq!(style.fg, Some(Color::Red));
    }

    #[test]
    fn style_pending_is_dark_gray_italic() {
        let style = Message::style(&EntryKind::Pending);
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn body_file_entry_shows_name_and_annotation() {
        let kind = EntryKind::UserFile {
            name: "a.txt".to_string(),
            annotation: Some("note".to_string()),
        };
        assert_eq!(Message::body(&kind, 0), "File: a.txt\nnote");
    }
}
