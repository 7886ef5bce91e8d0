//! # AttachmentBar Component
//!
//! The pending-upload preview row, shown between the log and the composer
//! only while an upload is pending: the file name plus the removal hint.
//! Removal itself is Ctrl+X, handled in the event loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

/// Single-row preview of the pending upload. Stateless; the name is a prop.
pub struct AttachmentBar<'a> {
    pub name: &'a str,
}

impl<'a> Component for AttachmentBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("Attached: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.name,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (Ctrl+X to remove)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_shows_name_and_removal_hint() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = AttachmentBar { name: "notes.txt" };

        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("notes.txt"));
        assert!(text.contains("Ctrl+X to remove"));
    }
}
