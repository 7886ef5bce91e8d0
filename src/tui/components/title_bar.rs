//! # TitleBar Component
//!
//! Top status bar: the endpoint in use, the latest status notice, and how
//! many sends are still awaiting a reply. Stateless — all three values are
//! props owned elsewhere (`server` and `status` by the App, the in-flight
//! count by the send protocol).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub server: &'a str,
    pub status: &'a str,
    pub in_flight: usize,
}

impl<'a> TitleBar<'a> {
    fn text(&self) -> String {
        let mut text = format!("confab ({})", self.server);
        if !self.status.is_empty() {
            text.push_str(&format!(" | {}", self.status));
        }
        if self.in_flight > 0 {
            text.push_str(&format!(" | {} awaiting reply", self.in_flight));
        }
        text
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
