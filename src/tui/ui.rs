use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AttachmentBar, MessageList, TitleBar};

/// Frame layout, top to bottom: title bar, message log, the attachment
/// preview row (collapsed to zero height when no upload is pending), and
/// the composer.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let attach_height = if app.pending_upload.is_some() { 1 } else { 0 };
    let input_height = tui.input_box.calculate_height(frame.area().width);

    let layout = Layout::vertical([
        Length(1),
        Min(0),
        Length(attach_height),
        Length(input_height),
    ]);
    let [title_area, log_area, attach_area, input_area] = layout.areas(frame.area());

    TitleBar {
        server: &app.server_label,
        status: &app.status_message,
        in_flight: app.in_flight,
    }
    .render(frame, title_area);

    MessageList::new(&mut tui.message_list, &app.transcript, spinner_frame)
        .render(frame, log_area);

    if let Some(upload) = &app.pending_upload {
        AttachmentBar { name: &upload.name }.render(frame, attach_area);
    }

    tui.input_box.upload_pending = app.pending_upload.is_some();
    tui.input_box.render(frame, input_area);
}
