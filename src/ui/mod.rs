//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod records;

use crate::app::App;
use crate::state::Notice;
use components::{render_confirm_dialog, render_error_dialog, render_notice_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header_area, body_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    if app.state.records_visible() {
        let (form_area, records_area) = layout::split_body(body_area, app);
        forms::draw_form(frame, form_area, app);
        records::draw(frame, records_area, app);
    } else {
        forms::draw_form(frame, body_area, app);
    }

    layout::draw_status_bar(frame, app);

    // Dialogs overlay everything else
    if let Some(notice) = app.state.engine.current_notice() {
        match notice {
            Notice::ConfirmDelete(pending) => render_confirm_dialog(frame, pending),
            Notice::ValidationFailed => render_error_dialog(frame, &notice.message()),
            _ => render_notice_dialog(frame, notice.title(), &notice.message()),
        }
    }
}
