//! Success dialog for completed submissions, deletions and file uploads

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

pub fn render_notice_dialog(frame: &mut Frame, title: &str, message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: Color::Green,
            border_color: Color::Green,
            message,
            hint: Some(dismiss_hint()),
            max_width: 50,
        },
    );
}
