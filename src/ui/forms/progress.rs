//! Completion gauge shown above the fields

use crate::app::App;
use crate::state::ProgressColor;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub const PROGRESS_HEIGHT: u16 = 3;

fn gauge_color(color: ProgressColor) -> Color {
    match color {
        ProgressColor::Complete => Color::Green,
        ProgressColor::Incomplete => Color::Red,
    }
}

/// Draw the gauge. Nothing is drawn when the form has no fields.
pub fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let engine = &app.state.engine;
    let Some(percent) = engine.progress() else {
        return;
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(gauge_color(engine.progress_color())))
        .percent(percent.min(100))
        .label(format!("Progress: {percent}%"));

    frame.render_widget(gauge, area);
}
