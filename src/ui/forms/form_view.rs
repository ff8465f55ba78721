//! Form body: progress, fields and the submit button

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use super::progress::{draw_progress, PROGRESS_HEIGHT};
use crate::app::App;
use crate::state::{display_name, Focus};
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the active form, or a hint while the placeholder is selected
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let engine = &app.state.engine;
    let fields = engine.fields();

    let Some(form_type) = engine.active_type().filter(|_| !fields.is_empty()) else {
        draw_placeholder(frame, area);
        return;
    };

    let form_focused = matches!(app.state.focus, Focus::Field(_) | Focus::Submit);
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {} ", display_name(form_type)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(PROGRESS_HEIGHT)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_progress(frame, chunks[0], app);

    for (index, field) in fields.iter().enumerate() {
        let is_active = app.state.focus == Focus::Field(index);
        draw_field(
            frame,
            chunks[index + 1],
            field,
            engine.values().get(&field.name),
            engine.errors().get(&field.name).map(String::as_str),
            is_active,
            &app.state.file_input,
        );
    }

    // Keep the button narrow like a real form button
    let button_row = chunks[fields.len() + 1];
    let button_area = Rect {
        width: button_row.width.min(24),
        ..button_row
    };
    render_submit_button(
        frame,
        button_area,
        app.state.focus == Focus::Submit,
        app.state.spinner_frame(),
    );
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Choose a form type with ←/→ to begin.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(hint, area);
}
