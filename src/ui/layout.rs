//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{display_name_or_placeholder, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header height in rows (top border + selector + bottom border)
const HEADER_HEIGHT: u16 = 3;

/// Most rows the records table may take from the form
const MAX_RECORDS_HEIGHT: u16 = 12;

/// Split the screen into header and body, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Body
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Split the body between the form and the records table
pub fn split_body(area: Rect, app: &App) -> (Rect, Rect) {
    // Borders + header row + one row per record (or the empty-state row)
    let rows = app.state.engine.visible_records().len().max(1) as u16;
    let table_height = (rows + 3).min(MAX_RECORDS_HEIGHT);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(table_height)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header with the form-type selector
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::FormType;
    let accent = if focused { Color::Cyan } else { Color::DarkGray };

    let name = display_name_or_placeholder(app.state.engine.active_type());
    let mut spans = vec![
        Span::styled("Form type: ", Style::default().fg(Color::Gray)),
        Span::styled("◀ ", Style::default().fg(accent)),
        Span::styled(
            name,
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::White })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(accent)),
    ];

    if app.state.engine.edit_target().is_some() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "✎ Editing entry",
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .title(" Dynamic Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    if let Some(spinner) = app.state.spinner_frame() {
        spans.push(Span::styled(
            format!("{spinner} Submitting "),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw("| "));
    }

    spans.push(Span::styled(
        get_focus_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    // Quit hint on the right
    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the focused control
fn get_focus_hints(app: &App) -> String {
    match app.state.focus {
        Focus::FormType => "←/→:form type  Tab:next  q:quit".to_string(),
        Focus::Field(_) => match app.state.focused_field() {
            Some(field) if field.kind.is_file() => {
                format!("type a path  Enter:attach  Tab:next  {SUBMIT_SHORTCUT}:submit")
            }
            Some(field) if !field.options().is_empty() => {
                format!("←/→:choose  Tab:next  {SUBMIT_SHORTCUT}:submit")
            }
            _ => format!("Tab:next  Shift+Tab:prev  {SUBMIT_SHORTCUT}:submit  Esc:back"),
        },
        Focus::Submit => "Enter:submit  Tab:next".to_string(),
        Focus::Records => "j/k:select  ←/→:data type  e:edit  d:delete".to_string(),
    }
}
