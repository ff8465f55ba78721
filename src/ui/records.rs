//! Submitted-records table

use crate::app::App;
use crate::state::{display_name_or_placeholder, FieldDefinition, Focus, SubmittedRecord};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Text shown for a file field with nothing attached
const NO_FILE: &str = "No file selected";

/// Table cell text for one field of a record
fn cell_text(field: &FieldDefinition, record: &SubmittedRecord) -> String {
    match record.data.get(&field.name).filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None if field.kind.is_file() => NO_FILE.to_string(),
        None => String::new(),
    }
}

/// Local submission time shown in the Submitted column
fn submitted_text(record: &SubmittedRecord) -> String {
    record
        .submitted_at
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

/// Draw the records of the selected data type
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let engine = &app.state.engine;
    let focused = app.state.focus == Focus::Records;
    let fields = engine.table_fields();
    let editing = engine.edit_target();
    let data_type = display_name_or_placeholder(engine.data_type());

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" Submitted Data for {data_type} "))
        .title_bottom(if focused { " ←/→ data type " } else { "" })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let records = engine.visible_records();
    if records.is_empty() {
        let empty = Paragraph::new(format!("No entries for {data_type}"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        fields
            .iter()
            .map(|f| Cell::from(f.label.as_str()))
            .chain([Cell::from("Submitted"), Cell::from("Actions")]),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = records
        .into_iter()
        .map(|record| {
            let action = if editing == Some(record.id) {
                "✎ editing"
            } else {
                "e:edit d:delete"
            };
            Row::new(
                fields
                    .iter()
                    .map(|f| Cell::from(cell_text(f, record)))
                    .chain([Cell::from(submitted_text(record)), Cell::from(action)]),
            )
        })
        .collect();

    let mut widths: Vec<Constraint> = fields.iter().map(|_| Constraint::Fill(1)).collect();
    widths.push(Constraint::Length(9));
    widths.push(Constraint::Length(16));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    if focused {
        state.select(Some(app.state.selected_record));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
