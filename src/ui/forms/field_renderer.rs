//! Field rendering utilities for forms

use crate::state::{FieldDefinition, FieldKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a single field takes (top border + value + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// What the field box shows, derived from its kind and current value
pub fn display_value(field: &FieldDefinition, value: Option<&str>, file_input: &str) -> String {
    let value = value.unwrap_or("");
    match &field.kind {
        FieldKind::Password => "•".repeat(value.chars().count()),
        FieldKind::Dropdown { .. } if value.is_empty() => "‹ Select an option ›".to_string(),
        FieldKind::Dropdown { .. } => format!("‹ {value} ›"),
        FieldKind::File if !file_input.is_empty() => file_input.to_string(),
        FieldKind::File if !value.is_empty() => format!("Selected File: {value}"),
        _ => value.to_string(),
    }
}

/// Draw one schema field, with its validation message on the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: Option<&str>,
    error: Option<&str>,
    is_active: bool,
    file_input: &str,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        style
    };

    let input = if is_active { file_input } else { "" };
    let display_str = display_value(field, value, input);

    let mut spans = if display_str.is_empty() {
        let hint = field.kind.placeholder();
        if is_active || hint.is_empty() {
            vec![Span::styled(hint, Style::default().fg(Color::DarkGray))]
        } else {
            vec![Span::styled("(empty)", style)]
        }
    } else {
        let text_style = if is_active {
            style
        } else {
            Style::default().fg(Color::White)
        };
        vec![Span::styled(display_str, text_style)]
    };

    // Dropdowns are chosen, not typed
    if is_active && (field.kind.is_typed() || field.kind.is_file()) {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut block = Block::default()
        .title(format!(" {} ", field.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FormSchema;
    use pretty_assertions::assert_eq;

    fn field(form_type: &str, name: &str) -> FieldDefinition {
        FormSchema::builtin()
            .unwrap()
            .get(form_type)
            .and_then(|t| t.field(name))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_text_shows_raw_value() {
        let f = field("userInfo", "firstName");
        assert_eq!(display_value(&f, Some("Jane"), ""), "Jane");
        assert_eq!(display_value(&f, None, ""), "");
    }

    #[test]
    fn test_password_is_masked() {
        let f = field("paymentInfo", "cvv");
        assert_eq!(display_value(&f, Some("123"), ""), "•••");
    }

    #[test]
    fn test_dropdown_wraps_choice() {
        let f = field("addressInfo", "state");
        assert_eq!(display_value(&f, Some("Texas"), ""), "‹ Texas ›");
        assert_eq!(display_value(&f, None, ""), "‹ Select an option ›");
    }

    #[test]
    fn test_file_prefers_typed_path() {
        let f = field("userInfo", "aadhar");
        assert_eq!(
            display_value(&f, Some("a.png"), ""),
            "Selected File: a.png"
        );
        assert_eq!(display_value(&f, Some("a.png"), "/tmp/b"), "/tmp/b");
        assert_eq!(display_value(&f, None, ""), "");
    }
}
