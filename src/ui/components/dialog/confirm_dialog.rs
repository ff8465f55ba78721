//! Confirmation dialog component for deleting a submitted entry

use crate::state::PendingDelete;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a confirmation dialog for a pending delete
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let area = frame.area();

    // Dialog dimensions
    let dialog_width = 50u16.min(area.width);
    let dialog_height = 11u16.min(area.height);

    // Center the dialog
    let dialog_x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = area.y + (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = Rect {
        x: dialog_x,
        y: dialog_y,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let max_display_len = dialog_width.saturating_sub(6) as usize;
    let display_text = truncate_string(&pending.entity_display, max_display_len);

    let mut content = vec![
        Line::from(Span::styled(
            "Confirm Deletion",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this entry?",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(display_text, Style::default().fg(Color::Cyan))),
        Line::from(""),
    ];

    // Add options with selection highlighting
    let options = [(false, "Cancel", Color::White), (true, "Delete", Color::Red)];

    for (is_delete, label, base_color) in options {
        let is_selected = pending.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(base_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("y/n", Style::default().fg(Color::Cyan)),
        Span::styled(" yes/no", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_string("Jane Doe", 20), "Jane Doe");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_string("Jane Doe, 42, aadhar.png", 10), "Jane Do...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_string("üüüüü", 5), "üüüüü");
    }
}
