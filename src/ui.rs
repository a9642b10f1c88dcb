use ratatui::{prelude::*, widgets::*};

use crate::app::state::Phase;

/// Renders a text input field with cursor
pub fn render_input<'a>(
    content: &'a str,
    title: &'a str,
    is_editing: bool,
) -> Paragraph<'a> {
    let style = if is_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Label shown for each workflow phase
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "waiting for a file",
        Phase::FileSelected => "file selected",
        Phase::Converting => "converting",
        Phase::ResultReady => "sketch ready",
    }
}

/// Accent color for each workflow phase
pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::DarkGray,
        Phase::FileSelected => Color::Cyan,
        Phase::Converting => Color::Yellow,
        Phase::ResultReady => Color::Green,
    }
}

/// Centered overlay area for popups
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels_are_distinct() {
        let labels = [
            phase_label(Phase::Idle),
            phase_label(Phase::FileSelected),
            phase_label(Phase::Converting),
            phase_label(Phase::ResultReady),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in labels.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, area);
        assert!(inner.width <= area.width);
        assert!(inner.height <= area.height);
        assert!(inner.x >= area.x && inner.y >= area.y);
    }
}
