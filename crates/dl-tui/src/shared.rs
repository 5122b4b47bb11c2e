//! Shared utilities for the panels: layout helpers, colours, and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use dl_core::SegmentColor;

use crate::app::DrawApp;

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Terminal colour for a wheel segment.
pub fn segment_style_color(color: SegmentColor) -> Color {
    match color {
        SegmentColor::Red => Color::Red,
        SegmentColor::Orange => Color::Rgb(255, 165, 0),
        SegmentColor::Yellow => Color::Yellow,
        SegmentColor::Green => Color::Green,
        SegmentColor::Cyan => Color::Cyan,
        SegmentColor::Blue => Color::Blue,
        SegmentColor::Purple => Color::Magenta,
    }
}

/// Draw the help popup overlay in the app's language.
pub fn draw_help_popup(frame: &mut Frame, app: &DrawApp) {
    let area = centered_rect(60, 60, frame.area());

    let mut help_text = vec![
        Line::from(app.t("help_title")).style(Style::default().bold()),
        Line::from(""),
    ];
    for key in [
        "help_add",
        "help_charge",
        "help_select",
        "help_mode",
        "help_try_again",
        "help_reset",
        "help_lang",
        "help_quit",
    ] {
        help_text.push(Line::from(format!("  {}", app.t(key))));
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from("  F1  Toggle this help"));

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
