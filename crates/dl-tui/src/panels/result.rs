//! Result panel.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::DrawApp;

/// Draw the landed option, or a hint while there is none.
pub fn draw(frame: &mut Frame, area: Rect, app: &DrawApp) {
    let block = Block::default()
        .title(format!(" {} ", app.t("result_title")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.session.result() {
        Some(result) => vec![
            Line::from(Span::styled(
                app.t("result_desc"),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                result.to_string(),
                Style::default().fg(Color::Green).bold(),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
            Line::from(vec![
                Span::styled("Ctrl+T ", Style::default().fg(Color::Yellow)),
                Span::raw(app.t("result_try_again")),
                Span::raw("   "),
                Span::styled("Ctrl+R ", Style::default().fg(Color::Yellow)),
                Span::raw(app.t("result_reset")),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "\u{2014}",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)],
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
