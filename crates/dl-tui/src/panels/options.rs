//! Option input and list.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use dl_core::segment_color;

use crate::app::DrawApp;
use crate::shared::segment_style_color;

/// Draw the input line and the option list.
pub fn draw(frame: &mut Frame, area: Rect, app: &DrawApp) {
    let locked = app.session.is_drawing() || app.session.is_charging();
    let block = Block::default()
        .title(format!(" {} ({}) ", app.t("option_title"), app.session.options().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if locked {
            Color::DarkGray
        } else {
            Color::Cyan
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = Vec::new();

    if app.input.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(app.t("option_placeholder"), Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(app.input.clone()),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]));
    }
    lines.push(Line::from(""));

    let options = app.session.options();
    for (i, option) in options.as_slice().iter().enumerate() {
        let color = segment_style_color(segment_color(i));
        let marker = Span::styled("\u{25cf} ", Style::default().fg(color));
        let style = if i == app.selected {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
            marker,
            Span::styled(option.clone(), style),
        ]));
    }

    if options.len() < app.session.config().min_options {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            app.t("option_tip"),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    // Keep the selected row visible.
    let visible = inner.height.saturating_sub(2) as usize;
    let scroll = if visible > 0 && app.selected >= visible {
        (app.selected + 1 - visible) as u16
    } else {
        0
    };

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}
