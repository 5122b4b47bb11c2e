//! The panels making up the single screen.

pub mod jar;
pub mod options;
pub mod result;
pub mod wheel;

use ratatui::prelude::*;

use dl_core::Mode;

use crate::app::DrawApp;

/// The central area that presents a draw; one per mode.
pub trait Stage {
    /// Catalog key of the panel title.
    fn title_key(&self) -> &'static str;

    /// Draw the stage into the given area.
    fn draw(&self, frame: &mut Frame, area: Rect, app: &DrawApp);
}

/// The stage presenting draws in `mode`.
pub fn stage_for(mode: Mode) -> &'static dyn Stage {
    match mode {
        Mode::Jar => &jar::JarStage,
        Mode::Wheel => &wheel::WheelStage,
    }
}

/// Draw the title and mode selector line.
pub fn draw_mode_bar(frame: &mut Frame, area: Rect, app: &DrawApp) {
    let active = app.session.mode();
    let mut spans = vec![
        Span::styled(app.t("siteName"), Style::default().fg(Color::Yellow).bold()),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
    ];

    for (i, mode) in [Mode::Jar, Mode::Wheel].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let key = match mode {
            Mode::Jar => "modeJar",
            Mode::Wheel => "modeWheel",
        };
        let style = if mode == active {
            Style::default().fg(Color::Black).bg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", app.t(key)), style));
    }

    spans.push(Span::styled(
        format!("  [{}]", app.lang.native_name()),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(spans)), area);
}
