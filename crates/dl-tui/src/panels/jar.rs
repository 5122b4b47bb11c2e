//! Jar stage: a cup of sticks that shakes while a draw is in flight.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use dl_core::{Phase, abbreviate, segment_color};

use super::Stage;
use crate::app::DrawApp;
use crate::shared::segment_style_color;

/// Time a highlighted stick stays lit while shaking.
const SHAKE_STEP: u64 = 150;

/// Jar mode presentation.
pub struct JarStage;

impl Stage for JarStage {
    fn title_key(&self) -> &'static str {
        "modeJar"
    }

    fn draw(&self, frame: &mut Frame, area: Rect, app: &DrawApp) {
        let block = Block::default()
            .title(format!(" {} ", app.t(self.title_key())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 6 || inner.width < 20 {
            return;
        }

        let snap = app.session.snapshot();
        let n = snap.options.len();
        let elapsed = snap.draw_elapsed.unwrap_or(0);
        let lit = (snap.is_drawing && n > 0).then(|| (elapsed / SHAKE_STEP) as usize % n);
        // Alternate one column left and right while shaking.
        let offset = if snap.is_drawing && (elapsed / SHAKE_STEP) % 2 == 1 {
            " "
        } else {
            ""
        };

        let mut sticks: Vec<Span<'static>> = vec![Span::raw(format!("    {offset}"))];
        for i in 0..n.min(12) {
            let color = segment_style_color(segment_color(i));
            let style = if Some(i) == lit {
                Style::default().fg(Color::Black).bg(color).bold()
            } else {
                Style::default().fg(color)
            };
            sticks.push(Span::styled("\u{2503}", style));
            sticks.push(Span::raw(" "));
        }

        let width = (n.min(12) * 2).max(6);
        let mut lines = vec![
            Line::from(sticks),
            Line::from(format!("  {offset}\u{2572}{}\u{2571}", " ".repeat(width + 2))),
            Line::from(format!("   {offset}\u{2572}{}\u{2571}", "_".repeat(width))),
            Line::from(""),
        ];

        match snap.phase {
            Phase::Drawing => {
                lines.push(Line::from(Span::styled(
                    app.t("lotteryjar_drawing"),
                    Style::default().fg(Color::Yellow).bold(),
                )));
                if let Some(i) = lit {
                    lines.push(Line::from(Span::styled(
                        abbreviate(&snap.options[i], 6),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            Phase::Resolved => {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", app.t("lotteryjar_stick_label")),
                        Style::default().fg(Color::Red).bold(),
                    ),
                    Span::styled(
                        snap.result.clone().unwrap_or_default(),
                        Style::default().fg(Color::Green).bold(),
                    ),
                ]));
            }
            Phase::Ready => {
                lines.push(Line::from(Span::styled(
                    format!("Enter: {}", app.t("lotteryjar_start")),
                    Style::default().fg(Color::Green),
                )));
            }
            Phase::Setup => {
                lines.push(Line::from(Span::styled(
                    app.t("pleaseInput2"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(Paragraph::new(lines), chunks[0]);

        if let (Some(elapsed), Some(duration)) = (snap.draw_elapsed, snap.draw_duration) {
            let ratio = if duration == 0 {
                1.0
            } else {
                (elapsed as f64 / duration as f64).clamp(0.0, 1.0)
            };
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Yellow))
                .ratio(ratio)
                .label("");
            frame.render_widget(gauge, chunks[1]);
        }
    }
}
