//! Wheel stage: segments on a canvas, a pointer at the top, and the power gauge.

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use dl_core::{Snapshot, abbreviate, displayed_angle, segment_at, segment_color, spin_progress};

use super::Stage;
use crate::app::DrawApp;
use crate::shared::segment_style_color;

/// Dots drawn along the rim of each segment.
const RIM_DOTS: usize = 48;

/// Wheel mode presentation.
pub struct WheelStage;

/// Angle the wheel shows right now.
pub fn current_angle(snap: &Snapshot) -> f64 {
    match (snap.draw_elapsed, snap.draw_duration) {
        (Some(elapsed), Some(duration)) => displayed_angle(
            snap.rotation_start,
            snap.rotation_target,
            spin_progress(elapsed, duration),
        ),
        _ => snap.rotation_target,
    }
}

/// Canvas point at `degrees` clockwise from the top, at `radius`.
fn polar(degrees: f64, radius: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (radius * rad.sin(), radius * rad.cos())
}

impl Stage for WheelStage {
    fn title_key(&self) -> &'static str {
        "modeWheel"
    }

    fn draw(&self, frame: &mut Frame, area: Rect, app: &DrawApp) {
        let block = Block::default()
            .title(format!(" {} ", app.t(self.title_key())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 6 || inner.width < 20 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let snap = app.session.snapshot();
        draw_wheel(frame, chunks[0], &snap);

        let hint = if snap.is_drawing {
            app.t("luckywheel_spinning")
        } else if snap.is_charging {
            app.t("luckywheel_release")
        } else {
            format!("Space: {}", app.t("luckywheel_charge"))
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            chunks[1],
        );

        let gauge_color = match snap.power {
            0..=33 => Color::Green,
            34..=66 => Color::Yellow,
            _ => Color::Red,
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(gauge_color))
            .percent(snap.power.min(100) as u16)
            .label(format!("{} {}%", app.t("luckywheel_power"), snap.power));
        frame.render_widget(gauge, chunks[2]);
    }
}

fn draw_wheel(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let n = snap.options.len();
    let angle = current_angle(snap);
    let under = (n > 0).then(|| segment_at(angle, n));

    // Terminal cells are about twice as tall as wide.
    let aspect = if area.height == 0 {
        1.0
    } else {
        f64::from(area.width) / (f64::from(area.height) * 2.0)
    };
    let span = 1.3;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-span * aspect, span * aspect])
        .y_bounds([-span, span])
        .paint(move |ctx| {
            if n == 0 {
                let rim: Vec<(f64, f64)> = (0..RIM_DOTS * 4)
                    .map(|i| polar(i as f64 * 360.0 / (RIM_DOTS * 4) as f64, 1.0))
                    .collect();
                ctx.draw(&Points {
                    coords: &rim,
                    color: Color::DarkGray,
                });
                return;
            }
            let seg = 360.0 / n as f64;
            for i in 0..n {
                let color = segment_style_color(segment_color(i));
                let from = i as f64 * seg + angle;
                let rim: Vec<(f64, f64)> = (0..=RIM_DOTS)
                    .map(|k| polar(from + seg * k as f64 / RIM_DOTS as f64, 1.0))
                    .collect();
                ctx.draw(&Points {
                    coords: &rim,
                    color,
                });
                let (x, y) = polar(from, 1.0);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();
            for (i, option) in snap.options.iter().enumerate() {
                let centre = i as f64 * seg + seg / 2.0 + angle;
                let (x, y) = polar(centre, 0.6);
                let color = segment_style_color(segment_color(i));
                let style = if Some(i) == under {
                    Style::default().fg(Color::Black).bg(color).bold()
                } else {
                    Style::default().fg(color)
                };
                ctx.print(x, y, Span::styled(abbreviate(option, 6), style));
            }
            // Pointer
            ctx.print(0.0, 1.15, Span::styled("\u{25bc}", Style::default().fg(Color::White).bold()));
        });

    frame.render_widget(canvas, area);
}
