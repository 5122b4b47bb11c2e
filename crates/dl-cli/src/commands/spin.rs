use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use dl_core::{DrawEventKind, DrawSession, Mode};

use super::Context;

pub fn run(ctx: &Context, labels: &[String], power: u32, json: bool) -> Result<(), String> {
    let mut session = ctx.session(labels)?;
    session.set_mode(Mode::Wheel);

    charge(&mut session, power);
    let charged = session.power();
    if !session.end_charge().map_err(|e| e.to_string())? {
        return Err(format!("{} (power {charged})", ctx.t("status_discarded")));
    }

    let extra_rounds = session
        .events()
        .iter()
        .rev()
        .find_map(|e| match e.kind {
            DrawEventKind::SpinPlanned { extra_rounds, .. } => Some(extra_rounds),
            _ => None,
        })
        .unwrap_or_default();
    let target = session.rotation_target();
    let duration = session.run_until_idle();

    let (index, label) =
        super::resolved(&session).ok_or_else(|| "the spin did not resolve".to_string())?;

    if json {
        let out = json!({
            "mode": session.mode(),
            "options": session.options().as_slice(),
            "power": charged,
            "extra_rounds": extra_rounds,
            "rotation_target": target,
            "last_rotation": session.last_rotation(),
            "index": index,
            "result": label,
            "duration": duration,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    println!(
        "  {} {}",
        ctx.t("modeWheel").bold(),
        format!(
            "({} options, {})",
            session.options().len(),
            super::seconds(duration)
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", ""]);
    table.add_row(vec![ctx.t("luckywheel_power"), charged.to_string()]);
    table.add_row(vec!["Rounds".to_string(), extra_rounds.to_string()]);
    table.add_row(vec!["Target".to_string(), format!("{target:.1}°")]);
    table.add_row(vec!["Segment".to_string(), format!("{}", index + 1)]);
    println!("{table}");
    println!();
    println!("  {}  {}", ctx.t("result_title").bold(), label.green().bold());

    Ok(())
}

/// Hold the charge until power reaches `target` or saturates.
fn charge(session: &mut DrawSession, target: u32) {
    if !session.start_charge() {
        return;
    }
    let step = session.config().tick_interval;
    while session.is_charging() && session.power() < target {
        session.advance(step);
    }
}
