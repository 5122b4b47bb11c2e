use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dl_core::{RotationPlanner, segment_at};

use super::Context;

pub fn run(
    ctx: &Context,
    n: usize,
    index: usize,
    power: u32,
    last: f64,
    json: bool,
) -> Result<(), String> {
    let plan = RotationPlanner::from_config(&ctx.config)
        .plan(n, index, power, last)
        .map_err(|e| e.to_string())?;
    let lands_on = segment_at(plan.target, n);

    if json {
        let mut out = serde_json::to_value(plan).map_err(|e| e.to_string())?;
        out["lands_on"] = lands_on.into();
        println!(
            "{}",
            serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    println!(
        "  {} {}",
        "Rotation plan".bold(),
        format!("({n} segments, power {power}, from {last:.1}°)").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", ""]);
    table.add_row(vec!["Segment angle".to_string(), format!("{:.2}°", plan.segment_angle)]);
    table.add_row(vec!["Rounds".to_string(), plan.extra_rounds.to_string()]);
    table.add_row(vec!["Target".to_string(), format!("{:.1}°", plan.target)]);
    table.add_row(vec!["Baseline".to_string(), format!("{:.1}°", plan.baseline)]);
    table.add_row(vec!["Lands on".to_string(), format!("segment {lands_on}")]);
    println!("{table}");

    if lands_on != index {
        return Err(format!("plan lands on segment {lands_on}, expected {index}"));
    }
    Ok(())
}
