use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;

use super::Context;

pub fn run(ctx: &Context, labels: &[String], json: bool) -> Result<(), String> {
    let mut session = ctx.session(labels)?;

    if !session.start_jar_draw().map_err(|e| e.to_string())? {
        return Err("the jar refused to start a draw".into());
    }
    let duration = session.snapshot().draw_duration.unwrap_or_default();
    session.run_until_idle();

    let (index, label) =
        super::resolved(&session).ok_or_else(|| "the draw did not resolve".to_string())?;

    if json {
        let out = json!({
            "mode": session.mode(),
            "options": session.options().as_slice(),
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
        ctx.t("modeJar").bold(),
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
    table.set_header(vec!["#", "Option"]);
    for (i, option) in session.options().as_slice().iter().enumerate() {
        let marker = if i == index { " <" } else { "" };
        table.add_row(vec![format!("{}", i + 1), format!("{option}{marker}")]);
    }
    println!("{table}");
    println!();
    println!("  {}  {}", ctx.t("result_title").bold(), label.green().bold());

    Ok(())
}
