use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, labels: &[String]) -> Result<(), String> {
    let mut session = dl_core::DrawSession::new(ctx.config.clone()).map_err(|e| e.to_string())?;
    let labels: Vec<String> = labels
        .iter()
        .map(|l| dl_core::truncate_label(l, ctx.config.max_label_chars))
        .collect();
    session.set_options(&labels);

    for (i, option) in session.options().as_slice().iter().enumerate() {
        println!("  {} {option}", format!("{:>2}.", i + 1).dimmed());
    }
    Ok(())
}
