//! Standalone TUI binary for drawing lots.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use dl_core::{DrawConfig, DrawSession, Lang, Mode};

#[derive(Parser)]
#[command(
    name = "drawlots-tui",
    about = "Interactive jar and wheel draws in the terminal",
    version
)]
struct Args {
    /// JSON file overriding the engine's design constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Display language: en, zh (default: from the environment)
    #[arg(long)]
    lang: Option<String>,

    /// Start in this mode (jar, wheel)
    #[arg(long, default_value = "jar")]
    mode: String,

    /// Options to start with
    options: Vec<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            DrawConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => DrawConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let lang = match args.lang.as_deref() {
        Some(code) => Lang::parse(code).ok_or_else(|| format!("unknown language '{code}'"))?,
        None => Lang::from_env(),
    };
    let mode = Mode::parse(&args.mode).ok_or_else(|| format!("unknown mode '{}'", args.mode))?;

    let max_chars = config.max_label_chars;
    let mut session = DrawSession::new(config).map_err(|e| e.to_string())?;
    session.set_mode(mode);
    for option in &args.options {
        session.add_option(&dl_core::truncate_label(option, max_chars));
    }
    session.drain_events();

    dl_tui::terminal::run(dl_tui::app::DrawApp::new(session, lang))
}
