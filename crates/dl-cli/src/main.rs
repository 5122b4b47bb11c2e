//! CLI frontend for the draw engine.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dl_core::Lang;

#[derive(Parser)]
#[command(
    name = "drawlots",
    about = "Draw lots from a jar or spin a lucky wheel",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file overriding the engine's design constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible draws
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output language: en, zh (default: from the environment)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull one option out of the jar
    Draw {
        /// Options to draw from (at least 2)
        #[arg(required = true)]
        options: Vec<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Charge the wheel to a power and spin it
    Spin {
        /// Options on the wheel (at least 2)
        #[arg(required = true)]
        options: Vec<String>,

        /// Power to charge to before releasing (0-100)
        #[arg(short, long, default_value = "50")]
        power: u32,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the options in a random order
    Shuffle {
        /// Options to shuffle
        #[arg(required = true)]
        options: Vec<String>,
    },

    /// Compute the rotation plan for a given segment without spinning
    Plan {
        /// Number of segments on the wheel
        #[arg(short = 'n', long)]
        options: usize,

        /// Segment the wheel should stop on
        #[arg(short, long)]
        index: usize,

        /// Charge power
        #[arg(short, long, default_value = "50")]
        power: u32,

        /// Resting angle left by the previous spin, in degrees
        #[arg(long, default_value = "0")]
        last: f64,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch the interactive terminal UI
    Tui,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let lang = match cli.lang.as_deref() {
        Some(code) => Lang::parse(code).ok_or_else(|| format!("unknown language '{code}'"))?,
        None => Lang::from_env(),
    };
    let ctx = commands::Context::load(cli.config.as_deref(), cli.seed, lang)?;

    match cli.command {
        Commands::Draw { options, json } => commands::draw::run(&ctx, &options, json),
        Commands::Spin {
            options,
            power,
            json,
        } => commands::spin::run(&ctx, &options, power, json),
        Commands::Shuffle { options } => commands::shuffle::run(&ctx, &options),
        Commands::Plan {
            options,
            index,
            power,
            last,
            json,
        } => commands::plan::run(&ctx, options, index, power, last, json),
        Commands::Tui => commands::tui::run(cli.config.as_deref(), cli.seed, lang),
    }
}
