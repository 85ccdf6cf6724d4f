//! Tilted CLI
//!
//! Replay scripted input against a headless viewport and inspect configs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tilted_core::{Config, ValidatedConfig};
use tilted_viewport::Tilt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::{Replay, Script};

#[derive(Parser)]
#[command(name = "tilted")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tilted viewport tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and print every flushed transform
    Replay {
        /// Script file (TOML)
        script: PathBuf,
    },

    /// Print the zoom step table with the tilt at each step
    Steps {
        /// Config file (TOML); defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a config file
    Check {
        /// Config file (TOML)
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay { script } => cmd_replay(&script, cli.json),
        Commands::Steps { config } => cmd_steps(config.as_deref(), cli.json),
        Commands::Check { config } => cmd_check(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<ValidatedConfig> {
    let config = match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Config::from_toml_str(&source)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => Config::default(),
    };
    config.validate().context("Config failed validation")
}

fn cmd_replay(path: &Path, json: bool) -> Result<()> {
    let script = Script::load(path)?;
    info!("Replaying {}", path.display());
    let replay = script::replay(&script)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
    } else {
        print_replay(&replay);
    }
    Ok(())
}

fn print_replay(replay: &Replay) {
    for frame in &replay.frames {
        println!("{:>9.1} ms  {}", frame.time, frame.values.to_css());
    }
    for overlay in &replay.overlays {
        println!("overlay {:?}: rotateX({}deg)", overlay.kind, overlay.rotate_x);
    }

    let snapshot = &replay.snapshot;
    println!();
    println!(
        "coords ({}, {})  limits ({}, {})..({}, {})",
        snapshot.coords.x,
        snapshot.coords.y,
        snapshot.min.x,
        snapshot.min.y,
        snapshot.max.x,
        snapshot.max.y
    );
    println!("scale {}  tilt {}deg", snapshot.scale, snapshot.tilt);
    if !replay.settled {
        println!("still animating (edge pan or unfinished animation)");
    }
}

#[derive(Serialize)]
struct StepRow {
    index: usize,
    scale: f64,
    tilt: f64,
    default: bool,
}

fn cmd_steps(path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(path)?;
    let tilt = Tilt::from_config(&config);
    let rows: Vec<StepRow> = config
        .steps()
        .values()
        .iter()
        .enumerate()
        .map(|(index, &scale)| StepRow {
            index,
            scale,
            tilt: tilt.angle(scale),
            default: index == config.scale_default_step,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:>5}  {:>8}  {:>8}", "step", "scale", "tilt");
    for row in &rows {
        let marker = if row.default { "  (default)" } else { "" };
        println!(
            "{:>5}  {:>8}  {:>8}{}",
            row.index, row.scale, row.tilt, marker
        );
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    info!(
        "{} is valid: {} steps from {} to {}",
        path.display(),
        config.steps().len(),
        config.steps().first(),
        config.steps().last()
    );
    Ok(())
}
