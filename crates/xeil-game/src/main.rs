//! Xeil: headless driver for the infinite-space explorer.
//!
//! Loads the config, starts logging, and runs the simulation at a fixed
//! frame rate on a manual clock. With `--target` or `--coords` it flies the
//! autopilot there and prints the revealed dossiers; without, it holds still
//! at the origin and reports whatever it scanned.
//!
//! Run with: `cargo run -p xeil-game -- --target Vega`

mod hud;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use xeil_config::{CliArgs, Config, ConfigError, default_config_dir};
use xeil_sim::{ManualClock, Simulation};

use crate::hud::HudReport;

/// CLI arguments for the game binary.
#[derive(Parser, Debug)]
#[command(name = "xeil", about = "Xeil infinite-space explorer")]
struct GameArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Fly the autopilot to the planet with this name.
    #[arg(long, conflicts_with = "coords")]
    target: Option<String>,

    /// Fly the autopilot to these world coordinates.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    coords: Option<Vec<f64>>,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 5_000)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Print the final HUD as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = GameArgs::parse();

    let (config, config_dir) = match load_config(&args.cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("xeil: {err}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    xeil_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!("Xeil explorer");
    if let Some(dir) = &config_dir {
        info!("Config: {}", dir.display());
    }
    info!(
        "Zoom: {:.0} | Scan: radius={:.0}, duration={:.0}ms",
        config.zoom.initial, config.scan.radius, config.scan.duration_ms
    );

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xeil: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Loads `config.ron` from `--config` or the platform config directory and
/// applies CLI overrides. Without a config directory, defaults are used.
fn load_config(cli: &CliArgs) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let config_dir = cli.config.clone().or_else(default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(cli);
    Ok((config, config_dir))
}

fn run(args: &GameArgs, config: Config) -> Result<(), serde_json::Error> {
    let clock = ManualClock::new(0.0);
    let mut sim = Simulation::with_clock(config, clock.clone());

    let engaged = match (&args.target, args.coords.as_deref()) {
        (Some(name), _) => sim.request_autopilot(name),
        (None, Some(&[x, y])) => sim.request_autopilot_to(x, y),
        _ => false,
    };
    if (args.target.is_some() || args.coords.is_some()) && !engaged {
        warn!("Autopilot request ignored");
    }

    for _ in 0..args.ticks {
        clock.advance(args.frame_ms);
        sim.tick(args.frame_ms);
        if sim.autopilot_session().is_none() && sim.scan_state().is_revealed() {
            break;
        }
    }
    if sim.autopilot_session().is_some() {
        warn!("Stopped after {} ticks, still travelling", sim.ticks());
    }
    info!(
        "Finished after {} ticks at ({:.1}, {:.1})",
        sim.ticks(),
        sim.position().x,
        sim.position().y
    );

    let frame = sim.frame();
    let report = HudReport::from_frame(&frame, sim.ticks());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }
    Ok(())
}
