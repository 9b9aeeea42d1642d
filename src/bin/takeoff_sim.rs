//! Takeoff Sim - headless flight driver
//!
//! Run with: `cargo run --bin takeoff_sim -- --script hop --seconds 5 --json`
//!
//! Builds the city, flies a scripted sequence of control commands at a fixed
//! frame rate and logs what happens. With `--json` every telemetry tick prints
//! one HUD snapshot per line on stdout.
//!
//! Scripts:
//! - idle: engine stays off
//! - hop: full power for 1.5 s, then coast back down
//! - crash: full power, nose down and banked right into the block to the southeast
//! - any other value is read as a JSON file of `{ "at": secs, "command": ... }` steps

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use takeoff_engine::game::{
    CityConfig, CityLayout, ControlCommand, EventLog, FlightConfig, HelicopterSim, HudSnapshot,
    SimEvent,
};

/// Headless helicopter takeoff simulation
#[derive(Parser, Debug)]
#[command(name = "takeoff_sim")]
#[command(version, about = "Headless helicopter takeoff simulation", long_about = None)]
struct Cli {
    /// Flight config JSON (any subset of fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// City layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Fixed frame rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// idle, hop, crash, or a path to a JSON script
    #[arg(long, default_value = "hop")]
    script: String,

    /// Print a JSON HUD snapshot per telemetry tick
    #[arg(long)]
    json: bool,

    /// Frames between telemetry ticks
    #[arg(long, default_value_t = 30)]
    telemetry_every: u32,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// A command scheduled at a simulated time.
#[derive(Debug, Clone, Deserialize)]
struct ScriptStep {
    at: f32,
    command: ControlCommand,
}

fn builtin_script(name: &str) -> Option<Vec<ScriptStep>> {
    let step = |at, command| ScriptStep { at, command };
    match name {
        "idle" => Some(Vec::new()),
        "hop" => Some(vec![
            step(0.0, ControlCommand::EngineOn),
            step(1.5, ControlCommand::EngineOff),
        ]),
        "crash" => Some(vec![
            step(0.0, ControlCommand::EngineOn),
            step(0.0, ControlCommand::TiltForwardBack(-30.0)),
            step(0.0, ControlCommand::TiltLeftRight(-30.0)),
        ]),
        _ => None,
    }
}

fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let mut steps: Vec<ScriptStep> = serde_json::from_str(&json)
        .with_context(|| format!("parsing script {}", path.display()))?;
    steps.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(steps)
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Died { position } => warn!(?position, "helicopter destroyed"),
        other => info!(event = ?other, "event"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays clean for JSON telemetry
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.fps == 0 {
        bail!("--fps must be at least 1");
    }
    if !(cli.seconds.is_finite() && cli.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number, got {}", cli.seconds);
    }

    let config = match &cli.config {
        Some(path) => FlightConfig::load(path)
            .with_context(|| format!("loading flight config {}", path.display()))?,
        None => FlightConfig::default(),
    };

    let mut city_config = CityConfig::default();
    if let Some(seed) = cli.seed {
        city_config.seed = seed;
    }
    let city = CityLayout::generate(&city_config);

    let script = match builtin_script(&cli.script) {
        Some(steps) => steps,
        None => load_script(Path::new(&cli.script))?,
    };

    let mut sim = HelicopterSim::new(config, city.obstacles, city.refuel, EventLog::default())?;

    info!(
        script = %cli.script,
        seconds = cli.seconds,
        fps = cli.fps,
        "takeoff_sim v{}",
        env!("CARGO_PKG_VERSION")
    );

    let dt = 1.0 / cli.fps as f32;
    let frames = (cli.seconds * cli.fps as f32).round() as u64;
    let telemetry_every = u64::from(cli.telemetry_every.max(1));
    let mut pending = script.into_iter().peekable();

    for frame in 0..frames {
        while let Some(step) = pending.next_if(|step| step.at <= sim.elapsed()) {
            sim.apply(step.command);
        }

        sim.update(dt)?;

        for event in sim.sink_mut().drain() {
            log_event(&event);
        }

        if (frame + 1) % telemetry_every == 0 {
            let snapshot = HudSnapshot::capture(&sim);
            if cli.json {
                println!("{}", serde_json::to_string(&snapshot)?);
            } else {
                info!(
                    t = snapshot.time,
                    altitude = snapshot.position.y,
                    fuel = snapshot.fuel,
                    phase = ?snapshot.phase,
                    "telemetry"
                );
            }
        }
    }

    let position = sim.position();
    info!(
        x = position.x,
        y = position.y,
        z = position.z,
        fuel = sim.fuel(),
        "run complete"
    );
    Ok(())
}
