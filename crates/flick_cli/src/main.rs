//! Flick CLI
//!
//! Validate scroll configurations, inspect flick plans and replay gesture
//! scripts through a scroller.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flick_core::Offset;
use flick_scroll::{
    BoundaryPolicy, FlickPlanner, RecordingSurface, ScrollConfig, ScrollEvent, ScrollEvents,
    Scroller,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::GestureScript;

/// Longest time a simulation keeps ticking after the last input
const MAX_SETTLE_MS: f64 = 10_000.0;

#[derive(Parser)]
#[command(name = "flick")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Momentum scrolling physics toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scroll config file and print the effective values
    Check {
        /// TOML config file
        config: PathBuf,
    },

    /// Show the flick a release velocity produces
    Plan {
        /// Release velocity in px/ms
        #[arg(short, long, allow_hyphen_values = true)]
        velocity: f32,

        /// TOML config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay a gesture script and print the scroll events
    Simulate {
        /// TOML gesture script
        #[arg(short, long)]
        script: PathBuf,

        /// TOML config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include per-frame offset changes in text output
        #[arg(long)]
        frames: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
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

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { config } => cmd_check(&config),

        Commands::Plan {
            velocity,
            config,
            json,
        } => cmd_plan(velocity, config.as_deref(), json),

        Commands::Simulate {
            script,
            config,
            frames,
            json,
        } => cmd_simulate(&script, config.as_deref(), frames, json),
    }
}

fn load_config(path: Option<&Path>) -> Result<ScrollConfig> {
    match path {
        Some(path) => ScrollConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ScrollConfig::default()),
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    info!("Config {} is valid", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlickReport {
    velocity: f32,
    flicks: bool,
    distance: f32,
    duration_ms: f32,
}

fn flick_report(config: &ScrollConfig, velocity: f32) -> FlickReport {
    let boundary = BoundaryPolicy::new(false, config.elasticity, config.snap_back);
    let planner = FlickPlanner::new(&config.flicking, boundary);
    FlickReport {
        velocity,
        flicks: planner.qualifies(velocity),
        distance: planner.distance(velocity),
        duration_ms: planner.duration(velocity),
    }
}

fn cmd_plan(velocity: f32, config: Option<&Path>, json: bool) -> Result<()> {
    if !velocity.is_finite() {
        anyhow::bail!("Velocity must be a finite number, got {}", velocity);
    }
    let config = load_config(config)?;
    let report = flick_report(&config, velocity);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.flicks {
        println!(
            "{:.3} px/ms is below minSpeed {:.3} px/ms: no flick",
            velocity, config.flicking.min_speed
        );
        return Ok(());
    }
    println!("Velocity: {:.3} px/ms", report.velocity);
    println!("Distance: {:.1} px (pointer direction)", report.distance);
    println!("Duration: {:.0} ms", report.duration_ms);
    Ok(())
}

#[derive(Debug, Serialize)]
struct TimedEvent {
    at: f64,
    #[serde(flatten)]
    event: ScrollEvent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    events: Vec<TimedEvent>,
    final_offset: Offset,
    final_state: String,
    trajectories_played: usize,
}

fn simulate(script: &GestureScript, config: ScrollConfig) -> Result<SimulationReport> {
    let mut scroller = Scroller::new(config, script.options(), RecordingSurface::new())?;
    scroller.refresh_extents(&script.sizes, true);

    let mut events = Vec::new();
    let mut record = |at: f64, batch: ScrollEvents| {
        events.extend(batch.into_iter().map(|event| TimedEvent { at, event }));
    };

    let mut frame = 0.0;
    for step in &script.steps {
        while frame + script.frame_ms <= step.at {
            frame += script.frame_ms;
            record(frame, scroller.tick(frame));
        }
        debug!("Replaying {:?} at {:.1}ms", step.input, step.at);
        record(step.at, scroller.handle(step.to_input()));
    }

    let deadline = frame + MAX_SETTLE_MS;
    while scroller.is_animating() && frame < deadline {
        frame += script.frame_ms;
        record(frame, scroller.tick(frame));
    }

    Ok(SimulationReport {
        events,
        final_offset: scroller.current_offset(),
        final_state: format!("{:?}", scroller.state()),
        trajectories_played: scroller.surface().played(),
    })
}

fn cmd_simulate(script_path: &Path, config: Option<&Path>, frames: bool, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let script = GestureScript::load(script_path)?;
    info!(
        "Simulating {} steps from {}",
        script.steps.len(),
        script_path.display()
    );

    let report = simulate(&script, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for timed in &report.events {
        if !frames && matches!(timed.event, ScrollEvent::Scrolled { .. }) {
            continue;
        }
        println!("{:>9.1}ms  {:?}", timed.at, timed.event);
    }
    println!(
        "Final offset: ({:.1}, {:.1}), state {}, {} trajectories played",
        report.final_offset.horizontal,
        report.final_offset.vertical,
        report.final_state,
        report.trajectories_played
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_scroll::GestureState;

    const FLING: &str = include_str!("../scripts/fling.toml");

    #[test]
    fn test_flick_report() {
        let config = ScrollConfig::default();

        let slow = flick_report(&config, 0.1);
        assert!(!slow.flicks);
        assert_eq!(slow.distance, 0.0);

        let report = flick_report(&config, 0.5);
        assert!(report.flicks);
        assert!((report.duration_ms - 601.4).abs() < 1.0);
        assert!(report.distance > 0.0);
    }

    #[test]
    fn test_simulate_fling_settles() {
        let script = GestureScript::parse(FLING).unwrap();
        let report = simulate(&script, ScrollConfig::default()).unwrap();

        assert_eq!(report.final_state, format!("{:?}", GestureState::Idle));
        assert!(report.trajectories_played >= 1);
        assert!(report
            .events
            .iter()
            .any(|timed| matches!(timed.event, ScrollEvent::FlickStarted { .. })));
        assert!(report.final_offset.vertical >= 0.0 && report.final_offset.vertical <= 600.0);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"event\":\"flick_started\""));
    }
}
