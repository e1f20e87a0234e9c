use std::path::PathBuf;

use anyhow::Result;
use carousel_core::load_settings;
use clap::Parser;
use shared::{
    domain::{CarouselPhase, ElementKind},
    error::{ConfigError, ErrorReport},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod replay;
mod scenario;

use replay::{replay_realtime, replay_virtual, Replay};
use scenario::{load_scenario, Scenario};

/// Replays page signals against the hero carousel and prints every
/// activation change it makes.
#[derive(Parser, Debug)]
struct Args {
    /// JSON scenario file; the built-in demo runs when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// TOML settings file; defaults to ./carousel.toml when present.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Print JSON lines instead of text.
    #[arg(long)]
    json: bool,
    /// Drive the tokio runtime on the wall clock instead of a virtual one.
    #[arg(long)]
    realtime: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.settings.as_deref())?;
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario::demo(),
    };
    info!(
        slides = scenario.layout.slides,
        events = scenario.events.len(),
        run_until_ms = scenario.run_until_ms,
        realtime = args.realtime,
        "replaying carousel scenario"
    );

    let replay = if args.realtime {
        replay_realtime(&scenario, settings).await
    } else {
        replay_virtual(&scenario, settings)
    };

    let replay = match replay {
        Ok(replay) => replay,
        Err(err) => {
            if args.json {
                if let Some(config_err) = err.downcast_ref::<ConfigError>() {
                    println!("{}", serde_json::to_string(&ErrorReport::from(config_err))?);
                }
            }
            return Err(err);
        }
    };

    if args.json {
        print_json(&replay)?;
    } else {
        print_text(&replay);
    }

    Ok(())
}

fn print_json(replay: &Replay) -> Result<()> {
    for line in &replay.transcript {
        println!("{}", serde_json::to_string(line)?);
    }
    println!("{}", serde_json::to_string(&replay.final_state)?);
    Ok(())
}

fn print_text(replay: &Replay) {
    for line in &replay.transcript {
        let element = match line.change.kind {
            ElementKind::Slide => "slide",
            ElementKind::Indicator => "indicator",
        };
        let state = if line.change.active {
            "active"
        } else {
            "inactive"
        };
        println!(
            "{:>8}ms  {element:<9} {}  {state}",
            line.at_ms, line.change.index
        );
    }

    let state = &replay.final_state;
    let phase = match state.phase {
        CarouselPhase::Idle => "idle".to_string(),
        CarouselPhase::Showing { index } => format!("showing {index}"),
        CarouselPhase::Transitioning { from, to } => format!("transitioning {from} -> {to}"),
        CarouselPhase::Paused { index } => format!("paused on {index}"),
    };
    println!(
        "final: {phase}; autoplay {}; images {}/{}",
        if state.autoplay_running { "on" } else { "off" },
        state.images_settled,
        state.images_total
    );
}
