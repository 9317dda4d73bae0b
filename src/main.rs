//! MOT Arena headless runner
//!
//! Runs a few trials without a display and prints the final frame as JSON.

use std::path::PathBuf;

use clap::Parser;
use mot_arena::{CollisionStrategy, Session, SimConfig, SimResult};

/// Ticks the targets stay highlighted at the start of a trial
const CUE_TICKS: u64 = 120;

/// Run bouncing-disc trials headless and print the last frame as JSON
#[derive(Debug, Parser)]
#[command(name = "mot-arena", version, about)]
struct Args {
    /// JSON config file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// RNG seed; the same seed and config reproduce a run exactly
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Override the collision response from the config
    #[arg(long, value_name = "approximate|exact")]
    strategy: Option<CollisionStrategy>,
    /// Trials to run
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    trials: u32,
    /// Ticks per trial (600 is ten seconds at 60 fps)
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> SimResult<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => {
            log::info!("No config given, using defaults");
            SimConfig::default()
        }
    };
    if let Some(strategy) = args.strategy {
        config.collision_strategy = strategy;
    }

    log::info!("MOT Arena (headless) starting with seed {}", args.seed);
    let mut session = Session::new(config, args.seed)?;

    for _ in 0..args.trials {
        session.start_trial()?;
        session.highlight_targets(true);

        for _ in 0..args.ticks {
            if session.time_ticks == CUE_TICKS {
                session.highlight_targets(false);
            }
            session.advance_tick();
        }

        let mean_speed = session.balls().iter().map(|b| b.speed()).sum::<f64>()
            / session.balls().len().max(1) as f64;
        log::info!(
            "Trial {} done after {} ticks, mean speed {:.3}",
            session.trial_count,
            session.time_ticks,
            mean_speed
        );
    }

    let frame = session.frame();
    let json = serde_json::to_string_pretty(&frame)?;
    println!("{}", json);
    Ok(())
}
