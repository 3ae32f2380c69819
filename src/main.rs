//! Orbit Pong headless host
//!
//! Runs the frame controller against in-memory ports with the autopilot on
//! the switches, at the board's tick rate, and optionally dumps the last
//! frame as a PGM image.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use orbit_pong::consts::TICKS_PER_SEC;
use orbit_pong::ports::{CountingTimer, Framebuffer, ScoreBoard, Switches};
use orbit_pong::sim::{Autopilot, Player};
use orbit_pong::{FrameController, Settings};

#[derive(Parser, Debug)]
#[command(name = "orbit-pong", version, about = "Run Orbit Pong headless with both paddles on autopilot")]
struct Args {
    /// Settings JSON (defaults are used when omitted)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 400)]
    ticks: u64,

    /// Autopilot seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Chance per tick that a paddle steers the wrong way
    #[arg(long, default_value_t = 0.3)]
    fumble: f64,

    /// Run as fast as possible instead of at the tick rate
    #[arg(long)]
    fast: bool,

    /// Write the final frame as a binary PGM
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Settings::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(args.settings.as_ref())?;
    let fb = Framebuffer::new(settings.screen_width as usize, settings.screen_height as usize);
    let mut game = FrameController::new(
        settings,
        Switches::default(),
        fb,
        ScoreBoard::default(),
        CountingTimer::default(),
    )
    .context("invalid settings")?;
    let mut pilot = Autopilot::new(args.seed, args.fumble);

    log::info!("Orbit Pong (host) starting, {} ticks, seed {}", args.ticks, args.seed);
    game.start();

    let period = Duration::from_secs(1) / TICKS_PER_SEC;
    for _ in 0..args.ticks {
        let started = Instant::now();

        let bits = pilot.switches(game.state(), game.settings());
        game.input_mut().set(bits);
        game.on_timer();

        let elapsed = started.elapsed();
        if elapsed > period {
            log::warn!("tick {} took {:?}, over the {:?} period", game.state().time_ticks, elapsed, period);
        } else if !args.fast {
            thread::sleep(period - elapsed);
        }
    }

    let stats = game.stats();
    log::info!(
        "Final score {} - {} after {} ticks",
        game.scores().shown(Player::One),
        game.scores().shown(Player::Two),
        stats.ticks
    );
    println!("{}", serde_json::to_string(&stats)?);

    if let Some(path) = &args.dump {
        std::fs::write(path, game.pixels().to_pgm()).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote final frame to {}", path.display());
    }

    Ok(())
}
