use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use lane_runner::simulation::{
    Autopilot, Engine, FixedRateClock, FrameClock, FrameDriver, GameSession, InputEvent,
    InputSource, LaneConfig, NoInput, SteppedClock, GAME_SPEED, SPAWN_INTERVAL_MS,
};

const DEFAULT_LOG_FILTER: &str = "warn,lane_runner=info";

#[derive(Parser)]
#[command(name = "lane_runner")]
#[command(about = "Obstacle-avoidance lane game with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of games to play in headless mode
    #[arg(long, default_value = "1")]
    games: u32,

    /// Frame limit per game in headless mode
    #[arg(long, default_value = "10000")]
    max_frames: u64,

    /// Seed for obstacle placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per frame
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Pace frames against the wall clock instead of a virtual one
    #[arg(long)]
    realtime: bool,

    /// Let the autopilot steer the car
    #[arg(long)]
    autopilot: bool,

    /// Print the lane every N frames (0 = only when a game ends)
    #[arg(long, default_value = "0")]
    draw_every: u64,

    /// Milliseconds between obstacle spawns
    #[arg(long, default_value_t = SPAWN_INTERVAL_MS)]
    spawn_interval_ms: u64,

    /// Lane pixels travelled per frame
    #[arg(long, default_value_t = GAME_SPEED)]
    speed: i32,
}

impl Cli {
    fn lane_config(&self) -> LaneConfig {
        LaneConfig {
            spawn_interval_ms: self.spawn_interval_ms,
            speed: self.speed,
            ..LaneConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let engine = Engine::try_new(cli.lane_config()).context("Invalid lane configuration")?;

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(engine, cli.seed);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    if cli.realtime {
        let clock = FixedRateClock::new(Duration::from_millis(cli.frame_ms.max(1)));
        run_headless(&cli, engine, clock)
    } else {
        let clock = SteppedClock::new(0, cli.frame_ms);
        run_headless(&cli, engine, clock)
    }
}

/// Play the requested number of games in headless mode (no graphics)
fn run_headless<C: FrameClock>(cli: &Cli, engine: Engine, clock: C) -> Result<()> {
    println!("Running lane runner in headless mode...");
    println!(
        "Games: {}, Frame: {}ms, Max frames per game: {}",
        cli.games, cli.frame_ms, cli.max_frames
    );
    println!();

    let mut input: Box<dyn InputSource> = if cli.autopilot {
        Box::new(Autopilot::new(engine.config()))
    } else {
        Box::new(NoInput)
    };

    let mut session = match cli.seed {
        Some(seed) => GameSession::new_with_seed(engine, seed),
        None => GameSession::new(engine),
    };
    let mut driver = FrameDriver::new(clock);

    for game in 1..=cli.games {
        session.handle_event(InputEvent::StartOrRestart);

        // Run in chunks so the lane can be printed along the way
        let mut remaining = cli.max_frames;
        loop {
            let chunk = if cli.draw_every == 0 {
                remaining
            } else {
                cli.draw_every.min(remaining)
            };
            let report = driver.run(&mut session, input.as_mut(), chunk)?;
            remaining -= report.frames.min(remaining);

            if report.hit_frame_limit && remaining > 0 {
                println!("--- Game {} after {} frames ---", game, cli.max_frames - remaining);
                session.draw_lane();
                continue;
            }

            if report.hit_frame_limit {
                info!("Game {} reached the frame limit with score {}", game, report.score);
            }
            break;
        }

        println!("--- Game {} finished ---", game);
        session.print_summary();
        session.draw_lane();
    }

    println!("=== Final State ===");
    println!("Games played: {}", session.games_played);
    println!("High score: {}", session.state().high_score);
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(engine: Engine, seed: Option<u64>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use lane_runner::ui;

    println!("Starting Lane Runner UI...");
    println!();
    println!("Controls:");
    println!("  Left/Right  - Steer");
    println!("  Enter/Space - Start / restart");
    println!("  ESC         - Exit");
    println!();

    let (width, height) = ui::window_size(engine.config());
    let session = match seed {
        Some(seed) => GameSession::new_with_seed(engine, seed),
        None => GameSession::new(engine),
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: DEFAULT_LOG_FILTER.to_string(),
                    level: bevy::log::Level::INFO,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Lane Runner".into(),
                        resolution: (width, height).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SessionResource(session))
        .add_plugins(ui::LaneRunnerUIPlugin)
        .run();
}
