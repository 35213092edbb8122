/// Launcher for the terminal scenes.
///
/// Usage:
///   space_invaders invaders [--seed N]     # play Space Invaders
///   space_invaders sandbox                 # bouncing-square demo
///   space_invaders --config game.toml invaders
///   space_invaders --log-file run.log invaders
///   space_invaders --print-config invaders  # show the effective config

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::config::{GameConfig, TimingSettings, WindowSettings};
use space_invaders::game::run_game;
use space_invaders::scene::Scene;
use space_invaders::scenes::{SandboxScene, SpaceInvadersScene};

#[derive(Parser)]
#[command(name = "space_invaders")]
#[command(about = "Terminal scenes driven by a fixed-rate game loop")]
struct Cli {
    /// TOML file overriding the window and timing presets
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write log output here (the terminal belongs to the game); RUST_LOG
    /// filters it and is ignored without this option
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, global = true)]
    print_config: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the Space Invaders scene
    Invaders {
        /// Seed the bonus-drop RNG for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the bouncing-square sandbox scene
    Sandbox,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Invaders { seed } => {
            let preset = GameConfig {
                window: WindowSettings {
                    width: 900,
                    height: 700,
                    title: "Space Invaders".to_string(),
                    ..WindowSettings::default()
                },
                timing: TimingSettings { fps: 60 },
                seed,
            };
            let config = load_config(cli.config.as_deref(), preset)?;
            if cli.print_config {
                return print_config(&config);
            }
            let rng = match seed.or(config.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run_game(
                move |canvas| {
                    let (width, height) = canvas.size();
                    Box::new(SpaceInvadersScene::new(width as f32, height as f32, rng))
                        as Box<dyn Scene>
                },
                &config.window,
                &config.timing,
            )
            .context("game loop failed")
        }
        Commands::Sandbox => {
            let preset = GameConfig {
                window: WindowSettings {
                    title: "Sandbox Demo".to_string(),
                    ..WindowSettings::default()
                },
                ..GameConfig::default()
            };
            let config = load_config(cli.config.as_deref(), preset)?;
            if cli.print_config {
                return print_config(&config);
            }
            run_game(
                |canvas| {
                    let (width, height) = canvas.size();
                    Box::new(SandboxScene::new(width as f32, height as f32)) as Box<dyn Scene>
                },
                &config.window,
                &config.timing,
            )
            .context("game loop failed")
        }
    }
}

/// A config file, when given, replaces the preset entirely.
fn load_config(path: Option<&Path>, preset: GameConfig) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(preset),
    }
}

fn print_config(config: &GameConfig) -> Result<()> {
    print!("{}", config.to_toml().context("serialising config")?);
    Ok(())
}

/// Logging goes to `log_file` only; stderr is inside the game's screen, so
/// without a file no logger is installed and RUST_LOG has no effect.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
