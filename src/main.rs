use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use torus_snake::clock::FixedRateClock;
use torus_snake::config::Settings;
use torus_snake::error::GameError;
use torus_snake::game::GameState;
use torus_snake::input::TerminalInput;
use torus_snake::renderer::{TerminalCanvas, restore_terminal};
use torus_snake::runtime::{self, GameContext};

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a wraparound grid")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Simulation speed in ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(LevelFilter::Debug, Config::default(), open_log_file(path)?)?;
    }

    let settings = load_settings(&cli)?;
    install_panic_hook();
    run(settings)
}

fn open_log_file(path: &Path) -> Result<File, GameError> {
    File::create(path).map_err(|source| GameError::LogFile {
        path: path.to_path_buf(),
        source,
    })
}

fn load_settings(cli: &Cli) -> Result<Settings, GameError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::load_default()?,
    };

    if let Some(width) = cli.width {
        settings.grid_width = width;
    }
    if let Some(height) = cli.height {
        settings.grid_height = height;
    }
    if let Some(tps) = cli.tps {
        settings.ticks_per_second = tps;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    Ok(settings.validate()?)
}

fn run(settings: Settings) -> Result<(), GameError> {
    let mut state = match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.grid(), seed),
        None => GameState::new(settings.grid()),
    };

    let mut context = GameContext {
        canvas: TerminalCanvas::enter(settings.grid(), settings.palette)?,
        input: TerminalInput::new(),
        clock: FixedRateClock::new(),
        palette: settings.palette,
        ticks_per_second: settings.ticks_per_second,
    };

    runtime::run(&mut context, &mut state)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
