use std::path::{Path, PathBuf};
use std::time::Instant;

use block_snake::config::{
    CLASSIC_PALETTE, ConfigOverrides, GameConfig, default_config_path, load_config_from_path,
};
use block_snake::error::AppError;
use block_snake::game::GameState;
use block_snake::input::{GameInput, InputHandler};
use block_snake::logging;
use block_snake::terminal_runtime::TerminalSession;
use clap::Parser;
use log::{debug, info};

#[derive(Debug, Parser)]
#[command(version, about = "Classic grid Snake in the terminal")]
struct Cli {
    /// JSON config file; defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Edge length of one grid cell in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Simulation ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Seed for food placement, for reproducible rounds.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path; defaults to the per-user data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, logging::level_for(cli.verbose))?;

    let config = resolve_config(&cli)?;
    info!(
        "starting: board {}x{}, cell {}, {} ticks/s",
        config.board().width,
        config.board().height,
        config.cell_size(),
        config.ticks_per_second()
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    let mut session = TerminalSession::enter(CLASSIC_PALETTE)?;
    run(&mut session, state)?;

    info!("quit");
    Ok(())
}

/// Layers CLI overrides over the config file over built-in defaults.
fn resolve_config(cli: &Cli) -> Result<GameConfig, AppError> {
    let base = match &cli.config {
        Some(path) => load_config_file(path)?.ok_or_else(|| AppError::ConfigNotFound {
            path: path.clone(),
        })?,
        None => match default_config_path() {
            Some(path) => load_config_file(&path)?.unwrap_or_default(),
            None => GameConfig::default(),
        },
    };

    let overrides = ConfigOverrides {
        board_width: cli.width,
        board_height: cli.height,
        cell_size: cli.cell_size,
        ticks_per_second: cli.tps,
    };
    Ok(base.with_overrides(&overrides)?)
}

fn load_config_file(path: &Path) -> Result<Option<GameConfig>, AppError> {
    let loaded =
        load_config_from_path(path).map_err(|error| AppError::from_config_file(path, error))?;

    match loaded {
        Some(_) => info!("loaded config from {}", path.display()),
        None => debug!("no config file at {}", path.display()),
    }
    Ok(loaded)
}

fn run(session: &mut TerminalSession, mut state: GameState) -> Result<(), AppError> {
    let mut input = InputHandler::new();
    let tick_interval = state.config().tick_interval();
    let mut last_tick = Instant::now();

    loop {
        session.screen_mut().show(&state)?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if let Some(game_input) = input.poll_input(timeout)? {
            if matches!(game_input, GameInput::Quit) {
                break;
            }

            state.apply_input(game_input);
        }

        if last_tick.elapsed() >= tick_interval {
            state.update();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
