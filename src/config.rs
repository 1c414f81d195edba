use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

const APP_DIR_NAME: &str = "block-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: u32 = 800;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u32 = 600;

/// Default edge length of one square grid cell.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Board dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardSize {
    pub width: u32,
    pub height: u32,
}

/// Rejected configuration values.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("board {axis} must be positive")]
    ZeroDimension { axis: &'static str },
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("board {axis} {value} is not a multiple of cell size {cell_size}")]
    Misaligned {
        axis: &'static str,
        value: u32,
        cell_size: u32,
    },
    #[error("ticks per second must be positive")]
    ZeroTickRate,
    #[error("board {axis} {value} exceeds the largest supported extent {max}")]
    TooLarge {
        axis: &'static str,
        value: u32,
        max: u32,
    },
}

/// Failures while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error(transparent)]
    Read(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Immutable game configuration.
///
/// Construction validates that the board is a whole number of cells on both
/// axes, so every grid computation downstream stays cell-aligned, and that
/// one step past either far edge still fits in an `i32` coordinate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct GameConfig {
    board: BoardSize,
    cell_size: u32,
    ticks_per_second: u32,
}

impl GameConfig {
    pub fn new(
        board: BoardSize,
        cell_size: u32,
        ticks_per_second: u32,
    ) -> Result<Self, ConfigError> {
        if board.width == 0 {
            return Err(ConfigError::ZeroDimension { axis: "width" });
        }
        if board.height == 0 {
            return Err(ConfigError::ZeroDimension { axis: "height" });
        }
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if board.width % cell_size != 0 {
            return Err(ConfigError::Misaligned {
                axis: "width",
                value: board.width,
                cell_size,
            });
        }
        if board.height % cell_size != 0 {
            return Err(ConfigError::Misaligned {
                axis: "height",
                value: board.height,
                cell_size,
            });
        }
        let max = max_extent(cell_size);
        if board.width > max {
            return Err(ConfigError::TooLarge {
                axis: "width",
                value: board.width,
                max,
            });
        }
        if board.height > max {
            return Err(ConfigError::TooLarge {
                axis: "height",
                value: board.height,
                max,
            });
        }
        if ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(Self {
            board,
            cell_size,
            ticks_per_second,
        })
    }

    #[must_use]
    pub fn board(&self) -> BoardSize {
        self.board
    }

    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    #[must_use]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Number of cells across the board.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.board.width / self.cell_size
    }

    /// Number of cells down the board.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.board.height / self.cell_size
    }

    /// Board center, rounded down to the nearest cell boundary.
    #[must_use]
    pub fn initial_snake_position(&self) -> Position {
        let cell = to_i32(self.cell_size);
        Position {
            x: to_i32(self.columns() / 2) * cell,
            y: to_i32(self.rows() / 2) * cell,
        }
    }

    /// Wall-clock time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }

    /// Returns a copy with any provided override applied and re-validated.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::new(
            BoardSize {
                width: overrides.board_width.unwrap_or(self.board.width),
                height: overrides.board_height.unwrap_or(self.board.height),
            },
            overrides.cell_size.unwrap_or(self.cell_size),
            overrides.ticks_per_second.unwrap_or(self.ticks_per_second),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardSize {
                width: DEFAULT_BOARD_WIDTH,
                height: DEFAULT_BOARD_HEIGHT,
            },
            cell_size: DEFAULT_CELL_SIZE,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

/// Largest board extent whose off-board neighbour `extent + cell_size` is
/// still representable as an `i32`.
fn max_extent(cell_size: u32) -> u32 {
    i32::MAX.unsigned_abs().saturating_sub(cell_size)
}

/// Converts a board-derived value to a coordinate.
///
/// Every extent, cell size, and cell index of a `GameConfig` is at most
/// `i32::MAX - cell_size`, so the conversion is exact for them; the
/// saturation only applies to values that did not come from one.
pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// On-disk layout of the configuration file. Missing fields take defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    board_width: u32,
    board_height: u32,
    cell_size: u32,
    ticks_per_second: u32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        GameConfig::default().into()
    }
}

impl From<GameConfig> for ConfigFile {
    fn from(config: GameConfig) -> Self {
        Self {
            board_width: config.board.width,
            board_height: config.board.height,
            cell_size: config.cell_size,
            ticks_per_second: config.ticks_per_second,
        }
    }
}

impl TryFrom<ConfigFile> for GameConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        GameConfig::new(
            BoardSize {
                width: file.board_width,
                height: file.board_height,
            },
            file.cell_size,
            file.ticks_per_second,
        )
    }
}

/// Individual values supplied on the command line, layered over the file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub board_width: Option<u32>,
    pub board_height: Option<u32>,
    pub cell_size: Option<u32>,
    pub ticks_per_second: Option<u32>,
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Parses and validates a JSON configuration document.
pub fn parse_config(raw: &str) -> Result<GameConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Loads the configuration from `path`.
///
/// Returns `Ok(None)` when the file does not exist so the caller can decide
/// whether a missing file is acceptable.
pub fn load_config_from_path(path: &Path) -> Result<Option<GameConfig>, ConfigFileError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(parse_config(&raw)?))
}

/// Solid colors for every drawn element.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub snake: Color,
    pub food: Color,
    pub text: Color,
    pub border: Color,
}

/// Green snake, red food, on black.
pub const CLASSIC_PALETTE: Palette = Palette {
    background: Color::Rgb(0, 0, 0),
    snake: Color::Rgb(0, 255, 0),
    food: Color::Rgb(255, 0, 0),
    text: Color::Rgb(255, 255, 255),
    border: Color::DarkGray,
};

/// Full-block glyph pair used to draw one board cell as a square.
pub const GLYPH_CELL: &str = "██";

/// Terminal columns occupied by one board cell.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;
