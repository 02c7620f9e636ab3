use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Size of one grid cell in pixels
pub const CELL_SIZE: u32 = 20;

/// Largest grid side accepted from config or flags
pub const MAX_GRID_SIDE: usize = 1024;

/// Default window size the grid is derived from
pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// File holding the persisted high score
    pub high_score_path: PathBuf,
    /// Fixed RNG seed for reproducible apple placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: (SCREEN_WIDTH / CELL_SIZE) as usize,
            grid_height: (SCREEN_HEIGHT / CELL_SIZE) as usize,
            tick_rate_hz: 10,
            high_score_path: PathBuf::from("highscore.txt"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Grid that fits a `width` x `height` pixel screen
    pub fn from_screen(width: u32, height: u32) -> Self {
        Self::new((width / CELL_SIZE) as usize, (height / CELL_SIZE) as usize)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid sides must be at most {}, got {}x{}",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width
                .checked_mul(self.grid_height)
                .is_some_and(|area| area >= 2),
            "grid needs room for the snake and an apple"
        );
        ensure!(
            (1..=60).contains(&self.tick_rate_hz),
            "tick rate must be between 1 and 60 Hz, got {}",
            self.tick_rate_hz
        );
        Ok(())
    }

    /// Time between simulation ticks
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.tick_rate_hz.max(1)))
    }
}
