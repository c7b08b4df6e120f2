use thiserror::Error;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Surface width in pixels for this grid.
    #[must_use]
    pub fn pixel_width(self) -> u32 {
        u32::from(self.width) * CELL_SIZE_PX
    }

    /// Surface height in pixels for this grid.
    #[must_use]
    pub fn pixel_height(self) -> u32 {
        u32::from(self.height) * CELL_SIZE_PX
    }
}

/// Default playfield width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default playfield height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// The playfield used by `Game::new`.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: DEFAULT_GRID_WIDTH,
    height: DEFAULT_GRID_HEIGHT,
};

/// Edge length of one grid cell in surface pixels.
pub const CELL_SIZE_PX: u32 = 16;

/// Fixed simulation step interval in milliseconds.
pub const DEFAULT_STEP_INTERVAL_MS: f64 = 75.0;

/// Most steps a single frame may release; time owed beyond this is dropped.
pub const MAX_CATCH_UP_STEPS: u32 = 16;

/// Segment count of a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Random samples drawn by the food spawner before it enumerates free cells.
pub const FOOD_SPAWN_ATTEMPTS: usize = 32;

/// What happens when the head leaves the grid.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum BoundaryMode {
    /// Grid edges are walls.
    #[default]
    Solid,
    /// The head re-enters on the opposite edge.
    Wrap,
}

/// Runtime knobs for one game instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub step_interval_ms: f64,
    pub boundary: BoundaryMode,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(
        "grid {width}x{height} is too small: need at least {INITIAL_SNAKE_LENGTH} columns and one free cell"
    )]
    GridTooSmall { width: u16, height: u16 },
    #[error("step interval must be a positive number of milliseconds, got {0}")]
    InvalidStepInterval(f64),
}

impl GameConfig {
    /// Checks that the opening snake and a food cell fit and that time can
    /// advance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if usize::from(width) < INITIAL_SNAKE_LENGTH
            || height == 0
            || self.grid.total_cells() <= INITIAL_SNAKE_LENGTH
        {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        if !(self.step_interval_ms.is_finite() && self.step_interval_ms > 0.0) {
            return Err(ConfigError::InvalidStepInterval(self.step_interval_ms));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            boundary: BoundaryMode::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_GRID, GameConfig, GridSize};

    fn with_grid(width: u16, height: u16) -> GameConfig {
        GameConfig {
            grid: GridSize { width, height },
            ..GameConfig::default()
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(with_grid(3, 2).validate(), Ok(()));
    }

    #[test]
    fn grid_narrower_than_opening_snake_is_rejected() {
        assert_eq!(
            with_grid(2, 2).validate(),
            Err(ConfigError::GridTooSmall {
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn empty_or_snake_sized_grid_is_rejected() {
        assert!(matches!(
            with_grid(0, 0).validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
        assert!(matches!(
            with_grid(3, 1).validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn non_positive_step_interval_is_rejected() {
        for interval in [0.0, -75.0, f64::INFINITY] {
            let config = GameConfig {
                step_interval_ms: interval,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidStepInterval(interval))
            );
        }

        let config = GameConfig {
            step_interval_ms: f64::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStepInterval(_))
        ));
    }

    #[test]
    fn default_grid_is_320_pixels_square() {
        assert_eq!(DEFAULT_GRID.pixel_width(), 320);
        assert_eq!(DEFAULT_GRID.pixel_height(), 320);
        assert_eq!(DEFAULT_GRID.total_cells(), 400);
    }

    #[test]
    fn pixel_size_follows_cell_count() {
        let grid = GridSize {
            width: 7,
            height: 3,
        };

        assert_eq!(grid.pixel_width(), 112);
        assert_eq!(grid.pixel_height(), 48);
    }
}
