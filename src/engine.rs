use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, DEFAULT_GRID, GameConfig};
use crate::game::{GameState, GameStatus, StepOutcome};
use crate::palette::Palette;
use crate::renderer::{self, Surface};
use crate::snake::Position;

/// The externally driven game: one self-contained instance per board.
///
/// Hosts call [`Game::tick`] with frame deltas, [`Game::click`] with
/// pointer positions and [`Game::render`] once per frame. All coordinates
/// are surface pixels in `0..width() x 0..height()`.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    palette: Palette,
}

impl Game {
    /// Starts a game on the default board with entropy-seeded food.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(GameState::with_rng(
            GameConfig::default(),
            StdRng::from_entropy(),
        ))
    }

    /// Starts a reproducible game on the default board.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(GameState::with_rng(
            GameConfig::default(),
            StdRng::seed_from_u64(seed),
        ))
    }

    /// Starts a reproducible game with custom board settings.
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        GameState::new_with_seed(config, seed).map(Self::from_state)
    }

    fn from_state(state: GameState) -> Self {
        debug!(
            "new game on {}x{} cells, step every {} ms",
            state.bounds().width,
            state.bounds().height,
            state.config().step_interval_ms
        );

        Self {
            state,
            palette: Palette::default(),
        }
    }

    /// Replaces the colours used by [`Game::render`].
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Width of the default drawing surface in pixels.
    #[must_use]
    pub fn width() -> u32 {
        DEFAULT_GRID.pixel_width()
    }

    /// Height of the default drawing surface in pixels.
    #[must_use]
    pub fn height() -> u32 {
        DEFAULT_GRID.pixel_height()
    }

    /// Width of this instance's surface; differs from [`Game::width`] only
    /// for custom grids.
    #[must_use]
    pub fn surface_width(&self) -> u32 {
        self.state.bounds().pixel_width()
    }

    #[must_use]
    pub fn surface_height(&self) -> u32 {
        self.state.bounds().pixel_height()
    }

    /// Feeds elapsed milliseconds since the previous frame.
    pub fn tick(&mut self, delta_ms: f64) {
        self.state.advance_time(delta_ms);
    }

    /// Runs one discrete step now, ignoring the clock.
    pub fn step(&mut self) -> StepOutcome {
        self.state.step()
    }

    /// Steers towards a pointer position. No effect once the game has ended.
    pub fn click(&mut self, x: f64, y: f64) {
        self.state.steer_towards(x, y);
    }

    /// Draws the current frame.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        renderer::render(surface, &self.state, &self.palette);
    }

    /// Starts over on the same board.
    pub fn restart(&mut self) {
        self.state.reset();
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Puts the food on a free cell. Returns `false` and keeps the current
    /// food when `position` is off the grid or under the snake.
    pub fn place_food(&mut self, position: Position) -> bool {
        self.state.place_food(position)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
