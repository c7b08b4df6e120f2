use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::SimulationClock;
use crate::config::{BoundaryMode, ConfigError, GameConfig, GridSize, INITIAL_SNAKE_LENGTH};
use crate::food::Food;
use crate::input::{Direction, PixelPoint, direction_towards};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Victory,
}

/// What a single discrete step did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Died,
    Won,
    /// The game had already ended; nothing changed.
    Idle,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake has filled the board.
    pub food: Option<Food>,
    pub score: u32,
    pub step_count: u64,
    pub status: GameStatus,
    clock: SimulationClock,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::seed_from_u64(seed)))
    }

    /// Creates a state whose food placement is seeded from OS entropy.
    pub fn new_from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::from_entropy()))
    }

    /// Builds a state from a config that has already been validated.
    pub(crate) fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = initial_snake(config.grid);
        let food = Food::spawn(&mut rng, config.grid, &snake);

        Self {
            snake,
            food,
            score: 0,
            step_count: 0,
            status: GameStatus::Playing,
            clock: SimulationClock::new(config.step_interval_ms),
            config,
            rng,
        }
    }

    /// Puts the board back into its opening layout. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.snake = initial_snake(self.config.grid);
        self.food = Food::spawn(&mut self.rng, self.config.grid, &self.snake);
        self.score = 0;
        self.step_count = 0;
        self.status = GameStatus::Playing;
        self.clock.reset();

        info!("game reset");
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Feeds elapsed frame time and runs every step it pays for.
    ///
    /// Returns the number of steps executed.
    pub fn advance_time(&mut self, delta_ms: f64) -> u32 {
        if !self.is_alive() {
            return 0;
        }

        self.clock.advance(delta_ms);

        let mut steps = 0;
        while self.is_alive() && self.clock.consume_step() {
            self.step();
            steps += 1;
        }

        if !self.is_alive() {
            self.clock.reset();
        }

        steps
    }

    /// Advances simulation by one discrete step.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_alive() {
            return StepOutcome::Idle;
        }

        self.step_count += 1;

        let mut next_head = self.snake.commit_direction();
        if self.config.boundary == BoundaryMode::Wrap {
            next_head = next_head.wrapped(self.config.grid);
        }

        if !next_head.is_within_bounds(self.config.grid) {
            return self.end(GameStatus::GameOver, "left the grid", next_head);
        }

        let eats = self.food.is_some_and(|food| food.position == next_head);
        if self.snake.blocks(next_head, eats) {
            return self.end(GameStatus::GameOver, "ran into itself", next_head);
        }

        self.snake.advance(next_head, eats);
        if !eats {
            trace!("step {}: head at {:?}", self.step_count, next_head);
            return StepOutcome::Moved;
        }

        self.score += 1;
        self.food = Food::spawn(&mut self.rng, self.config.grid, &self.snake);
        debug!(
            "step {}: ate at {:?}, score {}, length {}",
            self.step_count,
            next_head,
            self.score,
            self.snake.len()
        );

        if self.food.is_none() {
            self.status = GameStatus::Victory;
            info!("board filled after {} steps, score {}", self.step_count, self.score);
            return StepOutcome::Won;
        }

        StepOutcome::Ate
    }

    /// Moves the food to `position` if that cell is on the grid and free.
    pub fn place_food(&mut self, position: Position) -> bool {
        if !position.is_within_bounds(self.config.grid) || self.snake.occupies(position) {
            debug!("refused food at {:?}", position);
            return false;
        }

        self.food = Some(Food::new(position));
        true
    }

    /// Buffers a steering request. Ignored once the game has ended.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.is_alive() {
            return false;
        }

        let accepted = self.snake.buffer_direction(direction);
        if !accepted {
            trace!("dropped reversal {:?} while heading {:?}", direction, self.snake.direction());
        }
        accepted
    }

    /// Steers towards a click given in surface pixels.
    pub fn steer_towards(&mut self, x: f64, y: f64) -> bool {
        if !self.is_alive() {
            return false;
        }

        let click = PixelPoint::clamped(x, y, self.config.grid);
        self.steer(direction_towards(self.snake.head(), click))
    }

    fn end(&mut self, status: GameStatus, reason: &str, at: Position) -> StepOutcome {
        self.status = status;
        info!(
            "game over at step {}: {} at {:?}, score {}",
            self.step_count, reason, at, self.score
        );
        StepOutcome::Died
    }
}

/// Straight snake centred on the grid, heading right.
///
/// On narrow grids the head shifts right so the tail stays on the board.
fn initial_snake(bounds: GridSize) -> Snake {
    let min_head_x = INITIAL_SNAKE_LENGTH.saturating_sub(1) as u16;
    let head = Position {
        x: i32::from((bounds.width / 2).max(min_head_x)),
        y: i32::from(bounds.height / 2),
    };
    Snake::new(head, Direction::Right, INITIAL_SNAKE_LENGTH)
}
