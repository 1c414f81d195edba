use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::food::Food;
use crate::input::{Direction, GameInput};
use crate::snake::{Collision, Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Complete mutable game state for one session.
///
/// The state has no clock of its own: a driver calls [`GameState::update`]
/// once per tick and forwards input in between.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub status: GameStatus,
    pub collision: Option<Collision>,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a state whose food placement is seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = Snake::new(config.initial_snake_position(), config.cell_size());
        let food = Food::spawn(&mut rng, &config);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            collision: None,
            config,
            rng,
        }
    }

    /// Advances the simulation by one tick: move, eat, then collide.
    pub fn update(&mut self) {
        if self.status == GameStatus::GameOver {
            return;
        }

        self.snake.move_forward();

        if self.snake.head_position() == self.food.position() {
            self.snake.grow();
            self.score += 1;
            self.food.regenerate(&mut self.rng, &self.config);
            debug!(
                "food eaten, score {} next food at {:?}",
                self.score,
                self.food.position()
            );
        }

        if let Some(collision) = self.snake.collision(self.config.board()) {
            self.status = GameStatus::GameOver;
            self.collision = Some(collision);
            info!(
                "game over: {collision:?} at {:?} with score {}",
                self.snake.head_position(),
                self.score
            );
        }
    }

    /// Forwards a direction request to the snake while the round is running.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.change_direction(direction);
        }
    }

    /// Starts a fresh round in place; valid from any state.
    pub fn reset(&mut self) {
        self.snake = Snake::new(
            self.config.initial_snake_position(),
            self.config.cell_size(),
        );
        self.food = Food::spawn(&mut self.rng, &self.config);
        self.score = 0;
        self.status = GameStatus::Running;
        self.collision = None;
        info!("round reset");
    }

    /// Applies one external input event. Quit is left to the driver.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.change_direction(direction),
            GameInput::Reset => self.reset(),
            GameInput::Quit => {}
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot of the snake body, head first.
    #[must_use]
    pub fn body_segments(&self) -> Vec<Position> {
        self.snake.body_segments()
    }

    #[must_use]
    pub fn food_position(&self) -> Position {
        self.food.position()
    }
}
