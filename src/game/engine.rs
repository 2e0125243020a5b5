use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    food::Food,
    state::{occupied, Position, Snake},
};
use crate::audio::{AudioSink, Cue, NullAudio, Stream};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first directional input
    NotStarted,
    Paused,
    Running,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The head left the board
    Wall,
    /// The head ran into the body
    SelfCollision,
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when the tick ended the session
    pub game_over: Option<GameOverReason>,
    /// Score at the end of the tick, before a game over resets it
    pub score: u32,
}

/// Effect of a directional key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionInput {
    /// The press started a new session
    Started,
    /// The press resumed a paused session
    Resumed,
    /// The snake turned (or kept going the same way)
    Turned,
    /// The press would have reversed the snake
    Rejected,
}

/// The snake game: one snake, one food, score and timing
///
/// Ticks come from outside (see [`TickScheduler`](super::TickScheduler));
/// every tick moves the snake, then checks food, edges and tail in
/// that order.
pub struct Game<A: AudioSink = NullAudio> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    rng: StdRng,
    audio: A,
    running: bool,
    started: bool,
    paused: bool,
    score: u32,
    best_score: u32,
    pace: f64,
}

impl<A: AudioSink> Game<A> {
    /// Create a game, seeding food placement from `config.seed` or entropy
    pub fn new(config: GameConfig, audio: A) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng, audio)
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng, audio: A) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let snake = Snake::new(&config);
        let food = Food::new(&config, snake.body(), &mut rng)?;
        let pace = config.initial_pace;

        Ok(Self {
            config,
            snake,
            food,
            rng,
            audio,
            running: false,
            started: false,
            paused: true,
            score: 0,
            best_score: 0,
            pace,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food.position()
    }

    /// Lay the snake out on `body`, heading `direction`
    ///
    /// The layout goes through the same checks as the configured starting
    /// body. Food under the new body is moved elsewhere. Score, pace and
    /// phase are untouched.
    pub fn place_snake(
        &mut self,
        body: &[Position],
        direction: Direction,
    ) -> Result<(), GameError> {
        self.config
            .check_layout(body, direction)
            .map_err(GameError::InvalidLayout)?;

        self.snake.place(body, direction);
        if occupied(body, self.food.position()) {
            self.food.relocate(self.snake.body(), &mut self.rng)?;
        }
        Ok(())
    }

    /// Put the food on a free cell of the board
    pub fn place_food(&mut self, position: Position) -> Result<(), GameError> {
        self.food.place(position, self.snake.body())
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Seconds between ticks at the current score
    pub fn pace(&self) -> f64 {
        self.pace
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Whether the scheduler should be ticking the game
    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Running && self.running
    }

    /// Begin a session, if one is not already underway
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }

        self.started = true;
        self.paused = false;
        self.running = true;
        self.audio.start(Stream::Background);
        tracing::info!(best_score = self.best_score, "session started");
        true
    }

    /// Flip between running and paused; ignored before the session starts
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started {
            return false;
        }

        if self.paused {
            self.resume();
        } else {
            self.paused = true;
            self.audio.pause(Stream::Background);
            tracing::info!(score = self.score, "paused");
        }
        true
    }

    fn resume(&mut self) {
        self.paused = false;
        self.running = true;
        self.audio.resume(Stream::Background);
        tracing::info!(score = self.score, "resumed");
    }

    /// Apply a directional key press
    ///
    /// Before the session it starts the game and while paused it resumes;
    /// in neither case does it steer. Otherwise it turns the snake unless
    /// that would reverse it.
    pub fn press_direction(&mut self, direction: Direction) -> DirectionInput {
        match self.phase() {
            Phase::NotStarted => {
                self.start();
                DirectionInput::Started
            }
            Phase::Paused => {
                self.resume();
                DirectionInput::Resumed
            }
            Phase::Running => {
                if self.snake.set_direction(direction) {
                    DirectionInput::Turned
                } else {
                    DirectionInput::Rejected
                }
            }
        }
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.running {
            return outcome;
        }

        self.snake.update();

        match self.check_collision_with_food() {
            Ok(ate_food) => outcome.ate_food = ate_food,
            Err(GameError::NoFreeCell { .. }) => {
                outcome.ate_food = true;
                outcome.game_over = Some(GameOverReason::BoardFilled);
            }
            Err(err) => tracing::error!(%err, "unexpected error while placing food"),
        }

        if outcome.game_over.is_none() {
            outcome.game_over = self
                .check_collision_with_edges()
                .or_else(|| self.check_collision_with_tail());
        }

        outcome.score = self.score;
        if let Some(reason) = outcome.game_over {
            self.game_over(reason);
        }

        outcome
    }

    fn check_collision_with_food(&mut self) -> Result<bool, GameError> {
        if self.snake.head() != self.food.position() {
            return Ok(false);
        }

        let relocated = self.food.relocate(self.snake.body(), &mut self.rng);
        self.snake.request_growth();
        self.score += 1;
        self.pace = (self.pace * self.config.pace_factor).max(self.config.min_pace);
        self.audio.play(Cue::Eat);
        tracing::debug!(score = self.score, pace = self.pace, "food eaten");

        relocated.map(|_| true)
    }

    fn check_collision_with_edges(&self) -> Option<GameOverReason> {
        let head = self.snake.head();
        let edges = [-1, self.config.grid_size];
        if edges.contains(&head.x) || edges.contains(&head.y) {
            return Some(GameOverReason::Wall);
        }
        None
    }

    fn check_collision_with_tail(&self) -> Option<GameOverReason> {
        if self.snake.collides_with_body(self.snake.head()) {
            return Some(GameOverReason::SelfCollision);
        }
        None
    }

    fn game_over(&mut self, reason: GameOverReason) {
        let final_score = self.score;
        self.best_score = self.best_score.max(final_score);

        self.snake.reset();
        if let Err(err) = self.food.relocate(self.snake.body(), &mut self.rng) {
            tracing::error!(%err, "could not place food after reset");
        }

        self.running = false;
        self.score = 0;
        self.pace = self.config.initial_pace;
        self.audio.play(Cue::Collision);
        self.audio.stop(Stream::Background);

        self.started = false;
        self.paused = true;

        tracing::info!(
            ?reason,
            score = final_score,
            best_score = self.best_score,
            "game over"
        );
    }
}
