use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Action, Direction},
    apple::Apple,
    board::Board,
    config::GameConfig,
    render_state::RenderState,
    state::{MoveOutcome, Snake},
};
use crate::persistence::HighScoreStore;

#[cfg(test)]
use super::state::Position;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain move onto an empty cell
    Moved,
    /// The head landed on the apple; the snake will grow
    AteApple,
    /// Self-collision reset the snake. `length` is what it had reached.
    Collided { length: usize },
    /// The snake covers the whole board; no cell is left for an apple
    BoardFilled { length: usize },
}

impl TickOutcome {
    pub fn collided(&self) -> bool {
        matches!(self, TickOutcome::Collided { .. })
    }
}

/// One game of Snake: board, snake, apple and the high score
///
/// All state lives here and is threaded through `tick`; the renderer and the
/// input source only ever see copies.
pub struct GameSession<S: HighScoreStore> {
    board: Board,
    snake: Snake,
    apple: Apple,
    high_score: u32,
    store: S,
    rng: StdRng,
    finished: bool,
    persisted: bool,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Start a session; loads the high score from `store`
    pub fn new(config: &GameConfig, mut store: S) -> Self {
        let board = Board::new(config.grid_width, config.grid_height);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = Snake::new(board.center());
        let spawned = Apple::spawn(&board, snake.segments(), &mut rng);
        let finished = spawned.is_none();
        let apple = spawned.unwrap_or_else(|| Apple::new(snake.head()));
        let high_score = store.load();

        info!(
            "Session started on {}x{} board, high score {}",
            board.width(),
            board.height(),
            high_score
        );

        Self {
            board,
            snake,
            apple,
            high_score,
            store,
            rng,
            finished,
            persisted: false,
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self, action: impl Into<Action>) -> TickOutcome {
        if self.finished {
            return TickOutcome::BoardFilled {
                length: self.snake.length(),
            };
        }

        if let Action::Move(direction) = action.into() {
            self.snake.request_direction(direction);
        }
        self.snake.update_direction();

        match self.snake.advance(&self.board) {
            MoveOutcome::Collided { length_before } => {
                debug!("Snake hit itself at length {}", length_before);
                self.record(length_before);
                if self.snake.occupies(self.apple.position()) {
                    self.reroll_apple();
                }
                TickOutcome::Collided {
                    length: length_before,
                }
            }
            MoveOutcome::Moved if self.snake.head() == self.apple.position() => {
                // The last apple on a full board does not grow the snake past
                // the board area
                match self
                    .apple
                    .relocate(&self.board, self.snake.segments(), &mut self.rng)
                {
                    Some(_) => {
                        self.snake.grow();
                        TickOutcome::AteApple
                    }
                    None => self.fill_board(),
                }
            }
            MoveOutcome::Moved => TickOutcome::Moved,
        }
    }

    /// Put the snake back at the start and re-roll the apple
    pub fn restart(&mut self) {
        self.record(self.snake.length());
        self.snake.reset();
        self.finished = false;
        self.reroll_apple();
    }

    /// Persist the record if this run beat it. Safe to call more than once.
    pub fn finish(&mut self) {
        if self.persisted {
            return;
        }
        self.record(self.snake.length());
        self.persisted = true;
        info!("Session closed, high score {}", self.high_score);
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            segments: self.snake.segments().iter().copied().collect(),
            apple: self.apple.position(),
            length: self.snake.length(),
            high_score: self.high_score,
            grid_width: self.board.width(),
            grid_height: self.board.height(),
            board_filled: self.finished,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Swap in a prepared snake; the apple moves if the snake covers it
    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
        if self.snake.occupies(self.apple.position()) {
            self.reroll_apple();
        }
    }

    /// Move the apple to `position` if the snake is not on it
    #[cfg(test)]
    pub(crate) fn place_apple(&mut self, position: Position) -> bool {
        if !self.board.contains(position) || self.snake.occupies(position) {
            return false;
        }
        self.apple = Apple::new(position);
        true
    }

    fn reroll_apple(&mut self) {
        if self
            .apple
            .relocate(&self.board, self.snake.segments(), &mut self.rng)
            .is_none()
        {
            self.fill_board();
        }
    }

    fn fill_board(&mut self) -> TickOutcome {
        let length = self.snake.length().min(self.board.area());
        info!("Board filled at length {}", length);
        self.finished = true;
        self.record(length);
        TickOutcome::BoardFilled { length }
    }

    /// Raise and persist the high score if `length` beats it
    fn record(&mut self, length: usize) {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        if length <= self.high_score {
            return;
        }

        info!("New high score {} (was {})", length, self.high_score);
        self.high_score = length;
        if let Err(e) = self.store.save(length) {
            error!("Error saving high score: {:#}", e);
        }
    }
}

impl<S: HighScoreStore> Drop for GameSession<S> {
    fn drop(&mut self) {
        self.finish();
    }
}
