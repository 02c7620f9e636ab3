use std::collections::VecDeque;

use super::action::Direction;
use super::board::Board;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// What a single call to [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head moved onto a free cell
    Moved,
    /// The head ran into the body and the snake was reset.
    /// `length_before` is the target length the snake had reached.
    Collided { length_before: usize },
}

impl MoveOutcome {
    pub fn collided(&self) -> bool {
        matches!(self, MoveOutcome::Collided { .. })
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    segments: VecDeque<Position>,
    /// Target segment count; `segments` catches up one cell per move
    length: usize,
    /// Committed direction of movement
    direction: Direction,
    /// Turn requested by input, committed at the start of the next tick
    pending_direction: Option<Direction>,
    /// Cell the snake returns to on reset
    start: Position,
}

impl Snake {
    /// Create a one-cell snake at `start` heading right
    pub fn new(start: Position) -> Self {
        Self {
            segments: VecDeque::from([start]),
            length: 1,
            direction: Direction::default(),
            pending_direction: None,
            start,
        }
    }

    /// Build a snake from explicit segments (head first). The target length
    /// is the segment count; `start` is where a reset puts the snake.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        start: Position,
    ) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return Self::new(start);
        }

        Self {
            length: segments.len(),
            segments,
            direction,
            pending_direction: None,
            start,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Buffer a turn for the next tick. A reversal onto the body is dropped.
    pub fn request_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Commit the buffered turn, if any
    pub fn update_direction(&mut self) {
        if let Some(next) = self.pending_direction.take() {
            if !self.direction.is_opposite(next) {
                self.direction = next;
            }
        }
    }

    /// Move one cell in the committed direction, wrapping around `board`
    pub fn advance(&mut self, board: &Board) -> MoveOutcome {
        let new_head = board.wrap(self.head(), self.direction.delta());

        if self.segments.contains(&new_head) {
            let length_before = self.length;
            self.reset();
            return MoveOutcome::Collided { length_before };
        }

        self.segments.push_front(new_head);
        if self.segments.len() > self.length {
            self.segments.pop_back();
        }

        MoveOutcome::Moved
    }

    /// By-value form of [`Snake::advance`]
    pub fn moved(mut self, board: &Board) -> (Self, MoveOutcome) {
        let outcome = self.advance(board);
        (self, outcome)
    }

    /// Raise the target length by one
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Back to a single cell at the start position, heading right
    pub fn reset(&mut self) {
        self.segments.clear();
        self.segments.push_back(self.start);
        self.length = 1;
        self.direction = Direction::default();
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(10, 10)
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5));
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_snake_movement() {
        let board = board();
        let mut snake = Snake::new(Position::new(5, 5));

        assert_eq!(snake.advance(&board), MoveOutcome::Moved);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.segments().len(), 1);
    }

    #[test]
    fn test_growth_catches_up_one_cell_per_move() {
        let board = board();
        let mut snake = Snake::new(Position::new(0, 0));
        snake.grow();
        snake.grow();
        snake.grow();

        for expected in [2, 3, 4, 4, 4] {
            let before = snake.segments().len();
            assert_eq!(snake.advance(&board), MoveOutcome::Moved);
            assert_eq!(snake.segments().len(), expected);
            assert_eq!(snake.segments().len(), snake.length().min(before + 1));
        }
    }

    #[test]
    fn test_move_wraps_around_edge() {
        let board = board();
        let mut snake = Snake::new(Position::new(9, 3));
        snake.advance(&board);
        assert_eq!(snake.head(), Position::new(0, 3));
    }

    #[test]
    fn test_update_direction_applies_once() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_direction(Direction::Up);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));

        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pending_direction(), None);

        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_reverse_request_has_no_effect() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_direction(Direction::Left);
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision_resets() {
        let board = board();
        // Heading up into segment 3:
        //   (5,5) head, (6,5), (6,4), (5,4), (4,4)
        let start = Position::new(1, 1);
        let mut snake = Snake::from_segments(
            [(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)].map(Position::from),
            Direction::Up,
            start,
        );
        snake.request_direction(Direction::Down);

        let outcome = snake.advance(&board);

        assert_eq!(outcome, MoveOutcome::Collided { length_before: 5 });
        assert!(outcome.collided());
        assert_eq!(snake.segments().iter().copied().collect::<Vec<_>>(), vec![start]);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_moving_onto_tail_collides() {
        // The tail is still part of the body when the head is checked
        let board = board();
        let snake = Snake::from_segments(
            [(5, 5), (5, 6), (4, 6), (4, 5)].map(Position::from),
            Direction::Left,
            Position::new(0, 0),
        );

        let (snake, outcome) = snake.moved(&board);
        assert!(outcome.collided());
        assert_eq!(snake.head(), Position::new(0, 0));
    }

    #[test]
    fn test_no_duplicate_cells_after_moves() {
        let board = Board::new(4, 4);
        let mut snake = Snake::new(Position::new(0, 0));
        let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];

        for (i, turn) in turns.iter().cycle().take(40).enumerate() {
            if i % 3 == 0 {
                snake.grow();
            }
            snake.request_direction(*turn);
            snake.update_direction();
            snake.advance(&board);

            let cells = snake.segments();
            for (a, pos) in cells.iter().enumerate() {
                assert!(!cells.iter().skip(a + 1).any(|other| other == pos));
            }
            assert!(cells.len() <= snake.length());
        }
    }
}
