use super::state::Position;

/// Fixed-size toroidal grid
///
/// Coordinates leaving one edge re-enter on the opposite edge, so every
/// position produced by [`Board::wrap`] lies inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    /// Create a board of `width` x `height` cells. Sides are clamped to
    /// `1..=i32::MAX`; [`GameConfig::validate`](super::GameConfig::validate)
    /// keeps real configs far below that.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: Self::side(width),
            height: Self::side(height),
        }
    }

    fn side(cells: usize) -> i32 {
        i32::try_from(cells.max(1)).unwrap_or(i32::MAX)
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Cell the snake starts from and returns to after a reset
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Add `delta` to `pos` and fold the result back onto the grid
    pub fn wrap(&self, pos: Position, delta: (i32, i32)) -> Position {
        let (dx, dy) = delta;
        Position::new(
            (pos.x as i64 + dx as i64).rem_euclid(self.width as i64) as i32,
            (pos.y as i64 + dy as i64).rem_euclid(self.height as i64) as i32,
        )
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_wrap_inside_grid() {
        let board = Board::new(32, 24);
        assert_eq!(board.wrap(Position::new(5, 5), (1, 0)), Position::new(6, 5));
        assert_eq!(board.wrap(Position::new(5, 5), (0, -1)), Position::new(5, 4));
    }

    #[test]
    fn test_wrap_each_edge() {
        let board = Board::new(32, 24);

        // Right edge -> column 0, same row
        assert_eq!(
            board.wrap(Position::new(31, 7), Direction::Right.delta()),
            Position::new(0, 7)
        );
        // Left edge -> last column
        assert_eq!(
            board.wrap(Position::new(0, 7), Direction::Left.delta()),
            Position::new(31, 7)
        );
        // Top edge -> last row
        assert_eq!(
            board.wrap(Position::new(9, 0), Direction::Up.delta()),
            Position::new(9, 23)
        );
        // Bottom edge -> row 0
        assert_eq!(
            board.wrap(Position::new(9, 23), Direction::Down.delta()),
            Position::new(9, 0)
        );
    }

    #[test]
    fn test_wrap_stays_in_range_for_every_cell() {
        let board = Board::new(5, 3);
        for cell in board.cells() {
            for dir in Direction::ALL {
                assert!(board.contains(board.wrap(cell, dir.delta())));
            }
        }
    }

    #[test]
    fn test_wrap_large_and_negative_deltas() {
        let board = Board::new(4, 4);
        assert_eq!(board.wrap(Position::new(1, 1), (9, -9)), Position::new(2, 0));
        assert_eq!(
            board.wrap(Position::new(0, 0), (i32::MIN, i32::MAX)),
            Position::new(0, 3)
        );
    }

    #[test]
    fn test_oversized_sides_are_clamped() {
        let board = Board::new(3_000_000_000, 1);
        assert_eq!(board.width(), i32::MAX as usize);
        assert!(board.contains(board.center()));
        assert!(board.center().x >= 0);

        let degenerate = Board::new(0, 0);
        assert_eq!((degenerate.width(), degenerate.height()), (1, 1));
    }

    #[test]
    fn test_center_and_area() {
        let board = Board::new(32, 24);
        assert_eq!(board.center(), Position::new(16, 12));
        assert_eq!(board.area(), 768);
        assert_eq!(board.cells().count(), 768);
    }
}
