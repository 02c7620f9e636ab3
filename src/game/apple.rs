use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::board::Board;
use super::state::Position;

/// Random draws tried before falling back to scanning the free cells
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// The single apple on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Place a new apple on a random cell not in `excluded`.
    /// Returns `None` when every cell is excluded.
    pub fn spawn<'a, R: Rng + ?Sized>(
        board: &Board,
        excluded: impl IntoIterator<Item = &'a Position>,
        rng: &mut R,
    ) -> Option<Self> {
        random_free_cell(board, excluded, rng).map(Self::new)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move to a uniformly random cell outside `excluded`.
    ///
    /// Returns the new position, or `None` (leaving the apple where it was)
    /// when `excluded` covers the whole board.
    pub fn relocate<'a, R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        excluded: impl IntoIterator<Item = &'a Position>,
        rng: &mut R,
    ) -> Option<Position> {
        let position = random_free_cell(board, excluded, rng)?;
        self.position = position;
        Some(position)
    }
}

fn random_free_cell<'a, R: Rng + ?Sized>(
    board: &Board,
    excluded: impl IntoIterator<Item = &'a Position>,
    rng: &mut R,
) -> Option<Position> {
    let excluded: HashSet<Position> = excluded
        .into_iter()
        .copied()
        .filter(|pos| board.contains(*pos))
        .collect();

    if excluded.len() >= board.area() {
        return None;
    }

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let pos = Position::new(
            rng.gen_range(0..board.width()) as i32,
            rng.gen_range(0..board.height()) as i32,
        );
        if !excluded.contains(&pos) {
            return Some(pos);
        }
    }

    // Crowded board: pick uniformly among what is left
    board.cells().filter(|pos| !excluded.contains(pos)).choose(rng)
}
