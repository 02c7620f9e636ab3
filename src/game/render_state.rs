use super::state::Position;

/// Something a renderer has to draw at one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    SnakeHead(Position),
    SnakeBody(Position),
    Apple(Position),
}

impl Sprite {
    pub fn position(&self) -> Position {
        match *self {
            Sprite::SnakeHead(pos) | Sprite::SnakeBody(pos) | Sprite::Apple(pos) => pos,
        }
    }
}

/// Snapshot of everything the screen shows after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    /// Snake cells, head first
    pub segments: Vec<Position>,
    pub apple: Position,
    pub length: usize,
    pub high_score: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub board_filled: bool,
}

impl RenderState {
    /// Apple first, then the body tail to head, so the head is drawn last
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let body = self
            .segments
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &pos)| {
                if i == 0 {
                    Sprite::SnakeHead(pos)
                } else {
                    Sprite::SnakeBody(pos)
                }
            });

        std::iter::once(Sprite::Apple(self.apple)).chain(body)
    }

    pub fn head(&self) -> Option<Position> {
        self.segments.first().copied()
    }

    /// Row-major grid of what occupies each cell; later sprites win
    pub fn to_grid(&self) -> Vec<Vec<Option<Sprite>>> {
        let mut grid = vec![vec![None; self.grid_width]; self.grid_height];
        for sprite in self.sprites() {
            let pos = sprite.position();
            if let Some(cell) = grid
                .get_mut(pos.y as usize)
                .and_then(|row| row.get_mut(pos.x as usize))
            {
                *cell = Some(sprite);
            }
        }
        grid
    }
}
