//! Board structure with move counting

use super::{Pos, Stone, MAX_BOARD_SIZE};

/// Errors raised by board access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("position {0} is already occupied")]
    Occupied(Pos),

    #[error("board size {0} is not supported (expected 1..={max})", max = MAX_BOARD_SIZE)]
    InvalidSize(usize),
}

/// Square game board with a running count of placed stones.
///
/// `move_count` always equals the number of non-empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Cells in row-major order
    grid: Vec<Stone>,
    move_count: usize,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            grid: vec![Stone::Empty; size * size],
            move_count: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stones currently on the board
    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Number of cells on the board
    #[inline]
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count == self.capacity()
    }

    /// Check that a position lies on this board
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    /// Row-major index of an on-board position
    fn index(&self, pos: Pos) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(pos.row as usize * self.size + pos.col as usize)
        } else {
            Err(BoardError::OutOfBounds {
                row: pos.row as usize,
                col: pos.col as usize,
                size: self.size,
            })
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Result<Stone, BoardError> {
        self.index(pos).map(|idx| self.grid[idx])
    }

    /// Stone at position, treating off-board cells as empty
    #[inline]
    pub fn stone_at(&self, pos: Pos) -> Stone {
        self.get(pos).unwrap_or(Stone::Empty)
    }

    /// Place a stone on an empty cell.
    ///
    /// Placing `Stone::Empty` is a no-op that still validates the position.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        let idx = self.index(pos)?;
        if self.grid[idx] != Stone::Empty {
            return Err(BoardError::Occupied(pos));
        }
        if stone != Stone::Empty {
            self.grid[idx] = stone;
            self.move_count += 1;
        }
        Ok(())
    }

    /// Remove a stone, keeping `move_count` in step with the grid
    pub fn clear(&mut self, pos: Pos) -> Result<(), BoardError> {
        let idx = self.index(pos)?;
        if self.grid[idx] != Stone::Empty {
            self.grid[idx] = Stone::Empty;
            self.move_count -= 1;
        }
        Ok(())
    }

    /// Back to the construction state
    pub fn reset(&mut self) {
        self.grid.fill(Stone::Empty);
        self.move_count = 0;
    }

    /// Centre point of the board (boards with an odd size have an exact one)
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// All on-board neighbors of a position (up to 8)
    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        (-1i32..=1)
            .flat_map(|dr| (-1i32..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(move |(dr, dc)| pos.offset(dr, dc))
            .filter(|p| self.contains(*p))
    }

    /// Iterate over every occupied cell
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        self.grid.iter().enumerate().filter_map(|(idx, &stone)| {
            (stone != Stone::Empty).then(|| {
                let pos = Pos::new((idx / self.size) as u8, (idx % self.size) as u8);
                (pos, stone)
            })
        })
    }
}

impl std::fmt::Display for Board {
    /// `x` for empty cells, `B`/`W` for stones, one row per line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.chunks(self.size) {
            for (i, stone) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                let c = match stone {
                    Stone::Empty => 'x',
                    Stone::Black => 'B',
                    Stone::White => 'W',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
