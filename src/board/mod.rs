//! Board representation for connect-N games

pub mod board;
pub mod runs;


// Re-exports
pub use board::{Board, BoardError};
pub use runs::RunGroups;

/// Largest supported board dimension (coordinates are stored as `u8`)
pub const MAX_BOARD_SIZE: usize = 255;

/// Default board dimension
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Position shifted by a signed offset, if it stays non-negative and
    /// representable. Bounds against a board are checked by the caller.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let row = u8::try_from(self.row as i32 + dr).ok()?;
        let col = u8::try_from(self.col as i32 + dc).ok()?;
        Some(Pos { row, col })
    }

    /// Chebyshev (king-move) distance between two positions
    #[inline]
    pub fn distance(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

/// The four axes a run can lie on.
///
/// The numeric ids match the classic layout around a stone:
///
/// ```text
/// 1   4   3
///   ↖ ↑ ↗
/// 2 ← · → 2
///   ↙ ↓ ↘
/// 3   4   1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Row and column offsets share sign (↘/↖)
    Diagonal = 1,
    /// Same row
    Horizontal = 2,
    /// Row and column offsets differ in sign (↙/↗)
    AntiDiagonal = 3,
    /// Same column
    Vertical = 4,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Diagonal,
        Direction::Horizontal,
        Direction::AntiDiagonal,
        Direction::Vertical,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Axis of a unit neighbor offset; `None` for the zero offset.
    pub fn classify(dr: i32, dc: i32) -> Option<Direction> {
        match (dr, dc) {
            (0, 0) => None,
            (0, _) => Some(Direction::Horizontal),
            (_, 0) => Some(Direction::Vertical),
            _ if dr * dc > 0 => Some(Direction::Diagonal),
            _ => Some(Direction::AntiDiagonal),
        }
    }

    /// The two unit offsets lying on this axis
    pub fn steps(self) -> [(i32, i32); 2] {
        match self {
            Direction::Diagonal => [(1, 1), (-1, -1)],
            Direction::Horizontal => [(0, 1), (0, -1)],
            Direction::AntiDiagonal => [(1, -1), (-1, 1)],
            Direction::Vertical => [(1, 0), (-1, 0)],
        }
    }
}
