use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

use crate::piece::Player;

/// A (row, column) step used to walk the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub row_delta: i32,
    pub column_delta: i32,
}

impl Direction {
    pub const NORTH: Direction = Direction::new(-1, 0);
    pub const SOUTH: Direction = Direction::new(1, 0);
    pub const EAST: Direction = Direction::new(0, 1);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const NORTH_EAST: Direction = Direction::new(-1, 1);
    pub const NORTH_WEST: Direction = Direction::new(-1, -1);
    pub const SOUTH_EAST: Direction = Direction::new(1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(1, -1);

    pub const fn new(row_delta: i32, column_delta: i32) -> Self {
        Direction {
            row_delta,
            column_delta,
        }
    }
}

impl Add for Direction {
    type Output = Direction;

    fn add(self, other: Direction) -> Direction {
        Direction::new(
            self.row_delta + other.row_delta,
            self.column_delta + other.column_delta,
        )
    }
}

impl Mul<Direction> for i32 {
    type Output = Direction;

    fn mul(self, dir: Direction) -> Direction {
        Direction::new(self * dir.row_delta, self * dir.column_delta)
    }
}

/// A square on the board. Row 0 is rank 8, column 0 is file a.
///
/// A position may lie off the board; `Board::is_inside` is the bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Self {
        Position { row, column }
    }

    /// Checkerboard colour of the square: a1 is dark, h1 is light.
    pub fn square_color(self) -> Player {
        if (self.row + self.column) % 2 == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Parse algebraic notation such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Position::new(
            8 - (rank - b'0') as i32,
            (file - b'a') as i32,
        ))
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, dir: Direction) -> Position {
        Position::new(self.row + dir.row_delta, self.column + dir.column_delta)
    }
}

impl AddAssign<Direction> for Position {
    fn add_assign(&mut self, dir: Direction) {
        *self = *self + dir;
    }
}

impl fmt::Display for Position {
    /// Algebraic name for on-board squares, raw coordinates otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..8).contains(&self.row) && (0..8).contains(&self.column) {
            let file = (b'a' + self.column as u8) as char;
            write!(f, "{}{}", file, 8 - self.row)
        } else {
            write!(f, "({}, {})", self.row, self.column)
        }
    }
}
