//! Board coordinates and the placement grid.

use serde::{Deserialize, Serialize};

use crate::tiles::Direction;

/// A board cell. Rows grow downwards, columns to the right.
///
/// Coordinates are unbounded; `Bounds` limits where tiles may be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell on side `dir`.
    #[must_use]
    pub const fn neighbor(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// All four neighbours with the side they lie on.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Coord)> {
        Direction::ALL.into_iter().map(move |d| (d, self.neighbor(d)))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Rectangular placement grid anchored at (0, 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    #[must_use]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.rows && coord.col >= 0 && coord.col < self.cols
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_round_trip() {
        let c = Coord::new(3, 4);
        for dir in Direction::ALL {
            assert_eq!(c.neighbor(dir).neighbor(dir.opposite()), c);
        }
        assert_eq!(c.neighbor(Direction::Top), Coord::new(2, 4));
        assert_eq!(c.neighbor(Direction::Left), Coord::new(3, 3));
    }

    #[test]
    fn test_bounds() {
        let b = Bounds::new(7, 11);
        assert!(b.contains(Coord::new(0, 0)));
        assert!(b.contains(Coord::new(6, 10)));
        assert!(!b.contains(Coord::new(7, 0)));
        assert!(!b.contains(Coord::new(0, -1)));
        assert_eq!(b.cells().count(), 77);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(3, -1).to_string(), "3,-1");
    }
}
