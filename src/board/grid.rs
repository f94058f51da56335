//! The board: a sparse map from cell to placed tile.
//!
//! The start tile sits at `START`, the three goals at `GOALS`. Exactly one
//! goal holds gold. The map is an `im::OrdMap`, so cloning a board for a
//! snapshot is O(1) and iteration is in stable row-major order.

use im::OrdMap;

use super::coord::Coord;
use crate::core::GameRng;
use crate::tiles::{Special, Tile};

/// Where the start tile is laid.
pub const START: Coord = Coord::new(3, 0);

/// Goal slots, in the order goal indices refer to them.
pub const GOALS: [Coord; 3] = [Coord::new(1, 8), Coord::new(3, 8), Coord::new(5, 8)];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: OrdMap<Coord, Tile>,
}

impl Board {
    /// A board with nothing on it.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start tile plus three goals, gold under `GOALS[gold_index]`.
    #[must_use]
    pub fn new(gold_index: usize) -> Self {
        let mut board = Self::empty();
        board.place(START, Tile::start());
        for (i, &pos) in GOALS.iter().enumerate() {
            board.place(pos, Tile::goal(i, i == gold_index));
        }
        board
    }

    /// Standard layout with the gold slot drawn uniformly.
    #[must_use]
    pub fn with_random_gold(rng: &mut GameRng) -> Self {
        Self::new(rng.gen_range_usize(0..GOALS.len()))
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Option<&Tile> {
        self.cells.get(&at)
    }

    #[must_use]
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.cells.contains_key(&at)
    }

    /// Put a tile down, returning whatever was there.
    pub fn place(&mut self, at: Coord, tile: Tile) -> Option<Tile> {
        self.cells.insert(at, tile)
    }

    pub fn remove(&mut self, at: Coord) -> Option<Tile> {
        self.cells.remove(&at)
    }

    /// Placed tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &Tile)> {
        self.cells.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of ordinary (non start, non goal) tiles on the board.
    #[must_use]
    pub fn placed_path_count(&self) -> usize {
        self.cells.values().filter(|t| !t.is_special()).count()
    }

    /// The goal tile in slot `index`.
    #[must_use]
    pub fn goal(&self, index: usize) -> Option<&Tile> {
        GOALS.get(index).and_then(|pos| self.get(*pos))
    }

    /// Slot index of a goal position.
    #[must_use]
    pub fn goal_index(at: Coord) -> Option<usize> {
        GOALS.iter().position(|&g| g == at)
    }

    /// Slot holding the gold.
    #[must_use]
    pub fn gold_index(&self) -> Option<usize> {
        (0..GOALS.len()).find(|&i| self.goal(i).and_then(Tile::has_gold) == Some(true))
    }

    /// Turn goal `index` face up. Returns its gold status.
    pub fn reveal_goal(&mut self, index: usize) -> Option<bool> {
        let pos = *GOALS.get(index)?;
        let path = self.cells.get_mut(&pos)?.as_path_mut()?;
        match &mut path.special {
            Some(Special::Goal { has_gold, revealed }) => {
                *revealed = true;
                Some(*has_gold)
            }
            _ => None,
        }
    }
}
