//! The draw pile.
//!
//! A `Deck` is a stack: the top is the end of the vector. Dealing and
//! drawing both take from the top. Nothing is ever put back.

use crate::core::GameRng;
use crate::tiles::{build_deck, Tile};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Wrap tiles as-is; the last tile is the top.
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// The full template expansion, shuffled once.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut tiles = build_deck();
        rng.shuffle(&mut tiles);
        Self { tiles }
    }

    /// Take the top tile.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Deal `hand_size` tiles to each of `players` hands, one hand at a time.
    ///
    /// Hands come up short only if the deck runs out.
    pub fn deal(&mut self, players: usize, hand_size: usize) -> Vec<Vec<Tile>> {
        (0..players)
            .map(|_| (0..hand_size).map_while(|_| self.draw()).collect())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
