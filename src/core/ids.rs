//! Identifiers for tiles and connections.
//!
//! ## TileId
//!
//! Every physical tile carries a `TileId` so that same-shaped siblings
//! (five copies of `cross`, say) stay distinguishable. Deck tiles are numbered
//! from zero in template-table order; the start and goal tiles use reserved
//! ids at the top of the range.
//!
//! ## ConnectionId
//!
//! Opaque handle for a client connection, handed to us by the transport.
//!
//! ```
//! use saboteur_engine::core::TileId;
//!
//! let first = TileId::new(0);
//! assert!(!first.is_fixture());
//! assert!(TileId::START.is_fixture());
//! assert!(TileId::goal(2).is_fixture());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a tile instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// The start tile.
    pub const START: TileId = TileId(u32::MAX);

    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Id of the goal tile in slot `index` (0..3).
    #[must_use]
    pub const fn goal(index: usize) -> Self {
        Self(u32::MAX - 1 - index as u32)
    }

    /// True for the start and goal tiles, which never come from the deck.
    #[must_use]
    pub const fn is_fixture(self) -> bool {
        self.0 >= u32::MAX - 3
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Transport-level connection handle.
///
/// The engine never interprets the value; it only compares and hashes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ConnectionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Conn({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_are_distinct() {
        let ids = [TileId::START, TileId::goal(0), TileId::goal(1), TileId::goal(2)];
        for (i, a) in ids.iter().enumerate() {
            assert!(a.is_fixture());
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_deck_ids_are_not_fixtures() {
        for raw in [0, 1, 68, 10_000] {
            assert!(!TileId::new(raw).is_fixture());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TileId(42)), "Tile(42)");
        assert_eq!(format!("{}", ConnectionId(7)), "Conn(7)");
    }

    #[test]
    fn test_serialization() {
        let id = ConnectionId::from(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ConnectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
