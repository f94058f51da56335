//! Engine configuration.
//!
//! `GameConfig` holds the knobs a host process may want to change: roster
//! limits, name length, the placement grid, room code length and the RNG
//! seed. Rule constants that define the game itself (tile templates, goal
//! positions, hand sizes) are not configurable.

use serde::{Deserialize, Serialize};

use crate::board::Bounds;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum roster size before the host may start.
    pub min_players: usize,

    /// Maximum roster size; further joins are rejected.
    pub max_players: usize,

    /// Maximum display-name length after trimming.
    pub max_name_len: usize,

    /// Placement grid. Path tiles may only be placed inside it.
    pub bounds: Bounds,

    /// Length of generated room codes.
    pub room_code_len: usize,

    /// Root seed for the directory RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 10,
            max_name_len: 10,
            bounds: Bounds::new(7, 11),
            room_code_len: 4,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Change the roster limits.
    #[must_use]
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_room_code_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Room codes need at least one character");
        self.room_code_len = len;
        self
    }

    /// Trim a display name and check it against `max_name_len`.
    ///
    /// Returns `None` for empty or over-long names.
    #[must_use]
    pub fn normalize_name(&self, raw: &str) -> Option<String> {
        let name = raw.trim();
        if name.is_empty() || name.chars().count() > self.max_name_len {
            return None;
        }
        Some(name.to_string())
    }
}
