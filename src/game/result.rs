//! Game outcome.

use serde::{Deserialize, Serialize};

use crate::setup::Role;

/// Result of a completed game. Victory is shared by a whole faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameResult {
    /// A path reached the gold.
    MinersWin,
    /// Every hand and the deck ran dry first.
    SaboteursWin,
}

impl GameResult {
    /// The winning faction.
    #[must_use]
    pub const fn winner(self) -> Role {
        match self {
            GameResult::MinersWin => Role::Miner,
            GameResult::SaboteursWin => Role::Saboteur,
        }
    }

    /// Check if a player with `role` won.
    #[must_use]
    pub fn is_winner(self, role: Role) -> bool {
        self.winner() == role
    }
}
