//! Domain events emitted by the state machine.
//!
//! `Game::apply` returns these in the order they happened. They carry full
//! truth (seat ids, gold status); deciding who may see what is the job of
//! the `view` module.

use crate::board::Coord;
use crate::core::PlayerId;
use crate::tiles::Tool;

use super::result::GameResult;

/// What a played card did, as announced to the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionDetail {
    Break { tool: Tool, target: PlayerId },
    Repair { tool: Tool, target: PlayerId },
    Rockfall { position: Coord },
    /// Only the slot; the answer goes in `GameEvent::MapResult`.
    Map { goal_index: usize },
    Discard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    TilePlaced { player: PlayerId, at: Coord },
    GoalRevealed {
        index: usize,
        position: Coord,
        has_gold: bool,
    },
    /// Private to `player`.
    MapResult {
        player: PlayerId,
        goal_index: usize,
        has_gold: bool,
    },
    ActionPlayed { player: PlayerId, detail: ActionDetail },
    TurnChanged(PlayerId),
    GameOver(GameResult),
}

impl GameEvent {
    /// Events that end a step: after one of these nothing else follows.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::TurnChanged(_) | GameEvent::GameOver(_))
    }
}
