//! In-game actions.
//!
//! An `Action` names a card by its index in the actor's hand. Targets are
//! all optional at this level; which one is required depends on the card,
//! and a missing one is a rule violation reported back to the actor.

use crate::board::Coord;
use crate::core::ConnectionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Lay a path tile, optionally turned 180° first.
    PlacePath {
        card_index: usize,
        at: Coord,
        rotated: bool,
    },
    /// Play an action tile.
    PlayAction {
        card_index: usize,
        target: ActionTarget,
    },
    /// Throw a tile away unconditionally.
    Discard { card_index: usize },
}

impl Action {
    #[must_use]
    pub const fn card_index(&self) -> usize {
        match *self {
            Action::PlacePath { card_index, .. }
            | Action::PlayAction { card_index, .. }
            | Action::Discard { card_index } => card_index,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::PlacePath { .. } => "place-path",
            Action::PlayAction { .. } => "play-action",
            Action::Discard { .. } => "discard",
        }
    }
}

/// Targets for an action tile.
///
/// - break/repair: `player`
/// - rockfall: `cell`
/// - map: `goal_index`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionTarget {
    pub player: Option<ConnectionId>,
    pub cell: Option<Coord>,
    pub goal_index: Option<usize>,
}

impl ActionTarget {
    #[must_use]
    pub fn player(connection: ConnectionId) -> Self {
        Self {
            player: Some(connection),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cell(at: Coord) -> Self {
        Self {
            cell: Some(at),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn goal(index: usize) -> Self {
        Self {
            goal_index: Some(index),
            ..Self::default()
        }
    }
}
