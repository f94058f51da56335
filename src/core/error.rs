//! Error types.
//!
//! Two families reach players. Protocol violations (acting out of turn, an
//! index past the end of the hand, a target id nobody owns) are answered with
//! silence: `is_silent()` returns true and the directory drops them. Rule
//! violations carry a reason string that is sent privately to the actor.
//! Neither kind ever mutates state.

use thiserror::Error;

use crate::tiles::Tool;

/// Tile construction and transformation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileError {
    #[error("edge {0} is listed in a connection group but is closed")]
    ClosedEdgeConnected(usize),
    #[error("edge {0} appears in more than one connection group")]
    EdgeInSeveralGroups(usize),
    #[error("edge index {0} is out of range")]
    BadEdgeIndex(usize),
    #[error("action cards cannot be rotated")]
    NotRotatable,
}

/// Rejections of an in-game action.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("the game is not in progress")]
    NotPlaying,
    #[error("you are not seated in this game")]
    UnknownPlayer,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("card index {index} is out of range for a hand of {hand_len}")]
    CardIndexOutOfRange { index: usize, hand_len: usize },
    #[error("your tools are broken, you cannot place path cards")]
    ToolsBroken,
    #[error("that is not a path card")]
    NotAPathCard,
    #[error("that is not an action card")]
    NotAnActionCard,
    #[error("that position is outside the board")]
    OutOfBounds,
    #[error("you cannot place that card there")]
    IllegalPlacement,
    #[error("choose a target player")]
    MissingTargetPlayer,
    #[error("no such target player")]
    UnknownTargetPlayer,
    #[error("you cannot break your own tools")]
    TargetIsSelf,
    #[error("that {0} is already broken")]
    ToolAlreadyBroken(Tool),
    #[error("that {0} is not broken")]
    ToolNotBroken(Tool),
    #[error("choose a path card to remove")]
    MissingTargetCell,
    #[error("there is no card at that position")]
    EmptyCell,
    #[error("start and goal cards cannot be removed")]
    ProtectedTile,
    #[error("choose a goal card to inspect")]
    InvalidGoalIndex,
}

impl ActionError {
    /// Protocol violations are dropped without telling the sender.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ActionError::NotPlaying
                | ActionError::UnknownPlayer
                | ActionError::NotYourTurn
                | ActionError::CardIndexOutOfRange { .. }
                | ActionError::NotAnActionCard
                | ActionError::UnknownTargetPlayer
        )
    }
}

/// Rejections at the lobby/session level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("room not found")]
    UnknownRoom,
    #[error("a game is already in progress")]
    AlreadyStarted,
    #[error("room is full")]
    RoomFull,
    #[error("that name is already taken")]
    DuplicateName,
    #[error("at least {0} players are needed")]
    NotEnoughPlayers(usize),
    #[error("invalid display name")]
    InvalidName,
    #[error("connection is not in a room")]
    NotInRoom,
    #[error("connection is already in a room")]
    AlreadyInRoom,
    #[error("no room code is free, try again later")]
    NoRoomCode,
    #[error("only the host can start the game")]
    NotHost,
    #[error(transparent)]
    Action(#[from] ActionError),
}

impl RoomError {
    /// Protocol violations are dropped without telling the sender.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        match self {
            RoomError::InvalidName
            | RoomError::NotInRoom
            | RoomError::AlreadyInRoom
            | RoomError::NotHost => true,
            RoomError::Action(err) => err.is_silent(),
            _ => false,
        }
    }
}

/// Wire encoding errors.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),
}
