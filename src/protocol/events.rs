//! Wire events.
//!
//! Variant names are kebab-case on the wire (`place-path`, `board-updated`).
//! Both enums are externally tagged so that they survive the binary codec
//! as well as JSON.

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::core::{ConnectionId, PlayerId};
use crate::game::{Action, ActionTarget};
use crate::rooms::RoomCode;
use crate::setup::Role;
use crate::tiles::{Tile, Tool};
use crate::view::{PublicCell, PublicPlayer, RoleReveal};

/// Inbound, from one connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientEvent {
    CreateRoom {
        name: String,
    },
    JoinRoom {
        code: String,
        name: String,
    },
    StartGame,
    PlacePath {
        card_index: usize,
        row: i32,
        col: i32,
        #[serde(default)]
        rotated: bool,
    },
    PlayAction {
        card_index: usize,
        #[serde(default)]
        target_player: Option<ConnectionId>,
        #[serde(default)]
        target_row: Option<i32>,
        #[serde(default)]
        target_col: Option<i32>,
        /// Signed so that a negative index is a rule violation, not a
        /// decode failure.
        #[serde(default)]
        target_goal_index: Option<i32>,
    },
    Discard {
        card_index: usize,
    },
}

impl ClientEvent {
    /// The in-game action this event asks for, if it is one.
    #[must_use]
    pub fn to_action(&self) -> Option<Action> {
        match *self {
            ClientEvent::PlacePath {
                card_index,
                row,
                col,
                rotated,
            } => Some(Action::PlacePath {
                card_index,
                at: Coord::new(row, col),
                rotated,
            }),
            ClientEvent::PlayAction {
                card_index,
                target_player,
                target_row,
                target_col,
                target_goal_index,
            } => Some(Action::PlayAction {
                card_index,
                target: ActionTarget {
                    player: target_player,
                    cell: target_row.zip(target_col).map(|(row, col)| Coord::new(row, col)),
                    goal_index: target_goal_index.and_then(|i| usize::try_from(i).ok()),
                },
            }),
            ClientEvent::Discard { card_index } => Some(Action::Discard { card_index }),
            ClientEvent::CreateRoom { .. } | ClientEvent::JoinRoom { .. } | ClientEvent::StartGame => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ClientEvent::CreateRoom { .. } => "create-room",
            ClientEvent::JoinRoom { .. } => "join-room",
            ClientEvent::StartGame => "start-game",
            ClientEvent::PlacePath { .. } => "place-path",
            ClientEvent::PlayAction { .. } => "play-action",
            ClientEvent::Discard { .. } => "discard",
        }
    }
}

/// Lobby roster line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyEntry {
    pub name: String,
    pub is_host: bool,
}

/// Public description of a played card. Targets are named, never seated
/// ids, and a map carries no result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayedDetail {
    Break { tool: Tool, target: String },
    Repair { tool: Tool, target: String },
    Rockfall { position: Coord },
    Map { goal_index: usize },
    Discard,
}

/// Outbound, to one connection or a whole room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerEvent {
    RoomCreated {
        code: RoomCode,
        players: Vec<LobbyEntry>,
    },
    RoomJoined {
        code: RoomCode,
        players: Vec<LobbyEntry>,
    },
    PlayerListUpdated {
        players: Vec<LobbyEntry>,
    },
    /// Private: one per seat, with that seat's role and hand.
    GameStarted {
        role: Role,
        hand: Vec<Tile>,
        board: Vec<PublicCell>,
        players: Vec<PublicPlayer>,
        turn_index: PlayerId,
        self_index: PlayerId,
    },
    BoardUpdated {
        board: Vec<PublicCell>,
    },
    /// Private.
    HandUpdated {
        hand: Vec<Tile>,
    },
    PlayersUpdated {
        players: Vec<PublicPlayer>,
    },
    TurnChanged {
        turn_index: PlayerId,
    },
    ActionPlayed {
        actor: String,
        detail: PlayedDetail,
    },
    /// Private to whoever played the map.
    MapResult {
        goal_index: usize,
        has_gold: bool,
    },
    GoalRevealed {
        position: Coord,
        has_gold: bool,
    },
    GameOver {
        winner: Role,
        roles: Vec<RoleReveal>,
    },
    /// Private.
    ErrorMsg {
        text: String,
    },
    PlayerDisconnected {
        name: String,
    },
}

impl ServerEvent {
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        ServerEvent::ErrorMsg { text: text.into() }
    }

    /// Wire name of the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            ServerEvent::RoomCreated { .. } => "room-created",
            ServerEvent::RoomJoined { .. } => "room-joined",
            ServerEvent::PlayerListUpdated { .. } => "player-list-updated",
            ServerEvent::GameStarted { .. } => "game-started",
            ServerEvent::BoardUpdated { .. } => "board-updated",
            ServerEvent::HandUpdated { .. } => "hand-updated",
            ServerEvent::PlayersUpdated { .. } => "players-updated",
            ServerEvent::TurnChanged { .. } => "turn-changed",
            ServerEvent::ActionPlayed { .. } => "action-played",
            ServerEvent::MapResult { .. } => "map-result",
            ServerEvent::GoalRevealed { .. } => "goal-revealed",
            ServerEvent::GameOver { .. } => "game-over",
            ServerEvent::ErrorMsg { .. } => "error-msg",
            ServerEvent::PlayerDisconnected { .. } => "player-disconnected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_names() {
        let event: ClientEvent = serde_json::from_str(r#"{"join-room":{"code":"abcd","name":"ann"}}"#).unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                code: "abcd".to_string(),
                name: "ann".to_string()
            }
        );

        let start: ClientEvent = serde_json::from_str(r#""start-game""#).unwrap();
        assert_eq!(start, ClientEvent::StartGame);
    }

    #[test]
    fn test_play_action_targets_are_optional() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"play-action":{"card_index":2,"target_goal_index":1}}"#).unwrap();
        let action = event.to_action().unwrap();
        assert_eq!(
            action,
            Action::PlayAction {
                card_index: 2,
                target: ActionTarget::goal(1)
            }
        );
    }

    #[test]
    fn test_negative_goal_index_becomes_missing() {
        let event = ClientEvent::PlayAction {
            card_index: 0,
            target_player: None,
            target_row: None,
            target_col: None,
            target_goal_index: Some(-1),
        };
        match event.to_action() {
            Some(Action::PlayAction { target, .. }) => assert_eq!(target.goal_index, None),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rockfall_needs_row_and_col() {
        let event = ClientEvent::PlayAction {
            card_index: 0,
            target_player: None,
            target_row: Some(3),
            target_col: None,
            target_goal_index: None,
        };
        match event.to_action() {
            Some(Action::PlayAction { target, .. }) => assert_eq!(target.cell, None),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rotated_defaults_to_false() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"place-path":{"card_index":0,"row":3,"col":1}}"#).unwrap();
        assert_eq!(
            event.to_action(),
            Some(Action::PlacePath {
                card_index: 0,
                at: Coord::new(3, 1),
                rotated: false
            })
        );
    }

    #[test]
    fn test_server_event_shape() {
        let event = ServerEvent::ActionPlayed {
            actor: "ann".to_string(),
            detail: PlayedDetail::Map { goal_index: 2 },
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"action-played":{"actor":"ann","detail":{"map":{"goal_index":2}}}}"#
        );
        assert_eq!(event.kind(), "action-played");
        assert_eq!(ServerEvent::error("nope").kind(), "error-msg");
    }

    #[test]
    fn test_lobby_commands_are_not_actions() {
        assert_eq!(ClientEvent::StartGame.to_action(), None);
        assert_eq!(ClientEvent::CreateRoom { name: "x".into() }.to_action(), None);
    }
}
