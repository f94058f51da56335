//! Per-recipient fan-out of game events.
//!
//! Turns the full-truth `GameEvent`s of one step into the deliveries each
//! connection is entitled to. The order is fixed:
//!
//! 1. notices (`map-result` to the actor only, `action-played`,
//!    `goal-revealed`) in the order they happened
//! 2. `board-updated` (skipped after a discard), then `players-updated`
//! 3. `hand-updated` to each seat privately
//! 4. `turn-changed` or `game-over`

use crate::core::PlayerId;
use crate::game::{ActionDetail, Game, GameEvent, GameResult};
use crate::protocol::{Outbox, PlayedDetail, ServerEvent};
use crate::rooms::RoomCode;

use super::public::{public_board, public_players, role_reveal};

/// Private `game-started` for every seat.
#[must_use]
pub fn opening(game: &Game) -> Outbox {
    let board = public_board(game.board());
    let players = public_players(game);

    let mut outbox = Outbox::new();
    for (seat, player) in game.players().iter() {
        outbox.send(
            player.connection,
            ServerEvent::GameStarted {
                role: player.role,
                hand: player.hand.clone(),
                board: board.clone(),
                players: players.clone(),
                turn_index: game.current_turn(),
                self_index: seat,
            },
        );
    }
    outbox
}

/// Deliveries for one accepted action.
#[must_use]
pub fn fan_out(room: &RoomCode, game: &Game, events: &[GameEvent]) -> Outbox {
    let mut outbox = Outbox::new();
    let mut board_changed = true;

    for event in events {
        match *event {
            GameEvent::TilePlaced { .. } | GameEvent::TurnChanged(_) | GameEvent::GameOver(_) => {}
            GameEvent::GoalRevealed { position, has_gold, .. } => {
                outbox.broadcast(room, ServerEvent::GoalRevealed { position, has_gold });
            }
            GameEvent::MapResult {
                player,
                goal_index,
                has_gold,
            } => {
                if let Some(p) = game.player(player) {
                    outbox.send(p.connection, ServerEvent::MapResult { goal_index, has_gold });
                }
            }
            GameEvent::ActionPlayed { player, detail } => {
                if detail == ActionDetail::Discard {
                    board_changed = false;
                }
                outbox.broadcast(
                    room,
                    ServerEvent::ActionPlayed {
                        actor: name_of(game, player),
                        detail: played_detail(game, detail),
                    },
                );
            }
        }
    }

    if board_changed {
        outbox.broadcast(
            room,
            ServerEvent::BoardUpdated {
                board: public_board(game.board()),
            },
        );
    }
    outbox.broadcast(
        room,
        ServerEvent::PlayersUpdated {
            players: public_players(game),
        },
    );
    for player in game.players().values() {
        outbox.send(
            player.connection,
            ServerEvent::HandUpdated {
                hand: player.hand.clone(),
            },
        );
    }

    for event in events.iter().filter(|e| e.is_terminal()) {
        match *event {
            GameEvent::TurnChanged(seat) => {
                outbox.broadcast(room, ServerEvent::TurnChanged { turn_index: seat });
            }
            GameEvent::GameOver(result) => outbox.broadcast(room, game_over(game, result)),
            _ => {}
        }
    }
    outbox
}

/// `game-over` with every role revealed.
#[must_use]
pub fn game_over(game: &Game, result: GameResult) -> ServerEvent {
    ServerEvent::GameOver {
        winner: result.winner(),
        roles: role_reveal(game),
    }
}

fn name_of(game: &Game, seat: PlayerId) -> String {
    game.player(seat).map(|p| p.name.clone()).unwrap_or_default()
}

fn played_detail(game: &Game, detail: ActionDetail) -> PlayedDetail {
    match detail {
        ActionDetail::Break { tool, target } => PlayedDetail::Break {
            tool,
            target: name_of(game, target),
        },
        ActionDetail::Repair { tool, target } => PlayedDetail::Repair {
            tool,
            target: name_of(game, target),
        },
        ActionDetail::Rockfall { position } => PlayedDetail::Rockfall { position },
        ActionDetail::Map { goal_index } => PlayedDetail::Map { goal_index },
        ActionDetail::Discard => PlayedDetail::Discard,
    }
}
