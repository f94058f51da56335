//! Action handling and turn advancement.
//!
//! `Game::apply` is the only way play moves forward. Each handler runs
//! every check before its first write, so a rejected action leaves the game
//! exactly as it was. Accepted actions return the domain events they caused,
//! always ending with either `TurnChanged` or `GameOver`.

use log::debug;

use crate::board::{can_place, check_goal_reached, Coord};
use crate::core::{ActionError, ConnectionId, PlayerId};
use crate::tiles::{ActionKind, Tile};

use super::action::{Action, ActionTarget};
use super::events::{ActionDetail, GameEvent};
use super::result::GameResult;
use super::state::{Game, GamePhase};

impl Game {
    /// Apply `action` on behalf of the player behind `actor`.
    pub fn apply(&mut self, actor: ConnectionId, action: &Action) -> Result<Vec<GameEvent>, ActionError> {
        let seat = self.check_turn(actor, action.card_index())?;

        let events = match *action {
            Action::PlacePath {
                card_index,
                at,
                rotated,
            } => self.place_path(seat, card_index, at, rotated)?,
            Action::PlayAction { card_index, target } => self.play_action(seat, card_index, &target)?,
            Action::Discard { card_index } => self.discard(seat, card_index),
        };
        debug!("{} played {} ({} events)", seat, action.kind(), events.len());
        Ok(events)
    }

    /// Phase, seat, turn and hand index checks shared by every action.
    fn check_turn(&self, actor: ConnectionId, card_index: usize) -> Result<PlayerId, ActionError> {
        if self.phase != GamePhase::Playing {
            return Err(ActionError::NotPlaying);
        }
        let seat = self.seat_of(actor).ok_or(ActionError::UnknownPlayer)?;
        if seat != self.current_turn {
            return Err(ActionError::NotYourTurn);
        }
        let hand_len = self.players[seat].hand.len();
        if card_index >= hand_len {
            return Err(ActionError::CardIndexOutOfRange {
                index: card_index,
                hand_len,
            });
        }
        Ok(seat)
    }

    fn place_path(
        &mut self,
        seat: PlayerId,
        card_index: usize,
        at: Coord,
        rotated: bool,
    ) -> Result<Vec<GameEvent>, ActionError> {
        let player = &self.players[seat];
        if !player.can_build() {
            return Err(ActionError::ToolsBroken);
        }
        let held = &player.hand[card_index];
        if !held.is_path() {
            return Err(ActionError::NotAPathCard);
        }
        let tile = if rotated {
            held.rotate().map_err(|_| ActionError::NotAPathCard)?
        } else {
            held.clone()
        };
        if !self.bounds.contains(at) {
            return Err(ActionError::OutOfBounds);
        }
        if !can_place(&self.board, &tile, at) {
            return Err(ActionError::IllegalPlacement);
        }

        self.board.place(at, tile);
        self.take_from_hand(seat, card_index);
        self.refill(seat);

        let mut events = vec![GameEvent::TilePlaced { player: seat, at }];

        if let Some(reached) = check_goal_reached(&self.board) {
            let has_gold = self.board.reveal_goal(reached.index).unwrap_or(false);
            debug!("goal {} at {} revealed", reached.index, reached.position);
            events.push(GameEvent::GoalRevealed {
                index: reached.index,
                position: reached.position,
                has_gold,
            });
            if has_gold {
                self.finish(GameResult::MinersWin);
                events.push(GameEvent::GameOver(GameResult::MinersWin));
                return Ok(events);
            }
        }

        self.advance_turn(&mut events);
        Ok(events)
    }

    fn play_action(
        &mut self,
        seat: PlayerId,
        card_index: usize,
        target: &ActionTarget,
    ) -> Result<Vec<GameEvent>, ActionError> {
        let kind = self.players[seat].hand[card_index]
            .as_action()
            .ok_or(ActionError::NotAnActionCard)?;

        let mut events = Vec::new();
        let detail = match kind {
            ActionKind::Break(tool) => {
                let victim = self.target_seat(target)?;
                if victim == seat {
                    return Err(ActionError::TargetIsSelf);
                }
                if !self.players[victim].tools.is_working(tool) {
                    return Err(ActionError::ToolAlreadyBroken(tool));
                }
                self.players[victim].tools.set(tool, false);
                ActionDetail::Break { tool, target: victim }
            }
            ActionKind::Repair(tool) => {
                let patient = self.target_seat(target)?;
                if self.players[patient].tools.is_working(tool) {
                    return Err(ActionError::ToolNotBroken(tool));
                }
                self.players[patient].tools.set(tool, true);
                ActionDetail::Repair { tool, target: patient }
            }
            ActionKind::Rockfall => {
                let at = target.cell.ok_or(ActionError::MissingTargetCell)?;
                let cleared = self.board.get(at).ok_or(ActionError::EmptyCell)?;
                if cleared.is_special() {
                    return Err(ActionError::ProtectedTile);
                }
                self.board.remove(at);
                self.retired += 1;
                ActionDetail::Rockfall { position: at }
            }
            ActionKind::Map => {
                let goal_index = target.goal_index.ok_or(ActionError::InvalidGoalIndex)?;
                let has_gold = self
                    .board
                    .goal(goal_index)
                    .and_then(Tile::has_gold)
                    .ok_or(ActionError::InvalidGoalIndex)?;
                events.push(GameEvent::MapResult {
                    player: seat,
                    goal_index,
                    has_gold,
                });
                ActionDetail::Map { goal_index }
            }
        };
        events.push(GameEvent::ActionPlayed { player: seat, detail });

        self.take_from_hand(seat, card_index);
        self.retired += 1;
        self.refill(seat);

        self.advance_turn(&mut events);
        Ok(events)
    }

    fn discard(&mut self, seat: PlayerId, card_index: usize) -> Vec<GameEvent> {
        let tile = self.take_from_hand(seat, card_index);
        self.discard.push(tile);
        self.refill(seat);

        let mut events = vec![GameEvent::ActionPlayed {
            player: seat,
            detail: ActionDetail::Discard,
        }];
        self.advance_turn(&mut events);
        events
    }

    /// Seat named by a break/repair target.
    fn target_seat(&self, target: &ActionTarget) -> Result<PlayerId, ActionError> {
        let connection = target.player.ok_or(ActionError::MissingTargetPlayer)?;
        self.seat_of(connection).ok_or(ActionError::UnknownTargetPlayer)
    }

    /// Remove a tile from a hand. The index has already been checked.
    fn take_from_hand(&mut self, seat: PlayerId, card_index: usize) -> Tile {
        self.players[seat].hand.remove(card_index)
    }

    /// Draw one replacement if the deck has any left.
    fn refill(&mut self, seat: PlayerId) {
        if let Some(tile) = self.deck.draw() {
            self.players[seat].hand.push(tile);
        }
    }

    /// End the step: pass the turn, or end the game if nobody can act.
    ///
    /// Every seat is tried at most once, starting after the current one and
    /// ending with the current one.
    pub(crate) fn advance_turn(&mut self, events: &mut Vec<GameEvent>) {
        let all_empty = self.players.values().all(|p| !p.has_tiles());
        if all_empty && self.deck.is_empty() {
            self.finish(GameResult::SaboteursWin);
            events.push(GameEvent::GameOver(GameResult::SaboteursWin));
            return;
        }

        let count = self.player_count();
        let mut candidate = self.current_turn;
        for _ in 0..count {
            candidate = candidate.next(count);
            if self.players[candidate].has_tiles() {
                self.current_turn = candidate;
                debug!("turn passes to {}", candidate);
                events.push(GameEvent::TurnChanged(candidate));
                return;
            }
        }

        self.finish(GameResult::SaboteursWin);
        events.push(GameEvent::GameOver(GameResult::SaboteursWin));
    }
}
