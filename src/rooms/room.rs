//! A room: lobby roster plus, once started, its game.
//!
//! ## Lifecycle
//!
//! `Lobby` → `Playing` when the host starts with enough players, then
//! `Finished` when the game ends. Nothing goes back to `Lobby`. The roster
//! keeps shrinking as connections leave, but seats in a running game are
//! never removed.

use serde::{Deserialize, Serialize};

use crate::core::{ActionError, ConnectionId, GameConfig, GameRng, RoomError};
use crate::game::{Action, Game, GameEvent, Seat};
use crate::protocol::LobbyEntry;

use super::code::RoomCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomPhase {
    Lobby,
    Playing,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub connection: ConnectionId,
    pub name: String,
    pub is_host: bool,
}

/// Who left, and who holds the host flag now if it moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    pub member: Member,
    pub new_host: Option<ConnectionId>,
}

#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    members: Vec<Member>,
    phase: RoomPhase,
    game: Option<Game>,
    /// Set once the directory has dropped this room.
    closed: bool,
}

impl Room {
    /// A new lobby with `host` as its only member.
    #[must_use]
    pub fn new(code: RoomCode, host: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            code,
            members: vec![Member {
                connection: host,
                name: name.into(),
                is_host: true,
            }],
            phase: RoomPhase::Lobby,
            game: None,
            closed: false,
        }
    }

    #[must_use]
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, connection: ConnectionId) -> Option<&Member> {
        self.members.iter().find(|m| m.connection == connection)
    }

    #[must_use]
    pub fn host(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_host)
    }

    #[must_use]
    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    /// Roster as shown in the lobby.
    #[must_use]
    pub fn lobby_entries(&self) -> Vec<LobbyEntry> {
        self.members
            .iter()
            .map(|m| LobbyEntry {
                name: m.name.clone(),
                is_host: m.is_host,
            })
            .collect()
    }

    /// Add a member to the lobby.
    pub fn join(&mut self, connection: ConnectionId, name: &str, config: &GameConfig) -> Result<(), RoomError> {
        if self.closed {
            return Err(RoomError::UnknownRoom);
        }
        if self.phase != RoomPhase::Lobby {
            return Err(RoomError::AlreadyStarted);
        }
        if self.members.len() >= config.max_players {
            return Err(RoomError::RoomFull);
        }
        if self.members.iter().any(|m| m.name == name) {
            return Err(RoomError::DuplicateName);
        }
        self.members.push(Member {
            connection,
            name: name.to_string(),
            is_host: false,
        });
        Ok(())
    }

    /// Deal a game for the current roster. Host only, once.
    pub fn start(&mut self, connection: ConnectionId, config: &GameConfig, rng: &GameRng) -> Result<&Game, RoomError> {
        let member = self.member(connection).ok_or(RoomError::NotInRoom)?;
        if !member.is_host {
            return Err(RoomError::NotHost);
        }
        if self.phase != RoomPhase::Lobby {
            return Err(RoomError::AlreadyStarted);
        }
        if self.members.len() < config.min_players {
            return Err(RoomError::NotEnoughPlayers(config.min_players));
        }

        let seats = self
            .members
            .iter()
            .map(|m| Seat::new(m.connection, m.name.clone()))
            .collect();
        self.phase = RoomPhase::Playing;
        Ok(self.game.insert(Game::new(seats, config.bounds, rng)))
    }

    /// Forward an action to the game.
    pub fn act(&mut self, connection: ConnectionId, action: &Action) -> Result<Vec<GameEvent>, RoomError> {
        let game = self.game.as_mut().ok_or(ActionError::NotPlaying)?;
        let events = game.apply(connection, action)?;
        if game.is_finished() {
            self.phase = RoomPhase::Finished;
        }
        Ok(events)
    }

    /// Remove a member. The host flag passes to the first remaining member.
    pub fn leave(&mut self, connection: ConnectionId) -> Option<Departure> {
        let index = self.members.iter().position(|m| m.connection == connection)?;
        let member = self.members.remove(index);

        let mut new_host = None;
        if member.is_host {
            if let Some(first) = self.members.first_mut() {
                first.is_host = true;
                new_host = Some(first.connection);
            }
        }
        Some(Departure { member, new_host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;

    fn lobby(n: u64) -> Room {
        let config = GameConfig::default();
        let mut room = Room::new(RoomCode::parse("ABCD"), ConnectionId::new(1), "host");
        for i in 2..=n {
            room.join(ConnectionId::new(i), &format!("p{i}"), &config).unwrap();
        }
        room
    }

    #[test]
    fn test_join_rules() {
        let config = GameConfig::default();
        let mut room = lobby(1);

        assert_eq!(
            room.join(ConnectionId::new(2), "host", &config),
            Err(RoomError::DuplicateName)
        );
        for i in 2..=10 {
            room.join(ConnectionId::new(i), &format!("p{i}"), &config).unwrap();
        }
        assert_eq!(
            room.join(ConnectionId::new(11), "late", &config),
            Err(RoomError::RoomFull)
        );
        assert_eq!(room.lobby_entries().len(), 10);
        assert!(room.lobby_entries()[0].is_host);
    }

    #[test]
    fn test_start_needs_host_and_players() {
        let config = GameConfig::default();
        let rng = GameRng::new(1);
        let mut room = lobby(2);

        assert_eq!(
            room.start(ConnectionId::new(1), &config, &rng).unwrap_err(),
            RoomError::NotEnoughPlayers(3)
        );
        room.join(ConnectionId::new(3), "p3", &config).unwrap();
        assert_eq!(
            room.start(ConnectionId::new(2), &config, &rng).unwrap_err(),
            RoomError::NotHost
        );
        assert_eq!(
            room.start(ConnectionId::new(9), &config, &rng).unwrap_err(),
            RoomError::NotInRoom
        );

        let game = room.start(ConnectionId::new(1), &config, &rng).unwrap();
        assert_eq!(game.player_count(), 3);
        assert_eq!(room.phase(), RoomPhase::Playing);

        assert_eq!(
            room.start(ConnectionId::new(1), &config, &rng).unwrap_err(),
            RoomError::AlreadyStarted
        );
        assert_eq!(
            room.join(ConnectionId::new(4), "p4", &config),
            Err(RoomError::AlreadyStarted)
        );
    }

    #[test]
    fn test_act_before_start() {
        let mut room = lobby(3);
        let err = room
            .act(ConnectionId::new(1), &Action::Discard { card_index: 0 })
            .unwrap_err();
        assert_eq!(err, RoomError::Action(ActionError::NotPlaying));
        assert!(err.is_silent());
    }

    #[test]
    fn test_room_finishes_with_game() {
        let config = GameConfig::default();
        let mut room = lobby(3);
        room.start(ConnectionId::new(1), &config, &GameRng::new(4)).unwrap();

        // Leave seat 0 with one card and nothing else anywhere.
        if let Some(game) = room.game.as_mut() {
            while game.deck.draw().is_some() {}
            for player in game.players.values_mut() {
                player.hand.truncate(usize::from(player.connection == ConnectionId::new(1)));
            }
        }

        room.act(ConnectionId::new(1), &Action::Discard { card_index: 0 }).unwrap();
        assert_eq!(room.phase(), RoomPhase::Finished);
        assert_eq!(room.game().and_then(Game::result), Some(GameResult::SaboteursWin));
    }

    #[test]
    fn test_host_moves_to_first_remaining() {
        let mut room = lobby(3);
        let departure = room.leave(ConnectionId::new(1)).unwrap();
        assert!(departure.member.is_host);
        assert_eq!(departure.new_host, Some(ConnectionId::new(2)));
        assert_eq!(room.host().map(|m| m.connection), Some(ConnectionId::new(2)));

        let departure = room.leave(ConnectionId::new(3)).unwrap();
        assert_eq!(departure.new_host, None);
        assert!(room.leave(ConnectionId::new(3)).is_none());
    }

    #[test]
    fn test_closed_room_rejects_joins() {
        let mut room = lobby(1);
        room.leave(ConnectionId::new(1));
        room.close();
        assert_eq!(
            room.join(ConnectionId::new(5), "late", &GameConfig::default()),
            Err(RoomError::UnknownRoom)
        );
    }
}
