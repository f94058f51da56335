//! The room directory: every live room, and which room each connection is in.
//!
//! ## Locking
//!
//! Each room sits behind its own `Mutex`, so every handler for one room
//! runs start to finish (validation, mutation and delivery) before the
//! next one for that room begins. Rooms never share mutable state.
//!
//! Locks nest in one order only: the directory map, then a room, then the
//! session map. The session map is never held while another lock is taken.
//! Creating a room claims the session under the directory map; joining
//! claims it under the room lock, so one connection can never end up
//! seated in two rooms.
//!
//! A poisoned lock is recovered rather than propagated.

use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::core::{ConnectionId, GameConfig, GameRng, RoomError};
use crate::game::Action;
use crate::protocol::{ClientEvent, Outbox, ServerEvent, Transport};
use crate::setup::saboteur_count;
use crate::view::{fan_out, opening};

use super::code::RoomCode;
use super::room::{Room, RoomPhase};

type SharedRoom = Arc<Mutex<Room>>;

fn lock_room(room: &SharedRoom) -> MutexGuard<'_, Room> {
    room.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RoomDirectory {
    config: GameConfig,
    rooms: RwLock<FxHashMap<RoomCode, SharedRoom>>,
    sessions: RwLock<FxHashMap<ConnectionId, RoomCode>>,
    rng: Mutex<GameRng>,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl RoomDirectory {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            config,
            rooms: RwLock::new(FxHashMap::default()),
            sessions: RwLock::new(FxHashMap::default()),
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.read_rooms().len()
    }

    /// Room `connection` is currently in.
    #[must_use]
    pub fn room_of(&self, connection: ConnectionId) -> Option<RoomCode> {
        self.read_sessions().get(&connection).cloned()
    }

    /// Run `f` against a room under its lock.
    pub fn with_room<R>(&self, code: &RoomCode, f: impl FnOnce(&Room) -> R) -> Option<R> {
        let room = self.find(code)?;
        let guard = lock_room(&room);
        Some(f(&guard))
    }

    /// Handle one inbound event from `connection`.
    ///
    /// Rule violations are answered with a private `error-msg`; protocol
    /// violations are dropped.
    pub fn handle(&self, connection: ConnectionId, event: ClientEvent, transport: &dyn Transport) {
        let kind = event.kind();
        let result = match event {
            ClientEvent::CreateRoom { name } => self.create_room(connection, &name, transport),
            ClientEvent::JoinRoom { code, name } => self.join_room(connection, &code, &name, transport),
            ClientEvent::StartGame => self.start_game(connection, transport),
            other => match other.to_action() {
                Some(action) => self.act(connection, &action, transport),
                None => Ok(()),
            },
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_silent() => {
                debug!("{connection}: dropped {kind}: {err}");
            }
            Err(err) => {
                debug!("{connection}: rejected {kind}: {err}");
                transport.send(connection, &ServerEvent::error(err.to_string()));
            }
        }
    }

    /// Remove `connection` from its room, discarding the room once empty.
    pub fn disconnect(&self, connection: ConnectionId, transport: &dyn Transport) {
        let Some(code) = self.write_sessions().remove(&connection) else {
            return;
        };
        let Some(room) = self.find(&code) else {
            warn!("{connection}: session pointed at missing room {code}");
            return;
        };

        let now_empty = {
            let mut room = lock_room(&room);
            let Some(departure) = room.leave(connection) else {
                return;
            };

            let mut outbox = Outbox::new();
            outbox.unsubscribe(connection, &code);
            if !room.is_empty() {
                match room.phase() {
                    RoomPhase::Lobby => outbox.broadcast(
                        &code,
                        ServerEvent::PlayerListUpdated {
                            players: room.lobby_entries(),
                        },
                    ),
                    RoomPhase::Playing => outbox.broadcast(
                        &code,
                        ServerEvent::PlayerDisconnected {
                            name: departure.member.name.clone(),
                        },
                    ),
                    RoomPhase::Finished => {}
                }
            }
            if let Some(host) = departure.new_host {
                debug!("room {code}: host passed to {host}");
            }
            outbox.deliver(transport);
            room.is_empty()
        };

        if now_empty {
            self.discard_if_empty(&code);
        }
    }

    fn create_room(&self, connection: ConnectionId, name: &str, transport: &dyn Transport) -> Result<(), RoomError> {
        self.ensure_free(connection)?;
        let name = self.config.normalize_name(name).ok_or(RoomError::InvalidName)?;

        let (code, room) = {
            let mut rooms = self.write_rooms();
            let code = {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                RoomCode::generate(self.config.room_code_len, &mut rng, |c| rooms.contains_key(c))
            }
            .inspect_err(|_| warn!("no free room code of length {}", self.config.room_code_len))?;
            self.claim_session(connection, &code)?;
            let room = Arc::new(Mutex::new(Room::new(code.clone(), connection, name)));
            rooms.insert(code.clone(), Arc::clone(&room));
            (code, room)
        };
        info!("room {code} created");

        let room = lock_room(&room);
        let mut outbox = Outbox::new();
        outbox.subscribe(connection, &code);
        outbox.send(
            connection,
            ServerEvent::RoomCreated {
                code: code.clone(),
                players: room.lobby_entries(),
            },
        );
        outbox.deliver(transport);
        Ok(())
    }

    fn join_room(
        &self,
        connection: ConnectionId,
        raw_code: &str,
        name: &str,
        transport: &dyn Transport,
    ) -> Result<(), RoomError> {
        self.ensure_free(connection)?;
        let name = self.config.normalize_name(name).ok_or(RoomError::InvalidName)?;
        let code = RoomCode::parse(raw_code);
        let room = self.find(&code).ok_or(RoomError::UnknownRoom)?;

        let mut room = lock_room(&room);
        self.claim_session(connection, &code)?;
        if let Err(err) = room.join(connection, &name, &self.config) {
            self.write_sessions().remove(&connection);
            return Err(err);
        }
        debug!("room {code}: {connection} joined ({} members)", room.members().len());

        let players = room.lobby_entries();
        let mut outbox = Outbox::new();
        outbox.subscribe(connection, &code);
        outbox.send(
            connection,
            ServerEvent::RoomJoined {
                code: code.clone(),
                players: players.clone(),
            },
        );
        outbox.broadcast_except(&code, connection, ServerEvent::PlayerListUpdated { players });
        outbox.deliver(transport);
        Ok(())
    }

    fn start_game(&self, connection: ConnectionId, transport: &dyn Transport) -> Result<(), RoomError> {
        let (code, room) = self.session_room(connection)?;
        let rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner).fork();

        let mut room = lock_room(&room);
        let game = room.start(connection, &self.config, &rng)?;
        let players = game.player_count();
        info!(
            "room {code}: game started with {players} players ({} saboteurs)",
            saboteur_count(players)
        );
        opening(game).deliver(transport);
        Ok(())
    }

    fn act(&self, connection: ConnectionId, action: &Action, transport: &dyn Transport) -> Result<(), RoomError> {
        let (code, room) = self.session_room(connection)?;

        let mut room = lock_room(&room);
        let events = room.act(connection, action)?;
        let Some(game) = room.game() else {
            return Ok(());
        };
        if let Some(result) = game.result() {
            info!("room {code}: game over, {} win", result.winner());
        }
        fan_out(&code, game, &events).deliver(transport);
        Ok(())
    }

    /// Reject a connection that is already seated somewhere.
    fn ensure_free(&self, connection: ConnectionId) -> Result<(), RoomError> {
        if self.read_sessions().contains_key(&connection) {
            return Err(RoomError::AlreadyInRoom);
        }
        Ok(())
    }

    /// Seat `connection` in `code`'s session, unless it already has one.
    fn claim_session(&self, connection: ConnectionId, code: &RoomCode) -> Result<(), RoomError> {
        match self.write_sessions().entry(connection) {
            Entry::Occupied(_) => Err(RoomError::AlreadyInRoom),
            Entry::Vacant(slot) => {
                slot.insert(code.clone());
                Ok(())
            }
        }
    }

    fn session_room(&self, connection: ConnectionId) -> Result<(RoomCode, SharedRoom), RoomError> {
        let code = self.room_of(connection).ok_or(RoomError::NotInRoom)?;
        match self.find(&code) {
            Some(room) => Ok((code, room)),
            None => {
                warn!("{connection}: session pointed at missing room {code}");
                Err(RoomError::NotInRoom)
            }
        }
    }

    fn find(&self, code: &RoomCode) -> Option<SharedRoom> {
        self.read_rooms().get(code).cloned()
    }

    fn discard_if_empty(&self, code: &RoomCode) {
        let mut rooms = self.write_rooms();
        let Some(room) = rooms.get(code).cloned() else {
            return;
        };
        let mut room = lock_room(&room);
        if room.is_empty() {
            room.close();
            rooms.remove(code);
            info!("room {code} discarded");
        }
    }

    fn read_rooms(&self) -> RwLockReadGuard<'_, FxHashMap<RoomCode, SharedRoom>> {
        self.rooms.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_rooms(&self) -> RwLockWriteGuard<'_, FxHashMap<RoomCode, SharedRoom>> {
        self.rooms.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_sessions(&self) -> RwLockReadGuard<'_, FxHashMap<ConnectionId, RoomCode>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_sessions(&self) -> RwLockWriteGuard<'_, FxHashMap<ConnectionId, RoomCode>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{LobbyEntry, LocalTransport};

    fn directory() -> RoomDirectory {
        RoomDirectory::new(GameConfig::default().with_seed(42))
    }

    fn created_code(transport: &LocalTransport, conn: ConnectionId) -> RoomCode {
        match transport.drain(conn).first() {
            Some(ServerEvent::RoomCreated { code, .. }) => code.clone(),
            other => panic!("expected room-created, got {other:?}"),
        }
    }

    #[test]
    fn test_create_room() {
        let dir = directory();
        let transport = LocalTransport::new();
        let host = ConnectionId::new(1);

        dir.handle(host, ClientEvent::CreateRoom { name: " ann ".into() }, &transport);
        let code = created_code(&transport, host);
        assert!(code.is_valid(4));
        assert_eq!(dir.room_of(host), Some(code.clone()));
        assert_eq!(transport.members(&code), vec![host]);
        assert_eq!(
            dir.with_room(&code, |r| r.lobby_entries()),
            Some(vec![LobbyEntry {
                name: "ann".into(),
                is_host: true
            }])
        );
    }

    #[test]
    fn test_invalid_names_are_dropped() {
        let dir = directory();
        let transport = LocalTransport::new();
        let conn = ConnectionId::new(1);

        dir.handle(conn, ClientEvent::CreateRoom { name: "   ".into() }, &transport);
        dir.handle(conn, ClientEvent::CreateRoom { name: "elevenchars".into() }, &transport);
        assert!(transport.drain(conn).is_empty());
        assert_eq!(dir.room_count(), 0);
    }

    #[test]
    fn test_join_unknown_room() {
        let dir = directory();
        let transport = LocalTransport::new();
        let conn = ConnectionId::new(1);

        dir.handle(
            conn,
            ClientEvent::JoinRoom {
                code: "zzzz".into(),
                name: "bob".into(),
            },
            &transport,
        );
        assert_eq!(transport.drain(conn), vec![ServerEvent::error("room not found")]);
        assert_eq!(dir.room_of(conn), None);
    }

    #[test]
    fn test_second_create_is_ignored() {
        let dir = directory();
        let transport = LocalTransport::new();
        let conn = ConnectionId::new(1);

        dir.handle(conn, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
        transport.drain(conn);
        dir.handle(conn, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
        assert!(transport.drain(conn).is_empty());
        assert_eq!(dir.room_count(), 1);
    }

    #[test]
    fn test_exhausted_codes_are_reported() {
        let dir = RoomDirectory::new(GameConfig::default().with_seed(42).with_room_code_len(1));
        let transport = LocalTransport::new();

        for id in 1..=24 {
            let conn = ConnectionId::new(id);
            dir.handle(conn, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
            created_code(&transport, conn);
        }
        assert_eq!(dir.room_count(), 24);

        let late = ConnectionId::new(25);
        dir.handle(late, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
        assert_eq!(
            transport.drain(late),
            vec![ServerEvent::error("no room code is free, try again later")]
        );
        assert_eq!(dir.room_of(late), None);
        assert_eq!(dir.room_count(), 24);
    }

    #[test]
    fn test_failed_join_releases_the_session() {
        let dir = directory();
        let transport = LocalTransport::new();
        let host = ConnectionId::new(1);
        let guest = ConnectionId::new(2);

        dir.handle(host, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
        let code = created_code(&transport, host);
        dir.handle(
            guest,
            ClientEvent::JoinRoom {
                code: code.as_str().into(),
                name: "ann".into(),
            },
            &transport,
        );
        assert_eq!(transport.drain(guest), vec![ServerEvent::error("that name is already taken")]);
        assert_eq!(dir.room_of(guest), None);

        dir.handle(guest, ClientEvent::CreateRoom { name: "bob".into() }, &transport);
        assert_ne!(created_code(&transport, guest), code);
    }

    #[test]
    fn test_last_leaver_discards_room() {
        let dir = directory();
        let transport = LocalTransport::new();
        let conn = ConnectionId::new(1);

        dir.handle(conn, ClientEvent::CreateRoom { name: "ann".into() }, &transport);
        let code = created_code(&transport, conn);
        dir.disconnect(conn, &transport);

        assert_eq!(dir.room_count(), 0);
        assert_eq!(dir.room_of(conn), None);
        assert!(transport.members(&code).is_empty());
        // A second disconnect is a no-op.
        dir.disconnect(conn, &transport);
    }
}
