//! Delivery of outbound events.
//!
//! ## Key Types
//!
//! - `Transport`: what the network layer must provide. Unicast to a
//!   connection, broadcast to a room, and room membership.
//! - `Dispatch` / `Outbox`: an ordered batch of deliveries built by a
//!   handler and flushed through a `Transport` in one go.
//! - `LocalTransport`: an in-process transport that keeps one inbox per
//!   connection. Used by tests and single-process hosts.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::ConnectionId;
use crate::rooms::RoomCode;

use super::events::ServerEvent;

/// Outbound channel supplied by the network layer. Calls must not block.
pub trait Transport: Send + Sync {
    fn send(&self, to: ConnectionId, event: &ServerEvent);

    fn broadcast(&self, room: &RoomCode, event: &ServerEvent);

    fn broadcast_except(&self, room: &RoomCode, except: ConnectionId, event: &ServerEvent);

    fn subscribe(&self, conn: ConnectionId, room: &RoomCode);

    fn unsubscribe(&self, conn: ConnectionId, room: &RoomCode);
}

/// One delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Send {
        to: ConnectionId,
        event: ServerEvent,
    },
    Broadcast {
        room: RoomCode,
        event: ServerEvent,
    },
    BroadcastExcept {
        room: RoomCode,
        except: ConnectionId,
        event: ServerEvent,
    },
    Subscribe {
        conn: ConnectionId,
        room: RoomCode,
    },
    Unsubscribe {
        conn: ConnectionId,
        room: RoomCode,
    },
}

impl Dispatch {
    pub fn deliver(&self, transport: &dyn Transport) {
        match self {
            Dispatch::Send { to, event } => transport.send(*to, event),
            Dispatch::Broadcast { room, event } => transport.broadcast(room, event),
            Dispatch::BroadcastExcept { room, except, event } => {
                transport.broadcast_except(room, *except, event);
            }
            Dispatch::Subscribe { conn, room } => transport.subscribe(*conn, room),
            Dispatch::Unsubscribe { conn, room } => transport.unsubscribe(*conn, room),
        }
    }

    /// The event carried, if any.
    #[must_use]
    pub fn event(&self) -> Option<&ServerEvent> {
        match self {
            Dispatch::Send { event, .. }
            | Dispatch::Broadcast { event, .. }
            | Dispatch::BroadcastExcept { event, .. } => Some(event),
            Dispatch::Subscribe { .. } | Dispatch::Unsubscribe { .. } => None,
        }
    }
}

/// Ordered deliveries produced by one handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outbox {
    dispatches: Vec<Dispatch>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, to: ConnectionId, event: ServerEvent) {
        self.dispatches.push(Dispatch::Send { to, event });
    }

    pub fn broadcast(&mut self, room: &RoomCode, event: ServerEvent) {
        self.dispatches.push(Dispatch::Broadcast {
            room: room.clone(),
            event,
        });
    }

    pub fn broadcast_except(&mut self, room: &RoomCode, except: ConnectionId, event: ServerEvent) {
        self.dispatches.push(Dispatch::BroadcastExcept {
            room: room.clone(),
            except,
            event,
        });
    }

    pub fn subscribe(&mut self, conn: ConnectionId, room: &RoomCode) {
        self.dispatches.push(Dispatch::Subscribe {
            conn,
            room: room.clone(),
        });
    }

    pub fn unsubscribe(&mut self, conn: ConnectionId, room: &RoomCode) {
        self.dispatches.push(Dispatch::Unsubscribe {
            conn,
            room: room.clone(),
        });
    }

    pub fn extend(&mut self, other: Outbox) {
        self.dispatches.extend(other.dispatches);
    }

    /// Flush every dispatch, in order.
    pub fn deliver(&self, transport: &dyn Transport) {
        for dispatch in &self.dispatches {
            dispatch.deliver(transport);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dispatch> {
        self.dispatches.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Dispatch> {
        self.dispatches
    }
}

#[derive(Debug, Default)]
struct Mailboxes {
    members: FxHashMap<RoomCode, Vec<ConnectionId>>,
    inboxes: FxHashMap<ConnectionId, Vec<ServerEvent>>,
}

impl Mailboxes {
    fn push(&mut self, to: ConnectionId, event: &ServerEvent) {
        self.inboxes.entry(to).or_default().push(event.clone());
    }

    fn fan_out(&mut self, room: &RoomCode, except: Option<ConnectionId>, event: &ServerEvent) {
        let targets: Vec<ConnectionId> = self
            .members
            .get(room)
            .map(|m| m.iter().copied().filter(|&c| Some(c) != except).collect())
            .unwrap_or_default();
        for conn in targets {
            self.push(conn, event);
        }
    }
}

/// In-process transport: every connection gets an inbox.
///
/// Room membership is kept in join order, so broadcasts land in every
/// inbox in the same order they were issued.
#[derive(Debug, Default)]
pub struct LocalTransport {
    state: Mutex<Mailboxes>,
}

impl LocalTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Mailboxes> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take everything delivered to `conn` so far.
    pub fn drain(&self, conn: ConnectionId) -> Vec<ServerEvent> {
        self.lock().inboxes.remove(&conn).unwrap_or_default()
    }

    /// Copy of `conn`'s inbox, left in place.
    #[must_use]
    pub fn inbox(&self, conn: ConnectionId) -> Vec<ServerEvent> {
        self.lock().inboxes.get(&conn).cloned().unwrap_or_default()
    }

    /// Current subscribers of `room`, in join order.
    #[must_use]
    pub fn members(&self, room: &RoomCode) -> Vec<ConnectionId> {
        self.lock().members.get(room).cloned().unwrap_or_default()
    }

    /// Rooms that still have at least one subscriber.
    #[must_use]
    pub fn rooms(&self) -> FxHashSet<RoomCode> {
        self.lock().members.keys().cloned().collect()
    }
}

impl Transport for LocalTransport {
    fn send(&self, to: ConnectionId, event: &ServerEvent) {
        self.lock().push(to, event);
    }

    fn broadcast(&self, room: &RoomCode, event: &ServerEvent) {
        self.lock().fan_out(room, None, event);
    }

    fn broadcast_except(&self, room: &RoomCode, except: ConnectionId, event: &ServerEvent) {
        self.lock().fan_out(room, Some(except), event);
    }

    fn subscribe(&self, conn: ConnectionId, room: &RoomCode) {
        let mut state = self.lock();
        let members = state.members.entry(room.clone()).or_default();
        if !members.contains(&conn) {
            members.push(conn);
        }
    }

    fn unsubscribe(&self, conn: ConnectionId, room: &RoomCode) {
        let mut state = self.lock();
        let now_empty = match state.members.get_mut(room) {
            Some(members) => {
                members.retain(|&c| c != conn);
                members.is_empty()
            }
            None => false,
        };
        if now_empty {
            state.members.remove(room);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> RoomCode {
        RoomCode::parse("ABCD")
    }

    #[test]
    fn test_outbox_keeps_order() {
        let mut outbox = Outbox::new();
        outbox.broadcast(&code(), ServerEvent::error("one"));
        outbox.send(ConnectionId::new(1), ServerEvent::error("two"));
        let kinds: Vec<_> = outbox.iter().filter_map(Dispatch::event).map(ServerEvent::kind).collect();
        assert_eq!(kinds, vec!["error-msg", "error-msg"]);
        assert_eq!(outbox.len(), 2);
    }

    #[test]
    fn test_local_transport_routes() {
        let transport = LocalTransport::new();
        let (a, b, c) = (ConnectionId::new(1), ConnectionId::new(2), ConnectionId::new(3));

        let mut outbox = Outbox::new();
        outbox.subscribe(a, &code());
        outbox.subscribe(b, &code());
        outbox.broadcast(&code(), ServerEvent::error("all"));
        outbox.broadcast_except(&code(), a, ServerEvent::error("not a"));
        outbox.send(c, ServerEvent::error("just c"));
        outbox.deliver(&transport);

        assert_eq!(transport.drain(a), vec![ServerEvent::error("all")]);
        assert_eq!(
            transport.drain(b),
            vec![ServerEvent::error("all"), ServerEvent::error("not a")]
        );
        assert_eq!(transport.drain(c), vec![ServerEvent::error("just c")]);
        assert!(transport.drain(a).is_empty());
    }

    #[test]
    fn test_unsubscribe_forgets_empty_rooms() {
        let transport = LocalTransport::new();
        let a = ConnectionId::new(1);
        transport.subscribe(a, &code());
        assert_eq!(transport.members(&code()), vec![a]);
        transport.unsubscribe(a, &code());
        assert!(transport.rooms().is_empty());

        transport.broadcast(&code(), &ServerEvent::error("nobody"));
        assert!(transport.inbox(a).is_empty());
    }
}
