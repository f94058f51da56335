//! # saboteur-engine
//!
//! Authoritative rules engine for a hidden-role tile-laying game. Players
//! extend a tunnel of path tiles from a start tile toward three face-down
//! goals, one of which hides the gold, while a hidden minority of saboteurs
//! tries to stop them.
//!
//! ## Design Principles
//!
//! 1. **Server Authority**: The engine owns all game truth. Clients send
//!    intents; every one is validated before any state changes.
//!
//! 2. **No Leaks**: Full-truth domain events are projected per recipient.
//!    Unrevealed goals, other players' hands and roles never reach the
//!    wrong connection.
//!
//! 3. **One Writer Per Room**: Each room is processed under its own lock;
//!    rooms share no mutable state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The board is an `im::OrdMap`, so
//!   snapshots are O(1) and iteration is in stable row-major order.
//!
//! - **Deterministic Randomness**: A seeded ChaCha8 root RNG forks one
//!   stream per game, and each game draws roles, deck order and the gold
//!   slot from independent named sub-streams.
//!
//! ## Modules
//!
//! - `core`: ids, seats, RNG, configuration, errors
//! - `tiles`: tile geometry, rotation, templates and deck expansion
//! - `board`: coordinates, the board, placement and reachability rules
//! - `setup`: roles, hand sizes, the shuffled deck
//! - `game`: the per-room state machine
//! - `view`: public projections and per-recipient fan-out
//! - `protocol`: wire events, codecs and the transport seam
//! - `rooms`: room codes, lobbies and the room directory

pub mod board;
pub mod core;
pub mod game;
pub mod protocol;
pub mod rooms;
pub mod setup;
pub mod tiles;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    ActionError, CodecError, ConnectionId, GameConfig, GameRng, PlayerId, PlayerMap, RoomError, TileError, TileId,
};

pub use crate::tiles::{build_deck, ActionKind, Direction, Edges, Geometry, Tile, TileKind, Tool};

pub use crate::board::{can_place, check_goal_reached, reachable_from_start, Board, Bounds, Coord, GOALS, START};

pub use crate::setup::{allocate_roles, hand_size, saboteur_count, Deck, Role};

pub use crate::game::{Action, ActionTarget, Game, GameBuilder, GameEvent, GamePhase, GameResult, Player, Seat, Tools};

pub use crate::view::{fan_out, public_board, public_players, PublicCell, PublicPlayer, PublicTile};

pub use crate::protocol::{ClientEvent, Codec, Dispatch, LocalTransport, Outbox, ServerEvent, Transport};

pub use crate::rooms::{Room, RoomCode, RoomDirectory, RoomPhase};
