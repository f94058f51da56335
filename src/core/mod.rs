//! Core engine types: ids, seats, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod ids;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{ActionError, CodecError, RoomError, TileError};
pub use ids::{ConnectionId, TileId};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
