//! Room/session directory.
//!
//! - `RoomCode`: short, unambiguous, unique among live rooms
//! - `Room`: lobby roster and the game it owns
//! - `RoomDirectory`: routes inbound events to rooms and serializes work
//!   per room

pub mod code;
pub mod directory;
pub mod room;

pub use code::{RoomCode, ROOM_CODE_ALPHABET};
pub use directory::RoomDirectory;
pub use room::{Departure, Member, Room, RoomPhase};
