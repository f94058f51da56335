//! Wire protocol and delivery.
//!
//! - `ClientEvent` / `ServerEvent`: the inbound and outbound event sets
//! - `Codec`: JSON or binary framing
//! - `Transport`, `Outbox`, `Dispatch`: how outbound events reach
//!   connections and rooms

pub mod codec;
pub mod events;
pub mod transport;

pub use codec::Codec;
pub use events::{ClientEvent, LobbyEntry, PlayedDetail, ServerEvent};
pub use transport::{Dispatch, LocalTransport, Outbox, Transport};
