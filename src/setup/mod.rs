//! Deck and role allocation.
//!
//! - `Role`, `saboteur_count`, `hand_size`, `allocate_roles`
//! - `Deck`: the shuffled draw pile and the opening deal

pub mod deck;
pub mod roles;

pub use deck::Deck;
pub use roles::{allocate_roles, hand_size, saboteur_count, Role};
