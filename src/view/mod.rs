//! Visibility projection.
//!
//! - `public`: what every player may see of the board and the table
//! - `fanout`: which connection receives which event after each step

pub mod fanout;
pub mod public;

pub use fanout::{fan_out, game_over, opening};
pub use public::{
    public_board, public_players, role_reveal, HiddenSpecial, PublicCell, PublicPlayer, PublicTile, RoleReveal,
};
