//! Game state machine.
//!
//! - `Game` / `GameBuilder`: authoritative state for one room's game
//! - `Action` / `ActionTarget`: what a player asks to do
//! - `GameEvent` / `ActionDetail`: what happened, in full truth
//! - `Player` / `Tools`: a seat, its hand, role and tools
//! - `GameResult`: the winning faction

pub mod action;
pub mod engine;
pub mod events;
pub mod player;
pub mod result;
pub mod state;

pub use action::{Action, ActionTarget};
pub use events::{ActionDetail, GameEvent};
pub use player::{Player, Tools};
pub use result::GameResult;
pub use state::{Game, GameBuilder, GamePhase, Seat};
