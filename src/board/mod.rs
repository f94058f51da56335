//! Board engine: coordinates, the sparse board, and the path rules.
//!
//! - `Coord` / `Bounds`: cells and the placement grid
//! - `Board`: start tile, three goals, and everything placed since
//! - `can_place`, `reachable_from_start`, `check_goal_reached`: the rules
//!   every path placement is adjudicated by

pub mod coord;
pub mod grid;
pub mod rules;

pub use coord::{Bounds, Coord};
pub use grid::{Board, GOALS, START};
pub use rules::{can_place, check_goal_reached, reachable_from_start, valid_positions, GoalReached};
