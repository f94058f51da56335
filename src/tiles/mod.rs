//! Tile model: geometry, tile instances, and the deck template table.
//!
//! ## Key Types
//!
//! - `Direction`, `Edges`, `ConnectionGroup`: side indexing and openness
//! - `Geometry`: validated edges + internal connections, with 180° rotation
//! - `Tile`: a uniquely identified path or action tile
//! - `PATH_TEMPLATES` / `ACTION_TEMPLATES`: shapes and yields

pub mod geometry;
pub mod templates;
pub mod tile;

pub use geometry::{ConnectionGroup, Direction, Edges, Geometry};
pub use templates::{build_deck, deck_size, ActionTemplate, PathTemplate, ACTION_TEMPLATES, PATH_TEMPLATES};
pub use tile::{ActionKind, PathTile, Special, Tile, TileKind, Tool};
