//! Tile instances.
//!
//! A `Tile` is either a path tile (a validated `Geometry`, plus the start or
//! goal marker for the fixed board tiles) or an action tile. Every instance
//! carries its own `TileId` and the name of the template it was cut from.

use serde::{Deserialize, Serialize};

use super::geometry::{Direction, Geometry};
use crate::core::{TileError, TileId};

/// A player's tool. Any broken tool stops that player from building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Pickaxe,
    Lantern,
    Cart,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pickaxe, Tool::Lantern, Tool::Cart];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Tool::Pickaxe => "pickaxe",
            Tool::Lantern => "lantern",
            Tool::Cart => "cart",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What an action tile does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Break a tool of another player.
    Break(Tool),
    /// Repair a broken tool of any player.
    Repair(Tool),
    /// Remove an ordinary path tile from the board.
    Rockfall,
    /// Privately peek at one goal.
    Map,
}

/// Marker for the fixed board tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Special {
    Start,
    Goal { has_gold: bool, revealed: bool },
}

/// A path tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathTile {
    pub geometry: Geometry,
    /// Toggled by every rotation.
    pub rotated: bool,
    pub special: Option<Special>,
}

impl PathTile {
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            rotated: false,
            special: None,
        }
    }

    #[must_use]
    pub fn is_open(&self, dir: Direction) -> bool {
        self.geometry.is_open(dir)
    }

    #[must_use]
    pub fn is_connected(&self, dir: Direction) -> bool {
        self.geometry.is_connected(dir)
    }

    #[must_use]
    pub fn is_unrevealed_goal(&self) -> bool {
        matches!(self.special, Some(Special::Goal { revealed: false, .. }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Path(PathTile),
    Action(ActionKind),
}

/// A tile instance.
///
/// ```
/// use saboteur_engine::tiles::{build_deck, Direction};
///
/// let deck = build_deck();
/// let curve = deck.iter().find(|t| t.name == "curve_tr").unwrap();
/// let turned = curve.rotate().unwrap();
///
/// assert!(turned.is_open(Direction::Bottom));
/// assert!(turned.is_open(Direction::Left));
/// assert!(!turned.is_open(Direction::Top));
/// assert_eq!(&turned.rotate().unwrap(), curve);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Template name, e.g. `"cross"` or `"break_cart"`.
    pub name: String,
    pub kind: TileKind,
}

impl Tile {
    #[must_use]
    pub fn path(id: TileId, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id,
            name: name.into(),
            kind: TileKind::Path(PathTile::new(geometry)),
        }
    }

    #[must_use]
    pub fn action(id: TileId, name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind: TileKind::Action(kind),
        }
    }

    /// The start tile: a four-way cross.
    #[must_use]
    pub fn start() -> Self {
        let mut path = PathTile::new(Geometry::cross());
        path.special = Some(Special::Start);
        Self {
            id: TileId::START,
            name: "start".to_string(),
            kind: TileKind::Path(path),
        }
    }

    /// Goal tile for slot `index`. Named `gold` or `stone` after its content.
    #[must_use]
    pub fn goal(index: usize, has_gold: bool) -> Self {
        let mut path = PathTile::new(Geometry::cross());
        path.special = Some(Special::Goal {
            has_gold,
            revealed: false,
        });
        Self {
            id: TileId::goal(index),
            name: if has_gold { "gold" } else { "stone" }.to_string(),
            kind: TileKind::Path(path),
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&PathTile> {
        match &self.kind {
            TileKind::Path(path) => Some(path),
            TileKind::Action(_) => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathTile> {
        match &mut self.kind {
            TileKind::Path(path) => Some(path),
            TileKind::Action(_) => None,
        }
    }

    #[must_use]
    pub fn as_action(&self) -> Option<ActionKind> {
        match self.kind {
            TileKind::Action(kind) => Some(kind),
            TileKind::Path(_) => None,
        }
    }

    #[must_use]
    pub fn is_path(&self) -> bool {
        matches!(self.kind, TileKind::Path(_))
    }

    #[must_use]
    pub fn special(&self) -> Option<Special> {
        self.as_path().and_then(|p| p.special)
    }

    /// Start or goal.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.special().is_some()
    }

    #[must_use]
    pub fn is_unrevealed_goal(&self) -> bool {
        self.as_path().is_some_and(PathTile::is_unrevealed_goal)
    }

    /// Gold status for a goal tile, `None` for anything else.
    #[must_use]
    pub fn has_gold(&self) -> Option<bool> {
        match self.special() {
            Some(Special::Goal { has_gold, .. }) => Some(has_gold),
            _ => None,
        }
    }

    /// Open side. Always false for action tiles.
    #[must_use]
    pub fn is_open(&self, dir: Direction) -> bool {
        self.as_path().is_some_and(|p| p.is_open(dir))
    }

    /// Open side that is joined inside the tile.
    #[must_use]
    pub fn is_connected(&self, dir: Direction) -> bool {
        self.as_path().is_some_and(|p| p.is_connected(dir))
    }

    /// Return the tile turned by 180°.
    pub fn rotate(&self) -> Result<Tile, TileError> {
        let path = self.as_path().ok_or(TileError::NotRotatable)?;
        Ok(Tile {
            id: self.id,
            name: self.name.clone(),
            kind: TileKind::Path(PathTile {
                geometry: path.geometry.rotated(),
                rotated: !path.rotated,
                special: path.special,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::geometry::{ConnectionGroup, Edges};

    fn straight_v() -> Tile {
        let geometry = Geometry::new(
            Edges::new([true, false, true, false]),
            [ConnectionGroup::from_indices(&[0, 2]).unwrap()],
        )
        .unwrap();
        Tile::path(TileId::new(1), "straight_v", geometry)
    }

    #[test]
    fn test_rotate_toggles_flag() {
        let tile = straight_v();
        let once = tile.rotate().unwrap();
        assert!(once.as_path().unwrap().rotated);
        let twice = once.rotate().unwrap();
        assert_eq!(twice, tile);
    }

    #[test]
    fn test_rotate_keeps_identity() {
        let tile = straight_v();
        let turned = tile.rotate().unwrap();
        assert_eq!(turned.id, tile.id);
        assert_eq!(turned.name, tile.name);
    }

    #[test]
    fn test_action_tiles_do_not_rotate() {
        let map = Tile::action(TileId::new(3), "map", ActionKind::Map);
        assert_eq!(map.rotate(), Err(TileError::NotRotatable));
        assert!(!map.is_open(Direction::Top));
    }

    #[test]
    fn test_fixtures() {
        let start = Tile::start();
        assert_eq!(start.special(), Some(Special::Start));
        assert!(start.is_special());
        assert!(!start.is_unrevealed_goal());
        assert_eq!(start.has_gold(), None);

        let gold = Tile::goal(1, true);
        assert!(gold.is_unrevealed_goal());
        assert_eq!(gold.has_gold(), Some(true));
        assert_eq!(gold.name, "gold");
        assert_eq!(gold.id, TileId::goal(1));
        for dir in Direction::ALL {
            assert!(gold.is_connected(dir));
        }
    }

    #[test]
    fn test_tool_display() {
        assert_eq!(Tool::Pickaxe.to_string(), "pickaxe");
        assert_eq!(
            serde_json::to_string(&ActionKind::Break(Tool::Cart)).unwrap(),
            r#"{"break":"cart"}"#
        );
    }
}
