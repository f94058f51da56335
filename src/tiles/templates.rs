//! Deck template table.
//!
//! Each template gives a shape (or an action) and how many physical copies
//! exist. `build_deck` expands the table into tiles in table order, numbering
//! ids from zero. The expansion is deterministic; shuffling happens later.

use super::geometry::{ConnectionGroup, Edges, Geometry};
use super::tile::{ActionKind, Tile, Tool};
use crate::core::TileId;

/// A path shape and its yield.
#[derive(Clone, Copy, Debug)]
pub struct PathTemplate {
    pub name: &'static str,
    pub edges: [bool; 4],
    pub connections: &'static [&'static [u8]],
    pub count: usize,
}

impl PathTemplate {
    /// Validated geometry for this template.
    ///
    /// The table is static, so a failure here is a typo in the table and
    /// is caught by `test_templates_are_consistent`.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        let groups = self
            .connections
            .iter()
            .map(|g| ConnectionGroup::from_indices(g))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        Geometry::new(Edges::new(self.edges), groups).ok()
    }
}

/// An action and its yield.
#[derive(Clone, Copy, Debug)]
pub struct ActionTemplate {
    pub name: &'static str,
    pub kind: ActionKind,
    pub count: usize,
}

const T: bool = true;
const F: bool = false;

pub const PATH_TEMPLATES: &[PathTemplate] = &[
    PathTemplate { name: "cross", edges: [T, T, T, T], connections: &[&[0, 1, 2, 3]], count: 5 },
    PathTemplate { name: "t_up", edges: [T, T, F, T], connections: &[&[0, 1, 3]], count: 5 },
    PathTemplate { name: "t_right", edges: [T, T, T, F], connections: &[&[0, 1, 2]], count: 5 },
    PathTemplate { name: "straight_v", edges: [T, F, T, F], connections: &[&[0, 2]], count: 4 },
    PathTemplate { name: "straight_h", edges: [F, T, F, T], connections: &[&[1, 3]], count: 4 },
    PathTemplate { name: "curve_tr", edges: [T, T, F, F], connections: &[&[0, 1]], count: 5 },
    PathTemplate { name: "curve_tl", edges: [T, F, F, T], connections: &[&[0, 3]], count: 5 },
    // dead ends: open sides, nothing joined
    PathTemplate { name: "dead_cross", edges: [T, T, T, T], connections: &[], count: 1 },
    PathTemplate { name: "dead_t_up", edges: [T, T, F, T], connections: &[], count: 1 },
    PathTemplate { name: "dead_t_right", edges: [T, T, T, F], connections: &[], count: 1 },
    PathTemplate { name: "dead_straight_v", edges: [T, F, T, F], connections: &[], count: 1 },
    PathTemplate { name: "dead_straight_h", edges: [F, T, F, T], connections: &[], count: 1 },
    PathTemplate { name: "dead_curve_tr", edges: [T, T, F, F], connections: &[], count: 1 },
    PathTemplate { name: "dead_curve_tl", edges: [T, F, F, T], connections: &[], count: 1 },
    PathTemplate { name: "dead_single_t", edges: [T, F, F, F], connections: &[], count: 1 },
    PathTemplate { name: "dead_single_r", edges: [F, T, F, F], connections: &[], count: 1 },
];

pub const ACTION_TEMPLATES: &[ActionTemplate] = &[
    ActionTemplate { name: "break_pickaxe", kind: ActionKind::Break(Tool::Pickaxe), count: 3 },
    ActionTemplate { name: "break_lantern", kind: ActionKind::Break(Tool::Lantern), count: 3 },
    ActionTemplate { name: "break_cart", kind: ActionKind::Break(Tool::Cart), count: 3 },
    ActionTemplate { name: "repair_pickaxe", kind: ActionKind::Repair(Tool::Pickaxe), count: 3 },
    ActionTemplate { name: "repair_lantern", kind: ActionKind::Repair(Tool::Lantern), count: 3 },
    ActionTemplate { name: "repair_cart", kind: ActionKind::Repair(Tool::Cart), count: 3 },
    ActionTemplate { name: "rockfall", kind: ActionKind::Rockfall, count: 3 },
    ActionTemplate { name: "map", kind: ActionKind::Map, count: 6 },
];

/// Number of tiles `build_deck` produces.
#[must_use]
pub fn deck_size() -> usize {
    PATH_TEMPLATES.iter().map(|t| t.count).sum::<usize>()
        + ACTION_TEMPLATES.iter().map(|t| t.count).sum::<usize>()
}

/// Expand every template into uniquely identified tiles, unshuffled.
#[must_use]
pub fn build_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(deck_size());
    let mut next_id = 0u32;
    let mut alloc = || {
        let id = TileId::new(next_id);
        next_id += 1;
        id
    };

    for template in PATH_TEMPLATES {
        // Skipped only if the table itself is malformed.
        let Some(geometry) = template.geometry() else {
            continue;
        };
        for _ in 0..template.count {
            deck.push(Tile::path(alloc(), template.name, geometry.clone()));
        }
    }
    for template in ACTION_TEMPLATES {
        for _ in 0..template.count {
            deck.push(Tile::action(alloc(), template.name, template.kind));
        }
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_templates_are_consistent() {
        for template in PATH_TEMPLATES {
            let geometry = template.geometry().unwrap_or_else(|| {
                panic!("template {} violates the edge/connection invariant", template.name)
            });
            assert_eq!(
                geometry.is_dead_end(),
                template.name.starts_with("dead_"),
                "{}",
                template.name
            );
        }
    }

    #[test]
    fn test_deck_size() {
        assert_eq!(deck_size(), 69);
        assert_eq!(build_deck().len(), 69);
    }

    #[test]
    fn test_deck_ids_are_unique_and_dense() {
        let deck = build_deck();
        let ids: FxHashSet<_> = deck.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), deck.len());
        for (i, tile) in deck.iter().enumerate() {
            assert_eq!(tile.id, TileId::new(i as u32));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_deck(), build_deck());
    }

    #[test]
    fn test_yields() {
        let deck = build_deck();
        let count = |name: &str| deck.iter().filter(|t| t.name == name).count();
        assert_eq!(count("cross"), 5);
        assert_eq!(count("straight_h"), 4);
        assert_eq!(count("dead_single_r"), 1);
        assert_eq!(count("map"), 6);
        assert_eq!(count("rockfall"), 3);
        assert_eq!(deck.iter().filter(|t| t.is_path()).count(), 42);
        assert_eq!(deck.iter().filter(|t| !t.is_path()).count(), 27);
    }
}
