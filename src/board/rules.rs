//! Placement legality and reachability.
//!
//! These are pure functions over a `Board`; none of them depend on the
//! placement grid except `valid_positions`, which only enumerates it.
//!
//! Unrevealed goals are special in two ways. For placement they count as a
//! neighbour but are never edge-matched, since their true shape is hidden.
//! For reachability they are sinks: a goal can be reached, but nothing is
//! reached through it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::coord::{Bounds, Coord};
use super::grid::{Board, GOALS, START};
use crate::tiles::Tile;

/// Can `tile` go down at `at`?
///
/// The cell must be empty and have at least one neighbour. Every neighbour
/// other than an unrevealed goal must present the same openness on the
/// facing side. Action tiles are never placeable.
#[must_use]
pub fn can_place(board: &Board, tile: &Tile, at: Coord) -> bool {
    if !tile.is_path() || board.is_occupied(at) {
        return false;
    }

    let mut has_neighbor = false;
    for (dir, pos) in at.neighbors() {
        let Some(neighbor) = board.get(pos) else {
            continue;
        };
        has_neighbor = true;
        if neighbor.is_unrevealed_goal() {
            continue;
        }
        if tile.is_open(dir) != neighbor.is_open(dir.opposite()) {
            return false;
        }
    }
    has_neighbor
}

/// Every cell connected to the start tile by open, internally joined edges.
///
/// Breadth-first from `START`. Leaving a tile through a side requires that
/// side to be open and in one of the tile's connection groups; entering the
/// neighbour requires the same of the facing side. Unrevealed goals are
/// added when reached but never expanded.
#[must_use]
pub fn reachable_from_start(board: &Board) -> FxHashSet<Coord> {
    let mut visited = FxHashSet::default();
    if !board.is_occupied(START) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(START);
    queue.push_back(START);

    while let Some(pos) = queue.pop_front() {
        let Some(tile) = board.get(pos) else {
            continue;
        };
        if tile.is_unrevealed_goal() {
            continue;
        }

        for (dir, next) in pos.neighbors() {
            if !tile.is_open(dir) || !tile.is_connected(dir) || visited.contains(&next) {
                continue;
            }
            let Some(neighbor) = board.get(next) else {
                continue;
            };
            let facing = dir.opposite();
            if !neighbor.is_open(facing) || !neighbor.is_connected(facing) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }
    visited
}

/// A goal that the path from the start now touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalReached {
    /// Slot index into `GOALS`.
    pub index: usize,
    pub position: Coord,
}

/// First unrevealed goal (in slot order) adjacent to a reachable tile
/// through a matching open, connected side.
#[must_use]
pub fn check_goal_reached(board: &Board) -> Option<GoalReached> {
    let reachable = reachable_from_start(board);

    for (index, &position) in GOALS.iter().enumerate() {
        let Some(goal) = board.get(position) else {
            continue;
        };
        if !goal.is_unrevealed_goal() {
            continue;
        }

        let touched = position.neighbors().any(|(dir, adjacent)| {
            if !reachable.contains(&adjacent) {
                return false;
            }
            let Some(adj) = board.get(adjacent) else {
                return false;
            };
            let facing = dir.opposite();
            adj.is_open(facing) && goal.is_open(dir) && adj.is_connected(facing)
        });
        if touched {
            return Some(GoalReached { index, position });
        }
    }
    None
}

/// Every cell inside `bounds` where `tile` could be placed.
#[must_use]
pub fn valid_positions(board: &Board, tile: &Tile, bounds: Bounds) -> Vec<Coord> {
    bounds
        .cells()
        .filter(|&at| can_place(board, tile, at))
        .collect()
}
