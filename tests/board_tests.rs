//! Board engine tests through the public API.

use saboteur_engine::board::{valid_positions, GoalReached};
use saboteur_engine::tiles::{ConnectionGroup, Edges, Geometry};
use saboteur_engine::{
    build_deck, can_place, check_goal_reached, reachable_from_start, Board, Bounds, Coord, Tile, TileId, GOALS, START,
};

fn named(name: &str) -> Tile {
    build_deck()
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no template {name}"))
}

/// A horizontal straight never fits against a closed facing edge, whichever
/// way it is turned.
#[test]
fn test_straight_h_against_closed_edge() {
    let mut board = Board::new(0);
    board.place(Coord::new(3, 1), named("straight_v"));

    let straight = named("straight_h");
    let turned = straight.rotate().unwrap();
    assert!(!can_place(&board, &straight, Coord::new(3, 2)));
    assert!(!can_place(&board, &turned, Coord::new(3, 2)));
}

/// Every neighbour must agree, not just one.
#[test]
fn test_all_neighbours_must_match() {
    let mut board = Board::new(0);
    board.place(Coord::new(3, 1), named("cross"));
    board.place(Coord::new(2, 2), named("straight_h"));

    // Left neighbour is open on its right, top neighbour is closed on its
    // bottom. A cross matches the first and not the second.
    assert!(!can_place(&board, &named("cross"), Coord::new(3, 2)));
    // A "T" closed on top matches both.
    let t_down = named("t_up").rotate().unwrap();
    assert!(!t_down.is_open(saboteur_engine::Direction::Top));
    assert!(can_place(&board, &t_down, Coord::new(3, 2)));
}

#[test]
fn test_dead_end_blocks_reachability_but_not_placement() {
    let mut board = Board::new(1);
    let dead = named("dead_straight_h");
    assert!(can_place(&board, &dead, Coord::new(3, 1)));
    board.place(Coord::new(3, 1), dead);
    // Shape still dictates what fits next to it.
    assert!(can_place(&board, &named("straight_h"), Coord::new(3, 2)));
    board.place(Coord::new(3, 2), named("straight_h"));

    let reachable = reachable_from_start(&board);
    assert!(reachable.contains(&START));
    assert!(!reachable.contains(&Coord::new(3, 1)));
    assert!(!reachable.contains(&Coord::new(3, 2)));
}

#[test]
fn test_goal_reached_from_below() {
    let mut board = Board::new(2);
    // Down column 0, then along row 6, then up to (6,8) beneath goal 2.
    board.place(Coord::new(4, 0), named("straight_v"));
    board.place(Coord::new(5, 0), named("straight_v"));
    board.place(Coord::new(6, 0), named("curve_tr"));
    for col in 1..8 {
        board.place(Coord::new(6, col), named("straight_h"));
    }
    assert_eq!(check_goal_reached(&board), None);

    // curve_tl: open top and left.
    board.place(Coord::new(6, 8), named("curve_tl"));
    assert_eq!(
        check_goal_reached(&board),
        Some(GoalReached {
            index: 2,
            position: GOALS[2]
        })
    );
}

#[test]
fn test_goals_checked_in_slot_order() {
    let mut board = Board::new(0);
    for col in 1..8 {
        board.place(Coord::new(3, col), named("straight_h"));
    }
    // (2,8) sits between goal 0 and goal 1; a vertical there, fed from
    // nowhere, reaches neither.
    board.place(Coord::new(2, 8), named("straight_v"));
    let reached = check_goal_reached(&board).unwrap();
    assert_eq!(reached.index, 1);

    board.reveal_goal(1);
    // Goal 1 is now an ordinary cross, so the path runs on through it to
    // (2,8) and touches goal 0 from below.
    let reached = check_goal_reached(&board).unwrap();
    assert_eq!(reached.index, 0);
}

#[test]
fn test_no_cross_goal_connectivity() {
    let mut board = Board::new(0);
    for col in 1..8 {
        board.place(Coord::new(3, col), named("straight_h"));
    }
    board.place(Coord::new(2, 8), named("straight_v"));

    // Goal 1 unrevealed: reachable itself, but nothing beyond it is.
    let reachable = reachable_from_start(&board);
    assert!(reachable.contains(&GOALS[1]));
    assert!(!reachable.contains(&Coord::new(2, 8)));
    assert!(!reachable.contains(&Coord::new(3, 9)));
}

#[test]
fn test_valid_positions_respect_bounds() {
    let board = Board::new(0);
    let tiny = Bounds::new(7, 2);
    let positions = valid_positions(&board, &named("cross"), tiny);
    assert_eq!(positions, vec![Coord::new(2, 0), Coord::new(3, 1), Coord::new(4, 0)]);
}

#[test]
fn test_inconsistent_geometry_is_rejected() {
    let closed_top = Edges::new([false, true, true, true]);
    let groups = [ConnectionGroup::from_indices(&[0, 1]).unwrap()];
    assert!(Geometry::new(closed_top, groups).is_err());

    let overlapping = [
        ConnectionGroup::from_indices(&[1, 2]).unwrap(),
        ConnectionGroup::from_indices(&[2, 3]).unwrap(),
    ];
    assert!(Geometry::new(closed_top, overlapping).is_err());

    let ok = Geometry::new(closed_top, [ConnectionGroup::from_indices(&[1, 3]).unwrap()]).unwrap();
    let tile = Tile::path(TileId::new(0), "custom", ok);
    assert!(tile.is_connected(saboteur_engine::Direction::Left));
    assert!(!tile.is_connected(saboteur_engine::Direction::Bottom));
}
