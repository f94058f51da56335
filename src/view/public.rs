//! Public projections of game state.
//!
//! Everything here is safe to show every player: board cells with
//! unrevealed goals masked, and players reduced to their tools and hand
//! size. Hands and roles only leave the engine through private messages.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord};
use crate::core::{ConnectionId, PlayerId};
use crate::game::{Game, Tools};
use crate::setup::Role;
use crate::tiles::{Edges, Tile};

/// A board tile as every player may see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicTile {
    /// An unrevealed goal: nothing but "a goal is here".
    HiddenGoal {
        special: HiddenSpecial,
        revealed: bool,
        edges: Edges,
    },
    Visible(Tile),
}

/// What a masked cell is. Only goals are ever masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiddenSpecial {
    Goal,
}

impl PublicTile {
    #[must_use]
    pub fn of(tile: &Tile) -> Self {
        if tile.is_unrevealed_goal() {
            PublicTile::HiddenGoal {
                special: HiddenSpecial::Goal,
                revealed: false,
                edges: Edges::ALL_OPEN,
            }
        } else {
            PublicTile::Visible(tile.clone())
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, PublicTile::HiddenGoal { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCell {
    pub row: i32,
    pub col: i32,
    pub tile: PublicTile,
}

impl PublicCell {
    #[must_use]
    pub const fn position(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// A seated player as the table sees them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    /// Used as the target of break and repair cards.
    pub id: ConnectionId,
    pub seat: PlayerId,
    pub name: String,
    pub tools: Tools,
    pub hand_count: usize,
}

/// One line of the end-of-game role reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleReveal {
    pub name: String,
    pub role: Role,
}

/// Every placed tile in row-major order, unrevealed goals masked.
#[must_use]
pub fn public_board(board: &Board) -> Vec<PublicCell> {
    board
        .iter()
        .map(|(pos, tile)| PublicCell {
            row: pos.row,
            col: pos.col,
            tile: PublicTile::of(tile),
        })
        .collect()
}

#[must_use]
pub fn public_players(game: &Game) -> Vec<PublicPlayer> {
    game.players()
        .iter()
        .map(|(seat, p)| PublicPlayer {
            id: p.connection,
            seat,
            name: p.name.clone(),
            tools: p.tools,
            hand_count: p.hand.len(),
        })
        .collect()
}

/// Every seat's role. Only sent once the game is over.
#[must_use]
pub fn role_reveal(game: &Game) -> Vec<RoleReveal> {
    game.players()
        .values()
        .map(|p| RoleReveal {
            name: p.name.clone(),
            role: p.role,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GOALS;
    use crate::core::GameRng;
    use crate::game::Seat;

    fn game() -> Game {
        let seats = (0..4)
            .map(|i| Seat::new(ConnectionId::new(i + 10), format!("p{i}")))
            .collect();
        Game::builder(seats).gold_index(2).build(&GameRng::new(3))
    }

    #[test]
    fn test_unrevealed_goals_are_masked() {
        let board = public_board(game().board());
        assert_eq!(board.len(), 4);
        for cell in &board {
            let is_goal = GOALS.contains(&cell.position());
            assert_eq!(cell.tile.is_hidden(), is_goal);
        }

        let json = serde_json::to_string(&board).unwrap();
        assert!(!json.contains("gold"));
        assert!(!json.contains("stone"));
        assert!(!json.contains("has_gold"));
    }

    #[test]
    fn test_hidden_goal_wire_shape() {
        let board = public_board(game().board());
        let goal = board.iter().find(|c| c.position() == GOALS[1]).unwrap();
        let json = serde_json::to_value(&goal.tile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hidden-goal": {
                    "special": "goal",
                    "revealed": false,
                    "edges": [true, true, true, true]
                }
            })
        );
    }

    #[test]
    fn test_revealed_goal_is_visible() {
        let mut board = game().board().clone();
        board.reveal_goal(0);
        let cells = public_board(&board);
        let goal = cells.iter().find(|c| c.position() == GOALS[0]).unwrap();
        match &goal.tile {
            PublicTile::Visible(tile) => assert_eq!(tile.has_gold(), Some(false)),
            PublicTile::HiddenGoal { .. } => panic!("revealed goal still hidden"),
        }
    }

    #[test]
    fn test_public_players_hide_hands_and_roles() {
        let game = game();
        let players = public_players(&game);
        assert_eq!(players.len(), 4);
        assert_eq!(players[1].id, ConnectionId::new(11));
        assert_eq!(players[1].hand_count, 6);

        let json = serde_json::to_string(&players).unwrap();
        assert!(!json.contains("saboteur"));
        assert!(!json.contains("miner"));
        assert!(!json.contains("cross"));
    }

    #[test]
    fn test_role_reveal_lists_every_seat() {
        let game = game();
        let reveal = role_reveal(&game);
        assert_eq!(reveal.len(), 4);
        assert_eq!(reveal.iter().filter(|r| r.role == Role::Saboteur).count(), 1);
        assert_eq!(reveal[3].name, "p3");
    }
}
