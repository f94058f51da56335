//! Authoritative per-room game state.
//!
//! ## Key Types
//!
//! - `Game`: board, draw pile, discard pile, seated players and the turn
//!   pointer. Only `Game::apply` mutates it once play has begun.
//! - `GameBuilder`: deals a fresh game. Tests use its overrides to stack
//!   the deck, fix roles or choose the gold slot.
//! - `Seat`: a lobby member carried into the game.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Bounds, GOALS};
use crate::core::{ConnectionId, GameRng, PlayerId, PlayerMap};
use crate::setup::{allocate_roles, hand_size, Deck, Role};
use crate::tiles::Tile;

use super::player::Player;
use super::result::GameResult;

/// Lifecycle of a game. No transition leaves `Finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Playing,
    Finished,
}

/// A lobby member taking a seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub connection: ConnectionId,
    pub name: String,
}

impl Seat {
    #[must_use]
    pub fn new(connection: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            connection,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) deck: Deck,
    pub(crate) discard: Vec<Tile>,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) current_turn: PlayerId,
    pub(crate) phase: GamePhase,
    pub(crate) result: Option<GameResult>,
    /// Consumed action tiles plus tiles cleared by rockfall.
    pub(crate) retired: usize,
    pub(crate) bounds: Bounds,
    tile_total: usize,
}

impl Game {
    /// Deal a standard game for `seats`, in seat order.
    ///
    /// Roles, deck order and the gold slot each come from their own
    /// stream of `rng`.
    #[must_use]
    pub fn new(seats: Vec<Seat>, bounds: Bounds, rng: &GameRng) -> Self {
        GameBuilder::new(seats).bounds(bounds).build(rng)
    }

    #[must_use]
    pub fn builder(seats: Vec<Seat>) -> GameBuilder {
        GameBuilder::new(seats)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Tile] {
        &self.discard
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&Player> {
        self.players.get(seat)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Seat of the player behind `connection`.
    #[must_use]
    pub fn seat_of(&self, connection: ConnectionId) -> Option<PlayerId> {
        self.players.position(|p| p.connection == connection)
    }

    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn retired(&self) -> usize {
        self.retired
    }

    /// Size of the deck this game was dealt from.
    #[must_use]
    pub fn tile_total(&self) -> usize {
        self.tile_total
    }

    /// Every dealt tile, wherever it is now. Always equals `tile_total`.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        let in_hands: usize = self.players.values().map(|p| p.hand.len()).sum();
        in_hands + self.deck.len() + self.discard.len() + self.board.placed_path_count() + self.retired
    }

    /// Role of every seat, in seat order.
    #[must_use]
    pub fn roles(&self) -> Vec<(PlayerId, Role)> {
        self.players.iter().map(|(id, p)| (id, p.role)).collect()
    }

    pub(crate) fn finish(&mut self, result: GameResult) {
        self.phase = GamePhase::Finished;
        self.result = Some(result);
    }
}

/// Builder for dealing a `Game`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    seats: Vec<Seat>,
    bounds: Bounds,
    roles: Option<Vec<Role>>,
    tiles: Option<Vec<Tile>>,
    gold_index: Option<usize>,
    hand_size: Option<usize>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(seats: Vec<Seat>) -> Self {
        Self {
            seats,
            bounds: Bounds::new(7, 11),
            roles: None,
            tiles: None,
            gold_index: None,
            hand_size: None,
        }
    }

    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fix roles instead of allocating them.
    #[must_use]
    pub fn roles(mut self, roles: Vec<Role>) -> Self {
        assert_eq!(roles.len(), self.seats.len(), "One role per seat");
        self.roles = Some(roles);
        self
    }

    /// Deal from `tiles` as given, without shuffling. The last tile is the top.
    #[must_use]
    pub fn stacked_deck(mut self, tiles: Vec<Tile>) -> Self {
        self.tiles = Some(tiles);
        self
    }

    #[must_use]
    pub fn gold_index(mut self, index: usize) -> Self {
        assert!(index < GOALS.len(), "Gold index must be 0-2");
        self.gold_index = Some(index);
        self
    }

    /// Override the per-count hand size.
    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = Some(size);
        self
    }

    #[must_use]
    pub fn build(self, rng: &GameRng) -> Game {
        let count = self.seats.len();

        let roles = self
            .roles
            .unwrap_or_else(|| allocate_roles(count, &mut rng.for_context("roles")));

        let mut deck = match self.tiles {
            Some(tiles) => Deck::new(tiles),
            None => Deck::shuffled(&mut rng.for_context("deck")),
        };
        let tile_total = deck.len();

        let board = match self.gold_index {
            Some(index) => Board::new(index),
            None => Board::with_random_gold(&mut rng.for_context("goals")),
        };

        let hands = deck.deal(count, self.hand_size.unwrap_or_else(|| hand_size(count)));
        let players = self
            .seats
            .into_iter()
            .zip(roles)
            .zip(hands)
            .map(|((seat, role), hand)| Player::new(seat.connection, seat.name, role, hand))
            .collect();

        Game {
            board,
            deck,
            discard: Vec::new(),
            players: PlayerMap::from_vec(players),
            current_turn: PlayerId::new(0),
            phase: GamePhase::Playing,
            result: None,
            retired: 0,
            bounds: self.bounds,
            tile_total,
        }
    }
}
