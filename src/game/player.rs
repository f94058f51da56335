//! Seated players and their tools.

use serde::{Deserialize, Serialize};

use crate::core::ConnectionId;
use crate::setup::Role;
use crate::tiles::{Tile, Tool};

/// Usable (`true`) or broken (`false`) state of each tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tools {
    pub pickaxe: bool,
    pub lantern: bool,
    pub cart: bool,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            pickaxe: true,
            lantern: true,
            cart: true,
        }
    }
}

impl Tools {
    #[must_use]
    pub const fn is_working(&self, tool: Tool) -> bool {
        match tool {
            Tool::Pickaxe => self.pickaxe,
            Tool::Lantern => self.lantern,
            Tool::Cart => self.cart,
        }
    }

    pub fn set(&mut self, tool: Tool, working: bool) {
        match tool {
            Tool::Pickaxe => self.pickaxe = working,
            Tool::Lantern => self.lantern = working,
            Tool::Cart => self.cart = working,
        }
    }

    /// Building requires all three.
    #[must_use]
    pub const fn all_working(&self) -> bool {
        self.pickaxe && self.lantern && self.cart
    }

    pub fn broken(&self) -> impl Iterator<Item = Tool> + '_ {
        Tool::ALL.into_iter().filter(|&t| !self.is_working(t))
    }
}

/// A seat at the table.
///
/// `connection` and `name` are copied from the lobby when the game starts
/// and never change, even after the connection drops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub connection: ConnectionId,
    pub name: String,
    pub role: Role,
    pub hand: Vec<Tile>,
    pub tools: Tools,
}

impl Player {
    #[must_use]
    pub fn new(connection: ConnectionId, name: impl Into<String>, role: Role, hand: Vec<Tile>) -> Self {
        Self {
            connection,
            name: name.into(),
            role,
            hand,
            tools: Tools::default(),
        }
    }

    #[must_use]
    pub fn can_build(&self) -> bool {
        self.tools.all_working()
    }

    #[must_use]
    pub fn has_tiles(&self) -> bool {
        !self.hand.is_empty()
    }
}
