//! Room codes.
//!
//! Short upper-case codes drawn from an alphabet without `I` and `O`, so a
//! code read aloud or copied off a screen is never ambiguous.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, RoomError};

pub const ROOM_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Draws before `generate` gives up on a crowded code space.
const MAX_ATTEMPTS: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Normalize what a player typed: trim and upper-case.
    ///
    /// The result is only a lookup key; it may name no room at all.
    ///
    /// ```
    /// use saboteur_engine::rooms::RoomCode;
    ///
    /// assert_eq!(RoomCode::parse("  abcd ").as_str(), "ABCD");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Draw random codes of `len` characters until one is not `is_taken`.
    ///
    /// Fails for `len == 0`, and once `MAX_ATTEMPTS` draws have all been
    /// taken.
    pub fn generate(len: usize, rng: &mut GameRng, is_taken: impl Fn(&RoomCode) -> bool) -> Result<Self, RoomError> {
        if len == 0 {
            return Err(RoomError::NoRoomCode);
        }
        let alphabet = ROOM_CODE_ALPHABET.as_bytes();
        for _ in 0..MAX_ATTEMPTS {
            let code: String = (0..len)
                .map(|_| char::from(alphabet[rng.gen_range_usize(0..alphabet.len())]))
                .collect();
            let code = Self(code);
            if !is_taken(&code) {
                return Ok(code);
            }
        }
        Err(RoomError::NoRoomCode)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-formed for `len`: right length, alphabet characters only.
    #[must_use]
    pub fn is_valid(&self, len: usize) -> bool {
        self.0.len() == len && self.0.chars().all(|ch| ROOM_CODE_ALPHABET.contains(ch))
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
