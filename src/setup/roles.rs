//! Faction assignment and per-count constants.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Hidden faction, fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Miner,
    Saboteur,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Miner => "miner",
            Role::Saboteur => "saboteur",
        })
    }
}

/// Saboteurs for a table of `player_count`.
///
/// ```
/// use saboteur_engine::setup::saboteur_count;
///
/// assert_eq!(saboteur_count(4), 1);
/// assert_eq!(saboteur_count(6), 2);
/// assert_eq!(saboteur_count(9), 3);
/// assert_eq!(saboteur_count(10), 4);
/// ```
#[must_use]
pub const fn saboteur_count(player_count: usize) -> usize {
    match player_count {
        0..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

/// Starting (and maximum) hand size for a table of `player_count`.
#[must_use]
pub const fn hand_size(player_count: usize) -> usize {
    match player_count {
        0..=5 => 6,
        6..=7 => 5,
        _ => 4,
    }
}

/// Seat-ordered roles: a uniformly random subset of seats are saboteurs.
///
/// Seat indices are shuffled (Fisher-Yates) and the first
/// `saboteur_count` of them become saboteurs.
#[must_use]
pub fn allocate_roles(player_count: usize, rng: &mut GameRng) -> Vec<Role> {
    let mut seats: Vec<usize> = (0..player_count).collect();
    rng.shuffle(&mut seats);

    let mut roles = vec![Role::Miner; player_count];
    for &seat in seats.iter().take(saboteur_count(player_count)) {
        roles[seat] = Role::Saboteur;
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saboteur_count_steps() {
        let expected = [(3, 1), (4, 1), (5, 2), (6, 2), (7, 3), (8, 3), (9, 3), (10, 4), (12, 4)];
        for (players, saboteurs) in expected {
            assert_eq!(saboteur_count(players), saboteurs, "{players} players");
        }
    }

    #[test]
    fn test_hand_size_steps() {
        let expected = [(3, 6), (5, 6), (6, 5), (7, 5), (8, 4), (10, 4)];
        for (players, size) in expected {
            assert_eq!(hand_size(players), size, "{players} players");
        }
    }

    #[test]
    fn test_allocate_roles_counts() {
        let mut rng = GameRng::new(42);
        for players in 3..=10 {
            let roles = allocate_roles(players, &mut rng);
            assert_eq!(roles.len(), players);
            let saboteurs = roles.iter().filter(|&&r| r == Role::Saboteur).count();
            assert_eq!(saboteurs, saboteur_count(players));
        }
    }

    #[test]
    fn test_every_seat_can_be_saboteur() {
        let mut rng = GameRng::new(11);
        let mut hits = [0usize; 4];
        for _ in 0..400 {
            let roles = allocate_roles(4, &mut rng);
            for (seat, role) in roles.iter().enumerate() {
                if *role == Role::Saboteur {
                    hits[seat] += 1;
                }
            }
        }
        // 100 expected per seat.
        for count in hits {
            assert!((50..=150).contains(&count), "skewed allocation: {hits:?}");
        }
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Saboteur).unwrap(), r#""saboteur""#);
        assert_eq!(Role::Miner.to_string(), "miner");
    }
}
