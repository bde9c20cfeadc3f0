//! Player -- the protagonist's own state.

use crate::Id;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The player character.
///
/// The inventory is not stored here; it is derived from items whose
/// parent is [`crate::world::Parent::Player`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub location: Id,
    pub score: i64,
    pub moves: usize,
    pub health: i64,
    pub max_health: i64,
    /// Total size of items the player can carry at once.
    pub capacity: i64,
    /// Game-defined player flags (quest progress, states, etc.).
    pub flags: BTreeSet<String>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            location: String::new(),
            score: 0,
            moves: 0,
            health: 100,
            max_health: 100,
            capacity: 100,
            flags: BTreeSet::new(),
        }
    }
}

impl Player {
    /// Returns true while the player has health remaining.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamping at zero.
    pub fn take_damage(&mut self, amount: i64) {
        self.health = (self.health - amount).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut player = Player::default();
        player.take_damage(40);
        assert_eq!(player.health, 60);
        player.take_damage(1000);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());
    }
}
