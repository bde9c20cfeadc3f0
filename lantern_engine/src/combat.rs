//! Turn-based combat between the player and character items.
//!
//! Combat is deliberately simple: the ATTACK handler lands the player's
//! strike, and while combat stays active the engine gives the enemy a
//! return strike at the end of each consumed turn. Damage rolls come from
//! `rand`; everything else is plain state.

use crate::Id;
use crate::change::StateChange;
use crate::item::{Item, ItemFlag};
use crate::messages::Messenger;
use crate::world::{Parent, World};

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The player's current fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub enemy: Id,
}

/// Roll the player's damage for one strike.
pub fn strike_damage(weapon: Option<&Item>) -> i64 {
    let mut rng = rand::rng();
    match weapon {
        Some(_) => rng.random_range(3..=8),
        None => rng.random_range(1..=4),
    }
}

/// Returns true when the active fight can no longer continue: the enemy
/// is gone, dead, or no longer in the player's location.
pub fn combat_over(world: &World) -> bool {
    let Some(combat) = &world.combat else {
        return true;
    };
    let Some(enemy) = world.items.get(&combat.enemy) else {
        return true;
    };
    let dead = enemy.sheet.as_ref().is_none_or(|sheet| !sheet.is_alive());
    dead || enemy.parent != Parent::Location(world.player.location.clone())
}

/// The enemy's return strike for this turn, if combat is live.
///
/// Returns the narration plus the damage to apply to the player.
pub fn retaliation(world: &World, messenger: &dyn Messenger) -> Option<(String, Vec<StateChange>)> {
    let combat = world.combat.as_ref()?;
    let enemy = world.items.get(&combat.enemy)?;
    let sheet = enemy.sheet.as_ref()?;
    if !sheet.is_alive() || !enemy.has(ItemFlag::IsEnemy) {
        return None;
    }
    if enemy.parent != Parent::Location(world.player.location.clone()) {
        return None;
    }

    let mut rng = rand::rng();
    let damage = rng.random_range(1..=sheet.damage.max(1));
    info!("enemy '{}' retaliates for {damage}", enemy.id);
    Some((
        messenger.enemy_strikes(&enemy.name, damage),
        vec![StateChange::DamagePlayer { amount: damage }],
    ))
}
