//! Scope resolution: what can the player see, touch, and name right now?
//!
//! Scope is computed fresh from world state each time it is needed rather
//! than cached across turns; the sets involved are small and the state
//! changes under nearly every command.
//!
//! Visibility and reachability diverge inside containers: a transparent
//! closed jar shows its contents but won't give them up, while an open
//! box or a table top does both.

use crate::Id;
use crate::item::Item;
use crate::world::{Parent, World};

use log::warn;
use std::collections::HashSet;

/// Containers nested deeper than this stop contributing to scope.
pub const MAX_NESTING_DEPTH: usize = 6;

/// Answers scope queries against a snapshot of the world.
pub struct ScopeResolver<'a> {
    world: &'a World,
    visible: HashSet<Id>,
    reachable: HashSet<Id>,
    lit: bool,
}

impl<'a> ScopeResolver<'a> {
    /// Compute scope for the player's current position.
    pub fn new(world: &'a World) -> Self {
        let mut roots: Vec<Id> = Vec::new();
        match world.locations.get(&world.player.location) {
            Some(location) => {
                roots.extend(world.child_ids(&Parent::Location(location.id.clone())));
                roots.extend(location.globals.iter().cloned());
            },
            None => warn!(
                "scope requested while player location '{}' is unknown",
                world.player.location
            ),
        }
        let inventory = world.inventory_ids();
        roots.extend(inventory.iter().cloned());

        let mut visible = HashSet::new();
        let mut reachable = HashSet::new();
        for id in &roots {
            expand(world, id, 0, true, &mut visible, &mut reachable);
        }

        let inherently_lit = world
            .locations
            .get(&world.player.location)
            .is_some_and(|location| location.lit);
        let lit = inherently_lit
            || visible
                .iter()
                .filter_map(|id| world.items.get(id))
                .any(Item::provides_light);

        if !lit {
            // In the dark only held light sources remain visible, and only
            // carried things remain reachable at all.
            visible = inventory
                .iter()
                .filter(|id| world.items.get(*id).is_some_and(Item::provides_light))
                .cloned()
                .collect();
            reachable = HashSet::new();
            let mut scratch = HashSet::new();
            for id in &inventory {
                expand(world, id, 0, true, &mut scratch, &mut reachable);
            }
        }

        Self {
            world,
            visible,
            reachable,
            lit,
        }
    }

    /// Every id the player may currently refer to by name.
    pub fn in_scope(&self) -> HashSet<Id> {
        self.visible.union(&self.reachable).cloned().collect()
    }

    /// Returns true when the item is visible from where the player stands.
    pub fn can_see(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Returns true when the item can be physically touched or taken.
    pub fn can_reach(&self, id: &str) -> bool {
        self.reachable.contains(id)
    }

    /// Returns true when the player holds the item directly.
    pub fn is_holding(&self, id: &str) -> bool {
        self.world.is_held(id)
    }

    /// Returns true when adding `extra_size` stays within carrying capacity.
    pub fn can_carry(&self, extra_size: i64) -> bool {
        let capacity = self.world.player.capacity;
        if capacity < 0 {
            return true;
        }
        self.world.load_of(&Parent::Player) + extra_size <= capacity
    }

    /// Returns true when the player can see at all.
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

/// Walk an item and, where its container state allows, its contents.
fn expand(
    world: &World,
    id: &str,
    depth: usize,
    reachable_path: bool,
    visible: &mut HashSet<Id>,
    reachable: &mut HashSet<Id>,
) {
    if depth > MAX_NESTING_DEPTH {
        warn!("scope expansion stopped at depth {depth} inside '{id}'");
        return;
    }
    let Some(item) = world.items.get(id) else {
        warn!("scope expansion skipped unknown item id '{id}'");
        return;
    };
    visible.insert(item.id.clone());
    if reachable_path {
        reachable.insert(item.id.clone());
    }

    if item.shows_contents() {
        let child_reachable = reachable_path && item.offers_contents();
        for child in world.child_ids(&Parent::Item(item.id.clone())) {
            expand(world, &child, depth + 1, child_reachable, visible, reachable);
        }
    }
}
