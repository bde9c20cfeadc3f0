//! Data structures representing the whole game state.
//!
//! This module defines [`World`] and related types used at runtime to track
//! the current state of the adventure. The engine owns the `World`
//! exclusively; verb handlers read it and describe changes rather than
//! writing to it directly.

use crate::LANTERN_VERSION;
use crate::combat::CombatState;
use crate::command::Command;
use crate::item::{Item, ItemFlag};
use crate::location::Location;
use crate::player::Player;
use crate::scheduler::Scheduler;

use anyhow::{Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use variantly::Variantly;

/// Stable identifier for items and locations, shared with game data.
pub type Id = lantern_data::Id;

/// Kinds of places where an item may be located.
///
/// The containment graph is a forest: every item has exactly one parent,
/// and roots are locations, the player, or `Nowhere` (out of play).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum Parent {
    Player,
    Location(Id),
    Item(Id),
    #[default]
    Nowhere,
}

/// Common API shared by items, locations, and the player.
pub trait WorldObject {
    /// Stable id assigned to the object.
    fn id(&self) -> &str;
    /// Display-friendly name.
    fn name(&self) -> &str;
    /// Long-form description shown to players.
    fn description(&self) -> &str;
}

impl WorldObject for Item {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        self.prop_text(crate::item::prop::DESCRIPTION).unwrap_or("")
    }
}

impl WorldObject for Location {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// What to do once a pending yes/no question is answered "yes".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingAction {
    Quit,
    Restart,
    RunCommand(Command),
}

/// A yes/no question awaiting the player's next input.
///
/// Modeled as data inspected each turn rather than a callback so it
/// survives serialization and so any unrelated command can cancel it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingQuestion {
    pub prompt: String,
    pub on_yes: PendingAction,
    /// Shown when the player answers "no"; a generic line otherwise.
    pub on_no: Option<String>,
}

/// Complete state of the running game.
///
/// Everything needed to resume play lives here; saves serialize this
/// struct and nothing else. Event effect closures and per-item verb
/// overrides are re-registered by the game at startup and referenced
/// from here by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Game title, used in save summaries and the banner.
    pub title: String,
    /// Introductory text printed when a new game starts.
    pub intro: String,
    /// Every item in the game, in or out of play.
    pub items: BTreeMap<Id, Item>,
    /// Every location in the game.
    pub locations: BTreeMap<Id, Location>,
    /// The player character.
    pub player: Player,
    /// Global game flags.
    pub flags: BTreeSet<String>,
    /// Pronoun table: word ("it", "them", ...) to the items it refers to.
    pub pronouns: BTreeMap<String, BTreeSet<Id>>,
    /// Active combat, if the player is fighting something.
    pub combat: Option<CombatState>,
    /// A yes/no question awaiting the next input, if any.
    pub question: Option<PendingQuestion>,
    /// Scheduled fuses and daemons.
    pub scheduler: Scheduler,
    /// Number of turns taken so far.
    pub turn_count: usize,
    /// Full location descriptions on every visit when true.
    pub verbose: bool,
    /// Engine version that produced this state.
    pub version: String,
}

impl World {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> World {
        let world = Self {
            title: String::new(),
            intro: String::new(),
            items: BTreeMap::new(),
            locations: BTreeMap::new(),
            player: Player::default(),
            flags: BTreeSet::new(),
            pronouns: BTreeMap::new(),
            combat: None,
            question: None,
            scheduler: Scheduler::default(),
            turn_count: 0,
            verbose: true,
            version: LANTERN_VERSION.to_string(),
        };
        info!("new, empty 'World' created");
        world
    }

    /// Obtain a reference to the location the player occupies.
    ///
    /// # Errors
    /// - if the player's location id is not found
    pub fn player_location_ref(&self) -> Result<&Location> {
        self.locations
            .get(&self.player.location)
            .ok_or_else(|| anyhow!("player's location id ('{}') not found in world", self.player.location))
    }

    /// Obtain a mutable reference to the location the player occupies.
    ///
    /// # Errors
    /// - if the player's location id is not found
    pub fn player_location_mut(&mut self) -> Result<&mut Location> {
        self.locations
            .get_mut(&self.player.location)
            .ok_or_else(|| anyhow!("player's location id ('{}') not found in world", self.player.location))
    }

    /// Look up an item by id.
    ///
    /// # Errors
    /// - if no item has the given id
    pub fn item_ref(&self, id: &str) -> Result<&Item> {
        self.items.get(id).ok_or_else(|| anyhow!("item id '{id}' not found in world"))
    }

    /// Look up an item by id, mutably.
    ///
    /// # Errors
    /// - if no item has the given id
    pub fn item_mut(&mut self, id: &str) -> Result<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| anyhow!("item id '{id}' not found in world"))
    }

    /// Look up a location by id.
    ///
    /// # Errors
    /// - if no location has the given id
    pub fn location_ref(&self, id: &str) -> Result<&Location> {
        self.locations
            .get(id)
            .ok_or_else(|| anyhow!("location id '{id}' not found in world"))
    }

    /// Iterate over items with the given parent.
    pub fn children_of(&self, parent: Parent) -> impl Iterator<Item = &Item> {
        self.items.values().filter(move |item| item.parent == parent)
    }

    /// Ids of items with the given parent.
    pub fn child_ids(&self, parent: &Parent) -> Vec<Id> {
        self.children_of(parent.clone()).map(|item| item.id.clone()).collect()
    }

    /// Ids of items the player is carrying.
    pub fn inventory_ids(&self) -> Vec<Id> {
        self.child_ids(&Parent::Player)
    }

    /// Returns true when the player holds the item directly.
    pub fn is_held(&self, id: &str) -> bool {
        self.items.get(id).is_some_and(|item| item.parent == Parent::Player)
    }

    /// Sum of the direct contents' sizes for a holder.
    pub fn load_of(&self, parent: &Parent) -> i64 {
        self.children_of(parent.clone()).map(|item| item.size).sum()
    }

    /// Returns true when `ancestor` appears on `item`'s parent chain.
    ///
    /// Used by reparenting handlers to refuse containment cycles
    /// ("put box in bag" while the bag is inside the box).
    pub fn is_ancestor(&self, ancestor: &str, item: &str) -> bool {
        let mut current = item.to_string();
        // bounded walk in case state is already corrupt
        for _ in 0..crate::scope::MAX_NESTING_DEPTH * 2 {
            match self.items.get(&current).map(|i| &i.parent) {
                Some(Parent::Item(parent_id)) => {
                    if parent_id == ancestor {
                        return true;
                    }
                    current = parent_id.clone();
                },
                _ => return false,
            }
        }
        false
    }

    /// Record what a pronoun refers to, replacing any earlier binding.
    pub fn set_pronoun(&mut self, word: &str, ids: impl IntoIterator<Item = Id>) {
        self.pronouns.insert(word.to_string(), ids.into_iter().collect());
    }

    /// Current binding for a pronoun, if one was ever set.
    pub fn pronoun(&self, word: &str) -> Option<&BTreeSet<Id>> {
        self.pronouns.get(word)
    }

    /// Check the structural invariants of the state, returning a
    /// description of each violation found.
    ///
    /// Cheap enough for tests to call after every turn; the engine itself
    /// only calls it when applying a change batch fails.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for item in self.items.values() {
            match &item.parent {
                Parent::Item(parent_id) => {
                    if !self.items.contains_key(parent_id) {
                        problems.push(format!("item '{}' has missing parent item '{parent_id}'", item.id));
                    } else if self.is_ancestor(&item.id, parent_id) || parent_id == &item.id {
                        problems.push(format!("item '{}' participates in a containment cycle", item.id));
                    }
                },
                Parent::Location(loc_id) => {
                    if !self.locations.contains_key(loc_id) {
                        problems.push(format!("item '{}' has missing parent location '{loc_id}'", item.id));
                    }
                },
                Parent::Player | Parent::Nowhere => {},
            }

            if item.capacity >= 0 {
                let load = self.load_of(&Parent::Item(item.id.clone()));
                if load > item.capacity {
                    problems.push(format!(
                        "container '{}' holds {load} against capacity {}",
                        item.id, item.capacity
                    ));
                }
            }

            if item.has(ItemFlag::Locked) && item.has(ItemFlag::Open) {
                problems.push(format!("item '{}' is both locked and open", item.id));
            }
            if item.has(ItemFlag::Worn) && item.parent != Parent::Player {
                problems.push(format!("item '{}' is worn but not held by the player", item.id));
            }
            if item.has(ItemFlag::On) && !item.has(ItemFlag::Device) {
                problems.push(format!("item '{}' is on but not a device", item.id));
            }
            if item.has(ItemFlag::Burning)
                && !(item.has(ItemFlag::Flammable) || item.has(ItemFlag::SelfIgnitable))
            {
                problems.push(format!("item '{}' is burning but cannot burn", item.id));
            }
        }

        for (word, ids) in &self.pronouns {
            for id in ids {
                if !self.items.contains_key(id) {
                    problems.push(format!("pronoun '{word}' refers to missing item '{id}'"));
                }
            }
        }

        problems
    }
}
