//! Declarative state mutations and their transactional application.
//!
//! Verb handlers and scheduled events never touch the [`World`] directly;
//! they return a list of [`StateChange`]s which the engine applies as one
//! batch. Validation runs over the whole batch against the pre-turn state
//! first, so a bad change discards the batch and leaves the world exactly
//! as it was.

use crate::Id;
use crate::item::{ItemFlag, PropValue};
use crate::world::{Parent, World};

use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One atomic, declarative mutation of game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateChange {
    /// Reparent an item. When `was` is supplied it must match the item's
    /// current parent or the whole batch is rejected.
    SetParent {
        item: Id,
        to: Parent,
        was: Option<Parent>,
    },
    SetFlag {
        item: Id,
        flag: ItemFlag,
    },
    ClearFlag {
        item: Id,
        flag: ItemFlag,
    },
    SetProp {
        item: Id,
        key: String,
        value: PropValue,
    },
    SetGlobalFlag(String),
    ClearGlobalFlag(String),
    SetPlayerFlag(String),
    ClearPlayerFlag(String),
    MovePlayer {
        to: Id,
    },
    MarkVisited {
        location: Id,
    },
    AddScore(i64),
    DamagePlayer {
        amount: i64,
    },
    HealPlayer {
        amount: i64,
    },
    DamageCharacter {
        item: Id,
        amount: i64,
    },
}

/// Why a change batch was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    #[error("change referenced missing item '{0}'")]
    MissingItem(Id),

    #[error("change referenced missing location '{0}'")]
    MissingLocation(Id),

    #[error("stale prior value for item '{0}'")]
    StaleValue(Id),

    #[error("item '{0}' has no character sheet")]
    NotACharacter(Id),
}

/// Apply a batch of changes atomically.
///
/// Every change is validated against the current state before any of them
/// is applied; either the whole batch lands, in order, or none of it does.
///
/// # Errors
/// Returns the first validation failure found, with nothing applied.
pub fn apply_changes(world: &mut World, changes: &[StateChange]) -> Result<(), ChangeError> {
    for change in changes {
        validate(world, change)?;
    }
    for change in changes {
        apply(world, change);
    }
    Ok(())
}

fn validate(world: &World, change: &StateChange) -> Result<(), ChangeError> {
    match change {
        StateChange::SetParent { item, to, was } => {
            let current = world
                .items
                .get(item)
                .ok_or_else(|| ChangeError::MissingItem(item.clone()))?;
            if let Some(expected) = was
                && current.parent != *expected
            {
                return Err(ChangeError::StaleValue(item.clone()));
            }
            match to {
                Parent::Item(container) if !world.items.contains_key(container) => {
                    Err(ChangeError::MissingItem(container.clone()))
                },
                Parent::Location(location) if !world.locations.contains_key(location) => {
                    Err(ChangeError::MissingLocation(location.clone()))
                },
                _ => Ok(()),
            }
        },
        StateChange::SetFlag { item, .. }
        | StateChange::ClearFlag { item, .. }
        | StateChange::SetProp { item, .. } => {
            if world.items.contains_key(item) {
                Ok(())
            } else {
                Err(ChangeError::MissingItem(item.clone()))
            }
        },
        StateChange::DamageCharacter { item, .. } => {
            let target = world
                .items
                .get(item)
                .ok_or_else(|| ChangeError::MissingItem(item.clone()))?;
            if target.sheet.is_some() {
                Ok(())
            } else {
                Err(ChangeError::NotACharacter(item.clone()))
            }
        },
        StateChange::MovePlayer { to } | StateChange::MarkVisited { location: to } => {
            if world.locations.contains_key(to) {
                Ok(())
            } else {
                Err(ChangeError::MissingLocation(to.clone()))
            }
        },
        StateChange::SetGlobalFlag(_)
        | StateChange::ClearGlobalFlag(_)
        | StateChange::SetPlayerFlag(_)
        | StateChange::ClearPlayerFlag(_)
        | StateChange::AddScore(_)
        | StateChange::DamagePlayer { .. }
        | StateChange::HealPlayer { .. } => Ok(()),
    }
}

fn apply(world: &mut World, change: &StateChange) {
    match change {
        StateChange::SetParent { item, to, .. } => {
            let Some(entry) = world.items.get_mut(item) else {
                error!("validated change lost its target item '{item}'");
                return;
            };
            entry.parent = to.clone();
        },
        StateChange::SetFlag { item, flag } => {
            if let Some(entry) = world.items.get_mut(item) {
                entry.set(*flag);
            }
        },
        StateChange::ClearFlag { item, flag } => {
            if let Some(entry) = world.items.get_mut(item) {
                entry.clear(*flag);
            }
        },
        StateChange::SetProp { item, key, value } => {
            if let Some(entry) = world.items.get_mut(item) {
                entry.props.insert(key.clone(), value.clone());
            }
        },
        StateChange::SetGlobalFlag(flag) => {
            world.flags.insert(flag.clone());
        },
        StateChange::ClearGlobalFlag(flag) => {
            world.flags.remove(flag);
        },
        StateChange::SetPlayerFlag(flag) => {
            world.player.flags.insert(flag.clone());
        },
        StateChange::ClearPlayerFlag(flag) => {
            world.player.flags.remove(flag);
        },
        StateChange::MovePlayer { to } => {
            world.player.location = to.clone();
        },
        StateChange::MarkVisited { location } => {
            if let Some(entry) = world.locations.get_mut(location) {
                entry.visited = true;
            }
        },
        StateChange::AddScore(points) => {
            world.player.score += points;
        },
        StateChange::DamagePlayer { amount } => {
            world.player.take_damage(*amount);
        },
        StateChange::HealPlayer { amount } => {
            world.player.health = (world.player.health + amount).min(world.player.max_health);
        },
        StateChange::DamageCharacter { item, amount } => {
            if let Some(sheet) = world.items.get_mut(item).and_then(|entry| entry.sheet.as_mut()) {
                sheet.health = (sheet.health - amount).max(0);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CharacterSheet, Item};
    use crate::location::Location;

    fn create_test_world() -> World {
        let mut world = World::new_empty();
        world.locations.insert(
            "hall".into(),
            Location {
                id: "hall".into(),
                name: "Hall".into(),
                description: "A hall.".into(),
                lit: true,
                ..Location::default()
            },
        );
        world.player.location = "hall".into();
        world.items.insert(
            "lamp".into(),
            Item {
                id: "lamp".into(),
                name: "lamp".into(),
                parent: Parent::Location("hall".into()),
                ..Item::default()
            },
        );
        world
    }

    #[test]
    fn batch_applies_in_order() {
        let mut world = create_test_world();
        let changes = vec![
            StateChange::SetParent {
                item: "lamp".into(),
                to: Parent::Player,
                was: Some(Parent::Location("hall".into())),
            },
            StateChange::SetFlag {
                item: "lamp".into(),
                flag: ItemFlag::Touched,
            },
            StateChange::AddScore(5),
        ];
        apply_changes(&mut world, &changes).unwrap();
        assert_eq!(world.items["lamp"].parent, Parent::Player);
        assert!(world.items["lamp"].has(ItemFlag::Touched));
        assert_eq!(world.player.score, 5);
    }

    #[test]
    fn missing_target_discards_whole_batch() {
        let mut world = create_test_world();
        let changes = vec![
            StateChange::AddScore(5),
            StateChange::SetFlag {
                item: "ghost".into(),
                flag: ItemFlag::Touched,
            },
        ];
        let err = apply_changes(&mut world, &changes).unwrap_err();
        assert_eq!(err, ChangeError::MissingItem("ghost".into()));
        // the valid leading change must not have landed
        assert_eq!(world.player.score, 0);
    }

    #[test]
    fn stale_prior_value_rejects_batch() {
        let mut world = create_test_world();
        let changes = vec![StateChange::SetParent {
            item: "lamp".into(),
            to: Parent::Player,
            was: Some(Parent::Nowhere),
        }];
        let err = apply_changes(&mut world, &changes).unwrap_err();
        assert_eq!(err, ChangeError::StaleValue("lamp".into()));
        assert_eq!(world.items["lamp"].parent, Parent::Location("hall".into()));
    }

    #[test]
    fn reparenting_to_missing_container_rejected() {
        let mut world = create_test_world();
        let changes = vec![StateChange::SetParent {
            item: "lamp".into(),
            to: Parent::Item("void-box".into()),
            was: None,
        }];
        assert!(apply_changes(&mut world, &changes).is_err());
    }

    #[test]
    fn damage_requires_character_sheet() {
        let mut world = create_test_world();
        let bad = vec![StateChange::DamageCharacter {
            item: "lamp".into(),
            amount: 3,
        }];
        assert_eq!(
            apply_changes(&mut world, &bad).unwrap_err(),
            ChangeError::NotACharacter("lamp".into())
        );

        world.items.get_mut("lamp").unwrap().sheet = Some(CharacterSheet {
            health: 10,
            max_health: 10,
            damage: 1,
            requires_weapon: false,
            preferred_weapon: None,
        });
        let good = vec![StateChange::DamageCharacter {
            item: "lamp".into(),
            amount: 3,
        }];
        apply_changes(&mut world, &good).unwrap();
        assert_eq!(world.items["lamp"].sheet.as_ref().unwrap().health, 7);
    }

    #[test]
    fn player_heal_caps_at_max() {
        let mut world = create_test_world();
        world.player.health = 90;
        apply_changes(&mut world, &[StateChange::HealPlayer { amount: 50 }]).unwrap();
        assert_eq!(world.player.health, world.player.max_health);
    }

    #[test]
    fn move_player_and_mark_visited() {
        let mut world = create_test_world();
        world.locations.insert(
            "attic".into(),
            Location {
                id: "attic".into(),
                name: "Attic".into(),
                description: "Dusty.".into(),
                lit: true,
                ..Location::default()
            },
        );
        apply_changes(
            &mut world,
            &[
                StateChange::MovePlayer { to: "attic".into() },
                StateChange::MarkVisited {
                    location: "attic".into(),
                },
            ],
        )
        .unwrap();
        assert_eq!(world.player.location, "attic");
        assert!(world.locations["attic"].visited);
    }
}
