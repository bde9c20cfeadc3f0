use std::collections::HashSet;
use std::fmt;

use crate::{EventKind, ParentDef, PropDef, WorldDef};

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// Returns every problem found rather than stopping at the first, so a
/// world author can fix a batch at once. An empty result means the
/// definition is safe to hand to the engine loader.
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut locations = HashSet::new();
    let mut items = HashSet::new();

    track_ids(
        "location",
        world.locations.iter().map(|l| l.id.as_str()),
        &mut locations,
        &mut errors,
    );
    track_ids(
        "item",
        world.items.iter().map(|i| i.id.as_str()),
        &mut items,
        &mut errors,
    );

    if world.game.player.start_location.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "player start location missing".to_string(),
        });
    } else {
        check_ref(
            "location",
            &world.game.player.start_location,
            &locations,
            "player start location".to_string(),
            &mut errors,
        );
    }

    for location in &world.locations {
        for exit in &location.exits {
            if let Some(to) = &exit.to {
                check_ref(
                    "location",
                    to,
                    &locations,
                    format!("exit '{}' from '{}'", exit.direction, location.id),
                    &mut errors,
                );
            } else if exit.blocked_message.is_none() {
                errors.push(ValidationError::InvalidValue {
                    context: format!(
                        "exit '{}' from '{}' has no destination and no blocked message",
                        exit.direction, location.id
                    ),
                });
            }
            if let Some(door) = &exit.door {
                check_ref(
                    "item",
                    door,
                    &items,
                    format!("door on exit '{}' from '{}'", exit.direction, location.id),
                    &mut errors,
                );
            }
        }
        for global in &location.globals {
            check_ref(
                "item",
                global,
                &items,
                format!("global item in '{}'", location.id),
                &mut errors,
            );
        }
    }

    for item in &world.items {
        match &item.parent {
            ParentDef::Location(id) => check_ref(
                "location",
                id,
                &locations,
                format!("parent of item '{}'", item.id),
                &mut errors,
            ),
            ParentDef::Item(id) => check_ref(
                "item",
                id,
                &items,
                format!("parent of item '{}'", item.id),
                &mut errors,
            ),
            ParentDef::Player | ParentDef::Nowhere => {},
        }
        if item.capacity < -1 {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' capacity {} below -1", item.id, item.capacity),
            });
        }
        if item.size < 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' has negative size", item.id),
            });
        }
        if let Some(PropDef::Text(key_id)) = item.props.get("lockKey") {
            check_ref(
                "item",
                key_id,
                &items,
                format!("lockKey of item '{}'", item.id),
                &mut errors,
            );
        }
        if let Some(character) = &item.character
            && let Some(weapon) = &character.preferred_weapon
        {
            check_ref(
                "item",
                weapon,
                &items,
                format!("preferred weapon of character '{}'", item.id),
                &mut errors,
            );
        }
    }

    let mut events = HashSet::new();
    track_ids(
        "event",
        world.events.iter().map(|e| e.id.as_str()),
        &mut events,
        &mut errors,
    );
    for event in &world.events {
        let bad = match event.kind {
            EventKind::Fuse { turns } => turns == 0,
            EventKind::Daemon { period } => period == 0,
        };
        if bad {
            errors.push(ValidationError::InvalidValue {
                context: format!("event '{}' has a zero turn count", event.id),
            });
        }
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !seen.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(
    kind: &'static str,
    id: &str,
    known: &HashSet<String>,
    context: String,
    errors: &mut Vec<ValidationError>,
) {
    if !known.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}
