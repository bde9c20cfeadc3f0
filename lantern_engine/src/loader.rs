//! Building a runtime [`World`] from a `lantern_data` definition.
//!
//! The loader validates the definition, converts every def into its
//! runtime counterpart, arms the initially-active events, and reports
//! anything malformed before the game gets a chance to misbehave at
//! play time.

use crate::item::{CharacterSheet, Item, ItemFlag};
use crate::location::{Direction, Exit, Location};
use crate::vocab::Vocabulary;
use crate::world::{Parent, World};

use anyhow::{Context, Result, anyhow, bail};
use lantern_data::{EventKind, ItemDef, LocationDef, ParentDef, VocabDef, WorldDef, validate_world};
use log::info;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Read a world definition from a TOML file.
///
/// # Errors
/// Returns an error when the file is unreadable or not valid TOML.
pub fn load_world_file(path: &Path) -> Result<WorldDef> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading world file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing world file {}", path.display()))
}

/// Build a runtime world from a definition.
///
/// # Errors
/// Returns an error listing every validation problem, or describing the
/// first unconvertible flag or direction.
pub fn build_world(def: &WorldDef) -> Result<World> {
    let problems = validate_world(def);
    if !problems.is_empty() {
        let listing: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!("world definition is invalid:\n  {}", listing.join("\n  "));
    }

    let mut world = World::new_empty();
    world.title = def.game.title.clone();
    world.intro = def.game.intro.clone();
    world.player.location = def.game.player.start_location.clone();
    world.player.capacity = def.game.player.capacity;
    world.player.max_health = def.game.player.max_health;
    world.player.health = def.game.player.max_health;

    for location_def in &def.locations {
        let location = build_location(location_def)?;
        world.locations.insert(location.id.clone(), location);
    }
    for item_def in &def.items {
        let item = build_item(item_def)?;
        world.items.insert(item.id.clone(), item);
    }

    for event in &def.events {
        if !event.start_active {
            continue;
        }
        match event.kind {
            EventKind::Fuse { turns } => world.scheduler.schedule_fuse(&event.id, turns),
            EventKind::Daemon { period } => world.scheduler.start_daemon(&event.id, period),
        }
    }

    info!(
        "world '{}' built: {} locations, {} items",
        world.title,
        world.locations.len(),
        world.items.len()
    );
    Ok(world)
}

fn build_location(def: &LocationDef) -> Result<Location> {
    let mut exits = std::collections::BTreeMap::new();
    for exit_def in &def.exits {
        let direction: Direction = exit_def
            .direction
            .parse()
            .map_err(|e: String| anyhow!("location '{}': {e}", def.id))?;
        exits.insert(
            direction,
            Exit {
                to: exit_def.to.clone(),
                door: exit_def.door.clone(),
                blocked_message: exit_def.blocked_message.clone(),
            },
        );
    }
    Ok(Location {
        id: def.id.clone(),
        name: def.name.clone(),
        description: def.description.clone(),
        lit: def.lit,
        visited: false,
        exits,
        globals: def.globals.iter().cloned().collect(),
    })
}

fn build_item(def: &ItemDef) -> Result<Item> {
    let mut flags = BTreeSet::new();
    for flag in &def.flags {
        let parsed: ItemFlag = flag
            .parse()
            .map_err(|e: String| anyhow!("item '{}': {e}", def.id))?;
        flags.insert(parsed);
    }

    // leading name words double as adjectives ("brass lantern" -> brass)
    let mut adjectives: BTreeSet<String> = def.adjectives.iter().map(|a| a.to_lowercase()).collect();
    let name_words: Vec<&str> = def.name.split_whitespace().collect();
    for word in &name_words[..name_words.len().saturating_sub(1)] {
        adjectives.insert(word.to_lowercase());
    }

    let sheet = def.character.as_ref().map(|character| CharacterSheet {
        health: character.health,
        max_health: character.health,
        damage: character.damage,
        requires_weapon: character.requires_weapon,
        preferred_weapon: character.preferred_weapon.clone(),
    });
    if sheet.is_some() {
        flags.insert(ItemFlag::Character);
    }

    Ok(Item {
        id: def.id.clone(),
        name: def.name.clone(),
        adjectives,
        synonyms: def.synonyms.iter().map(|s| s.to_lowercase()).collect(),
        parent: match &def.parent {
            ParentDef::Player => Parent::Player,
            ParentDef::Location(id) => Parent::Location(id.clone()),
            ParentDef::Item(id) => Parent::Item(id.clone()),
            ParentDef::Nowhere => Parent::Nowhere,
        },
        size: def.size,
        capacity: def.capacity,
        flags,
        props: def.props.iter().map(|(k, v)| (k.clone(), v.clone().into())).collect(),
        sheet,
    })
}

/// Layer a game's vocabulary extensions over the built-in tables.
pub fn install_vocab(vocab: &mut Vocabulary, def: &VocabDef) {
    for (word, canonical) in &def.verb_synonyms {
        vocab.add_verb_synonym(word, canonical);
    }
    for word in &def.noise_words {
        vocab.add_noise_word(word);
    }
}
