use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Top-level world data handed to the engine at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub locations: Vec<LocationDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub vocab: VocabDef,
    #[serde(default)]
    pub events: Vec<EventDef>,
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub intro: String,
    pub player: PlayerDef,
}

impl Default for GameDef {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            version: String::new(),
            intro: String::new(),
            player: PlayerDef::default(),
        }
    }
}

/// Player starting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub start_location: Id,
    /// Total size of items the player can carry at once.
    #[serde(default = "default_capacity")]
    pub capacity: i64,
    #[serde(default = "default_max_health")]
    pub max_health: i64,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            start_location: String::new(),
            capacity: default_capacity(),
            max_health: default_max_health(),
        }
    }
}

fn default_capacity() -> i64 {
    100
}

fn default_max_health() -> i64 {
    100
}

/// A room or outdoor area the player can occupy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDef {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// Location is lit without any light source present.
    #[serde(default = "default_true")]
    pub lit: bool,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
    /// Items described as present here without being contained here
    /// (scenery shared across locations, distant landmarks).
    #[serde(default)]
    pub globals: Vec<Id>,
}

fn default_true() -> bool {
    true
}

/// One exit leading out of a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub direction: String,
    #[serde(default)]
    pub to: Option<Id>,
    /// Item that must be open to pass through.
    #[serde(default)]
    pub door: Option<Id>,
    /// Shown instead of moving; makes the exit purely descriptive.
    #[serde(default)]
    pub blocked_message: Option<String>,
}

/// An in-world object definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub parent: ParentDef,
    #[serde(default = "default_size")]
    pub size: i64,
    /// Capacity as a container; -1 means unlimited.
    #[serde(default = "default_unbounded")]
    pub capacity: i64,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Free-form properties: `lockKey`, `readText`, `firstDescription`, ...
    #[serde(default)]
    pub props: BTreeMap<String, PropDef>,
    /// Present when the item is a non-player character.
    #[serde(default)]
    pub character: Option<CharacterDef>,
}

impl Default for ItemDef {
    fn default() -> Self {
        Self {
            id: Id::new(),
            name: String::new(),
            adjectives: Vec::new(),
            synonyms: Vec::new(),
            parent: ParentDef::default(),
            size: default_size(),
            capacity: default_unbounded(),
            flags: Vec::new(),
            props: BTreeMap::new(),
            character: None,
        }
    }
}

fn default_size() -> i64 {
    1
}

fn default_unbounded() -> i64 {
    -1
}

/// Where an item starts out.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ParentDef {
    Player,
    Location(Id),
    Item(Id),
    #[default]
    Nowhere,
}

/// A property value attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", untagged)]
pub enum PropDef {
    Text(String),
    Number(i64),
    Flag(bool),
}

/// Combat-relevant stats for character items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    #[serde(default = "default_max_health")]
    pub health: i64,
    #[serde(default = "default_damage")]
    pub damage: i64,
    /// Refuse bare-handed attacks against this character.
    #[serde(default)]
    pub requires_weapon: bool,
    #[serde(default)]
    pub preferred_weapon: Option<Id>,
}

fn default_damage() -> i64 {
    5
}

/// Vocabulary extensions layered over the engine's built-in tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VocabDef {
    /// Extra verb words mapped onto built-in verb words
    /// (e.g. `yoink = "take"`).
    #[serde(default)]
    pub verb_synonyms: BTreeMap<String, String>,
    /// Additional noise words stripped before parsing.
    #[serde(default)]
    pub noise_words: Vec<String>,
}

/// A fuse or daemon declared by the game.
///
/// The matching effect closure is registered separately under the same id;
/// the definition only carries scheduling data so it can live in save files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: Id,
    pub kind: EventKind,
    /// Fire once when active (fuses), unless started later by a handler.
    #[serde(default)]
    pub start_active: bool,
}

/// Timing discipline for a scheduled event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Fires once, `turns` turns after activation.
    Fuse { turns: usize },
    /// Runs every `period` turns while active.
    Daemon { period: usize },
}
