//! Item types and related helpers.
//!
//! Items represent everything the player can see, touch, or talk to:
//! portable objects, furniture, doors, light sources, and characters.
//! Functions here cover flag bookkeeping and the visibility/containment
//! queries used by the scope resolver and the verb handlers.

use crate::Id;
use crate::world::Parent;

use lantern_data::PropDef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

/// Well-known property keys. Games may attach arbitrary keys beyond these.
pub mod prop {
    /// Id of the item that locks/unlocks this one.
    pub const LOCK_KEY: &str = "lockKey";
    /// Text returned by READ.
    pub const READ_TEXT: &str = "readText";
    /// Long description shown by EXAMINE.
    pub const DESCRIPTION: &str = "description";
    /// Shown in room listings until the item has been touched.
    pub const FIRST_DESCRIPTION: &str = "firstDescription";
    /// READ moves the item into inventory first when set.
    pub const TAKE_FIRST: &str = "takeFirstOnRead";
    /// Prefix for conversation topics: `topic:<item id>`.
    pub const TOPIC_PREFIX: &str = "topic:";
}

/// An in-world object.
///
/// `parent` places the item in the containment forest; `Nowhere` means
/// removed from play. `capacity` of -1 means the item holds anything.
/// Characters carry a [`CharacterSheet`] alongside the `Character` flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Item {
    /// Stable id, also the word game data uses to reference this item.
    pub id: Id,
    /// Display name; its final word doubles as the item's principal noun.
    pub name: String,
    /// Adjectives accepted as modifiers when resolving noun phrases.
    pub adjectives: BTreeSet<String>,
    /// Additional nouns that refer to this item.
    pub synonyms: BTreeSet<String>,
    /// Current holder of the item.
    pub parent: Parent,
    /// How much room the item takes up inside a container.
    pub size: i64,
    /// How much the item can hold; -1 is unlimited.
    pub capacity: i64,
    /// The item's flag set.
    pub flags: BTreeSet<ItemFlag>,
    /// Arbitrary key/value properties (see [`prop`] for well-known keys).
    pub props: BTreeMap<String, PropValue>,
    /// Combat and conversation stats when this item is a character.
    pub sheet: Option<CharacterSheet>,
}

impl Item {
    /// Returns true when the flag is set.
    pub fn has(&self, flag: ItemFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Set a flag.
    pub fn set(&mut self, flag: ItemFlag) {
        self.flags.insert(flag);
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: ItemFlag) {
        self.flags.remove(&flag);
    }

    /// Returns true when this item currently sheds light.
    pub fn provides_light(&self) -> bool {
        (self.has(ItemFlag::LightSource) && self.has(ItemFlag::On)) || self.has(ItemFlag::Burning)
    }

    /// Returns true when the item is a container whose contents can be
    /// manipulated directly.
    pub fn is_open_container(&self) -> bool {
        self.has(ItemFlag::Container) && self.has(ItemFlag::Open)
    }

    /// Contents are visible: open, see-through, or sitting on top.
    pub fn shows_contents(&self) -> bool {
        self.is_open_container() || self.has(ItemFlag::Transparent) || self.has(ItemFlag::Surface)
    }

    /// Contents are reachable, not merely visible.
    pub fn offers_contents(&self) -> bool {
        self.is_open_container() || self.has(ItemFlag::Surface)
    }

    /// Returns true when every modifier appears in the item's adjectives.
    pub fn matches_modifiers(&self, modifiers: &[String]) -> bool {
        modifiers.iter().all(|m| self.adjectives.contains(m))
    }

    /// Fetch a text property.
    pub fn prop_text(&self, key: &str) -> Option<&str> {
        match self.props.get(key) {
            Some(PropValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Fetch a boolean property; absent keys read as false.
    pub fn prop_flag(&self, key: &str) -> bool {
        matches!(self.props.get(key), Some(PropValue::Flag(true)))
    }

    /// Id of the key item that operates this item's lock, if any.
    pub fn lock_key(&self) -> Option<&str> {
        self.prop_text(prop::LOCK_KEY)
    }
}

/// The closed set of item flags.
///
/// Flag implications the engine maintains: `Locked` excludes `Open`,
/// `Worn` requires `parent = Player`, `On` requires `Device`, and
/// `Burning` requires `Flammable` or `SelfIgnitable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemFlag {
    Takable,
    Wearable,
    Worn,
    Container,
    Open,
    Openable,
    Lockable,
    Locked,
    Transparent,
    Surface,
    Device,
    On,
    LightSource,
    Flammable,
    Burning,
    SelfIgnitable,
    Scenery,
    Touched,
    Visited,
    Edible,
    Drinkable,
    Readable,
    Character,
    IsEnemy,
    Inflatable,
    Inflated,
    Climbable,
    Diggable,
    OmitDescription,
}

impl Display for ItemFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ItemFlag::Takable => "takable",
            ItemFlag::Wearable => "wearable",
            ItemFlag::Worn => "worn",
            ItemFlag::Container => "container",
            ItemFlag::Open => "open",
            ItemFlag::Openable => "openable",
            ItemFlag::Lockable => "lockable",
            ItemFlag::Locked => "locked",
            ItemFlag::Transparent => "transparent",
            ItemFlag::Surface => "surface",
            ItemFlag::Device => "device",
            ItemFlag::On => "on",
            ItemFlag::LightSource => "lightSource",
            ItemFlag::Flammable => "flammable",
            ItemFlag::Burning => "burning",
            ItemFlag::SelfIgnitable => "selfIgnitable",
            ItemFlag::Scenery => "scenery",
            ItemFlag::Touched => "touched",
            ItemFlag::Visited => "visited",
            ItemFlag::Edible => "edible",
            ItemFlag::Drinkable => "drinkable",
            ItemFlag::Readable => "readable",
            ItemFlag::Character => "character",
            ItemFlag::IsEnemy => "isEnemy",
            ItemFlag::Inflatable => "inflatable",
            ItemFlag::Inflated => "inflated",
            ItemFlag::Climbable => "climbable",
            ItemFlag::Diggable => "diggable",
            ItemFlag::OmitDescription => "omitDescription",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ItemFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flag = match s {
            "takable" => ItemFlag::Takable,
            "wearable" => ItemFlag::Wearable,
            "worn" => ItemFlag::Worn,
            "container" => ItemFlag::Container,
            "open" => ItemFlag::Open,
            "openable" => ItemFlag::Openable,
            "lockable" => ItemFlag::Lockable,
            "locked" => ItemFlag::Locked,
            "transparent" => ItemFlag::Transparent,
            "surface" => ItemFlag::Surface,
            "device" => ItemFlag::Device,
            "on" => ItemFlag::On,
            "lightSource" => ItemFlag::LightSource,
            "flammable" => ItemFlag::Flammable,
            "burning" => ItemFlag::Burning,
            "selfIgnitable" => ItemFlag::SelfIgnitable,
            "scenery" => ItemFlag::Scenery,
            "touched" => ItemFlag::Touched,
            "visited" => ItemFlag::Visited,
            "edible" => ItemFlag::Edible,
            "drinkable" => ItemFlag::Drinkable,
            "readable" => ItemFlag::Readable,
            "character" => ItemFlag::Character,
            "isEnemy" => ItemFlag::IsEnemy,
            "inflatable" => ItemFlag::Inflatable,
            "inflated" => ItemFlag::Inflated,
            "climbable" => ItemFlag::Climbable,
            "diggable" => ItemFlag::Diggable,
            "omitDescription" => ItemFlag::OmitDescription,
            other => return Err(format!("unknown item flag '{other}'")),
        };
        Ok(flag)
    }
}

/// A property value attached to an item at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl From<PropDef> for PropValue {
    fn from(def: PropDef) -> Self {
        match def {
            PropDef::Text(text) => PropValue::Text(text),
            PropDef::Number(n) => PropValue::Number(n),
            PropDef::Flag(b) => PropValue::Flag(b),
        }
    }
}

/// Combat-relevant stats for a character item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub health: i64,
    pub max_health: i64,
    pub damage: i64,
    pub requires_weapon: bool,
    pub preferred_weapon: Option<Id>,
}

impl CharacterSheet {
    /// Returns true while the character has health remaining.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            ..Item::default()
        }
    }

    #[test]
    fn flags_set_and_clear() {
        let mut item = create_test_item("lamp");
        assert!(!item.has(ItemFlag::On));
        item.set(ItemFlag::On);
        assert!(item.has(ItemFlag::On));
        item.clear(ItemFlag::On);
        assert!(!item.has(ItemFlag::On));
    }

    #[test]
    fn provides_light_requires_on_or_burning() {
        let mut lamp = create_test_item("lamp");
        lamp.set(ItemFlag::LightSource);
        assert!(!lamp.provides_light());
        lamp.set(ItemFlag::On);
        assert!(lamp.provides_light());

        let mut torch = create_test_item("torch");
        torch.set(ItemFlag::Burning);
        assert!(torch.provides_light());
    }

    #[test]
    fn container_visibility_helpers() {
        let mut chest = create_test_item("chest");
        chest.set(ItemFlag::Container);
        assert!(!chest.shows_contents());
        assert!(!chest.offers_contents());

        chest.set(ItemFlag::Open);
        assert!(chest.shows_contents());
        assert!(chest.offers_contents());

        chest.clear(ItemFlag::Open);
        chest.set(ItemFlag::Transparent);
        assert!(chest.shows_contents());
        assert!(!chest.offers_contents());

        let mut table = create_test_item("table");
        table.set(ItemFlag::Surface);
        assert!(table.shows_contents());
        assert!(table.offers_contents());
    }

    #[test]
    fn modifiers_must_all_match() {
        let mut apple = create_test_item("apple");
        apple.adjectives.insert("red".into());
        apple.adjectives.insert("shiny".into());
        assert!(apple.matches_modifiers(&["red".into()]));
        assert!(apple.matches_modifiers(&["red".into(), "shiny".into()]));
        assert!(!apple.matches_modifiers(&["green".into()]));
    }

    #[test]
    fn prop_accessors() {
        let mut leaflet = create_test_item("leaflet");
        leaflet
            .props
            .insert(prop::READ_TEXT.into(), PropValue::Text("WELCOME!".into()));
        leaflet.props.insert(prop::TAKE_FIRST.into(), PropValue::Flag(true));
        assert_eq!(leaflet.prop_text(prop::READ_TEXT), Some("WELCOME!"));
        assert!(leaflet.prop_flag(prop::TAKE_FIRST));
        assert!(!leaflet.prop_flag("missing"));
        assert_eq!(leaflet.lock_key(), None);
    }

    #[test]
    fn flag_round_trips_through_from_str() {
        for flag in [
            ItemFlag::Takable,
            ItemFlag::LightSource,
            ItemFlag::SelfIgnitable,
            ItemFlag::OmitDescription,
        ] {
            let parsed: ItemFlag = flag.to_string().parse().unwrap();
            assert_eq!(parsed, flag);
        }
        assert!("notAFlag".parse::<ItemFlag>().is_err());
    }

    #[test]
    fn character_sheet_alive() {
        let sheet = CharacterSheet {
            health: 10,
            max_health: 10,
            damage: 3,
            requires_weapon: false,
            preferred_weapon: None,
        };
        assert!(sheet.is_alive());
        let dead = CharacterSheet { health: 0, ..sheet };
        assert!(!dead.is_alive());
    }
}
