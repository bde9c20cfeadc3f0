//! Command module.
//!
//! Describes the structured commands the parser produces and the verb
//! identifiers the dispatcher routes on. A [`Command`] is the parser's
//! output: a verb plus resolved object references, never raw text.

use crate::Id;
use crate::location::Direction;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use variantly::Variantly;

/// Canonical verb identifiers.
///
/// Synonym words collapse onto these during parsing; handlers register
/// one per verb. `Turn` exists separately from `TurnOn`/`TurnOff` for the
/// particle forms ("turn lamp on").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verb {
    Take,
    Drop,
    Put,
    Wear,
    Remove,
    Inventory,
    Open,
    Close,
    Lock,
    Unlock,
    TurnOn,
    TurnOff,
    Turn,
    Burn,
    Extinguish,
    Inflate,
    Deflate,
    Go,
    Enter,
    Climb,
    Look,
    Examine,
    Read,
    Search,
    Attack,
    Ask,
    Tell,
    Yes,
    No,
    Save,
    Restore,
    Restart,
    Quit,
    Script,
    Unscript,
    Verbose,
    Brief,
    Score,
    Wait,
    Help,
    Xyzzy,
    Eat,
    Drink,
    Smell,
    Listen,
    Touch,
    Push,
    Pull,
    Wave,
    Jump,
    Shout,
    Pray,
    Sing,
    Sleep,
    Swim,
    Dig,
    Knock,
    Give,
    Throw,
    Smash,
}

impl Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            Verb::Take => "take",
            Verb::Drop => "drop",
            Verb::Put => "put",
            Verb::Wear => "wear",
            Verb::Remove => "remove",
            Verb::Inventory => "inventory",
            Verb::Open => "open",
            Verb::Close => "close",
            Verb::Lock => "lock",
            Verb::Unlock => "unlock",
            Verb::TurnOn => "turn on",
            Verb::TurnOff => "turn off",
            Verb::Turn => "turn",
            Verb::Burn => "burn",
            Verb::Extinguish => "extinguish",
            Verb::Inflate => "inflate",
            Verb::Deflate => "deflate",
            Verb::Go => "go",
            Verb::Enter => "enter",
            Verb::Climb => "climb",
            Verb::Look => "look",
            Verb::Examine => "examine",
            Verb::Read => "read",
            Verb::Search => "search",
            Verb::Attack => "attack",
            Verb::Ask => "ask",
            Verb::Tell => "tell",
            Verb::Yes => "yes",
            Verb::No => "no",
            Verb::Save => "save",
            Verb::Restore => "restore",
            Verb::Restart => "restart",
            Verb::Quit => "quit",
            Verb::Script => "script",
            Verb::Unscript => "unscript",
            Verb::Verbose => "verbose",
            Verb::Brief => "brief",
            Verb::Score => "score",
            Verb::Wait => "wait",
            Verb::Help => "help",
            Verb::Xyzzy => "xyzzy",
            Verb::Eat => "eat",
            Verb::Drink => "drink",
            Verb::Smell => "smell",
            Verb::Listen => "listen",
            Verb::Touch => "touch",
            Verb::Push => "push",
            Verb::Pull => "pull",
            Verb::Wave => "wave",
            Verb::Jump => "jump",
            Verb::Shout => "shout",
            Verb::Pray => "pray",
            Verb::Sing => "sing",
            Verb::Sleep => "sleep",
            Verb::Swim => "swim",
            Verb::Dig => "dig",
            Verb::Knock => "knock",
            Verb::Give => "give",
            Verb::Throw => "throw",
            Verb::Smash => "smash",
        };
        write!(f, "{word}")
    }
}

/// Ambient pseudo-entities players can name without them being items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Universal {
    Air,
    Ground,
    Sky,
    Myself,
}

impl Display for Universal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            Universal::Air => "air",
            Universal::Ground => "ground",
            Universal::Sky => "sky",
            Universal::Myself => "yourself",
        };
        write!(f, "{word}")
    }
}

/// A resolved object reference inside a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum EntityRef {
    Player,
    Item(Id),
    Location(Id),
    Universal(Universal),
}

impl EntityRef {
    /// The item id inside, if this reference names an item.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            EntityRef::Item(id) => Some(id),
            _ => None,
        }
    }
}

/// A fully parsed player command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub verb: Verb,
    pub dobj: Option<EntityRef>,
    pub iobj: Option<EntityRef>,
    /// Normalized preposition consumed by the matched syntax rule.
    pub prep: Option<String>,
    pub direction: Option<Direction>,
    /// Particles the matched rule consumed ("on" in "turn lamp on").
    pub particles: Vec<String>,
    /// The direct-object slot was ALL / EVERYTHING.
    pub is_all: bool,
    /// Raw noun phrases, kept for messages and conversation topics.
    pub dobj_phrase: Option<String>,
    pub iobj_phrase: Option<String>,
    /// The input line that produced this command.
    pub raw: String,
}

impl Command {
    /// Start a bare command for a verb.
    pub fn bare(verb: Verb) -> Self {
        Self {
            verb,
            dobj: None,
            iobj: None,
            prep: None,
            direction: None,
            particles: Vec::new(),
            is_all: false,
            dobj_phrase: None,
            iobj_phrase: None,
            raw: String::new(),
        }
    }

    /// Returns true when the matched rule consumed the given particle.
    pub fn has_particle(&self, word: &str) -> bool {
        self.particles.iter().any(|p| p == word)
    }

    /// Direct object's item id, when the direct object is an item.
    pub fn dobj_item(&self) -> Option<&str> {
        self.dobj.as_ref().and_then(EntityRef::item_id)
    }

    /// Indirect object's item id, when the indirect object is an item.
    pub fn iobj_item(&self) -> Option<&str> {
        self.iobj.as_ref().and_then(EntityRef::item_id)
    }
}
