//! Word-level lookup tables used during parsing.
//!
//! The vocabulary is assembled at startup from three sources: the engine's
//! built-in word lists, the syntax rules and synonyms each verb handler
//! declares, and the nouns/adjectives contributed by every item in the
//! loaded world. Games may layer extra verb synonyms and noise words on
//! top through their `VocabDef`.

use crate::Id;
use crate::command::{Universal, Verb};
use crate::item::Item;
use crate::location::Direction;

use lazy_static::lazy_static;
use log::warn;
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref PREPOSITIONS: HashSet<&'static str> = [
        "about", "at", "behind", "below", "beneath", "down", "for", "from", "in", "inside", "into",
        "off", "on", "onto", "out", "over", "through", "to", "under", "up", "with",
    ]
    .into_iter()
    .collect();
    static ref NOISE_WORDS: HashSet<&'static str> =
        ["the", "a", "an", "some", "of", "please", "my", "that", "this"].into_iter().collect();
    static ref PRONOUN_WORDS: HashSet<&'static str> = ["it", "them", "him", "her"].into_iter().collect();
    static ref ALL_WORDS: HashSet<&'static str> = ["all", "everything"].into_iter().collect();
    static ref DIRECTION_WORDS: HashMap<&'static str, Direction> = [
        ("north", Direction::North),
        ("n", Direction::North),
        ("south", Direction::South),
        ("s", Direction::South),
        ("east", Direction::East),
        ("e", Direction::East),
        ("west", Direction::West),
        ("w", Direction::West),
        ("northeast", Direction::Northeast),
        ("ne", Direction::Northeast),
        ("northwest", Direction::Northwest),
        ("nw", Direction::Northwest),
        ("southeast", Direction::Southeast),
        ("se", Direction::Southeast),
        ("southwest", Direction::Southwest),
        ("sw", Direction::Southwest),
        ("up", Direction::Up),
        ("u", Direction::Up),
        ("down", Direction::Down),
        ("d", Direction::Down),
        ("out", Direction::Out),
    ]
    .into_iter()
    .collect();
    static ref UNIVERSAL_WORDS: HashMap<&'static str, Universal> = [
        ("air", Universal::Air),
        ("ground", Universal::Ground),
        ("floor", Universal::Ground),
        ("sky", Universal::Sky),
        ("me", Universal::Myself),
        ("self", Universal::Myself),
        ("myself", Universal::Myself),
    ]
    .into_iter()
    .collect();
}

/// One element of a syntax-rule pattern.
///
/// The leading verb is implicit; patterns describe what follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    DirectObject,
    /// Like `DirectObject` but also accepts ALL.
    DirectObjects,
    IndirectObject,
    IndirectObjects,
    /// Any known preposition (constrained by the rule's `required_prep`).
    Preposition,
    /// A specific fixed word, e.g. "on" in "turn lamp on".
    Particle(&'static str),
    Direction,
    /// A word that resolves to the given verb ("look" in "climb look"... rare,
    /// but part of the pattern language).
    SpecificVerb(Verb),
}

/// Constraint applied to an object slot when resolving its noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjCondition {
    /// Visible from here (the default).
    #[default]
    Visible,
    /// Physically touchable.
    Reachable,
    /// Carried by the player.
    Held,
    /// In the current location and not carried.
    InRoom,
    /// Directly on the location's floor.
    OnGround,
    /// A character.
    Person,
    /// A container.
    Container,
}

/// One way a verb's arguments may be phrased.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxRule {
    pub pattern: Vec<Pattern>,
    /// When present, the `Preposition` slot must match this exact word.
    pub required_prep: Option<&'static str>,
    pub dobj_cond: ObjCondition,
    pub iobj_cond: ObjCondition,
}

impl SyntaxRule {
    pub fn new(pattern: Vec<Pattern>) -> Self {
        Self {
            pattern,
            required_prep: None,
            dobj_cond: ObjCondition::default(),
            iobj_cond: ObjCondition::default(),
        }
    }

    pub fn with_prep(mut self, prep: &'static str) -> Self {
        self.required_prep = Some(prep);
        self
    }

    pub fn dobj(mut self, cond: ObjCondition) -> Self {
        self.dobj_cond = cond;
        self
    }

    pub fn iobj(mut self, cond: ObjCondition) -> Self {
        self.iobj_cond = cond;
        self
    }
}

/// The assembled word tables for one loaded game.
#[derive(Debug, Default)]
pub struct Vocabulary {
    verbs: HashMap<String, Verb>,
    nouns: HashMap<String, HashSet<Id>>,
    adjectives: HashSet<String>,
    extra_noise: HashSet<String>,
    syntax: HashMap<Verb, Vec<SyntaxRule>>,
    /// Longest registered verb phrase, in words.
    max_verb_phrase: usize,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a verb's synonym words (single- or multi-word) and rules.
    pub fn register_verb(&mut self, verb: Verb, synonyms: &[&str], rules: Vec<SyntaxRule>) {
        for synonym in synonyms {
            let word = synonym.to_lowercase();
            let words = word.split_whitespace().count();
            self.max_verb_phrase = self.max_verb_phrase.max(words);
            if let Some(existing) = self.verbs.insert(word, verb) {
                if existing != verb {
                    warn!("verb word '{synonym}' remapped from {existing:?} to {verb:?}");
                }
            }
        }
        self.syntax.entry(verb).or_default().extend(rules);
    }

    /// Map an extra word onto an already-registered verb word.
    pub fn add_verb_synonym(&mut self, word: &str, canonical: &str) {
        let canonical = canonical.to_lowercase();
        match self.verbs.get(&canonical) {
            Some(verb) => {
                let verb = *verb;
                self.register_verb(verb, &[word], Vec::new());
            },
            None => warn!("verb synonym '{word}' targets unknown verb word '{canonical}'"),
        }
    }

    /// Add an item's nouns and adjectives to the tables.
    pub fn add_item(&mut self, item: &Item) {
        if let Some(noun) = item.name.split_whitespace().last() {
            self.add_noun(noun, &item.id);
        }
        for synonym in &item.synonyms {
            self.add_noun(synonym, &item.id);
        }
        for adjective in &item.adjectives {
            self.adjectives.insert(adjective.to_lowercase());
        }
    }

    fn add_noun(&mut self, word: &str, id: &str) {
        self.nouns
            .entry(word.to_lowercase())
            .or_default()
            .insert(id.to_string());
    }

    /// Add a game-specific noise word.
    pub fn add_noise_word(&mut self, word: &str) {
        self.extra_noise.insert(word.to_lowercase());
    }

    /// Look up the verb for an exact word or space-joined phrase.
    pub fn verb(&self, phrase: &str) -> Option<Verb> {
        self.verbs.get(phrase).copied()
    }

    /// Longest registered verb phrase, in words.
    pub fn max_verb_phrase(&self) -> usize {
        self.max_verb_phrase
    }

    /// Syntax rules for a verb, in declaration order.
    pub fn rules_for(&self, verb: Verb) -> &[SyntaxRule] {
        self.syntax.get(&verb).map_or(&[], Vec::as_slice)
    }

    /// Item ids a noun word may refer to.
    pub fn noun_candidates(&self, word: &str) -> Option<&HashSet<Id>> {
        self.nouns.get(word)
    }

    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains_key(word)
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        PREPOSITIONS.contains(word)
    }

    pub fn is_noise(&self, word: &str) -> bool {
        NOISE_WORDS.contains(word) || self.extra_noise.contains(word)
    }

    pub fn is_pronoun(&self, word: &str) -> bool {
        PRONOUN_WORDS.contains(word)
    }

    pub fn is_all_word(&self, word: &str) -> bool {
        ALL_WORDS.contains(word)
    }

    pub fn direction(&self, word: &str) -> Option<Direction> {
        // "in" and "inside" are claimed by the preposition table; the
        // remaining direction words are unambiguous.
        DIRECTION_WORDS.get(word).copied()
    }

    pub fn universal(&self, word: &str) -> Option<Universal> {
        UNIVERSAL_WORDS.get(word).copied()
    }

    /// Returns true when any table knows this word.
    pub fn knows_word(&self, word: &str) -> bool {
        self.verbs.contains_key(word)
            || self.nouns.contains_key(word)
            || self.adjectives.contains(word)
            || self.is_preposition(word)
            || self.is_noise(word)
            || self.is_pronoun(word)
            || self.is_all_word(word)
            || self.direction(word).is_some()
            || self.universal(word).is_some()
    }
}
