//! The command parser: raw input to structured [`Command`].
//!
//! Parsing runs in stages: tokenize, strip noise words, shortcut bare
//! directions, identify the verb (longest phrase wins), try each of the
//! verb's syntax rules, and resolve noun phrases against current scope.
//! When no rule yields a command, the most specific error wins: a
//! resolution failure proves the sentence shape was understood, so it
//! outranks a grammar failure from some other rule.
//!
//! The parser never mutates state. Pronoun rebinding happens in the
//! engine after a successful action, not here.

use crate::command::{Command, EntityRef, Universal, Verb};
use crate::error::ParseError;
use crate::location::Direction;
use crate::scope::ScopeResolver;
use crate::vocab::{ObjCondition, Pattern, SyntaxRule, Vocabulary};
use crate::world::{Parent, World};

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9']+").expect("token regex is valid");
}

/// Parse one line of player input against the vocabulary and world state.
///
/// # Errors
/// Returns a [`ParseError`] describing the most specific failure when no
/// syntax rule of the identified verb produces a resolvable command.
pub fn parse(input: &str, vocab: &Vocabulary, world: &World) -> Result<Command, ParseError> {
    // Stage 1: tokenize
    let lowered = input.to_lowercase();
    let tokens: Vec<String> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect();

    // Stage 2: strip noise words
    let tokens: Vec<String> = tokens.into_iter().filter(|t| !vocab.is_noise(t)).collect();
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // Stage 3: a bare direction is shorthand for GO
    if tokens.len() == 1
        && let Some(direction) = vocab.direction(&tokens[0])
    {
        let mut command = Command::bare(Verb::Go);
        command.direction = Some(direction);
        command.raw = input.to_string();
        return Ok(command);
    }

    // Stage 4: identify the verb; longest phrase wins at each start index
    let (verb, verb_start, verb_end) = find_verb(&tokens, vocab).ok_or_else(|| ParseError::UnknownVerb(tokens[0].clone()))?;
    if verb_start > 0 {
        return Err(ParseError::BadGrammar(format!(
            "I didn't understand what \"{}\" was doing in that sentence.",
            tokens[..verb_start].join(" ")
        )));
    }
    let rest = &tokens[verb_end..];

    // Stages 5-7: try each syntax rule and keep the best failure
    let scope = ScopeResolver::new(world);
    let mut best_error: Option<ParseError> = None;
    for rule in vocab.rules_for(verb) {
        match try_rule(verb, rule, rest, input, vocab, world, &scope) {
            Ok(command) => return Ok(command),
            Err(error) => {
                let better = best_error
                    .as_ref()
                    .is_none_or(|best| error.specificity() > best.specificity());
                if better {
                    best_error = Some(error);
                }
            },
        }
    }

    Err(best_error.unwrap_or_else(|| {
        ParseError::BadGrammar(format!("I don't know how to \"{}\" like that.", verb))
    }))
}

/// Locate the first verb phrase in the token stream.
fn find_verb(tokens: &[String], vocab: &Vocabulary) -> Option<(Verb, usize, usize)> {
    let longest = vocab.max_verb_phrase().max(1).min(4);
    for start in 0..tokens.len() {
        let available = tokens.len() - start;
        for len in (1..=longest.min(available)).rev() {
            let phrase = tokens[start..start + len].join(" ");
            if let Some(verb) = vocab.verb(&phrase) {
                return Some((verb, start, start + len));
            }
        }
    }
    None
}

/// Tokens bound to the slots of one syntax rule, before resolution.
#[derive(Debug, Default)]
struct Binding {
    prep: Option<String>,
    direction: Option<Direction>,
    particles: Vec<String>,
    dobj_phrase: Option<Vec<String>>,
    iobj_phrase: Option<Vec<String>>,
    dobj_allows_all: bool,
}

fn try_rule(
    verb: Verb,
    rule: &SyntaxRule,
    tokens: &[String],
    raw: &str,
    vocab: &Vocabulary,
    world: &World,
    scope: &ScopeResolver,
) -> Result<Command, ParseError> {
    let binding = match_rule(rule, tokens, vocab)?;

    let mut command = Command::bare(verb);
    command.raw = raw.to_string();
    command.prep = binding.prep;
    command.direction = binding.direction;
    command.particles = binding.particles;

    if let Some(phrase) = &binding.dobj_phrase {
        command.dobj_phrase = Some(phrase.join(" "));
        match resolve_phrase(phrase, rule.dobj_cond, binding.dobj_allows_all, vocab, world, scope)? {
            Resolved::All => command.is_all = true,
            Resolved::Entity(entity) => command.dobj = Some(entity),
        }
    }
    if let Some(phrase) = &binding.iobj_phrase {
        command.iobj_phrase = Some(phrase.join(" "));
        match resolve_phrase(phrase, rule.iobj_cond, false, vocab, world, scope)? {
            Resolved::All => unreachable!("ALL is rejected for indirect objects"),
            Resolved::Entity(entity) => command.iobj = Some(entity),
        }
    }

    Ok(command)
}

/// Bind tokens to a rule's pattern without resolving anything.
fn match_rule(rule: &SyntaxRule, tokens: &[String], vocab: &Vocabulary) -> Result<Binding, ParseError> {
    let mut binding = Binding::default();
    let mut pos = 0;

    for (index, pattern) in rule.pattern.iter().enumerate() {
        let next = rule.pattern.get(index + 1);

        if pos >= tokens.len() {
            // Input ran out: acceptable only when nothing but object
            // slots remain, which then stay unfilled.
            if rule.pattern[index..].iter().all(is_object_slot) {
                break;
            }
            return Err(ParseError::BadGrammar("That sentence stopped short.".to_string()));
        }

        match pattern {
            Pattern::Particle(word) => {
                if tokens[pos] == *word {
                    binding.particles.push(tokens[pos].clone());
                    pos += 1;
                } else {
                    return Err(ParseError::BadGrammar(format!(
                        "I expected \"{word}\" there, not \"{}\".",
                        tokens[pos]
                    )));
                }
            },
            Pattern::Preposition => {
                let token = &tokens[pos];
                let acceptable = match rule.required_prep {
                    Some(required) => token == required,
                    None => vocab.is_preposition(token),
                };
                if !acceptable {
                    return Err(ParseError::BadGrammar(format!(
                        "\"{token}\" isn't the right connecting word there."
                    )));
                }
                binding.prep = Some(rule.required_prep.map_or_else(|| token.clone(), str::to_string));
                pos += 1;
            },
            Pattern::Direction => match vocab.direction(&tokens[pos]) {
                Some(direction) => {
                    binding.direction = Some(direction);
                    pos += 1;
                },
                None => {
                    return Err(ParseError::BadGrammar(format!(
                        "\"{}\" isn't a direction I know.",
                        tokens[pos]
                    )));
                },
            },
            Pattern::SpecificVerb(wanted) => {
                if vocab.verb(&tokens[pos]) == Some(*wanted) {
                    pos += 1;
                } else {
                    return Err(ParseError::BadGrammar(format!(
                        "I didn't expect \"{}\" there.",
                        tokens[pos]
                    )));
                }
            },
            Pattern::DirectObject | Pattern::DirectObjects | Pattern::IndirectObject | Pattern::IndirectObjects => {
                let mut phrase = Vec::new();
                while pos < tokens.len() && !next.is_some_and(|n| terminates_phrase(&tokens[pos], n, rule, vocab)) {
                    phrase.push(tokens[pos].clone());
                    pos += 1;
                }
                if phrase.is_empty() {
                    return Err(ParseError::BadGrammar("That sentence is missing something.".to_string()));
                }
                match pattern {
                    Pattern::DirectObject => binding.dobj_phrase = Some(phrase),
                    Pattern::DirectObjects => {
                        binding.dobj_phrase = Some(phrase);
                        binding.dobj_allows_all = true;
                    },
                    _ => binding.iobj_phrase = Some(phrase),
                }
            },
        }
    }

    if pos < tokens.len() {
        return Err(ParseError::BadGrammar(format!(
            "I didn't need the word{} \"{}\" there.",
            if tokens.len() - pos == 1 { "" } else { "s" },
            tokens[pos..].join(" ")
        )));
    }

    Ok(binding)
}

fn is_object_slot(pattern: &Pattern) -> bool {
    matches!(
        pattern,
        Pattern::DirectObject | Pattern::DirectObjects | Pattern::IndirectObject | Pattern::IndirectObjects
    )
}

/// Would this token satisfy the given upcoming pattern element?
fn terminates_phrase(token: &str, next: &Pattern, rule: &SyntaxRule, vocab: &Vocabulary) -> bool {
    match next {
        Pattern::Particle(word) => token == *word,
        Pattern::Preposition => match rule.required_prep {
            Some(required) => token == required,
            None => vocab.is_preposition(token),
        },
        Pattern::Direction => vocab.direction(token).is_some(),
        Pattern::SpecificVerb(wanted) => vocab.verb(token) == Some(*wanted),
        Pattern::DirectObject | Pattern::DirectObjects | Pattern::IndirectObject | Pattern::IndirectObjects => false,
    }
}

enum Resolved {
    Entity(EntityRef),
    All,
}

/// Resolve one noun phrase to an entity reference under a slot condition.
fn resolve_phrase(
    phrase: &[String],
    condition: ObjCondition,
    allow_all: bool,
    vocab: &Vocabulary,
    world: &World,
    scope: &ScopeResolver,
) -> Result<Resolved, ParseError> {
    if phrase.len() == 1 && vocab.is_all_word(&phrase[0]) {
        if allow_all {
            return Ok(Resolved::All);
        }
        return Err(ParseError::BadGrammar(format!(
            "You can't use \"{}\" there.",
            phrase[0]
        )));
    }

    // The noun is the last token that names an item or is a pronoun.
    let noun_index = phrase
        .iter()
        .rposition(|t| vocab.is_noun(t) || vocab.is_pronoun(t) || vocab.universal(t).is_some());
    let Some(noun_index) = noun_index else {
        let unknown = phrase.last().cloned().unwrap_or_default();
        return Err(ParseError::UnknownNoun(unknown));
    };
    let noun = &phrase[noun_index];
    let modifiers: Vec<String> = phrase[..noun_index]
        .iter()
        .filter(|t| vocab.verb(t).is_none() && !vocab.is_preposition(t) && vocab.direction(t).is_none())
        .cloned()
        .collect();

    if vocab.is_pronoun(noun) {
        return resolve_pronoun(noun, condition, world, scope);
    }

    if let Some(candidates) = vocab.noun_candidates(noun) {
        let in_scope: HashSet<&str> = candidates
            .iter()
            .filter(|id| meets_condition(id, condition, world, scope))
            .map(String::as_str)
            .collect();
        if in_scope.is_empty() {
            return Err(ParseError::ItemNotInScope(noun.clone()));
        }

        let matching: Vec<&str> = if modifiers.is_empty() {
            in_scope.into_iter().collect()
        } else {
            let filtered: Vec<&str> = in_scope
                .into_iter()
                .filter(|id| world.items.get(*id).is_some_and(|item| item.matches_modifiers(&modifiers)))
                .collect();
            if filtered.is_empty() {
                return Err(ParseError::ModifierMismatch {
                    noun: noun.clone(),
                    modifiers,
                });
            }
            filtered
        };

        if matching.len() > 1 {
            return Err(ParseError::Ambiguity(format!("Which {noun} do you mean?")));
        }
        return Ok(Resolved::Entity(EntityRef::Item(matching[0].to_string())));
    }

    if let Some(universal) = vocab.universal(noun) {
        let entity = match universal {
            Universal::Myself => EntityRef::Player,
            other => EntityRef::Universal(other),
        };
        return Ok(Resolved::Entity(entity));
    }

    Err(ParseError::UnknownNoun(noun.clone()))
}

fn resolve_pronoun(
    pronoun: &str,
    condition: ObjCondition,
    world: &World,
    scope: &ScopeResolver,
) -> Result<Resolved, ParseError> {
    let Some(bound) = world.pronoun(pronoun) else {
        return Err(ParseError::PronounNotSet(pronoun.to_string()));
    };
    let in_scope: Vec<&str> = bound
        .iter()
        .filter(|id| meets_condition(id, condition, world, scope))
        .map(String::as_str)
        .collect();
    match in_scope.as_slice() {
        [] => Err(ParseError::PronounOutOfScope(pronoun.to_string())),
        [only] => Ok(Resolved::Entity(EntityRef::Item((*only).to_string()))),
        _ => Err(ParseError::AmbiguousPronoun(pronoun.to_string())),
    }
}

/// Apply a rule's slot condition to one candidate id.
fn meets_condition(id: &str, condition: ObjCondition, world: &World, scope: &ScopeResolver) -> bool {
    let here = Parent::Location(world.player.location.clone());
    match condition {
        ObjCondition::Visible => scope.can_see(id) || scope.is_holding(id),
        ObjCondition::Reachable => scope.can_reach(id),
        ObjCondition::Held => scope.is_holding(id),
        ObjCondition::InRoom => scope.can_reach(id) && !scope.is_holding(id),
        ObjCondition::OnGround => world.items.get(id).is_some_and(|item| item.parent == here),
        ObjCondition::Person => {
            scope.can_see(id)
                && world
                    .items
                    .get(id)
                    .is_some_and(|item| item.has(crate::item::ItemFlag::Character))
        },
        ObjCondition::Container => {
            scope.can_reach(id)
                && world
                    .items
                    .get(id)
                    .is_some_and(|item| item.has(crate::item::ItemFlag::Container))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemFlag};
    use crate::location::Location;

    fn test_vocab() -> Vocabulary {
        let mut vocab = Vocabulary::new();
        vocab.register_verb(
            Verb::Take,
            &["take", "get", "pick up"],
            vec![SyntaxRule::new(vec![Pattern::DirectObjects]).dobj(ObjCondition::Visible)],
        );
        vocab.register_verb(
            Verb::Drop,
            &["drop"],
            vec![SyntaxRule::new(vec![Pattern::DirectObjects]).dobj(ObjCondition::Held)],
        );
        vocab.register_verb(
            Verb::Put,
            &["put", "place"],
            vec![
                SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                    .with_prep("in")
                    .dobj(ObjCondition::Held)
                    .iobj(ObjCondition::Container),
                SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                    .with_prep("on")
                    .dobj(ObjCondition::Held),
            ],
        );
        vocab.register_verb(
            Verb::Unlock,
            &["unlock"],
            vec![
                SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                    .with_prep("with")
                    .iobj(ObjCondition::Held),
                SyntaxRule::new(vec![Pattern::DirectObject]),
            ],
        );
        vocab.register_verb(Verb::Look, &["look", "l"], vec![SyntaxRule::new(vec![])]);
        vocab.register_verb(
            Verb::Go,
            &["go", "walk"],
            vec![SyntaxRule::new(vec![Pattern::Direction])],
        );
        vocab.register_verb(
            Verb::Turn,
            &["turn"],
            vec![
                SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Particle("on")]),
                SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Particle("off")]),
            ],
        );
        vocab.register_verb(
            Verb::Examine,
            &["examine", "x", "look at"],
            vec![SyntaxRule::new(vec![Pattern::DirectObject])],
        );
        vocab
    }

    fn test_world() -> World {
        let mut world = World::new_empty();
        world.locations.insert(
            "den".into(),
            Location {
                id: "den".into(),
                name: "Den".into(),
                description: "A cozy den.".into(),
                lit: true,
                ..Location::default()
            },
        );
        world.player.location = "den".into();

        for (id, name, adjectives) in [
            ("red-apple", "red apple", vec!["red"]),
            ("green-apple", "green apple", vec!["green"]),
            ("brass-lantern", "brass lantern", vec!["brass"]),
            ("oak-table", "oak table", vec!["oak"]),
            ("iron-key", "iron key", vec!["iron"]),
        ] {
            let mut item = Item {
                id: id.into(),
                name: name.into(),
                parent: Parent::Location("den".into()),
                size: 1,
                capacity: -1,
                ..Item::default()
            };
            for adj in adjectives {
                item.adjectives.insert(adj.into());
            }
            item.set(ItemFlag::Takable);
            world.items.insert(id.into(), item);
        }
        world.items.get_mut("oak-table").unwrap().set(ItemFlag::Surface);
        world
    }

    fn vocab_for(world: &World) -> Vocabulary {
        let mut vocab = test_vocab();
        for item in world.items.values() {
            vocab.add_item(item);
        }
        vocab
    }

    #[test]
    fn empty_and_noise_only_input() {
        let world = test_world();
        let vocab = vocab_for(&world);
        assert_eq!(parse("", &vocab, &world), Err(ParseError::EmptyInput));
        assert_eq!(parse("the a an", &vocab, &world), Err(ParseError::EmptyInput));
    }

    #[test]
    fn unknown_verb_reports_first_word() {
        let world = test_world();
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("florble the lantern", &vocab, &world),
            Err(ParseError::UnknownVerb("florble".into()))
        );
    }

    #[test]
    fn bare_direction_becomes_go() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("ne", &vocab, &world).unwrap();
        assert_eq!(command.verb, Verb::Go);
        assert_eq!(command.direction, Some(Direction::Northeast));
    }

    #[test]
    fn multiword_verb_phrase_wins_over_single_word() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("pick up the lantern", &vocab, &world).unwrap();
        assert_eq!(command.verb, Verb::Take);
        assert_eq!(command.dobj, Some(EntityRef::Item("brass-lantern".into())));
    }

    #[test]
    fn simple_take_resolves_item() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("take lantern", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Item("brass-lantern".into())));
        assert!(!command.is_all);
    }

    #[test]
    fn ambiguous_noun_asks_which() {
        let world = test_world();
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take apple", &vocab, &world),
            Err(ParseError::Ambiguity("Which apple do you mean?".into()))
        );
    }

    #[test]
    fn modifier_disambiguates() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("take red apple", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Item("red-apple".into())));
    }

    #[test]
    fn wrong_modifier_is_mismatch() {
        let world = test_world();
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take blue apple", &vocab, &world),
            Err(ParseError::ModifierMismatch {
                noun: "apple".into(),
                modifiers: vec!["blue".into()],
            })
        );
    }

    #[test]
    fn take_all_sets_is_all() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("take all", &vocab, &world).unwrap();
        assert!(command.is_all);
        assert!(command.dobj.is_none());
    }

    #[test]
    fn all_rejected_in_indirect_slot() {
        let mut world = test_world();
        world.items.get_mut("iron-key").unwrap().parent = Parent::Player;
        let vocab = vocab_for(&world);
        let err = parse("put key in everything", &vocab, &world).unwrap_err();
        assert!(matches!(err, ParseError::BadGrammar(_)));
    }

    #[test]
    fn required_preposition_selects_rule() {
        let mut world = test_world();
        world.items.get_mut("red-apple").unwrap().parent = Parent::Player;
        let vocab = vocab_for(&world);

        let command = parse("put red apple on oak table", &vocab, &world).unwrap();
        assert_eq!(command.prep.as_deref(), Some("on"));
        assert_eq!(command.iobj, Some(EntityRef::Item("oak-table".into())));
    }

    #[test]
    fn held_condition_filters_candidates() {
        let world = test_world();
        let vocab = vocab_for(&world);
        // apple is on the floor, not held, so the Held slot can't see it
        assert_eq!(
            parse("drop red apple", &vocab, &world),
            Err(ParseError::ItemNotInScope("apple".into()))
        );
    }

    #[test]
    fn early_end_leaves_object_slots_unfilled() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("unlock lantern", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Item("brass-lantern".into())));
        assert!(command.iobj.is_none());
    }

    #[test]
    fn leftover_tokens_are_bad_grammar() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let err = parse("look lantern quickly", &vocab, &world).unwrap_err();
        assert!(matches!(err, ParseError::BadGrammar(_)));
    }

    #[test]
    fn particles_reach_the_command() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("turn lantern on", &vocab, &world).unwrap();
        assert_eq!(command.verb, Verb::Turn);
        assert!(command.has_particle("on"));
        assert_eq!(command.dobj, Some(EntityRef::Item("brass-lantern".into())));
    }

    #[test]
    fn pronoun_unset_then_bound_then_resolved() {
        let mut world = test_world();
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take it", &vocab, &world),
            Err(ParseError::PronounNotSet("it".into()))
        );

        world.set_pronoun("it", ["red-apple".to_string()]);
        let command = parse("take it", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Item("red-apple".into())));
    }

    #[test]
    fn stale_pronoun_out_of_scope() {
        let mut world = test_world();
        world.set_pronoun("it", ["red-apple".to_string()]);
        world.items.get_mut("red-apple").unwrap().parent = Parent::Nowhere;
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take it", &vocab, &world),
            Err(ParseError::PronounOutOfScope("it".into()))
        );
    }

    #[test]
    fn ambiguous_pronoun_reference() {
        let mut world = test_world();
        world.set_pronoun("them", ["red-apple".to_string(), "green-apple".to_string()]);
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take them", &vocab, &world),
            Err(ParseError::AmbiguousPronoun("them".into()))
        );
    }

    #[test]
    fn universal_nouns_resolve() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let command = parse("examine sky", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Universal(Universal::Sky)));

        let command = parse("examine me", &vocab, &world).unwrap();
        assert_eq!(command.dobj, Some(EntityRef::Player));
    }

    #[test]
    fn resolution_errors_beat_grammar_errors_across_rules() {
        let mut world = test_world();
        world.items.get_mut("iron-key").unwrap().parent = Parent::Player;
        let vocab = vocab_for(&world);
        // "unlock table with banana": rule matches shape, banana is unknown
        let err = parse("unlock table with banana", &vocab, &world).unwrap_err();
        assert_eq!(err, ParseError::UnknownNoun("banana".into()));
    }

    #[test]
    fn darkness_empties_resolution_scope() {
        let mut world = test_world();
        world.locations.get_mut("den").unwrap().lit = false;
        let vocab = vocab_for(&world);
        assert_eq!(
            parse("take lantern", &vocab, &world),
            Err(ParseError::ItemNotInScope("lantern".into()))
        );
    }

    #[test]
    fn parser_is_deterministic() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let first = parse("take red apple", &vocab, &world);
        for _ in 0..20 {
            assert_eq!(parse("take red apple", &vocab, &world), first);
        }
    }

    #[test]
    fn parse_attempts_do_not_mutate_state() {
        let world = test_world();
        let vocab = vocab_for(&world);
        let before = serde_json::to_string(&world).unwrap();
        let _ = parse("take apple", &vocab, &world);
        let _ = parse("take blue apple", &vocab, &world);
        let _ = parse("florble", &vocab, &world);
        let after = serde_json::to_string(&world).unwrap();
        assert_eq!(before, after);
    }
}
