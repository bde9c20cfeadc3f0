//! The action layer: handler trait, context, and declarative results.
//!
//! Each verb is implemented by a value with a common capability set:
//! the syntax rules and synonym words it contributes to the vocabulary,
//! whether it needs light or consumes a turn, and a `process` function.
//! Handlers receive an immutable view of the world and *describe* what
//! should happen; the engine applies the returned [`StateChange`]s
//! atomically and carries out the [`SideEffect`]s.

use crate::Id;
use crate::change::StateChange;
use crate::command::{Command, Verb};
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag};
use crate::messages::Messenger;
use crate::scope::ScopeResolver;
use crate::vocab::{SyntaxRule, Vocabulary};
use crate::world::{PendingQuestion, World};

use log::warn;
use std::collections::HashMap;

/// Everything a handler may consult while deciding what happens.
pub struct ActionContext<'a> {
    pub world: &'a World,
    pub scope: &'a ScopeResolver<'a>,
    pub command: &'a Command,
    pub messenger: &'a dyn Messenger,
}

impl<'a> ActionContext<'a> {
    /// The direct object as an item, or the appropriate refusal: a
    /// "do what?" prompt when the slot is empty, and a polite brush-off
    /// when the player targeted themself or an ambient noun.
    ///
    /// # Errors
    /// - [`ActionResponse::DoWhat`] when the command has no direct object
    /// - [`ActionResponse::Feedback`] for player/universal targets
    /// - [`ActionResponse::InternalEngineError`] when the parser produced
    ///   an id the world no longer knows
    pub fn dobj_item(&self) -> Result<&'a Item, ActionResponse> {
        self.slot_item(self.command.dobj.as_ref())
    }

    /// The indirect object as an item, or the appropriate refusal.
    ///
    /// # Errors
    /// Same as [`ActionContext::dobj_item`].
    pub fn iobj_item(&self) -> Result<&'a Item, ActionResponse> {
        self.slot_item(self.command.iobj.as_ref())
    }

    fn slot_item(&self, slot: Option<&crate::command::EntityRef>) -> Result<&'a Item, ActionResponse> {
        use crate::command::EntityRef;
        let verb = self.command.verb.to_string();
        match slot {
            None => Err(ActionResponse::DoWhat(verb)),
            Some(EntityRef::Item(id)) => self.item(id),
            Some(EntityRef::Player) => Err(ActionResponse::Feedback(self.messenger.self_target_refusal(&verb))),
            Some(EntityRef::Universal(universal)) => Err(ActionResponse::Feedback(
                self.messenger.universal_response(&verb, &universal.to_string()),
            )),
            Some(EntityRef::Location(_)) => {
                warn!("handler got a location reference for verb '{verb}'");
                Err(ActionResponse::InternalEngineError)
            },
        }
    }

    /// Look up an item the parser already resolved.
    ///
    /// # Errors
    /// - [`ActionResponse::InternalEngineError`] if the id is unknown
    pub fn item(&self, id: &str) -> Result<&'a Item, ActionResponse> {
        self.world.items.get(id).ok_or_else(|| {
            warn!("resolved item id '{id}' vanished before handling");
            ActionResponse::InternalEngineError
        })
    }

    /// Refuse unless the item can be physically reached.
    ///
    /// # Errors
    /// - [`ActionResponse::ItemNotAccessible`] otherwise
    pub fn require_reachable(&self, item: &Item) -> Result<(), ActionResponse> {
        if self.scope.can_reach(&item.id) || self.scope.is_holding(&item.id) {
            Ok(())
        } else {
            Err(ActionResponse::ItemNotAccessible(item.name.clone()))
        }
    }

    /// Refuse unless the player is holding the item.
    ///
    /// # Errors
    /// - [`ActionResponse::ItemNotHeld`] otherwise
    pub fn require_held(&self, item: &Item) -> Result<(), ActionResponse> {
        if self.scope.is_holding(&item.id) {
            Ok(())
        } else {
            Err(ActionResponse::ItemNotHeld(item.name.clone()))
        }
    }
}

/// Shorthand for the ubiquitous "mark this item touched" change.
pub fn touch(id: &str) -> StateChange {
    StateChange::SetFlag {
        item: id.to_string(),
        flag: ItemFlag::Touched,
    }
}

/// Requests a handler makes of the engine beyond state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    ScheduleFuse { id: Id, turns: usize },
    CancelFuse { id: Id },
    StartDaemon { id: Id, period: usize },
    StopDaemon { id: Id },
    /// Pose a yes/no question answered on a later turn.
    AskQuestion(PendingQuestion),
    /// Answer the currently pending question.
    AnswerQuestion(bool),
    RequestQuit,
    RequestRestart,
    RequestSave(Option<String>),
    RequestRestore(Option<String>),
    TranscriptOn,
    TranscriptOff,
    SetVerbose(bool),
    /// Begin turn-based combat against a character item.
    StartCombat { enemy: Id },
    /// Re-print the full location description after this action.
    RefreshRoom,
}

/// What a handler decided should happen.
#[derive(Debug, Clone, Default)]
pub struct ActionResult {
    /// Narrative for the action itself; may be empty.
    pub message: String,
    /// State mutations, applied atomically and in order.
    pub changes: Vec<StateChange>,
    /// Engine requests carried out after the changes land.
    pub effects: Vec<SideEffect>,
    /// Items this action meaningfully handled; feeds the pronoun table.
    pub handled: Vec<Id>,
}

impl ActionResult {
    /// A result that only says something.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn and_change(mut self, change: StateChange) -> Self {
        self.changes.push(change);
        self
    }

    pub fn and_effect(mut self, effect: SideEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn and_handled(mut self, id: &str) -> Self {
        self.handled.push(id.to_string());
        self
    }
}

/// A verb's implementation.
///
/// `process` is pure with respect to the world: it validates against the
/// context and returns a declarative result, or an [`ActionResponse`]
/// refusal that costs the player no turn.
pub trait ActionHandler {
    /// The verb this handler implements.
    fn verb(&self) -> Verb;
    /// Words and phrases that select this verb.
    fn synonyms(&self) -> &'static [&'static str];
    /// The argument shapes this verb accepts.
    fn syntax(&self) -> Vec<SyntaxRule>;
    /// Fail early with `roomIsDark` when the player can't see.
    fn requires_light(&self) -> bool {
        true
    }
    /// Whether a successful action advances the game clock.
    fn consumes_turn(&self) -> bool {
        true
    }
    /// Decide what happens.
    ///
    /// # Errors
    /// An [`ActionResponse`] describing why the action is refused.
    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse>;
}

/// All registered verb handlers for a running game.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Verb, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; a later registration for the same verb wins,
    /// which lets games shadow a built-in.
    pub fn register(&mut self, handler: Box<dyn ActionHandler>) {
        let verb = handler.verb();
        if self.handlers.insert(verb, handler).is_some() {
            warn!("handler for verb '{verb}' was replaced");
        }
    }

    /// Handler for a verb, if registered.
    pub fn get(&self, verb: Verb) -> Option<&dyn ActionHandler> {
        self.handlers.get(&verb).map(Box::as_ref)
    }

    /// Contribute every handler's synonyms and syntax to a vocabulary.
    pub fn install_into(&self, vocab: &mut Vocabulary) {
        for handler in self.handlers.values() {
            vocab.register_verb(handler.verb(), handler.synonyms(), handler.syntax());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Pattern;

    struct NullHandler(Verb);
    impl ActionHandler for NullHandler {
        fn verb(&self) -> Verb {
            self.0
        }
        fn synonyms(&self) -> &'static [&'static str] {
            &["null"]
        }
        fn syntax(&self) -> Vec<SyntaxRule> {
            vec![SyntaxRule::new(vec![Pattern::DirectObject])]
        }
        fn process(&self, _ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
            Ok(ActionResult::with_message("null."))
        }
    }

    #[test]
    fn registry_lookup_and_replacement() {
        let mut registry = HandlerRegistry::new();
        registry.register(Box::new(NullHandler(Verb::Wave)));
        assert!(registry.get(Verb::Wave).is_some());
        assert!(registry.get(Verb::Jump).is_none());

        // second registration shadows the first
        registry.register(Box::new(NullHandler(Verb::Wave)));
        assert!(registry.get(Verb::Wave).is_some());
    }

    #[test]
    fn registry_installs_vocabulary() {
        let mut registry = HandlerRegistry::new();
        registry.register(Box::new(NullHandler(Verb::Wave)));
        let mut vocab = Vocabulary::new();
        registry.install_into(&mut vocab);
        assert_eq!(vocab.verb("null"), Some(Verb::Wave));
        assert_eq!(vocab.rules_for(Verb::Wave).len(), 1);
    }

    #[test]
    fn action_result_builders_accumulate() {
        let result = ActionResult::with_message("Done.")
            .and_change(touch("lamp"))
            .and_effect(SideEffect::RefreshRoom)
            .and_handled("lamp");
        assert_eq!(result.message, "Done.");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.effects, vec![SideEffect::RefreshRoom]);
        assert_eq!(result.handled, vec!["lamp".to_string()]);
    }
}
