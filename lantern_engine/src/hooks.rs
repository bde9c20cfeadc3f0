//! Game-registered hooks: event effects, verb overrides, and turn hooks.
//!
//! Save files carry only data; behavior lives here. A game registers its
//! closures at startup under stable ids, and the serialized state refers
//! to them by id alone. Restoring a save against the same registrations
//! reproduces the same reachable actions.

use crate::Id;
use crate::action::{ActionContext, ActionResult, SideEffect};
use crate::change::StateChange;
use crate::command::{Command, Verb};
use crate::error::ActionResponse;
use crate::world::World;

use std::collections::HashMap;

/// What a fired event or after-turn hook contributes to the turn.
#[derive(Debug, Clone, Default)]
pub struct EventOutcome {
    pub message: Option<String>,
    pub changes: Vec<StateChange>,
    pub effects: Vec<SideEffect>,
}

/// Effect of a fuse or daemon, looked up by the event's id when it fires.
pub type EventFn = Box<dyn Fn(&World) -> EventOutcome>;

/// Per-item verb override, consulted before the default handler.
/// Returning `None` lets the default behavior proceed.
pub type OverrideFn = Box<dyn Fn(&ActionContext) -> Option<Result<ActionResult, ActionResponse>>>;

/// Location hook run before the action; `Some` preempts the action.
pub type BeforeTurnFn = Box<dyn Fn(&ActionContext) -> Option<ActionResult>>;

/// Location hook run after the action lands.
pub type AfterTurnFn = Box<dyn Fn(&World, &Command) -> Option<EventOutcome>>;

/// All behavior a game layers onto the engine.
#[derive(Default)]
pub struct GameHooks {
    events: HashMap<Id, EventFn>,
    overrides: HashMap<(Id, Verb), OverrideFn>,
    before_turn: HashMap<Id, BeforeTurnFn>,
    after_turn: HashMap<Id, AfterTurnFn>,
}

impl GameHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the effect for a scheduled event id.
    pub fn on_event(&mut self, id: &str, effect: impl Fn(&World) -> EventOutcome + 'static) {
        self.events.insert(id.to_string(), Box::new(effect));
    }

    /// Intercept a verb aimed at a specific item.
    pub fn override_verb(
        &mut self,
        item: &str,
        verb: Verb,
        hook: impl Fn(&ActionContext) -> Option<Result<ActionResult, ActionResponse>> + 'static,
    ) {
        self.overrides.insert((item.to_string(), verb), Box::new(hook));
    }

    /// Run before each action taken in a location; may preempt it.
    pub fn before_turn_in(&mut self, location: &str, hook: impl Fn(&ActionContext) -> Option<ActionResult> + 'static) {
        self.before_turn.insert(location.to_string(), Box::new(hook));
    }

    /// Run after each action taken in a location.
    pub fn after_turn_in(
        &mut self,
        location: &str,
        hook: impl Fn(&World, &Command) -> Option<EventOutcome> + 'static,
    ) {
        self.after_turn.insert(location.to_string(), Box::new(hook));
    }

    pub fn event(&self, id: &str) -> Option<&EventFn> {
        self.events.get(id)
    }

    pub fn override_for(&self, item: &str, verb: Verb) -> Option<&OverrideFn> {
        self.overrides.get(&(item.to_string(), verb))
    }

    pub fn before_turn_for(&self, location: &str) -> Option<&BeforeTurnFn> {
        self.before_turn.get(location)
    }

    pub fn after_turn_for(&self, location: &str) -> Option<&AfterTurnFn> {
        self.after_turn.get(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_registration_and_lookup() {
        let mut hooks = GameHooks::new();
        hooks.on_event("butter-softens", |_world| EventOutcome {
            message: Some("The butter softens.".into()),
            ..EventOutcome::default()
        });

        let world = World::new_empty();
        let outcome = hooks.event("butter-softens").map(|f| f(&world)).unwrap();
        assert_eq!(outcome.message.as_deref(), Some("The butter softens."));
        assert!(hooks.event("missing").is_none());
    }

    #[test]
    fn override_keyed_by_item_and_verb() {
        let mut hooks = GameHooks::new();
        hooks.override_verb("monolith", Verb::Touch, |_ctx| {
            Some(Ok(ActionResult::with_message("The monolith hums.")))
        });
        assert!(hooks.override_for("monolith", Verb::Touch).is_some());
        assert!(hooks.override_for("monolith", Verb::Take).is_none());
        assert!(hooks.override_for("pebble", Verb::Touch).is_none());
    }
}
