//! The long tail of verbs: consumption, senses, fidgeting, and throwing
//! things at other things.
//!
//! Most of these just produce flavor through the messenger and mark the
//! target touched; games layer real behavior on top with per-item verb
//! overrides.

use crate::action::{ActionContext, ActionHandler, ActionResult, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::ItemFlag;
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};
use crate::world::Parent;

/// EAT: edible things vanish when eaten.
pub struct EatHandler;

impl ActionHandler for EatHandler {
    fn verb(&self) -> Verb {
        Verb::Eat
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["eat", "devour", "taste"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Edible) {
            return Err(ActionResponse::CannotDo {
                verb: "eat".into(),
                item: item.name.clone(),
            });
        }
        Ok(ActionResult::with_message(ctx.messenger.eaten(&item.name))
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Nowhere,
                was: Some(item.parent.clone()),
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// DRINK: like EAT, for liquids.
pub struct DrinkHandler;

impl ActionHandler for DrinkHandler {
    fn verb(&self) -> Verb {
        Verb::Drink
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["drink", "sip", "quaff"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Drinkable) {
            return Err(ActionResponse::CannotDo {
                verb: "drink".into(),
                item: item.name.clone(),
            });
        }
        Ok(ActionResult::with_message(ctx.messenger.drunk(&item.name))
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Nowhere,
                was: Some(item.parent.clone()),
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// Flavor verbs aimed at a target: respond through the messenger and
/// mark the target touched.
macro_rules! flavor_handler {
    ($name:ident, $verb:expr, $synonyms:expr, $targeted:ident) => {
        pub struct $name;

        impl ActionHandler for $name {
            fn verb(&self) -> Verb {
                $verb
            }
            fn synonyms(&self) -> &'static [&'static str] {
                $synonyms
            }
            fn syntax(&self) -> Vec<SyntaxRule> {
                vec![SyntaxRule::new(vec![Pattern::DirectObject])]
            }
            fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
                let item = ctx.dobj_item()?;
                ctx.require_reachable(item)?;
                Ok(ActionResult::with_message(ctx.messenger.$targeted(&item.name))
                    .and_change(touch(&item.id))
                    .and_handled(&item.id))
            }
        }
    };
}

/// Flavor verbs with no object at all.
macro_rules! bare_handler {
    ($name:ident, $verb:expr, $synonyms:expr, $message:ident) => {
        pub struct $name;

        impl ActionHandler for $name {
            fn verb(&self) -> Verb {
                $verb
            }
            fn synonyms(&self) -> &'static [&'static str] {
                $synonyms
            }
            fn syntax(&self) -> Vec<SyntaxRule> {
                vec![SyntaxRule::new(vec![])]
            }
            fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
                Ok(ActionResult::with_message(ctx.messenger.$message()))
            }
        }
    };
}

bare_handler!(JumpHandler, Verb::Jump, &["jump", "leap", "hop"], jump);
bare_handler!(ShoutHandler, Verb::Shout, &["shout", "yell", "scream"], shout);
bare_handler!(PrayHandler, Verb::Pray, &["pray"], pray);
bare_handler!(SingHandler, Verb::Sing, &["sing", "hum"], sing);
bare_handler!(SleepHandler, Verb::Sleep, &["sleep", "nap"], sleep);
bare_handler!(SwimHandler, Verb::Swim, &["swim", "wade"], swim);

/// SMELL, bare or targeted.
pub struct SmellHandler;

impl ActionHandler for SmellHandler {
    fn verb(&self) -> Verb {
        Verb::Smell
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["smell", "sniff"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject]),
            SyntaxRule::new(vec![]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        if ctx.command.dobj.is_none() {
            return Ok(ActionResult::with_message(ctx.messenger.smell_nothing()));
        }
        let item = ctx.dobj_item()?;
        Ok(ActionResult::with_message(ctx.messenger.smell_nothing())
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// LISTEN, bare or LISTEN TO <thing>.
pub struct ListenHandler;

impl ActionHandler for ListenHandler {
    fn verb(&self) -> Verb {
        Verb::Listen
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["listen"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::Preposition, Pattern::DirectObject]).with_prep("to"),
            SyntaxRule::new(vec![]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        Ok(ActionResult::with_message(ctx.messenger.listen_nothing()))
    }
}

flavor_handler!(TouchHandler, Verb::Touch, &["touch", "feel", "rub", "pat"], touched_it);
flavor_handler!(PushHandler, Verb::Push, &["push", "press", "shove"], push_no_effect);
flavor_handler!(PullHandler, Verb::Pull, &["pull", "tug", "yank"], pull_no_effect);

/// WAVE, empty-handed or brandishing something held.
pub struct WaveHandler;

impl ActionHandler for WaveHandler {
    fn verb(&self) -> Verb {
        Verb::Wave
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["wave", "brandish"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Held),
            SyntaxRule::new(vec![]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        if ctx.command.dobj.is_none() {
            return Ok(ActionResult::with_message(ctx.messenger.wave_hands()));
        }
        let item = ctx.dobj_item()?;
        ctx.require_held(item)?;
        Ok(ActionResult::with_message(ctx.messenger.wave_item(&item.name))
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// DIG, bare-handed or with a tool.
pub struct DigHandler;

impl ActionHandler for DigHandler {
    fn verb(&self) -> Verb {
        Verb::Dig
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["dig", "excavate"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("with")
                .iobj(ObjCondition::Held),
            SyntaxRule::new(vec![Pattern::DirectObject]),
            SyntaxRule::new(vec![]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        if ctx.command.dobj.is_none() {
            return Ok(ActionResult::with_message(ctx.messenger.dig_no_effect()));
        }
        // "dig ground" and friends get the generic refusal
        if matches!(ctx.command.dobj, Some(crate::command::EntityRef::Universal(_))) {
            return Ok(ActionResult::with_message(ctx.messenger.dig_no_effect()));
        }
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Diggable) {
            return Ok(ActionResult::with_message(ctx.messenger.dig_no_effect()));
        }
        Ok(ActionResult::with_message(ctx.messenger.dug(&item.name))
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// KNOCK ON <thing>.
pub struct KnockHandler;

impl ActionHandler for KnockHandler {
    fn verb(&self) -> Verb {
        Verb::Knock
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["knock", "rap"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::Preposition, Pattern::DirectObject]).with_prep("on"),
            SyntaxRule::new(vec![Pattern::DirectObject]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        Ok(ActionResult::with_message(ctx.messenger.knock_no_answer(&item.name))
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// GIVE <held> TO <character>.
pub struct GiveHandler;

impl ActionHandler for GiveHandler {
    fn verb(&self) -> Verb {
        Verb::Give
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["give", "hand", "offer"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("to")
                .dobj(ObjCondition::Held)
                .iobj(ObjCondition::Person),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_held(item)?;
        let person = ctx.iobj_item()?;
        if !person.has(ItemFlag::Character) {
            return Err(ActionResponse::CannotDo {
                verb: "give anything to".into(),
                item: person.name.clone(),
            });
        }

        Ok(ActionResult::with_message(ctx.messenger.given(&item.name, &person.name))
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Item(person.id.clone()),
                was: Some(Parent::Player),
            })
            .and_change(touch(&item.id))
            .and_change(touch(&person.id))
            .and_handled(&item.id))
    }
}

/// THROW <held> (AT <thing>): the projectile ends up on the floor.
pub struct ThrowHandler;

impl ActionHandler for ThrowHandler {
    fn verb(&self) -> Verb {
        Verb::Throw
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["throw", "hurl", "toss"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("at")
                .dobj(ObjCondition::Held),
            SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Held),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_held(item)?;
        let here = Parent::Location(ctx.world.player.location.clone());

        let mut result = ActionResult::with_message(ctx.messenger.thrown(&item.name))
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: here,
                was: Some(Parent::Player),
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id);
        if item.has(ItemFlag::Worn) {
            result.changes.push(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Worn,
            });
        }
        Ok(result)
    }
}

/// SMASH / BREAK: always dissuaded.
pub struct SmashHandler;

impl ActionHandler for SmashHandler {
    fn verb(&self) -> Verb {
        Verb::Smash
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["smash", "break", "destroy"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        Ok(ActionResult::with_message(ctx.messenger.smash_refusal(&item.name)))
    }
}
