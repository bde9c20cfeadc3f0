//! OPEN / CLOSE / LOCK / UNLOCK.
//!
//! Locks are keyed: a lockable item names its key in the `lockKey`
//! property, and both locking and unlocking demand that exact key in
//! hand. Opening a container reveals its newly visible contents.

use crate::action::{ActionContext, ActionHandler, ActionResult, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag};
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};
use crate::world::Parent;

/// OPEN.
pub struct OpenHandler;

impl ActionHandler for OpenHandler {
    fn verb(&self) -> Verb {
        Verb::Open
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["open"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Openable) {
            return Err(ActionResponse::ItemNotOpenable(item.name.clone()));
        }
        if item.has(ItemFlag::Locked) {
            return Err(ActionResponse::ItemIsLocked(item.name.clone()));
        }
        if item.has(ItemFlag::Open) {
            return Err(ActionResponse::ItemAlreadyOpen(item.name.clone()));
        }

        // opening a container shows what was hidden inside
        let mut revealed: Vec<String> = ctx
            .world
            .children_of(Parent::Item(item.id.clone()))
            .filter(|child| !child.has(ItemFlag::OmitDescription))
            .map(|child| child.name.clone())
            .collect();
        revealed.sort();

        let message = if item.has(ItemFlag::Container) && !revealed.is_empty() && !item.has(ItemFlag::Transparent) {
            ctx.messenger.opened_revealing(&item.name, &revealed)
        } else {
            ctx.messenger.opened(&item.name)
        };

        Ok(ActionResult::with_message(message)
            .and_change(StateChange::SetFlag {
                item: item.id.clone(),
                flag: ItemFlag::Open,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// CLOSE / SHUT.
pub struct CloseHandler;

impl ActionHandler for CloseHandler {
    fn verb(&self) -> Verb {
        Verb::Close
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["close", "shut"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Openable) {
            return Err(ActionResponse::ItemNotOpenable(item.name.clone()));
        }
        if !item.has(ItemFlag::Open) {
            return Err(ActionResponse::ItemAlreadyClosed(item.name.clone()));
        }

        Ok(ActionResult::with_message(ctx.messenger.closed(&item.name))
            .and_change(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Open,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// Shared key validation for LOCK and UNLOCK.
fn require_key<'a>(ctx: &'a ActionContext, target: &Item) -> Result<&'a Item, ActionResponse> {
    let Some(key_id) = ctx.command.iobj_item() else {
        return Err(ActionResponse::DoWhat(format!(
            "{} the {} with",
            ctx.command.verb, target.name
        )));
    };
    let key = ctx.item(key_id)?;
    if !ctx.scope.is_holding(&key.id) {
        return Err(ActionResponse::ItemNotHeld(key.name.clone()));
    }
    if target.lock_key() != Some(key.id.as_str()) {
        return Err(ActionResponse::WrongKey(key.name.clone()));
    }
    Ok(key)
}

/// LOCK ... WITH <key>.
pub struct LockHandler;

impl ActionHandler for LockHandler {
    fn verb(&self) -> Verb {
        Verb::Lock
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["lock"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("with")
                .iobj(ObjCondition::Held),
            SyntaxRule::new(vec![Pattern::DirectObject]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Lockable) {
            return Err(ActionResponse::CannotDo {
                verb: "lock".into(),
                item: item.name.clone(),
            });
        }
        if item.has(ItemFlag::Locked) {
            return Err(ActionResponse::Feedback(ctx.messenger.already_locked(&item.name)));
        }
        if item.has(ItemFlag::Open) {
            return Err(ActionResponse::Feedback(ctx.messenger.close_it_first(&item.name)));
        }
        let key = require_key(ctx, item)?;

        Ok(ActionResult::with_message(ctx.messenger.locked(&item.name, &key.name))
            .and_change(StateChange::SetFlag {
                item: item.id.clone(),
                flag: ItemFlag::Locked,
            })
            .and_change(touch(&item.id))
            .and_change(touch(&key.id))
            .and_handled(&item.id))
    }
}

/// UNLOCK ... WITH <key>.
pub struct UnlockHandler;

impl ActionHandler for UnlockHandler {
    fn verb(&self) -> Verb {
        Verb::Unlock
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["unlock"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("with")
                .iobj(ObjCondition::Held),
            SyntaxRule::new(vec![Pattern::DirectObject]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Lockable) {
            return Err(ActionResponse::CannotDo {
                verb: "unlock".into(),
                item: item.name.clone(),
            });
        }
        if !item.has(ItemFlag::Locked) {
            return Err(ActionResponse::Feedback(ctx.messenger.already_unlocked(&item.name)));
        }
        let key = require_key(ctx, item)?;

        Ok(ActionResult::with_message(ctx.messenger.unlocked(&item.name, &key.name))
            .and_change(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Locked,
            })
            .and_change(touch(&item.id))
            .and_change(touch(&key.id))
            .and_handled(&item.id))
    }
}
