//! GO / ENTER / CLIMB: getting from one location to another.
//!
//! The actual room description after a successful move is the engine's
//! job; these handlers only validate the exit and emit the MovePlayer
//! change. Movement is allowed in the dark -- groping for an exit is a
//! time-honored way to meet whatever lives there.

use crate::action::{ActionContext, ActionHandler, ActionResult, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::ItemFlag;
use crate::location::{Direction, Exit};
use crate::vocab::{Pattern, SyntaxRule};

/// Validate an exit and produce the move, or the right refusal.
fn traverse(ctx: &ActionContext, exit: &Exit) -> Result<ActionResult, ActionResponse> {
    if let Some(message) = &exit.blocked_message {
        return Err(ActionResponse::DirectionIsBlocked(message.clone()));
    }
    if let Some(door_id) = &exit.door {
        let door = ctx.item(door_id)?;
        if door.has(ItemFlag::Locked) {
            return Err(ActionResponse::ItemIsLocked(door.name.clone()));
        }
        if !door.has(ItemFlag::Open) {
            return Err(ActionResponse::Feedback(ctx.messenger.door_is_closed(&door.name)));
        }
    }
    let Some(to) = &exit.to else {
        return Err(ActionResponse::InvalidDirection);
    };

    Ok(ActionResult::default().and_change(StateChange::MovePlayer { to: to.clone() }))
}

/// GO <direction>, or a bare direction word.
pub struct GoHandler;

impl ActionHandler for GoHandler {
    fn verb(&self) -> Verb {
        Verb::Go
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["go", "walk", "run", "head", "travel"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::Direction]),
            SyntaxRule::new(vec![Pattern::Preposition, Pattern::Direction]).with_prep("to"),
        ]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let Some(direction) = ctx.command.direction else {
            return Err(ActionResponse::InvalidDirection);
        };
        let location = ctx.world.locations.get(&ctx.world.player.location);
        let Some(exit) = location.and_then(|l| l.exit(direction)) else {
            return Err(ActionResponse::InvalidDirection);
        };
        traverse(ctx, exit)
    }
}

/// ENTER, both bare ("enter") and aimed at a door ("enter the gate").
pub struct EnterHandler;

impl ActionHandler for EnterHandler {
    fn verb(&self) -> Verb {
        Verb::Enter
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["enter", "board"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject]),
            SyntaxRule::new(vec![]),
        ]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let location = ctx
            .world
            .locations
            .get(&ctx.world.player.location)
            .ok_or(ActionResponse::InternalEngineError)?;

        // bare ENTER takes the In exit if there is one
        let Some(_) = ctx.command.dobj.as_ref() else {
            let Some(exit) = location.exit(Direction::In) else {
                return Err(ActionResponse::InvalidDirection);
            };
            return traverse(ctx, exit);
        };

        // "enter <door>": find the exit that door guards
        let door = ctx.dobj_item()?;
        let through = location
            .exits
            .values()
            .find(|exit| exit.door.as_deref() == Some(door.id.as_str()));
        match through {
            Some(exit) => traverse(ctx, exit),
            None => Err(ActionResponse::CannotDo {
                verb: "enter".into(),
                item: door.name.clone(),
            }),
        }
    }
}

/// CLIMB, bare or aimed at something climbable.
pub struct ClimbHandler;

impl ActionHandler for ClimbHandler {
    fn verb(&self) -> Verb {
        Verb::Climb
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["climb", "scale"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject]),
            SyntaxRule::new(vec![]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let location = ctx
            .world
            .locations
            .get(&ctx.world.player.location)
            .ok_or(ActionResponse::InternalEngineError)?;
        let up = location.exit(Direction::Up);

        let Some(_) = ctx.command.dobj.as_ref() else {
            let Some(exit) = up else {
                return Err(ActionResponse::InvalidDirection);
            };
            return traverse(ctx, exit);
        };

        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Climbable) {
            return Err(ActionResponse::CannotDo {
                verb: "climb".into(),
                item: item.name.clone(),
            });
        }
        match up {
            Some(exit) => {
                let mut result = traverse(ctx, exit)?;
                result.changes.push(touch(&item.id));
                result.handled.push(item.id.clone());
                Ok(result)
            },
            None => Ok(ActionResult::with_message(ctx.messenger.climb_no_tree(&item.name))
                .and_change(touch(&item.id))
                .and_handled(&item.id)),
        }
    }
}
