//! Observation handlers: LOOK, EXAMINE, READ, SEARCH.

use crate::action::{ActionContext, ActionHandler, ActionResult, SideEffect, touch};
use crate::change::StateChange;
use crate::command::{EntityRef, Verb};
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag, prop};
use crate::vocab::{Pattern, SyntaxRule};
use crate::world::Parent;

/// LOOK: force the full location description, light or no light.
pub struct LookHandler;

impl ActionHandler for LookHandler {
    fn verb(&self) -> Verb {
        Verb::Look
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["look", "l"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![])]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, _ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        Ok(ActionResult::default().and_effect(SideEffect::RefreshRoom))
    }
}

/// Sorted display names of an item's visible contents.
fn visible_contents(ctx: &ActionContext, item: &Item) -> Vec<String> {
    let mut names: Vec<String> = ctx
        .world
        .children_of(Parent::Item(item.id.clone()))
        .filter(|child| !child.has(ItemFlag::OmitDescription))
        .map(|child| child.name.clone())
        .collect();
    names.sort();
    names
}

/// EXAMINE / X / LOOK AT.
pub struct ExamineHandler;

impl ActionHandler for ExamineHandler {
    fn verb(&self) -> Verb {
        Verb::Examine
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["examine", "x", "inspect", "look at", "look in", "describe"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        match ctx.command.dobj.as_ref() {
            Some(EntityRef::Player) => {
                let player = &ctx.world.player;
                return Ok(ActionResult::with_message(
                    ctx.messenger.examine_self(player.health, player.max_health),
                ));
            },
            Some(EntityRef::Universal(universal)) => {
                return Ok(ActionResult::with_message(
                    ctx.messenger.nothing_special(&universal.to_string()),
                ));
            },
            _ => {},
        }

        let item = ctx.dobj_item()?;
        let mut lines = Vec::new();
        match item.prop_text(prop::DESCRIPTION) {
            Some(description) => lines.push(description.to_string()),
            None => lines.push(ctx.messenger.nothing_special(&item.name)),
        }

        if item.has(ItemFlag::Openable) && !item.has(ItemFlag::Container) {
            // door-like things report their state
            lines.push(ctx.messenger.door_state(
                &item.name,
                item.has(ItemFlag::Open),
                item.has(ItemFlag::Locked),
            ));
        }
        if item.has(ItemFlag::Device) {
            lines.push(ctx.messenger.device_status(&item.name, item.has(ItemFlag::On)));
        }
        if item.has(ItemFlag::Container) {
            if item.shows_contents() {
                let contents = visible_contents(ctx, item);
                if contents.is_empty() {
                    lines.push(ctx.messenger.container_empty(&item.name));
                } else {
                    lines.push(ctx.messenger.contents_of(&item.name, &contents));
                }
            } else {
                lines.push(ctx.messenger.door_state(
                    &item.name,
                    false,
                    item.has(ItemFlag::Locked),
                ));
            }
        }
        if item.has(ItemFlag::Surface) {
            let contents = visible_contents(ctx, item);
            if !contents.is_empty() {
                lines.push(ctx.messenger.on_top_of(&item.name, &contents));
            }
        }

        Ok(ActionResult::with_message(lines.join("\n"))
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// READ.
pub struct ReadHandler;

impl ActionHandler for ReadHandler {
    fn verb(&self) -> Verb {
        Verb::Read
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["read", "peruse", "skim"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Readable) {
            return Err(ActionResponse::ItemNotReadable(item.name.clone()));
        }
        let Some(text) = item.prop_text(prop::READ_TEXT) else {
            return Err(ActionResponse::ItemNotReadable(item.name.clone()));
        };

        let mut result = ActionResult::default();
        // some readables jump into your hands first
        if item.prop_flag(prop::TAKE_FIRST) && !ctx.scope.is_holding(&item.id) && item.has(ItemFlag::Takable) {
            result.changes.push(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Player,
                was: Some(item.parent.clone()),
            });
            result.message = format!("({})\n{text}", ctx.messenger.taken());
        } else {
            result.message = text.to_string();
        }
        result.changes.push(touch(&item.id));
        result.handled.push(item.id.clone());
        Ok(result)
    }
}

/// SEARCH / LOOK UNDER / LOOK BEHIND.
pub struct SearchHandler;

impl ActionHandler for SearchHandler {
    fn verb(&self) -> Verb {
        Verb::Search
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["search", "look under", "look behind", "look through"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;

        let message = if item.has(ItemFlag::Container) {
            if item.shows_contents() {
                let contents = visible_contents(ctx, item);
                if contents.is_empty() {
                    ctx.messenger.container_empty(&item.name)
                } else {
                    ctx.messenger.contents_of(&item.name, &contents)
                }
            } else {
                return Err(ActionResponse::ContainerIsClosed(item.name.clone()));
            }
        } else {
            ctx.messenger.search_found_nothing(&item.name)
        };

        Ok(ActionResult::with_message(message)
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}
