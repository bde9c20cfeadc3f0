//! Carrying, wearing, and containment handlers.
//!
//! TAKE and DROP accept ALL and follow the classic multi-object policy:
//! items that fail a precondition are skipped silently, and the command
//! fails only when nothing at all succeeded.

use crate::action::{ActionContext, ActionHandler, ActionResult, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag};
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};
use crate::world::Parent;

/// TAKE / GET / PICK UP, with ALL and take-from-container forms.
pub struct TakeHandler;

impl ActionHandler for TakeHandler {
    fn verb(&self) -> Verb {
        Verb::Take
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["take", "get", "grab", "pick up", "carry", "hold", "catch"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObjects, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("from")
                .iobj(ObjCondition::Container),
            SyntaxRule::new(vec![Pattern::DirectObjects]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        if ctx.command.is_all {
            return take_all(ctx);
        }

        let item = ctx.dobj_item()?;
        if ctx.scope.is_holding(&item.id) {
            return Err(ActionResponse::Feedback(ctx.messenger.already_holding(&item.name)));
        }
        if let Some(container) = ctx.command.iobj_item() {
            let container = ctx.item(container)?;
            if item.parent != Parent::Item(container.id.clone()) {
                return Err(ActionResponse::Feedback(format!(
                    "The {} isn't in the {}.",
                    item.name, container.name
                )));
            }
            if !container.offers_contents() {
                return Err(ActionResponse::ContainerIsClosed(container.name.clone()));
            }
        }
        check_takable(ctx, item)?;

        Ok(ActionResult::with_message(ctx.messenger.taken())
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Player,
                was: Some(item.parent.clone()),
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// Shared TAKE preconditions for the single and ALL paths.
fn check_takable(ctx: &ActionContext, item: &Item) -> Result<(), ActionResponse> {
    ctx.require_reachable(item)?;
    if item.has(ItemFlag::Scenery) || !item.has(ItemFlag::Takable) {
        return Err(ActionResponse::ItemNotTakable(item.name.clone()));
    }
    if !ctx.scope.can_carry(item.size) {
        return Err(ActionResponse::PlayerCannotCarryMore);
    }
    Ok(())
}

fn take_all(ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
    // ALL draws from the named container, or from everything reachable.
    let mut candidates: Vec<&Item> = match ctx.command.iobj_item() {
        Some(container_id) => {
            let container = ctx.item(container_id)?;
            if !container.offers_contents() {
                return Err(ActionResponse::ContainerIsClosed(container.name.clone()));
            }
            ctx.world
                .children_of(Parent::Item(container.id.clone()))
                .collect()
        },
        None => ctx
            .world
            .items
            .values()
            .filter(|item| ctx.scope.can_reach(&item.id) && !ctx.scope.is_holding(&item.id))
            .collect(),
    };
    candidates.sort_by(|a, b| a.name.cmp(&b.name));

    let mut result = ActionResult::default();
    let mut carried: i64 = 0;
    let mut lines = Vec::new();
    for item in candidates {
        if check_takable(ctx, item).is_err() || !ctx.scope.can_carry(carried + item.size) {
            continue;
        }
        carried += item.size;
        lines.push(ctx.messenger.all_taken(&item.name));
        result.changes.push(StateChange::SetParent {
            item: item.id.clone(),
            to: Parent::Player,
            was: Some(item.parent.clone()),
        });
        result.changes.push(touch(&item.id));
        result.handled.push(item.id.clone());
    }

    if result.handled.is_empty() {
        return Err(ActionResponse::Feedback(ctx.messenger.nothing_to_take()));
    }
    result.message = lines.join("\n");
    Ok(result)
}

/// DROP / DISCARD, with ALL. Works in the dark.
pub struct DropHandler;

impl ActionHandler for DropHandler {
    fn verb(&self) -> Verb {
        Verb::Drop
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["drop", "discard", "release"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObjects]).dobj(ObjCondition::Held)]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let here = Parent::Location(ctx.world.player.location.clone());

        if ctx.command.is_all {
            let mut held: Vec<&Item> = ctx.world.children_of(Parent::Player).collect();
            held.sort_by(|a, b| a.name.cmp(&b.name));

            let mut result = ActionResult::default();
            let mut lines = Vec::new();
            for item in held {
                if item.has(ItemFlag::Scenery) {
                    continue;
                }
                lines.push(ctx.messenger.all_dropped(&item.name));
                push_drop_changes(&mut result, item, &here);
            }
            if result.handled.is_empty() {
                return Err(ActionResponse::Feedback(ctx.messenger.nothing_to_drop()));
            }
            result.message = lines.join("\n");
            return Ok(result);
        }

        let item = ctx.dobj_item()?;
        ctx.require_held(item)?;
        if item.has(ItemFlag::Scenery) {
            return Err(ActionResponse::ItemNotDroppable(item.name.clone()));
        }

        let mut result = ActionResult::with_message(ctx.messenger.dropped());
        push_drop_changes(&mut result, item, &here);
        Ok(result)
    }
}

fn push_drop_changes(result: &mut ActionResult, item: &Item, here: &Parent) {
    result.changes.push(StateChange::SetParent {
        item: item.id.clone(),
        to: here.clone(),
        was: Some(Parent::Player),
    });
    if item.has(ItemFlag::Worn) {
        result.changes.push(StateChange::ClearFlag {
            item: item.id.clone(),
            flag: ItemFlag::Worn,
        });
    }
    result.changes.push(touch(&item.id));
    result.handled.push(item.id.clone());
}

/// PUT ... ON / IN, plus "put X down".
pub struct PutHandler;

impl ActionHandler for PutHandler {
    fn verb(&self) -> Verb {
        Verb::Put
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["put", "place", "insert", "stuff"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        let two_object = |prep| {
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep(prep)
                .dobj(ObjCondition::Held)
        };
        vec![
            two_object("on"),
            two_object("onto"),
            two_object("in"),
            two_object("into"),
            two_object("inside"),
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Particle("down")]).dobj(ObjCondition::Held),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_held(item)?;

        // "put lantern down" is just DROP
        if ctx.command.has_particle("down") {
            let here = Parent::Location(ctx.world.player.location.clone());
            let mut result = ActionResult::with_message(ctx.messenger.dropped());
            push_drop_changes(&mut result, item, &here);
            return Ok(result);
        }

        let target = ctx.iobj_item()?;
        if target.id == item.id {
            return Err(ActionResponse::Feedback(ctx.messenger.contain_itself(&item.name)));
        }
        if ctx.world.is_ancestor(&item.id, &target.id) {
            return Err(ActionResponse::Feedback(
                ctx.messenger.circular_containment(&item.name, &target.name),
            ));
        }
        ctx.require_reachable(target)?;

        let onto_surface = matches!(ctx.command.prep.as_deref(), Some("on" | "onto"));
        let message = if onto_surface {
            if !target.has(ItemFlag::Surface) {
                return Err(ActionResponse::TargetIsNotASurface(target.name.clone()));
            }
            ctx.messenger.put_on_surface(&item.name, &target.name)
        } else {
            if !target.has(ItemFlag::Container) {
                return Err(ActionResponse::TargetIsNotAContainer(target.name.clone()));
            }
            if !target.is_open_container() {
                return Err(ActionResponse::ContainerIsClosed(target.name.clone()));
            }
            ctx.messenger.put_in_container(&item.name, &target.name)
        };

        if target.capacity >= 0 {
            let load = ctx.world.load_of(&Parent::Item(target.id.clone()));
            if load + item.size > target.capacity {
                return Err(ActionResponse::ItemTooLargeForContainer(item.name.clone()));
            }
        }

        Ok(ActionResult::with_message(message)
            .and_change(StateChange::SetParent {
                item: item.id.clone(),
                to: Parent::Item(target.id.clone()),
                was: Some(Parent::Player),
            })
            .and_change(touch(&item.id))
            .and_change(touch(&target.id))
            .and_handled(&item.id))
    }
}

/// WEAR / DON / PUT ON (garments).
pub struct WearHandler;

impl ActionHandler for WearHandler {
    fn verb(&self) -> Verb {
        Verb::Wear
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["wear", "don", "put on"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        if !item.has(ItemFlag::Wearable) || item.has(ItemFlag::Scenery) {
            return Err(ActionResponse::ItemNotWearable(item.name.clone()));
        }
        if item.has(ItemFlag::Worn) {
            return Err(ActionResponse::ItemAlreadyWorn(item.name.clone()));
        }
        ctx.require_held(item)?;

        Ok(ActionResult::with_message(ctx.messenger.worn(&item.name))
            .and_change(StateChange::SetFlag {
                item: item.id.clone(),
                flag: ItemFlag::Worn,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// REMOVE / DOFF / TAKE OFF; doubles as take-out-of-container with FROM.
pub struct RemoveHandler;

impl ActionHandler for RemoveHandler {
    fn verb(&self) -> Verb {
        Verb::Remove
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["remove", "doff", "take off"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("from")
                .iobj(ObjCondition::Container),
            SyntaxRule::new(vec![Pattern::DirectObject]),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;

        // "remove coin from box" is the take-from form
        if let Some(container_id) = ctx.command.iobj_item() {
            let container = ctx.item(container_id)?;
            if item.parent != Parent::Item(container.id.clone()) {
                return Err(ActionResponse::Feedback(format!(
                    "The {} isn't in the {}.",
                    item.name, container.name
                )));
            }
            if !container.offers_contents() {
                return Err(ActionResponse::ContainerIsClosed(container.name.clone()));
            }
            check_takable(ctx, item)?;
            return Ok(ActionResult::with_message(ctx.messenger.taken())
                .and_change(StateChange::SetParent {
                    item: item.id.clone(),
                    to: Parent::Player,
                    was: Some(item.parent.clone()),
                })
                .and_change(touch(&item.id))
                .and_handled(&item.id));
        }

        if !item.has(ItemFlag::Worn) {
            return Err(ActionResponse::ItemIsNotWorn(item.name.clone()));
        }

        Ok(ActionResult::with_message(ctx.messenger.removed_garment(&item.name))
            .and_change(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Worn,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// INVENTORY / I. Free action.
pub struct InventoryHandler;

impl ActionHandler for InventoryHandler {
    fn verb(&self) -> Verb {
        Verb::Inventory
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["inventory", "inv", "i"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![])]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn consumes_turn(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let mut held: Vec<&Item> = ctx.world.children_of(Parent::Player).collect();
        if held.is_empty() {
            return Ok(ActionResult::with_message(ctx.messenger.inventory_empty()));
        }
        held.sort_by(|a, b| a.name.cmp(&b.name));

        let mut lines = vec![ctx.messenger.inventory_header()];
        for item in held {
            let worn = if item.has(ItemFlag::Worn) { " (worn)" } else { "" };
            lines.push(format!("  a {}{worn}", item.name));
        }
        Ok(ActionResult::with_message(lines.join("\n")))
    }
}
