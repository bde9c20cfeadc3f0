//! Device and fire handlers: TURN ON/OFF, BURN, EXTINGUISH, INFLATE.
//!
//! Switching off or dousing the only light in an unlit location appends
//! a darkness warning to the action's message; the engine notices the
//! lighting change itself when it re-describes the room.

use crate::action::{ActionContext, ActionHandler, ActionResult, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag};
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};

/// Turn a device on; shared by the TURN ON and particle forms.
fn switch_on(ctx: &ActionContext, item: &Item) -> Result<ActionResult, ActionResponse> {
    ctx.require_reachable(item)?;
    if !item.has(ItemFlag::Device) {
        return Err(ActionResponse::CannotDo {
            verb: "turn on".into(),
            item: item.name.clone(),
        });
    }
    if item.has(ItemFlag::On) {
        return Err(ActionResponse::Feedback(ctx.messenger.already_on(&item.name)));
    }

    Ok(ActionResult::with_message(ctx.messenger.turned_on(&item.name))
        .and_change(StateChange::SetFlag {
            item: item.id.clone(),
            flag: ItemFlag::On,
        })
        .and_change(touch(&item.id))
        .and_handled(&item.id))
}

/// Turn a device off, warning when that plunges the room into darkness.
fn switch_off(ctx: &ActionContext, item: &Item) -> Result<ActionResult, ActionResponse> {
    ctx.require_reachable(item)?;
    if !item.has(ItemFlag::Device) {
        return Err(ActionResponse::CannotDo {
            verb: "turn off".into(),
            item: item.name.clone(),
        });
    }
    if !item.has(ItemFlag::On) {
        return Err(ActionResponse::Feedback(ctx.messenger.already_off(&item.name)));
    }

    let mut message = ctx.messenger.turned_off(&item.name);
    if kills_the_light(ctx, item) {
        message.push(' ');
        message.push_str(&ctx.messenger.darkness_warning());
    }

    Ok(ActionResult::with_message(message)
        .and_change(StateChange::ClearFlag {
            item: item.id.clone(),
            flag: ItemFlag::On,
        })
        .and_change(touch(&item.id))
        .and_handled(&item.id))
}

/// Would losing this item's light leave the location dark?
fn kills_the_light(ctx: &ActionContext, item: &Item) -> bool {
    if !item.provides_light() {
        return false;
    }
    let inherently_lit = ctx
        .world
        .locations
        .get(&ctx.world.player.location)
        .is_some_and(|location| location.lit);
    if inherently_lit {
        return false;
    }
    !ctx.world
        .items
        .values()
        .any(|other| other.id != item.id && other.provides_light() && ctx.scope.can_see(&other.id))
}

/// TURN ON / SWITCH ON / ACTIVATE.
pub struct TurnOnHandler;

impl ActionHandler for TurnOnHandler {
    fn verb(&self) -> Verb {
        Verb::TurnOn
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["turn on", "switch on", "activate"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Reachable)]
    }

    // lighting a lamp is exactly what you do in the dark
    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        switch_on(ctx, ctx.dobj_item()?)
    }
}

/// TURN OFF / SWITCH OFF. Allowed in the dark so the player can douse
/// their own lamp.
pub struct TurnOffHandler;

impl ActionHandler for TurnOffHandler {
    fn verb(&self) -> Verb {
        Verb::TurnOff
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["turn off", "switch off", "deactivate"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Reachable)]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        switch_off(ctx, ctx.dobj_item()?)
    }
}

/// TURN <thing> ON / OFF: the particle phrasing of the two above.
pub struct TurnHandler;

impl ActionHandler for TurnHandler {
    fn verb(&self) -> Verb {
        Verb::Turn
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["turn", "switch", "flip"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Particle("on")]).dobj(ObjCondition::Reachable),
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Particle("off")]).dobj(ObjCondition::Reachable),
        ]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        if ctx.command.has_particle("on") {
            switch_on(ctx, item)
        } else if ctx.command.has_particle("off") {
            switch_off(ctx, item)
        } else {
            Err(ActionResponse::CannotDo {
                verb: "turn".into(),
                item: item.name.clone(),
            })
        }
    }
}

/// BURN / IGNITE / LIGHT.
///
/// "light lamp" on a non-flammable light source politely becomes TURN ON.
pub struct BurnHandler;

impl ActionHandler for BurnHandler {
    fn verb(&self) -> Verb {
        Verb::Burn
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["burn", "ignite", "light"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("with")
                .dobj(ObjCondition::Reachable)
                .iobj(ObjCondition::Held),
            SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Reachable),
        ]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;

        let burnable = item.has(ItemFlag::Flammable) || item.has(ItemFlag::SelfIgnitable);
        if !burnable {
            if item.has(ItemFlag::Device) && item.has(ItemFlag::LightSource) {
                return switch_on(ctx, item);
            }
            return Err(ActionResponse::CannotDo {
                verb: "burn".into(),
                item: item.name.clone(),
            });
        }
        if item.has(ItemFlag::Burning) {
            return Err(ActionResponse::Feedback(ctx.messenger.already_burning(&item.name)));
        }

        // plain flammables need a burning or self-igniting tool in hand
        if !item.has(ItemFlag::SelfIgnitable) {
            let Some(igniter_id) = ctx.command.iobj_item() else {
                return Err(ActionResponse::DoWhat(format!("light the {} with", item.name)));
            };
            let igniter = ctx.item(igniter_id)?;
            if !ctx.scope.is_holding(&igniter.id) {
                return Err(ActionResponse::ItemNotHeld(igniter.name.clone()));
            }
            if !igniter.has(ItemFlag::Burning) && !igniter.has(ItemFlag::SelfIgnitable) {
                return Err(ActionResponse::CannotDoWithThat {
                    verb: "burn".into(),
                    item: item.name.clone(),
                    tool: igniter.name.clone(),
                });
            }
        }

        Ok(ActionResult::with_message(ctx.messenger.burned(&item.name))
            .and_change(StateChange::SetFlag {
                item: item.id.clone(),
                flag: ItemFlag::Burning,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// EXTINGUISH / DOUSE / PUT OUT.
pub struct ExtinguishHandler;

impl ActionHandler for ExtinguishHandler {
    fn verb(&self) -> Verb {
        Verb::Extinguish
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["extinguish", "douse", "snuff", "put out"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Reachable)]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Burning) {
            // "extinguish lamp" on a lit device means turn it off
            if item.has(ItemFlag::Device) && item.has(ItemFlag::On) {
                return switch_off(ctx, item);
            }
            return Err(ActionResponse::Feedback(ctx.messenger.not_burning(&item.name)));
        }

        let mut message = ctx.messenger.extinguished(&item.name);
        if kills_the_light(ctx, item) {
            message.push(' ');
            message.push_str(&ctx.messenger.darkness_warning());
        }

        Ok(ActionResult::with_message(message)
            .and_change(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Burning,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// INFLATE / BLOW UP.
pub struct InflateHandler;

impl ActionHandler for InflateHandler {
    fn verb(&self) -> Verb {
        Verb::Inflate
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["inflate", "blow up"]
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
        if !item.has(ItemFlag::Inflatable) {
            return Err(ActionResponse::CannotDo {
                verb: "inflate".into(),
                item: item.name.clone(),
            });
        }
        if item.has(ItemFlag::Inflated) {
            return Err(ActionResponse::Feedback(ctx.messenger.already_inflated(&item.name)));
        }

        Ok(ActionResult::with_message(ctx.messenger.inflated(&item.name))
            .and_change(StateChange::SetFlag {
                item: item.id.clone(),
                flag: ItemFlag::Inflated,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

/// DEFLATE.
pub struct DeflateHandler;

impl ActionHandler for DeflateHandler {
    fn verb(&self) -> Verb {
        Verb::Deflate
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["deflate"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![Pattern::DirectObject])]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let item = ctx.dobj_item()?;
        ctx.require_reachable(item)?;
        if !item.has(ItemFlag::Inflated) {
            return Err(ActionResponse::Feedback(ctx.messenger.not_inflated(&item.name)));
        }

        Ok(ActionResult::with_message(ctx.messenger.deflated(&item.name))
            .and_change(StateChange::ClearFlag {
                item: item.id.clone(),
                flag: ItemFlag::Inflated,
            })
            .and_change(touch(&item.id))
            .and_handled(&item.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{TestRig, item_in, item_with_flags};
    use crate::world::Parent;

    fn lantern() -> Item {
        item_in(
            "lantern",
            Parent::Player,
            &[ItemFlag::Takable, ItemFlag::Device, ItemFlag::LightSource],
        )
    }

    #[test]
    fn turn_on_and_off_round_trip() {
        let mut rig = TestRig::new();
        rig.add_item(lantern());

        let result = rig.run_ok("turn on lantern");
        rig.apply(result);
        assert!(rig.world.items["lantern"].has(ItemFlag::On));
        assert!(matches!(rig.run_err("turn on lantern"), ActionResponse::Feedback(_)));

        let result = rig.run_ok("turn off lantern");
        rig.apply(result);
        assert!(!rig.world.items["lantern"].has(ItemFlag::On));
    }

    #[test]
    fn particle_forms_work() {
        let mut rig = TestRig::new();
        rig.add_item(lantern());

        let result = rig.run_ok("turn lantern on");
        rig.apply(result);
        assert!(rig.world.items["lantern"].has(ItemFlag::On));

        let result = rig.run_ok("switch lantern off");
        rig.apply(result);
        assert!(!rig.world.items["lantern"].has(ItemFlag::On));
    }

    #[test]
    fn turn_on_refuses_non_devices() {
        let mut rig = TestRig::new();
        rig.add_item(item_with_flags("rock", &[ItemFlag::Takable]));
        assert!(matches!(rig.run_err("turn on rock"), ActionResponse::CannotDo { .. }));
    }

    #[test]
    fn switching_off_sole_light_warns_about_darkness() {
        let mut rig = TestRig::new();
        rig.world.locations.get_mut("study").unwrap().lit = false;
        let mut lamp = lantern();
        lamp.set(ItemFlag::On);
        rig.add_item(lamp);

        let result = rig.run_ok("turn off lantern");
        assert!(result.message.contains("pitch black"));
    }

    #[test]
    fn switching_off_with_other_light_does_not_warn() {
        let mut rig = TestRig::new();
        rig.world.locations.get_mut("study").unwrap().lit = false;
        let mut lamp = lantern();
        lamp.set(ItemFlag::On);
        rig.add_item(lamp);
        let mut torch = item_with_flags("torch", &[ItemFlag::Takable, ItemFlag::SelfIgnitable, ItemFlag::Burning]);
        torch.parent = Parent::Player;
        rig.add_item(torch);

        let result = rig.run_ok("turn off lantern");
        assert!(!result.message.contains("pitch black"));
    }

    #[test]
    fn light_a_lamp_delegates_to_turn_on() {
        let mut rig = TestRig::new();
        rig.add_item(lantern());
        let result = rig.run_ok("light lantern");
        assert!(result.message.contains("now on"));
    }

    #[test]
    fn burning_needs_a_lit_tool() {
        let mut rig = TestRig::new();
        rig.add_item(item_with_flags("paper", &[ItemFlag::Takable, ItemFlag::Flammable]));
        let match_stick = item_in("matchstick", Parent::Player, &[ItemFlag::Takable, ItemFlag::SelfIgnitable]);
        rig.add_item(match_stick);
        let spoon = item_in("spoon", Parent::Player, &[ItemFlag::Takable]);
        rig.add_item(spoon);

        assert!(matches!(rig.run_err("burn paper"), ActionResponse::DoWhat(_)));
        assert!(matches!(
            rig.run_err("burn paper with spoon"),
            ActionResponse::CannotDoWithThat { .. }
        ));

        let result = rig.run_ok("burn paper with matchstick");
        rig.apply(result);
        assert!(rig.world.items["paper"].has(ItemFlag::Burning));
    }

    #[test]
    fn extinguish_puts_out_fire() {
        let mut rig = TestRig::new();
        rig.add_item(item_with_flags(
            "campfire",
            &[ItemFlag::SelfIgnitable, ItemFlag::Burning, ItemFlag::Scenery],
        ));
        let result = rig.run_ok("put out campfire");
        rig.apply(result);
        assert!(!rig.world.items["campfire"].has(ItemFlag::Burning));
    }

    #[test]
    fn inflate_deflate_round_trip() {
        let mut rig = TestRig::new();
        rig.add_item(item_with_flags("raft", &[ItemFlag::Inflatable]));

        let result = rig.run_ok("inflate raft");
        rig.apply(result);
        assert!(rig.world.items["raft"].has(ItemFlag::Inflated));

        let result = rig.run_ok("deflate raft");
        rig.apply(result);
        assert!(!rig.world.items["raft"].has(ItemFlag::Inflated));

        assert!(matches!(rig.run_err("deflate raft"), ActionResponse::Feedback(_)));
    }
}
