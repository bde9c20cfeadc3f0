//! ATTACK: the player's half of turn-based combat.
//!
//! A strike damages the target immediately; if the target survives, the
//! StartCombat effect keeps the fight alive and the engine gives the
//! enemy its return strike at the end of each turn.

use crate::action::{ActionContext, ActionHandler, ActionResult, SideEffect, touch};
use crate::change::StateChange;
use crate::command::Verb;
use crate::combat::strike_damage;
use crate::error::ActionResponse;
use crate::item::ItemFlag;
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};
use crate::world::Parent;

/// ATTACK / KILL / HIT, optionally WITH a held weapon.
pub struct AttackHandler;

impl ActionHandler for AttackHandler {
    fn verb(&self) -> Verb {
        Verb::Attack
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["attack", "kill", "hit", "fight", "strike", "punch"]
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
        let target = ctx.dobj_item()?;
        ctx.require_reachable(target)?;
        if !target.has(ItemFlag::Character) {
            return Err(ActionResponse::Feedback(ctx.messenger.smash_refusal(&target.name)));
        }
        let Some(sheet) = &target.sheet else {
            return Err(ActionResponse::CannotDo {
                verb: "attack".into(),
                item: target.name.clone(),
            });
        };
        if !sheet.is_alive() {
            return Err(ActionResponse::Feedback(ctx.messenger.smash_refusal(&target.name)));
        }

        let weapon = match ctx.command.iobj_item() {
            Some(weapon_id) => {
                let weapon = ctx.item(weapon_id)?;
                if !ctx.scope.is_holding(&weapon.id) {
                    return Err(ActionResponse::ItemNotHeld(weapon.name.clone()));
                }
                Some(weapon)
            },
            None => None,
        };
        if sheet.requires_weapon && weapon.is_none() {
            return Err(ActionResponse::Feedback(ctx.messenger.needs_weapon(&target.name)));
        }

        let damage = strike_damage(weapon);
        let killed = damage >= sheet.health;

        let mut result = ActionResult::default()
            .and_change(StateChange::DamageCharacter {
                item: target.id.clone(),
                amount: damage,
            })
            .and_change(touch(&target.id))
            .and_handled(&target.id);

        if killed {
            result.message = format!(
                "{}\n{}",
                ctx.messenger.attack_hit(&target.name, damage),
                ctx.messenger.attack_killed(&target.name)
            );
            // the fallen leave the field
            result.changes.push(StateChange::SetParent {
                item: target.id.clone(),
                to: Parent::Nowhere,
                was: Some(target.parent.clone()),
            });
            result.changes.push(StateChange::ClearFlag {
                item: target.id.clone(),
                flag: ItemFlag::IsEnemy,
            });
        } else {
            result.message = ctx.messenger.attack_hit(&target.name, damage);
            result.effects.push(SideEffect::StartCombat {
                enemy: target.id.clone(),
            });
        }
        Ok(result)
    }
}
