//! ASK / TELL / YES / NO.
//!
//! Conversation topics are data on the character item: a property
//! `topic:<entity id>` holds the reply for asking about that entity.
//! YES and NO only mean something while a question is pending; the
//! pending question itself lives in the world and is resolved by the
//! engine when it sees the AnswerQuestion effect.

use crate::action::{ActionContext, ActionHandler, ActionResult, SideEffect, touch};
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::item::{Item, ItemFlag, prop};
use crate::vocab::{ObjCondition, Pattern, SyntaxRule};

fn require_character<'a>(ctx: &ActionContext<'a>) -> Result<&'a Item, ActionResponse> {
    let target = ctx.dobj_item()?;
    ctx.require_reachable(target)?;
    if !target.has(ItemFlag::Character) {
        return Err(ActionResponse::Feedback(
            ctx.messenger.not_a_conversationalist(&target.name),
        ));
    }
    Ok(target)
}

/// ASK <character> ABOUT <entity>.
pub struct AskHandler;

impl ActionHandler for AskHandler {
    fn verb(&self) -> Verb {
        Verb::Ask
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["ask", "question", "quiz"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("about")
                .dobj(ObjCondition::Person),
            SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Person),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let target = require_character(ctx)?;

        let Some(topic) = ctx.command.iobj.as_ref() else {
            // one-phrase form: prompt for the topic
            return Ok(ActionResult::with_message(ctx.messenger.ask_about_what(&target.name)));
        };
        let topic_key = match topic {
            crate::command::EntityRef::Item(id) => format!("{}{id}", prop::TOPIC_PREFIX),
            crate::command::EntityRef::Player => format!("{}self", prop::TOPIC_PREFIX),
            crate::command::EntityRef::Universal(universal) => {
                format!("{}{universal}", prop::TOPIC_PREFIX)
            },
            crate::command::EntityRef::Location(id) => format!("{}{id}", prop::TOPIC_PREFIX),
        };

        let message = target
            .prop_text(&topic_key)
            .map_or_else(|| ctx.messenger.no_comment(&target.name), str::to_string);

        Ok(ActionResult::with_message(message)
            .and_change(touch(&target.id))
            .and_handled(&target.id))
    }
}

/// TELL <character> ABOUT <entity>.
pub struct TellHandler;

impl ActionHandler for TellHandler {
    fn verb(&self) -> Verb {
        Verb::Tell
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["tell", "inform"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![
            SyntaxRule::new(vec![Pattern::DirectObject, Pattern::Preposition, Pattern::IndirectObject])
                .with_prep("about")
                .dobj(ObjCondition::Person),
            SyntaxRule::new(vec![Pattern::DirectObject]).dobj(ObjCondition::Person),
        ]
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        let target = require_character(ctx)?;
        Ok(ActionResult::with_message(ctx.messenger.tell_default(&target.name))
            .and_change(touch(&target.id))
            .and_handled(&target.id))
    }
}

/// YES: answer a pending question affirmatively.
pub struct YesHandler;

impl ActionHandler for YesHandler {
    fn verb(&self) -> Verb {
        Verb::Yes
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["yes", "y", "yeah", "aye"]
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
        if ctx.world.question.is_some() {
            Ok(ActionResult::default().and_effect(SideEffect::AnswerQuestion(true)))
        } else {
            Ok(ActionResult::with_message(ctx.messenger.yes_no_generic()))
        }
    }
}

/// NO: answer a pending question negatively.
pub struct NoHandler;

impl ActionHandler for NoHandler {
    fn verb(&self) -> Verb {
        Verb::No
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["no", "nope"]
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
        if ctx.world.question.is_some() {
            Ok(ActionResult::default().and_effect(SideEffect::AnswerQuestion(false)))
        } else {
            Ok(ActionResult::with_message(ctx.messenger.yes_no_generic()))
        }
    }
}
