//! Meta verbs: the game-management commands outside the fiction.
//!
//! None of these consume a turn, and all of them work in the dark. QUIT
//! and RESTART confirm through a pending yes/no question rather than
//! blocking on input.

use crate::action::{ActionContext, ActionHandler, ActionResult, SideEffect};
use crate::command::Verb;
use crate::error::ActionResponse;
use crate::vocab::SyntaxRule;
use crate::world::{PendingAction, PendingQuestion};

/// Shared shape: bare verb, no light needed, no turn taken.
macro_rules! meta_handler {
    ($name:ident, $verb:expr, $synonyms:expr, $process:expr) => {
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
            fn requires_light(&self) -> bool {
                false
            }
            fn consumes_turn(&self) -> bool {
                false
            }
            fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
                ($process)(ctx)
            }
        }
    };
}

meta_handler!(SaveHandler, Verb::Save, &["save"], |_ctx| {
    Ok(ActionResult::default().and_effect(SideEffect::RequestSave(None)))
});

meta_handler!(RestoreHandler, Verb::Restore, &["restore", "load"], |_ctx| {
    Ok(ActionResult::default().and_effect(SideEffect::RequestRestore(None)))
});

meta_handler!(RestartHandler, Verb::Restart, &["restart"], |ctx: &ActionContext| {
    let prompt = ctx.messenger.restart_confirm();
    Ok(ActionResult::with_message(prompt.clone()).and_effect(SideEffect::AskQuestion(PendingQuestion {
        prompt,
        on_yes: PendingAction::Restart,
        on_no: None,
    })))
});

meta_handler!(QuitHandler, Verb::Quit, &["quit", "q"], |ctx: &ActionContext| {
    let prompt = ctx.messenger.quit_confirm();
    Ok(ActionResult::with_message(prompt.clone()).and_effect(SideEffect::AskQuestion(PendingQuestion {
        prompt,
        on_yes: PendingAction::Quit,
        on_no: None,
    })))
});

meta_handler!(ScriptHandler, Verb::Script, &["script", "transcript"], |_ctx| {
    Ok(ActionResult::default().and_effect(SideEffect::TranscriptOn))
});

meta_handler!(UnscriptHandler, Verb::Unscript, &["unscript"], |_ctx| {
    Ok(ActionResult::default().and_effect(SideEffect::TranscriptOff))
});

meta_handler!(VerboseHandler, Verb::Verbose, &["verbose"], |ctx: &ActionContext| {
    Ok(ActionResult::with_message(ctx.messenger.verbose_set()).and_effect(SideEffect::SetVerbose(true)))
});

meta_handler!(BriefHandler, Verb::Brief, &["brief"], |ctx: &ActionContext| {
    Ok(ActionResult::with_message(ctx.messenger.brief_set()).and_effect(SideEffect::SetVerbose(false)))
});

meta_handler!(ScoreHandler, Verb::Score, &["score"], |ctx: &ActionContext| {
    Ok(ActionResult::with_message(
        ctx.messenger.score_report(ctx.world.player.score, ctx.world.player.moves),
    ))
});

meta_handler!(HelpHandler, Verb::Help, &["help", "hint"], |ctx: &ActionContext| {
    Ok(ActionResult::with_message(ctx.messenger.help_text()))
});

meta_handler!(XyzzyHandler, Verb::Xyzzy, &["xyzzy", "plugh", "plover"], |ctx: &ActionContext| {
    Ok(ActionResult::with_message(ctx.messenger.xyzzy()))
});

/// WAIT / Z: does nothing, but the world moves on around you.
pub struct WaitHandler;

impl ActionHandler for WaitHandler {
    fn verb(&self) -> Verb {
        Verb::Wait
    }

    fn synonyms(&self) -> &'static [&'static str] {
        &["wait", "z"]
    }

    fn syntax(&self) -> Vec<SyntaxRule> {
        vec![SyntaxRule::new(vec![])]
    }

    fn requires_light(&self) -> bool {
        false
    }

    fn process(&self, ctx: &ActionContext) -> Result<ActionResult, ActionResponse> {
        Ok(ActionResult::with_message(ctx.messenger.wait_message()))
    }
}
