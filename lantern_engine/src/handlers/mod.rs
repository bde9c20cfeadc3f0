//! The verb handlers.
//!
//! Each submodule implements one family of related verbs. [`all`] builds
//! the standard registry; games may register replacements afterwards to
//! shadow a built-in verb.

pub mod combat;
pub mod containers;
pub mod conversation;
pub mod devices;
pub mod inventory;
pub mod look;
pub mod meta;
pub mod misc;
pub mod movement;

use crate::action::{ActionHandler, HandlerRegistry};

/// Build the standard handler registry with every built-in verb.
pub fn all() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let handlers: Vec<Box<dyn ActionHandler>> = vec![
        // carrying and containment
        Box::new(inventory::TakeHandler),
        Box::new(inventory::DropHandler),
        Box::new(inventory::PutHandler),
        Box::new(inventory::WearHandler),
        Box::new(inventory::RemoveHandler),
        Box::new(inventory::InventoryHandler),
        // container state
        Box::new(containers::OpenHandler),
        Box::new(containers::CloseHandler),
        Box::new(containers::LockHandler),
        Box::new(containers::UnlockHandler),
        // devices and fire
        Box::new(devices::TurnOnHandler),
        Box::new(devices::TurnOffHandler),
        Box::new(devices::TurnHandler),
        Box::new(devices::BurnHandler),
        Box::new(devices::ExtinguishHandler),
        Box::new(devices::InflateHandler),
        Box::new(devices::DeflateHandler),
        // movement
        Box::new(movement::GoHandler),
        Box::new(movement::EnterHandler),
        Box::new(movement::ClimbHandler),
        // observation
        Box::new(look::LookHandler),
        Box::new(look::ExamineHandler),
        Box::new(look::ReadHandler),
        Box::new(look::SearchHandler),
        // violence
        Box::new(combat::AttackHandler),
        // conversation
        Box::new(conversation::AskHandler),
        Box::new(conversation::TellHandler),
        Box::new(conversation::YesHandler),
        Box::new(conversation::NoHandler),
        // meta
        Box::new(meta::SaveHandler),
        Box::new(meta::RestoreHandler),
        Box::new(meta::RestartHandler),
        Box::new(meta::QuitHandler),
        Box::new(meta::ScriptHandler),
        Box::new(meta::UnscriptHandler),
        Box::new(meta::VerboseHandler),
        Box::new(meta::BriefHandler),
        Box::new(meta::ScoreHandler),
        Box::new(meta::WaitHandler),
        Box::new(meta::HelpHandler),
        Box::new(meta::XyzzyHandler),
        // everything else
        Box::new(misc::EatHandler),
        Box::new(misc::DrinkHandler),
        Box::new(misc::SmellHandler),
        Box::new(misc::ListenHandler),
        Box::new(misc::TouchHandler),
        Box::new(misc::PushHandler),
        Box::new(misc::PullHandler),
        Box::new(misc::WaveHandler),
        Box::new(misc::JumpHandler),
        Box::new(misc::ShoutHandler),
        Box::new(misc::PrayHandler),
        Box::new(misc::SingHandler),
        Box::new(misc::SleepHandler),
        Box::new(misc::SwimHandler),
        Box::new(misc::DigHandler),
        Box::new(misc::KnockHandler),
        Box::new(misc::GiveHandler),
        Box::new(misc::ThrowHandler),
        Box::new(misc::SmashHandler),
    ];
    for handler in handlers {
        registry.register(handler);
    }
    registry
}
