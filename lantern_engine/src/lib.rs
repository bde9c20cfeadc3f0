#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! Lantern: an interactive-fiction runtime in the classic tradition.
//!
//! A game is a graph of locations and items; the player types English
//! commands; the engine parses them against the game's vocabulary and
//! live world state, dispatches to verb handlers, applies the resulting
//! state changes atomically, runs scheduled fuses and daemons, and emits
//! narrative text through a replaceable messenger.

// Core modules
pub mod action;
pub mod change;
pub mod combat;
pub mod command;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod io;
pub mod item;
pub mod loader;
pub mod location;
pub mod messages;
pub mod parser;
pub mod player;
pub mod save;
pub mod scheduler;
pub mod scope;
pub mod style;
pub mod vocab;
pub mod world;

/// The engine version stamped into saves.
pub const LANTERN_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-exports for convenience
pub use action::{ActionHandler, ActionResult, SideEffect};
pub use command::{Command, EntityRef, Verb};
pub use engine::{Engine, TurnFlow};
pub use error::{ActionResponse, ParseError};
pub use hooks::GameHooks;
pub use io::{ConsoleIo, IoHandler, MemoryIo, TextStyle};
pub use item::{Item, ItemFlag};
pub use loader::{build_world, install_vocab, load_world_file};
pub use location::{Direction, Exit, Location};
pub use messages::{DefaultMessenger, Messenger};
pub use player::Player;
pub use scope::ScopeResolver;
pub use world::{Id, Parent, World, WorldObject};
