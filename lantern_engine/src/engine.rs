//! The turn engine: one command in, one state transition out.
//!
//! The engine owns the [`World`] and is the only thing that mutates it.
//! Each turn it parses the input, dispatches to the verb's handler (or a
//! game-registered override), applies the returned changes atomically,
//! runs the scheduler, updates pronouns, and re-describes the location
//! when the player moved or the lights came on. Parse and validation
//! failures cost the player nothing.

use crate::action::{ActionContext, ActionHandler, ActionResult, SideEffect};
use crate::change::apply_changes;
use crate::combat::{self, CombatState};
use crate::command::{Command, EntityRef, Verb};
use crate::error::ActionResponse;
use crate::handlers;
use crate::hooks::{EventOutcome, GameHooks};
use crate::io::{IoHandler, TextStyle};
use crate::item::{ItemFlag, prop};
use crate::messages::{DefaultMessenger, Messenger};
use crate::parser;
use crate::save;
use crate::scope::ScopeResolver;
use crate::vocab::Vocabulary;
use crate::world::{Parent, PendingAction, World};

use anyhow::Result;
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::Write as _;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

/// Whether the game continues after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnFlow {
    Continue,
    Quit,
}

const DEFAULT_SAVE_SLOT: &str = "game";

/// The running game: world state plus everything registered around it.
pub struct Engine<I: IoHandler> {
    pub world: World,
    /// Pristine copy taken at construction; RESTART swaps back to it.
    initial: World,
    vocab: Vocabulary,
    handlers: crate::action::HandlerRegistry,
    hooks: GameHooks,
    messenger: Box<dyn Messenger>,
    pub io: I,
    data_dir: PathBuf,
    transcript: Option<(PathBuf, File)>,
}

impl<I: IoHandler> Engine<I> {
    /// Build an engine around a loaded world with the standard handlers.
    pub fn new(world: World, io: I) -> Self {
        let handlers = handlers::all();
        let mut vocab = Vocabulary::new();
        handlers.install_into(&mut vocab);
        for item in world.items.values() {
            vocab.add_item(item);
        }
        let initial = world.clone();
        Self {
            world,
            initial,
            vocab,
            handlers,
            hooks: GameHooks::new(),
            messenger: Box::new(DefaultMessenger),
            io,
            data_dir: save::default_data_dir(),
            transcript: None,
        }
    }

    /// Attach the game's hooks (events, overrides, turn hooks).
    pub fn with_hooks(mut self, hooks: GameHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the messenger (for reworded or localized games).
    pub fn with_messenger(mut self, messenger: Box<dyn Messenger>) -> Self {
        self.messenger = messenger;
        self
    }

    /// Override where saves and transcripts live.
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Register a game-specific handler, shadowing a built-in verb.
    pub fn register_handler(&mut self, handler: Box<dyn ActionHandler>) {
        self.vocab
            .register_verb(handler.verb(), handler.synonyms(), handler.syntax());
        self.handlers.register(handler);
    }

    /// Vocabulary access for game-supplied synonyms and noise words.
    pub fn vocab_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocab
    }

    /// Run the read-eval-print loop until the player quits.
    ///
    /// # Errors
    /// Propagates I/O failures from the line source; in-game failures are
    /// reported to the player instead.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();
        loop {
            let prompt = self.build_prompt();
            let Some(line) = self.io.read_line(&prompt) else {
                info!("input closed, leaving the game");
                break;
            };
            self.record_transcript(&format!("{prompt}{line}\n"));
            if self.process_turn(&line) == TurnFlow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn print_banner(&mut self) {
        if !self.world.title.is_empty() {
            let title = self.world.title.clone();
            self.io.print(&title, TextStyle::Emphasis, true);
        }
        if !self.world.intro.is_empty() {
            let intro = self.world.intro.clone();
            self.say(&intro);
        }
        let opening = self.location_description(true);
        self.say(&opening);
        self.mark_here_visited();
    }

    fn build_prompt(&self) -> String {
        format!(
            "\n[Score: {} | Moves: {}] > ",
            self.world.player.score, self.world.player.moves
        )
    }

    /// Process one line of input as a full game turn.
    pub fn process_turn(&mut self, input: &str) -> TurnFlow {
        #[cfg(feature = "dev-mode")]
        if let Some(entity) = input.trim().strip_prefix("debug ") {
            self.debug_dump(entity.trim());
            return TurnFlow::Continue;
        }

        let command = match parser::parse(input, &self.vocab, &self.world) {
            Ok(command) => command,
            Err(parse_error) => {
                // parse errors never consume a turn
                let message = self.messenger.parse_error(&parse_error);
                self.say(&message);
                return TurnFlow::Continue;
            },
        };
        self.process_command(&command)
    }

    /// Dispatch an already-parsed command. Used for the normal path and
    /// for pending-question follow-ups.
    fn process_command(&mut self, command: &Command) -> TurnFlow {
        // an unrelated command quietly withdraws a pending question
        if self.world.question.is_some() && !matches!(command.verb, Verb::Yes | Verb::No) {
            info!("pending question canceled by '{}'", command.verb);
            self.world.question = None;
        }

        let Some(handler) = self.handlers.get(command.verb) else {
            error!("no handler registered for verb '{}'", command.verb);
            let message = self.messenger.respond(&ActionResponse::InternalEngineError);
            self.say(&message);
            return TurnFlow::Continue;
        };
        let consumes_turn = handler.consumes_turn();

        let prev_location = self.world.player.location.clone();
        let result = {
            let scope = ScopeResolver::new(&self.world);
            if handler.requires_light() && !scope.is_lit() {
                let message = self.messenger.respond(&ActionResponse::RoomIsDark);
                self.say(&message);
                return TurnFlow::Continue;
            }

            let ctx = ActionContext {
                world: &self.world,
                scope: &scope,
                command,
                messenger: self.messenger.as_ref(),
            };

            // a location's before-turn hook may preempt the action outright
            let preempted = self
                .hooks
                .before_turn_for(&prev_location)
                .and_then(|hook| hook(&ctx));
            let outcome = match preempted {
                Some(result) => Ok(result),
                None => {
                    // per-item overrides shadow the default handler
                    let overridden = command
                        .dobj_item()
                        .and_then(|id| self.hooks.override_for(id, command.verb))
                        .and_then(|hook| hook(&ctx));
                    match overridden {
                        Some(result) => result,
                        None => handler.process(&ctx),
                    }
                },
            };
            match outcome {
                Ok(result) => result,
                Err(response) => {
                    // refusals cost no turn
                    let message = self.messenger.respond(&response);
                    self.say(&message);
                    return TurnFlow::Continue;
                },
            }
        };

        let was_lit = ScopeResolver::new(&self.world).is_lit();
        if let Err(change_error) = apply_changes(&mut self.world, &result.changes) {
            error!("turn rolled back: {change_error}");
            for problem in self.world.check_invariants() {
                warn!("invariant check: {problem}");
            }
            let message = self.messenger.respond(&ActionResponse::InternalEngineError);
            self.say(&message);
            return TurnFlow::Continue;
        }

        let mut narrative: Vec<String> = Vec::new();
        if !result.message.is_empty() {
            narrative.push(result.message.clone());
        }

        // location after-turn hook
        if let Some(outcome) = self
            .hooks
            .after_turn_for(&self.world.player.location.clone())
            .and_then(|hook| hook(&self.world, command))
        {
            self.apply_event_outcome(outcome, &mut narrative);
        }

        // quit/restart/restore wait until this turn's text has rendered
        let mut deferred: Vec<MetaRequest> = Vec::new();
        let mut refresh_room = false;
        for effect in &result.effects {
            match self.apply_side_effect(effect, &mut narrative, &mut deferred) {
                EffectFlow::RefreshRoom => refresh_room = true,
                EffectFlow::Continue => {},
            }
        }

        // the clock only advances for real actions
        if consumes_turn && deferred.is_empty() {
            self.world.player.moves += 1;
            self.world.turn_count += 1;
            self.tick_events(&mut narrative);
            self.run_combat_round(&mut narrative);
        }

        self.update_pronouns(command, &result);

        let player_died = !self.world.player.is_alive();
        if player_died {
            narrative.push(self.messenger.player_killed());
        }

        // re-describe on room change or when the lights just came on
        let now_lit = ScopeResolver::new(&self.world).is_lit();
        let moved = self.world.player.location != prev_location;
        if moved || (!was_lit && now_lit) || refresh_room {
            narrative.push(self.location_description(refresh_room));
            self.mark_here_visited();
        }

        // render the accumulated message for this turn...
        let text = narrative.join("\n");
        if !text.is_empty() {
            self.say(&text);
        }

        if player_died {
            return TurnFlow::Quit;
        }
        // ...then honor quit/restart/restore, each rendering on its own
        for request in deferred {
            match request {
                MetaRequest::Quit => return TurnFlow::Quit,
                MetaRequest::Restart => self.restart(),
                MetaRequest::Restore(slot) => {
                    self.restore_game(slot.as_deref().unwrap_or(DEFAULT_SAVE_SLOT));
                },
            }
        }
        TurnFlow::Continue
    }

    /// Apply one side effect. Scheduling and presentation effects act
    /// immediately; quit, restart, and restore are deferred so they run
    /// only after the turn's own text has been rendered.
    fn apply_side_effect(
        &mut self,
        effect: &SideEffect,
        narrative: &mut Vec<String>,
        deferred: &mut Vec<MetaRequest>,
    ) -> EffectFlow {
        match effect {
            SideEffect::ScheduleFuse { id, turns } => {
                self.world.scheduler.schedule_fuse(id, *turns);
            },
            SideEffect::CancelFuse { id } => {
                self.world.scheduler.cancel_fuse(id);
            },
            SideEffect::StartDaemon { id, period } => {
                self.world.scheduler.start_daemon(id, *period);
            },
            SideEffect::StopDaemon { id } => {
                self.world.scheduler.stop_daemon(id);
            },
            SideEffect::AskQuestion(question) => {
                self.world.question = Some(question.clone());
            },
            SideEffect::AnswerQuestion(answer) => {
                self.resolve_question(*answer, narrative, deferred);
            },
            SideEffect::RequestQuit => deferred.push(MetaRequest::Quit),
            SideEffect::RequestRestart => deferred.push(MetaRequest::Restart),
            SideEffect::RequestSave(slot) => {
                self.save_game(slot.as_deref().unwrap_or(DEFAULT_SAVE_SLOT), narrative);
            },
            SideEffect::RequestRestore(slot) => deferred.push(MetaRequest::Restore(slot.clone())),
            SideEffect::TranscriptOn => {
                self.transcript_on(narrative);
            },
            SideEffect::TranscriptOff => {
                self.transcript_off(narrative);
            },
            SideEffect::SetVerbose(verbose) => {
                self.world.verbose = *verbose;
            },
            SideEffect::StartCombat { enemy } => {
                if self.world.combat.is_none() {
                    info!("combat begins against '{enemy}'");
                }
                self.world.combat = Some(CombatState { enemy: enemy.clone() });
            },
            SideEffect::RefreshRoom => return EffectFlow::RefreshRoom,
        }
        EffectFlow::Continue
    }

    /// Resolve the pending question with the player's yes/no.
    fn resolve_question(&mut self, answer: bool, narrative: &mut Vec<String>, deferred: &mut Vec<MetaRequest>) {
        let Some(question) = self.world.question.take() else {
            narrative.push(self.messenger.yes_no_generic());
            return;
        };
        if !answer {
            narrative.push(question.on_no.unwrap_or_else(|| self.messenger.declined()));
            return;
        }
        match question.on_yes {
            PendingAction::Quit => deferred.push(MetaRequest::Quit),
            PendingAction::Restart => deferred.push(MetaRequest::Restart),
            PendingAction::RunCommand(command) => {
                // follow-up commands run as their own full turn
                if self.process_command(&command) == TurnFlow::Quit {
                    deferred.push(MetaRequest::Quit);
                }
            },
        }
    }

    /// Swap back to the pristine world and open a fresh scene. Runs
    /// after the confirming turn has rendered, as its own output.
    fn restart(&mut self) {
        info!("restarting from initial state");
        self.world = self.initial.clone();
        let text = format!("{}\n{}", self.messenger.restarted(), self.location_description(true));
        self.say(&text);
        self.mark_here_visited();
    }

    fn save_game(&mut self, slot: &str, narrative: &mut Vec<String>) {
        let dir = save::save_dir(&self.data_dir);
        match save::save_world(&self.world, &dir, slot) {
            Ok(_) => narrative.push(self.messenger.saved(slot)),
            Err(err) => {
                warn!("save to '{slot}' failed: {err:#}");
                narrative.push(self.messenger.save_failed(&err.to_string()));
            },
        }
    }

    /// Replace the world from a save slot. Like [`Engine::restart`],
    /// runs after the requesting turn has rendered.
    fn restore_game(&mut self, slot: &str) {
        let dir = save::save_dir(&self.data_dir);
        match save::load_slot(&dir, slot) {
            Ok(world) => {
                self.world = world;
                let text = format!("{}\n{}", self.messenger.restored(slot), self.location_description(true));
                self.say(&text);
                self.mark_here_visited();
            },
            Err(err) => {
                warn!("restore from '{slot}' failed: {err:#}");
                let mut lines = vec![self.messenger.restore_failed(&err.to_string())];
                if let Ok(entries) = save::build_save_entries(&dir) {
                    let available: Vec<String> = entries.into_iter().map(|entry| entry.slot).collect();
                    if !available.is_empty() {
                        lines.push(format!("Available saves: {}.", available.join(", ")));
                    }
                }
                self.say(&lines.join("\n"));
            },
        }
    }

    fn transcript_on(&mut self, narrative: &mut Vec<String>) {
        if let Some((path, _)) = &self.transcript {
            narrative.push(self.messenger.transcript_on(&path.display().to_string()));
            return;
        }
        let dir = save::transcript_dir(&self.data_dir);
        let opened = fs::create_dir_all(&dir)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                let path = save::transcript_file_path(&dir);
                File::create(&path).map(|file| (path, file)).map_err(Into::into)
            });
        match opened {
            Ok((path, mut file)) => {
                let stamp = OffsetDateTime::now_utc()
                    .format(&Rfc2822)
                    .unwrap_or_else(|_| "unknown time".to_string());
                let _ = writeln!(file, "Transcript of {} -- {stamp}", self.world.title);
                narrative.push(self.messenger.transcript_on(&path.display().to_string()));
                self.transcript = Some((path, file));
            },
            Err(err) => {
                warn!("could not start transcript: {err:#}");
                narrative.push(self.messenger.transcript_unavailable(&err.to_string()));
            },
        }
    }

    fn transcript_off(&mut self, narrative: &mut Vec<String>) {
        self.transcript = None;
        narrative.push(self.messenger.transcript_off());
    }

    /// Tick fuses and daemons and run whatever comes due.
    fn tick_events(&mut self, narrative: &mut Vec<String>) {
        let due = self.world.scheduler.tick(self.world.turn_count);
        for event_id in due {
            let Some(event) = self.hooks.event(&event_id) else {
                warn!("scheduled event '{event_id}' has no registered effect");
                continue;
            };
            let outcome = event(&self.world);
            self.apply_event_outcome(outcome, narrative);
        }
    }

    /// Apply an event's outcome: changes atomically, then its effects.
    fn apply_event_outcome(&mut self, outcome: EventOutcome, narrative: &mut Vec<String>) {
        if let Err(err) = apply_changes(&mut self.world, &outcome.changes) {
            error!("event outcome discarded: {err}");
            return;
        }
        if let Some(message) = outcome.message {
            narrative.push(message);
        }
        // events may not quit/restart/restore, so nothing lands here
        let mut deferred = Vec::new();
        for effect in &outcome.effects {
            match effect {
                SideEffect::RequestQuit
                | SideEffect::RequestRestart
                | SideEffect::RequestSave(_)
                | SideEffect::RequestRestore(_)
                | SideEffect::AnswerQuestion(_) => {
                    warn!("event effect {effect:?} is not allowed from events, ignored");
                },
                other => {
                    let _ = self.apply_side_effect(other, narrative, &mut deferred);
                },
            }
        }
    }

    /// While combat is live, the enemy strikes back each turn.
    fn run_combat_round(&mut self, narrative: &mut Vec<String>) {
        if self.world.combat.is_none() {
            return;
        }
        if combat::combat_over(&self.world) {
            info!("combat is over");
            self.world.combat = None;
            return;
        }
        if let Some((message, changes)) = combat::retaliation(&self.world, self.messenger.as_ref()) {
            if let Err(err) = apply_changes(&mut self.world, &changes) {
                error!("retaliation discarded: {err}");
                return;
            }
            narrative.push(message);
        }
    }

    /// Step 9: "it" follows the direct object, "them" the handled set,
    /// and him/her track characters.
    fn update_pronouns(&mut self, command: &Command, result: &ActionResult) {
        if let Some(EntityRef::Item(id)) = &command.dobj {
            self.world.set_pronoun("it", [id.clone()]);
            if self.world.items.get(id).is_some_and(|item| item.has(ItemFlag::Character)) {
                self.world.set_pronoun("him", [id.clone()]);
                self.world.set_pronoun("her", [id.clone()]);
            }
        }
        if result.handled.len() > 1 || command.is_all {
            self.world.set_pronoun("them", result.handled.iter().cloned());
            if result.handled.len() == 1 {
                self.world.set_pronoun("it", result.handled.iter().cloned());
            }
        }
    }

    /// Describe the player's location: name, prose (full or brief), and
    /// the visible items resting here.
    fn location_description(&self, force_full: bool) -> String {
        let scope = ScopeResolver::new(&self.world);
        if !scope.is_lit() {
            return self.messenger.room_is_dark();
        }
        let Ok(location) = self.world.player_location_ref() else {
            error!("player location '{}' is missing", self.world.player.location);
            return self.messenger.respond(&ActionResponse::InternalEngineError);
        };

        let mut lines = vec![location.name.clone()];
        if force_full || self.world.verbose || !location.visited {
            lines.push(location.description.clone());
        }

        let mut present: Vec<_> = self
            .world
            .children_of(Parent::Location(location.id.clone()))
            .filter(|item| !item.has(ItemFlag::Scenery) && !item.has(ItemFlag::OmitDescription))
            .collect();
        present.sort_by(|a, b| a.name.cmp(&b.name));
        for item in present {
            let line = match item.prop_text(prop::FIRST_DESCRIPTION) {
                Some(first) if !item.has(ItemFlag::Touched) => first.to_string(),
                _ => self.messenger.item_is_here(&item.name),
            };
            lines.push(line);
        }
        lines.join("\n")
    }

    fn mark_here_visited(&mut self) {
        let here = self.world.player.location.clone();
        if let Some(location) = self.world.locations.get_mut(&here) {
            location.visited = true;
        }
    }

    /// Print narrative text and mirror it into the transcript.
    fn say(&mut self, text: &str) {
        self.io.print(text, TextStyle::Normal, true);
        self.record_transcript(&format!("{text}\n"));
    }

    fn record_transcript(&mut self, text: &str) {
        if let Some((path, file)) = &mut self.transcript
            && file.write_all(text.as_bytes()).is_err()
        {
            warn!("transcript write to {} failed; closing it", path.display());
            self.transcript = None;
        }
    }

    /// Developer aid: dump an entity's full state as pretty RON.
    #[cfg(feature = "dev-mode")]
    fn debug_dump(&mut self, entity: &str) {
        let dumped = if let Some(item) = self.world.items.get(entity) {
            ron::ser::to_string_pretty(item, ron::ser::PrettyConfig::default())
        } else if let Some(location) = self.world.locations.get(entity) {
            ron::ser::to_string_pretty(location, ron::ser::PrettyConfig::default())
        } else if entity == "player" {
            ron::ser::to_string_pretty(&self.world.player, ron::ser::PrettyConfig::default())
        } else {
            self.io
                .print(&format!("debug: no entity with id '{entity}'"), TextStyle::System, true);
            return;
        };
        match dumped {
            Ok(text) => self.io.print(&text, TextStyle::System, true),
            Err(err) => self.io.print(&format!("debug: {err}"), TextStyle::System, true),
        }
    }
}

enum EffectFlow {
    Continue,
    RefreshRoom,
}

/// A meta request honored only after the turn's text has been rendered.
enum MetaRequest {
    Quit,
    Restart,
    Restore(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::StateChange;
    use crate::io::MemoryIo;
    use crate::item::{Item, PropValue};
    use crate::location::{Direction, Exit, Location};

    fn location(id: &str, lit: bool) -> Location {
        Location {
            id: id.into(),
            name: id.to_string(),
            description: format!("You are in the {id}."),
            lit,
            ..Location::default()
        }
    }

    fn item(id: &str, parent: Parent, flags: &[ItemFlag]) -> Item {
        let mut item = Item {
            id: id.into(),
            name: id.to_string(),
            parent,
            size: 1,
            capacity: -1,
            ..Item::default()
        };
        for flag in flags {
            item.set(*flag);
        }
        item
    }

    fn test_world() -> World {
        let mut world = World::new_empty();
        world.title = "Test Game".into();
        world.locations.insert("cave".into(), location("cave", true));
        world.player.location = "cave".into();
        world
    }

    fn engine(world: World) -> Engine<MemoryIo> {
        Engine::new(world, MemoryIo::default())
    }

    #[test]
    fn successful_take_consumes_a_turn() {
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut engine = engine(world);

        assert_eq!(engine.process_turn("take coin"), TurnFlow::Continue);
        assert!(engine.io.transcript().contains("Taken."));
        assert_eq!(engine.world.player.moves, 1);
        assert_eq!(engine.world.turn_count, 1);
        assert!(engine.world.is_held("coin"));
    }

    #[test]
    fn parse_errors_cost_nothing() {
        let mut engine = engine(test_world());
        engine.process_turn("florble the baz");
        engine.process_turn("");
        assert_eq!(engine.world.player.moves, 0);
        assert_eq!(engine.world.turn_count, 0);
        assert!(engine.io.transcript().contains("don't know the word"));
    }

    #[test]
    fn refusals_cost_nothing() {
        let mut world = test_world();
        world
            .items
            .insert("boulder".into(), item("boulder", Parent::Location("cave".into()), &[ItemFlag::Scenery]));
        let mut engine = engine(world);

        engine.process_turn("take boulder");
        assert_eq!(engine.world.player.moves, 0);
        assert!(engine.io.transcript().contains("can't take"));
    }

    #[test]
    fn movement_describes_the_new_location() {
        let mut world = test_world();
        world.locations.insert("ledge".into(), location("ledge", true));
        world
            .locations
            .get_mut("cave")
            .unwrap()
            .exits
            .insert(Direction::North, Exit::leading_to("ledge"));
        let mut engine = engine(world);

        engine.process_turn("north");
        let output = engine.io.transcript();
        assert!(output.contains("You are in the ledge."));
        assert_eq!(engine.world.player.location, "ledge");
        assert!(engine.world.locations["ledge"].visited);
    }

    #[test]
    fn brief_mode_skips_known_descriptions() {
        let mut world = test_world();
        world.locations.insert("ledge".into(), location("ledge", true));
        world.locations.get_mut("ledge").unwrap().visited = true;
        world
            .locations
            .get_mut("cave")
            .unwrap()
            .exits
            .insert(Direction::North, Exit::leading_to("ledge"));
        let mut engine = engine(world);

        engine.process_turn("brief");
        engine.process_turn("north");
        let output = engine.io.transcript();
        assert!(output.contains("ledge"));
        assert!(!output.contains("You are in the ledge."));
    }

    #[test]
    fn turning_on_a_light_reprints_the_room() {
        let mut world = test_world();
        world.locations.get_mut("cave").unwrap().lit = false;
        world.items.insert(
            "lantern".into(),
            item(
                "lantern",
                Parent::Player,
                &[ItemFlag::Takable, ItemFlag::Device, ItemFlag::LightSource],
            ),
        );
        let mut engine = engine(world);

        engine.process_turn("look");
        assert!(engine.io.transcript().contains("pitch black"));

        engine.process_turn("turn on lantern");
        let output = engine.io.transcript();
        assert!(output.contains("now on"));
        assert!(output.contains("You are in the cave."));
    }

    #[test]
    fn dark_rooms_block_sight_requiring_verbs() {
        let mut world = test_world();
        world.locations.get_mut("cave").unwrap().lit = false;
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut engine = engine(world);

        engine.process_turn("take coin");
        assert!(engine.io.transcript().contains("here")); // not-in-scope wording
        assert_eq!(engine.world.player.moves, 0);
    }

    #[test]
    fn quit_asks_and_honors_the_answer() {
        let mut engine = engine(test_world());

        assert_eq!(engine.process_turn("quit"), TurnFlow::Continue);
        assert!(engine.world.question.is_some());

        assert_eq!(engine.process_turn("no"), TurnFlow::Continue);
        assert!(engine.world.question.is_none());

        engine.process_turn("quit");
        assert_eq!(engine.process_turn("yes"), TurnFlow::Quit);
    }

    #[test]
    fn unrelated_command_cancels_pending_question() {
        let mut engine = engine(test_world());
        engine.process_turn("quit");
        assert!(engine.world.question.is_some());
        engine.process_turn("look");
        assert!(engine.world.question.is_none());
        // a later YES has nothing to answer
        engine.process_turn("yes");
        assert!(engine.io.transcript().contains("rhetorical"));
    }

    #[test]
    fn restart_returns_to_initial_state() {
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut engine = engine(world);

        engine.process_turn("take coin");
        assert!(engine.world.is_held("coin"));

        engine.process_turn("restart");
        engine.process_turn("yes");
        assert!(!engine.world.is_held("coin"));
        assert_eq!(engine.world.player.moves, 0);
        assert!(engine.io.transcript().contains("Starting over."));
    }

    #[test]
    fn save_and_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut engine = Engine::new(world, MemoryIo::default()).with_data_dir(dir.path().to_path_buf());

        engine.process_turn("take coin");
        engine.process_turn("save");
        assert!(engine.io.transcript().contains("saved"));

        engine.process_turn("drop coin");
        assert!(!engine.world.is_held("coin"));

        engine.process_turn("restore");
        assert!(engine.world.is_held("coin"));
        assert!(engine.io.transcript().contains("restored"));
    }

    #[test]
    fn restore_without_save_lists_nothing_and_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new(test_world(), MemoryIo::default()).with_data_dir(dir.path().to_path_buf());
        engine.process_turn("restore");
        assert!(engine.io.transcript().contains("Restore failed"));
    }

    #[test]
    fn fuse_fires_after_three_waits() {
        let mut world = test_world();
        world
            .items
            .insert("butter".into(), item("butter", Parent::Location("cave".into()), &[]));
        world.scheduler.schedule_fuse("butter-softens", 3);

        let mut hooks = GameHooks::new();
        hooks.on_event("butter-softens", |_world| EventOutcome {
            message: Some("The butter has softened.".into()),
            changes: vec![StateChange::SetProp {
                item: "butter".into(),
                key: "melted".into(),
                value: PropValue::Flag(true),
            }],
            effects: Vec::new(),
        });
        let mut engine = Engine::new(world, MemoryIo::default()).with_hooks(hooks);

        engine.process_turn("wait");
        engine.process_turn("wait");
        assert!(!engine.io.transcript().contains("softened"));
        engine.process_turn("wait");
        assert!(engine.io.transcript().contains("The butter has softened."));
        assert!(engine.world.items["butter"].prop_flag("melted"));
    }

    #[test]
    fn daemon_runs_on_its_period() {
        let mut world = test_world();
        world.scheduler.start_daemon("dripping", 2);
        let mut hooks = GameHooks::new();
        hooks.on_event("dripping", |_world| EventOutcome {
            message: Some("Drip.".into()),
            ..EventOutcome::default()
        });
        let mut engine = Engine::new(world, MemoryIo::default()).with_hooks(hooks);

        engine.process_turn("wait");
        assert!(!engine.io.transcript().contains("Drip."));
        engine.process_turn("wait");
        assert!(engine.io.transcript().contains("Drip."));
    }

    #[test]
    fn meta_verbs_do_not_tick_events() {
        let mut world = test_world();
        world.scheduler.schedule_fuse("bomb", 1);
        let mut hooks = GameHooks::new();
        hooks.on_event("bomb", |_world| EventOutcome {
            message: Some("BOOM".into()),
            ..EventOutcome::default()
        });
        let mut engine = Engine::new(world, MemoryIo::default()).with_hooks(hooks);

        engine.process_turn("score");
        engine.process_turn("inventory");
        assert!(!engine.io.transcript().contains("BOOM"));
        engine.process_turn("wait");
        assert!(engine.io.transcript().contains("BOOM"));
    }

    #[test]
    fn pronoun_it_tracks_last_direct_object() {
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut engine = engine(world);

        engine.process_turn("take coin");
        engine.process_turn("drop it");
        assert_eq!(
            engine.world.items["coin"].parent,
            Parent::Location("cave".into())
        );
    }

    #[test]
    fn per_item_override_replaces_default_behavior() {
        let mut world = test_world();
        world.items.insert(
            "monolith".into(),
            item("monolith", Parent::Location("cave".into()), &[ItemFlag::Scenery]),
        );
        let mut hooks = GameHooks::new();
        hooks.override_verb("monolith", Verb::Touch, |_ctx| {
            Some(Ok(ActionResult::with_message("The monolith thrums under your palm.")))
        });
        let mut engine = Engine::new(world, MemoryIo::default()).with_hooks(hooks);

        engine.process_turn("touch monolith");
        assert!(engine.io.transcript().contains("thrums"));
    }

    #[test]
    fn before_turn_hook_preempts_the_action() {
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        let mut hooks = GameHooks::new();
        hooks.before_turn_in("cave", |ctx| {
            if ctx.command.verb == Verb::Take {
                Some(ActionResult::with_message("A ghostly hand slaps yours away."))
            } else {
                None
            }
        });
        let mut engine = Engine::new(world, MemoryIo::default()).with_hooks(hooks);

        engine.process_turn("take coin");
        assert!(engine.io.transcript().contains("ghostly hand"));
        assert!(!engine.world.is_held("coin"));
    }

    #[test]
    fn combat_retaliation_hurts_the_player() {
        let mut world = test_world();
        let mut troll = item(
            "troll",
            Parent::Location("cave".into()),
            &[ItemFlag::Character, ItemFlag::IsEnemy],
        );
        troll.sheet = Some(crate::item::CharacterSheet {
            health: 1000,
            max_health: 1000,
            damage: 5,
            requires_weapon: false,
            preferred_weapon: None,
        });
        world.items.insert("troll".into(), troll);
        let mut engine = engine(world);

        engine.process_turn("attack troll");
        assert!(engine.world.combat.is_some());
        assert!(engine.world.player.health < engine.world.player.max_health);
        assert!(engine.io.transcript().contains("strikes back"));
    }

    #[test]
    fn invariants_hold_after_each_turn() {
        let mut world = test_world();
        world
            .items
            .insert("coin".into(), item("coin", Parent::Location("cave".into()), &[ItemFlag::Takable]));
        world.items.insert(
            "box".into(),
            item(
                "box",
                Parent::Location("cave".into()),
                &[ItemFlag::Container, ItemFlag::Openable, ItemFlag::Open, ItemFlag::Takable],
            ),
        );
        let mut engine = engine(world);

        for input in ["take coin", "put coin in box", "take coin from box", "drop coin", "wait"] {
            engine.process_turn(input);
            assert!(
                engine.world.check_invariants().is_empty(),
                "invariants broken after '{input}'"
            );
        }
    }
}
