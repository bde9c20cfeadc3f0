//! The messenger: every player-visible sentence the core produces.
//!
//! Handlers and the engine never hardcode narrative text; they ask the
//! [`Messenger`] for it. The trait's default implementations are the
//! engine's last-resort wording, so a game overrides only what it wants
//! to reword or localize. [`DefaultMessenger`] uses the defaults as-is.

use crate::error::{ActionResponse, ParseError};

/// Source of all user-visible wording.
///
/// Implementations should be cheap to call; the engine may ask for a
/// message it ends up not printing.
pub trait Messenger {
    /// Wording for a parser failure.
    fn parse_error(&self, error: &ParseError) -> String {
        error.to_string()
    }

    /// Wording for a handler refusal.
    fn respond(&self, response: &ActionResponse) -> String {
        response.to_string()
    }

    fn taken(&self) -> String {
        "Taken.".to_string()
    }

    fn dropped(&self) -> String {
        "Dropped.".to_string()
    }

    fn all_taken(&self, name: &str) -> String {
        format!("{name}: Taken.")
    }

    fn all_dropped(&self, name: &str) -> String {
        format!("{name}: Dropped.")
    }

    fn nothing_to_take(&self) -> String {
        "There's nothing here to take.".to_string()
    }

    fn nothing_to_drop(&self) -> String {
        "You aren't carrying anything.".to_string()
    }

    fn opened(&self, name: &str) -> String {
        format!("You open the {name}.")
    }

    fn opened_revealing(&self, name: &str, contents: &[String]) -> String {
        format!("Opening the {name} reveals {}.", join_names(contents))
    }

    fn closed(&self, name: &str) -> String {
        format!("You close the {name}.")
    }

    fn locked(&self, name: &str, key: &str) -> String {
        format!("You lock the {name} with the {key}.")
    }

    fn unlocked(&self, name: &str, key: &str) -> String {
        format!("You unlock the {name} with the {key}.")
    }

    fn worn(&self, name: &str) -> String {
        format!("You put on the {name}.")
    }

    fn removed_garment(&self, name: &str) -> String {
        format!("You take off the {name}.")
    }

    fn turned_on(&self, name: &str) -> String {
        format!("The {name} is now on.")
    }

    fn turned_off(&self, name: &str) -> String {
        format!("The {name} is now off.")
    }

    fn darkness_warning(&self) -> String {
        "It is now pitch black.".to_string()
    }

    fn room_is_dark(&self) -> String {
        "It is pitch black. You are likely to be eaten by a grue.".to_string()
    }

    fn burned(&self, name: &str) -> String {
        format!("The {name} catches fire.")
    }

    fn extinguished(&self, name: &str) -> String {
        format!("The {name} is extinguished.")
    }

    fn inflated(&self, name: &str) -> String {
        format!("The {name} inflates.")
    }

    fn deflated(&self, name: &str) -> String {
        format!("The {name} deflates.")
    }

    fn put_on_surface(&self, name: &str, surface: &str) -> String {
        format!("You put the {name} on the {surface}.")
    }

    fn put_in_container(&self, name: &str, container: &str) -> String {
        format!("You put the {name} in the {container}.")
    }

    fn circular_containment(&self, name: &str, container: &str) -> String {
        format!("You can't put the {name} inside the {container} while it's inside the {name}!")
    }

    fn eaten(&self, name: &str) -> String {
        format!("You eat the {name}. Not bad.")
    }

    fn drunk(&self, name: &str) -> String {
        format!("You drink the {name}. Refreshing.")
    }

    fn inventory_header(&self) -> String {
        "You are carrying:".to_string()
    }

    fn inventory_empty(&self) -> String {
        "You are empty-handed.".to_string()
    }

    fn item_is_here(&self, name: &str) -> String {
        format!("There is a {name} here.")
    }

    fn contents_of(&self, name: &str, contents: &[String]) -> String {
        format!("The {name} contains {}.", join_names(contents))
    }

    fn container_empty(&self, name: &str) -> String {
        format!("The {name} is empty.")
    }

    fn on_top_of(&self, name: &str, contents: &[String]) -> String {
        format!("On the {name} {} {}.", is_are(contents), join_names(contents))
    }

    fn nothing_special(&self, name: &str) -> String {
        format!("You see nothing special about the {name}.")
    }

    fn door_state(&self, name: &str, open: bool, locked: bool) -> String {
        if locked {
            format!("The {name} is closed and locked.")
        } else if open {
            format!("The {name} is open.")
        } else {
            format!("The {name} is closed.")
        }
    }

    fn examine_self(&self, health: i64, max_health: i64) -> String {
        format!("As good-looking as ever. Health: {health}/{max_health}.")
    }

    fn wait_message(&self) -> String {
        "Time passes.".to_string()
    }

    fn score_report(&self, score: i64, moves: usize) -> String {
        format!("Your score is {score}, in {moves} moves.")
    }

    fn xyzzy(&self) -> String {
        "A hollow voice says \"Fool.\"".to_string()
    }

    fn help_text(&self) -> String {
        [
            "Play by typing commands like TAKE LANTERN, OPEN MAILBOX, or PUT BOOK ON TABLE.",
            "Move with compass directions (NORTH, SW, UP...) or GO <direction>.",
            "Useful verbs: LOOK, EXAMINE, INVENTORY (I), SCORE, WAIT (Z).",
            "Meta commands: SAVE, RESTORE, RESTART, QUIT, SCRIPT/UNSCRIPT, VERBOSE/BRIEF.",
        ]
        .join("\n")
    }

    fn quit_confirm(&self) -> String {
        "Are you sure you want to quit?".to_string()
    }

    fn restart_confirm(&self) -> String {
        "Are you sure you want to restart from the beginning?".to_string()
    }

    fn declined(&self) -> String {
        "Okay.".to_string()
    }

    fn yes_no_generic(&self) -> String {
        "That was a rhetorical question, apparently.".to_string()
    }

    fn saved(&self, slot: &str) -> String {
        format!("Game saved to slot '{slot}'.")
    }

    fn save_failed(&self, reason: &str) -> String {
        format!("Save failed: {reason}")
    }

    fn restored(&self, slot: &str) -> String {
        format!("Game restored from slot '{slot}'.")
    }

    fn restore_failed(&self, reason: &str) -> String {
        format!("Restore failed: {reason}")
    }

    fn restarted(&self) -> String {
        "Starting over.".to_string()
    }

    fn transcript_on(&self, path: &str) -> String {
        format!("Transcript started: {path}")
    }

    fn transcript_off(&self) -> String {
        "Transcript ended.".to_string()
    }

    fn transcript_unavailable(&self, reason: &str) -> String {
        format!("Transcript unavailable: {reason}")
    }

    fn verbose_set(&self) -> String {
        "Maximum verbosity.".to_string()
    }

    fn brief_set(&self) -> String {
        "Brief descriptions.".to_string()
    }

    fn attack_hit(&self, target: &str, damage: i64) -> String {
        format!("You strike the {target} for {damage}!")
    }

    fn attack_killed(&self, target: &str) -> String {
        format!("The {target} collapses, defeated.")
    }

    fn enemy_strikes(&self, attacker: &str, damage: i64) -> String {
        format!("The {attacker} strikes back at you for {damage}!")
    }

    fn player_killed(&self) -> String {
        "You have died.".to_string()
    }

    fn needs_weapon(&self, target: &str) -> String {
        format!("Attacking the {target} bare-handed would be suicide.")
    }

    fn ask_about_what(&self, name: &str) -> String {
        format!("What do you want to ask the {name} about?")
    }

    fn no_comment(&self, name: &str) -> String {
        format!("The {name} has nothing to say about that.")
    }

    fn tell_default(&self, name: &str) -> String {
        format!("The {name} listens politely.")
    }

    fn not_a_conversationalist(&self, name: &str) -> String {
        format!("Talking to the {name} gets you nowhere.")
    }

    fn universal_response(&self, verb: &str, universal: &str) -> String {
        format!("You can't {verb} the {universal}.")
    }

    fn smell_nothing(&self) -> String {
        "You smell nothing unusual.".to_string()
    }

    fn listen_nothing(&self) -> String {
        "You hear nothing unexpected.".to_string()
    }

    fn touched_it(&self, name: &str) -> String {
        format!("You feel nothing unexpected about the {name}.")
    }

    fn push_no_effect(&self, name: &str) -> String {
        format!("Pushing the {name} accomplishes nothing.")
    }

    fn pull_no_effect(&self, name: &str) -> String {
        format!("Pulling the {name} accomplishes nothing.")
    }

    fn jump(&self) -> String {
        "You jump on the spot, fruitlessly.".to_string()
    }

    fn shout(&self) -> String {
        "Aaaarrrrgggghhhh!".to_string()
    }

    fn pray(&self) -> String {
        "Your prayers go unanswered.".to_string()
    }

    fn sing(&self) -> String {
        "Your singing is abominable.".to_string()
    }

    fn sleep(&self) -> String {
        "This is no time for a nap.".to_string()
    }

    fn swim(&self) -> String {
        "There's no water deep enough here.".to_string()
    }

    fn wave_hands(&self) -> String {
        "You wave. Nothing happens.".to_string()
    }

    fn dig_no_effect(&self) -> String {
        "The ground here is too hard for digging.".to_string()
    }

    fn dug(&self, name: &str) -> String {
        format!("You dig at the {name} for a while, finding nothing.")
    }

    fn knock_no_answer(&self, name: &str) -> String {
        format!("You knock on the {name}. No answer.")
    }

    fn given(&self, name: &str, person: &str) -> String {
        format!("You give the {name} to the {person}.")
    }

    fn thrown(&self, name: &str) -> String {
        format!("The {name} sails through the air and lands nearby.")
    }

    fn smash_refusal(&self, name: &str) -> String {
        format!("Taking out your frustrations on the {name} won't help.")
    }

    fn climb_no_tree(&self, name: &str) -> String {
        format!("Climbing the {name} gets you nowhere.")
    }

    fn search_found_nothing(&self, name: &str) -> String {
        format!("Your search of the {name} turns up nothing new.")
    }

    fn already_holding(&self, name: &str) -> String {
        format!("You already have the {name}.")
    }

    fn contain_itself(&self, name: &str) -> String {
        format!("You can't put the {name} inside itself.")
    }

    fn already_locked(&self, name: &str) -> String {
        format!("The {name} is already locked.")
    }

    fn already_unlocked(&self, name: &str) -> String {
        format!("The {name} isn't locked.")
    }

    fn close_it_first(&self, name: &str) -> String {
        format!("You'll have to close the {name} first.")
    }

    fn already_on(&self, name: &str) -> String {
        format!("The {name} is already on.")
    }

    fn already_off(&self, name: &str) -> String {
        format!("The {name} is already off.")
    }

    fn already_burning(&self, name: &str) -> String {
        format!("The {name} is already burning.")
    }

    fn not_burning(&self, name: &str) -> String {
        format!("The {name} isn't on fire.")
    }

    fn already_inflated(&self, name: &str) -> String {
        format!("The {name} is already inflated.")
    }

    fn not_inflated(&self, name: &str) -> String {
        format!("The {name} isn't inflated.")
    }

    fn door_is_closed(&self, name: &str) -> String {
        format!("The {name} is closed.")
    }

    fn wave_item(&self, name: &str) -> String {
        format!("You wave the {name} around. Nothing happens.")
    }

    fn self_target_refusal(&self, verb: &str) -> String {
        format!("You can't {verb} yourself.")
    }

    fn device_status(&self, name: &str, on: bool) -> String {
        format!("The {name} is currently {}.", if on { "on" } else { "off" })
    }
}

/// A messenger that uses every default wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessenger;

impl Messenger for DefaultMessenger {}

/// Join names into "a, b and c" prose.
fn join_names(names: &[String]) -> String {
    match names {
        [] => "nothing".to_string(),
        [only] => format!("a {only}"),
        [head @ .., last] => {
            let head = head.iter().map(|n| format!("a {n}")).collect::<Vec<_>>().join(", ");
            format!("{head} and a {last}")
        },
    }
}

fn is_are(names: &[String]) -> &'static str {
    if names.len() == 1 { "is" } else { "are" }
}
