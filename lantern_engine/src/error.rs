//! The engine's two closed error taxonomies.
//!
//! [`ParseError`] covers everything that can go wrong turning a line of
//! input into a [`crate::command::Command`]. [`ActionResponse`] covers
//! refusals raised by verb handlers during validation. Both carry
//! player-presentable default wording; games can reword either through
//! the [`crate::messages::Messenger`].

use thiserror::Error;

/// Everything the parser can report instead of a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Beg your pardon?")]
    EmptyInput,

    #[error("I don't know the word \"{0}\".")]
    UnknownVerb(String),

    #[error("{0}")]
    BadGrammar(String),

    #[error("I don't know the word \"{0}\".")]
    UnknownNoun(String),

    #[error("You don't see any {0} here.")]
    ItemNotInScope(String),

    #[error("You don't see any {} {noun} here.", modifiers.join(" "))]
    ModifierMismatch { noun: String, modifiers: Vec<String> },

    #[error("{0}")]
    Ambiguity(String),

    #[error("I'm not sure what \"{0}\" refers to.")]
    PronounNotSet(String),

    #[error("You can't see what \"{0}\" refers to anymore.")]
    PronounOutOfScope(String),

    #[error("\"{0}\" could mean several things here; be more specific.")]
    AmbiguousPronoun(String),

    #[error("Something went wrong inside the game.")]
    Internal(String),
}

impl ParseError {
    /// How specific the error is; used to pick the best error when
    /// several syntax rules fail in different ways. Resolution errors
    /// outrank grammar errors because they prove the sentence shape was
    /// understood.
    pub fn specificity(&self) -> u8 {
        match self {
            ParseError::EmptyInput => 0,
            ParseError::UnknownVerb(_) => 1,
            ParseError::BadGrammar(_) => 2,
            ParseError::UnknownNoun(_) => 3,
            ParseError::ItemNotInScope(_)
            | ParseError::PronounNotSet(_)
            | ParseError::PronounOutOfScope(_)
            | ParseError::AmbiguousPronoun(_) => 4,
            ParseError::ModifierMismatch { .. } => 5,
            ParseError::Ambiguity(_) => 6,
            ParseError::Internal(_) => 7,
        }
    }
}

/// A handler's refusal to perform an action.
///
/// These surface to the player as a short message and, per the engine's
/// error policy, do not consume a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionResponse {
    #[error("What do you want to {0}?")]
    DoWhat(String),

    #[error("You aren't holding the {0}.")]
    ItemNotHeld(String),

    #[error("You can't reach the {0}.")]
    ItemNotAccessible(String),

    #[error("The {0} is closed.")]
    ContainerIsClosed(String),

    #[error("The {0} is locked.")]
    ItemIsLocked(String),

    #[error("The {0} doesn't fit the lock.")]
    WrongKey(String),

    #[error("You can't wear the {0}.")]
    ItemNotWearable(String),

    #[error("You're already wearing the {0}.")]
    ItemAlreadyWorn(String),

    #[error("You aren't wearing the {0}.")]
    ItemIsNotWorn(String),

    #[error("You can't remove the {0}.")]
    ItemNotRemovable(String),

    #[error("The {0} isn't something you can open.")]
    ItemNotOpenable(String),

    #[error("The {0} is already open.")]
    ItemAlreadyOpen(String),

    #[error("The {0} is already closed.")]
    ItemAlreadyClosed(String),

    #[error("You can't drop the {0}.")]
    ItemNotDroppable(String),

    #[error("There's nothing written on the {0}.")]
    ItemNotReadable(String),

    #[error("You can't take the {0}.")]
    ItemNotTakable(String),

    #[error("You're carrying too much already.")]
    PlayerCannotCarryMore,

    #[error("The {0} won't fit.")]
    ItemTooLargeForContainer(String),

    #[error("You can't put anything in the {0}.")]
    TargetIsNotAContainer(String),

    #[error("You can't put anything on the {0}.")]
    TargetIsNotASurface(String),

    #[error("{0}")]
    DirectionIsBlocked(String),

    #[error("You can't go that way.")]
    InvalidDirection,

    #[error("It's too dark to see!")]
    RoomIsDark,

    #[error("You can't {verb} the {item}.")]
    CannotDo { verb: String, item: String },

    #[error("You can't {verb} the {item} with the {tool}.")]
    CannotDoWithThat { verb: String, item: String, tool: String },

    #[error("{0}")]
    Feedback(String),

    #[error("Something went wrong inside the game.")]
    InternalEngineError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_errors_outrank_grammar_errors() {
        let grammar = ParseError::BadGrammar("That sentence has too many words.".into());
        let scope = ParseError::ItemNotInScope("lamp".into());
        let ambiguity = ParseError::Ambiguity("Which apple do you mean?".into());
        assert!(scope.specificity() > grammar.specificity());
        assert!(ambiguity.specificity() > scope.specificity());
    }

    #[test]
    fn modifier_mismatch_lists_modifiers() {
        let err = ParseError::ModifierMismatch {
            noun: "apple".into(),
            modifiers: vec!["blue".into(), "glowing".into()],
        };
        assert_eq!(err.to_string(), "You don't see any blue glowing apple here.");
    }

    #[test]
    fn action_response_default_wording() {
        assert_eq!(
            ActionResponse::ItemNotHeld("sword".into()).to_string(),
            "You aren't holding the sword."
        );
        assert_eq!(
            ActionResponse::CannotDoWithThat {
                verb: "cut".into(),
                item: "rope".into(),
                tool: "banana".into(),
            }
            .to_string(),
            "You can't cut the rope with the banana."
        );
        assert_eq!(ActionResponse::RoomIsDark.to_string(), "It's too dark to see!");
    }
}
