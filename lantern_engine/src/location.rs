//! Location definitions and spatial types.
//!
//! Any place the player can stand is a [`Location`], whether it's a closet
//! or a canyon. Exits connect locations and may be gated by a door item or
//! replaced entirely by a blocked message.

use crate::Id;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

/// A compass or vertical direction the player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// All directions, in the order exit lists are shown.
    pub const ALL: [Direction; 12] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Northeast,
        Direction::Northwest,
        Direction::Southeast,
        Direction::Southwest,
        Direction::Up,
        Direction::Down,
        Direction::In,
        Direction::Out,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts full names and the usual abbreviations (n/s/e/w/ne/nw/se/sw/u/d).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dir = match s {
            "north" | "n" => Direction::North,
            "south" | "s" => Direction::South,
            "east" | "e" => Direction::East,
            "west" | "w" => Direction::West,
            "northeast" | "ne" => Direction::Northeast,
            "northwest" | "nw" => Direction::Northwest,
            "southeast" | "se" => Direction::Southeast,
            "southwest" | "sw" => Direction::Southwest,
            "up" | "u" => Direction::Up,
            "down" | "d" => Direction::Down,
            "in" | "inside" => Direction::In,
            "out" | "outside" => Direction::Out,
            other => return Err(format!("unknown direction '{other}'")),
        };
        Ok(dir)
    }
}

/// An exit from one location to another.
///
/// With a `door`, that item must be open (and so unlocked) to pass.
/// With a `blocked_message` the exit never leads anywhere; trying it
/// just prints the message.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Exit {
    pub to: Option<Id>,
    pub door: Option<Id>,
    pub blocked_message: Option<String>,
}

impl Exit {
    /// Create a plain exit leading to the location with the given id.
    pub fn leading_to(to: impl Into<Id>) -> Self {
        Self {
            to: Some(to.into()),
            door: None,
            blocked_message: None,
        }
    }
}

/// Any visitable place in the game world.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Location {
    pub id: Id,
    pub name: String,
    pub description: String,
    /// Lit without any light source present.
    pub lit: bool,
    pub visited: bool,
    pub exits: BTreeMap<Direction, Exit>,
    /// Items treated as present here without being contained here.
    pub globals: BTreeSet<Id>,
}

impl Location {
    /// Look up the exit in a direction, if one exists.
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.get(&direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_abbreviations_parse() {
        assert_eq!("n".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("sw".parse::<Direction>().unwrap(), Direction::Southwest);
        assert_eq!("u".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("inside".parse::<Direction>().unwrap(), Direction::In);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_display_round_trips() {
        for dir in Direction::ALL {
            let parsed: Direction = dir.to_string().parse().unwrap();
            assert_eq!(parsed, dir);
        }
    }

    #[test]
    fn exit_lookup() {
        let mut cellar = Location {
            id: "cellar".into(),
            name: "Cellar".into(),
            description: "A damp cellar.".into(),
            lit: false,
            ..Location::default()
        };
        cellar.exits.insert(Direction::Up, Exit::leading_to("kitchen"));
        assert_eq!(
            cellar.exit(Direction::Up).and_then(|e| e.to.as_deref()),
            Some("kitchen")
        );
        assert!(cellar.exit(Direction::North).is_none());
    }
}
