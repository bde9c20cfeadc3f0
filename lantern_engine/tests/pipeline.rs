//! End-to-end tests of the command pipeline: parse, dispatch, apply,
//! schedule, describe. Worlds are built through the loader where the
//! scenario allows, so the full startup path gets exercised too.

use lantern_engine::change::StateChange;
use lantern_engine::hooks::EventOutcome;
use lantern_engine::item::{PropValue, prop};
use lantern_engine::{
    Direction, Engine, Exit, GameHooks, Item, ItemFlag, Location, MemoryIo, Parent, TurnFlow, World, build_world,
};

use lantern_data::{EventDef, EventKind, GameDef, ItemDef, LocationDef, ParentDef, PlayerDef, PropDef, WorldDef};

fn location(id: &str, lit: bool) -> Location {
    Location {
        id: id.into(),
        name: id.to_string(),
        description: format!("This is the {id}."),
        lit,
        ..Location::default()
    }
}

fn item(id: &str, name: &str, parent: Parent, flags: &[ItemFlag]) -> Item {
    let mut item = Item {
        id: id.into(),
        name: name.into(),
        parent,
        size: 1,
        capacity: -1,
        ..Item::default()
    };
    for word in name.split_whitespace().rev().skip(1) {
        item.adjectives.insert(word.to_string());
    }
    for flag in flags {
        item.set(*flag);
    }
    item
}

fn engine_for(world: World) -> Engine<MemoryIo> {
    Engine::new(world, MemoryIo::default())
}

/// S1: the opening moves of every adventure ever written.
#[test]
fn s1_take_open_read() {
    let def = WorldDef {
        game: GameDef {
            title: "West of House".into(),
            player: PlayerDef {
                start_location: "west-of-house".into(),
                ..PlayerDef::default()
            },
            ..GameDef::default()
        },
        locations: vec![LocationDef {
            id: "west-of-house".into(),
            name: "West of House".into(),
            description: "You are standing in an open field west of a white house.".into(),
            lit: true,
            exits: Vec::new(),
            globals: Vec::new(),
        }],
        items: vec![
            ItemDef {
                id: "brass-lantern".into(),
                name: "brass lantern".into(),
                parent: ParentDef::Location("west-of-house".into()),
                flags: vec!["takable".into(), "device".into(), "lightSource".into()],
                ..ItemDef::default()
            },
            ItemDef {
                id: "small-mailbox".into(),
                name: "small mailbox".into(),
                parent: ParentDef::Location("west-of-house".into()),
                flags: vec!["container".into(), "openable".into(), "scenery".into()],
                ..ItemDef::default()
            },
            ItemDef {
                id: "leaflet".into(),
                name: "leaflet".into(),
                parent: ParentDef::Item("small-mailbox".into()),
                flags: vec!["takable".into(), "readable".into()],
                props: [
                    ("readText".to_string(), PropDef::Text("WELCOME TO LANTERN!".into())),
                    ("takeFirstOnRead".to_string(), PropDef::Flag(true)),
                ]
                .into_iter()
                .collect(),
                ..ItemDef::default()
            },
        ],
        ..WorldDef::default()
    };
    let world = build_world(&def).unwrap();
    let mut engine = engine_for(world);

    engine.process_turn("take lantern");
    assert!(engine.io.transcript().contains("Taken."));
    assert!(engine.world.is_held("brass-lantern"));
    assert!(engine.world.items["brass-lantern"].has(ItemFlag::Touched));

    engine.process_turn("open mailbox");
    assert!(
        engine
            .io
            .transcript()
            .contains("Opening the small mailbox reveals a leaflet.")
    );
    assert!(engine.world.items["small-mailbox"].has(ItemFlag::Open));

    engine.process_turn("read leaflet");
    let output = engine.io.transcript();
    assert!(output.contains("WELCOME TO LANTERN!"));
    // takeFirstOnRead moved it into inventory on the way
    assert!(engine.world.is_held("leaflet"));
}

fn apples_world() -> World {
    let mut world = World::new_empty();
    world.locations.insert("orchard".into(), location("orchard", true));
    world.player.location = "orchard".into();
    world.items.insert(
        "red-apple".into(),
        item(
            "red-apple",
            "red apple",
            Parent::Location("orchard".into()),
            &[ItemFlag::Takable, ItemFlag::Edible],
        ),
    );
    world.items.insert(
        "green-apple".into(),
        item(
            "green-apple",
            "green apple",
            Parent::Location("orchard".into()),
            &[ItemFlag::Takable, ItemFlag::Edible],
        ),
    );
    world
}

/// S2: disambiguation by adjective.
#[test]
fn s2_disambiguation() {
    let mut engine = engine_for(apples_world());

    engine.process_turn("take apple");
    assert!(engine.io.transcript().contains("Which apple do you mean?"));
    // the failed parse cost no turn and moved nothing
    assert_eq!(engine.world.player.moves, 0);

    engine.process_turn("take red apple");
    assert!(engine.io.transcript().contains("Taken."));
    assert!(engine.world.is_held("red-apple"));
    assert!(!engine.world.is_held("green-apple"));
    assert!(engine.world.pronoun("it").unwrap().contains("red-apple"));
}

/// S3: pronouns persist across turns.
#[test]
fn s3_pronoun_across_turns() {
    let mut engine = engine_for(apples_world());
    engine.process_turn("take red apple");
    engine.process_turn("drop it");

    assert_eq!(
        engine.world.items["red-apple"].parent,
        Parent::Location("orchard".into())
    );
    assert!(engine.world.pronoun("it").unwrap().contains("red-apple"));
}

/// S4: darkness, and the automatic re-description when light arrives.
#[test]
fn s4_darkness() {
    let mut world = World::new_empty();
    world.locations.insert("cellar".into(), location("cellar", false));
    world.player.location = "cellar".into();
    world.items.insert(
        "brass-lantern".into(),
        item(
            "brass-lantern",
            "brass lantern",
            Parent::Player,
            &[ItemFlag::Takable, ItemFlag::Device, ItemFlag::LightSource],
        ),
    );
    let mut engine = engine_for(world);

    engine.process_turn("look");
    assert!(engine.io.transcript().contains("pitch black"));

    engine.process_turn("turn on lantern");
    let output = engine.io.transcript();
    assert!(output.contains("brass lantern is now on"));
    assert!(output.contains("This is the cellar."));

    engine.process_turn("turn off lantern");
    assert!(engine.io.transcript().contains("It is now pitch black."));
}

/// S5: containment cycles are refused with no state change.
#[test]
fn s5_container_cycle() {
    let mut world = World::new_empty();
    world.locations.insert("shed".into(), location("shed", true));
    world.player.location = "shed".into();
    world.items.insert(
        "box".into(),
        item(
            "box",
            "box",
            Parent::Player,
            &[ItemFlag::Takable, ItemFlag::Container, ItemFlag::Open],
        ),
    );
    world.items.insert(
        "bag".into(),
        item(
            "bag",
            "bag",
            Parent::Item("box".into()),
            &[ItemFlag::Takable, ItemFlag::Container, ItemFlag::Open],
        ),
    );
    let mut engine = engine_for(world);

    engine.process_turn("put box in bag");
    assert!(engine.io.transcript().contains("can't put"));
    assert_eq!(engine.world.items["box"].parent, Parent::Player);
    assert_eq!(engine.world.items["bag"].parent, Parent::Item("box".into()));
    assert_eq!(engine.world.player.moves, 0);
}

/// S6: a fuse armed at load fires after exactly three waits.
#[test]
fn s6_timed_event() {
    let def = WorldDef {
        game: GameDef {
            title: "Kitchen".into(),
            player: PlayerDef {
                start_location: "kitchen".into(),
                ..PlayerDef::default()
            },
            ..GameDef::default()
        },
        locations: vec![LocationDef {
            id: "kitchen".into(),
            name: "Kitchen".into(),
            description: "A warm kitchen.".into(),
            lit: true,
            exits: Vec::new(),
            globals: Vec::new(),
        }],
        items: vec![ItemDef {
            id: "butter".into(),
            name: "butter".into(),
            parent: ParentDef::Location("kitchen".into()),
            flags: vec!["takable".into(), "edible".into()],
            ..ItemDef::default()
        }],
        events: vec![EventDef {
            id: "butter-softens".into(),
            kind: EventKind::Fuse { turns: 3 },
            start_active: true,
        }],
        ..WorldDef::default()
    };
    let world = build_world(&def).unwrap();

    let mut hooks = GameHooks::new();
    hooks.on_event("butter-softens", |_world| EventOutcome {
        message: Some("The butter has gone soft.".into()),
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
    assert!(!engine.io.transcript().contains("gone soft"));

    engine.process_turn("wait");
    let output = engine.io.transcript();
    // the fuse's message rides along with the wait output
    assert!(output.contains("Time passes."));
    assert!(output.contains("The butter has gone soft."));
    assert!(engine.world.items["butter"].prop_flag("melted"));
}

/// Law: TAKE then DROP returns the item to the room with touched set.
#[test]
fn law_take_drop_round_trip() {
    let mut engine = engine_for(apples_world());
    engine.process_turn("take red apple");
    engine.process_turn("drop red apple");

    let apple = &engine.world.items["red-apple"];
    assert_eq!(apple.parent, Parent::Location("orchard".into()));
    assert!(apple.has(ItemFlag::Touched));
}

/// Law: OPEN then CLOSE restores open=false, touched stays true.
#[test]
fn law_open_close_round_trip() {
    let mut world = World::new_empty();
    world.locations.insert("shed".into(), location("shed", true));
    world.player.location = "shed".into();
    world.items.insert(
        "cupboard".into(),
        item(
            "cupboard",
            "cupboard",
            Parent::Location("shed".into()),
            &[ItemFlag::Container, ItemFlag::Openable, ItemFlag::Scenery],
        ),
    );
    let mut engine = engine_for(world);

    engine.process_turn("open cupboard");
    engine.process_turn("close cupboard");
    let cupboard = &engine.world.items["cupboard"];
    assert!(!cupboard.has(ItemFlag::Open));
    assert!(cupboard.has(ItemFlag::Touched));
}

/// Law: LOCK then UNLOCK restores locked=false.
#[test]
fn law_lock_unlock_round_trip() {
    let mut world = World::new_empty();
    world.locations.insert("shed".into(), location("shed", true));
    world.player.location = "shed".into();
    let mut chest = item(
        "chest",
        "chest",
        Parent::Location("shed".into()),
        &[ItemFlag::Container, ItemFlag::Openable, ItemFlag::Lockable],
    );
    chest
        .props
        .insert(prop::LOCK_KEY.into(), PropValue::Text("iron-key".into()));
    world.items.insert("chest".into(), chest);
    world.items.insert(
        "iron-key".into(),
        item("iron-key", "iron key", Parent::Player, &[ItemFlag::Takable]),
    );
    let mut engine = engine_for(world);

    engine.process_turn("lock chest with key");
    assert!(engine.world.items["chest"].has(ItemFlag::Locked));
    engine.process_turn("unlock chest with key");
    assert!(!engine.world.items["chest"].has(ItemFlag::Locked));
}

/// ALL takes what it can and stays quiet about the rest.
#[test]
fn take_all_policy() {
    let mut world = apples_world();
    world.items.insert(
        "fountain".into(),
        item("fountain", "fountain", Parent::Location("orchard".into()), &[ItemFlag::Scenery]),
    );
    let mut engine = engine_for(world);

    engine.process_turn("take all");
    let output = engine.io.transcript();
    assert!(output.contains("red apple: Taken."));
    assert!(output.contains("green apple: Taken."));
    assert!(!output.contains("fountain"));
    assert!(engine.world.pronoun("them").unwrap().contains("red-apple"));
}

/// Invariants hold after every applied turn of a busy session.
#[test]
fn invariants_across_a_session() {
    let mut world = apples_world();
    world.locations.insert("shed".into(), location("shed", true));
    world
        .locations
        .get_mut("orchard")
        .unwrap()
        .exits
        .insert(Direction::North, Exit::leading_to("shed"));
    world
        .locations
        .get_mut("shed")
        .unwrap()
        .exits
        .insert(Direction::South, Exit::leading_to("orchard"));
    world.items.insert(
        "basket".into(),
        item(
            "basket",
            "basket",
            Parent::Location("orchard".into()),
            &[ItemFlag::Container, ItemFlag::Open, ItemFlag::Takable],
        ),
    );
    let mut engine = engine_for(world);

    for input in [
        "take all",
        "put red apple in basket",
        "north",
        "south",
        "take red apple from basket",
        "eat red apple",
        "wait",
        "drop all",
        "look",
    ] {
        engine.process_turn(input);
        assert!(
            engine.world.check_invariants().is_empty(),
            "invariants broken after '{input}'"
        );
    }
}

/// Quit is confirmed, declined, and finally honored.
#[test]
fn quit_confirmation_flow() {
    let mut engine = engine_for(apples_world());
    assert_eq!(engine.process_turn("quit"), TurnFlow::Continue);
    assert_eq!(engine.process_turn("no"), TurnFlow::Continue);
    assert_eq!(engine.process_turn("quit"), TurnFlow::Continue);
    assert_eq!(engine.process_turn("yes"), TurnFlow::Quit);
}

fn orchard_with_shed() -> World {
    let mut world = apples_world();
    world.locations.insert("shed".into(), location("shed", true));
    world
        .locations
        .get_mut("orchard")
        .unwrap()
        .exits
        .insert(Direction::East, Exit::leading_to("shed"));
    world
}

/// RESTART renders its fresh scene once, after the confirming turn,
/// even when the player has wandered away from where they began.
#[test]
fn restart_from_another_room_describes_the_scene_once() {
    let mut engine = engine_for(orchard_with_shed());

    engine.process_turn("go east");
    assert_eq!(engine.world.player.location, "shed");
    engine.process_turn("restart");

    let before = engine.io.output.len();
    engine.process_turn("yes");
    let turn_output: String = engine.io.output[before..].concat();
    assert_eq!(turn_output.matches("This is the orchard.").count(), 1);
    assert!(!turn_output.contains("This is the shed."));
    assert_eq!(engine.world.player.location, "orchard");
}

/// RESTORE from a different room than the save likewise describes the
/// restored scene exactly once.
#[test]
fn restore_from_another_room_describes_the_scene_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine =
        Engine::new(orchard_with_shed(), MemoryIo::default()).with_data_dir(dir.path().to_path_buf());

    engine.process_turn("save");
    engine.process_turn("go east");
    assert_eq!(engine.world.player.location, "shed");

    let before = engine.io.output.len();
    engine.process_turn("restore");
    let turn_output: String = engine.io.output[before..].concat();
    assert_eq!(turn_output.matches("This is the orchard.").count(), 1);
    assert!(!turn_output.contains("This is the shed."));
    assert_eq!(engine.world.player.location, "orchard");
}

/// Engine-level save/restore reproduces the same reachable actions.
#[test]
fn save_restore_preserves_play() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine =
        Engine::new(apples_world(), MemoryIo::default()).with_data_dir(dir.path().to_path_buf());

    engine.process_turn("take red apple");
    engine.process_turn("save");
    engine.process_turn("eat red apple");
    assert_eq!(engine.world.items["red-apple"].parent, Parent::Nowhere);

    engine.process_turn("restore");
    assert!(engine.world.is_held("red-apple"));

    // and the restored state still plays normally
    engine.process_turn("drop red apple");
    assert_eq!(
        engine.world.items["red-apple"].parent,
        Parent::Location("orchard".into())
    );
}
