#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! ** Lantern **
//! Console runner for worlds authored against `lantern_data`.

use lantern_engine::{ConsoleIo, Engine, LANTERN_VERSION, build_world, install_vocab, load_world_file, save};

use anyhow::{Context, Result, bail};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    info!("starting Lantern engine (version {LANTERN_VERSION})");

    let Some(world_path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: lantern <world.toml>");
    };

    let def = load_world_file(&world_path).context("while loading world definition")?;
    let world = build_world(&def).context("while building world")?;
    info!("world '{}' loaded from {}", world.title, world_path.display());

    let data_dir = save::default_data_dir();
    let io = ConsoleIo::new(Some(save::history_path(&data_dir))).context("initializing console input")?;

    let mut engine = Engine::new(world, io).with_data_dir(data_dir);
    install_vocab(engine.vocab_mut(), &def.vocab);
    engine.run()
}
