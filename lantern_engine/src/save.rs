//! Save-game serialization and slot discovery.
//!
//! Saves are RON: self-describing, versioned with the engine version that
//! wrote them, and a pure function of [`World`] state (state collections
//! are ordered maps, so saving the same state twice produces identical
//! bytes). Files live under a per-user data directory by default, with
//! one file per named slot.

use crate::{LANTERN_VERSION, world::World};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use time::OffsetDateTime;

/// Marker between slot name and engine version in save file names.
const SAVE_FILE_TAG: &str = "-lantern-";

/// Per-user root for saves, transcripts, and input history.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from("."), |home| home.join("Lantern"))
}

/// Directory save slots are written to, under a data root.
pub fn save_dir(root: &Path) -> PathBuf {
    root.join("saves")
}

/// Directory transcripts are written to, under a data root.
pub fn transcript_dir(root: &Path) -> PathBuf {
    root.join("transcripts")
}

/// Path of the rustyline history file, under a data root.
pub fn history_path(root: &Path) -> PathBuf {
    root.join("history.txt")
}

/// Serialize the world into the given slot.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file
/// cannot be serialized or written.
pub fn save_world(world: &World, dir: &Path, slot: &str) -> Result<PathBuf> {
    let slot = sanitize_slot(slot);
    fs::create_dir_all(dir).with_context(|| format!("creating save directory {}", dir.display()))?;
    let path = dir.join(format!("{slot}{SAVE_FILE_TAG}{LANTERN_VERSION}.ron"));
    let raw = ron::to_string(world).context("serializing world state")?;
    fs::write(&path, raw).with_context(|| format!("writing save file {}", path.display()))?;
    info!("world saved to {}", path.display());
    Ok(path)
}

/// Load a save file from disk and deserialize its world state.
///
/// # Errors
/// Returns an error if the file cannot be read or deserialized.
pub fn load_save_file(path: &Path) -> Result<World> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading save file {}", path.display()))?;
    let world = ron::from_str::<World>(&raw).with_context(|| format!("parsing save file {}", path.display()))?;
    if world.version != LANTERN_VERSION {
        warn!(
            "save {} was written by engine {} (current {})",
            path.display(),
            world.version,
            LANTERN_VERSION
        );
    }
    Ok(world)
}

/// Load the named slot from a save directory.
///
/// # Errors
/// Returns an error when the slot has no save file or the file is
/// unreadable.
pub fn load_slot(dir: &Path, slot: &str) -> Result<World> {
    let slot = sanitize_slot(slot);
    let found = collect_save_slots(dir)?
        .into_iter()
        .find(|entry| entry.slot == slot)
        .ok_or_else(|| anyhow!("no save found in slot '{slot}'"))?;
    load_save_file(&found.path)
}

/// A discovered save file, before its contents are inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Key facts about a parsed save, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub title: String,
    pub location: Option<String>,
    pub turn_count: usize,
    pub score: i64,
}

/// Whether a save file can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFileStatus {
    Ready,
    VersionMismatch { save_version: String, current_version: String },
    Corrupted { message: String },
}

/// A save slot with its parsed summary and load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileEntry {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub summary: Option<SaveSummary>,
    pub status: SaveFileStatus,
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.version.cmp(&b.version)));
    Ok(slots)
}

/// Build descriptive entries for save files located in `dir`, newest first.
///
/// # Errors
/// Returns an error if reading the directory fails.
pub fn build_save_entries(dir: &Path) -> Result<Vec<SaveFileEntry>> {
    let slots = collect_save_slots(dir)?;
    let mut entries: Vec<_> = slots.into_iter().map(entry_for_slot).collect();
    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.slot.cmp(&b.slot)));
    Ok(entries)
}

fn entry_for_slot(slot: SaveSlot) -> SaveFileEntry {
    let mut version = slot.version.clone();
    let (summary, status) = match fs::read_to_string(&slot.path) {
        Ok(raw) => match ron::from_str::<World>(&raw) {
            Ok(world) => {
                version.clone_from(&world.version);
                let status = if world.version == LANTERN_VERSION {
                    SaveFileStatus::Ready
                } else {
                    SaveFileStatus::VersionMismatch {
                        save_version: world.version.clone(),
                        current_version: LANTERN_VERSION.to_string(),
                    }
                };
                let summary = SaveSummary {
                    title: world.title.clone(),
                    location: world.locations.get(&world.player.location).map(|l| l.name.clone()),
                    turn_count: world.turn_count,
                    score: world.player.score,
                };
                (Some(summary), status)
            },
            Err(err) => {
                warn!("failed to parse save '{}' ({}): {err}", slot.slot, slot.path.display());
                (
                    None,
                    SaveFileStatus::Corrupted {
                        message: format!("parse error: {err}"),
                    },
                )
            },
        },
        Err(err) => {
            warn!("failed to read save '{}' ({}): {err}", slot.slot, slot.path.display());
            (
                None,
                SaveFileStatus::Corrupted {
                    message: format!("read error: {err}"),
                },
            )
        },
    };

    SaveFileEntry {
        slot: slot.slot,
        version,
        path: slot.path,
        modified: slot.modified,
        summary,
        status,
    }
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let (slot, version) = stem.rsplit_once(SAVE_FILE_TAG)?;
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot {
        slot: slot.to_string(),
        version: version.to_string(),
        path,
        modified,
    })
}

/// Keep slot names filesystem-friendly.
fn sanitize_slot(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    if cleaned.is_empty() { "game".to_string() } else { cleaned }
}

/// Path for a fresh transcript file under the transcript directory.
pub fn transcript_file_path(dir: &Path) -> PathBuf {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = time::format_description::parse("[year][month][day]-[hour][minute][second]")
        .ok()
        .and_then(|format| now.format(&format).ok())
        .unwrap_or_else(|| now.unix_timestamp().to_string());
    dir.join(format!("transcript-{stamp}.txt"))
}

/// Human-friendly "time ago" label for save listings.
pub fn format_modified(modified: SystemTime) -> String {
    match SystemTime::now().duration_since(modified) {
        Ok(delta) => format_duration(delta),
        Err(_) => "in the future".to_string(),
    }
}

fn format_duration(duration: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = MINUTE * 60;
    const DAY: u64 = HOUR * 24;

    let secs = duration.as_secs();
    if secs < 30 {
        "just now".to_string()
    } else if secs < MINUTE {
        format!("{secs}s ago")
    } else if secs < HOUR {
        format!("{}m ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h ago", secs / HOUR)
    } else {
        format!("{}d ago", secs / DAY)
    }
}
