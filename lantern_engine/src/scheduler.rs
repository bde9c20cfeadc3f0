//! Event scheduler: fuses and daemons.
//!
//! A fuse fires exactly once, N ticks after it is lit. A daemon runs on
//! every turn whose number is a multiple of its period, for as long as it
//! stays active. The scheduler stores only timing data; the effect each id
//! maps to is registered in [`crate::hooks::GameHooks`], which keeps this
//! whole structure serializable inside a save file.
//!
//! Ticks happen after the player's action has been applied. Fuses fire
//! before daemons on the same turn; within each kind, insertion order is
//! preserved.

use crate::Id;

use log::info;
use serde::{Deserialize, Serialize};

/// A one-shot event counting down to its firing turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fuse {
    pub id: Id,
    pub remaining: usize,
}

/// A recurring event running every `period` turns while active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Daemon {
    pub id: Id,
    pub period: usize,
    pub active: bool,
}

/// Owns all scheduled events for a running game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    fuses: Vec<Fuse>,
    daemons: Vec<Daemon>,
}

impl Scheduler {
    /// Light a fuse to fire `turns` ticks from now. Re-lighting an id
    /// that is already burning resets its countdown.
    pub fn schedule_fuse(&mut self, id: &str, turns: usize) {
        info!("fuse '{id}' lit, fires in {turns} turn(s)");
        if let Some(fuse) = self.fuses.iter_mut().find(|f| f.id == id) {
            fuse.remaining = turns;
        } else {
            self.fuses.push(Fuse {
                id: id.to_string(),
                remaining: turns,
            });
        }
    }

    /// Snuff a fuse before it fires. Returns true if it was burning.
    pub fn cancel_fuse(&mut self, id: &str) -> bool {
        let before = self.fuses.len();
        self.fuses.retain(|f| f.id != id);
        if self.fuses.len() < before {
            info!("fuse '{id}' canceled");
            true
        } else {
            false
        }
    }

    /// Turns left before a fuse fires, if it is burning.
    pub fn fuse_remaining(&self, id: &str) -> Option<usize> {
        self.fuses.iter().find(|f| f.id == id).map(|f| f.remaining)
    }

    /// Start (or restart) a daemon with the given period.
    pub fn start_daemon(&mut self, id: &str, period: usize) {
        info!("daemon '{id}' started with period {period}");
        if let Some(daemon) = self.daemons.iter_mut().find(|d| d.id == id) {
            daemon.period = period;
            daemon.active = true;
        } else {
            self.daemons.push(Daemon {
                id: id.to_string(),
                period,
                active: true,
            });
        }
    }

    /// Deactivate a daemon. Returns true if it was running.
    pub fn stop_daemon(&mut self, id: &str) -> bool {
        match self.daemons.iter_mut().find(|d| d.id == id) {
            Some(daemon) if daemon.active => {
                daemon.active = false;
                info!("daemon '{id}' stopped");
                true
            },
            _ => false,
        }
    }

    /// Returns true while the daemon is running.
    pub fn daemon_active(&self, id: &str) -> bool {
        self.daemons.iter().any(|d| d.id == id && d.active)
    }

    /// Advance one turn and collect the ids of events due to fire.
    ///
    /// `turn` is the turn number just completed. Fired fuses are removed;
    /// daemons stay registered until stopped.
    pub fn tick(&mut self, turn: usize) -> Vec<Id> {
        let mut due = Vec::new();

        for fuse in &mut self.fuses {
            fuse.remaining = fuse.remaining.saturating_sub(1);
            if fuse.remaining == 0 {
                info!("fuse '{}' fires on turn {turn}", fuse.id);
                due.push(fuse.id.clone());
            }
        }
        self.fuses.retain(|f| f.remaining > 0);

        if turn > 0 {
            for daemon in &self.daemons {
                if daemon.active && turn % daemon.period == 0 {
                    info!("daemon '{}' runs on turn {turn}", daemon.id);
                    due.push(daemon.id.clone());
                }
            }
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuse_fires_once_after_countdown() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_fuse("butter-softens", 3);

        assert!(scheduler.tick(1).is_empty());
        assert!(scheduler.tick(2).is_empty());
        assert_eq!(scheduler.tick(3), vec!["butter-softens".to_string()]);
        assert!(scheduler.tick(4).is_empty());
        assert_eq!(scheduler.fuse_remaining("butter-softens"), None);
    }

    #[test]
    fn relighting_a_fuse_resets_countdown() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_fuse("bomb", 2);
        scheduler.tick(1);
        scheduler.schedule_fuse("bomb", 2);
        assert!(scheduler.tick(2).is_empty());
        assert_eq!(scheduler.tick(3), vec!["bomb".to_string()]);
    }

    #[test]
    fn canceling_a_fuse_prevents_firing() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_fuse("flood", 1);
        assert!(scheduler.cancel_fuse("flood"));
        assert!(!scheduler.cancel_fuse("flood"));
        assert!(scheduler.tick(1).is_empty());
    }

    #[test]
    fn daemon_runs_on_period_multiples() {
        let mut scheduler = Scheduler::default();
        scheduler.start_daemon("lamp-drain", 2);

        assert!(scheduler.tick(1).is_empty());
        assert_eq!(scheduler.tick(2), vec!["lamp-drain".to_string()]);
        assert!(scheduler.tick(3).is_empty());
        assert_eq!(scheduler.tick(4), vec!["lamp-drain".to_string()]);
    }

    #[test]
    fn stopped_daemon_goes_quiet_until_restarted() {
        let mut scheduler = Scheduler::default();
        scheduler.start_daemon("thief", 1);
        assert_eq!(scheduler.tick(1), vec!["thief".to_string()]);

        assert!(scheduler.stop_daemon("thief"));
        assert!(!scheduler.daemon_active("thief"));
        assert!(scheduler.tick(2).is_empty());

        scheduler.start_daemon("thief", 1);
        assert_eq!(scheduler.tick(3), vec!["thief".to_string()]);
    }

    #[test]
    fn fuses_fire_before_daemons_and_in_insertion_order() {
        let mut scheduler = Scheduler::default();
        scheduler.start_daemon("ambience", 1);
        scheduler.schedule_fuse("first", 1);
        scheduler.schedule_fuse("second", 1);

        let due = scheduler.tick(1);
        assert_eq!(
            due,
            vec!["first".to_string(), "second".to_string(), "ambience".to_string()]
        );
    }

    #[test]
    fn serialization_round_trip_preserves_schedule() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule_fuse("melt", 5);
        scheduler.start_daemon("drip", 3);

        let text = serde_json::to_string(&scheduler).unwrap();
        let mut restored: Scheduler = serde_json::from_str(&text).unwrap();

        assert_eq!(restored.fuse_remaining("melt"), Some(5));
        assert!(restored.daemon_active("drip"));
        assert!(restored.tick(1).is_empty());
        assert_eq!(restored.fuse_remaining("melt"), Some(4));
    }
}
