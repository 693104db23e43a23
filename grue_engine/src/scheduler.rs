//! The daemon and fuse scheduler.
//!
//! Daemons are background callables run after action dispatch, in
//! registration order. The activation ledger (inactive / active / fuse)
//! lives in [`crate::world::GameState`] because activation changes travel
//! through the change model; this module owns the registry of callbacks
//! and the per-tick bookkeeping rules.

use anyhow::Result;

use crate::change::ActionResult;
use crate::engine::Engine;
use crate::ids::DaemonId;
use crate::world::DaemonState;

/// Daemon callback: inspect the world, return an optional result to emit
/// plus the daemon's next ledger state. Cooperative — bounded work only.
pub type DaemonFn = Box<dyn Fn(&Engine, DaemonState) -> Result<(Option<ActionResult>, DaemonState)>>;

/// One registered daemon.
pub struct DaemonEntry {
    pub id: DaemonId,
    /// Runs on turns where `turn % frequency == 0`. Defaults to 1.
    pub frequency: u64,
    pub callback: DaemonFn,
}

/// Registered daemons, in registration order. Order is a documented
/// guarantee: two runs with the same seed and transcript tick identically.
#[derive(Default)]
pub struct DaemonRegistry {
    entries: Vec<DaemonEntry>,
}

impl DaemonRegistry {
    pub fn register(&mut self, id: DaemonId, frequency: u64, callback: DaemonFn) {
        self.entries.push(DaemonEntry {
            id,
            frequency: frequency.max(1),
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> &DaemonEntry {
        &self.entries[index]
    }

    pub fn contains(&self, id: &DaemonId) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }
}

/// Per-tick decision for one daemon: whether it fires this turn and the
/// ledger state it holds while (or instead of) firing.
pub fn tick_decision(state: DaemonState, turn: u64, frequency: u64) -> (bool, DaemonState) {
    match state {
        DaemonState::Inactive => (false, DaemonState::Inactive),
        DaemonState::Active => (turn % frequency.max(1) == 0, DaemonState::Active),
        // fuses count down each turn and fire exactly once at zero
        DaemonState::Fuse(n) => {
            if n <= 1 {
                (true, DaemonState::Inactive)
            } else {
                (false, DaemonState::Fuse(n - 1))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_daemons_never_fire() {
        for turn in 0..10 {
            assert_eq!(
                tick_decision(DaemonState::Inactive, turn, 1),
                (false, DaemonState::Inactive)
            );
        }
    }

    #[test]
    fn active_daemons_respect_frequency() {
        assert_eq!(tick_decision(DaemonState::Active, 4, 1), (true, DaemonState::Active));
        assert_eq!(tick_decision(DaemonState::Active, 4, 2), (true, DaemonState::Active));
        assert_eq!(tick_decision(DaemonState::Active, 5, 2), (false, DaemonState::Active));
        assert_eq!(tick_decision(DaemonState::Active, 9, 3), (true, DaemonState::Active));
    }

    #[test]
    fn zero_frequency_is_treated_as_every_turn() {
        assert_eq!(tick_decision(DaemonState::Active, 7, 0), (true, DaemonState::Active));
    }

    #[test]
    fn fuses_count_down_and_fire_once() {
        assert_eq!(tick_decision(DaemonState::Fuse(3), 1, 1), (false, DaemonState::Fuse(2)));
        assert_eq!(tick_decision(DaemonState::Fuse(2), 2, 1), (false, DaemonState::Fuse(1)));
        assert_eq!(tick_decision(DaemonState::Fuse(1), 3, 1), (true, DaemonState::Inactive));
        // a zero-turn fuse fires immediately
        assert_eq!(tick_decision(DaemonState::Fuse(0), 4, 1), (true, DaemonState::Inactive));
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = DaemonRegistry::default();
        registry.register(DaemonId::new("sword_glow"), 1, Box::new(|_, s| Ok((None, s))));
        registry.register(DaemonId::new("thief"), 1, Box::new(|_, s| Ok((None, s))));
        registry.register(DaemonId::new("combat"), 1, Box::new(|_, s| Ok((None, s))));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.entry(0).id, DaemonId::new("sword_glow"));
        assert_eq!(registry.entry(2).id, DaemonId::new("combat"));
        assert!(registry.contains(&DaemonId::new("thief")));
        assert!(!registry.contains(&DaemonId::new("lantern")));
    }

    #[test]
    fn registered_frequency_is_clamped_to_one() {
        let mut registry = DaemonRegistry::default();
        registry.register(DaemonId::new("clock"), 0, Box::new(|_, s| Ok((None, s))));
        assert_eq!(registry.entry(0).frequency, 1);
    }
}
