// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener priorities and the per-option listener registry.
//!
//! ## Ordering
//!
//! Tiers are visited in [`ListenerPriority::ALL`] order: `High`, `Normal`,
//! `Low`, then `Monitor`. Order within a tier is unspecified.
//!
//! ## Re-entrancy
//!
//! Each tier is snapshotted before it is visited and the registry lock is
//! released while listeners run, so a listener may register or unregister
//! listeners (including itself) on the option that is dispatching.

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::event::{SelectEvent, UndoEvent};

/// Listener tier. Higher tiers run first; `Monitor` runs last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerPriority {
    /// Runs first.
    High,
    /// The default tier.
    #[default]
    Normal,
    /// Runs after `Normal`.
    Low,
    /// Runs last; intended for observers that should see the final state.
    Monitor,
}

impl ListenerPriority {
    /// All tiers in dispatch order.
    pub const ALL: [Self; 4] = [Self::High, Self::Normal, Self::Low, Self::Monitor];

    /// Numeric weight of the tier (750, 500, 250, 0).
    pub const fn value(self) -> u16 {
        match self {
            Self::High => 750,
            Self::Normal => 500,
            Self::Low => 250,
            Self::Monitor => 0,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::High => 0,
            Self::Normal => 1,
            Self::Low => 2,
            Self::Monitor => 3,
        }
    }
}

/// Callback interface for option events.
///
/// Both hooks default to doing nothing. The user identity, if any, is available
/// through the event.
pub trait MenuListener: Send + Sync {
    /// The option was selected.
    fn on_select(&self, event: &SelectEvent<'_>) {
        let _ = event;
    }

    /// A selection of the option was undone.
    fn on_undo(&self, event: &UndoEvent<'_>) {
        let _ = event;
    }
}

/// Compare listeners by allocation, ignoring vtable metadata.
fn same_listener(a: &Arc<dyn MenuListener>, b: &Arc<dyn MenuListener>) -> bool {
    core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Listeners grouped by priority. Each listener is registered at most once.
#[derive(Default)]
pub struct ListenerRegistry {
    tiers: Mutex<[Vec<Arc<dyn MenuListener>>; 4]>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut d = f.debug_struct("ListenerRegistry");
        for p in ListenerPriority::ALL {
            let name = match p {
                ListenerPriority::High => "high",
                ListenerPriority::Normal => "normal",
                ListenerPriority::Low => "low",
                ListenerPriority::Monitor => "monitor",
            };
            d.field(name, &tiers[p.slot()].len());
        }
        d.finish()
    }
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` at `priority`, replacing any previous registration.
    pub fn register(&self, listener: Arc<dyn MenuListener>, priority: ListenerPriority) {
        let mut tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        for tier in tiers.iter_mut() {
            tier.retain(|l| !same_listener(l, &listener));
        }
        tiers[priority.slot()].push(listener);
    }

    /// Remove `listener` from every tier. Returns whether it was registered.
    pub fn unregister(&self, listener: &Arc<dyn MenuListener>) -> bool {
        let mut tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut removed = false;
        for tier in tiers.iter_mut() {
            let before = tier.len();
            tier.retain(|l| !same_listener(l, listener));
            removed |= tier.len() != before;
        }
        removed
    }

    /// The tier `listener` is registered at, if any.
    pub fn priority_of(&self, listener: &Arc<dyn MenuListener>) -> Option<ListenerPriority> {
        let tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        ListenerPriority::ALL
            .into_iter()
            .find(|p| tiers[p.slot()].iter().any(|l| same_listener(l, listener)))
    }

    /// Snapshot of every registered listener, in tier order.
    pub fn listeners(&self) -> Vec<Arc<dyn MenuListener>> {
        let tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        tiers.iter().flatten().cloned().collect()
    }

    /// Snapshot of the listeners registered at `priority`.
    pub fn listeners_at(&self, priority: ListenerPriority) -> Vec<Arc<dyn MenuListener>> {
        let tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        tiers[priority.slot()].clone()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        let tiers = self.tiers.lock().unwrap_or_else(PoisonError::into_inner);
        tiers.iter().map(Vec::len).sum()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every listener tier by tier, without holding the lock during calls.
    pub(crate) fn dispatch(&self, mut call: impl FnMut(&dyn MenuListener)) {
        for priority in ListenerPriority::ALL {
            let tier = self.listeners_at(priority);
            for listener in &tier {
                call(listener.as_ref());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quiet;
    impl MenuListener for Quiet {}

    fn quiet() -> Arc<dyn MenuListener> {
        Arc::new(Quiet)
    }

    #[test]
    fn priorities_run_high_to_monitor() {
        assert_eq!(
            ListenerPriority::ALL.map(ListenerPriority::value),
            [750, 500, 250, 0]
        );
        assert_eq!(ListenerPriority::default(), ListenerPriority::Normal);
    }

    #[test]
    fn reregistering_moves_between_tiers() {
        let reg = ListenerRegistry::new();
        let l = quiet();
        reg.register(l.clone(), ListenerPriority::Low);
        reg.register(l.clone(), ListenerPriority::High);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.priority_of(&l), Some(ListenerPriority::High));
        assert!(reg.listeners_at(ListenerPriority::Low).is_empty());
    }

    #[test]
    fn unregister_reports_presence() {
        let reg = ListenerRegistry::new();
        let a = quiet();
        let b = quiet();
        reg.register(a.clone(), ListenerPriority::Normal);
        assert!(!reg.unregister(&b));
        assert!(reg.unregister(&a));
        assert!(!reg.unregister(&a));
        assert!(reg.is_empty());
        assert_eq!(reg.priority_of(&a), None);
    }

    #[test]
    fn snapshots_are_copies() {
        let reg = ListenerRegistry::new();
        reg.register(quiet(), ListenerPriority::Monitor);
        let mut snap = reg.listeners();
        snap.clear();
        assert_eq!(reg.len(), 1);
    }
}
