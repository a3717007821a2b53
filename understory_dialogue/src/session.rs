// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index of active menus by user.
//!
//! Menus with a user land in that user's bucket; menus without one land in a
//! separate userless bucket. Queries return sorted copies, never live views.

use core::fmt;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use crate::types::{MenuId, UserId};

#[derive(Default)]
struct Buckets {
    by_user: HashMap<UserId, HashSet<MenuId>>,
    userless: HashSet<MenuId>,
}

/// Registry of active menus, keyed by user identity.
#[derive(Default)]
pub struct SessionRegistry {
    buckets: Mutex<Buckets>,
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SessionRegistry")
            .field("users", &b.by_user.len())
            .field("userless", &b.userless.len())
            .finish()
    }
}

fn sorted(ids: impl IntoIterator<Item = MenuId>) -> Vec<MenuId> {
    let mut out: Vec<_> = ids.into_iter().collect();
    out.sort_unstable();
    out
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an active menu. Returns `false` if it was already recorded.
    pub fn add(&self, menu: MenuId, user: Option<&UserId>) -> bool {
        let mut b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        match user {
            Some(user) => b.by_user.entry(user.clone()).or_default().insert(menu),
            None => b.userless.insert(menu),
        }
    }

    /// Forget a menu. Absent menus are ignored; returns whether it was present.
    pub fn remove(&self, menu: MenuId, user: Option<&UserId>) -> bool {
        let mut b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        match user {
            Some(user) => {
                let Some(set) = b.by_user.get_mut(user) else {
                    return false;
                };
                let removed = set.remove(&menu);
                if set.is_empty() {
                    b.by_user.remove(user);
                }
                removed
            }
            None => b.userless.remove(&menu),
        }
    }

    /// Active menus of `user`.
    pub fn all_for(&self, user: &UserId) -> Vec<MenuId> {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        b.by_user
            .get(user)
            .map(|set| sorted(set.iter().copied()))
            .unwrap_or_default()
    }

    /// Active menus without a user.
    pub fn all_userless(&self) -> Vec<MenuId> {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        sorted(b.userless.iter().copied())
    }

    /// Every active menu.
    pub fn all(&self) -> Vec<MenuId> {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        sorted(
            b.by_user
                .values()
                .flatten()
                .chain(b.userless.iter())
                .copied(),
        )
    }

    /// Users with at least one active menu.
    pub fn users(&self) -> Vec<UserId> {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<_> = b.by_user.keys().cloned().collect();
        out.sort_unstable();
        out
    }

    /// Number of active menus.
    pub fn len(&self) -> usize {
        let b = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        b.by_user.values().map(HashSet::len).sum::<usize>() + b.userless.len()
    }

    /// Whether no menu is active.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
