// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: identities, selection outcomes, and history entries.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::option::MenuOption;

/// Opaque identity of whoever navigates a menu.
///
/// The engine only compares and hashes it. Menus without a user (system or
/// anonymous dialogues) simply carry `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Arc<str>);

impl UserId {
    /// Create a user identity from any stable token.
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Handle of a menu, unique within the process.
///
/// Registries index menus by this handle rather than by reference, so a menu
/// stays owned by whoever drives it. Handles come from one process-wide
/// counter, so menus of different contexts can share an underlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub(crate) u64);

static NEXT_MENU: AtomicU64 = AtomicU64::new(0);

impl MenuId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MENU.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu#{}", self.0)
    }
}

/// Outcome of a selection attempt.
///
/// Anything other than [`Continue`](Self::Continue) or [`Finished`](Self::Finished)
/// guarantees the menu did not change.
///
/// A host UI typically treats `InvalidOption` and `MiscError` as "ignore and
/// re-prompt", `PreviouslyFinished` as "this dialogue is stale", and the two
/// success values as "update the display".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuResponse {
    /// The selection ended the dialogue.
    Finished,
    /// The menu had already finished; nothing happened.
    PreviouslyFinished,
    /// The menu moved to a new stage.
    Continue,
    /// The option is not selectable from the current stage.
    InvalidOption,
    /// The interface has no menu to forward the selection to.
    MenuNotFound,
    /// The underlay failed while resolving the selection.
    MiscError,
}

impl MenuResponse {
    /// Whether the selection was accepted.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Finished | Self::Continue)
    }
}

/// A selection that was made: where, what, and when.
#[derive(Clone)]
pub struct MenuChoice<N> {
    node: N,
    option: Arc<MenuOption>,
    when: DateTime<Utc>,
}

impl<N> MenuChoice<N> {
    /// Record a choice made now.
    pub fn new(node: N, option: Arc<MenuOption>) -> Self {
        Self::at(node, option, Utc::now())
    }

    /// Record a choice with an explicit timestamp.
    pub fn at(node: N, option: Arc<MenuOption>, when: DateTime<Utc>) -> Self {
        Self { node, option, when }
    }

    /// The node the choice was made in.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// The option that was chosen.
    pub fn option(&self) -> &Arc<MenuOption> {
        &self.option
    }

    /// When the choice was made.
    pub fn when(&self) -> DateTime<Utc> {
        self.when
    }
}

impl<N: fmt::Debug> fmt::Debug for MenuChoice<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuChoice")
            .field("node", &self.node)
            .field("option", &self.option.id())
            .field("when", &self.when)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_finished_and_continue_succeed() {
        assert!(MenuResponse::Finished.is_success());
        assert!(MenuResponse::Continue.is_success());
        for r in [
            MenuResponse::PreviouslyFinished,
            MenuResponse::InvalidOption,
            MenuResponse::MenuNotFound,
            MenuResponse::MiscError,
        ] {
            assert!(!r.is_success(), "{r:?} must not count as success");
        }
    }

    #[test]
    fn user_ids_compare_by_token() {
        assert_eq!(UserId::from("alice"), UserId::new(String::from("alice")));
        assert_ne!(UserId::from("alice"), UserId::from("bob"));
        assert_eq!(UserId::from("alice").to_string(), "alice");
    }
}
