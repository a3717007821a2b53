// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events delivered to option listeners.
//!
//! A [`SelectEvent`] fires when a menu accepts a selection, before the cursor
//! moves. An [`UndoEvent`] fires when [`Menu::go_back`](crate::menu::Menu::go_back)
//! rewinds a choice. Both carry a [`MenuView`] of the menu they came from.

use crate::option::MenuOption;
use crate::stage::MenuStage;
use crate::types::{MenuId, UserId};

/// Read-only view of a menu, handed to underlays and listeners.
#[derive(Copy, Clone, Debug)]
pub struct MenuView<'a> {
    pub(crate) id: MenuId,
    pub(crate) user: Option<&'a UserId>,
    pub(crate) underlay_id: &'a str,
    pub(crate) depth: usize,
}

impl<'a> MenuView<'a> {
    /// Build a view. Underlay implementations can use this in their own tests.
    pub fn new(id: MenuId, user: Option<&'a UserId>, underlay_id: &'a str, depth: usize) -> Self {
        Self {
            id,
            user,
            underlay_id,
            depth,
        }
    }

    /// The menu's handle.
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// The user navigating the menu, if any.
    pub fn user(&self) -> Option<&'a UserId> {
        self.user
    }

    /// Id of the underlay the menu traverses.
    pub fn underlay_id(&self) -> &'a str {
        self.underlay_id
    }

    /// Number of remembered choices at the time of the view.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// An option was selected.
#[derive(Copy, Clone, Debug)]
pub struct SelectEvent<'a> {
    pub(crate) menu: MenuView<'a>,
    pub(crate) option: &'a MenuOption,
    pub(crate) stage: &'a MenuStage,
}

impl<'a> SelectEvent<'a> {
    /// The menu that made the selection.
    pub fn menu(&self) -> MenuView<'a> {
        self.menu
    }

    /// The selected option.
    pub fn option(&self) -> &'a MenuOption {
        self.option
    }

    /// The stage the option was selected from.
    pub fn stage(&self) -> &'a MenuStage {
        self.stage
    }

    /// Shorthand for `self.menu().user()`.
    pub fn user(&self) -> Option<&'a UserId> {
        self.menu.user
    }
}

/// A previous selection of this option was undone.
///
/// Undo only rewinds the cursor; listeners are responsible for reverting any
/// side effects they applied on select.
#[derive(Copy, Clone, Debug)]
pub struct UndoEvent<'a> {
    pub(crate) menu: MenuView<'a>,
    pub(crate) option: &'a MenuOption,
}

impl<'a> UndoEvent<'a> {
    /// The menu that went back.
    pub fn menu(&self) -> MenuView<'a> {
        self.menu
    }

    /// The option whose selection was undone.
    pub fn option(&self) -> &'a MenuOption {
        self.option
    }

    /// Shorthand for `self.menu().user()`.
    pub fn user(&self) -> Option<&'a UserId> {
        self.menu.user
    }
}
