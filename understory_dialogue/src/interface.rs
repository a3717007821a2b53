// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The link between a menu and the display that renders it.
//!
//! Rendering is a collaborator concern expressed by [`DisplayAdapter`]. The core
//! wraps an adapter in a [`MenuInterface`], which carries the back-reference to
//! its menu and an open flag. Only [`Menu::set_interface`] and
//! [`Menu::remove_interface`] change the link, so a menu and its interface
//! always agree about each other.
//!
//! User input flows back through [`MenuInterface::select`], which finds the
//! linked menu in a caller-owned collection through [`MenuLookup`].
//!
//! [`Menu::set_interface`]: crate::menu::Menu::set_interface
//! [`Menu::remove_interface`]: crate::menu::Menu::remove_interface

use core::fmt;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::{Arc, Mutex, PoisonError};

use crate::menu::Menu;
use crate::option::MenuOption;
use crate::stage::MenuStage;
use crate::types::{MenuId, MenuResponse};
use crate::underlay::MenuUnderlay;

/// Rendering hooks, implemented by display collaborators.
///
/// Called synchronously from menu operations; implementations must not block
/// and must not call back into the menu that is notifying them.
pub trait DisplayAdapter: Send + Sync {
    /// How many options the display can show at once.
    fn max_options(&self) -> usize;

    /// The displayed stage changed. `None` means the display should clear.
    fn on_stage_changed(&self, stage: Option<&Arc<MenuStage>>);

    /// The menu became inactive or detached this display.
    fn on_closed(&self);
}

#[derive(Debug, Default)]
struct Link {
    menu: Option<MenuId>,
    open: bool,
    /// The linked menu has finished; another menu may claim the interface.
    released: bool,
}

/// A display adapter plus its link to at most one menu.
pub struct MenuInterface {
    adapter: Box<dyn DisplayAdapter>,
    link: Mutex<Link>,
}

impl fmt::Debug for MenuInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MenuInterface")
            .field("menu", &link.menu)
            .field("open", &link.open)
            .field("released", &link.released)
            .finish_non_exhaustive()
    }
}

impl MenuInterface {
    /// Wrap an adapter. The interface starts unlinked and closed.
    pub fn new(adapter: impl DisplayAdapter + 'static) -> Arc<Self> {
        Arc::new(Self {
            adapter: Box::new(adapter),
            link: Mutex::new(Link::default()),
        })
    }

    /// The linked menu, if any.
    pub fn menu(&self) -> Option<MenuId> {
        self.lock().menu
    }

    /// Whether a menu is linked.
    pub fn has_menu(&self) -> bool {
        self.menu().is_some()
    }

    /// Whether the last thing pushed was a stage rather than a close.
    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    /// See [`DisplayAdapter::max_options`].
    pub fn max_options(&self) -> usize {
        self.adapter.max_options()
    }

    /// The wrapped adapter.
    pub fn adapter(&self) -> &dyn DisplayAdapter {
        self.adapter.as_ref()
    }

    /// Forward a selection to the linked menu.
    ///
    /// Returns [`MenuResponse::MenuNotFound`] if this interface has no menu, or
    /// `menus` does not hold it.
    pub fn select<L: MenuUnderlay>(
        &self,
        menus: &mut impl MenuLookup<L>,
        option: &Arc<MenuOption>,
    ) -> MenuResponse {
        let Some(id) = self.menu() else {
            return MenuResponse::MenuNotFound;
        };
        match menus.menu_mut(id) {
            Some(menu)
                if menu
                    .interface()
                    .is_some_and(|linked| core::ptr::eq(linked.as_ref(), self)) =>
            {
                menu.select(option)
            }
            _ => MenuResponse::MenuNotFound,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Link> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim this interface for `menu`.
    ///
    /// Fails if another menu holds it and has not finished.
    pub(crate) fn try_link(&self, menu: MenuId) -> bool {
        let mut link = self.lock();
        match link.menu {
            Some(current) if current != menu && !link.released => false,
            _ => {
                link.menu = Some(menu);
                link.released = false;
                true
            }
        }
    }

    /// Whether `menu` currently holds this interface.
    pub(crate) fn is_linked_to(&self, menu: MenuId) -> bool {
        self.lock().menu == Some(menu)
    }

    /// Drop the link if `menu` still holds it.
    pub(crate) fn unlink(&self, menu: MenuId) {
        let mut link = self.lock();
        if link.menu == Some(menu) {
            link.menu = None;
            link.released = false;
        }
    }

    /// Keep the link to a finished `menu` but let other menus claim it.
    pub(crate) fn release(&self, menu: MenuId) {
        let mut link = self.lock();
        if link.menu == Some(menu) {
            link.released = true;
        }
    }

    /// Push a stage and mark the display open.
    pub(crate) fn display(&self, stage: &Arc<MenuStage>) {
        self.lock().open = true;
        self.adapter.on_stage_changed(Some(stage));
    }

    /// Clear the display and mark it closed.
    pub(crate) fn close(&self) {
        self.lock().open = false;
        self.adapter.on_stage_changed(None);
        self.adapter.on_closed();
    }
}

/// Caller-owned collection of menus that interfaces can route selections into.
pub trait MenuLookup<L: MenuUnderlay> {
    /// The menu with handle `id`.
    fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu<L>>;
}

impl<L: MenuUnderlay, S: BuildHasher> MenuLookup<L> for HashMap<MenuId, Menu<L>, S> {
    fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu<L>> {
        self.get_mut(&id)
    }
}

impl<L: MenuUnderlay> MenuLookup<L> for BTreeMap<MenuId, Menu<L>> {
    fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu<L>> {
        self.get_mut(&id)
    }
}
