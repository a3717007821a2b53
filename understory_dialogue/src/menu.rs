// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The traversal cursor.
//!
//! A [`Menu`] is one session's position inside an underlay. It is either
//! active at some node or finished, and finishing is permanent.
//!
//! ## Selecting
//!
//! [`Menu::select`] asks the current node where `option` leads:
//!
//! - a finished menu answers [`MenuResponse::PreviouslyFinished`];
//! - an option the node does not offer answers [`MenuResponse::InvalidOption`];
//! - a node failure answers [`MenuResponse::MiscError`];
//! - otherwise the option's listeners run, the choice is remembered, and the
//!   menu either moves ([`MenuResponse::Continue`]) or finishes
//!   ([`MenuResponse::Finished`]).
//!
//! Any response other than `Continue` or `Finished` leaves the menu untouched.
//!
//! ## History
//!
//! Choices are kept oldest first, up to [`MenuSettings::history_capacity`];
//! the oldest is evicted when the bound is reached. [`Menu::go_back`] pops the
//! newest choice, fires the undo event on its option and returns to the node
//! the choice was made in. Undo does not revert anything listeners did.
//!
//! ## Lifetime
//!
//! While active, a menu is tracked by its underlay and by the context's
//! [`SessionRegistry`](crate::session::SessionRegistry). Finishing, abandoning
//! or dropping the menu removes it from both.

use core::fmt;
use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::MenuContext;
use crate::error::{MenuError, SelectionError};
use crate::event::MenuView;
use crate::interface::MenuInterface;
use crate::option::MenuOption;
use crate::stage::MenuStage;
use crate::types::{MenuChoice, MenuId, MenuResponse, UserId};
use crate::underlay::{MenuUnderlay, UnderlayNode};

/// Number of choices a menu remembers by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Tunables for a [`Menu`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuSettings {
    /// Maximum number of remembered choices. Zero disables undo.
    pub history_capacity: usize,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug)]
struct Cursor<N> {
    node: N,
    stage: Arc<MenuStage>,
}

/// One session's traversal of an underlay.
///
/// A menu is driven by one logical session at a time; it is not meant to be
/// selected from concurrently. Many menus may traverse the same underlay.
pub struct Menu<L: MenuUnderlay> {
    id: MenuId,
    context: Arc<MenuContext>,
    underlay: Arc<L>,
    user: Option<UserId>,
    path: VecDeque<MenuChoice<L::Node>>,
    capacity: usize,
    cursor: Option<Cursor<L::Node>>,
    interface: Option<Arc<MenuInterface>>,
}

impl<L: MenuUnderlay> fmt::Debug for Menu<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("underlay", &self.underlay.id())
            .field("user", &self.user)
            .field("node", &self.current_node())
            .field("history", &self.path.len())
            .field("interface", &self.interface)
            .finish_non_exhaustive()
    }
}

impl<L: MenuUnderlay> Menu<L> {
    /// Start a menu at the underlay's start node with default settings.
    pub fn new(
        context: &Arc<MenuContext>,
        underlay: Arc<L>,
        user: Option<UserId>,
    ) -> Result<Self, MenuError> {
        Self::with_settings(context, underlay, user, MenuSettings::default())
    }

    /// Start a menu at the underlay's start node.
    ///
    /// Fails with [`MenuError::NoStart`] when the underlay has no start node for
    /// this menu, or [`MenuError::UnderlayRejected`] when it refuses to track
    /// it. Nothing stays registered on failure.
    pub fn with_settings(
        context: &Arc<MenuContext>,
        underlay: Arc<L>,
        user: Option<UserId>,
        settings: MenuSettings,
    ) -> Result<Self, MenuError> {
        let id = MenuId::next();
        let view = MenuView::new(id, user.as_ref(), underlay.id(), 0);
        let Some(start) = underlay.start(&view) else {
            return Err(MenuError::NoStart {
                underlay: underlay.id().to_owned(),
            });
        };
        if !underlay.add_menu(&view) {
            return Err(MenuError::UnderlayRejected {
                underlay: underlay.id().to_owned(),
            });
        }
        let stage = start.stage(&view);
        context.sessions().add(id, user.as_ref());
        debug!(menu = %id, underlay = underlay.id(), user = ?user, "menu created");
        Ok(Self {
            id,
            context: Arc::clone(context),
            underlay,
            user,
            path: VecDeque::with_capacity(settings.history_capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity: settings.history_capacity,
            cursor: Some(Cursor { node: start, stage }),
            interface: None,
        })
    }

    /// The menu's handle.
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// The user navigating, if any. Never changes.
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// The traversed underlay.
    pub fn underlay(&self) -> &Arc<L> {
        &self.underlay
    }

    /// Id of the traversed underlay.
    pub fn underlay_id(&self) -> &str {
        self.underlay.id()
    }

    /// The context the menu is registered with.
    pub fn context(&self) -> &Arc<MenuContext> {
        &self.context
    }

    /// A read-only view, as handed to underlays and listeners.
    pub fn view(&self) -> MenuView<'_> {
        MenuView::new(self.id, self.user.as_ref(), self.underlay.id(), self.path.len())
    }

    /// The stage at the current node; `None` once finished.
    pub fn current_stage(&self) -> Option<&Arc<MenuStage>> {
        self.cursor.as_ref().map(|c| &c.stage)
    }

    /// The current node; `None` once finished.
    pub fn current_node(&self) -> Option<&L::Node> {
        self.cursor.as_ref().map(|c| &c.node)
    }

    /// Remembered choices, oldest first.
    pub fn path(&self) -> Vec<MenuChoice<L::Node>> {
        self.path.iter().cloned().collect()
    }

    /// The newest remembered choice.
    pub fn last_choice(&self) -> Option<&MenuChoice<L::Node>> {
        self.path.back()
    }

    /// Number of remembered choices.
    pub fn history_len(&self) -> usize {
        self.path.len()
    }

    /// Maximum number of remembered choices.
    pub fn history_capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the menu reached the end of its dialogue or was abandoned.
    pub fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }

    /// The attached interface.
    pub fn interface(&self) -> Option<&Arc<MenuInterface>> {
        self.interface.as_ref()
    }

    /// Select `option` from the current stage.
    pub fn select(&mut self, option: &Arc<MenuOption>) -> MenuResponse {
        let Some(cursor) = &self.cursor else {
            return MenuResponse::PreviouslyFinished;
        };
        let view = self.view();
        let next = match cursor.node.next(&view, option) {
            Ok(next) => next,
            Err(SelectionError::InvalidSelection) => return MenuResponse::InvalidOption,
            Err(SelectionError::Failed(reason)) => {
                warn!(
                    menu = %self.id,
                    option = option.id(),
                    %reason,
                    "underlay failed to resolve selection"
                );
                return MenuResponse::MiscError;
            }
        };
        option.fire_select(view, &cursor.stage);
        let choice = MenuChoice::new(cursor.node.clone(), Arc::clone(option));
        self.remember(choice);
        debug!(
            menu = %self.id,
            option = option.id(),
            finished = next.is_none(),
            "option selected"
        );
        match next {
            Some(node) => {
                self.move_to(node);
                MenuResponse::Continue
            }
            None => {
                self.finish();
                MenuResponse::Finished
            }
        }
    }

    /// Select the option at `index` in the current stage.
    pub fn select_index(&mut self, index: usize) -> MenuResponse {
        let Some(cursor) = &self.cursor else {
            return MenuResponse::PreviouslyFinished;
        };
        let Ok(option) = cursor.stage.get(index) else {
            return MenuResponse::InvalidOption;
        };
        let option = Arc::clone(option);
        self.select(&option)
    }

    /// Select the registered option with `id`.
    pub fn select_id(&mut self, id: &str) -> MenuResponse {
        if self.is_finished() {
            return MenuResponse::PreviouslyFinished;
        }
        match self.context.options().get(id) {
            Some(option) => self.select(&option),
            None => MenuResponse::InvalidOption,
        }
    }

    /// Select from an optional slot; an empty slot is an invalid option.
    pub fn select_slot(&mut self, option: Option<&Arc<MenuOption>>) -> MenuResponse {
        if self.is_finished() {
            return MenuResponse::PreviouslyFinished;
        }
        match option {
            Some(option) => self.select(option),
            None => MenuResponse::InvalidOption,
        }
    }

    /// Undo the newest choice.
    ///
    /// Returns `false` when there is nothing to undo or the menu has finished.
    pub fn go_back(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let Some(choice) = self.path.pop_back() else {
            return false;
        };
        choice.option().fire_undo(self.view());
        debug!(menu = %self.id, option = choice.option().id(), "choice undone");
        self.move_to(choice.node().clone());
        true
    }

    /// Finish the menu without selecting anything. No listener runs.
    ///
    /// Returns `false` if the menu had already finished.
    pub fn abandon(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        debug!(menu = %self.id, "menu abandoned");
        self.finish();
        true
    }

    /// Attach a display interface, or detach with `None`.
    ///
    /// Attaching the interface that is already attached does nothing. An
    /// interface linked to another active menu is refused with
    /// [`MenuError::InterfaceInUse`] and nothing changes. An interface whose
    /// menu has finished is taken over. Otherwise the previous interface is
    /// closed and detached, then the new one is shown the current stage, or
    /// closed right away if this menu has finished.
    pub fn set_interface(
        &mut self,
        interface: Option<Arc<MenuInterface>>,
    ) -> Result<(), MenuError> {
        let Some(interface) = interface else {
            self.remove_interface();
            return Ok(());
        };
        if self
            .interface
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &interface))
            && interface.is_linked_to(self.id)
        {
            return Ok(());
        }
        if !interface.try_link(self.id) {
            return Err(MenuError::InterfaceInUse);
        }
        if let Some(old) = self.interface.take()
            && !Arc::ptr_eq(&old, &interface)
        {
            self.detach(&old);
        }
        debug!(menu = %self.id, "interface attached");
        match &self.cursor {
            Some(cursor) => self.present(&interface, &cursor.stage),
            None => {
                interface.close();
                interface.release(self.id);
            }
        }
        self.interface = Some(interface);
        Ok(())
    }

    /// Close and detach the current interface, returning it.
    ///
    /// An interface another menu has since taken over is returned untouched.
    pub fn remove_interface(&mut self) -> Option<Arc<MenuInterface>> {
        let interface = self.interface.take()?;
        self.detach(&interface);
        Some(interface)
    }

    fn detach(&self, interface: &MenuInterface) {
        if interface.is_linked_to(self.id) {
            interface.close();
            interface.unlink(self.id);
            debug!(menu = %self.id, "interface detached");
        }
    }

    fn remember(&mut self, choice: MenuChoice<L::Node>) {
        if self.capacity == 0 {
            return;
        }
        while self.path.len() >= self.capacity {
            self.path.pop_front();
        }
        self.path.push_back(choice);
    }

    /// Re-entering the current node with an unchanged stage pushes nothing.
    fn move_to(&mut self, node: L::Node) {
        let stage = node.stage(&self.view());
        let unchanged = self
            .cursor
            .as_ref()
            .is_some_and(|c| c.node == node && Arc::ptr_eq(&c.stage, &stage));
        if !unchanged && let Some(interface) = &self.interface {
            self.present(interface, &stage);
        }
        self.cursor = Some(Cursor { node, stage });
    }

    fn present(&self, interface: &MenuInterface, stage: &Arc<MenuStage>) {
        let max = interface.max_options();
        if stage.len() > max {
            warn!(
                menu = %self.id,
                options = stage.len(),
                max,
                "stage exceeds display capacity"
            );
        }
        interface.display(stage);
    }

    fn finish(&mut self) {
        self.cursor = None;
        self.underlay.remove_menu(self.id);
        self.context.sessions().remove(self.id, self.user.as_ref());
        if let Some(interface) = &self.interface
            && interface.is_linked_to(self.id)
        {
            interface.close();
            interface.release(self.id);
        }
        debug!(menu = %self.id, "menu finished");
    }
}

impl<L: MenuUnderlay> Drop for Menu<L> {
    fn drop(&mut self) {
        if self.cursor.is_some() {
            self.finish();
        }
        if let Some(interface) = self.interface.take() {
            interface.unlink(self.id);
        }
    }
}
