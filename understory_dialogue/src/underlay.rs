// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data sources a [`Menu`](crate::menu::Menu) traverses.
//!
//! ## Contract
//!
//! - [`MenuUnderlay::start`] is called exactly once, when a menu is constructed.
//!   Returning `None` makes construction fail.
//! - [`UnderlayNode::stage`] must return the same stage for a node until the
//!   node's content changes.
//! - [`UnderlayNode::next`] returns `Ok(None)` to end the dialogue,
//!   `Err(SelectionError::InvalidSelection)` when the option is not one of the
//!   node's options, and `Ok(Some(child))` otherwise.
//! - Nodes hold no per-menu state; any number of menus may sit on one node.
//!
//! Underlays can be realized (an explicit graph) or virtualized (stages computed
//! on demand from the requesting [`MenuView`]).

use core::any::Any;
use core::fmt::Debug;
use std::sync::Arc;

use crate::error::SelectionError;
use crate::event::MenuView;
use crate::option::MenuOption;
use crate::stage::MenuStage;
use crate::types::MenuId;

/// A point in an underlay.
pub trait UnderlayNode: Clone + Eq + Debug + Send + Sync {
    /// The stage presented at this node to `menu`.
    fn stage(&self, menu: &MenuView<'_>) -> Arc<MenuStage>;

    /// The node reached by selecting `option`, or `None` at the end of the dialogue.
    fn next(
        &self,
        menu: &MenuView<'_>,
        option: &Arc<MenuOption>,
    ) -> Result<Option<Self>, SelectionError>;
}

/// A data source that owns nodes and tracks the menus traversing it.
pub trait MenuUnderlay: Debug + Send + Sync {
    /// Node handle type.
    type Node: UnderlayNode;

    /// Process-unique id, used for lookup in an [`UnderlayTable`](crate::context::UnderlayTable).
    fn id(&self) -> &str;

    /// Starting node for `menu`; may depend on the menu's user.
    fn start(&self, menu: &MenuView<'_>) -> Option<Self::Node>;

    /// Start tracking `menu`. Fails if the menu does not traverse this underlay
    /// or is already tracked.
    fn add_menu(&self, menu: &MenuView<'_>) -> bool;

    /// Stop tracking a menu. Returns whether it was tracked.
    fn remove_menu(&self, menu: MenuId) -> bool;

    /// Snapshot of the menus currently traversing this underlay.
    fn menus(&self) -> Vec<MenuId>;
}

/// Type-erased view of a registered underlay.
///
/// Implemented for every [`MenuUnderlay`]; lets one table hold underlays with
/// different node types.
pub trait UnderlayEntry: Debug + Send + Sync {
    /// See [`MenuUnderlay::id`].
    fn underlay_id(&self) -> &str;

    /// See [`MenuUnderlay::menus`].
    fn active_menus(&self) -> Vec<MenuId>;

    /// Upcast for typed lookup.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<L: MenuUnderlay + 'static> UnderlayEntry for L {
    fn underlay_id(&self) -> &str {
        self.id()
    }

    fn active_menus(&self) -> Vec<MenuId> {
        self.menus()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
