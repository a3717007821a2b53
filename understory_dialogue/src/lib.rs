// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dialogue: a display-agnostic dialogue engine.
//!
//! ## Overview
//!
//! A dialogue is a sequence of stages, each a titled set of mutually exclusive options.
//! This crate walks one session at a time through such a sequence.
//! It separates three concerns:
//!
//! - what a dialogue looks like, rendered by a [`DisplayAdapter`](crate::interface::DisplayAdapter);
//! - how the dialogue is structured, provided by a [`MenuUnderlay`](crate::underlay::MenuUnderlay);
//! - who is navigating, an optional [`UserId`](crate::types::UserId).
//!
//! ## Pieces
//!
//! - [`MenuOption`](crate::option::MenuOption): a selectable [`MenuElement`](crate::element::MenuElement) with an id and prioritized listeners.
//! - [`MenuStage`](crate::stage::MenuStage): an immutable title plus ordered options.
//! - [`UnderlayNode`](crate::underlay::UnderlayNode): yields a stage and the node each option leads to.
//! - [`Menu`](crate::menu::Menu): the cursor. It selects, remembers a bounded history and can go back.
//! - [`MenuInterface`](crate::interface::MenuInterface): the one-to-one link between a menu and its display.
//! - [`MenuContext`](crate::context::MenuContext): the option table, underlay table and session registry.
//!
//! The directed-graph underlay lives in the `understory_dialogue_graph` crate.
//!
//! ## Outcomes
//!
//! Wiring mistakes are [`MenuError`](crate::error::MenuError)s and surface at construction.
//! Selections never fail; they answer a [`MenuResponse`](crate::types::MenuResponse), and every
//! answer other than `Continue` or `Finished` leaves the menu unchanged.
//!
//! ## Example
//!
//! A two-step underlay computed on demand:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use understory_dialogue::{
//!     MenuContext, MenuElement, MenuId, MenuOption, MenuResponse, MenuStage, MenuUnderlay,
//!     MenuView, Menu, SelectionError, UnderlayNode,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct Step(Arc<MenuStage>, bool);
//!
//! impl PartialEq for Step {
//!     fn eq(&self, other: &Self) -> bool {
//!         self.1 == other.1
//!     }
//! }
//!
//! impl Eq for Step {}
//!
//! impl UnderlayNode for Step {
//!     fn stage(&self, _menu: &MenuView<'_>) -> Arc<MenuStage> {
//!         Arc::clone(&self.0)
//!     }
//!
//!     fn next(
//!         &self,
//!         _menu: &MenuView<'_>,
//!         option: &Arc<MenuOption>,
//!     ) -> Result<Option<Self>, SelectionError> {
//!         if !self.0.contains(option) {
//!             return Err(SelectionError::InvalidSelection);
//!         }
//!         Ok((!self.1).then(|| Step(Arc::clone(&self.0), true)))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct TwoSteps(Arc<MenuStage>, Mutex<Vec<MenuId>>);
//!
//! impl MenuUnderlay for TwoSteps {
//!     type Node = Step;
//!     fn id(&self) -> &str {
//!         "two-steps"
//!     }
//!     fn start(&self, _menu: &MenuView<'_>) -> Option<Step> {
//!         Some(Step(Arc::clone(&self.0), false))
//!     }
//!     fn add_menu(&self, menu: &MenuView<'_>) -> bool {
//!         self.1.lock().unwrap().push(menu.id());
//!         true
//!     }
//!     fn remove_menu(&self, menu: MenuId) -> bool {
//!         let mut menus = self.1.lock().unwrap();
//!         let before = menus.len();
//!         menus.retain(|m| *m != menu);
//!         menus.len() != before
//!     }
//!     fn menus(&self) -> Vec<MenuId> {
//!         self.1.lock().unwrap().clone()
//!     }
//! }
//!
//! let context = Arc::new(MenuContext::new());
//! let ok = context
//!     .options()
//!     .register(MenuOption::new("ok", MenuElement::new("Ok", "Continue")).unwrap())
//!     .unwrap();
//! let stage = Arc::new(MenuStage::new(MenuElement::new("Hello", ""), [Arc::clone(&ok)]));
//! let underlay = Arc::new(TwoSteps(stage, Mutex::new(Vec::new())));
//!
//! let mut menu = Menu::new(&context, underlay, None).unwrap();
//! assert_eq!(menu.select(&ok), MenuResponse::Continue);
//! assert_eq!(menu.select_id("ok"), MenuResponse::Finished);
//! assert_eq!(menu.select(&ok), MenuResponse::PreviouslyFinished);
//! assert!(context.sessions().is_empty());
//! ```

pub mod context;
pub mod element;
pub mod error;
pub mod event;
pub mod interface;
pub mod listening;
pub mod menu;
pub mod option;
pub mod session;
pub mod stage;
pub mod types;
pub mod underlay;

#[cfg(test)]
mod testing;

pub use context::{MenuContext, OptionTable, UnderlayTable};
pub use element::{
    ColorHint, Colorable, Described, IconHint, Itemizable, MenuElement, Named, TextKey,
};
pub use error::{MenuError, SelectionError};
pub use event::{MenuView, SelectEvent, UndoEvent};
pub use interface::{DisplayAdapter, MenuInterface, MenuLookup};
pub use listening::{ListenerPriority, ListenerRegistry, MenuListener};
pub use menu::{DEFAULT_HISTORY_CAPACITY, Menu, MenuSettings};
pub use option::MenuOption;
pub use session::SessionRegistry;
pub use stage::MenuStage;
pub use types::{MenuChoice, MenuId, MenuResponse, UserId};
pub use underlay::{MenuUnderlay, UnderlayEntry, UnderlayNode};
