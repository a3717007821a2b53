// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectable options.
//!
//! An option is a [`MenuElement`] plus a process-unique id and a prioritized
//! listener registry. Options are shared as `Arc<MenuOption>`; two options are
//! the same selection only when they are the same allocation
//! (see [`MenuOption::same`]).

use core::fmt;
use std::sync::Arc;

use crate::element::{
    ColorHint, Colorable, Described, IconHint, Itemizable, MenuElement, Named, TextKey,
};
use crate::error::MenuError;
use crate::event::{MenuView, SelectEvent, UndoEvent};
use crate::listening::{ListenerPriority, ListenerRegistry, MenuListener};
use crate::stage::MenuStage;

/// A selectable, listener-bearing element.
pub struct MenuOption {
    id: String,
    element: MenuElement,
    listeners: ListenerRegistry,
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl MenuOption {
    /// Create an option. The id must be non-empty.
    ///
    /// Register it with an [`OptionTable`](crate::context::OptionTable) to make it
    /// discoverable by id.
    pub fn new(id: impl Into<String>, element: MenuElement) -> Result<Self, MenuError> {
        let id = id.into();
        if id.is_empty() {
            return Err(MenuError::EmptyId);
        }
        Ok(Self {
            id,
            element,
            listeners: ListenerRegistry::new(),
        })
    }

    /// The option's unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The descriptive element.
    pub fn element(&self) -> &MenuElement {
        &self.element
    }

    /// Whether `a` and `b` are the same option instance.
    pub fn same(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }

    /// Register a listener at [`ListenerPriority::Normal`].
    pub fn register_listener(&self, listener: Arc<dyn MenuListener>) {
        self.listeners.register(listener, ListenerPriority::default());
    }

    /// Register a listener at `priority`, replacing any previous registration.
    pub fn register_listener_at(
        &self,
        listener: Arc<dyn MenuListener>,
        priority: ListenerPriority,
    ) {
        self.listeners.register(listener, priority);
    }

    /// Remove a listener from all tiers.
    pub fn unregister_listener(&self, listener: &Arc<dyn MenuListener>) -> bool {
        self.listeners.unregister(listener)
    }

    /// The registered listeners, as a snapshot.
    pub fn listeners(&self) -> Vec<Arc<dyn MenuListener>> {
        self.listeners.listeners()
    }

    /// The listeners registered at one tier, as a snapshot.
    pub fn listeners_at(&self, priority: ListenerPriority) -> Vec<Arc<dyn MenuListener>> {
        self.listeners.listeners_at(priority)
    }

    /// The tier a listener is registered at.
    pub fn priority_of(&self, listener: &Arc<dyn MenuListener>) -> Option<ListenerPriority> {
        self.listeners.priority_of(listener)
    }

    pub(crate) fn fire_select(&self, menu: MenuView<'_>, stage: &MenuStage) {
        let event = SelectEvent {
            menu,
            option: self,
            stage,
        };
        self.listeners.dispatch(|l| l.on_select(&event));
    }

    pub(crate) fn fire_undo(&self, menu: MenuView<'_>) {
        let event = UndoEvent { menu, option: self };
        self.listeners.dispatch(|l| l.on_undo(&event));
    }
}

impl Named for MenuOption {
    fn name(&self) -> &TextKey {
        self.element.name()
    }
}

impl Described for MenuOption {
    fn description(&self) -> &TextKey {
        self.element.description()
    }
}

impl Colorable for MenuOption {
    fn color(&self) -> Option<&ColorHint> {
        self.element.color()
    }
}

impl Itemizable for MenuOption {
    fn icon(&self) -> Option<&IconHint> {
        self.element.icon()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::MenuId;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MenuListener for Recorder {
        fn on_select(&self, _event: &SelectEvent<'_>) {
            self.log.lock().unwrap().push(self.tag);
        }
    }

    struct SelfRemoving {
        me: Mutex<Option<Arc<dyn MenuListener>>>,
        option: Arc<MenuOption>,
        hits: Mutex<u32>,
    }

    impl MenuListener for SelfRemoving {
        fn on_select(&self, _event: &SelectEvent<'_>) {
            *self.hits.lock().unwrap() += 1;
            if let Some(me) = self.me.lock().unwrap().take() {
                self.option.unregister_listener(&me);
            }
        }
    }

    fn option(id: &str) -> Arc<MenuOption> {
        Arc::new(MenuOption::new(id, MenuElement::new(id, "")).unwrap())
    }

    fn view() -> MenuView<'static> {
        MenuView::new(MenuId(1), None, "test", 0)
    }

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(
            MenuOption::new("", MenuElement::new("n", "d")).unwrap_err(),
            MenuError::EmptyId
        );
    }

    #[test]
    fn dispatch_follows_priority_not_registration_order() {
        let opt = option("x");
        let log = Arc::new(Mutex::new(Vec::new()));
        let low: Arc<dyn MenuListener> = Arc::new(Recorder {
            tag: "l",
            log: log.clone(),
        });
        let high: Arc<dyn MenuListener> = Arc::new(Recorder {
            tag: "h",
            log: log.clone(),
        });
        opt.register_listener_at(low, ListenerPriority::Low);
        opt.register_listener_at(high, ListenerPriority::High);

        let stage = MenuStage::new(MenuElement::new("t", ""), [opt.clone()]);
        opt.fire_select(view(), &stage);
        assert_eq!(*log.lock().unwrap(), vec!["h", "l"]);
    }

    #[test]
    fn listener_may_unregister_itself_mid_dispatch() {
        let opt = option("y");
        let listener = Arc::new(SelfRemoving {
            me: Mutex::new(None),
            option: opt.clone(),
            hits: Mutex::new(0),
        });
        let as_dyn: Arc<dyn MenuListener> = listener.clone();
        *listener.me.lock().unwrap() = Some(as_dyn.clone());
        opt.register_listener(as_dyn);

        let stage = MenuStage::new(MenuElement::new("t", ""), [opt.clone()]);
        opt.fire_select(view(), &stage);
        opt.fire_select(view(), &stage);
        assert_eq!(*listener.hits.lock().unwrap(), 1);
        assert!(opt.listeners().is_empty());
    }

    #[test]
    fn identity_is_by_instance() {
        let a = option("same");
        let b = option("same");
        assert!(MenuOption::same(&a, &a.clone()));
        assert!(!MenuOption::same(&a, &b));
    }
}
